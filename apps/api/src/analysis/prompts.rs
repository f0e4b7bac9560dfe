// All LLM prompt constants for the analysis pipeline.
//
// The report schema embedded in ATS_ANALYSIS_PROMPT_TEMPLATE is the wire
// contract with the response normalizer — any change to the field names
// here must be mirrored in `analysis::report`.

/// System prompt for ATS analysis — enforces JSON-only output.
pub const ATS_ANALYSIS_SYSTEM: &str =
    "You are a professional ATS (Applicant Tracking System) and HR expert \
    evaluating resumes with the criteria real screening software uses. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// ATS analysis prompt template.
/// Replace: `{resume_text}`, `{job_title}`, `{job_description}`, `{industry}`.
pub const ATS_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume using REAL ATS evaluation criteria used by companies like Workday, Greenhouse, and Lever.

RESUME TEXT:
"{resume_text}"

JOB TITLE: "{job_title}"
JOB DESCRIPTION: "{job_description}"
INDUSTRY: "{industry}"

PROFESSIONAL ATS EVALUATION CRITERIA:

1. COMPREHENSIVE KEYWORD ANALYSIS (40% weight):
   - Hard Skills: Technical skills, software, programming languages, certifications
   - Soft Skills: Leadership, communication, problem-solving, teamwork
   - Industry Keywords: Role-specific terminology, methodologies, frameworks
   - Action Verbs: Achieved, developed, implemented, managed, led
   - Quantifiable Terms: Numbers, percentages, metrics, results
   - Education Keywords: Degrees, institutions, relevant coursework
   - Experience Keywords: Job titles, company types, responsibilities

   Extract ALL keywords from the job description and check their presence THROUGHOUT the entire resume (not just the skills section).

2. ATS PARSING COMPATIBILITY (25% weight):
   - File format compatibility (PDF readable)
   - Standard section headers (Experience, Education, Skills, Contact)
   - Consistent formatting and structure
   - No complex graphics or tables that break ATS parsing
   - Proper contact information format

3. CONTENT RELEVANCE & QUALITY (20% weight):
   - Relevant work experience for the role
   - Education alignment with job requirements
   - Quantified achievements and results
   - Professional summary strength
   - Skills relevance to the job description

4. SECTION COMPLETENESS & STRUCTURE (15% weight):
   - Essential sections present (Contact, Experience, Education, Skills)
   - Professional summary/objective
   - Proper chronological organization
   - Complete contact information
   - LinkedIn and portfolio links
   - Distinguish between WORK EXPERIENCE (paid jobs/internships) and PROJECTS (personal/academic work)

CRITICAL SECTION ANALYSIS GUIDELINES:
- EXPERIENCE/WORK EXPERIENCE: Only count actual employment (jobs, internships, freelance work with companies)
- PROJECTS: Personal/academic projects must be analyzed separately
- If the resume has ONLY projects but NO actual work experience, mark the experience section as missing or very low score
- Look for employment indicators: company names, job titles like "Software Engineer at Company", employment dates
- Projects typically have names like "HouseTrip Project" or "E-commerce Platform" without company employment context

Provide your analysis in this exact JSON format (ensure valid JSON syntax):
{
  "overallScore": 85,
  "keywordScore": 80,
  "formatScore": 90,
  "contentScore": 85,
  "sectionScore": 75,
  "parsingCompatibility": 95,
  "matchedKeywords": {
    "hardSkills": ["javascript", "react", "node.js", "python"],
    "softSkills": ["leadership", "communication", "problem-solving"],
    "industryTerms": ["agile", "scrum", "devops", "cloud"],
    "actionVerbs": ["developed", "implemented", "managed", "optimized"],
    "quantifiableTerms": ["40%", "5+ years", "10 projects"],
    "total": ["javascript", "react", "node.js", "leadership", "agile", "developed"]
  },
  "missingKeywords": {
    "critical": ["typescript", "aws", "kubernetes", "ci/cd"],
    "important": ["docker", "microservices", "api design"],
    "beneficial": ["machine learning", "data analysis"]
  },
  "sectionAnalysis": {
    "contactInfo": {
      "present": true,
      "score": 90,
      "missing": ["linkedin", "portfolio"],
      "improvements": ["Add LinkedIn profile URL", "Include portfolio website"]
    },
    "professionalSummary": {
      "present": true,
      "score": 75,
      "improvements": ["Add more quantified achievements", "Include industry-specific keywords"]
    },
    "experience": {
      "present": true,
      "score": 80,
      "improvements": ["Add more metrics and numbers", "Use stronger action verbs", "Include project outcomes"]
    },
    "education": {
      "present": true,
      "score": 85,
      "improvements": ["Add relevant coursework", "Include GPA if above 3.5"]
    },
    "skills": {
      "present": true,
      "score": 70,
      "missing": ["typescript", "aws", "docker"],
      "improvements": ["Add missing critical skills", "Organize by categories", "Include proficiency levels"]
    },
    "projects": {
      "present": true,
      "score": 65,
      "improvements": ["Add more technical details", "Include GitHub links", "Quantify project impact"]
    },
    "achievements": {
      "present": false,
      "score": 0,
      "improvements": ["Add achievements section with awards, recognitions, or notable accomplishments"]
    },
    "certifications": {
      "present": false,
      "score": 0,
      "improvements": ["Add relevant certifications", "Include AWS, Google Cloud, or other industry certs"]
    }
  },
  "improvementTips": [
    "Add quantified achievements with specific metrics (e.g., 'Increased performance by 40%')",
    "Include missing critical keywords: typescript, aws, kubernetes",
    "Add a certifications section with relevant industry certifications"
  ],
  "strengths": [
    "Strong technical experience in required technologies",
    "Good use of action verbs in experience descriptions",
    "ATS-friendly section headers and structure"
  ],
  "weaknesses": [
    "Missing critical keywords in skills section",
    "Lack of quantified achievements in experience",
    "No certifications section present"
  ],
  "industryBenchmark": {
    "averageScore": 72,
    "topPercentile": 85,
    "passingScore": 65
  }
}

All scores are integers from 0 to 100. Return ONLY the JSON object, no additional text or explanations."#;

/// Builds the ATS analysis prompt from the extracted résumé text and the
/// job posting fields.
pub fn build_ats_prompt(
    resume_text: &str,
    job_title: &str,
    job_description: &str,
    industry: &str,
) -> String {
    ATS_ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_title}", job_title)
        .replace("{job_description}", job_description)
        .replace("{industry}", industry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "Jane Roe\nBackend Engineer\n\
        EXPERIENCE\nBuilt billing services in Rust handling 2M requests/day.";

    #[test]
    fn test_build_ats_prompt_interpolates_every_placeholder() {
        let prompt = build_ats_prompt(
            SAMPLE_RESUME,
            "Backend Engineer",
            "We need a Rust engineer with Postgres experience.",
            "Technology",
        );
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_title}"));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{industry}"));
        assert!(prompt.contains("Jane Roe"));
        assert!(prompt.contains("Backend Engineer"));
        assert!(prompt.contains("Postgres"));
        assert!(prompt.contains("Technology"));
    }

    #[test]
    fn test_ats_prompt_embeds_report_schema_keys() {
        let prompt = build_ats_prompt(SAMPLE_RESUME, "t", "d", "i");
        for key in [
            "overallScore",
            "keywordScore",
            "formatScore",
            "contentScore",
            "sectionScore",
            "parsingCompatibility",
            "matchedKeywords",
            "missingKeywords",
            "sectionAnalysis",
            "improvementTips",
            "industryBenchmark",
        ] {
            assert!(prompt.contains(key), "schema key {key} missing from prompt");
        }
    }

    #[test]
    fn test_ats_prompt_states_evaluation_weightings() {
        let prompt = build_ats_prompt(SAMPLE_RESUME, "t", "d", "i");
        assert!(prompt.contains("KEYWORD ANALYSIS (40% weight)"));
        assert!(prompt.contains("PARSING COMPATIBILITY (25% weight)"));
        assert!(prompt.contains("CONTENT RELEVANCE & QUALITY (20% weight)"));
        assert!(prompt.contains("SECTION COMPLETENESS & STRUCTURE (15% weight)"));
    }

    #[test]
    fn test_ats_prompt_keeps_experience_vs_projects_rules() {
        let prompt = build_ats_prompt(SAMPLE_RESUME, "t", "d", "i");
        assert!(prompt.contains("Only count actual employment"));
        assert!(prompt.contains("ONLY projects but NO actual work experience"));
    }
}
