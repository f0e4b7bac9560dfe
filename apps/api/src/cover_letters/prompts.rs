// LLM prompt constants for cover-letter generation.

use crate::models::user::User;

/// Cover-letter prompt template.
/// Replace: `{job_title}`, `{company_name}`, `{industry}`, `{experience}`,
///          `{skills}`, `{bio}`, `{job_description}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter for a {job_title} position at {company_name}.

About the candidate:
- Industry: {industry}
- Years of Experience: {experience}
- Skills: {skills}
- Professional Background: {bio}

Job Description:
{job_description}

Requirements:
1. Use a professional, enthusiastic tone
2. Highlight relevant skills and experience
3. Show understanding of the company's needs
4. Keep it concise (max 400 words)
5. Use proper business letter formatting in markdown
6. Include specific examples of achievements
7. Relate the candidate's background to the job requirements

Format the letter in markdown."#;

/// Builds the cover-letter prompt from the job posting and the caller's
/// profile attributes (prompt filler only — absent fields degrade to
/// "unspecified" rather than failing the request).
pub fn build_cover_letter_prompt(
    user: &User,
    job_title: &str,
    company_name: &str,
    job_description: &str,
) -> String {
    let experience = user
        .experience
        .map(|years| years.to_string())
        .unwrap_or_else(|| "unspecified".to_string());
    let skills = if user.skills.is_empty() {
        "unspecified".to_string()
    } else {
        user.skills.join(", ")
    };

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{company_name}", company_name)
        .replace("{industry}", user.industry.as_deref().unwrap_or("unspecified"))
        .replace("{experience}", &experience)
        .replace("{skills}", &skills)
        .replace("{bio}", user.bio.as_deref().unwrap_or("unspecified"))
        .replace("{job_description}", job_description)
}
