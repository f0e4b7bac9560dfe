//! Analysis report data model and response normalizer.
//!
//! The normalizer turns raw model output text into a validated [`AtsReport`]:
//! strip code fences, parse JSON, require the five score fields, fill empty
//! defaults for absent collections, and range-check every score before the
//! report can reach persistence. There is no retry and no re-prompt — a
//! malformed response is an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five fields every model response must carry as integers.
pub const REQUIRED_SCORE_FIELDS: [&str; 5] = [
    "overallScore",
    "keywordScore",
    "formatScore",
    "contentScore",
    "sectionScore",
];

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("model response was not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing or non-integer score field '{0}'")]
    MissingScore(&'static str),

    #[error("score field '{field}' out of range: {value}")]
    OutOfRange { field: String, value: i32 },
}

/// Keywords from the job description found in the résumé, by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchedKeywords {
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub industry_terms: Vec<String>,
    pub action_verbs: Vec<String>,
    pub quantifiable_terms: Vec<String>,
    pub total: Vec<String>,
}

/// Keywords from the job description absent from the résumé, by severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MissingKeywords {
    pub critical: Vec<String>,
    pub important: Vec<String>,
    pub beneficial: Vec<String>,
}

/// Per-section grading: presence, score, and what to fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    pub present: bool,
    pub score: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<String>,
}

/// Industry score context rendered next to the user's own result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmark {
    pub average_score: i32,
    pub top_percentile: i32,
    pub passing_score: i32,
}

impl Default for IndustryBenchmark {
    fn default() -> Self {
        Self {
            average_score: 70,
            top_percentile: 85,
            passing_score: 60,
        }
    }
}

/// The validated analysis result as returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub overall_score: i32,
    pub keyword_score: i32,
    pub format_score: i32,
    pub content_score: i32,
    pub section_score: i32,
    #[serde(default)]
    pub parsing_compatibility: i32,
    #[serde(default)]
    pub matched_keywords: MatchedKeywords,
    #[serde(default)]
    pub missing_keywords: MissingKeywords,
    #[serde(default)]
    pub section_analysis: BTreeMap<String, SectionReport>,
    #[serde(default)]
    pub improvement_tips: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub industry_benchmark: IndustryBenchmark,
}

/// A report plus the job posting that produced it — the wire shape of the
/// intake endpoint and the unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysis {
    #[serde(flatten)]
    pub report: AtsReport,
    pub job_title: String,
    pub job_description: String,
    pub industry: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Normalizes raw model output into a validated report.
pub fn normalize_response(raw: &str) -> Result<AtsReport, NormalizeError> {
    let stripped = strip_json_fences(raw);
    let value: serde_json::Value = serde_json::from_str(stripped)?;

    for field in REQUIRED_SCORE_FIELDS {
        let is_integer = value
            .get(field)
            .map(|v| v.is_i64() || v.is_u64())
            .unwrap_or(false);
        if !is_integer {
            return Err(NormalizeError::MissingScore(field));
        }
    }

    let report: AtsReport = serde_json::from_value(value)?;
    validate_score_ranges(&report)?;
    Ok(report)
}

/// Rejects any score outside [0, 100] — including section scores and the
/// benchmark triple — before the report can be persisted or returned.
fn validate_score_ranges(report: &AtsReport) -> Result<(), NormalizeError> {
    let top_level = [
        ("overallScore", report.overall_score),
        ("keywordScore", report.keyword_score),
        ("formatScore", report.format_score),
        ("contentScore", report.content_score),
        ("sectionScore", report.section_score),
        ("parsingCompatibility", report.parsing_compatibility),
    ];
    for (field, value) in top_level {
        check_range(field, value)?;
    }

    for (name, section) in &report.section_analysis {
        check_range(&format!("sectionAnalysis.{name}.score"), section.score)?;
    }

    let benchmark = &report.industry_benchmark;
    check_range("industryBenchmark.averageScore", benchmark.average_score)?;
    check_range("industryBenchmark.topPercentile", benchmark.top_percentile)?;
    check_range("industryBenchmark.passingScore", benchmark.passing_score)?;

    Ok(())
}

fn check_range(field: &str, value: i32) -> Result<(), NormalizeError> {
    if !(0..=100).contains(&value) {
        return Err(NormalizeError::OutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_response() -> serde_json::Value {
        serde_json::json!({
            "overallScore": 85,
            "keywordScore": 80,
            "formatScore": 90,
            "contentScore": 85,
            "sectionScore": 75
        })
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_normalize_minimal_response_fills_empty_defaults() {
        let report = normalize_response(&minimal_response().to_string()).unwrap();
        assert_eq!(report.overall_score, 85);
        assert_eq!(report.parsing_compatibility, 0);
        assert!(report.matched_keywords.total.is_empty());
        assert!(report.missing_keywords.critical.is_empty());
        assert!(report.section_analysis.is_empty());
        assert!(report.improvement_tips.is_empty());
        assert!(report.strengths.is_empty());
        assert!(report.weaknesses.is_empty());
    }

    #[test]
    fn test_normalize_absent_benchmark_uses_documented_defaults() {
        let report = normalize_response(&minimal_response().to_string()).unwrap();
        assert_eq!(report.industry_benchmark.average_score, 70);
        assert_eq!(report.industry_benchmark.top_percentile, 85);
        assert_eq!(report.industry_benchmark.passing_score, 60);
    }

    #[test]
    fn test_normalize_accepts_fenced_response() {
        let raw = format!("```json\n{}\n```", minimal_response());
        let report = normalize_response(&raw).unwrap();
        assert_eq!(report.overall_score, 85);
    }

    #[test]
    fn test_normalize_rejects_non_json() {
        let err = normalize_response("I could not analyze this resume.").unwrap_err();
        assert!(matches!(err, NormalizeError::Json(_)));
    }

    #[test]
    fn test_normalize_rejects_missing_required_field() {
        let mut value = minimal_response();
        value.as_object_mut().unwrap().remove("keywordScore");
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingScore("keywordScore")));
    }

    #[test]
    fn test_normalize_rejects_string_score() {
        let mut value = minimal_response();
        value["overallScore"] = serde_json::json!("85");
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingScore("overallScore")));
    }

    #[test]
    fn test_normalize_rejects_fractional_score() {
        let mut value = minimal_response();
        value["contentScore"] = serde_json::json!(85.5);
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingScore("contentScore")));
    }

    #[test]
    fn test_normalize_rejects_score_above_100() {
        let mut value = minimal_response();
        value["overallScore"] = serde_json::json!(150);
        let err = normalize_response(&value.to_string()).unwrap_err();
        match err {
            NormalizeError::OutOfRange { field, value } => {
                assert_eq!(field, "overallScore");
                assert_eq!(value, 150);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_rejects_negative_score() {
        let mut value = minimal_response();
        value["sectionScore"] = serde_json::json!(-5);
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert!(matches!(err, NormalizeError::OutOfRange { .. }));
    }

    #[test]
    fn test_normalize_rejects_out_of_range_section_score() {
        let mut value = minimal_response();
        value["sectionAnalysis"] = serde_json::json!({
            "experience": { "present": true, "score": 120 }
        });
        let err = normalize_response(&value.to_string()).unwrap_err();
        match err {
            NormalizeError::OutOfRange { field, .. } => {
                assert_eq!(field, "sectionAnalysis.experience.score");
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_rejects_out_of_range_benchmark() {
        let mut value = minimal_response();
        value["industryBenchmark"] = serde_json::json!({
            "averageScore": 70, "topPercentile": 101, "passingScore": 60
        });
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert!(matches!(err, NormalizeError::OutOfRange { .. }));
    }

    #[test]
    fn test_normalize_rejects_malformed_matched_keywords() {
        // Top-level key present but not the expected object shape: with the
        // typed model this is a hard error, not an undefined lurking for the
        // presentation layer.
        let mut value = minimal_response();
        value["matchedKeywords"] = serde_json::json!("javascript, react");
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert!(matches!(err, NormalizeError::Json(_)));
    }

    #[test]
    fn test_normalize_rejects_section_without_score() {
        let mut value = minimal_response();
        value["sectionAnalysis"] = serde_json::json!({
            "skills": { "present": true }
        });
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert!(matches!(err, NormalizeError::Json(_)));
    }

    #[test]
    fn test_normalize_full_response() {
        let raw = r#"{
            "overallScore": 78,
            "keywordScore": 70,
            "formatScore": 88,
            "contentScore": 75,
            "sectionScore": 80,
            "parsingCompatibility": 92,
            "matchedKeywords": {
                "hardSkills": ["rust", "postgres"],
                "softSkills": ["communication"],
                "industryTerms": ["agile"],
                "actionVerbs": ["built"],
                "quantifiableTerms": ["2M requests/day"],
                "total": ["rust", "postgres", "communication"]
            },
            "missingKeywords": {
                "critical": ["kubernetes"],
                "important": ["grpc"],
                "beneficial": ["terraform"]
            },
            "sectionAnalysis": {
                "experience": {
                    "present": true,
                    "score": 82,
                    "improvements": ["Add more metrics"]
                },
                "certifications": {
                    "present": false,
                    "score": 0,
                    "improvements": ["Add relevant certifications"]
                }
            },
            "improvementTips": ["Include missing critical keywords: kubernetes"],
            "strengths": ["Strong technical experience"],
            "weaknesses": ["No certifications section"],
            "industryBenchmark": {
                "averageScore": 72,
                "topPercentile": 85,
                "passingScore": 65
            }
        }"#;

        let report = normalize_response(raw).unwrap();
        assert_eq!(report.overall_score, 78);
        assert_eq!(report.matched_keywords.hard_skills, vec!["rust", "postgres"]);
        assert_eq!(report.missing_keywords.critical, vec!["kubernetes"]);
        assert_eq!(report.section_analysis.len(), 2);
        assert!(report.section_analysis["experience"].present);
        assert!(!report.section_analysis["certifications"].present);
        assert_eq!(report.industry_benchmark.passing_score, 65);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = normalize_response(&minimal_response().to_string()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("overallScore").is_some());
        assert!(value.get("matchedKeywords").is_some());
        assert!(value.get("industryBenchmark").is_some());
        assert!(value.get("overall_score").is_none());
    }

    #[test]
    fn test_analysis_flattens_report_and_metadata() {
        let report = normalize_response(&minimal_response().to_string()).unwrap();
        let analysis = AtsAnalysis {
            report,
            job_title: "Backend Engineer".to_string(),
            job_description: "Rust services".to_string(),
            industry: "Technology".to_string(),
            analyzed_at: Utc::now(),
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["overallScore"], 85);
        assert_eq!(value["jobTitle"], "Backend Engineer");
        assert!(value.get("analyzedAt").is_some());
    }

    #[test]
    fn test_report_round_trips_through_serde() {
        let original = normalize_response(&minimal_response().to_string()).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let back: AtsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
