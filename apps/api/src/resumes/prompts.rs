// LLM prompt constants for résumé content improvement.

/// Content-improvement prompt template for résumé sections.
/// Replace: `{section}`, `{industry}`, `{company}`, `{position}`, `{current}`.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"As an expert resume writer, improve the following existing {section} content for a {industry} applying to {company} for the {position} role.

IMPORTANT: You must improve and enhance the PROVIDED content below, not create entirely new content. Build upon what's already written.

EXISTING CONTENT TO IMPROVE:
"{current}"

Instructions:
1. Keep the core structure and meaning of the existing content
2. Enhance with stronger action verbs and more impactful language
3. Add specific metrics and quantifiable results where appropriate
4. Include relevant technical skills and keywords for the {position} role
5. Make it more concise and powerful while maintaining the original intent
6. Focus on achievements and impact over just responsibilities
7. Ensure ATS compatibility with industry keywords

Return only the improved version of the existing content, maintaining similar length and structure.
Do not add explanations or additional text."#;

/// Builds the improvement prompt. `industry` falls back to "professional"
/// upstream when the caller's profile has none.
pub fn build_improve_prompt(
    current: &str,
    section: &str,
    industry: &str,
    company: &str,
    position: &str,
) -> String {
    IMPROVE_PROMPT_TEMPLATE
        .replace("{section}", section)
        .replace("{industry}", industry)
        .replace("{company}", company)
        .replace("{position}", position)
        .replace("{current}", current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_improve_prompt_interpolates_every_placeholder() {
        let prompt = build_improve_prompt(
            "Led a team of developers",
            "experience",
            "Technology",
            "Acme Corp",
            "Staff Engineer",
        );
        assert!(!prompt.contains("{section}"));
        assert!(!prompt.contains("{industry}"));
        assert!(!prompt.contains("{company}"));
        assert!(!prompt.contains("{position}"));
        assert!(!prompt.contains("{current}"));
        assert!(prompt.contains("Led a team of developers"));
        assert!(prompt.contains("Acme Corp"));
        // {position} appears twice in the template
        assert_eq!(prompt.matches("Staff Engineer").count(), 2);
    }
}
