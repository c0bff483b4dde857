// Enhancement prompt templates, one per field kind.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::enhance::FieldKind;
use crate::llm_client::prompts::FAITHFULNESS_INSTRUCTION;

/// Summary rewrite. Replace `{text}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Enhance the following professional summary for a resume.
Rewrite it in 2-3 concise bullet points.

{faithfulness}

Respond only in JSON like: {"enhancedDescription": ["Point 1", "Point 2", "Point 3"]}

Summary:
"{text}""#;

/// Job description rewrite. Replace `{text}` before sending.
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"Enhance the following resume bullet points for clarity, impact, and grammar.

{faithfulness}

Return the result as JSON in this format:
{"points": ["Improved bullet point 1", "Enhanced bullet point 2"]}

Original bullet points:
{text}"#;

/// Education description rewrite. Replace `{text}` before sending.
pub const EDUCATION_PROMPT_TEMPLATE: &str = r#"Improve the following education description for a resume: coursework, honours, thesis or activities.
Keep it to one or two sentences.

{faithfulness}

Respond only in JSON like: {"enhancedDescription": "Improved description"}

Original description:
"{text}""#;

/// Project description rewrite. Replace `{text}` before sending.
pub const PROJECT_PROMPT_TEMPLATE: &str = r#"Enhance the following project description for a resume.
Make it professional and concise, and lead with what the project does and the impact it had.

{faithfulness}

Respond only in JSON like: {"enhancedDescription": "Improved description"}

Original description:
"{text}""#;

pub fn build_prompt(kind: FieldKind, original: &str) -> String {
    let template = match kind {
        FieldKind::Summary => SUMMARY_PROMPT_TEMPLATE,
        FieldKind::ExperienceDescription => EXPERIENCE_PROMPT_TEMPLATE,
        FieldKind::EducationDescription => EDUCATION_PROMPT_TEMPLATE,
        FieldKind::ProjectDescription => PROJECT_PROMPT_TEMPLATE,
    };
    template
        .replace("{faithfulness}", FAITHFULNESS_INSTRUCTION)
        .replace("{text}", original)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_original_text() {
        let prompt = build_prompt(FieldKind::ProjectDescription, "A CLI for resumes");
        assert!(prompt.contains("\"A CLI for resumes\""));
        assert!(prompt.contains("enhancedDescription"));
        assert!(!prompt.contains("{text}"));
        assert!(!prompt.contains("{faithfulness}"));
    }

    #[test]
    fn test_experience_prompt_asks_for_points() {
        let prompt = build_prompt(FieldKind::ExperienceDescription, "wrote code");
        assert!(prompt.contains("\"points\""));
    }
}
