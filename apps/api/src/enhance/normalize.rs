//! Reduces a provider reply to one [`EnhancedText`].
//!
//! Accepted shapes, after stripping code fences:
//! - `{"enhancedDescription": "text"}`
//! - `{"enhancedDescription": ["point", ...]}`
//! - `{"points": ["point", ...]}`
//!
//! List items are trimmed, blanks dropped, and the rest joined with
//! [`POINT_SEPARATOR`]. For the summary field a reply that is not JSON at all
//! is taken as the rewritten text itself.

use serde::Deserialize;
use serde_json::Value;

use crate::enhance::{EnhancedText, EnhancementError, FieldKind};
use crate::llm_client::strip_json_fences;

pub const POINT_SEPARATOR: &str = "\n";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextOrPoints {
    Text(String),
    Points(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnhancedPayload {
    enhanced_description: Option<TextOrPoints>,
    points: Option<Vec<String>>,
}

pub fn normalize_response(kind: FieldKind, raw: &str) -> Result<EnhancedText, EnhancementError> {
    let body = strip_json_fences(raw);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if kind == FieldKind::Summary => {
            return EnhancedText::new(body).ok_or(EnhancementError::Empty);
        }
        Err(e) => return Err(EnhancementError::Malformed(e.to_string())),
    };

    let payload: EnhancedPayload = serde_json::from_value(value)
        .map_err(|e| EnhancementError::Malformed(e.to_string()))?;

    let text = match (payload.enhanced_description, payload.points) {
        (Some(TextOrPoints::Text(text)), _) => text,
        (Some(TextOrPoints::Points(points)), _) | (None, Some(points)) => join_points(points),
        (None, None) => {
            return Err(EnhancementError::Malformed(
                "expected 'enhancedDescription' or 'points'".to_string(),
            ))
        }
    };

    EnhancedText::new(text).ok_or(EnhancementError::Empty)
}

fn join_points(points: Vec<String>) -> String {
    points
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(POINT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_string_description() {
        let text = normalize_response(
            FieldKind::ExperienceDescription,
            r#"{"enhancedDescription": "  Led a team of 4 engineers. "}"#,
        )
        .unwrap();
        assert_eq!(text.as_str(), "Led a team of 4 engineers.");
    }

    #[test]
    fn test_array_description_joined() {
        let text = normalize_response(
            FieldKind::Summary,
            r#"{"enhancedDescription": [" First point ", "", "Second point"]}"#,
        )
        .unwrap();
        assert_eq!(text.as_str(), "First point\nSecond point");
    }

    #[test]
    fn test_points_shape_inside_fences() {
        let raw = "```json\n{\"points\": [\"Cut latency 40%\", \"Shipped v2\"]}\n```";
        let text = normalize_response(FieldKind::ExperienceDescription, raw).unwrap();
        assert_eq!(text.as_str(), "Cut latency 40%\nShipped v2");
    }

    #[test]
    fn test_empty_after_trim_is_empty_error() {
        assert_eq!(
            normalize_response(FieldKind::ProjectDescription, r#"{"points": ["  ", ""]}"#),
            Err(EnhancementError::Empty)
        );
        assert_eq!(
            normalize_response(FieldKind::Summary, r#"{"enhancedDescription": "   "}"#),
            Err(EnhancementError::Empty)
        );
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        assert!(matches!(
            normalize_response(FieldKind::Summary, r#"{"summary": "hello"}"#),
            Err(EnhancementError::Malformed(_))
        ));
        assert!(matches!(
            normalize_response(FieldKind::EducationDescription, r#"{"enhancedDescription": 7}"#),
            Err(EnhancementError::Malformed(_))
        ));
    }

    #[test]
    fn test_plain_text_accepted_only_for_summary() {
        let text =
            normalize_response(FieldKind::Summary, "Seasoned backend engineer.").unwrap();
        assert_eq!(text.as_str(), "Seasoned backend engineer.");

        assert!(matches!(
            normalize_response(FieldKind::ExperienceDescription, "Seasoned backend engineer."),
            Err(EnhancementError::Malformed(_))
        ));
    }

    #[test]
    fn test_blank_reply_is_empty_for_summary() {
        assert_eq!(
            normalize_response(FieldKind::Summary, "   "),
            Err(EnhancementError::Empty)
        );
    }
}
