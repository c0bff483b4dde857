//! Text Enhancement Gateway.
//!
//! One normalized contract in front of the language model:
//! `enhance(kind, original) -> Result<EnhancedText, EnhancementError>`.
//! Whatever shape the provider answers in, callers always receive a single
//! trimmed string or a recoverable error.

pub mod handlers;
pub mod normalize;
pub mod prompts;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Summary,
    ExperienceDescription,
    EducationDescription,
    ProjectDescription,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Summary => "Summary",
            FieldKind::ExperienceDescription => "Job description",
            FieldKind::EducationDescription => "Education description",
            FieldKind::ProjectDescription => "Project description",
        }
    }
}

/// A concrete field in the open draft. List fields are addressed by item id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnhanceTarget {
    Summary,
    ExperienceDescription {
        #[serde(rename = "itemId")]
        item_id: String,
    },
    EducationDescription {
        #[serde(rename = "itemId")]
        item_id: String,
    },
    ProjectDescription {
        #[serde(rename = "itemId")]
        item_id: String,
    },
}

impl EnhanceTarget {
    /// Pairs a field kind with an item id. Only the summary stands alone.
    pub fn new(kind: FieldKind, item_id: Option<String>) -> Option<Self> {
        match (kind, item_id) {
            (FieldKind::Summary, _) => Some(EnhanceTarget::Summary),
            (FieldKind::ExperienceDescription, Some(item_id)) => {
                Some(EnhanceTarget::ExperienceDescription { item_id })
            }
            (FieldKind::EducationDescription, Some(item_id)) => {
                Some(EnhanceTarget::EducationDescription { item_id })
            }
            (FieldKind::ProjectDescription, Some(item_id)) => {
                Some(EnhanceTarget::ProjectDescription { item_id })
            }
            (_, None) => None,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            EnhanceTarget::Summary => FieldKind::Summary,
            EnhanceTarget::ExperienceDescription { .. } => FieldKind::ExperienceDescription,
            EnhanceTarget::EducationDescription { .. } => FieldKind::EducationDescription,
            EnhanceTarget::ProjectDescription { .. } => FieldKind::ProjectDescription,
        }
    }

    pub fn item_id(&self) -> Option<&str> {
        match self {
            EnhanceTarget::Summary => None,
            EnhanceTarget::ExperienceDescription { item_id }
            | EnhanceTarget::EducationDescription { item_id }
            | EnhanceTarget::ProjectDescription { item_id } => Some(item_id),
        }
    }
}

impl fmt::Display for EnhanceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.item_id() {
            Some(id) => write!(f, "{} of item {id}", self.kind().label().to_lowercase()),
            None => f.write_str("summary"),
        }
    }
}

/// Provider output reduced to one non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnhancedText(String);

impl EnhancedText {
    /// `None` when nothing but whitespace is left.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EnhancementError {
    #[error("Please enter some text to enhance first.")]
    EmptyInput,

    #[error("The AI returned an empty result.")]
    Empty,

    #[error("Failed to parse AI response: {0}")]
    Malformed(String),

    #[error("Text enhancement is not configured on this server.")]
    Unavailable,

    #[error("Enhancement service failed: {0}")]
    Provider(String),

    #[error("Enhancement timed out after {secs}s")]
    TimedOut { secs: u64 },
}

// ────────────────────────────────────────────────────────────────────────────
// TextEnhancer trait
// ────────────────────────────────────────────────────────────────────────────

/// Rewrites one field of free text.
///
/// Carried in `AppState` as `Arc<dyn TextEnhancer>`.
#[async_trait]
pub trait TextEnhancer: Send + Sync {
    async fn enhance(
        &self,
        kind: FieldKind,
        original: &str,
    ) -> Result<EnhancedText, EnhancementError>;
}

/// Rejects blank input before any provider is involved.
pub async fn enhance_text(
    enhancer: &dyn TextEnhancer,
    kind: FieldKind,
    original: &str,
) -> Result<EnhancedText, EnhancementError> {
    if original.trim().is_empty() {
        return Err(EnhancementError::EmptyInput);
    }
    enhancer.enhance(kind, original.trim()).await
}

// ────────────────────────────────────────────────────────────────────────────
// LlmEnhancer: production implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmEnhancer {
    llm: LlmClient,
}

impl LlmEnhancer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextEnhancer for LlmEnhancer {
    async fn enhance(
        &self,
        kind: FieldKind,
        original: &str,
    ) -> Result<EnhancedText, EnhancementError> {
        let prompt = prompts::build_prompt(kind, original);
        let raw = self
            .llm
            .call(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| EnhancementError::Provider(e.to_string()))?;
        debug!(kind = ?kind, chars = raw.len(), "Enhancement response received");
        normalize::normalize_response(kind, &raw)
    }
}

/// Stand-in used when no API key is configured.
pub struct DisabledEnhancer;

#[async_trait]
impl TextEnhancer for DisabledEnhancer {
    async fn enhance(
        &self,
        _kind: FieldKind,
        _original: &str,
    ) -> Result<EnhancedText, EnhancementError> {
        Err(EnhancementError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEnhancer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextEnhancer for CountingEnhancer {
        async fn enhance(
            &self,
            _kind: FieldKind,
            original: &str,
        ) -> Result<EnhancedText, EnhancementError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            EnhancedText::new(original.to_uppercase()).ok_or(EnhancementError::Empty)
        }
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_provider() {
        let enhancer = CountingEnhancer {
            calls: AtomicUsize::new(0),
        };
        let err = enhance_text(&enhancer, FieldKind::Summary, "   ")
            .await
            .unwrap_err();
        assert_eq!(err, EnhancementError::EmptyInput);
        assert_eq!(enhancer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_enhance_text_passes_trimmed_input() {
        let enhancer = CountingEnhancer {
            calls: AtomicUsize::new(0),
        };
        let text = enhance_text(&enhancer, FieldKind::ProjectDescription, "  built it ")
            .await
            .unwrap();
        assert_eq!(text.as_str(), "BUILT IT");
        assert_eq!(enhancer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_enhancer_is_unavailable() {
        let err = enhance_text(&DisabledEnhancer, FieldKind::Summary, "text")
            .await
            .unwrap_err();
        assert_eq!(err, EnhancementError::Unavailable);
    }

    #[test]
    fn test_target_requires_item_id_for_list_fields() {
        assert_eq!(
            EnhanceTarget::new(FieldKind::Summary, None),
            Some(EnhanceTarget::Summary)
        );
        assert_eq!(EnhanceTarget::new(FieldKind::EducationDescription, None), None);
        let target =
            EnhanceTarget::new(FieldKind::ExperienceDescription, Some("e1".to_string())).unwrap();
        assert_eq!(target.kind(), FieldKind::ExperienceDescription);
        assert_eq!(target.item_id(), Some("e1"));
    }

    #[test]
    fn test_target_wire_shape() {
        let target: EnhanceTarget =
            serde_json::from_str(r#"{"kind":"project_description","itemId":"p9"}"#).unwrap();
        assert_eq!(
            target,
            EnhanceTarget::ProjectDescription {
                item_id: "p9".to_string()
            }
        );
        assert_eq!(
            serde_json::to_value(EnhanceTarget::Summary).unwrap(),
            serde_json::json!({"kind": "summary"})
        );
    }

    #[test]
    fn test_enhanced_text_rejects_blank() {
        assert!(EnhancedText::new(" \n ").is_none());
        assert_eq!(EnhancedText::new(" ok ").unwrap().as_str(), "ok");
    }
}
