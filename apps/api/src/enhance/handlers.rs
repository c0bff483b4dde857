//! Axum route handler for field enhancement.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::enhance::{enhance_text, EnhanceTarget, EnhancementError, FieldKind};
use crate::errors::AppError;
use crate::models::resume::SectionValue;
use crate::session::BusyKey;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `"summary"` or `{"kind": "...", "itemId": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TargetSpec {
    Bare(FieldKind),
    Item {
        kind: FieldKind,
        #[serde(rename = "itemId", default)]
        item_id: Option<String>,
    },
}

impl TargetSpec {
    fn resolve(self) -> Result<EnhanceTarget, AppError> {
        let (kind, item_id) = match self {
            TargetSpec::Bare(kind) => (kind, None),
            TargetSpec::Item { kind, item_id } => (kind, item_id),
        };
        EnhanceTarget::new(kind, item_id).ok_or_else(|| {
            AppError::Validation(format!("Target '{}' requires an itemId", kind.label()))
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub target: TargetSpec,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub target: EnhanceTarget,
    /// False when the target left the draft while the request was running.
    pub applied: bool,
    pub enhanced: String,
    pub draft: SectionValue,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/enhance
///
/// Rewrites one field of the open draft. The session lock is not held while
/// the provider runs; the result lands only if its target is still open.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let target = request.target.resolve()?;
    let handle = state.sessions.get(id).await?;

    let (original, _guard) = {
        let mut session = handle.lock().await;
        let Some(original) = session.wizard.draft().target_text(&target) else {
            let message = format!("The {target} is not open in the current step");
            session.notifications.error(message.as_str());
            return Err(AppError::NotFound(message));
        };
        let Some(guard) = session
            .in_flight
            .try_acquire(BusyKey::Enhance(target.clone()))
        else {
            let message = format!("The {target} is already being enhanced");
            session.notifications.error(message.as_str());
            return Err(AppError::Conflict(message));
        };
        (original, guard)
    };

    let secs = state.config.enhance_timeout_secs;
    let result = tokio::time::timeout(
        Duration::from_secs(secs),
        enhance_text(state.enhancer.as_ref(), target.kind(), &original),
    )
    .await
    .unwrap_or(Err(EnhancementError::TimedOut { secs }));

    let mut session = handle.lock().await;
    let enhanced = match result {
        Ok(text) => text,
        Err(e) => {
            warn!(session_id = %id, target = %target, error = %e, "Enhancement failed");
            session.notifications.error(e.to_string());
            return Err(e.into());
        }
    };

    let applied = session
        .wizard
        .draft_mut()
        .apply_text(&target, enhanced.as_str());
    if applied {
        session
            .notifications
            .success(format!("{} enhanced!", target.kind().label()));
    } else {
        info!(session_id = %id, target = %target, "Enhancement discarded: target no longer open");
        session.notifications.info(format!(
            "{} enhancement was discarded because the field is no longer open",
            target.kind().label()
        ));
    }

    Ok(Json(EnhanceResponse {
        target,
        applied,
        enhanced: enhanced.as_str().to_string(),
        draft: session.wizard.draft().value().clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_spec_accepts_bare_kind() {
        let request: EnhanceRequest = serde_json::from_str(r#"{"target": "summary"}"#).unwrap();
        assert_eq!(request.target.resolve().unwrap(), EnhanceTarget::Summary);
    }

    #[test]
    fn test_target_spec_accepts_item_object() {
        let request: EnhanceRequest = serde_json::from_str(
            r#"{"target": {"kind": "experience_description", "itemId": "e1"}}"#,
        )
        .unwrap();
        assert_eq!(
            request.target.resolve().unwrap(),
            EnhanceTarget::ExperienceDescription {
                item_id: "e1".to_string()
            }
        );
    }

    #[test]
    fn test_target_spec_list_kind_without_item_is_rejected() {
        let request: EnhanceRequest =
            serde_json::from_str(r#"{"target": "project_description"}"#).unwrap();
        assert!(matches!(
            request.target.resolve(),
            Err(AppError::Validation(_))
        ));
    }
}
