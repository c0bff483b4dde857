//! Axum route handlers for sessions, navigation, drafts and previews.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Language, ResumeDocument, SectionValue};
use crate::models::template::{TemplateDefinition, DEFAULT_TEMPLATE_ID};
use crate::render::{project, project_all, Projection, VisualTree};
use crate::session::notifications::Notification;
use crate::session::Session;
use crate::state::AppState;
use crate::wizard::controller::SubmitOutcome;
use crate::wizard::progress::{compute_progress, ProgressReport};
use crate::wizard::{Draft, Step, WizardError, WizardState};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: WizardState,
    pub current_step: Step,
    pub route: String,
    pub document: ResumeDocument,
    pub draft: Draft,
}

impl SessionView {
    fn of(session: &Session) -> Self {
        let step = session.wizard.current_step();
        Self {
            session_id: session.id,
            created_at: session.created_at,
            state: session.wizard.state().clone(),
            current_step: step,
            route: step.route_path(),
            document: session.wizard.document().clone(),
            draft: session.wizard.draft().clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionRequest {
    pub template_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveItemRequest {
    pub to: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTemplateRequest {
    pub template_id: String,
}

#[derive(Debug, Serialize)]
pub struct ItemAddedResponse {
    pub item_id: String,
    pub draft: Draft,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: SubmitOutcome,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Json<Vec<TemplateDefinition>> {
    Json(state.templates.all().to_vec())
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Body is optional; an absent template id selects the default template.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let template_id = body
        .and_then(|Json(req)| req.template_id)
        .unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string());
    if !state.templates.contains(&template_id) {
        return Err(WizardError::UnknownTemplate(template_id).into());
    }

    let (id, handle) = state.sessions.create(&template_id).await;
    info!(session_id = %id, template = %template_id, "Session created");
    let session = handle.lock().await;
    Ok((StatusCode::CREATED, Json(SessionView::of(&session))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionView::of(&session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    info!(session_id = %id, "Session closed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.reset();
    info!(session_id = %id, "Session reset");
    Ok(Json(SessionView::of(&session)))
}

// ────────────────────────────────────────────────────────────────────────────
// Navigation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/advance
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.advance();
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/retreat
pub async fn handle_retreat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.retreat();
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/steps/:index
pub async fn handle_go_to_step(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.go_to_step(index)?;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/sessions/:id/navigate
///
/// Restores the step from a builder route path such as `/builder/skills`.
pub async fn handle_navigate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.navigate(&req.path)?;
    Ok(Json(SessionView::of(&session)))
}

// ────────────────────────────────────────────────────────────────────────────
// Draft editing
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/draft
pub async fn handle_replace_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(value): Json<SectionValue>,
) -> Result<Json<Draft>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.draft_mut().replace(value)?;
    Ok(Json(session.wizard.draft().clone()))
}

/// POST /api/v1/sessions/:id/draft/items
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ItemAddedResponse>), AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    let item_id = session.wizard.draft_mut().add_item()?;
    Ok((
        StatusCode::CREATED,
        Json(ItemAddedResponse {
            item_id,
            draft: session.wizard.draft().clone(),
        }),
    ))
}

/// DELETE /api/v1/sessions/:id/draft/items/:item_id
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, String)>,
) -> Result<Json<Draft>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.draft_mut().remove_item(&item_id)?;
    Ok(Json(session.wizard.draft().clone()))
}

/// POST /api/v1/sessions/:id/draft/items/:item_id/move
pub async fn handle_move_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, String)>,
    Json(req): Json<MoveItemRequest>,
) -> Result<Json<Draft>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.draft_mut().move_item(&item_id, req.to)?;
    Ok(Json(session.wizard.draft().clone()))
}

/// POST /api/v1/sessions/:id/submit
///
/// Validates the open draft; on success commits it and moves to the next
/// step (or into preview on the last one).
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    let Session {
        wizard,
        notifications,
        ..
    } = &mut *session;
    let outcome = wizard.submit(notifications).map_err(WizardError::from)?;
    info!(
        session_id = %id,
        section = outcome.committed.as_str(),
        entered_preview = outcome.entered_preview,
        "Section committed"
    );
    Ok(Json(SubmitResponse {
        outcome,
        session: SessionView::of(&session),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Document and template
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/sections/languages
///
/// Languages own no wizard step; the section is written as given.
pub async fn handle_update_languages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(languages): Json<Vec<Language>>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session
        .wizard
        .update_section(SectionValue::Languages(languages));
    Ok(Json(SessionView::of(&session)))
}

/// PUT /api/v1/sessions/:id/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetTemplateRequest>,
) -> Result<Json<WizardState>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session
        .wizard
        .set_template(&req.template_id, &state.templates)?;
    Ok(Json(session.wizard.state().clone()))
}

/// POST /api/v1/sessions/:id/preview/toggle
pub async fn handle_toggle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardState>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.wizard.toggle_preview();
    Ok(Json(session.wizard.state().clone()))
}

/// GET /api/v1/sessions/:id/progress
pub async fn handle_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProgressReport>, AppError> {
    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    Ok(Json(compute_progress(
        session.wizard.document(),
        session.wizard.current_step(),
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Preview
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/preview
///
/// Visual tree of the committed document in the selected template.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VisualTree>, AppError> {
    let handle = state.sessions.get(id).await?;
    let (document, template_id) = {
        let session = handle.lock().await;
        (
            session.wizard.document().clone(),
            session.wizard.state().selected_template_id.clone(),
        )
    };
    let template = state
        .templates
        .get(&template_id)
        .ok_or_else(|| AppError::NotFound(format!("Template '{template_id}' not found")))?;
    Ok(Json(project(&document, template)?))
}

/// GET /api/v1/sessions/:id/preview/all
///
/// One entry per catalog template; a faulty template reports its fault
/// without hiding the others.
pub async fn handle_preview_all(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Projection>>, AppError> {
    let handle = state.sessions.get(id).await?;
    let document = handle.lock().await.wizard.document().clone();
    Ok(Json(project_all(&document, &state.templates)))
}

/// GET /api/v1/sessions/:id/notifications
///
/// Returns and clears the queued notifications.
pub async fn handle_drain_notifications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    Ok(Json(session.notifications.drain()))
}
