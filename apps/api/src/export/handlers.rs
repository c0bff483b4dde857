//! Axum route handler for PDF download.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use rusttype::Font;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{export_to_pdf, ExportError, PageSurface, PdfExport};
use crate::models::resume::ResumeDocument;
use crate::models::template::TemplateDefinition;
use crate::render::{layout, project};
use crate::session::BusyKey;
use crate::state::AppState;

const EXPORT_FAILED_MESSAGE: &str = "Failed to export PDF. Please try again.";

/// POST /api/v1/sessions/:id/export
///
/// Renders the committed document with the selected template and returns it
/// as a PDF attachment. The session document is only read.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let handle = state.sessions.get(id).await?;

    let (document, template_id, _guard) = {
        let session = handle.lock().await;
        let guard = session
            .in_flight
            .try_acquire(BusyKey::Export)
            .ok_or_else(|| AppError::Conflict("An export is already running".to_string()))?;
        (
            session.wizard.document().clone(),
            session.wizard.state().selected_template_id.clone(),
            guard,
        )
    };

    let template = state
        .templates
        .get(&template_id)
        .ok_or_else(|| AppError::NotFound(format!("Template '{template_id}' not found")))?;

    let export = match render_pdf(state.font.clone(), &document, template).await {
        Ok(export) => export,
        Err(e) => {
            warn!(session_id = %id, template = %template_id, error = %e, "Export failed");
            handle.lock().await.notifications.error(EXPORT_FAILED_MESSAGE);
            return Err(e);
        }
    };

    info!(
        session_id = %id,
        template = %template_id,
        filename = %export.filename,
        width = export.width,
        height = export.height,
        "PDF exported"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.bytes,
    )
        .into_response())
}

async fn render_pdf(
    font: Option<Arc<Font<'static>>>,
    document: &ResumeDocument,
    template: &TemplateDefinition,
) -> Result<PdfExport, AppError> {
    let font = font.ok_or(ExportError::FontUnavailable)?;
    let tree = project(document, template)?;
    let surface = tokio::task::spawn_blocking(move || PageSurface::new(layout(&tree), font))
        .await
        .map_err(|e| ExportError::Join(e.to_string()))?;
    Ok(export_to_pdf(surface, &document.personal.name).await?)
}
