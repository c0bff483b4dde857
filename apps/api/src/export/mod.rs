// Export pipeline: laid-out page -> 2x bitmap -> single-image PDF.
// Rasterization and encoding are CPU-bound and run inside
// tokio::task::spawn_blocking.

pub mod handlers;
pub mod pdf;
pub mod raster;

use thiserror::Error;
use tracing::debug;

pub use raster::{load_font, PageSurface, RenderSurface};

/// Supersampling factor applied to the natural size before rasterizing.
pub const EXPORT_SCALE: u32 = 2;

const FALLBACK_FILE_STEM: &str = "resume";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No font is available for rendering text")]
    FontUnavailable,

    #[error("Nothing to export: the page has no area")]
    EmptySurface,

    #[error("Page of {width}x{height} px is too large to export")]
    SurfaceTooLarge { width: u32, height: u32 },

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    #[error("Export task failed: {0}")]
    Join(String),
}

pub struct PdfExport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Rasterizes `surface` at [`EXPORT_SCALE`] and packages the bitmap as a
/// one-page PDF whose page size equals the bitmap's pixel size.
pub async fn export_to_pdf<S>(surface: S, owner_name: &str) -> Result<PdfExport, ExportError>
where
    S: RenderSurface,
{
    let filename = pdf_filename(owner_name);
    let (bytes, width, height) = tokio::task::spawn_blocking(move || {
        let bitmap = surface.rasterize(EXPORT_SCALE)?;
        let (width, height) = bitmap.dimensions();
        let bytes = pdf::single_image_pdf(&bitmap)?;
        Ok::<_, ExportError>((bytes, width, height))
    })
    .await
    .map_err(|e| ExportError::Join(e.to_string()))??;

    debug!(%filename, width, height, size = bytes.len(), "PDF assembled");
    Ok(PdfExport {
        filename,
        bytes,
        width,
        height,
    })
}

/// `<sanitized name>.pdf`, or `resume.pdf` when nothing usable remains.
pub fn pdf_filename(owner_name: &str) -> String {
    format!("{}.pdf", sanitize_file_stem(owner_name))
}

fn sanitize_file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            in_space = true;
            continue;
        }
        if in_space {
            stem.push('_');
            in_space = false;
        }
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            stem.push(c);
        } else {
            stem.push('_');
        }
    }

    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem.to_string()
    }
}
