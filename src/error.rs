use folio_numbering::NumberingError;
use folio_render_lopdf::RenderError;
use folio_traits::LayoutError;
use thiserror::Error;

/// Everything that can stop a document build.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Document did not converge after {passes} passes.")]
    ConvergenceFailure { passes: usize },

    #[error("Numbering failed: {0}")]
    Numbering(#[from] NumberingError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration is invalid: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
