//! PDF output for laid-out folio documents.
//!
//! Pages are written with the standard Helvetica font, every heading anchor
//! becomes a named destination, and recorded outline entries become the PDF
//! document outline.

mod error;
mod outline;
mod renderer;

pub use error::RenderError;
pub use renderer::LopdfRenderer;
