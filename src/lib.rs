//! Multi-pass document building.
//!
//! Content that depends on where things end up (a table of contents, a
//! "page N of M" footer, outline bookmarks) is laid out again and again by a
//! [`DocTemplate`] until it stops changing.
//!
//! ```no_run
//! use folio::{BuildError, Heading, PdfPipeline};
//! use folio::layout::{Paragraph, TableOfContents};
//! use folio::traits::FlowableRef;
//! use std::rc::Rc;
//!
//! let pdf = PdfPipeline::new().with_title("Report").generate(|counters| {
//!     let story: Vec<FlowableRef> = vec![
//!         Rc::new(TableOfContents::new()),
//!         Rc::new(Heading::numbered("Intro", 0, counters)?),
//!         Rc::new(Paragraph::new("Hello.")),
//!     ];
//!     Ok::<_, BuildError>(story)
//! })?;
//! std::fs::write("report.pdf", &pdf.bytes)?;
//! # Ok::<(), BuildError>(())
//! ```

pub mod config;
pub mod error;
pub mod heading;
pub mod pipeline;
pub mod record;
pub mod story;
pub mod template;

pub use config::{BuildConfig, DEFAULT_MAX_PASSES};
pub use error::BuildError;
pub use heading::{Heading, HeadingOptions, default_heading_style};
pub use pipeline::{GeneratedPdf, PdfPipeline};
pub use record::DocumentRecord;
pub use story::{Block, StorySource};
pub use template::{BuildProgress, BuildState, DocTemplate};

pub use folio_layout as layout;
pub use folio_numbering as numbering;
pub use folio_render_lopdf as render;
pub use folio_traits as traits;
pub use folio_types as types;
