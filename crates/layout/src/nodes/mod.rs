//! Stock flowables understood by [`FlowLayoutEngine`](crate::FlowLayoutEngine).

mod group;
mod page_break;
mod paragraph;
mod recto;
mod rule;
mod spacer;
mod toc;

pub use group::{Group, signature};
pub use page_break::PageBreak;
pub use paragraph::{Paragraph, TextBlock, TextStyle};
pub use recto::RectoBreak;
pub use rule::HorizontalRule;
pub use spacer::Spacer;
pub use toc::TableOfContents;
