pub mod document;
pub mod geometry;
pub mod ids;

pub use document::{OutlineEntry, TocEntry};
pub use geometry::{Edges, Rect};
pub use ids::{BookmarkId, CounterName, OutlineKey};
