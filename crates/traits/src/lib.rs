//! The seams between the build controller, content and the layout engine.
//!
//! - [`Flowable`]: content the engine can measure, split and draw. Optional
//!   capabilities ([`Indexing`], [`OnPlaced`]) are discovered through
//!   `as_indexing` / `as_placement_hook`, so plain content needs no boilerplate.
//! - [`LayoutEngine`]: places a story onto pages, firing placement hooks.
//! - [`NotificationSink`]: receives TOC entries and outline registrations.
//! - [`EditQueue`]: edits raised during a pass, applied by the controller
//!   once the pass is over.

pub mod canvas;
pub mod context;
pub mod edits;
pub mod engine;
pub mod flowable;
pub mod notify;

pub use canvas::Canvas;
pub use context::{PassContext, PlacementContext};
pub use edits::{DeferredEdit, EditQueue};
pub use engine::{LayoutEngine, LayoutError};
pub use flowable::{BreakRequest, Flowable, FlowableRef, Indexing, OnPlaced, collect_indexing};
pub use notify::{Notification, NotificationSink};
