use crate::context::PassContext;
use crate::flowable::FlowableRef;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Element has a height of {0:.2} which exceeds the page frame height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Layout engine has no finished pass to hand over.")]
    NothingPlaced,
    #[error("Generic layout error: {0}")]
    Generic(String),
}

/// The pagination engine driven by the build controller.
///
/// One call to [`place`](LayoutEngine::place) is one pass. The engine must
/// invoke the [`OnPlaced`](crate::OnPlaced) hook of every item it places,
/// synchronously and in placement order, and must not retain the story.
pub trait LayoutEngine {
    /// What the engine produces once a build is done (pages, a byte buffer...).
    type Output;

    /// Lays `story` out into pages and returns the number of pages produced.
    fn place(&mut self, story: Vec<FlowableRef>, ctx: &mut PassContext<'_>) -> Result<usize, LayoutError>;

    /// Hands over the result of the most recent pass.
    fn finish(&mut self) -> Result<Self::Output, LayoutError>;
}
