//! The multi-pass build controller.
//!
//! A story whose content depends on layout results (page numbers in a table
//! of contents, a total page count in the footer) is laid out repeatedly
//! until every indexing item reports that its data stopped changing. One more
//! pass then runs with the total page count fixed.

use crate::config::{BuildConfig, DEFAULT_MAX_PASSES};
use crate::error::BuildError;
use crate::record::{DocumentRecord, PassSink};
use folio_layout::FlowLayoutEngine;
use folio_numbering::CounterChain;
use folio_traits::{EditQueue, FlowableRef, LayoutEngine, PassContext, collect_indexing};
use folio_types::{OutlineEntry, TocEntry};
use std::fmt;

/// Where the controller is in a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Init,
    /// Running passes until every indexing item is satisfied.
    Looping,
    /// Satisfied; the total page count was just fixed.
    Converged,
    /// Running the pass that renders the fixed total page count.
    Finalizing,
    Done,
    Failed,
}

/// Events reported to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProgress {
    /// A pass is about to start (1-based).
    Pass(usize),
    /// The build finished after this many passes.
    Finished(usize),
}

type ProgressFn = Box<dyn FnMut(BuildProgress)>;

pub struct DocTemplate<E: LayoutEngine> {
    engine: E,
    max_passes: usize,
    counters: CounterChain,
    edits: EditQueue,
    record: DocumentRecord,
    state: BuildState,
    total_pages: Option<usize>,
    output: Option<E::Output>,
    progress: Option<ProgressFn>,
}

impl DocTemplate<FlowLayoutEngine> {
    /// A controller driving the stock [`FlowLayoutEngine`].
    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(FlowLayoutEngine::new(config.page.clone())).with_max_passes(config.max_passes)
    }
}

impl<E: LayoutEngine> DocTemplate<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            max_passes: DEFAULT_MAX_PASSES,
            counters: CounterChain::new(),
            edits: EditQueue::new(),
            record: DocumentRecord::new(),
            state: BuildState::Init,
            total_pages: None,
            output: None,
            progress: None,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn with_progress(mut self, callback: impl FnMut(BuildProgress) + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// The counter chain headings of the next story number themselves with.
    pub fn counters_mut(&mut self) -> &mut CounterChain {
        &mut self.counters
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// The total page count fixed by the last build, if it converged.
    pub fn total_pages(&self) -> Option<usize> {
        self.total_pages
    }

    /// Records of the final pass of the last build.
    pub fn record(&self) -> &DocumentRecord {
        &self.record
    }

    pub fn toc_entries(&self) -> &[TocEntry] {
        self.record.toc_entries()
    }

    pub fn outline(&self) -> &[OutlineEntry] {
        self.record.outline()
    }

    /// The engine output of the last successful build.
    pub fn take_output(&mut self) -> Option<E::Output> {
        self.output.take()
    }

    /// Builds `story` with the configured pass ceiling.
    pub fn build(&mut self, story: &[FlowableRef]) -> Result<usize, BuildError> {
        self.multi_build(story, self.max_passes)
    }

    /// Lays out `story` until it converges and returns the number of passes
    /// run. Fails once more than `max_passes` passes did not converge.
    pub fn multi_build(&mut self, story: &[FlowableRef], max_passes: usize) -> Result<usize, BuildError> {
        self.state = BuildState::Init;
        self.counters.reset();
        self.edits.clear();
        self.record.clear();
        self.total_pages = None;
        self.output = None;

        let indexing = collect_indexing(story);
        for item in &indexing {
            if let Some(index) = item.as_indexing() {
                index.reset();
            }
        }
        log::info!(
            "Starting build of {} item(s), {} indexing, at most {} passes.",
            story.len(),
            indexing.len(),
            max_passes
        );

        let result = self.run_passes(story, &indexing, max_passes);
        self.counters.reset();
        self.edits.clear();
        match result {
            Ok(passes) => {
                self.state = BuildState::Done;
                log::info!("Build finished after {} passes, {} pages.", passes, self.total_pages.unwrap_or(0));
                self.report(BuildProgress::Finished(passes));
                Ok(passes)
            }
            Err(e) => {
                self.state = BuildState::Failed;
                self.total_pages = None;
                Err(e)
            }
        }
    }

    fn run_passes(&mut self, story: &[FlowableRef], indexing: &[FlowableRef], max_passes: usize) -> Result<usize, BuildError> {
        let mut passes = 0;
        loop {
            passes += 1;
            self.state = if self.total_pages.is_some() {
                BuildState::Finalizing
            } else {
                BuildState::Looping
            };
            self.report(BuildProgress::Pass(passes));

            for item in indexing {
                if let Some(index) = item.as_indexing() {
                    index.before_build();
                }
            }

            self.record.clear();
            let pages = {
                let mut sink = PassSink::new(&mut self.record, indexing);
                let mut ctx = PassContext::new(passes, self.total_pages, &mut sink, &mut self.edits);
                self.engine.place(story.to_vec(), &mut ctx)?
            };

            for item in indexing {
                if let Some(index) = item.as_indexing() {
                    index.after_build();
                }
            }

            let happy = indexing
                .iter()
                .all(|item| item.as_indexing().is_none_or(|index| index.is_satisfied()));
            log::debug!(
                "Pass {}: {} page(s), satisfied: {}, {} deferred edit(s) queued.",
                passes,
                pages,
                happy,
                self.edits.len()
            );

            if happy {
                if self.total_pages.is_some() {
                    self.output = Some(self.engine.finish()?);
                    return Ok(passes);
                }
                self.state = BuildState::Converged;
                self.total_pages = Some(pages);
            }

            if passes > max_passes {
                log::warn!("Giving up after {} passes; the document keeps changing.", passes);
                return Err(BuildError::ConvergenceFailure { passes });
            }

            self.edits.drain();
        }
    }

    fn report(&mut self, event: BuildProgress) {
        if let Some(callback) = self.progress.as_mut() {
            callback(event);
        }
    }
}

impl<E: LayoutEngine + fmt::Debug> fmt::Debug for DocTemplate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocTemplate")
            .field("engine", &self.engine)
            .field("max_passes", &self.max_passes)
            .field("state", &self.state)
            .field("total_pages", &self.total_pages)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_traits::{Canvas, DeferredEdit, Flowable, Indexing, LayoutError};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Records what each pass saw; always reports `pages` pages.
    #[derive(Debug, Default)]
    struct ScriptedEngine {
        pages: usize,
        seen_totals: Vec<Option<usize>>,
        placed: usize,
    }

    impl LayoutEngine for ScriptedEngine {
        type Output = usize;

        fn place(&mut self, story: Vec<FlowableRef>, ctx: &mut PassContext<'_>) -> Result<usize, LayoutError> {
            self.seen_totals.push(ctx.total_pages());
            for item in story {
                if let Some(hook) = item.as_placement_hook() {
                    hook.on_placed(&mut ctx.placement(1));
                }
                self.placed += 1;
            }
            Ok(self.pages)
        }

        fn finish(&mut self) -> Result<usize, LayoutError> {
            Ok(self.pages)
        }
    }

    /// Satisfied from the given pass on; queues an edit on every pass.
    #[derive(Debug)]
    struct Settles {
        after: usize,
        seen: Cell<usize>,
        applied: Rc<Cell<usize>>,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Flowable for Settles {
        fn wrap(&self, _avail_width: f32) -> f32 {
            0.0
        }

        fn draw(&self, _canvas: &mut dyn Canvas, _x: f32, _y: f32, _width: f32) {}

        fn as_indexing(&self) -> Option<&dyn Indexing> {
            Some(self)
        }

        fn as_placement_hook(&self) -> Option<&dyn folio_traits::OnPlaced> {
            Some(self)
        }
    }

    impl Indexing for Settles {
        fn is_satisfied(&self) -> bool {
            self.seen.get() >= self.after
        }

        fn before_build(&self) {
            self.log.borrow_mut().push("before");
        }

        fn after_build(&self) {
            self.seen.set(self.seen.get() + 1);
            self.log.borrow_mut().push("after");
        }
    }

    impl folio_traits::OnPlaced for Settles {
        fn on_placed(&self, doc: &mut folio_traits::PlacementContext<'_, '_>) {
            self.log.borrow_mut().push("placed");
            let applied = Rc::clone(&self.applied);
            doc.defer(DeferredEdit::new("count", move || applied.set(applied.get() + 1)));
        }
    }

    fn settles(after: usize) -> (Rc<Settles>, Rc<Cell<usize>>, Rc<RefCell<Vec<&'static str>>>) {
        let applied = Rc::new(Cell::new(0));
        let log = Rc::new(RefCell::new(Vec::new()));
        let item = Rc::new(Settles {
            after,
            seen: Cell::new(0),
            applied: Rc::clone(&applied),
            log: Rc::clone(&log),
        });
        (item, applied, log)
    }

    #[test]
    fn total_pages_is_fixed_for_the_last_pass_only() {
        let mut doc = DocTemplate::new(ScriptedEngine {
            pages: 4,
            ..Default::default()
        });
        assert_eq!(doc.multi_build(&[], 10).unwrap(), 2);
        assert_eq!(doc.engine().seen_totals, [None, Some(4)]);
        assert_eq!(doc.total_pages(), Some(4));
        assert_eq!(doc.state(), BuildState::Done);
        assert_eq!(doc.take_output(), Some(4));
    }

    #[test]
    fn hooks_run_in_pass_order() {
        let (item, applied, log) = settles(2);
        let story: Vec<FlowableRef> = vec![item];
        let mut doc = DocTemplate::new(ScriptedEngine::default());

        assert_eq!(doc.multi_build(&story, 10).unwrap(), 3);
        assert_eq!(
            *log.borrow(),
            ["before", "placed", "after", "before", "placed", "after", "before", "placed", "after"]
        );
        // The last pass's edit is dropped with the build.
        assert_eq!(applied.get(), 2);
    }

    #[test]
    fn story_is_not_consumed() {
        let (item, _, _) = settles(1);
        let story: Vec<FlowableRef> = vec![item.clone()];
        let mut doc = DocTemplate::new(ScriptedEngine::default());
        doc.multi_build(&story, 10).unwrap();
        assert_eq!(story.len(), 1);
        assert_eq!(Rc::strong_count(&item), 2);
    }

    #[test]
    fn progress_reports_every_pass() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut doc = DocTemplate::new(ScriptedEngine::default()).with_progress(move |e| sink.borrow_mut().push(e));
        doc.multi_build(&[], 10).unwrap();
        assert_eq!(
            *events.borrow(),
            [BuildProgress::Pass(1), BuildProgress::Pass(2), BuildProgress::Finished(2)]
        );
    }

    #[test]
    fn failure_leaves_no_output() {
        let (item, _, _) = settles(usize::MAX);
        let story: Vec<FlowableRef> = vec![item];
        let mut doc = DocTemplate::new(ScriptedEngine::default());

        let err = doc.multi_build(&story, 3).unwrap_err();
        assert!(matches!(err, BuildError::ConvergenceFailure { passes: 4 }));
        assert_eq!(doc.state(), BuildState::Failed);
        assert_eq!(doc.take_output(), None);
        assert_eq!(doc.total_pages(), None);
    }

    #[test]
    fn counters_do_not_leak_between_builds() {
        let mut doc = DocTemplate::new(ScriptedEngine::default());
        doc.counters_mut().next(&folio_types::CounterName::heading(0));
        doc.build(&[]).unwrap();
        assert!(doc.counters_mut().is_empty());
    }
}
