use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;

/// A structural change requested during a pass and applied after it.
///
/// The operation name identifies the edit in logs; the arguments are whatever
/// the closure captured.
pub struct DeferredEdit {
    op: Cow<'static, str>,
    apply: Box<dyn FnOnce()>,
}

impl DeferredEdit {
    pub fn new(op: impl Into<Cow<'static, str>>, apply: impl FnOnce() + 'static) -> Self {
        Self {
            op: op.into(),
            apply: Box::new(apply),
        }
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn apply(self) {
        (self.apply)()
    }
}

impl fmt::Debug for DeferredEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredEdit").field("op", &self.op).finish_non_exhaustive()
    }
}

/// FIFO of [`DeferredEdit`]s scoped to one build.
///
/// Content and engines only ever push; the build controller is the single
/// owner of [`drain`](EditQueue::drain).
#[derive(Debug, Default)]
pub struct EditQueue {
    edits: VecDeque<DeferredEdit>,
}

impl EditQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: DeferredEdit) {
        log::trace!("Queued deferred edit '{}'.", edit.op());
        self.edits.push_back(edit);
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies every queued edit exactly once, oldest first, and returns how
    /// many were applied. The queue is empty afterwards.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Some(edit) = self.edits.pop_front() {
            log::debug!("Applying deferred edit '{}'.", edit.op());
            edit.apply();
            applied += 1;
        }
        applied
    }

    /// Drops every queued edit without applying it.
    pub fn clear(&mut self) {
        self.edits.clear();
    }
}
