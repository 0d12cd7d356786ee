//! Component-scoped state cells
//!
//! A [`StateCell`] is the per-instance state slot a component owns across
//! render passes. Updates are partial: a patch is merged field-wise onto the
//! latest value, never replacing it wholesale. Every merge bumps the cell's
//! generation so the host can tell whether another render pass is needed.
//!
//! ```rust
//! use blinc_core::state_cell::{MergeState, StateCell};
//!
//! #[derive(Clone, Default)]
//! struct Counter { hits: u32, label: &'static str }
//!
//! #[derive(Default)]
//! struct CounterPatch { hits: Option<u32>, label: Option<&'static str> }
//!
//! impl MergeState for Counter {
//!     type Patch = CounterPatch;
//!     fn merge(&mut self, patch: CounterPatch) {
//!         if let Some(hits) = patch.hits { self.hits = hits; }
//!         if let Some(label) = patch.label { self.label = label; }
//!     }
//! }
//!
//! let cell = StateCell::new(Counter::default());
//! cell.merge(CounterPatch { hits: Some(3), ..Default::default() });
//! cell.merge(CounterPatch { label: Some("bars"), ..Default::default() });
//! assert_eq!(cell.read().hits, 3);
//! assert_eq!(cell.read().label, "bars");
//! ```
//!
//! The cell is single-threaded (`Rc` + `RefCell`). The host serializes every
//! effect of one component instance, so merges never interleave.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// State that accepts partial updates
pub trait MergeState {
    /// Partial update; fields left unset keep their current value
    type Patch;

    /// Apply `patch` field-wise onto `self`
    fn merge(&mut self, patch: Self::Patch);
}

struct CellInner<S> {
    value: RefCell<S>,
    generation: Cell<u64>,
    rendered: Cell<u64>,
}

/// Owned, merge-only state slot for one component instance
pub struct StateCell<S> {
    inner: Rc<CellInner<S>>,
}

impl<S: MergeState> StateCell<S> {
    /// Create a cell holding `initial`
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(CellInner {
                value: RefCell::new(initial),
                generation: Cell::new(0),
                rendered: Cell::new(0),
            }),
        }
    }

    /// Borrow the current value
    ///
    /// # Panics
    ///
    /// Panics if a merge is in progress on the same cell.
    pub fn read(&self) -> Ref<'_, S> {
        self.inner.value.borrow()
    }

    /// Clone the current value
    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Merge `patch` onto the latest value
    ///
    /// Patches issued back to back apply in call order, each onto the result
    /// of the previous one.
    pub fn merge(&self, patch: S::Patch) {
        merge_into(&self.inner, patch);
    }

    /// A weak handle that merges into this cell while it is alive
    pub fn updater(&self) -> StateUpdater<S> {
        StateUpdater {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Number of merges applied since creation
    pub fn generation(&self) -> u64 {
        self.inner.generation.get()
    }

    /// Whether merges happened since the last [`mark_rendered`](Self::mark_rendered)
    pub fn is_dirty(&self) -> bool {
        self.inner.generation.get() != self.inner.rendered.get()
    }

    /// Record that the current generation has been rendered
    pub fn mark_rendered(&self) {
        self.inner.rendered.set(self.inner.generation.get());
    }
}

impl<S: MergeState + Default> Default for StateCell<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: fmt::Debug> fmt::Debug for StateCell<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.inner.value)
            .field("generation", &self.inner.generation.get())
            .finish()
    }
}

fn merge_into<S: MergeState>(inner: &CellInner<S>, patch: S::Patch) {
    inner.value.borrow_mut().merge(patch);
    let generation = inner.generation.get() + 1;
    inner.generation.set(generation);
    tracing::trace!(generation, "state cell merged");
}

/// Weak merge handle handed to code that outlives a single render pass
///
/// Once the owning [`StateCell`] is dropped, [`apply`](Self::apply) becomes a
/// no-op.
pub struct StateUpdater<S> {
    inner: Weak<CellInner<S>>,
}

impl<S: MergeState> StateUpdater<S> {
    /// Merge `patch` into the owning cell. Returns `false` if the cell is gone.
    pub fn apply(&self, patch: S::Patch) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                merge_into(&inner, patch);
                true
            }
            None => {
                tracing::debug!("state cell dropped; patch discarded");
                false
            }
        }
    }

    /// Whether both handles point at the same cell
    pub fn same_cell(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> Clone for StateUpdater<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for StateUpdater<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateUpdater")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
