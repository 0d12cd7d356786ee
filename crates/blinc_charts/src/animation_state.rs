//! Animation state of one orchestrator instance
//!
//! The state is created empty when the orchestrator mounts and is only ever
//! changed by merging an [`AnimationStatePatch`] into the owning
//! [`AnimationStateStore`]. It goes away with the orchestrator.

use std::cell::Ref;

use blinc_animation::ChildrenTransitions;
use blinc_core::{MergeState, StateCell, StateUpdater};

use crate::props::PropsRef;

/// Coordinator state read by every child during a render pass
///
/// `old_props` is `Some` exactly when `nodes_will_exit` is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationState {
    /// Plan for this orchestrator's children; `None` until the first plan
    pub children_transitions: Option<ChildrenTransitions>,
    pub nodes_will_exit: bool,
    pub nodes_will_enter: bool,
    pub nodes_should_enter: bool,
    /// Previous render's props, frozen while exiting nodes animate out
    pub old_props: Option<PropsRef>,
    pub next_props: Option<PropsRef>,
    pub continuous: bool,
    pub animating: bool,
    pub nodes_should_load: bool,
    pub nodes_done_load: bool,
}

impl AnimationState {
    /// Whether a transition plan has been computed for this instance
    pub fn is_planned(&self) -> bool {
        self.children_transitions.is_some()
    }
}

/// Field-wise update of [`AnimationState`]
///
/// `None` leaves a field untouched. Nullable fields use a nested `Option`, so
/// `Some(None)` clears them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationStatePatch {
    pub children_transitions: Option<Option<ChildrenTransitions>>,
    pub nodes_will_exit: Option<bool>,
    pub nodes_will_enter: Option<bool>,
    pub nodes_should_enter: Option<bool>,
    pub old_props: Option<Option<PropsRef>>,
    pub next_props: Option<Option<PropsRef>>,
    pub continuous: Option<bool>,
    pub animating: Option<bool>,
    pub nodes_should_load: Option<bool>,
    pub nodes_done_load: Option<bool>,
}

impl AnimationStatePatch {
    /// Patch that overwrites every field with `state`'s value
    pub fn from_state(state: &AnimationState) -> Self {
        Self {
            children_transitions: Some(state.children_transitions.clone()),
            nodes_will_exit: Some(state.nodes_will_exit),
            nodes_will_enter: Some(state.nodes_will_enter),
            nodes_should_enter: Some(state.nodes_should_enter),
            old_props: Some(state.old_props.clone()),
            next_props: Some(state.next_props.clone()),
            continuous: Some(state.continuous),
            animating: Some(state.animating),
            nodes_should_load: Some(state.nodes_should_load),
            nodes_done_load: Some(state.nodes_done_load),
        }
    }

    /// Initial flags merged by the mount effect of an animated orchestrator
    pub fn mount() -> Self {
        Self {
            nodes_should_load: Some(false),
            nodes_done_load: Some(false),
            animating: Some(true),
            ..Default::default()
        }
    }

    /// Load animation finished
    pub fn load_finished() -> Self {
        Self {
            nodes_should_load: Some(false),
            nodes_done_load: Some(true),
            ..Default::default()
        }
    }

    /// First paint finished without a load animation
    pub fn before_load_finished() -> Self {
        Self {
            nodes_done_load: Some(true),
            ..Default::default()
        }
    }

    /// Exiting nodes are gone; release the frozen props
    pub fn exit_finished() -> Self {
        Self {
            nodes_will_exit: Some(false),
            old_props: Some(None),
            ..Default::default()
        }
    }

    /// Entering nodes are staged and may animate in
    pub fn enter_released() -> Self {
        Self {
            nodes_should_enter: Some(true),
            ..Default::default()
        }
    }

    /// Entering nodes reached their final values
    pub fn enter_finished() -> Self {
        Self {
            nodes_will_enter: Some(false),
            ..Default::default()
        }
    }

    /// The player has nothing left to animate
    pub fn animation_finished() -> Self {
        Self {
            animating: Some(false),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl MergeState for AnimationState {
    type Patch = AnimationStatePatch;

    fn merge(&mut self, patch: AnimationStatePatch) {
        if let Some(v) = patch.children_transitions {
            self.children_transitions = v;
        }
        if let Some(v) = patch.nodes_will_exit {
            self.nodes_will_exit = v;
        }
        if let Some(v) = patch.nodes_will_enter {
            self.nodes_will_enter = v;
        }
        if let Some(v) = patch.nodes_should_enter {
            self.nodes_should_enter = v;
        }
        if let Some(v) = patch.old_props {
            self.old_props = v;
        }
        if let Some(v) = patch.next_props {
            self.next_props = v;
        }
        if let Some(v) = patch.continuous {
            self.continuous = v;
        }
        if let Some(v) = patch.animating {
            self.animating = v;
        }
        if let Some(v) = patch.nodes_should_load {
            self.nodes_should_load = v;
        }
        if let Some(v) = patch.nodes_done_load {
            self.nodes_done_load = v;
        }
    }
}

/// Per-instance animation state cell
#[derive(Debug, Default)]
pub struct AnimationStateStore {
    cell: StateCell<AnimationState>,
}

impl AnimationStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn read(&self) -> Ref<'_, AnimationState> {
        self.cell.read()
    }

    pub fn snapshot(&self) -> AnimationState {
        self.cell.snapshot()
    }

    /// Merge `patch` onto the latest state
    pub fn merge(&self, patch: AnimationStatePatch) {
        tracing::debug!(
            will_exit = ?patch.nodes_will_exit,
            will_enter = ?patch.nodes_will_enter,
            should_enter = ?patch.nodes_should_enter,
            animating = ?patch.animating,
            "merging animation state"
        );
        self.cell.merge(patch);
    }

    /// Merge handle for transition accessors
    pub fn updater(&self) -> StateUpdater<AnimationState> {
        self.cell.updater()
    }

    pub fn generation(&self) -> u64 {
        self.cell.generation()
    }

    /// Whether merges landed since the last render pass
    pub fn is_dirty(&self) -> bool {
        self.cell.is_dirty()
    }

    pub fn mark_rendered(&self) {
        self.cell.mark_rendered();
    }
}
