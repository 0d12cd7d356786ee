//! Transition planning on prop changes
//!
//! Runs in the props-diff effect after every commit whose props changed. A
//! nested orchestrator adopts the plan its parent handed down; a top-level
//! one reconciles its previous and next children itself.

use crate::animation_state::{AnimationStatePatch, AnimationStateStore};
use crate::classify;
use crate::props::PropsRef;
use crate::reconcile::{DataKeyDiff, ReconciliationDiff};

/// Which branch a [`TransitionPlanner::plan`] call took
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanOutcome {
    /// `animate` was off; nothing merged
    Skipped,
    /// Adopted the enclosing orchestrator's state
    Delegated,
    /// Reconciled the child lists locally
    Planned,
}

/// Computes the transition plan for the next render and merges it
pub struct TransitionPlanner {
    diff: Box<dyn ReconciliationDiff>,
}

impl TransitionPlanner {
    pub fn new(diff: impl ReconciliationDiff + 'static) -> Self {
        Self {
            diff: Box::new(diff),
        }
    }

    /// Plan the move from `props` (previous render) to `next_props`
    pub fn plan(
        &self,
        store: &AnimationStateStore,
        props: &PropsRef,
        next_props: &PropsRef,
    ) -> PlanOutcome {
        if !props.animate.is_enabled() {
            return PlanOutcome::Skipped;
        }

        if let Some(parent) = props.animate.parent_state() {
            let old_props = parent.nodes_will_exit.then(|| PropsRef::clone(props));
            tracing::debug!(will_exit = parent.nodes_will_exit, "adopting parent transition plan");
            store.merge(AnimationStatePatch {
                old_props: Some(old_props),
                next_props: Some(Some(PropsRef::clone(next_props))),
                ..AnimationStatePatch::from_state(parent)
            });
            return PlanOutcome::Delegated;
        }

        let continuous = classify::is_continuous(&props.children, props.polar);
        let outcome = self.diff.diff(&props.children, &next_props.children);
        tracing::debug!(
            will_exit = outcome.nodes_will_exit,
            will_enter = outcome.nodes_will_enter,
            grouped = outcome.children_transitions.is_grouped(),
            continuous,
            "planned child transitions"
        );

        let old_props = outcome
            .nodes_will_exit
            .then(|| PropsRef::clone(props));
        store.merge(AnimationStatePatch {
            nodes_will_exit: Some(outcome.nodes_will_exit),
            nodes_will_enter: Some(outcome.nodes_will_enter),
            nodes_should_enter: Some(outcome.nodes_should_enter),
            children_transitions: Some(Some(outcome.children_transitions.into_own())),
            old_props: Some(old_props),
            next_props: Some(Some(PropsRef::clone(next_props))),
            continuous: Some(continuous),
            ..Default::default()
        });
        PlanOutcome::Planned
    }
}

impl Default for TransitionPlanner {
    fn default() -> Self {
        Self::new(DataKeyDiff)
    }
}

impl std::fmt::Debug for TransitionPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionPlanner").finish_non_exhaustive()
    }
}
