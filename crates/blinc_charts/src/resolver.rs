//! Per-child animation props
//!
//! During render the orchestrator asks [`AnimationPropsResolver`] for the
//! `animate` configuration of every child. Each child receives a
//! [`TransitionAccessor`] bound to its index and to a snapshot of the state
//! relevant to it; the accessor later turns that snapshot into the phase,
//! timing and completion callback a player needs.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use blinc_animation::{ChildrenTransitions, NodeKeys, PhaseTiming, TransitionPhase};
use blinc_core::StateUpdater;

use crate::animation_state::{AnimationState, AnimationStatePatch, AnimationStateStore};
use crate::config::{GroupFallback, TransitionConfig};
use crate::props::{Animate, AnimateConfig, ChildDescriptor, PhaseConfig, PropsRef};

/// Resolves the `animate` prop handed to each child
#[derive(Debug)]
pub struct AnimationPropsResolver<'a> {
    store: &'a AnimationStateStore,
    config: &'a Rc<TransitionConfig>,
}

impl<'a> AnimationPropsResolver<'a> {
    pub fn new(store: &'a AnimationStateStore, config: &'a Rc<TransitionConfig>) -> Self {
        Self { store, config }
    }

    /// The `animate` configuration for `child` at position `index`
    ///
    /// Without orchestration (`props.animate` disabled) the child keeps its
    /// own configuration unchanged.
    pub fn resolve(&self, props: &PropsRef, child: &ChildDescriptor, index: usize) -> Animate {
        if !props.animate.is_enabled() {
            return child.animate.clone();
        }

        let filtered = Rc::new(self.filtered_state(index));
        let parent_state = props
            .animate
            .parent_state()
            .cloned()
            .unwrap_or_else(|| Rc::clone(&filtered));
        let get_transitions = match props.animate.get_transitions() {
            Some(accessor) => accessor.clone(),
            None => TransitionAccessor {
                index,
                props: Rc::clone(props),
                state: filtered,
                apply: self.store.updater(),
                config: Rc::clone(self.config),
            },
        };
        tracing::trace!(index, kind = child.kind.name, "resolved child animation");

        let computed = AnimateConfig {
            parent_state: Some(parent_state),
            get_transitions: Some(get_transitions),
            ..Default::default()
        };
        Animate::Config(
            child
                .animate
                .overrides()
                .or(&props.animate.overrides())
                .or(&computed),
        )
    }

    /// The store's state with `children_transitions` narrowed to `index`
    pub fn filtered_state(&self, index: usize) -> AnimationState {
        let mut state = self.store.snapshot();
        state.children_transitions = match state.children_transitions.take() {
            Some(plan) if plan.is_grouped() => match plan.group(index) {
                Some(group) => Some(ChildrenTransitions::Single(group.clone())),
                None => self.out_of_range(index, &plan),
            },
            other => other,
        };
        state
    }

    fn out_of_range(&self, index: usize, plan: &ChildrenTransitions) -> Option<ChildrenTransitions> {
        tracing::warn!(
            index,
            groups = plan.group_count(),
            policy = ?self.config.group_fallback,
            "child index past grouped transitions"
        );
        match self.config.group_fallback {
            GroupFallback::Skip => None,
            GroupFallback::First => plan
                .group(0)
                .map(|group| ChildrenTransitions::Single(group.clone())),
        }
    }
}

/// Transition accessor bound to one child slot
///
/// Built once per child and render pass. It holds the slice of coordinator
/// state for its index and a weak merge handle into the owning store.
#[derive(Clone, Debug)]
pub struct TransitionAccessor {
    index: usize,
    props: PropsRef,
    state: Rc<AnimationState>,
    apply: StateUpdater<AnimationState>,
    config: Rc<TransitionConfig>,
}

impl TransitionAccessor {
    pub fn index(&self) -> usize {
        self.index
    }

    /// The state slice this accessor was bound with
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Merge `patch` into the owning store. Returns `false` once it is gone.
    pub fn apply(&self, patch: AnimationStatePatch) -> bool {
        self.apply.apply(patch)
    }

    /// Phase, timing and completion for `child` this frame
    pub fn transition_props(&self, child: &ChildDescriptor) -> ChildTransitionProps {
        let state = &*self.state;
        let mut animate = self.props.animate.overrides().or(&child.animate.overrides());
        animate.parent_state = None;
        animate.get_transitions = None;

        let defaults = self.config.durations_for(child.kind, child.polar);
        let phase_ms = |phase: Option<PhaseConfig>, fallback: u32| {
            phase.and_then(|p| p.duration_ms).unwrap_or(fallback)
        };
        let load = phase_ms(animate.on_load, defaults.load_ms);
        let enter = phase_ms(animate.on_enter, defaults.enter_ms);
        let exit = phase_ms(animate.on_exit, defaults.exit_ms);
        let move_ms = animate.duration_ms.unwrap_or(defaults.move_ms);

        let slot = state
            .children_transitions
            .as_ref()
            .and_then(|t| t.slot(self.index))
            .cloned()
            .unwrap_or_default();

        let (phase, timing, nodes, patch) = if !state.nodes_done_load {
            if state.nodes_should_load {
                (
                    TransitionPhase::Load,
                    PhaseTiming::duration(load),
                    None,
                    Some(AnimationStatePatch::load_finished()),
                )
            } else {
                (
                    TransitionPhase::BeforeLoad,
                    PhaseTiming::duration(load),
                    None,
                    Some(AnimationStatePatch::before_load_finished()),
                )
            }
        } else if state.nodes_will_exit {
            // Children without exiting nodes hold still for the exit instead
            let timing = if slot.will_exit() {
                PhaseTiming::duration(exit)
            } else {
                PhaseTiming::delay(exit)
            };
            (
                TransitionPhase::Exit,
                timing,
                slot.exiting,
                Some(AnimationStatePatch::exit_finished()),
            )
        } else if state.nodes_will_enter {
            if state.nodes_should_enter {
                let duration = if slot.will_enter() { enter } else { move_ms };
                (
                    TransitionPhase::Enter,
                    PhaseTiming::duration(duration),
                    slot.entering,
                    Some(AnimationStatePatch::enter_finished()),
                )
            } else {
                (
                    TransitionPhase::BeforeEnter,
                    PhaseTiming::duration(move_ms),
                    slot.entering,
                    Some(AnimationStatePatch::enter_released()),
                )
            }
        } else if !state.is_planned() && animate.on_exit.is_some() {
            (TransitionPhase::Initial, PhaseTiming::default(), None, None)
        } else {
            (
                TransitionPhase::Move,
                PhaseTiming::duration(move_ms),
                None,
                None,
            )
        };

        ChildTransitionProps {
            phase,
            timing,
            animate,
            nodes,
            on_end: patch.map(|patch| TransitionCompletion {
                patch,
                apply: self.apply.clone(),
            }),
        }
    }
}

impl PartialEq for TransitionAccessor {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && Rc::ptr_eq(&self.state, &other.state)
            && self.apply.same_cell(&other.apply)
    }
}

impl Hash for TransitionAccessor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        (Rc::as_ptr(&self.state) as usize).hash(state);
    }
}

/// What a player needs to animate one child this frame
#[derive(Clone, Debug)]
pub struct ChildTransitionProps {
    pub phase: TransitionPhase,
    pub timing: PhaseTiming,
    /// Merged configuration: orchestrator props first, then the child's own
    pub animate: AnimateConfig,
    /// Entering or exiting nodes of this child, for enter/exit phases
    pub nodes: Option<NodeKeys>,
    /// Fired by the player when the phase completes
    pub on_end: Option<TransitionCompletion>,
}

/// Completion callback of one transition phase
#[derive(Clone, Debug)]
pub struct TransitionCompletion {
    patch: AnimationStatePatch,
    apply: StateUpdater<AnimationState>,
}

impl TransitionCompletion {
    pub fn patch(&self) -> &AnimationStatePatch {
        &self.patch
    }

    /// Merge the completion patch into the owning store
    pub fn complete(self) -> bool {
        self.apply.apply(self.patch)
    }
}
