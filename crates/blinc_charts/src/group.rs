//! Animated chart group
//!
//! [`ChartGroup`] owns the animation state of one group of chart children and
//! drives it through the host cycle:
//!
//! ```text
//!   render(initial) ──► select props ──► resolve children ──► RenderPass
//!                                                                │
//!   commit() ◄───────────────────────────────────────────────────┘
//!     1. mount effect      (first commit only)
//!     2. props-diff effect (incoming props changed) ──► TransitionPlanner
//!     3. previous props    ◄── initial
//! ```
//!
//! While a top-level group draws frozen props, steps 2 and 3 wait. The held
//! snapshot is planned against the last planned props once the exit ends.
//!
//! Merges made by effects or by transition completions mark the group dirty;
//! the host renders again while [`ChartGroup::needs_render`] is true.

use std::rc::Rc;

use blinc_core::{memo_key, DepsEffect, Memo, MountEffect};

use crate::animation_state::{AnimationState, AnimationStatePatch, AnimationStateStore};
use crate::config::TransitionConfig;
use crate::planner::TransitionPlanner;
use crate::props::{ChildDescriptor, PropsRef};
use crate::reconcile::ReconciliationDiff;
use crate::render_props::{select_props, PreviousPropsTracker};
use crate::resolver::AnimationPropsResolver;

/// Output of one render pass
#[derive(Clone, Debug)]
pub struct RenderPass {
    /// Props drawn this pass (the frozen previous props while exiting)
    pub props: PropsRef,
    /// Children with their resolved `animate` configuration
    pub children: Rc<[ChildDescriptor]>,
}

#[derive(Debug)]
struct PendingCommit {
    initial: PropsRef,
    props: PropsRef,
    previous: PropsRef,
}

/// Orchestrator for an animated group of chart children
#[derive(Debug)]
pub struct ChartGroup {
    store: AnimationStateStore,
    planner: TransitionPlanner,
    config: Rc<TransitionConfig>,
    previous: PreviousPropsTracker,
    mount: MountEffect,
    props_changed: DepsEffect<u64>,
    children: Memo<u64, Rc<[ChildDescriptor]>>,
    /// Bumped whenever `render` receives a different props snapshot
    revision: u64,
    last_initial: Option<PropsRef>,
    pending: Option<PendingCommit>,
}

impl Default for ChartGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGroup {
    pub fn new() -> Self {
        Self::with_config(TransitionConfig::default())
    }

    pub fn with_config(config: TransitionConfig) -> Self {
        Self {
            store: AnimationStateStore::new(),
            planner: TransitionPlanner::default(),
            config: Rc::new(config),
            previous: PreviousPropsTracker::new(),
            mount: MountEffect::new(),
            props_changed: DepsEffect::new(),
            children: Memo::new(),
            revision: 0,
            last_initial: None,
            pending: None,
        }
    }

    /// Replace the reconciliation used for top-level plans
    pub fn with_diff(mut self, diff: impl ReconciliationDiff + 'static) -> Self {
        self.planner = TransitionPlanner::new(diff);
        self
    }

    pub fn store(&self) -> &AnimationStateStore {
        &self.store
    }

    pub fn state(&self) -> AnimationState {
        self.store.snapshot()
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Whether state changed since the last render pass
    pub fn needs_render(&self) -> bool {
        self.store.is_dirty()
    }

    /// Merge a patch from outside the render cycle (e.g. the animation player)
    pub fn merge(&self, patch: AnimationStatePatch) {
        self.store.merge(patch);
    }

    /// Render with the incoming props
    pub fn render(&mut self, initial: PropsRef) -> RenderPass {
        let changed = self
            .last_initial
            .as_ref()
            .map_or(true, |last| !Rc::ptr_eq(last, &initial));
        if changed {
            self.revision += 1;
            self.last_initial = Some(PropsRef::clone(&initial));
        }

        let props = select_props(&self.store.read(), &initial);
        let previous = self.previous.get();

        let key = memo_key(&(&*props, self.store.generation()));
        let resolver = AnimationPropsResolver::new(&self.store, &self.config);
        let children = self
            .children
            .get_or_compute(key, || {
                props
                    .children
                    .iter()
                    .enumerate()
                    .map(|(index, child)| ChildDescriptor {
                        animate: resolver.resolve(&props, child, index),
                        ..child.clone()
                    })
                    .collect()
            })
            .clone();
        self.store.mark_rendered();

        tracing::trace!(
            revision = self.revision,
            children = children.len(),
            frozen = !Rc::ptr_eq(&props, &initial),
            "rendered chart group"
        );

        self.pending = Some(PendingCommit {
            initial,
            props: PropsRef::clone(&props),
            previous,
        });
        RenderPass { props, children }
    }

    /// Run effects for the last render pass
    pub fn commit(&mut self) {
        let Some(PendingCommit {
            initial,
            props,
            previous,
        }) = self.pending.take()
        else {
            return;
        };

        let animated = initial.animate.is_enabled();
        let store = &self.store;
        let planner = &self.planner;

        self.mount.run(|| {
            if animated {
                store.merge(AnimationStatePatch::mount());
            }
        });

        // A top-level group drawing frozen props holds incoming snapshots
        // back until the exit releases; nested groups follow their parent.
        let delegated = previous.animate.parent_state().is_some();
        let frozen = !Rc::ptr_eq(&props, &initial);
        if frozen && !delegated {
            tracing::trace!(revision = self.revision, "props update held until exit completes");
            return;
        }
        self.props_changed.run(self.revision, || {
            if animated {
                planner.plan(store, &previous, &props);
            }
        });
        self.previous.record(initial);
    }

    /// Render and commit
    pub fn update(&mut self, initial: PropsRef) -> RenderPass {
        let pass = self.render(initial);
        self.commit();
        pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{kinds, Datum, GroupProps};

    fn props(keys: &[&str]) -> PropsRef {
        GroupProps::new()
            .animate(true)
            .child(ChildDescriptor::new(&kinds::BAR).data(keys.iter().map(|k| Datum::new(*k, 0.0, 0.0))))
            .into_ref()
    }

    #[test]
    fn mount_effect_sets_initial_flags() {
        let mut group = ChartGroup::new();
        group.update(props(&["a"]));

        assert_eq!(
            group.state(),
            AnimationState {
                animating: true,
                ..Default::default()
            }
        );
        assert!(group.needs_render());
    }

    #[test]
    fn static_group_never_touches_state() {
        let mut group = ChartGroup::new();
        let pass = group.update(GroupProps::new().child(ChildDescriptor::new(&kinds::BAR)).into_ref());

        assert_eq!(group.state(), AnimationState::default());
        assert!(!group.needs_render());
        assert_eq!(pass.children[0].animate, crate::props::Animate::Disabled);
    }

    #[test]
    fn rerender_with_same_snapshot_does_not_replan() {
        let mut group = ChartGroup::new();
        let first = props(&["a"]);
        group.update(Rc::clone(&first));
        group.update(props(&["b"]));
        assert!(group.state().nodes_will_exit);

        let generation = group.store().generation();
        let current = group.last_initial.clone().expect("rendered");
        group.update(current);
        assert_eq!(group.store().generation(), generation);
        assert!(group.state().nodes_will_exit);
    }

    #[test]
    fn children_are_memoized_until_state_changes() {
        let mut group = ChartGroup::new();
        let p = props(&["a"]);
        let first = group.render(Rc::clone(&p));
        let second = group.render(Rc::clone(&p));
        assert!(Rc::ptr_eq(&first.children, &second.children));

        group.merge(AnimationStatePatch::animation_finished());
        let third = group.render(p);
        assert!(!Rc::ptr_eq(&second.children, &third.children));
    }

    #[test]
    fn commit_without_render_is_ignored() {
        let mut group = ChartGroup::new();
        group.commit();
        assert_eq!(group.store().generation(), 0);
    }
}
