//! Reconciliation of previous and next child lists
//!
//! [`ReconciliationDiff`] is the seam between the coordinator and whatever
//! decides which nodes enter and exit. [`DataKeyDiff`] is the default: it
//! matches children by position and their data nodes by key.

use blinc_animation::{ChildrenTransitions, NodeKeys, TransitionGroup, TransitionState};

use crate::props::ChildDescriptor;

/// Result of reconciling two child lists
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffOutcome {
    pub nodes_will_exit: bool,
    pub nodes_will_enter: bool,
    /// Entering nodes may animate in without first being staged
    pub nodes_should_enter: bool,
    pub children_transitions: ChildrenTransitions,
}

/// Computes enter/exit sets and per-child transitions
///
/// Implementations must be deterministic, keep input order, and produce one
/// entry per child slot (or one list per group).
pub trait ReconciliationDiff {
    fn diff(&self, old: &[ChildDescriptor], next: &[ChildDescriptor]) -> DiffOutcome;
}

impl<F> ReconciliationDiff for F
where
    F: Fn(&[ChildDescriptor], &[ChildDescriptor]) -> DiffOutcome,
{
    fn diff(&self, old: &[ChildDescriptor], next: &[ChildDescriptor]) -> DiffOutcome {
        self(old, next)
    }
}

/// Positional child matching with keyed data nodes
#[derive(Clone, Copy, Debug, Default)]
pub struct DataKeyDiff;

enum SlotTransition {
    Leaf(TransitionState),
    Group(TransitionGroup),
}

impl DataKeyDiff {
    fn leaf(old: &ChildDescriptor, next: Option<&ChildDescriptor>) -> TransitionState {
        let Some(next) = next.filter(|n| n.same_kind(old)) else {
            return TransitionState::none();
        };

        let old_keys = old.data_keys();
        let next_keys = next.data_keys();
        let entering: NodeKeys = next_keys.iter().filter(|k| !old_keys.contains(k)).collect();
        let exiting: NodeKeys = old_keys.iter().filter(|k| !next_keys.contains(k)).collect();

        TransitionState::new(entering, exiting)
    }

    fn slot(old: &ChildDescriptor, next: Option<&ChildDescriptor>) -> SlotTransition {
        match next {
            Some(next) if !old.children.is_empty() => SlotTransition::Group(
                old.children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| Self::leaf(child, next.children.get(i)))
                    .collect(),
            ),
            _ => SlotTransition::Leaf(Self::leaf(old, next)),
        }
    }
}

impl ReconciliationDiff for DataKeyDiff {
    fn diff(&self, old: &[ChildDescriptor], next: &[ChildDescriptor]) -> DiffOutcome {
        let slots: Vec<SlotTransition> = old
            .iter()
            .enumerate()
            .map(|(i, child)| Self::slot(child, next.get(i)))
            .collect();

        let all_grouped =
            !slots.is_empty() && slots.iter().all(|s| matches!(s, SlotTransition::Group(_)));

        let children_transitions = if all_grouped {
            ChildrenTransitions::Grouped(
                slots
                    .into_iter()
                    .filter_map(|s| match s {
                        SlotTransition::Group(group) => Some(group),
                        SlotTransition::Leaf(_) => None,
                    })
                    .collect(),
            )
        } else {
            ChildrenTransitions::Single(
                slots
                    .into_iter()
                    .map(|s| match s {
                        SlotTransition::Leaf(state) => state,
                        SlotTransition::Group(_) => {
                            tracing::trace!("composite slot in a flat plan; no transition");
                            TransitionState::none()
                        }
                    })
                    .collect(),
            )
        };

        // Flags follow the slots that made it into the plan
        let nodes_will_exit = children_transitions.states().any(TransitionState::will_exit);
        let nodes_will_enter = children_transitions.states().any(TransitionState::will_enter);
        DiffOutcome {
            nodes_will_exit,
            nodes_will_enter,
            nodes_should_enter: false,
            children_transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{kinds, Datum};

    fn bars(keys: &[&str]) -> ChildDescriptor {
        ChildDescriptor::new(&kinds::BAR).data(
            keys.iter()
                .enumerate()
                .map(|(i, k)| Datum::new(*k, i as f32, 1.0)),
        )
    }

    fn keys(state: &TransitionState) -> (Vec<&str>, Vec<&str>) {
        (
            state.entering.iter().flat_map(|k| k.iter()).collect(),
            state.exiting.iter().flat_map(|k| k.iter()).collect(),
        )
    }

    #[test]
    fn replaced_child_data_enters_and_exits() {
        let old = [bars(&["a"]), bars(&["b"])];
        let next = [bars(&["a"]), bars(&["c"])];
        let outcome = DataKeyDiff.diff(&old, &next);

        assert!(outcome.nodes_will_exit);
        assert!(outcome.nodes_will_enter);
        assert!(!outcome.nodes_should_enter);

        let ChildrenTransitions::Single(slots) = &outcome.children_transitions else {
            panic!("expected a flat plan");
        };
        assert_eq!(slots.len(), 2);
        assert!(slots[0].is_empty());
        assert_eq!(keys(&slots[1]), (vec!["c"], vec!["b"]));
    }

    #[test]
    fn identical_children_produce_no_transitions() {
        let children = [bars(&["a", "b"])];
        let outcome = DataKeyDiff.diff(&children, &children);
        assert!(!outcome.nodes_will_exit);
        assert!(!outcome.nodes_will_enter);
        assert_eq!(
            outcome.children_transitions,
            ChildrenTransitions::Single(vec![TransitionState::none()])
        );
    }

    #[test]
    fn kind_change_or_removal_yields_empty_slot() {
        let old = [bars(&["a"]), bars(&["b"])];
        let next = [ChildDescriptor::new(&kinds::LINE).data([Datum::new("z", 0.0, 0.0)])];
        let outcome = DataKeyDiff.diff(&old, &next);

        assert!(!outcome.nodes_will_exit);
        assert!(!outcome.nodes_will_enter);
        let ChildrenTransitions::Single(slots) = &outcome.children_transitions else {
            panic!("expected a flat plan");
        };
        assert!(slots.iter().all(TransitionState::is_empty));
    }

    #[test]
    fn composite_children_produce_groups() {
        let stack = |top: &str| {
            ChildDescriptor::new(&kinds::STACK)
                .child(bars(&["shared"]))
                .child(bars(&[top]))
        };
        let old = [stack("x"), stack("y")];
        let next = [stack("x"), stack("z")];
        let outcome = DataKeyDiff.diff(&old, &next);

        let ChildrenTransitions::Grouped(groups) = &outcome.children_transitions else {
            panic!("expected a grouped plan");
        };
        assert_eq!(groups.len(), 2);
        assert!(groups[0].iter().all(TransitionState::is_empty));
        assert_eq!(keys(&groups[1][1]), (vec!["z"], vec!["y"]));
        assert!(outcome.nodes_will_exit && outcome.nodes_will_enter);
    }

    fn stack_of(keys: &[&str]) -> ChildDescriptor {
        ChildDescriptor::new(&kinds::STACK).child(bars(keys))
    }

    #[test]
    fn mixed_plan_ignores_changes_inside_composites() {
        let old = [bars(&["a"]), stack_of(&["x"])];
        let next = [bars(&["a"]), stack_of(&["y"])];
        let outcome = DataKeyDiff.diff(&old, &next);

        assert_eq!(
            outcome.children_transitions,
            ChildrenTransitions::Single(vec![TransitionState::none(), TransitionState::none()])
        );
        assert!(!outcome.nodes_will_exit);
        assert!(!outcome.nodes_will_enter);
    }

    #[test]
    fn mixed_plan_flags_match_leaf_slots() {
        let old = [bars(&["a"]), stack_of(&["x"])];
        let next = [bars(&["b"]), stack_of(&["y"])];
        let outcome = DataKeyDiff.diff(&old, &next);

        let ChildrenTransitions::Single(slots) = &outcome.children_transitions else {
            panic!("expected a flat plan");
        };
        assert_eq!(keys(&slots[0]), (vec!["b"], vec!["a"]));
        assert!(slots[1].is_empty());
        assert_eq!(
            outcome.nodes_will_exit,
            outcome.children_transitions.states().any(TransitionState::will_exit)
        );
        assert!(outcome.nodes_will_exit && outcome.nodes_will_enter);
    }

    #[test]
    fn diff_is_deterministic() {
        let old = [bars(&["a", "b", "c"])];
        let next = [bars(&["c", "d", "a"])];
        assert_eq!(DataKeyDiff.diff(&old, &next), DataKeyDiff.diff(&old, &next));
    }
}
