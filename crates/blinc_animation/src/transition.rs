//! Per-child transition descriptors
//!
//! A reconciliation pass compares the previous and next child lists slot by
//! slot and records, for every slot, which data nodes enter and which exit.
//! Composite children (groups, stacks) produce one list of slots per group.

use smallvec::SmallVec;

/// Ordered set of data node keys, in first-seen order
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeKeys(SmallVec<[String; 4]>);

impl NodeKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` unless already present. Returns whether it was added.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.0.push(key);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// `None` when empty, so "no nodes" and "no set" read the same
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl<S: Into<String>> FromIterator<S> for NodeKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut keys = NodeKeys::new();
        for key in iter {
            keys.insert(key);
        }
        keys
    }
}

/// Enter/exit plan for one child slot
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TransitionState {
    /// Nodes present in the next render but not the previous one
    pub entering: Option<NodeKeys>,
    /// Nodes present in the previous render but not the next one
    pub exiting: Option<NodeKeys>,
}

impl TransitionState {
    /// A slot with nothing to animate in or out
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(entering: NodeKeys, exiting: NodeKeys) -> Self {
        Self {
            entering: entering.non_empty(),
            exiting: exiting.non_empty(),
        }
    }

    pub fn will_enter(&self) -> bool {
        self.entering.is_some()
    }

    pub fn will_exit(&self) -> bool {
        self.exiting.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.will_enter() && !self.will_exit()
    }
}

/// One transition slot per child, in child order
pub type TransitionGroup = Vec<TransitionState>;

/// Transition plan for the children of one orchestrator
///
/// `Single` is shared by every child: each child reads its own slot from the
/// list. `Grouped` holds one list per composite child, addressed by the
/// child's index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChildrenTransitions {
    Single(TransitionGroup),
    Grouped(Vec<TransitionGroup>),
}

impl ChildrenTransitions {
    pub fn is_grouped(&self) -> bool {
        matches!(self, ChildrenTransitions::Grouped(_))
    }

    /// The group addressed by `index`
    ///
    /// A `Single` plan applies to every index.
    pub fn group(&self, index: usize) -> Option<&TransitionGroup> {
        match self {
            ChildrenTransitions::Single(slots) => Some(slots),
            ChildrenTransitions::Grouped(groups) => groups.get(index),
        }
    }

    /// Number of addressable groups (a `Single` plan counts as one)
    pub fn group_count(&self) -> usize {
        match self {
            ChildrenTransitions::Single(_) => 1,
            ChildrenTransitions::Grouped(groups) => groups.len(),
        }
    }

    /// The slot for child `index`, falling back to the first slot
    ///
    /// Only meaningful on a `Single` plan; a `Grouped` plan has not been
    /// narrowed to one child yet and yields `None`.
    pub fn slot(&self, index: usize) -> Option<&TransitionState> {
        match self {
            ChildrenTransitions::Single(slots) => slots.get(index).or_else(|| slots.first()),
            ChildrenTransitions::Grouped(_) => None,
        }
    }

    /// Every slot of the plan, groups in order
    pub fn states(&self) -> impl Iterator<Item = &TransitionState> {
        let groups: &[TransitionGroup] = match self {
            ChildrenTransitions::Single(slots) => std::slice::from_ref(slots),
            ChildrenTransitions::Grouped(groups) => groups,
        };
        groups.iter().flatten()
    }

    /// Collapse to the plan this orchestrator keeps for itself
    ///
    /// A `Grouped` plan keeps its first group; nested orchestrators select
    /// their own group by index when resolving.
    pub fn into_own(self) -> ChildrenTransitions {
        match self {
            ChildrenTransitions::Grouped(mut groups) if !groups.is_empty() => {
                ChildrenTransitions::Single(groups.swap_remove(0))
            }
            ChildrenTransitions::Grouped(_) => ChildrenTransitions::Single(Vec::new()),
            single => single,
        }
    }
}

impl Default for ChildrenTransitions {
    fn default() -> Self {
        ChildrenTransitions::Single(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(items: &[&str]) -> NodeKeys {
        items.iter().copied().collect()
    }

    #[test]
    fn node_keys_deduplicate_in_first_seen_order() {
        let k: NodeKeys = ["b", "a", "b"].into_iter().collect();
        assert_eq!(k.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(NodeKeys::new().non_empty().is_none());
    }

    #[test]
    fn single_plan_slot_falls_back_to_first() {
        let plan = ChildrenTransitions::Single(vec![
            TransitionState::new(keys(&["x"]), NodeKeys::new()),
            TransitionState::none(),
        ]);
        assert!(plan.slot(0).is_some_and(TransitionState::will_enter));
        assert!(plan.slot(1).is_some_and(TransitionState::is_empty));
        assert!(plan.slot(9).is_some_and(TransitionState::will_enter));
        assert!(plan.group(5).is_some());
    }

    #[test]
    fn grouped_plan_addresses_by_index() {
        let plan = ChildrenTransitions::Grouped(vec![
            vec![TransitionState::none()],
            vec![TransitionState::new(NodeKeys::new(), keys(&["gone"]))],
        ]);
        assert_eq!(plan.group_count(), 2);
        assert!(plan.group(1).is_some_and(|g| g[0].will_exit()));
        assert!(plan.group(2).is_none());
        assert!(plan.slot(0).is_none());
    }

    #[test]
    fn states_walk_every_group() {
        let plan = ChildrenTransitions::Grouped(vec![
            vec![TransitionState::none()],
            vec![TransitionState::none(), TransitionState::new(NodeKeys::new(), keys(&["gone"]))],
        ]);
        assert_eq!(plan.states().count(), 3);
        assert!(plan.states().any(TransitionState::will_exit));
        assert!(!ChildrenTransitions::default().states().any(TransitionState::will_enter));
    }

    #[test]
    fn into_own_keeps_first_group() {
        let plan = ChildrenTransitions::Grouped(vec![
            vec![TransitionState::new(keys(&["a"]), NodeKeys::new())],
            vec![TransitionState::none()],
        ]);
        let own = plan.into_own();
        assert!(!own.is_grouped());
        assert!(own.slot(0).is_some_and(TransitionState::will_enter));

        let empty = ChildrenTransitions::Grouped(Vec::new()).into_own();
        assert_eq!(empty, ChildrenTransitions::Single(Vec::new()));
    }
}
