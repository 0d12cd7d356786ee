//! Props snapshots for animated chart groups
//!
//! A [`GroupProps`] value is an immutable capture of one render's props. It is
//! shared as [`PropsRef`] so the coordinator can keep the previous render's
//! snapshot alive while exiting nodes animate out.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use blinc_animation::{Easing, NodeKeys};

use crate::animation_state::AnimationState;
use crate::resolver::TransitionAccessor;

/// Shared, immutable props snapshot
pub type PropsRef = Rc<GroupProps>;

/// One keyed data point
#[derive(Clone, Debug, PartialEq)]
pub struct Datum {
    /// Stable identity used to match nodes across renders
    pub key: String,
    pub x: f32,
    pub y: f32,
}

impl Datum {
    pub fn new(key: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            key: key.into(),
            x,
            y,
        }
    }

    /// Datum keyed by its position in the series
    pub fn indexed(index: usize, x: f32, y: f32) -> Self {
        Self::new(index.to_string(), x, y)
    }
}

impl Hash for Datum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

/// Static description of a child component type
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ChildKind {
    pub name: &'static str,
    /// Data is interpolated along a domain (lines, areas) rather than drawn
    /// as discrete marks
    pub continuous: bool,
    /// The child wraps its own children (groups, stacks)
    pub composite: bool,
}

impl ChildKind {
    pub const fn discrete(name: &'static str) -> Self {
        Self {
            name,
            continuous: false,
            composite: false,
        }
    }

    pub const fn continuous(name: &'static str) -> Self {
        Self {
            name,
            continuous: true,
            composite: false,
        }
    }

    pub const fn composite(name: &'static str) -> Self {
        Self {
            name,
            continuous: false,
            composite: true,
        }
    }
}

/// Built-in child kinds
pub mod kinds {
    use super::ChildKind;

    pub static LINE: ChildKind = ChildKind::continuous("line");
    pub static AREA: ChildKind = ChildKind::continuous("area");
    pub static BAR: ChildKind = ChildKind::discrete("bar");
    pub static SCATTER: ChildKind = ChildKind::discrete("scatter");
    pub static CANDLESTICK: ChildKind = ChildKind::discrete("candlestick");
    pub static GROUP: ChildKind = ChildKind::composite("group");
    pub static STACK: ChildKind = ChildKind::composite("stack");
}

/// Timing override for one lifecycle phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhaseConfig {
    pub duration_ms: Option<u32>,
    pub delay_ms: Option<u32>,
}

impl PhaseConfig {
    pub fn duration(ms: u32) -> Self {
        Self {
            duration_ms: Some(ms),
            delay_ms: None,
        }
    }
}

/// Animation configuration object
///
/// Every field is optional. Configurations layer with [`or`](Self::or): the
/// receiver's fields win and unset fields are taken from the fallback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimateConfig {
    pub duration_ms: Option<u32>,
    pub easing: Option<Easing>,
    pub on_load: Option<PhaseConfig>,
    pub on_enter: Option<PhaseConfig>,
    pub on_exit: Option<PhaseConfig>,
    /// Plan handed down by an enclosing orchestrator
    pub parent_state: Option<Rc<AnimationState>>,
    /// Transition accessor bound by an enclosing orchestrator
    pub get_transitions: Option<TransitionAccessor>,
}

impl AnimateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn on_load(mut self, phase: PhaseConfig) -> Self {
        self.on_load = Some(phase);
        self
    }

    pub fn on_enter(mut self, phase: PhaseConfig) -> Self {
        self.on_enter = Some(phase);
        self
    }

    pub fn on_exit(mut self, phase: PhaseConfig) -> Self {
        self.on_exit = Some(phase);
        self
    }

    pub fn parent_state(mut self, state: Rc<AnimationState>) -> Self {
        self.parent_state = Some(state);
        self
    }

    /// Fill unset fields from `fallback`
    pub fn or(self, fallback: &AnimateConfig) -> AnimateConfig {
        AnimateConfig {
            duration_ms: self.duration_ms.or(fallback.duration_ms),
            easing: self.easing.or(fallback.easing),
            on_load: self.on_load.or(fallback.on_load),
            on_enter: self.on_enter.or(fallback.on_enter),
            on_exit: self.on_exit.or(fallback.on_exit),
            parent_state: self.parent_state.or_else(|| fallback.parent_state.clone()),
            get_transitions: self
                .get_transitions
                .or_else(|| fallback.get_transitions.clone()),
        }
    }
}

impl Hash for AnimateConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.duration_ms.hash(state);
        self.easing.hash(state);
        self.on_load.hash(state);
        self.on_enter.hash(state);
        self.on_exit.hash(state);
        self.parent_state
            .as_ref()
            .map(|s| Rc::as_ptr(s) as usize)
            .hash(state);
        self.get_transitions.hash(state);
    }
}

/// The `animate` prop: off, on with defaults, or configured
#[derive(Clone, Debug, Default, PartialEq, Hash)]
pub enum Animate {
    #[default]
    Disabled,
    Enabled,
    Config(AnimateConfig),
}

impl Animate {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Animate::Disabled)
    }

    pub fn config(&self) -> Option<&AnimateConfig> {
        match self {
            Animate::Config(config) => Some(config),
            _ => None,
        }
    }

    pub fn parent_state(&self) -> Option<&Rc<AnimationState>> {
        self.config().and_then(|c| c.parent_state.as_ref())
    }

    pub fn get_transitions(&self) -> Option<&TransitionAccessor> {
        self.config().and_then(|c| c.get_transitions.as_ref())
    }

    /// Fields this value sets explicitly; `Enabled` and `Disabled` set none
    pub fn overrides(&self) -> AnimateConfig {
        self.config().cloned().unwrap_or_default()
    }
}

impl From<bool> for Animate {
    fn from(enabled: bool) -> Self {
        if enabled {
            Animate::Enabled
        } else {
            Animate::Disabled
        }
    }
}

impl From<AnimateConfig> for Animate {
    fn from(config: AnimateConfig) -> Self {
        Animate::Config(config)
    }
}

/// One child of an animated group
#[derive(Clone, Debug, PartialEq)]
pub struct ChildDescriptor {
    pub kind: &'static ChildKind,
    pub animate: Animate,
    pub polar: bool,
    pub data: Vec<Datum>,
    /// Nested children of a composite child
    pub children: Vec<ChildDescriptor>,
}

impl ChildDescriptor {
    pub fn new(kind: &'static ChildKind) -> Self {
        Self {
            kind,
            animate: Animate::Disabled,
            polar: false,
            data: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn data(mut self, data: impl IntoIterator<Item = Datum>) -> Self {
        self.data = data.into_iter().collect();
        self
    }

    pub fn animate(mut self, animate: impl Into<Animate>) -> Self {
        self.animate = animate.into();
        self
    }

    pub fn polar(mut self, polar: bool) -> Self {
        self.polar = polar;
        self
    }

    pub fn child(mut self, child: ChildDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_continuous(&self) -> bool {
        self.kind.continuous
    }

    pub fn is_composite(&self) -> bool {
        self.kind.composite || !self.children.is_empty()
    }

    pub fn same_kind(&self, other: &ChildDescriptor) -> bool {
        self.kind.name == other.kind.name
    }

    /// Keys of this child's data nodes, in data order
    pub fn data_keys(&self) -> NodeKeys {
        self.data.iter().map(|d| d.key.as_str()).collect()
    }
}

impl Hash for ChildDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.animate.hash(state);
        self.polar.hash(state);
        self.data.hash(state);
        self.children.hash(state);
    }
}

const FALLBACK_WIDTH: f32 = 450.0;
const FALLBACK_HEIGHT: f32 = 300.0;
const FALLBACK_PADDING: f32 = 50.0;

/// Props of an animated chart group
///
/// `Default` is the empty value: no children, animation off, zero size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupProps {
    pub animate: Animate,
    pub polar: bool,
    pub children: Vec<ChildDescriptor>,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset: f32,
}

impl GroupProps {
    /// Props with the standard group dimensions
    pub fn new() -> Self {
        Self {
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
            padding: FALLBACK_PADDING,
            ..Default::default()
        }
    }

    /// Props for a nested group built from a resolved child
    pub fn nested(child: &ChildDescriptor) -> Self {
        Self {
            animate: child.animate.clone(),
            polar: child.polar,
            children: child.children.clone(),
            ..Self::new()
        }
    }

    pub fn animate(mut self, animate: impl Into<Animate>) -> Self {
        self.animate = animate.into();
        self
    }

    pub fn polar(mut self, polar: bool) -> Self {
        self.polar = polar;
        self
    }

    pub fn child(mut self, child: ChildDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ChildDescriptor>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn into_ref(self) -> PropsRef {
        Rc::new(self)
    }
}

impl Hash for GroupProps {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.animate.hash(state);
        self.polar.hash(state);
        self.children.hash(state);
        for v in [self.width, self.height, self.padding, self.offset] {
            v.to_bits().hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blinc_core::memo_key;

    #[test]
    fn animate_config_layers_field_wise() {
        let own = AnimateConfig::new().duration(100);
        let fallback = AnimateConfig::new()
            .duration(900)
            .on_exit(PhaseConfig::duration(250));
        let merged = own.or(&fallback);
        assert_eq!(merged.duration_ms, Some(100));
        assert_eq!(merged.on_exit, Some(PhaseConfig::duration(250)));
        assert_eq!(merged.on_enter, None);
    }

    #[test]
    fn enabled_and_disabled_carry_no_overrides() {
        assert_eq!(Animate::Enabled.overrides(), AnimateConfig::default());
        assert_eq!(Animate::Disabled.overrides(), AnimateConfig::default());
        assert!(Animate::from(true).is_enabled());
        assert!(!Animate::from(false).is_enabled());
    }

    #[test]
    fn data_keys_follow_data_order() {
        let child = ChildDescriptor::new(&kinds::BAR).data([
            Datum::new("b", 1.0, 2.0),
            Datum::new("a", 2.0, 3.0),
        ]);
        assert_eq!(child.data_keys().iter().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn props_hash_tracks_data_changes() {
        let a = GroupProps::new().child(
            ChildDescriptor::new(&kinds::LINE).data([Datum::indexed(0, 0.0, 1.0)]),
        );
        let mut b = a.clone();
        assert_eq!(memo_key(&a), memo_key(&b));

        b.children[0].data[0].y = 2.0;
        assert_ne!(memo_key(&a), memo_key(&b));
    }

    #[test]
    fn nested_props_inherit_child_animation() {
        let child = ChildDescriptor::new(&kinds::STACK)
            .animate(true)
            .polar(true)
            .child(ChildDescriptor::new(&kinds::BAR));
        let nested = GroupProps::nested(&child);
        assert!(nested.animate.is_enabled());
        assert!(nested.polar);
        assert_eq!(nested.children.len(), 1);
        assert_eq!(nested.width, FALLBACK_WIDTH);
    }
}
