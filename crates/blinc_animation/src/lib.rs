//! Blinc Animation System
//!
//! Transition vocabulary shared by animated components and the players that
//! interpolate them.
//!
//! # Features
//!
//! - **Transition States**: Per-child entering/exiting node sets
//! - **Grouped Plans**: One plan per composite child, addressed by index
//! - **Phases**: Load, enter, exit and move phases with their timing
//! - **Easing**: Named curves carried through configuration

pub mod easing;
pub mod timing;
pub mod transition;

pub use easing::Easing;
pub use timing::{PhaseDurations, PhaseOverrides, PhaseTiming, TransitionPhase};
pub use transition::{ChildrenTransitions, NodeKeys, TransitionGroup, TransitionState};
