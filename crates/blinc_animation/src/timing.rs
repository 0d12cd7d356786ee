//! Transition phases and their timing

use serde::{Deserialize, Serialize};

/// Lifecycle phase a child is rendered in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// First paint, before the load animation is released
    BeforeLoad,
    /// Load animation playing
    Load,
    /// Exiting nodes animating out against the previous props
    Exit,
    /// Entering nodes staged at their start values
    BeforeEnter,
    /// Entering nodes animating in
    Enter,
    /// Initial render of a chart that may later animate exits
    Initial,
    /// Continuous update between two data sets
    Move,
}

/// Duration and delay of one phase, in milliseconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhaseTiming {
    pub duration_ms: Option<u32>,
    pub delay_ms: Option<u32>,
}

impl PhaseTiming {
    pub fn duration(ms: u32) -> Self {
        Self {
            duration_ms: Some(ms),
            delay_ms: None,
        }
    }

    pub fn delay(ms: u32) -> Self {
        Self {
            duration_ms: None,
            delay_ms: Some(ms),
        }
    }
}

/// Default durations for every phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub load_ms: u32,
    pub enter_ms: u32,
    pub exit_ms: u32,
    pub move_ms: u32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            load_ms: 2000,
            enter_ms: 500,
            exit_ms: 500,
            move_ms: 500,
        }
    }
}

/// Partial override of [`PhaseDurations`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseOverrides {
    pub load_ms: Option<u32>,
    pub enter_ms: Option<u32>,
    pub exit_ms: Option<u32>,
    pub move_ms: Option<u32>,
}

impl PhaseOverrides {
    /// Fill unset phases from `base`
    pub fn resolve(&self, base: PhaseDurations) -> PhaseDurations {
        PhaseDurations {
            load_ms: self.load_ms.unwrap_or(base.load_ms),
            enter_ms: self.enter_ms.unwrap_or(base.enter_ms),
            exit_ms: self.exit_ms.unwrap_or(base.exit_ms),
            move_ms: self.move_ms.unwrap_or(base.move_ms),
        }
    }
}
