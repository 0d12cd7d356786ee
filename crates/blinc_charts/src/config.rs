//! Transition configuration
//!
//! Durations are resolved per child: explicit `animate` props win, then the
//! child kind's configured defaults (polar-specific ones for polar children),
//! then the global defaults.
//!
//! ```toml
//! group_fallback = "first"
//!
//! [durations]
//! exit_ms = 300
//!
//! [kinds.bar]
//! load_ms = 800
//!
//! [polar_kinds.bar]
//! enter_ms = 900
//! ```

use std::path::Path;

use blinc_animation::{PhaseDurations, PhaseOverrides};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::props::ChildKind;

/// What a nested child gets when its index is past the end of a grouped plan
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFallback {
    /// No transition for that child
    #[default]
    Skip,
    /// Reuse the first group
    First,
}

/// Transition defaults for an animated group
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Global defaults
    pub durations: PhaseDurations,
    /// Overrides applied to every polar child
    pub polar_durations: Option<PhaseOverrides>,
    /// Per-kind overrides, keyed by kind name
    pub kinds: FxHashMap<String, PhaseOverrides>,
    /// Per-kind overrides for polar children
    pub polar_kinds: FxHashMap<String, PhaseOverrides>,
    pub group_fallback: GroupFallback,
}

impl TransitionConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load from a `.json` or `.toml` file (anything else is read as TOML)
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&raw)?,
            _ => Self::from_toml_str(&raw)?,
        };
        tracing::debug!(path = %path.display(), "loaded transition config");
        Ok(config)
    }

    /// Durations for a child of `kind`
    pub fn durations_for(&self, kind: &ChildKind, polar: bool) -> PhaseDurations {
        let base = match self.kinds.get(kind.name) {
            Some(overrides) => overrides.resolve(self.durations),
            None => self.durations,
        };
        if !polar {
            return base;
        }
        match self.polar_kinds.get(kind.name).or(self.polar_durations.as_ref()) {
            Some(overrides) => overrides.resolve(base),
            None => base,
        }
    }

    pub fn with_group_fallback(mut self, fallback: GroupFallback) -> Self {
        self.group_fallback = fallback;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::kinds;

    const SAMPLE: &str = r#"
group_fallback = "first"

[durations]
exit_ms = 300

[kinds.bar]
load_ms = 800

[polar_kinds.bar]
enter_ms = 900
"#;

    #[test]
    fn toml_config_fills_missing_keys_with_defaults() {
        let config = TransitionConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.group_fallback, GroupFallback::First);
        assert_eq!(config.durations.exit_ms, 300);
        assert_eq!(config.durations.load_ms, PhaseDurations::default().load_ms);
    }

    #[test]
    fn kind_overrides_layer_on_global_defaults() {
        let config = TransitionConfig::from_toml_str(SAMPLE).unwrap();

        let bar = config.durations_for(&kinds::BAR, false);
        assert_eq!(bar.load_ms, 800);
        assert_eq!(bar.exit_ms, 300);
        assert_eq!(bar.enter_ms, 500);

        let polar_bar = config.durations_for(&kinds::BAR, true);
        assert_eq!(polar_bar.enter_ms, 900);
        assert_eq!(polar_bar.load_ms, 800);

        let line = config.durations_for(&kinds::LINE, true);
        assert_eq!(line, config.durations);
    }

    #[test]
    fn polar_defaults_apply_without_kind_override() {
        let config = TransitionConfig {
            polar_durations: Some(PhaseOverrides {
                move_ms: Some(40),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.durations_for(&kinds::AREA, true).move_ms, 40);
        assert_eq!(config.durations_for(&kinds::AREA, false).move_ms, 500);
    }

    #[test]
    fn json_config_parses() {
        let config =
            TransitionConfig::from_json_str(r#"{ "durations": { "move_ms": 120 } }"#).unwrap();
        assert_eq!(config.durations.move_ms, 120);
        assert_eq!(config.group_fallback, GroupFallback::Skip);
    }

    #[test]
    fn malformed_config_reports_parse_error() {
        let err = TransitionConfig::from_toml_str("durations = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
