//! Easing identifiers
//!
//! The coordinator only carries the easing a transition was configured with;
//! the curve itself is evaluated by whichever player interpolates the frames.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Named easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    CubicBezier(f32, f32, f32, f32),
}

impl Eq for Easing {}

impl Hash for Easing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Easing::CubicBezier(x1, y1, x2, y2) = self {
            for v in [x1, y1, x2, y2] {
                v.to_bits().hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_equality() {
        let a = Easing::CubicBezier(0.4, 0.0, 0.2, 1.0);
        assert_eq!(a, Easing::CubicBezier(0.4, 0.0, 0.2, 1.0));
        assert_ne!(a, Easing::CubicBezier(0.4, 0.0, 0.6, 1.0));
    }
}
