//! Choosing which props snapshot a render pass draws

use blinc_core::PreviousValue;

use crate::animation_state::AnimationState;
use crate::props::PropsRef;

/// Props as of the end of the previous completed commit
///
/// Reads return empty props before the first commit.
pub type PreviousPropsTracker = PreviousValue<PropsRef>;

/// Props to render this pass
///
/// While exiting nodes animate out the previous render's props are drawn, so
/// the exit plays against the old data instead of jumping to the new data.
pub fn select_props(state: &AnimationState, initial: &PropsRef) -> PropsRef {
    if !state.nodes_will_exit {
        return PropsRef::clone(initial);
    }
    match &state.old_props {
        Some(old) => PropsRef::clone(old),
        None => {
            tracing::warn!("exit planned without frozen props; rendering incoming props");
            PropsRef::clone(initial)
        }
    }
}
