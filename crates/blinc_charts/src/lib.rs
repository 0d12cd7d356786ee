//! blinc_charts
//!
//! Transition coordination for animated chart groups.
//!
//! On every props update a group decides which of its children's data nodes
//! enter, exit or move, and hands each child the state it needs to animate
//! across the following frames. Rendering stays declarative: every frame is a
//! plain render pass over the coordinator state.
//!
//! - [`group::ChartGroup`] drives the render → commit → effect cycle
//! - [`planner::TransitionPlanner`] computes the plan on props changes
//! - [`resolver::AnimationPropsResolver`] hands each child its `animate` config
//! - [`reconcile::ReconciliationDiff`] is the pluggable enter/exit diff

mod classify;
mod error;

pub mod animation_state;
pub mod config;
pub mod group;
pub mod planner;
pub mod props;
pub mod reconcile;
pub mod render_props;
pub mod resolver;

pub use animation_state::{AnimationState, AnimationStatePatch, AnimationStateStore};
pub use classify::{has_continuous, is_continuous};
pub use config::{GroupFallback, TransitionConfig};
pub use error::{ConfigError, Result};
pub use group::{ChartGroup, RenderPass};
pub use planner::{PlanOutcome, TransitionPlanner};
pub use props::{
    kinds, Animate, AnimateConfig, ChildDescriptor, ChildKind, Datum, GroupProps, PhaseConfig,
    PropsRef,
};
pub use reconcile::{DataKeyDiff, DiffOutcome, ReconciliationDiff};
pub use render_props::{select_props, PreviousPropsTracker};
pub use resolver::{
    AnimationPropsResolver, ChildTransitionProps, TransitionAccessor, TransitionCompletion,
};

/// Common imports for chart users.
pub mod prelude {
    pub use crate::animation_state::{AnimationState, AnimationStatePatch};
    pub use crate::config::TransitionConfig;
    pub use crate::group::{ChartGroup, RenderPass};
    pub use crate::props::{
        kinds, Animate, AnimateConfig, ChildDescriptor, Datum, GroupProps, PhaseConfig, PropsRef,
    };
    pub use blinc_animation::{ChildrenTransitions, PhaseTiming, TransitionPhase, TransitionState};
}
