//! Blinc Core Runtime
//!
//! Host primitives that stateful components build on:
//!
//! - **State Cells**: Component-scoped state with merge-patch updates
//! - **Effects**: Mount and dependency-keyed effects run after commit
//! - **Memoization**: Key-guarded caches for derived structures
//!
//! # Example
//!
//! ```rust
//! use blinc_core::effects::{DepsEffect, PreviousValue};
//!
//! let mut previous: PreviousValue<u32> = PreviousValue::new();
//! let mut on_change = DepsEffect::new();
//!
//! for props in [1u32, 1, 2] {
//!     let before = previous.get();
//!     on_change.run(props, || println!("{before} -> {props}"));
//!     previous.record(props);
//! }
//! ```

pub mod effects;
pub mod memo;
pub mod state_cell;

pub use effects::{DepsEffect, MountEffect, PreviousValue};
pub use memo::{memo_key, Memo};
pub use state_cell::{MergeState, StateCell, StateUpdater};
