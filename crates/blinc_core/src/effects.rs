//! Effect slots for the render → commit → effect cycle
//!
//! Components declare effects in a fixed order and the host runs them after
//! each commit, in declaration order:
//!
//! - [`MountEffect`] fires exactly once, on the first commit
//! - [`DepsEffect`] fires on every commit whose dependency key changed
//! - [`PreviousValue`] records a value after commit, so reads during the next
//!   render observe the value from one cycle earlier

/// Effect that fires on the first commit only
#[derive(Debug, Default)]
pub struct MountEffect {
    fired: bool,
}

impl MountEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `effect` if this is the first call. Returns whether it ran.
    pub fn run<F: FnOnce()>(&mut self, effect: F) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        effect();
        true
    }
}

/// Effect that fires whenever its dependency key changes
#[derive(Debug)]
pub struct DepsEffect<K> {
    last: Option<K>,
}

impl<K> Default for DepsEffect<K> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<K: PartialEq> DepsEffect<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `effect` if `deps` differs from the key of the previous call
    ///
    /// The first call always runs.
    pub fn run<F: FnOnce()>(&mut self, deps: K, effect: F) -> bool {
        if self.last.as_ref() == Some(&deps) {
            return false;
        }
        self.last = Some(deps);
        effect();
        true
    }
}

/// Value captured at the end of the previous commit
///
/// Reads return `T::default()` until the first [`record`](Self::record).
#[derive(Debug)]
pub struct PreviousValue<T> {
    current: Option<T>,
}

impl<T> Default for PreviousValue<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: Clone + Default> PreviousValue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value recorded by the last completed commit, or the empty value
    pub fn get(&self) -> T {
        self.current.clone().unwrap_or_default()
    }

    /// Capture `value` for the next render pass
    pub fn record(&mut self, value: T) {
        self.current = Some(value);
    }
}
