//! Host capabilities injected into the arbiter
//!
//! Everything the arbiter does to the outside world goes through these
//! traits, so the state machine runs the same against a real surface or a
//! headless page model.

/// Page-level scroll lock (blocks overscroll navigation such as pull-to-refresh)
pub trait PageScrollLock {
    fn set_locked(&mut self, locked: bool);
}

/// Marker on the sheet surface that lets its content scroll natively
pub trait ScrollPermission {
    fn set_scrollable(&mut self, scrollable: bool);
}

/// Interpolator that moves the sheet towards a target offset
///
/// Starting a new target supersedes any animation still in flight.
pub trait SheetAnimator {
    /// Animate towards `target`, or jump there when `immediate`
    fn start(&mut self, target: f32, immediate: bool);

    /// Current animated offset
    fn value(&self) -> f32;

    /// Resting range of the sheet, for elastic behavior past the ends
    fn set_bounds(&mut self, _min: f32, _max: f32) {}
}

/// Handle onto the native drag recognizer for the gesture being handled
pub trait DragGesture {
    /// End the current gesture; only honored during the same handler call
    fn cancel(&mut self);
}

/// Drag handle for callers that have no native recognizer to cancel
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedGesture {
    cancelled: bool,
}

impl DetachedGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl DragGesture for DetachedGesture {
    fn cancel(&mut self) {
        self.cancelled = true;
    }
}
