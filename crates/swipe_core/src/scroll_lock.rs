//! Page scroll locking driven by sheet state

use crate::capability::PageScrollLock;

/// Forwards lock changes to the page, skipping repeats
///
/// The arbiter asks for the desired lock on every drag tick; only actual
/// changes reach the page primitive.
#[derive(Debug)]
pub struct ScrollLockController<L: PageScrollLock> {
    lock: L,
    locked: Option<bool>,
}

impl<L: PageScrollLock> ScrollLockController<L> {
    pub fn new(lock: L) -> Self {
        Self { lock, locked: None }
    }

    /// Request the page lock state; returns true if the page was touched
    pub fn set_locked(&mut self, locked: bool) -> bool {
        if self.locked == Some(locked) {
            return false;
        }
        tracing::debug!(locked, "page scroll lock changed");
        self.locked = Some(locked);
        self.lock.set_locked(locked);
        true
    }

    /// Last lock value applied, if any
    pub fn is_locked(&self) -> Option<bool> {
        self.locked
    }

    pub fn primitive(&self) -> &L {
        &self.lock
    }

    pub fn primitive_mut(&mut self) -> &mut L {
        &mut self.lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingLock {
        calls: Vec<bool>,
    }

    impl PageScrollLock for CountingLock {
        fn set_locked(&mut self, locked: bool) {
            self.calls.push(locked);
        }
    }

    #[test]
    fn test_repeats_are_dropped() {
        let mut controller = ScrollLockController::new(CountingLock::default());
        assert_eq!(controller.is_locked(), None);

        assert!(controller.set_locked(true));
        assert!(!controller.set_locked(true));
        assert!(!controller.set_locked(true));
        assert!(controller.set_locked(false));

        assert_eq!(controller.primitive().calls, vec![true, false]);
        assert_eq!(controller.is_locked(), Some(false));
    }

    #[test]
    fn test_first_request_always_applies() {
        let mut controller = ScrollLockController::new(CountingLock::default());
        assert!(controller.set_locked(false));
        assert_eq!(controller.primitive().calls, vec![false]);
    }
}
