//! Animation scheduler
//!
//! Owns all live springs and advances them by fixed frame steps.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct SpringId;
}

/// The animation scheduler that ticks all active springs
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    /// Run `f` against a spring if it is still registered
    pub fn with_spring_mut<R>(
        &mut self,
        id: SpringId,
        f: impl FnOnce(&mut Spring) -> R,
    ) -> Option<R> {
        self.springs.get_mut(id).map(f)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    /// Tick all springs by `dt` seconds
    pub fn tick_by(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    /// Check if any springs are still moving
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringConfig;

    #[test]
    fn test_tick_by_settles_springs() {
        let mut scheduler = AnimationScheduler::new();
        let a = scheduler.add_spring(Spring::new(SpringConfig::snappy(), 0.0));
        let b = scheduler.add_spring(Spring::new(SpringConfig::gentle(), 1.0));
        assert!(!scheduler.has_active_animations());

        scheduler.with_spring_mut(a, |s| s.set_target(-250.0));
        scheduler.with_spring_mut(b, |s| s.set_target(0.5));
        assert!(scheduler.has_active_animations());

        for _ in 0..240 {
            scheduler.tick_by(1.0 / 60.0);
        }

        assert!(!scheduler.has_active_animations());
        assert_eq!(scheduler.get_spring(a).map(Spring::value), Some(-250.0));
        assert_eq!(scheduler.get_spring(b).map(Spring::value), Some(0.5));
    }

    #[test]
    fn test_removed_spring_is_gone() {
        let mut scheduler = AnimationScheduler::default();
        let id = scheduler.add_spring(Spring::new(SpringConfig::default(), 0.0));
        assert_eq!(scheduler.spring_count(), 1);

        assert!(scheduler.remove_spring(id).is_some());
        assert_eq!(scheduler.spring_count(), 0);
        assert!(scheduler.with_spring_mut(id, |s| s.snap_to(1.0)).is_none());
    }
}
