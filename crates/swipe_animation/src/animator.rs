//! Spring-driven sheet animator
//!
//! Bridges the arbiter's target offsets onto a spring registered with a
//! shared [`AnimationScheduler`]. Targets past the sheet's resting range are
//! rubber-banded so a drag beyond full or hidden stretches with resistance.

use std::sync::{Arc, Mutex, Weak};

use swipe_core::SheetAnimator;

use crate::scheduler::{AnimationScheduler, SpringId};
use crate::spring::{Spring, SpringConfig};

/// Elasticity of drags past the resting range
pub const DEFAULT_RUBBERBAND: f32 = 0.15;

/// Resisted displacement for `overshoot` past an edge of a `dimension`-sized range
pub fn rubberband(overshoot: f32, dimension: f32, constant: f32) -> f32 {
    if dimension <= 0.0 || constant <= 0.0 {
        return 0.0;
    }
    (overshoot * dimension * constant) / (dimension + constant * overshoot)
}

/// [`SheetAnimator`] backed by a scheduler-owned spring
pub struct SpringAnimator {
    scheduler: Weak<Mutex<AnimationScheduler>>,
    spring_id: Option<SpringId>,
    /// Last value applied without a scheduler
    detached_value: f32,
    bounds: Option<(f32, f32)>,
    elasticity: f32,
}

impl SpringAnimator {
    /// Register a spring resting at `initial` with `scheduler`
    pub fn new(
        config: SpringConfig,
        initial: f32,
        scheduler: &Arc<Mutex<AnimationScheduler>>,
    ) -> Self {
        let spring_id = match scheduler.lock() {
            Ok(mut scheduler) => Some(scheduler.add_spring(Spring::new(config, initial))),
            Err(_) => {
                tracing::warn!("animation scheduler poisoned; sheet animator will snap");
                None
            }
        };
        Self {
            scheduler: Arc::downgrade(scheduler),
            spring_id,
            detached_value: initial,
            bounds: None,
            elasticity: DEFAULT_RUBBERBAND,
        }
    }

    /// Set how strongly drags past the resting range are resisted (0 = rigid)
    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity.max(0.0);
        self
    }

    pub fn spring_id(&self) -> Option<SpringId> {
        self.spring_id
    }

    /// Current animation target, if the spring is still registered
    pub fn target(&self) -> Option<f32> {
        self.with_spring(|spring| spring.target())
    }

    pub fn is_settled(&self) -> bool {
        self.with_spring(Spring::is_settled).unwrap_or(true)
    }

    /// Map a requested offset into the elastic range around the bounds
    pub fn constrain(&self, target: f32) -> f32 {
        let Some((min, max)) = self.bounds else {
            return target;
        };
        let dimension = (max - min).abs().max(1.0);
        if target < min {
            min - rubberband(min - target, dimension, self.elasticity)
        } else if target > max {
            max + rubberband(target - max, dimension, self.elasticity)
        } else {
            target
        }
    }

    fn with_spring<R>(&self, f: impl FnOnce(&Spring) -> R) -> Option<R> {
        let id = self.spring_id?;
        let scheduler = self.scheduler.upgrade()?;
        let scheduler = scheduler.lock().ok()?;
        scheduler.get_spring(id).map(f)
    }
}

impl SheetAnimator for SpringAnimator {
    fn start(&mut self, target: f32, immediate: bool) {
        let target = self.constrain(target);
        self.detached_value = target;

        let (Some(id), Some(scheduler)) = (self.spring_id, self.scheduler.upgrade()) else {
            // No scheduler: nothing can animate, so jump
            return;
        };
        let Ok(mut scheduler) = scheduler.lock() else {
            tracing::warn!("animation scheduler poisoned; dropping sheet target");
            return;
        };
        scheduler.with_spring_mut(id, |spring| {
            if immediate {
                spring.snap_to(target);
            } else {
                spring.set_target(target);
            }
        });
    }

    fn value(&self) -> f32 {
        self.with_spring(Spring::value).unwrap_or(self.detached_value)
    }

    fn set_bounds(&mut self, min: f32, max: f32) {
        if min.is_finite() && max.is_finite() {
            self.bounds = Some((min.min(max), min.max(max)));
        }
    }
}

impl Drop for SpringAnimator {
    fn drop(&mut self) {
        let Some(id) = self.spring_id.take() else {
            return;
        };
        if let Some(scheduler) = self.scheduler.upgrade() {
            if let Ok(mut scheduler) = scheduler.lock() {
                scheduler.remove_spring(id);
            }
        }
    }
}
