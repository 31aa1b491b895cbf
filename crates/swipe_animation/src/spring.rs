//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Changing the target of
//! a moving spring keeps its velocity, so interrupted animations stay smooth.

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness: stiffness.max(0.0001),
            damping: damping.max(0.0),
            mass: mass.max(0.0001),
        }
    }

    /// Fast with no visible rebound
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Soft and slightly bouncy
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Quick response with a small overshoot
    pub fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    /// Critically damped sheet motion (tension 170, friction 26)
    pub fn sheet() -> Self {
        Self::new(170.0, 26.0, 1.0)
    }

    /// Damping at which the spring stops oscillating
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::sheet()
    }
}

/// Displacement (px) under which a slow spring counts as at rest
const REST_DISPLACEMENT: f32 = 0.01;
/// Velocity (px/s) under which a close spring counts as at rest
const REST_VELOCITY: f32 = 0.05;
/// Longest integration step; larger frames are subdivided
const MAX_STEP: f32 = 1.0 / 120.0;

/// A single animated value pulled towards a target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring resting at `value`
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Retarget the spring, keeping its current velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and stop there
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_VELOCITY
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 || self.is_settled() {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            self.rk4(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, value: f32, velocity: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (value - self.target) - damping * velocity) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spring_is_at_rest() {
        let spring = Spring::new(SpringConfig::default(), -40.0);
        assert!(spring.is_settled());
        assert_eq!(spring.target(), -40.0);
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut spring = Spring::new(SpringConfig::sheet(), 0.0);
        spring.set_target(-500.0);
        assert!(!spring.is_settled());

        for _ in 0..180 {
            spring.step(1.0 / 60.0);
        }
        assert!(spring.is_settled());
        assert_eq!(spring.value(), -500.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(-300.0);
        for _ in 0..5 {
            spring.step(1.0 / 60.0);
        }
        let velocity = spring.velocity();
        assert!(velocity < 0.0);

        spring.set_target(-250.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_snap() {
        let mut spring = Spring::new(SpringConfig::gentle(), 0.0);
        spring.set_target(100.0);
        spring.step(0.05);
        spring.snap_to(-20.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), -20.0);
    }

    #[test]
    fn test_sheet_preset_is_critically_damped() {
        let config = SpringConfig::sheet();
        assert!((config.critical_damping() - config.damping).abs() < 0.1);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(10.0);
        spring.step(f32::NAN);
        spring.step(-1.0);
        assert_eq!(spring.value(), 0.0);
    }
}
