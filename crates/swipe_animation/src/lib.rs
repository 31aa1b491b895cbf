//! Swipe Animation
//!
//! Spring physics and frame scheduling for sheet motion.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Scheduler**: one owner ticking every live spring, by wall clock or fixed step
//! - **Sheet Animator**: a [`swipe_core::SheetAnimator`] over a scheduled spring,
//!   rubber-banding drags past the resting range
//! - **Interruptible**: retargeted springs keep their velocity

pub mod animator;
pub mod scheduler;
pub mod spring;

pub use animator::{rubberband, SpringAnimator, DEFAULT_RUBBERBAND};
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
