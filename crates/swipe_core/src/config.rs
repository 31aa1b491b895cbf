//! Sheet behavior configuration

use crate::error::{Result, SheetError};

/// Net drag distance (px) that commits a state change
pub const DEFAULT_COMMIT_THRESHOLD: f32 = 70.0;

/// Content scroll offset (px) beyond which a drag yields to native scrolling
pub const DEFAULT_SCROLL_CANCEL_THRESHOLD: f32 = 10.0;

/// Configuration for sheet geometry and gesture arbitration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetConfig {
    /// Distance gate for committing a swipe, independent of velocity
    pub commit_threshold: f32,
    /// Drags are cancelled once the content is scrolled further than this
    pub scroll_cancel_threshold: f32,
    /// Keep the header visible while hidden
    pub reserve_header: bool,
    /// Cap the full state at the content height instead of the whole viewport
    pub adaptive_height: bool,
    /// Never open the full state less than the half state
    pub full_floor_at_half: bool,
    /// End the native drag gesture as soon as a swipe commits
    pub cancel_on_commit: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            commit_threshold: DEFAULT_COMMIT_THRESHOLD,
            scroll_cancel_threshold: DEFAULT_SCROLL_CANCEL_THRESHOLD,
            reserve_header: true,
            adaptive_height: true,
            full_floor_at_half: false,
            cancel_on_commit: false,
        }
    }
}

impl SheetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit_threshold(mut self, px: f32) -> Self {
        self.commit_threshold = px;
        self
    }

    pub fn scroll_cancel_threshold(mut self, px: f32) -> Self {
        self.scroll_cancel_threshold = px;
        self
    }

    pub fn reserve_header(mut self, reserve: bool) -> Self {
        self.reserve_header = reserve;
        self
    }

    pub fn adaptive_height(mut self, adaptive: bool) -> Self {
        self.adaptive_height = adaptive;
        self
    }

    pub fn full_floor_at_half(mut self, floor: bool) -> Self {
        self.full_floor_at_half = floor;
        self
    }

    pub fn cancel_on_commit(mut self, cancel: bool) -> Self {
        self.cancel_on_commit = cancel;
        self
    }

    /// Check that thresholds are finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.commit_threshold.is_finite() || self.commit_threshold < 0.0 {
            return Err(SheetError::InvalidConfig(format!(
                "commit_threshold must be a non-negative number, got {}",
                self.commit_threshold
            )));
        }
        if !self.scroll_cancel_threshold.is_finite() || self.scroll_cancel_threshold < 0.0 {
            return Err(SheetError::InvalidConfig(format!(
                "scroll_cancel_threshold must be a non-negative number, got {}",
                self.scroll_cancel_threshold
            )));
        }
        Ok(())
    }
}
