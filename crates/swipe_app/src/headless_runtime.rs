//! Deterministic frame clock for headless runs.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
    /// Frames rendered between consecutive drag moves.
    pub frames_per_drag_move: u32,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            frames_per_drag_move: 1,
        }
    }
}

impl HeadlessRunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        Ok(())
    }

    /// Frame step in seconds.
    pub fn dt(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Frames needed to cover `wait_ms`, rounded up.
    pub fn frames_for(&self, wait_ms: u64) -> u32 {
        if wait_ms == 0 {
            return 0;
        }
        let tick = self.tick_ms.max(1);
        let frames = wait_ms.saturating_add(tick - 1) / tick;
        frames.min(u32::MAX as u64) as u32
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Frame number since the start of the run.
    pub frame_index: u64,
    pub elapsed_ms: u64,
    pub dt: f32,
}

/// Logical clock counting frames across a whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessClock {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
}

impl HeadlessClock {
    /// Run `frames` frames, calling `on_frame` once per frame.
    pub fn run<F>(&mut self, cfg: &HeadlessRunConfig, frames: u32, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&FrameContext) -> Result<()>,
    {
        cfg.validate()?;
        for _ in 0..frames {
            self.elapsed_frames = self.elapsed_frames.saturating_add(1);
            self.elapsed_ms = self.elapsed_ms.saturating_add(cfg.tick_ms);
            on_frame(&FrameContext {
                frame_index: self.elapsed_frames,
                elapsed_ms: self.elapsed_ms,
                dt: cfg.dt(),
            })?;
        }
        Ok(())
    }
}
