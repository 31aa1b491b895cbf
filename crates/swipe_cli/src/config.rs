//! Swipe configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use swipe_animation::SpringConfig;
use swipe_app::{HeadlessRunConfig, RunSettings};
use swipe_core::config::{DEFAULT_COMMIT_THRESHOLD, DEFAULT_SCROLL_CANCEL_THRESHOLD};
use swipe_core::SheetConfig;

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "swipe.toml";

/// Top-level Swipe configuration (swipe.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SwipeConfig {
    #[serde(default)]
    pub sheet: SheetSection,
    #[serde(default)]
    pub spring: SpringSection,
    #[serde(default)]
    pub run: RunSection,
}

/// Sheet geometry and gesture thresholds
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct SheetSection {
    /// Drag distance (px) that commits a state change
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f32,
    /// Content scroll (px) past which drags yield to native scrolling
    #[serde(default = "default_scroll_cancel_threshold")]
    pub scroll_cancel_threshold: f32,
    /// Keep the header peeking out while hidden
    #[serde(default = "default_true")]
    pub reserve_header: bool,
    /// Size the full state to the content
    #[serde(default = "default_true")]
    pub adaptive_height: bool,
    #[serde(default)]
    pub full_floor_at_half: bool,
    #[serde(default)]
    pub cancel_on_commit: bool,
}

fn default_commit_threshold() -> f32 {
    DEFAULT_COMMIT_THRESHOLD
}

fn default_scroll_cancel_threshold() -> f32 {
    DEFAULT_SCROLL_CANCEL_THRESHOLD
}

fn default_true() -> bool {
    true
}

impl Default for SheetSection {
    fn default() -> Self {
        Self {
            commit_threshold: default_commit_threshold(),
            scroll_cancel_threshold: default_scroll_cancel_threshold(),
            reserve_header: true,
            adaptive_height: true,
            full_floor_at_half: false,
            cancel_on_commit: false,
        }
    }
}

/// Spring driving the sheet between offsets
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct SpringSection {
    #[serde(default = "default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
}

fn default_stiffness() -> f32 {
    SpringConfig::sheet().stiffness
}

fn default_damping() -> f32 {
    SpringConfig::sheet().damping
}

fn default_mass() -> f32 {
    SpringConfig::sheet().mass
}

impl Default for SpringSection {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
        }
    }
}

/// Headless run settings
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct RunSection {
    /// Logical milliseconds per frame
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Frames between consecutive drag moves
    #[serde(default = "default_frames_per_drag_move")]
    pub frames_per_drag_move: u32,
}

fn default_tick_ms() -> u64 {
    16
}

fn default_frames_per_drag_move() -> u32 {
    1
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            frames_per_drag_move: default_frames_per_drag_move(),
        }
    }
}

impl SwipeConfig {
    /// Load configuration from a file, or from swipe.toml inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `swipe init` to create one.",
                CONFIG_FILE,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load the explicit file if given, else ./swipe.toml if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            tracing::debug!("using {}", local.display());
            return Self::load_from_path(local);
        }
        Ok(Self::default())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SwipeConfig = toml::from_str(content)?;
        config.sheet_config().validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn sheet_config(&self) -> SheetConfig {
        let sheet = &self.sheet;
        SheetConfig::new()
            .commit_threshold(sheet.commit_threshold)
            .scroll_cancel_threshold(sheet.scroll_cancel_threshold)
            .reserve_header(sheet.reserve_header)
            .adaptive_height(sheet.adaptive_height)
            .full_floor_at_half(sheet.full_floor_at_half)
            .cancel_on_commit(sheet.cancel_on_commit)
    }

    pub fn spring_config(&self) -> SpringConfig {
        SpringConfig::new(self.spring.stiffness, self.spring.damping, self.spring.mass)
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            sheet: self.sheet_config(),
            spring: self.spring_config(),
            runtime: HeadlessRunConfig {
                tick_ms: self.run.tick_ms,
                frames_per_drag_move: self.run.frames_per_drag_move,
            },
        }
    }
}
