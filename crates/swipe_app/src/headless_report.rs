//! Report output model for headless sheet runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Report status for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// One accepted state change observed during the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: String,
    pub to: String,
    /// `gesture` or `external`
    pub source: String,
}

/// Machine-readable result of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub final_state: String,
    pub final_offset: f32,
    #[serde(default)]
    pub transitions: Vec<TransitionRecord>,
}

/// Where the sheet ended up when the run stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub final_state: String,
    pub final_offset: f32,
    pub transitions: Vec<TransitionRecord>,
}

impl HeadlessReport {
    pub fn passed(summary: RunSummary) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            code: None,
            message: None,
            elapsed_frames: summary.elapsed_frames,
            elapsed_ms: summary.elapsed_ms,
            final_state: summary.final_state,
            final_offset: summary.final_offset,
            transitions: summary.transitions,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        code: String,
        message: String,
        summary: RunSummary,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            code: Some(code),
            message: Some(message),
            ..Self::passed(summary)
        }
    }

    /// Write the report as pretty JSON, creating missing parent directories
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
