//! JSON run report.

use crate::pipeline::RunSummary;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Serialize a `RunSummary` to pretty JSON.
pub fn export_json(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize run summary to JSON")
}

/// Write the run summary to `path`, creating parent directories as needed.
pub fn write_report(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory {}", parent.display()))?;
    }
    let json = export_json(summary)?;
    fs::write(path, json).with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(())
}
