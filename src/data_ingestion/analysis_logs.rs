use globset::Glob;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::errors::{ReportError, Result};

pub const ANALYSIS_LOG_PATTERN: &str = "analysis_*.json";

/// One analysis log file; the body is opaque to the report.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisLogEntry {
    pub file_name: String,
    pub body: Value,
}

/// Reads every `analysis_*.json` file in `dir`, ordered by file name.
///
/// The order is lexicographic, so `analysis_10.json` sorts before `analysis_2.json`.
/// A missing directory yields no entries.
#[instrument(skip(dir), fields(dir = %dir.display(), on_close = true))]
pub fn load_analysis_logs(dir: &Path) -> Result<Vec<AnalysisLogEntry>> {
    if !dir.is_dir() {
        debug!("Analysis log directory not found");
        return Ok(Vec::new());
    }

    let matcher = Glob::new(ANALYSIS_LOG_PATTERN)?.compile_matcher();
    let read_dir_error = |source: std::io::Error| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_file() && matcher.is_match(&file_name) {
            files.push((file_name, entry.path()));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut logs = Vec::with_capacity(files.len());
    for (file_name, path) in files {
        let content = fs::read_to_string(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        let body = serde_json::from_str(&content).map_err(|source| ReportError::Json { path, source })?;
        logs.push(AnalysisLogEntry { file_name, body });
    }

    info!(logs = logs.len(), "Loaded analysis logs");
    Ok(logs)
}
