use dotenvy::dotenv;
use std::env;
use std::path::{Path, PathBuf};

use crate::errors::{ReportError, Result};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub top_n: usize,
    pub include_analysis_logs: bool,
}

impl Config {
    /// Default report settings rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            top_n: DEFAULT_TOP_N,
            include_analysis_logs: false,
        }
    }

    pub fn load() -> Result<Self> {
        dotenv().ok();

        let data_dir = env::var("ANALYZER_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());

        let top_n = match env::var("ANALYZER_TOP_N") {
            Ok(raw) => parse_top_n(&raw)?,
            Err(_) => DEFAULT_TOP_N,
        };

        let include_analysis_logs = env::var("ANALYZER_INCLUDE_ANALYSIS_LOGS")
            .unwrap_or_else(|_| "false".to_string()) == "true";

        Ok(Config {
            data_dir: PathBuf::from(data_dir),
            top_n,
            include_analysis_logs,
        })
    }

    pub fn token_snapshot_path(&self) -> PathBuf {
        self.data_dir.join("historical").join("latest_tokens.json")
    }

    pub fn trade_log_path(&self) -> PathBuf {
        self.data_dir.join("trades").join("trades.jsonl")
    }

    pub fn analysis_logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn parse_top_n(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ReportError::Config(format!(
            "ANALYZER_TOP_N must be a positive integer, got {:?}",
            raw
        ))),
    }
}
