use serde_json::Value;
use std::io::Write;
use tracing::instrument;

use super::formatting::{format_amount, render_table};
use super::stats::top_n_by;
use crate::config::Config;
use crate::data_ingestion::{load_analysis_logs, AnalysisLogEntry};
use crate::errors::Result;

/// Summary of the most recent analysis log.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisHistory {
    pub log_count: usize,
    pub latest_file: Option<String>,
    pub latest_timestamp: Option<String>,
    pub top_scores: Vec<(String, f64)>,
}

impl AnalysisHistory {
    /// Uses the last entry in load order, i.e. the greatest file name.
    pub fn compute(logs: &[AnalysisLogEntry], top_n: usize) -> Self {
        let latest = logs.last();

        let scores: Vec<(String, f64)> = latest
            .and_then(|log| log.body.get("scores"))
            .and_then(Value::as_object)
            .map(|scores| {
                scores
                    .iter()
                    .filter_map(|(symbol, score)| score.as_f64().map(|s| (symbol.clone(), s)))
                    .collect()
            })
            .unwrap_or_default();

        AnalysisHistory {
            log_count: logs.len(),
            latest_file: latest.map(|log| log.file_name.clone()),
            latest_timestamp: latest
                .and_then(|log| log.body.get("timestamp"))
                .and_then(Value::as_str)
                .map(str::to_string),
            top_scores: top_n_by(&scores, top_n, |(_, score)| *score)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "\n📋 Loaded {} analysis logs", self.log_count)?;
        let Some(file) = &self.latest_file else {
            return Ok(());
        };
        match &self.latest_timestamp {
            Some(timestamp) => writeln!(out, "Latest analysis: {} ({})", file, timestamp)?,
            None => writeln!(out, "Latest analysis: {}", file)?,
        }
        if !self.top_scores.is_empty() {
            let rows: Vec<Vec<String>> = self
                .top_scores
                .iter()
                .map(|(symbol, score)| vec![symbol.clone(), format_amount(*score)])
                .collect();
            writeln!(out, "{}", render_table(&["token", "score"], &rows))?;
        }
        Ok(())
    }
}

#[instrument(skip_all, fields(on_close = true))]
pub fn analyze_analysis_logs<W: Write>(cfg: &Config, out: &mut W) -> Result<()> {
    let logs = load_analysis_logs(&cfg.analysis_logs_dir())?;
    AnalysisHistory::compute(&logs, cfg.top_n).write_to(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(file_name: &str, body: Value) -> AnalysisLogEntry {
        AnalysisLogEntry {
            file_name: file_name.to_string(),
            body,
        }
    }

    #[test]
    fn summarizes_last_log() {
        let logs = vec![
            entry("analysis_1.json", json!({ "timestamp": "2025-01-01T00:00:00Z", "scores": { "OLD": 99 } })),
            entry(
                "analysis_2.json",
                json!({
                    "timestamp": "2025-01-02T00:00:00Z",
                    "scores": { "BONK": 72.5, "WIF": 88, "POPCAT": "bad", "MEW": 40 },
                    "topTokens": []
                }),
            ),
        ];
        let history = AnalysisHistory::compute(&logs, 2);
        assert_eq!(history.log_count, 2);
        assert_eq!(history.latest_file.as_deref(), Some("analysis_2.json"));
        assert_eq!(history.latest_timestamp.as_deref(), Some("2025-01-02T00:00:00Z"));
        assert_eq!(
            history.top_scores,
            vec![("WIF".to_string(), 88.0), ("BONK".to_string(), 72.5)]
        );
    }

    #[test]
    fn opaque_bodies_are_tolerated() {
        let logs = vec![entry("analysis_x.json", json!([1, 2, 3]))];
        let history = AnalysisHistory::compute(&logs, 5);
        assert_eq!(history.log_count, 1);
        assert_eq!(history.latest_timestamp, None);
        assert!(history.top_scores.is_empty());

        let mut out = Vec::new();
        history.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n📋 Loaded 1 analysis logs\nLatest analysis: analysis_x.json\n"
        );
    }

    #[test]
    fn no_logs() {
        let history = AnalysisHistory::compute(&[], 5);
        assert_eq!(history.log_count, 0);
        assert_eq!(history.latest_file, None);
    }
}
