use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::errors::{ReportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
    #[serde(other)]
    Other,
}

/// One line of the trade log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeRecord {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub action: TradeAction,
    pub amount: f64,
    pub price: f64,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an ISO-8601 timestamp. RFC 3339 offsets are honoured; naive
/// date-times and bare dates are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(raw.trim()).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid ISO-8601 timestamp {:?}", raw))
    })
}

/// Reads every trade from the JSONL trade log, in file order.
///
/// A missing file yields no trades. Whitespace-only lines are skipped; the first
/// malformed line fails the whole load.
#[instrument(skip(path), fields(path = %path.display(), on_close = true))]
pub fn load_trade_log(path: &Path) -> Result<Vec<TradeRecord>> {
    if !path.exists() {
        warn!("Trade log not found");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let trades = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<TradeRecord>(line).map_err(|source| ReportError::TradeLine {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(trades = trades.len(), "Loaded trade log");
    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_bot_trade_line() {
        let line = r#"{"timestamp":"2025-01-14T09:30:00.000Z","symbol":"BONK","address":"DezX","action":"buy","amount":2,"price":10.5,"reason":"score 87"}"#;
        let trade: TradeRecord = serde_json::from_str(line).unwrap();
        assert_eq!(trade.timestamp, Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 0).unwrap());
        assert_eq!(trade.action, TradeAction::Buy);
        assert_eq!(trade.amount, 2.0);
        assert_eq!(trade.price, 10.5);
        assert_eq!(trade.symbol.as_deref(), Some("BONK"));
        assert_eq!(trade.reason.as_deref(), Some("score 87"));
    }

    #[test]
    fn offset_timestamps_normalize_to_utc() {
        let line = r#"{"timestamp":"2025-01-14T11:30:00+02:00","action":"sell","amount":1,"price":1}"#;
        let trade: TradeRecord = serde_json::from_str(line).unwrap();
        assert_eq!(trade.timestamp, Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 0).unwrap());
        assert_eq!(trade.action, TradeAction::Sell);
        assert_eq!(trade.symbol, None);
    }

    #[test]
    fn unknown_action_is_other() {
        let line = r#"{"timestamp":"2025-01-14T09:30:00Z","action":"hold","amount":1,"price":1}"#;
        let trade: TradeRecord = serde_json::from_str(line).unwrap();
        assert_eq!(trade.action, TradeAction::Other);
    }

    #[test]
    fn naive_timestamps_are_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 0).unwrap();
        for raw in ["2025-01-14T09:30:00", "2025-01-14T09:30:00.000", "2025-01-14 09:30:00"] {
            let line = format!(r#"{{"timestamp":"{}","action":"buy","amount":1,"price":1}}"#, raw);
            let trade: TradeRecord = serde_json::from_str(&line).unwrap();
            assert_eq!(trade.timestamp, expected, "timestamp {}", raw);
        }
        assert_eq!(
            parse_timestamp("2025-01-14"),
            Some(Utc.with_ymd_and_hms(2025, 1, 14, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn amounts_beyond_fixed_point_range_parse() {
        let line = r#"{"timestamp":"2025-01-14T09:30:00Z","action":"buy","amount":1e30,"price":1}"#;
        let trade: TradeRecord = serde_json::from_str(line).unwrap();
        assert_eq!(trade.amount, 1e30);
        assert_eq!(trade.price, 1.0);
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let line = r#"{"timestamp":"yesterday","action":"buy","amount":1,"price":1}"#;
        assert!(serde_json::from_str::<TradeRecord>(line).is_err());
    }
}
