use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::errors::{ReportError, Result};

/// Point-in-time capture of token metadata written by the trading bot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenSnapshot {
    pub timestamp: String,
    pub tokens: Vec<TokenRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mcap: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<f64>,
    #[serde(default)]
    pub holder_count: Option<f64>,
    #[serde(default, rename = "stats24h", deserialize_with = "deserialize_swap_stats")]
    pub stats_24h: Option<SwapStats>,
}

/// 24h swap volumes; a missing or non-numeric side counts as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwapStats {
    pub buy_volume: f64,
    pub sell_volume: f64,
}

impl SwapStats {
    fn from_object(object: &Map<String, Value>) -> Self {
        let volume = |key: &str| object.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        SwapStats {
            buy_volume: volume("buyVolume"),
            sell_volume: volume("sellVolume"),
        }
    }
}

impl TokenRecord {
    /// Combined buy and sell volume over the last 24h, 0 without swap stats.
    pub fn volume_24h(&self) -> f64 {
        self.stats_24h
            .map(|stats| stats.buy_volume + stats.sell_volume)
            .unwrap_or(0.0)
    }
}

// Anything other than a JSON object (null, number, string...) resolves to None
fn deserialize_swap_stats<'de, D>(deserializer: D) -> std::result::Result<Option<SwapStats>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_object).map(SwapStats::from_object))
}

/// Reads the latest token snapshot. Returns `Ok(None)` when the file does not exist.
#[instrument(skip(path), fields(path = %path.display(), on_close = true))]
pub fn load_token_snapshot(path: &Path) -> Result<Option<TokenSnapshot>> {
    if !path.exists() {
        warn!("Token snapshot not found");
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: TokenSnapshot = serde_json::from_str(&content).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    info!(tokens = snapshot.tokens.len(), timestamp = %snapshot.timestamp, "Loaded token snapshot");
    Ok(Some(snapshot))
}
