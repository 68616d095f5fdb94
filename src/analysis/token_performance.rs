use std::io::Write;
use tracing::{info, instrument};

use super::formatting::{format_amount, format_optional_usd, render_table, MISSING};
use super::stats::{mean, top_n_by};
use crate::config::Config;
use crate::data_ingestion::{load_token_snapshot, TokenRecord};
use crate::errors::Result;

/// Descriptive statistics over one token snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStatistics {
    pub token_count: usize,
    pub average_mcap: Option<f64>,
    pub average_liquidity: Option<f64>,
    pub average_holders: Option<f64>,
    pub top_by_volume: Vec<VolumeRanking>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeRanking {
    pub symbol: String,
    pub name: String,
    pub volume_24h: f64,
    pub mcap: Option<f64>,
}

impl TokenStatistics {
    pub fn compute(tokens: &[TokenRecord], top_n: usize) -> Self {
        let top_by_volume = top_n_by(tokens, top_n, TokenRecord::volume_24h)
            .into_iter()
            .map(|token| VolumeRanking {
                symbol: token.symbol.clone(),
                name: token.name.clone(),
                volume_24h: token.volume_24h(),
                mcap: token.mcap,
            })
            .collect();

        TokenStatistics {
            token_count: tokens.len(),
            average_mcap: mean(tokens.iter().map(|t| t.mcap)),
            average_liquidity: mean(tokens.iter().map(|t| t.liquidity)),
            average_holders: mean(tokens.iter().map(|t| t.holder_count)),
            top_by_volume,
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W, top_n: usize) -> std::io::Result<()> {
        writeln!(out, "\n📊 Token Statistics:")?;
        writeln!(out, "Average Market Cap: {}", format_optional_usd(self.average_mcap))?;
        writeln!(out, "Average Liquidity: {}", format_optional_usd(self.average_liquidity))?;
        let holders = self
            .average_holders
            .map(|h| format!("{:.0}", h))
            .unwrap_or_else(|| MISSING.to_string());
        writeln!(out, "Average Holders: {}", holders)?;

        writeln!(out, "\n🔥 Top {} by 24h Volume:", top_n)?;
        let rows: Vec<Vec<String>> = self
            .top_by_volume
            .iter()
            .map(|r| {
                vec![
                    r.symbol.clone(),
                    r.name.clone(),
                    format_amount(r.volume_24h),
                    r.mcap.map(format_amount).unwrap_or_else(|| MISSING.to_string()),
                ]
            })
            .collect();
        writeln!(out, "{}", render_table(&["symbol", "name", "volume_24h", "mcap"], &rows))
    }
}

/// Prints averages and the top tokens by 24h volume from the latest snapshot.
///
/// Prints a warning and returns when no snapshot has been written yet.
#[instrument(skip_all, fields(on_close = true))]
pub fn analyze_token_performance<W: Write>(cfg: &Config, out: &mut W) -> Result<()> {
    let Some(snapshot) = load_token_snapshot(&cfg.token_snapshot_path())? else {
        writeln!(out, "⚠️  No token data found. Run the bot first to collect data.")?;
        return Ok(());
    };
    writeln!(out, "📊 Loaded {} tokens from {}", snapshot.tokens.len(), snapshot.timestamp)?;

    let stats = TokenStatistics::compute(&snapshot.tokens, cfg.top_n);
    info!(
        tokens = stats.token_count,
        average_mcap = ?stats.average_mcap,
        ranked = stats.top_by_volume.len(),
        "Token statistics computed"
    );
    stats.write_to(out, cfg.top_n)?;
    Ok(())
}
