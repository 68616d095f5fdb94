use std::io::Write;
use tracing::{info, instrument};

use crate::analysis::{analyze_analysis_logs, analyze_token_performance, analyze_trades};
use crate::config::Config;
use crate::errors::Result;

const BANNER_WIDTH: usize = 50;

/// Runs every report section in order and writes the text to `out`.
#[instrument(skip_all, fields(data_dir = %cfg.data_dir().display(), on_close = true))]
pub fn run<W: Write>(cfg: &Config, out: &mut W) -> Result<()> {
    let banner = "=".repeat(BANNER_WIDTH);
    writeln!(out, "🦀 Trade Data Analysis\n")?;
    writeln!(out, "{}", banner)?;

    analyze_token_performance(cfg, out)?;
    analyze_trades(cfg, out)?;
    if cfg.include_analysis_logs {
        analyze_analysis_logs(cfg, out)?;
    }

    writeln!(out, "\n{}", banner)?;
    writeln!(out, "\n💡 Tip: Set ANALYZER_INCLUDE_ANALYSIS_LOGS=true to summarize the bot's analysis logs.")?;
    out.flush()?;

    info!("Report complete");
    Ok(())
}
