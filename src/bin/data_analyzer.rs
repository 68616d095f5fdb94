use std::io;
use tracing::{info, instrument};

use trade_data_analyzer::config;
use trade_data_analyzer::logging;
use trade_data_analyzer::report;

#[instrument(name = "data_analyzer_main")]
fn main() -> eyre::Result<()> {
    // Load configuration (reads .env when present)
    let cfg = config::Config::load()?;

    // Initialize logging
    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }
    info!(data_dir = %cfg.data_dir.display(), top_n = cfg.top_n, "Configuration loaded and logging initialized");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::run(&cfg, &mut out)?;

    Ok(())
}
