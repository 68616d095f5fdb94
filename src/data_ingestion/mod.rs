pub mod analysis_logs;
pub mod token_snapshot;
pub mod trade_log;

pub use analysis_logs::{load_analysis_logs, AnalysisLogEntry};
pub use token_snapshot::{load_token_snapshot, SwapStats, TokenRecord, TokenSnapshot};
pub use trade_log::{load_trade_log, TradeAction, TradeRecord};
