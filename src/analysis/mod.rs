pub mod analysis_history;
pub mod formatting;
pub mod stats;
pub mod token_performance;
pub mod trade_performance;

pub use analysis_history::{analyze_analysis_logs, AnalysisHistory};
pub use token_performance::{analyze_token_performance, TokenStatistics, VolumeRanking};
pub use trade_performance::{analyze_trades, TradeSummary};
