use std::io::Write;
use tracing::{info, instrument};

use super::formatting::format_usd;
use super::stats::sum;
use crate::config::Config;
use crate::data_ingestion::{load_trade_log, TradeAction, TradeRecord};
use crate::errors::Result;

/// Buy/sell counts and the aggregate P&L estimate over a trade log.
///
/// Spent and earned multiply the summed amounts by the summed prices for each side.
/// This is not a per-trade `amount * price`: it overstates both figures whenever a
/// side has more than one trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSummary {
    pub buys: usize,
    pub sells: usize,
    pub total_spent: f64,
    pub total_earned: f64,
}

impl TradeSummary {
    pub fn compute(trades: &[TradeRecord]) -> Self {
        let side = move |action: TradeAction| trades.iter().filter(move |t| t.action == action);

        let aggregate = |action: TradeAction| {
            let amount: f64 = sum(side(action).map(|t| t.amount));
            let price: f64 = sum(side(action).map(|t| t.price));
            amount * price
        };

        TradeSummary {
            buys: side(TradeAction::Buy).count(),
            sells: side(TradeAction::Sell).count(),
            total_spent: aggregate(TradeAction::Buy),
            total_earned: aggregate(TradeAction::Sell),
        }
    }

    pub fn net_pnl(&self) -> f64 {
        self.total_earned - self.total_spent
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "\n💰 Trading Performance:")?;
        writeln!(out, "Total Buys: {}", self.buys)?;
        writeln!(out, "Total Sells: {}", self.sells)?;
        writeln!(out, "Total Spent: {}", format_usd(self.total_spent))?;
        writeln!(out, "Total Earned: {}", format_usd(self.total_earned))?;
        writeln!(out, "Net P&L: {}", format_usd(self.net_pnl()))
    }
}

#[instrument(skip_all, fields(on_close = true))]
pub fn analyze_trades<W: Write>(cfg: &Config, out: &mut W) -> Result<()> {
    let path = cfg.trade_log_path();
    if !path.exists() {
        writeln!(out, "⚠️  No trades found yet.")?;
    }

    let trades = load_trade_log(&path)?;
    if trades.is_empty() {
        writeln!(out, "\n⚠️  No trades to analyze yet. Bot hasn't executed any trades.")?;
        return Ok(());
    }
    writeln!(out, "📈 Loaded {} trades", trades.len())?;

    let summary = TradeSummary::compute(&trades);
    info!(
        buys = summary.buys,
        sells = summary.sells,
        net_pnl = summary.net_pnl(),
        "Trade summary computed"
    );
    summary.write_to(out)?;
    Ok(())
}
