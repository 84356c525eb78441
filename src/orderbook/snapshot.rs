//! Point-in-time market-data view of a book, independent of its live internals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One price level as exposed to market-data consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: Decimal,
    pub volume: Decimal,
    pub order_count: usize,
}

/// A snapshot of both sides of a book at a specific instant.
///
/// Levels are ordered best-first on each side (descending price for bids,
/// ascending for asks), matching [`crate::orderbook::book::OrderBook`] priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub timestamp: i64,
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}

impl OrderBookSnapshot {
    pub fn best_bid(&self) -> Option<&LevelSnapshot> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&LevelSnapshot> {
        self.asks.first()
    }

    /// Midpoint of the best bid and best ask, or `None` unless both sides are non-empty.
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.best_bid()?.price;
        let ask = self.best_ask()?.price;
        Some((bid + ask) / Decimal::TWO)
    }

    /// Best ask minus best bid, or `None` unless both sides are non-empty.
    pub fn spread(&self) -> Option<Decimal> {
        let bid = self.best_bid()?.price;
        let ask = self.best_ask()?.price;
        Some(ask - bid)
    }

    pub fn total_bid_volume(&self) -> Decimal {
        self.bids.iter().map(|l| l.volume).sum()
    }

    pub fn total_ask_volume(&self) -> Decimal {
        self.asks.iter().map(|l| l.volume).sum()
    }
}
