//! Global id→location index entry.

use crate::order::Side;
use crate::orderbook::price_level::LevelHandle;
use rust_decimal::Decimal;

/// Where a resting order lives: which side, which price, and a stable handle
/// into that price level's FIFO permitting O(1) removal without scanning.
#[derive(Debug, Clone, Copy)]
pub struct OrderLocator {
    pub side: Side,
    pub price: Decimal,
    pub handle: LevelHandle,
}
