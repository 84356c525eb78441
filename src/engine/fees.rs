//! Maker/taker fee computation: the fee base differs by side.

use crate::order::Side;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fee charged to one side of a fill.
///
/// The fee base follows a buy/sell convention: a buyer's fee is
/// rated on the filled volume, a seller's on the filled notional (volume ×
/// price) — since a buyer pays in quote currency per unit and a seller
/// receives quote currency for the whole notional.
pub fn compute_fee(side: Side, volume: Decimal, price: Decimal, rate: Decimal, precision: u32) -> Decimal {
    let base = match side {
        Side::Buy => volume,
        Side::Sell => volume * price,
    };
    (base * rate).round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven)
}
