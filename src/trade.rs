//! Trade record emitted on every successful cross.

use crate::order::{OrderId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time record of one maker/taker fill.
///
/// `price` is always the maker's resting price (the maker-price rule):
/// deterministic and required for replay equivalence across implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    pub bid_order_id: OrderId,
    pub ask_order_id: OrderId,
    pub price: Decimal,
    pub volume: Decimal,
    /// Remaining volume of the aggressor after this fill; `None` once fully filled.
    pub aggressor_remaining: Option<Decimal>,
    pub aggressor_side: Side,
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
    /// `price * volume`.
    pub gross_cost: Decimal,
    pub timestamp: i64,
}

impl TradeRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        bid_order_id: OrderId,
        ask_order_id: OrderId,
        price: Decimal,
        volume: Decimal,
        aggressor_remaining: Option<Decimal>,
        aggressor_side: Side,
        maker_fee: Decimal,
        taker_fee: Decimal,
        timestamp: i64,
    ) -> Self {
        Self {
            maker_order_id,
            taker_order_id,
            bid_order_id,
            ask_order_id,
            price,
            volume,
            aggressor_remaining,
            aggressor_side,
            maker_fee,
            taker_fee,
            gross_cost: price * volume,
            timestamp,
        }
    }
}
