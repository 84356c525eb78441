//! Order entity: the unit of work accepted, matched, and cancelled by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque 128-bit order identifier.
pub type OrderId = Uuid;

/// Which book side an order rests on or crosses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buyer: rests on the bid side, crosses into the ask side.
    Buy,
    /// Seller: rests on the ask side, crosses into the bid side.
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl Side {
    /// The opposite side of the book.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Execution condition requested on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Ordinary resting limit order; no special handling.
    None,
    /// Immediate-Or-Cancel: execute whatever is possible now, cancel the remainder.
    Ioc,
    /// Book-Or-Cancel: must not cross on entry, or it is rejected.
    Boc,
    /// Fill-Or-Kill: fully executable on entry or rejected outright.
    Fok,
}

/// Terminal or intermediate lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created by the caller, not yet handed to the engine.
    Prepared,
    /// Resting in the book with remaining volume.
    Listed,
    /// Matched at least once this invocation but not yet terminal.
    Matched,
    /// Remaining volume reached zero.
    Filled,
    /// Removed from the book before being filled.
    Cancelled,
    /// Never admitted to the book.
    Rejected,
}

/// Why an order left the book without being fully filled, or was never admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancelReason {
    /// Explicit `cancel_order` call.
    UserRequested,
    /// IOC order could not fully fill and its remainder was discarded.
    ImmediateOrCancel,
    /// BOC order would have crossed on entry.
    BookOrCancel,
    /// FOK order could not be fully filled on entry.
    FillOrKill,
    /// Market order found no crossable liquidity at all.
    NoLiquidity,
    /// Malformed input (negative volume/price, null field, etc).
    Invalid,
}

/// A single order: caller-constructed, engine-owned once admitted.
///
/// `price` of zero on entry signals a market order (see [`crate::engine::MatchingEngine`]
/// normalization); it is never persisted back into the book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub remaining: Decimal,
    pub condition: Condition,
    pub cumulative_cost: Decimal,
    pub cumulative_fee: Decimal,
    pub status: OrderStatus,
    pub cancel_reason: Option<CancelReason>,
    /// Pass-through only; reserved for a future self-match-prevention policy.
    pub owner: String,
    /// Pass-through only; not wired to any fee schedule lookup.
    pub fee_class: Option<String>,
    /// Caller-supplied monotonic arrival timestamp, in milliseconds.
    pub arrival_timestamp: i64,
}

impl Order {
    /// Construct a new order in the `Prepared` state.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        side: Side,
        price: Decimal,
        volume: Decimal,
        condition: Condition,
        owner: impl Into<String>,
        fee_class: Option<String>,
        arrival_timestamp: i64,
    ) -> Self {
        Self {
            id,
            side,
            price,
            remaining: volume,
            condition,
            cumulative_cost: Decimal::ZERO,
            cumulative_fee: Decimal::ZERO,
            status: OrderStatus::Prepared,
            cancel_reason: None,
            owner: owner.into(),
            fee_class,
            arrival_timestamp,
        }
    }

    /// True iff no remaining volume is left to match.
    pub fn is_filled(&self) -> bool {
        self.remaining.is_zero()
    }

    /// True iff `price` is zero, i.e. this order is a market order on entry.
    pub fn is_market(&self) -> bool {
        self.price.is_zero()
    }

    pub(crate) fn reject(&mut self, reason: CancelReason) {
        self.status = OrderStatus::Rejected;
        self.cancel_reason = Some(reason);
    }

    pub(crate) fn cancel(&mut self, reason: CancelReason) {
        self.status = OrderStatus::Cancelled;
        self.cancel_reason = Some(reason);
    }

    pub(crate) fn record_fill(&mut self, volume: Decimal, price: Decimal, fee: Decimal) {
        self.remaining -= volume;
        self.cumulative_cost += price * volume;
        self.cumulative_fee += fee;
        self.status = if self.is_filled() {
            OrderStatus::Filled
        } else {
            OrderStatus::Matched
        };
    }
}
