//! The order-lifecycle state machine: normalize, admit, match, emit trades.

use crate::config::EngineConfig;
use crate::engine::fees::compute_fee;
use crate::order::{CancelReason, Condition, Order, OrderId, Side};
use crate::orderbook::{DepthLevel, OrderBook, OrderBookSnapshot};
use crate::result_code::ResultCode;
use crate::trade::TradeRecord;
use crate::utils::current_time_millis;
use rust_decimal::Decimal;
use tracing::{debug, trace};

/// The matching engine for a single symbol: owns an [`OrderBook`] and an
/// immutable [`EngineConfig`], and is the sole entry point for order
/// admission and cancellation.
pub struct MatchingEngine {
    book: OrderBook,
    config: EngineConfig,
    trades: Vec<TradeRecord>,
}

impl MatchingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            book: OrderBook::new(),
            config,
            trades: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Trades emitted so far, in emission order.
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn best_bid_price(&self) -> Option<Decimal> {
        self.book.best_bid_price()
    }

    pub fn best_ask_price(&self) -> Option<Decimal> {
        self.book.best_ask_price()
    }

    pub fn best_bid_volume(&self) -> Option<Decimal> {
        self.book.best_bid_volume()
    }

    pub fn best_ask_volume(&self) -> Option<Decimal> {
        self.book.best_ask_volume()
    }

    pub fn bid_level_count(&self) -> usize {
        self.book.bid_level_count()
    }

    pub fn ask_level_count(&self) -> usize {
        self.book.ask_level_count()
    }

    pub fn total_orders(&self) -> usize {
        self.book.total_orders()
    }

    pub fn depth_at(&self, side: Side, price: Decimal) -> Option<DepthLevel> {
        self.book.depth_at(side, price)
    }

    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.book.find(id)
    }

    pub fn snapshot(&mut self, timestamp: i64) -> OrderBookSnapshot {
        self.book.snapshot(timestamp)
    }

    /// Admit a new order. Validates, normalizes a market order, applies its
    /// condition, runs the match loop, and returns the terminal [`ResultCode`].
    ///
    /// `order` is consumed; its final status and fill figures are retrievable
    /// afterward via [`MatchingEngine::find`] if it ended up resting, or must
    /// be read from the caller's own copy otherwise (the engine does not hand
    /// back rejected or fully-matched orders — only their `ResultCode`).
    pub fn add_order(&mut self, mut order: Order, timestamp: i64) -> ResultCode {
        if order.remaining < Decimal::ZERO || order.price < Decimal::ZERO {
            order.reject(CancelReason::Invalid);
            return ResultCode::OrderInvalid;
        }

        let is_market = order.is_market();
        if is_market && order.condition == Condition::None {
            order.condition = Condition::Ioc;
        }
        let effective_price = if is_market {
            match order.side {
                Side::Buy => Decimal::MAX,
                Side::Sell => Decimal::ZERO,
            }
        } else {
            order.price
        };
        let limit_for_check = if is_market { None } else { Some(effective_price) };

        trace!(
            side = ?order.side,
            price = %order.price,
            volume = %order.remaining,
            condition = ?order.condition,
            "admitting order"
        );

        match order.condition {
            Condition::Boc => {
                if self.would_cross(order.side, effective_price) {
                    order.reject(CancelReason::BookOrCancel);
                    return ResultCode::BOCCannotBook;
                }
                self.book.add(order, timestamp);
                ResultCode::OrderAccepted
            }
            Condition::Fok => {
                if !self.book.can_fill(order.side, order.remaining, limit_for_check) {
                    order.reject(CancelReason::FillOrKill);
                    return ResultCode::FOKCannotFill;
                }
                self.run_match_loop(&mut order, effective_price, timestamp);
                debug_assert!(order.is_filled(), "FOK precheck passed but order not exhausted");
                if !order.is_filled() {
                    return ResultCode::SystemError;
                }
                ResultCode::OrderAccepted
            }
            Condition::Ioc => {
                self.run_match_loop(&mut order, effective_price, timestamp);
                if order.remaining > Decimal::ZERO {
                    if is_market && order.cumulative_cost == Decimal::ZERO {
                        order.reject(CancelReason::NoLiquidity);
                        return ResultCode::MarketNoLiquidity;
                    }
                    order.cancel(CancelReason::ImmediateOrCancel);
                }
                ResultCode::OrderAccepted
            }
            Condition::None => {
                self.book.add(order.clone(), timestamp);
                self.run_match_loop_booked(order.id, order.side, effective_price, timestamp);
                ResultCode::OrderAccepted
            }
        }
    }

    /// Cancel a resting order by id.
    pub fn cancel_order(&mut self, id: OrderId) -> ResultCode {
        match self.book.remove(id, current_time_millis()) {
            Some(mut order) => {
                order.cancel(CancelReason::UserRequested);
                debug!(order_id = %id, "cancel accepted");
                ResultCode::CancelAccepted
            }
            None => ResultCode::OrderNotExists,
        }
    }

    /// True iff an order on `side` at `price` would immediately cross the
    /// opposite side's best price (the BOC precheck is intentionally non-strict).
    fn would_cross(&self, side: Side, price: Decimal) -> bool {
        match side {
            Side::Buy => self.book.best_ask_price().is_some_and(|ask| ask <= price),
            Side::Sell => self.book.best_bid_price().is_some_and(|bid| bid >= price),
        }
    }

    /// Run the match loop against a not-yet-booked order (IOC, FOK, market).
    fn run_match_loop(&mut self, order: &mut Order, limit_price: Decimal, timestamp: i64) {
        loop {
            if order.is_filled() {
                break;
            }
            let opposite = order.side.opposite();
            let Some(resting_price) = self.book_best_price(opposite) else {
                break;
            };
            if !crosses(order.side, limit_price, resting_price) {
                break;
            }
            self.execute_one_match(order, opposite, resting_price, timestamp);
        }
    }

    /// Run the match loop for an order that is already resting in the book
    /// (the "book, then match" discipline for plain limit orders).
    /// Pulls the incoming order's live state from the book each iteration so
    /// its remaining volume reflects prior fills.
    fn run_match_loop_booked(&mut self, id: OrderId, side: Side, limit_price: Decimal, timestamp: i64) {
        loop {
            let Some(incoming) = self.book.find(id) else {
                break;
            };
            if incoming.is_filled() {
                break;
            }
            let opposite = side.opposite();
            let Some(resting_price) = self.book_best_price(opposite) else {
                break;
            };
            if !crosses(side, limit_price, resting_price) {
                break;
            }

            let remaining = incoming.remaining;
            let maker_price = resting_price;
            let maker_remaining = self.book_best_order_remaining(opposite).unwrap_or(Decimal::ZERO);
            let match_volume = remaining.min(maker_remaining);
            if match_volume <= Decimal::ZERO {
                break;
            }

            let taker_fee = compute_fee(side, match_volume, maker_price, self.config.taker_fee_rate, self.config.price_precision);
            let maker_fee = compute_fee(opposite, match_volume, maker_price, self.config.maker_fee_rate, self.config.price_precision);

            let maker = self
                .book
                .fill_best(opposite, match_volume, maker_price, maker_fee, timestamp)
                .expect("resting order present after crossing check");

            let taker_after = self
                .book
                .fill_order(id, match_volume, maker_price, taker_fee, timestamp);

            self.emit_trade(side, &maker, match_volume, maker_price, maker_fee, taker_fee, taker_after.as_ref(), id, timestamp);

            if self.book.find(id).is_none() {
                break;
            }
        }
    }

    fn book_best_price(&self, side: Side) -> Option<Decimal> {
        match side {
            Side::Buy => self.book.best_bid_price(),
            Side::Sell => self.book.best_ask_price(),
        }
    }

    fn book_best_order_remaining(&self, side: Side) -> Option<Decimal> {
        match side {
            Side::Buy => self.book.best_bid_order().map(|o| o.remaining),
            Side::Sell => self.book.best_ask_order().map(|o| o.remaining),
        }
    }

    /// Execute a single match between `order` (not yet booked) and the best
    /// resting order on `opposite`, mutating `order` in place and the book,
    /// and emitting a trade record.
    fn execute_one_match(&mut self, order: &mut Order, opposite: Side, maker_price: Decimal, timestamp: i64) {
        let maker_remaining = self
            .book_best_order_remaining(opposite)
            .unwrap_or(Decimal::ZERO);
        let match_volume = order.remaining.min(maker_remaining);
        if match_volume <= Decimal::ZERO {
            debug_assert!(false, "crossing check passed with zero-volume maker");
            return;
        }

        let taker_fee = compute_fee(order.side, match_volume, maker_price, self.config.taker_fee_rate, self.config.price_precision);
        let maker_fee = compute_fee(opposite, match_volume, maker_price, self.config.maker_fee_rate, self.config.price_precision);

        order.record_fill(match_volume, maker_price, taker_fee);

        let maker = self
            .book
            .fill_best(opposite, match_volume, maker_price, maker_fee, timestamp)
            .expect("resting order present after crossing check");

        self.emit_trade(
            order.side,
            &maker,
            match_volume,
            maker_price,
            maker_fee,
            taker_fee,
            Some(&*order),
            order.id,
            timestamp,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_trade(
        &mut self,
        aggressor_side: Side,
        maker: &Order,
        volume: Decimal,
        price: Decimal,
        maker_fee: Decimal,
        taker_fee: Decimal,
        taker_after: Option<&Order>,
        taker_id: OrderId,
        timestamp: i64,
    ) {
        let (bid_order_id, ask_order_id) = match aggressor_side {
            Side::Buy => (taker_id, maker.id),
            Side::Sell => (maker.id, taker_id),
        };
        let aggressor_remaining = taker_after.map(|o| o.remaining).filter(|r| *r > Decimal::ZERO);
        let trade = TradeRecord::new(
            maker.id,
            taker_id,
            bid_order_id,
            ask_order_id,
            price,
            volume,
            aggressor_remaining,
            aggressor_side,
            maker_fee,
            taker_fee,
            timestamp,
        );
        debug!(
            price = %trade.price,
            volume = %trade.volume,
            maker_id = %trade.maker_order_id,
            taker_id = %trade.taker_order_id,
            "trade executed"
        );
        self.trades.push(trade);
    }
}

fn crosses(side: Side, incoming_price: Decimal, resting_price: Decimal) -> bool {
    match side {
        Side::Buy => resting_price <= incoming_price,
        Side::Sell => resting_price >= incoming_price,
    }
}
