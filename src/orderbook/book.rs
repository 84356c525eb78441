//! The full two-sided book: bid/ask [`BookSide`]s plus a global id index.

use crate::order::{Order, OrderId, OrderStatus, Side};
use crate::orderbook::cache::Direction;
use crate::orderbook::locator::OrderLocator;
use crate::orderbook::price_level::PriceLevel;
use crate::orderbook::priority_index::Orientation;
use crate::orderbook::side::BookSide;
use crate::orderbook::snapshot::{LevelSnapshot, OrderBookSnapshot};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Aggregate view of one price level, returned by [`OrderBook::depth_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLevel {
    pub price: Decimal,
    pub volume: Decimal,
    pub last_changed: i64,
}

/// A single-symbol limit order book: two [`BookSide`]s and a global
/// order-id→location index for O(1) lookup and cancellation.
///
/// Never holds market orders (price-zero) — by the time [`OrderBook::add`] is
/// called, the caller (the matching engine) has already normalized those into
/// synthetic limits and decided whether the order may rest at all.
pub struct OrderBook {
    bids: BookSide,
    asks: BookSide,
    locators: HashMap<OrderId, OrderLocator>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(Orientation::Max, Direction::Descending),
            asks: BookSide::new(Orientation::Min, Direction::Ascending),
            locators: HashMap::new(),
        }
    }

    fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub fn best_bid_price(&self) -> Option<Decimal> {
        self.bids.best_price()
    }

    pub fn best_ask_price(&self) -> Option<Decimal> {
        self.asks.best_price()
    }

    pub fn best_bid_volume(&self) -> Option<Decimal> {
        self.bids.best_volume()
    }

    pub fn best_ask_volume(&self) -> Option<Decimal> {
        self.asks.best_volume()
    }

    /// The order at the front of the best bid level's FIFO, if any.
    pub fn best_bid_order(&self) -> Option<&Order> {
        let price = self.bids.best_price()?;
        self.bids.level(price).and_then(PriceLevel::first)
    }

    /// The order at the front of the best ask level's FIFO, if any.
    pub fn best_ask_order(&self) -> Option<&Order> {
        let price = self.asks.best_price()?;
        self.asks.level(price).and_then(PriceLevel::first)
    }

    pub fn bid_level_count(&self) -> usize {
        self.bids.level_count()
    }

    pub fn ask_level_count(&self) -> usize {
        self.asks.level_count()
    }

    pub fn total_orders(&self) -> usize {
        self.locators.len()
    }

    pub fn find(&self, id: OrderId) -> Option<&Order> {
        let locator = self.locators.get(&id)?;
        self.side(locator.side)
            .level(locator.price)
            .and_then(|level| level.get(locator.handle))
    }

    /// Price, aggregate volume, and last-change timestamp at `price` on `side`,
    /// or `None` if no level exists there.
    pub fn depth_at(&self, side: Side, price: Decimal) -> Option<DepthLevel> {
        self.side(side).level(price).map(|level| DepthLevel {
            price: level.price(),
            volume: level.total_volume(),
            last_changed: level.last_update(),
        })
    }

    /// Whether the opposing side holds enough volume at acceptable prices to
    /// satisfy `target` volume against `limit_price` (or no limit, for a
    /// market order). Used by FOK admission checks; does not mutate the book.
    pub fn can_fill(&mut self, side: Side, target: Decimal, limit_price: Option<Decimal>) -> bool {
        let taker_side = side.opposite();
        let breach: Box<dyn FnMut(Decimal) -> bool> = match (side, limit_price) {
            (_, None) => Box::new(|_| false),
            (Side::Buy, Some(limit)) => Box::new(move |p| p > limit),
            (Side::Sell, Some(limit)) => Box::new(move |p| p < limit),
        };
        self.side_mut(taker_side).can_fill(target, breach)
    }

    /// Insert a new resting order, transitioning it to `Listed`. Infallible:
    /// callers never retry or reroute on insertion, only on prior admission
    /// checks (BOC precheck, FOK precheck) performed before `add` is called.
    pub fn add(&mut self, mut order: Order, timestamp: i64) -> OrderId {
        let side = order.side;
        let price = order.price;
        let id = order.id;
        order.status = OrderStatus::Listed;

        let level = self.side_mut(side).level_or_create(price, timestamp);
        let handle = level.push_back(order, timestamp);

        self.locators.insert(
            id,
            OrderLocator {
                side,
                price,
                handle,
            },
        );
        id
    }

    /// Remove and return an order by id, evicting its level if now empty.
    pub fn remove(&mut self, id: OrderId, timestamp: i64) -> Option<Order> {
        let locator = self.locators.remove(&id)?;
        let side = self.side_mut(locator.side);
        let level = side.level_mut(locator.price)?;
        let order = level.remove(locator.handle, timestamp);
        side.evict_if_empty(locator.price);
        order
    }

    /// Record a fill of `volume` at `price` (the resting maker's price, per
    /// the maker-price rule) against the order resting at the front of
    /// `side`'s best level. Evicts the order (and its level, if now empty)
    /// once it is fully filled.
    ///
    /// Returns a snapshot of the maker order post-fill, or `None` if `side`
    /// has no resting liquidity. Called once per maker crossed during the
    /// matching engine's match loop.
    pub fn fill_best(
        &mut self,
        side: Side,
        volume: Decimal,
        price: Decimal,
        fee: Decimal,
        timestamp: i64,
    ) -> Option<Order> {
        let best_price = self.side(side).best_price()?;
        let book_side = self.side_mut(side);
        let level = book_side.level_mut(best_price)?;

        let handle = level.head_handle()?;
        {
            let maker = level.first_mut()?;
            maker.record_fill(volume, price, fee);
        }
        level.adjust_volume(-volume);

        let filled = level.get(handle).map(Order::is_filled).unwrap_or(false);
        if filled {
            let removed = level.remove(handle, timestamp)?;
            book_side.evict_if_empty(best_price);
            self.locators.remove(&removed.id);
            Some(removed)
        } else {
            level.get(handle).cloned()
        }
    }

    /// Record a fill of `volume` at `price` against the specific resting
    /// order `id`, wherever it sits in its level's FIFO (not necessarily the
    /// head — used for the taker side of a "book, then match" limit order,
    /// which may rest behind earlier same-price orders on its own side).
    /// Evicts the order (and its level, if now empty) once fully filled.
    pub fn fill_order(
        &mut self,
        id: OrderId,
        volume: Decimal,
        price: Decimal,
        fee: Decimal,
        timestamp: i64,
    ) -> Option<Order> {
        let locator = *self.locators.get(&id)?;
        let book_side = self.side_mut(locator.side);
        let level = book_side.level_mut(locator.price)?;

        {
            let resting = level.get_mut(locator.handle)?;
            resting.record_fill(volume, price, fee);
        }
        level.adjust_volume(-volume);

        let filled = level.get(locator.handle).map(Order::is_filled).unwrap_or(false);
        if filled {
            let removed = level.remove(locator.handle, timestamp)?;
            book_side.evict_if_empty(locator.price);
            self.locators.remove(&removed.id);
            Some(removed)
        } else {
            level.get(locator.handle).cloned()
        }
    }

    /// Capture a point-in-time market-data view of both sides.
    pub fn snapshot(&mut self, timestamp: i64) -> OrderBookSnapshot {
        let to_snapshots = |rows: Vec<(Decimal, Decimal, usize)>| {
            rows.into_iter()
                .map(|(price, volume, order_count)| LevelSnapshot {
                    price,
                    volume,
                    order_count,
                })
                .collect()
        };
        OrderBookSnapshot {
            timestamp,
            bids: to_snapshots(self.bids.levels_sorted()),
            asks: to_snapshots(self.asks.levels_sorted()),
        }
    }
}
