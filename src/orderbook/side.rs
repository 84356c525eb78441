//! One half of the book: the price index, level map, and cache for a single side.

use crate::orderbook::cache::{Direction, SortedPriceCache};
use crate::orderbook::price_level::PriceLevel;
use crate::orderbook::priority_index::{Orientation, PriorityIndex};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The bid half or the ask half of an [`crate::orderbook::book::OrderBook`].
///
/// Composes a [`PriorityIndex`] (best-price peek), a price→[`PriceLevel`] map
/// (order storage), and a [`SortedPriceCache`] (amortized cumulative-liquidity
/// walks). A core invariant ties these three together: a price is in the
/// index iff its level exists and is non-empty.
pub struct BookSide {
    index: PriorityIndex,
    levels: HashMap<Decimal, PriceLevel>,
    cache: SortedPriceCache,
}

impl BookSide {
    pub fn new(orientation: Orientation, direction: Direction) -> Self {
        Self {
            index: PriorityIndex::new(orientation),
            levels: HashMap::new(),
            cache: SortedPriceCache::new(direction),
        }
    }

    pub fn best_price(&self) -> Option<Decimal> {
        self.index.peek()
    }

    pub fn best_volume(&self) -> Option<Decimal> {
        let price = self.best_price()?;
        self.levels.get(&price).map(PriceLevel::total_volume)
    }

    pub fn level(&self, price: Decimal) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    pub fn level_mut(&mut self, price: Decimal) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get-or-create the level at `price`, inserting into the priority index
    /// and marking the cache dirty the first time this price appears.
    pub fn level_or_create(&mut self, price: Decimal, timestamp: i64) -> &mut PriceLevel {
        if !self.levels.contains_key(&price) {
            self.index.insert(price);
            self.cache.mark_dirty();
            self.levels.insert(price, PriceLevel::new(price, timestamp));
        }
        self.levels.get_mut(&price).expect("just inserted")
    }

    /// Drop a level that has become empty: remove it from the map and the
    /// priority index, and mark the cache dirty. No-op if still non-empty.
    pub fn evict_if_empty(&mut self, price: Decimal) {
        if let Some(level) = self.levels.get(&price) {
            if level.is_empty() {
                self.levels.remove(&price);
                self.index.remove(price);
                self.cache.mark_dirty();
            }
        }
    }

    /// Snapshot each level in priority order as `(price, total_volume, order_count)`.
    pub fn levels_sorted(&mut self) -> Vec<(Decimal, Decimal, usize)> {
        let levels = &self.levels;
        let prices = self
            .cache
            .rebuild_if_dirty(levels.keys().copied())
            .to_vec();
        prices
            .into_iter()
            .filter_map(|p| {
                self.levels
                    .get(&p)
                    .map(|l| (p, l.total_volume(), l.iter().count()))
            })
            .collect()
    }

    /// Walk prices in priority order (rebuilding the cache if dirty),
    /// accumulating volume until `target` is met or the limit is breached.
    ///
    /// `limit_breached` receives each candidate price and returns whether it
    /// fails the caller's limit (at which point the walk stops, since prices
    /// are visited in priority order and no later price can pass either).
    pub fn can_fill(
        &mut self,
        target: Decimal,
        mut limit_breached: impl FnMut(Decimal) -> bool,
    ) -> bool {
        let levels = &self.levels;
        let prices = self
            .cache
            .rebuild_if_dirty(levels.keys().copied())
            .to_vec();

        let mut cumulative = Decimal::ZERO;
        for price in prices {
            if limit_breached(price) {
                return false;
            }
            if let Some(level) = self.levels.get(&price) {
                cumulative += level.total_volume();
                if cumulative >= target {
                    return true;
                }
            }
        }
        false
    }
}
