//! Lazily materialized sorted price list, used exclusively by `can_fill`.

use rust_decimal::Decimal;

/// Direction a side's cache is kept in: descending for bids (best first),
/// ascending for asks (best first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Descending,
    Ascending,
}

/// A sorted snapshot of one side's active price keys, rebuilt on demand.
///
/// The dirty flag must flip exactly when a level is created or destroyed on
/// the owning side — never on a volume-only mutation within an existing
/// level, since that does not change which prices exist.
pub struct SortedPriceCache {
    direction: Direction,
    prices: Vec<Decimal>,
    dirty: bool,
}

impl SortedPriceCache {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            prices: Vec::new(),
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild from `keys` if dirty; otherwise a no-op. Returns the current
    /// sorted slice either way.
    pub fn rebuild_if_dirty(&mut self, keys: impl Iterator<Item = Decimal>) -> &[Decimal] {
        if self.dirty {
            self.prices.clear();
            self.prices.extend(keys);
            match self.direction {
                Direction::Descending => self.prices.sort_unstable_by(|a, b| b.cmp(a)),
                Direction::Ascending => self.prices.sort_unstable(),
            }
            self.dirty = false;
        }
        &self.prices
    }
}
