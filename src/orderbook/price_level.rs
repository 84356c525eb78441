//! FIFO queue of orders resting at one price, with O(1) removal by handle.

use crate::order::Order;
use rust_decimal::Decimal;

/// A stable handle into a [`PriceLevel`]'s internal arena. Opaque to callers;
/// only valid for the level that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelHandle(usize);

struct Slot {
    order: Order,
    prev: Option<usize>,
    next: Option<usize>,
}

/// All resting orders at one price, in arrival order.
///
/// Orders live in a small arena (`Vec<Option<Slot>>`) linked by `prev`/`next`
/// indices, so `remove` by handle does not need to scan or shift the queue.
pub struct PriceLevel {
    price: Decimal,
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    total_volume: Decimal,
    last_update: i64,
}

impl PriceLevel {
    pub fn new(price: Decimal, timestamp: i64) -> Self {
        Self {
            price,
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            total_volume: Decimal::ZERO,
            last_update: timestamp,
        }
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn total_volume(&self) -> Decimal {
        self.total_volume
    }

    pub fn last_update(&self) -> i64 {
        self.last_update
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The resting order at the head of the FIFO, without removing it.
    pub fn first(&self) -> Option<&Order> {
        self.head.and_then(|h| self.slots[h].as_ref()).map(|s| &s.order)
    }

    pub fn first_mut(&mut self) -> Option<&mut Order> {
        if let Some(h) = self.head {
            self.slots[h].as_mut().map(|s| &mut s.order)
        } else {
            None
        }
    }

    pub fn get(&self, handle: LevelHandle) -> Option<&Order> {
        self.slots.get(handle.0).and_then(|s| s.as_ref()).map(|s| &s.order)
    }

    pub fn get_mut(&mut self, handle: LevelHandle) -> Option<&mut Order> {
        self.slots.get_mut(handle.0).and_then(|s| s.as_mut()).map(|s| &mut s.order)
    }

    /// The handle of the order at the head of the FIFO, if any.
    pub fn head_handle(&self) -> Option<LevelHandle> {
        self.head.map(LevelHandle)
    }

    /// Add `delta` (positive or negative) to `total_volume` directly, without
    /// touching the FIFO. Used when a fill is recorded on the order in place
    /// rather than through `push_back`/`remove`.
    pub fn adjust_volume(&mut self, delta: Decimal) {
        self.total_volume += delta;
    }

    /// Push a new order to the back of the FIFO. O(1) amortized.
    pub fn push_back(&mut self, order: Order, timestamp: i64) -> LevelHandle {
        self.total_volume += order.remaining;
        let idx = match self.free.pop() {
            Some(idx) => idx,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };

        self.slots[idx] = Some(Slot {
            order,
            prev: self.tail,
            next: None,
        });

        if let Some(tail) = self.tail {
            self.slots[tail].as_mut().unwrap().next = Some(idx);
        } else {
            self.head = Some(idx);
        }
        self.tail = Some(idx);
        self.last_update = timestamp;

        LevelHandle(idx)
    }

    /// Remove the order at `handle`, decrementing `total_volume` by its
    /// remaining volume at the time of removal. O(1).
    pub fn remove(&mut self, handle: LevelHandle, timestamp: i64) -> Option<Order> {
        let slot = self.slots.get_mut(handle.0)?.take()?;
        self.total_volume -= slot.order.remaining;
        self.last_update = timestamp;

        match slot.prev {
            Some(p) => self.slots[p].as_mut().unwrap().next = slot.next,
            None => self.head = slot.next,
        }
        match slot.next {
            Some(n) => self.slots[n].as_mut().unwrap().prev = slot.prev,
            None => self.tail = slot.prev,
        }
        self.free.push(handle.0);

        Some(slot.order)
    }

    /// Iterate orders head-to-tail (arrival order).
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let idx = cursor?;
            let slot = self.slots[idx].as_ref()?;
            cursor = slot.next;
            Some(&slot.order)
        })
    }
}
