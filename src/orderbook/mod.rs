//! The order book: price-time priority storage for one symbol's resting orders.

mod book;
mod cache;
mod locator;
mod price_level;
mod priority_index;
mod side;
mod snapshot;

pub use book::{DepthLevel, OrderBook};
pub use price_level::LevelHandle;
pub use snapshot::{LevelSnapshot, OrderBookSnapshot};
