//! # matching-core
//!
//! A single-symbol limit order-book matching engine implementing continuous
//! price-time priority: best price first, ties broken by arrival order.
//!
//! ## Key features
//!
//! - **Price-time priority matching**: an indexed binary heap per side tracks
//!   the best resting price in O(1); an arena-backed FIFO per price level
//!   preserves arrival order and supports O(1) cancellation by handle.
//! - **Condition-qualified orders**: plain limit, Immediate-Or-Cancel,
//!   Book-Or-Cancel, Fill-Or-Kill, and market orders (synthesized from a
//!   zero-price limit), each with well-defined admission and rejection rules.
//! - **Maker/taker fee accounting**: every trade records the maker and taker
//!   fee owed, computed from an immutable [`config::EngineConfig`].
//! - **Decimal-exact arithmetic**: all prices, volumes, and fees are
//!   [`rust_decimal::Decimal`]; no binary floating point anywhere in the core.
//!
//! ## Scope
//!
//! This crate is the matching core only. Input framing and transport,
//! persistence and recovery, market-data dissemination, and multi-symbol
//! routing are treated as external concerns and are not implemented here. A
//! single [`engine::MatchingEngine`] instance owns exactly one symbol's book
//! and is not thread-safe — shard by symbol at a higher layer if concurrent
//! access across symbols is needed.
//!
//! ## Example
//!
//! ```
//! use matching_core::{EngineConfig, MatchingEngine, Order, Side, Condition};
//! use rust_decimal_macros::dec;
//! use uuid::Uuid;
//!
//! let mut engine = MatchingEngine::new(EngineConfig::default());
//!
//! let ask = Order::new(Uuid::new_v4(), Side::Sell, dec!(100), dec!(5), Condition::None, "mm-1", None, 0);
//! engine.add_order(ask, 0);
//!
//! let bid = Order::new(Uuid::new_v4(), Side::Buy, dec!(100), dec!(3), Condition::None, "trader-1", None, 1);
//! engine.add_order(bid, 1);
//!
//! assert_eq!(engine.trades().len(), 1);
//! assert_eq!(engine.best_ask_volume(), Some(dec!(2)));
//! ```

pub mod config;
pub mod engine;
pub mod order;
pub mod orderbook;
pub mod result_code;
pub mod trade;

mod utils;

pub use config::EngineConfig;
pub use engine::MatchingEngine;
pub use order::{CancelReason, Condition, Order, OrderId, OrderStatus, Side};
pub use orderbook::{DepthLevel, LevelSnapshot, OrderBook, OrderBookSnapshot};
pub use result_code::ResultCode;
pub use trade::TradeRecord;
pub use utils::current_time_millis;
