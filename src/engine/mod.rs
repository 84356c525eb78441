//! The matching engine: the state machine that turns admitted orders into trades.

mod fees;
mod matching;

pub use matching::MatchingEngine;
