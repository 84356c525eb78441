//! Immutable engine configuration, supplied once at construction.

use rust_decimal::Decimal;

/// Construction-time configuration for a [`crate::engine::MatchingEngine`].
///
/// Every field is immutable for the lifetime of the engine; there is no
/// runtime reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Reserved for future tick-size validation; not enforced by the core.
    pub step_size: Decimal,
    /// Decimal places used when rounding fees.
    pub price_precision: u32,
    /// Fee rate charged to the resting (maker) side of a trade.
    pub maker_fee_rate: Decimal,
    /// Fee rate charged to the incoming (taker) side of a trade.
    pub taker_fee_rate: Decimal,
}

impl EngineConfig {
    /// Build a new configuration. Panics in debug builds if any rate or the
    /// step size is negative — these are programmer errors, not runtime ones.
    pub fn new(
        step_size: Decimal,
        price_precision: u32,
        maker_fee_rate: Decimal,
        taker_fee_rate: Decimal,
    ) -> Self {
        debug_assert!(step_size >= Decimal::ZERO, "step_size must be non-negative");
        debug_assert!(
            maker_fee_rate >= Decimal::ZERO,
            "maker_fee_rate must be non-negative"
        );
        debug_assert!(
            taker_fee_rate >= Decimal::ZERO,
            "taker_fee_rate must be non-negative"
        );
        Self {
            step_size,
            price_precision,
            maker_fee_rate,
            taker_fee_rate,
        }
    }
}

impl Default for EngineConfig {
    /// Zero fees, no tick rounding, cent precision — a reasonable default for tests.
    fn default() -> Self {
        Self::new(Decimal::ZERO, 2, Decimal::ZERO, Decimal::ZERO)
    }
}
