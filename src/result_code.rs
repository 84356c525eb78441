//! Wire-stable numeric result codes returned by every public engine operation.

use serde::{Deserialize, Serialize};

/// Outcome of `add_order`/`cancel_order`. Discriminants are part of the wire
/// contract and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResultCode {
    OrderAccepted = 1,
    CancelAccepted = 2,
    OrderValid = 3,
    OrderNotExists = 11,
    OrderInvalid = 12,
    BOCCannotBook = 31,
    FOKCannotFill = 32,
    IOCCannotFill = 33,
    MarketNoLiquidity = 34,
    SystemError = 99,
}

impl ResultCode {
    /// The stable numeric tag for this code.
    pub fn code(self) -> u8 {
        self as u8
    }
}
