use std::time::{SystemTime, UNIX_EPOCH};

/// Current time in milliseconds since the UNIX epoch, as the monotonic
/// timestamp callers may pass to `add_order`. Ordering within a price level
/// is established by FIFO insertion order, not by this value, so wall-clock
/// jitter between calls does not affect correctness.
pub fn current_time_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
