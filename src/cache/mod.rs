//! Time-bounded memoization primitives.
//!
//! The cache never evicts by size. Callers are expected to use it over a small,
//! fixed key space (the dashboard has 5 coins, 1 currency and 365 day values).

pub mod clock;
pub mod ttl_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ttl_cache::{Lookup, TtlCache};
