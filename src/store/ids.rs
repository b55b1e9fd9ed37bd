use std::fmt;
use std::str::FromStr;

use chrono::Utc;

use crate::models::ProductId;

/// Source of fresh product ids.
///
/// The store hands over its high-water mark (the largest id it has ever
/// held). Implementations must return an id strictly greater than it, which
/// keeps new ids distinct from every live record whatever the strategy.
pub trait IdAllocator: Send + Sync {
    fn allocate(&self, high_water: ProductId) -> ProductId;
}

/// Monotonic counter: `1, 2, 3, ...` continuing after the seed records.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceAllocator;

impl IdAllocator for SequenceAllocator {
    fn allocate(&self, high_water: ProductId) -> ProductId {
        high_water.next()
    }
}

/// Epoch milliseconds at creation time. Two creates inside the same
/// millisecond (or a clock that stepped backwards) fall back to
/// `high_water + 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampAllocator;

impl IdAllocator for TimestampAllocator {
    fn allocate(&self, high_water: ProductId) -> ProductId {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        ProductId(now_ms).max(high_water.next())
    }
}

/// Allocation strategy selectable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    #[default]
    Sequence,
    Timestamp,
}

impl IdStrategy {
    pub fn allocator(self) -> Box<dyn IdAllocator> {
        match self {
            IdStrategy::Sequence => Box::new(SequenceAllocator),
            IdStrategy::Timestamp => Box::new(TimestampAllocator),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Sequence => f.write_str("sequence"),
            IdStrategy::Timestamp => f.write_str("timestamp"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown id strategy {0:?} (expected \"sequence\" or \"timestamp\")")]
pub struct UnknownIdStrategy(pub String);

impl FromStr for IdStrategy {
    type Err = UnknownIdStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequence" => Ok(IdStrategy::Sequence),
            "timestamp" => Ok(IdStrategy::Timestamp),
            _ => Err(UnknownIdStrategy(s.to_string())),
        }
    }
}
