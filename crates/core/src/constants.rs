//! Engine-wide constants.

/// Fraction digits carried by monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Worker-pool size used when the host's parallelism cannot be read.
pub const FALLBACK_WORKERS: usize = 4;
