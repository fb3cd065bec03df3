/// Bubble sort may run for this many baseline linear-search durations before it is stopped.
pub const DEADLINE_MULTIPLIER: u32 = 10;

/// Initial accumulator of the djb2-style hash.
pub const DJB2_SEED: i64 = 5381;
pub const DJB2_MULTIPLIER: i64 = 33;

/// Base and modulus of the polynomial rolling hash.
pub const POLY_BASE: i64 = 53;
pub const POLY_MODULUS: i64 = 1_000_000_009;
