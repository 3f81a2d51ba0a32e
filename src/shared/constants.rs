// =============================================================================
// METADATA KEYS
// =============================================================================

/// Metadata key holding the ISO-8601 timestamp of the last refresh cycle
pub const LAST_REFRESHED_AT_KEY: &str = "last_refreshed_at";

// =============================================================================
// GDP ESTIMATE
// =============================================================================

/// Lower bound (inclusive) of the per-country GDP multiplier
pub const GDP_MULTIPLIER_MIN: f64 = 1000.0;

/// Upper bound (exclusive) of the per-country GDP multiplier
pub const GDP_MULTIPLIER_MAX: f64 = 2000.0;

// =============================================================================
// SUMMARY IMAGE
// =============================================================================

/// Number of countries listed in the summary image
pub const SUMMARY_TOP_COUNTRIES: usize = 5;
