//! Age-based eviction policy

use std::time::{Duration, SystemTime};

/// Age of an entry last modified at `modified`, as seen at `now`.
///
/// A modification time in the future (clock skew, restored backup) clamps
/// to zero rather than going negative, so such entries are never eligible.
pub fn age_of(modified: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}

/// Whether an entry of the given age has outlived its retention.
///
/// A zero retention means always eligible: the entry is removed on the
/// next pass regardless of age.
pub fn is_expired(age: Duration, retention: Duration) -> bool {
    age >= retention
}
