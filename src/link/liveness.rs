//! Link liveness derivation
//!
//! Connectivity is computed on demand from the age of the last successful
//! decode instead of being maintained by a timer task. A stored flag would
//! need its own scheduled updater and would race with the receiver; deriving
//! it at read time costs each reader one subtraction.

use std::time::{Duration, Instant};

/// Default liveness timeout. Field deployments have used both 2 s and 3 s;
/// 2 s is the shipped default, overridable via `[link] timeout_secs`.
pub const DEFAULT_LIVENESS_TIMEOUT: Duration = Duration::from_secs(2);

/// True while the last update is at most `timeout` old
///
/// `None` means no frame has ever decoded, which always reads as
/// disconnected.
pub fn is_connected(last_update: Option<Instant>, now: Instant, timeout: Duration) -> bool {
    match last_update {
        Some(at) => now.saturating_duration_since(at) <= timeout,
        None => false,
    }
}
