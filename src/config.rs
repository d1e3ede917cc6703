//! Host configuration read from the environment.
//!
//! Every variable is optional; missing or unparsable values fall back to the
//! defaults silently.

use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_FRAME_MS: u64 = 16;
pub const DEFAULT_SOFT_DROP_RELEASE_MS: u32 = blockfall_input::DEFAULT_RELEASE_TIMEOUT_MS;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Seed for the piece generator of the first game.
    pub seed: u32,
    /// Log file; no subscriber is installed without one.
    pub log_path: Option<String>,
    /// `EnvFilter` directive string.
    pub log_level: String,
    /// Upper bound on the input poll timeout, i.e. the redraw cadence.
    pub frame_ms: u64,
    /// Soft-drop hold timeout on terminals without key release events.
    pub soft_drop_release_ms: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            log_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            frame_ms: DEFAULT_FRAME_MS,
            soft_drop_release_ms: DEFAULT_SOFT_DROP_RELEASE_MS,
        }
    }
}

impl HostConfig {
    /// Create from `BLOCKFALL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let log_path = non_empty("BLOCKFALL_LOG_PATH");

        let log_level =
            non_empty("BLOCKFALL_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let frame_ms = non_empty("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_FRAME_MS);

        let soft_drop_release_ms = non_empty("BLOCKFALL_SOFT_DROP_RELEASE_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SOFT_DROP_RELEASE_MS);

        Self {
            seed,
            log_path,
            log_level,
            frame_ms,
            soft_drop_release_ms,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
