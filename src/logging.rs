//! Tracing setup for the binary.
//!
//! The terminal belongs to the renderer, so logs only go to a file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::HostConfig;

/// Install a file-backed subscriber when `log_path` is set.
///
/// Returns `Ok(false)` when logging stays disabled.
pub fn init(config: &HostConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path}"))?;

    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log filter {:?}", config.log_level))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing tracing subscriber")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_path() {
        let config = HostConfig {
            log_path: None,
            ..HostConfig::default()
        };
        assert!(!init(&config).unwrap());
    }
}
