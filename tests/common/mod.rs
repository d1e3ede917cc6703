//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use blockfall::core::Field;
use blockfall::types::PieceKind;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Route engine logs through the test writer. Idempotent.
///
/// `TEST_LOG` wins over `RUST_LOG`; the default stays quiet.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Fill `row` with garbage except the `gap` columns.
pub fn fill_row_except(field: &mut Field, row: i8, gap: &[i8]) {
    for col in 0..field.width() as i8 {
        if !gap.contains(&col) {
            field.set(row, col, Some(PieceKind::Z));
        }
    }
}
