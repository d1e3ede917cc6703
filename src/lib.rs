//! blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{core,input,term,types}`
//! and hosts the binary's configuration and logging setup.

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::HostConfig;
