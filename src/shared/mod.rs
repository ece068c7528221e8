//! Shared module for functionality used across the library and the CLI

pub mod config;

/// Returns the current version of the `PulseDash` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
