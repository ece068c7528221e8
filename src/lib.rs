//! Shared library for `PulseDash`
//! Contains the dataset model, view builders and report writers used by the CLI

pub mod core;
pub mod logger;
pub mod shared;

pub use shared::*;
