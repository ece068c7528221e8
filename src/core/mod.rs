//! Core module: dataset model, view builders and report generation

pub mod loader;
pub mod matrix;
pub mod models;
pub mod radial;
pub mod report;
pub mod sentiment;
pub mod story;
