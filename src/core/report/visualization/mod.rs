//! Chart geometry for the HTML dashboard
//!
//! The radial diagram lives in [`crate::core::radial`]; this module holds the
//! remaining chart layouts.

pub mod driver_chart;

pub use driver_chart::{ChartBar, DriverChart, Tick};
