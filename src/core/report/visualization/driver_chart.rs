//! Horizontal bar chart geometry for the negative-driver phrases
//!
//! Computes bar positions and axis ticks once in Rust so the HTML template
//! only has to emit SVG elements.

use crate::core::story::{max_driver_count, DriverBar};

/// Space reserved left of the bars for phrase labels
pub const LABEL_WIDTH: f64 = 170.0;
/// Height of one bar
pub const BAR_HEIGHT: f64 = 22.0;
/// Vertical gap between bars
pub const BAR_GAP: f64 = 8.0;
/// Space below the bars for ticks and the axis title
pub const AXIS_HEIGHT: f64 = 40.0;
/// Axis title
pub const AXIS_TITLE: &str = "Frequency in Negative Reviews";
/// Bar fill
pub const BAR_FILL: &str = "rgba(239, 68, 68, 0.7)";
/// Bar outline
pub const BAR_STROKE: &str = "#ef4444";

/// One positioned bar
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    /// Top edge
    pub y: f64,
    /// Vertical middle, where the label sits
    pub label_y: f64,
    /// Bar length in pixels
    pub length: f64,
    /// Phrase shown as the label
    pub label: String,
    /// Citation count
    pub count: u64,
    /// Hover text
    pub tooltip: String,
    /// Example comment, shown under the tooltip
    pub context: String,
}

/// One x-axis tick
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Offset from the start of the plot area
    pub x: f64,
    /// Tick value
    pub label: String,
}

/// Complete chart layout
#[derive(Debug, Clone, PartialEq)]
pub struct DriverChart {
    /// SVG width
    pub width: f64,
    /// SVG height
    pub height: f64,
    /// Width of the plot area right of the labels
    pub plot_width: f64,
    /// Bars in input order
    pub bars: Vec<ChartBar>,
    /// Axis ticks, starting at 0
    pub ticks: Vec<Tick>,
}

/// A 1-2-5 step giving at most five intervals up to `max`
#[must_use]
pub fn nice_step(max: u64) -> u64 {
    if max == 0 {
        return 1;
    }
    let raw = max.div_ceil(5);
    let mut magnitude = 1;
    while magnitude * 10 <= raw {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(magnitude * 10)
}

impl DriverChart {
    /// Lay out `drivers` in a chart `width` pixels wide
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn layout(drivers: &[DriverBar], width: f64) -> Self {
        let plot_width = (width - LABEL_WIDTH).max(0.0);
        let max = max_driver_count(drivers);
        let step = nice_step(max);
        let axis_max = max.div_ceil(step).max(1) * step;
        let scale = |value: u64| value as f64 / axis_max as f64 * plot_width;

        let bars = drivers
            .iter()
            .enumerate()
            .map(|(i, d)| ChartBar {
                y: i as f64 * (BAR_HEIGHT + BAR_GAP),
                label_y: i as f64 * (BAR_HEIGHT + BAR_GAP) + BAR_HEIGHT / 2.0,
                length: scale(d.count),
                label: d.phrase.clone(),
                count: d.count,
                tooltip: d.tooltip(),
                context: d.context.clone(),
            })
            .collect::<Vec<_>>();

        let ticks = if bars.is_empty() {
            Vec::new()
        } else {
            (0..=axis_max / step)
                .map(|i| Tick {
                    x: scale(i * step),
                    label: (i * step).to_string(),
                })
                .collect()
        };

        let rows = bars.len() as f64;
        Self {
            width,
            height: rows * (BAR_HEIGHT + BAR_GAP) + AXIS_HEIGHT,
            plot_width,
            bars,
            ticks,
        }
    }

    /// Y position of the axis line
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn axis_y(&self) -> f64 {
        self.bars.len() as f64 * (BAR_HEIGHT + BAR_GAP)
    }

    /// Baseline of the tick labels
    #[must_use]
    pub fn tick_y(&self) -> f64 {
        self.axis_y() + 14.0
    }

    /// Baseline of the axis title
    #[must_use]
    pub fn title_y(&self) -> f64 {
        self.axis_y() + 32.0
    }

    /// Horizontal center of the plot area
    #[must_use]
    pub fn title_x(&self) -> f64 {
        self.plot_width / 2.0
    }
}
