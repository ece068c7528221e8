//! Sentiment classification, color bands and display formatting shared by all views

use std::fmt::{self, Write};

/// Coarse sentiment class of a matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// "Very Positive"
    VeryPositive,
    /// "Positive"
    Positive,
    /// "Neutral" or "Mixed"
    Neutral,
    /// "Negative"
    Negative,
    /// "Very Negative"
    VeryNegative,
    /// No cell, or an unrecognized label
    Missing,
}

impl Bucket {
    /// Classify a free-form bucket label. The "very" forms are checked first.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("very positive") {
            Self::VeryPositive
        } else if label.contains("very negative") {
            Self::VeryNegative
        } else if label.contains("positive") {
            Self::Positive
        } else if label.contains("negative") {
            Self::Negative
        } else if label.contains("neutral") || label.contains("mixed") {
            Self::Neutral
        } else {
            Self::Missing
        }
    }

    /// Classify an optional label; `None` is [`Bucket::Missing`]
    #[must_use]
    pub fn classify_opt(label: Option<&str>) -> Self {
        label.map_or(Self::Missing, Self::classify)
    }

    /// CSS class of the cell
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::VeryPositive => "very-positive",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::VeryNegative => "very-negative",
            Self::Missing => "missing",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryPositive => "Very Positive",
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::VeryNegative => "Very Negative",
            Self::Missing => "No Data",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accent color of a quote or badge, expressed as a CSS variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// `--sent-v-pos`
    VeryPositive,
    /// `--sent-pos`
    Positive,
    /// `--sent-neu`
    Neutral,
    /// `--sent-neg`
    Negative,
    /// `--sent-v-neg`
    VeryNegative,
}

impl Tone {
    /// CSS `var(...)` expression for the tone
    #[must_use]
    pub const fn css_var(self) -> &'static str {
        match self {
            Self::VeryPositive => "var(--sent-v-pos)",
            Self::Positive => "var(--sent-pos)",
            Self::Neutral => "var(--sent-neu)",
            Self::Negative => "var(--sent-neg)",
            Self::VeryNegative => "var(--sent-v-neg)",
        }
    }
}

/// Tone of an individual verbatim, from its bucket label
#[must_use]
pub fn quote_tone(label: &str) -> Tone {
    let label = label.to_lowercase();
    if label.contains("very positive") {
        Tone::VeryPositive
    } else if label.contains("positive") {
        Tone::Positive
    } else if label.contains("very negative") {
        Tone::VeryNegative
    } else if label.contains("negative") {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Tone of the score badge in the cell detail (no "very" distinction)
#[must_use]
pub fn badge_tone(label: &str) -> Tone {
    let label = label.to_lowercase();
    if label.contains("negative") {
        Tone::Negative
    } else if label.contains("positive") {
        Tone::Positive
    } else {
        Tone::Neutral
    }
}

/// Background of the featured quote box
#[must_use]
pub fn featured_background(label: &str) -> &'static str {
    let label = label.to_lowercase();
    if label.contains("negative") {
        "#fffaf8"
    } else if label.contains("positive") {
        "#f0fdf4"
    } else {
        "#f8fafc"
    }
}

/// Fill class for a mean score on the -2..+2 scale
#[must_use]
pub fn score_fill(avg: f64) -> &'static str {
    if avg > 1.0 {
        "fill-very-green"
    } else if avg > 0.05 {
        "fill-green"
    } else if avg < -1.0 {
        "fill-very-red"
    } else if avg < -0.05 {
        "fill-red"
    } else {
        "fill-yellow"
    }
}

/// Color band of a school's overall percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallBand {
    /// 40% and above
    DarkGreen,
    /// 10% to 40%
    LightGreen,
    /// -9% to 10%
    Yellow,
    /// -39% to -9%
    LightRed,
    /// Below -39%
    DarkRed,
}

impl OverallBand {
    /// Band for a percentage. Thresholds are inclusive lower bounds.
    #[must_use]
    pub fn from_percent(pct: f64) -> Self {
        if pct >= 40.0 {
            Self::DarkGreen
        } else if pct >= 10.0 {
            Self::LightGreen
        } else if pct >= -9.0 {
            Self::Yellow
        } else if pct >= -39.0 {
            Self::LightRed
        } else {
            Self::DarkRed
        }
    }

    /// Badge background and text colors
    #[must_use]
    pub const fn colors(self) -> (&'static str, &'static str) {
        match self {
            Self::DarkGreen => ("#15803d", "#fff"),
            Self::LightGreen => ("#86efac", "#065f46"),
            Self::Yellow => ("#fcd34d", "#78350f"),
            Self::LightRed => ("#fca5a5", "#991b1b"),
            Self::DarkRed => ("#7f1d1d", "#fff"),
        }
    }
}

/// Shortest decimal form of a number; negative zero prints as `0`
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Percentage with a `+` sign for positive values (`+12.5%`, `0%`, `-3%`)
#[must_use]
pub fn signed_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{}%", format_number(value))
}

/// Round half toward positive infinity, as browsers do
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounded whole percentage with a `+` sign for positive values
#[must_use]
pub fn signed_rounded_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{}%", format_number(round_half_up(value)))
}

/// Strip surrounding double quotes left over from CSV exports, then trim
#[must_use]
pub fn clean_quote(text: &str) -> String {
    text.trim_matches('"').trim().to_string()
}

/// Group digits in threes with commas (`1234567` → `1,234,567`)
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Percent-encode a URI component, leaving `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as is
#[must_use]
pub fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}
