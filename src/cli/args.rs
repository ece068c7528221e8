//! CLI argument definitions for `pulsedash`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pulse_dashboard::config::ConfigOverrides;
use pulse_dashboard::logger::Level;

/// Log level accepted by `--log-level` and `--config-level`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Failed loads and writes only
    Error,
    /// Also skipped or suspicious input
    Warn,
    /// Also load and render progress
    Info,
    /// Everything, including per-cell parse failures
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    /// Lowercase name, as stored in the config file
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Level::from(*self).name())
    }
}

/// Dashboard tab shown when the page opens
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum TabArg {
    /// Narrative summary
    Story,
    /// Radial school/theme diagram
    Connect,
    /// Matrix table
    Matrix,
}

impl From<TabArg> for pulse_dashboard::core::report::Tab {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::Story => Self::Story,
            TabArg::Connect => Self::Connect,
            TabArg::Matrix => Self::Matrix,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Print one value, or the whole file when KEY is omitted.
    Get {
        /// Key such as `dataset`, `reports_dir`, `sort` or `themes`
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Store a value in the config file.
    ///
    /// `themes` takes a comma-separated list; `sort` must name a matrix column.
    Set {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Restore one key to its compiled-in default.
    Unset {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Delete the config file after confirmation.
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or edit the `pulsedash` configuration (prints it all by default).
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Render the dashboard from a dataset.
    ///
    /// Loads the JSON dataset once (file path or http(s) URL) and writes a
    /// self-contained HTML page or a Markdown summary.
    Render {
        /// Dataset file or URL (defaults to config `dataset`)
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        /// Output file path (defaults to `{reports_dir}/{stem}_dashboard.{ext}`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format: html (htm) or markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,

        /// Matrix sort column: name, city, overall or a theme name (repeat to toggle)
        #[arg(long, value_name = "COLUMN")]
        sort: Vec<String>,

        /// Radial diagram width in pixels (defaults to config `width`)
        #[arg(long, value_name = "PX")]
        width: Option<u32>,

        /// Radial diagram height in pixels (defaults to config `height`)
        #[arg(long, value_name = "PX")]
        height: Option<u32>,

        /// Tab shown when the page opens
        #[arg(long, value_enum, default_value = "story")]
        tab: TabArg,
    },
    /// Print the verbatim detail of one school.
    ///
    /// With `--theme`, prints the school × theme cell detail; otherwise prints
    /// every quote of the school across all themes.
    Detail {
        /// Dataset file or URL (defaults to config `dataset`)
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        /// School name (case-insensitive)
        #[arg(long, value_name = "NAME")]
        school: String,

        /// Theme name (case-insensitive)
        #[arg(long, value_name = "THEME")]
        theme: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "pulsedash",
    about = "School survey sentiment dashboard renderer",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Log level for this run; config `level` when omitted
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Print progress details to stdout
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Same as `--log-level debug`
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Append log lines to this file instead of the terminal
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // Per-run replacements for config values; the file is left untouched
    /// Replace config `level`
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Replace config `file`
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Replace config `verbose` (true/false, yes/no, 1/0)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config dataset location
    #[arg(long = "config-dataset", value_name = "SOURCE")]
    pub config_dataset: Option<String>,

    /// Override config dataset location (short form)
    #[arg(long = "dataset", value_name = "SOURCE")]
    pub dataset: Option<String>,

    /// Override config reports directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--dataset`) take precedence over long-form flags
    /// (e.g., `--config-dataset`) when both are provided. `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            dataset: self
                .dataset
                .clone()
                .or_else(|| self.config_dataset.clone()),
            reports_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
