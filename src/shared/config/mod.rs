//! Configuration module for `PulseDash`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the configuration directory in path-like values
const DIR_VARIABLE: &str = "$PULSE_DASH";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Dataset source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Dataset location: a file path or an `http(s)://` URL
    #[serde(default)]
    pub dataset: String,
    /// HTTP timeout in seconds for URL sources
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for rendered dashboards
    #[serde(default)]
    pub reports_dir: String,
    /// Directory (relative to the dashboard) holding per-school PDF reports
    #[serde(default)]
    pub school_reports: String,
}

/// Rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Radial canvas width in pixels
    #[serde(default)]
    pub width: u32,
    /// Radial canvas height in pixels
    #[serde(default)]
    pub height: u32,
    /// Initial matrix sort column (`name`, `city`, `overall` or a theme name)
    #[serde(default)]
    pub sort: String,
    /// Theme column order; empty means the canonical seven themes
    #[serde(default)]
    pub themes: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Dataset source settings
    #[serde(default)]
    pub source: SourceConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override dataset location
    pub dataset: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$PULSE_DASH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/pulsedash`
    /// - macOS: `~/Library/Application Support/pulsedash`
    /// - Windows: `%APPDATA%\pulsedash`
    #[must_use]
    pub fn get_pulsedash_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pulsedash")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Empty strings and zero numbers count as missing. The theme list is left
    /// alone since an empty list is meaningful.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        changed |= merge_string(&mut self.logging.level, &defaults.logging.level);
        changed |= merge_string(&mut self.logging.file, &defaults.logging.file);

        changed |= merge_string(&mut self.source.dataset, &defaults.source.dataset);
        if self.source.timeout_secs == 0 && defaults.source.timeout_secs != 0 {
            self.source.timeout_secs = defaults.source.timeout_secs;
            changed = true;
        }

        changed |= merge_string(&mut self.paths.reports_dir, &defaults.paths.reports_dir);
        changed |= merge_string(
            &mut self.paths.school_reports,
            &defaults.paths.school_reports,
        );

        if self.render.width == 0 && defaults.render.width != 0 {
            self.render.width = defaults.render.width;
            changed = true;
        }
        if self.render.height == 0 && defaults.render.height != 0 {
            self.render.height = defaults.render.height;
            changed = true;
        }
        changed |= merge_string(&mut self.render.sort, &defaults.render.sort);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the configuration file is not modified.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     dataset: Some("https://example.org/full_dashboard_data.json".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(dataset) = &overrides.dataset {
            self.source.dataset.clone_from(dataset);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// the directory returned by [`get_pulsedash_dir`](Self::get_pulsedash_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_pulsedash_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$PULSE_DASH` in a value to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_pulsedash_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing sections and fields fall back to their serde defaults. Path-like
    /// values have `$PULSE_DASH` expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str).map(Self::expanded)
    }

    /// This config with `$PULSE_DASH` expanded in path-like values
    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.logging.file = Self::expand_variables(&self.logging.file);
        self.source.dataset = Self::expand_variables(&self.source.dataset);
        self.paths.reports_dir = Self::expand_variables(&self.paths.reports_dir);
        self
    }

    /// Compiled-in defaults as written to disk, with `$PULSE_DASH` unexpanded
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is invalid TOML.
    #[must_use]
    pub fn stored_defaults() -> Self {
        toml::from_str(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from embedded defaults
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::stored_defaults().expanded()
    }

    /// Load configuration from the user config file, or create it from defaults if not found
    ///
    /// When the file exists, missing fields are merged from the defaults and the
    /// file is re-saved. Any error falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from a specific file, creating it from defaults on first use
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        Self::load_stored_from(config_file).expanded()
    }

    /// A config file as stored, for editing
    ///
    /// Values are not expanded and no overrides are applied, so saving the
    /// result writes back only what the file already holds plus the edit.
    /// Missing fields are merged from the defaults as in [`load_from`](Self::load_from).
    #[must_use]
    pub fn load_stored_from(config_file: &Path) -> Self {
        let defaults = Self::stored_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = toml::from_str::<Self>(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save_to(config_file);
        }

        defaults
    }

    /// Save configuration to a specific file as pretty TOML
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `dataset`, `timeout_secs`,
    /// `reports_dir`, `school_reports`, `width`, `height`, `sort`, `themes`.
    /// Hyphenated spellings are accepted as well. `themes` is returned as a
    /// comma-separated list.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "dataset" => Some(self.source.dataset.clone()),
            "timeout_secs" | "timeout-secs" => Some(self.source.timeout_secs.to_string()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "school_reports" | "school-reports" => Some(self.paths.school_reports.clone()),
            "width" => Some(self.render.width.to_string()),
            "height" => Some(self.render.height.to_string()),
            "sort" => Some(self.render.sort.clone()),
            "themes" => Some(self.render.themes.join(",")),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Numeric keys must parse as unsigned integers and `verbose` as a boolean.
    /// `themes` takes a comma-separated list; an empty value clears it.
    /// Call [`save_to()`](Config::save_to) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "dataset" => self.source.dataset = value.to_string(),
            "timeout_secs" | "timeout-secs" => {
                self.source.timeout_secs = parse_number(key, value)?;
            }
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "school_reports" | "school-reports" => self.paths.school_reports = value.to_string(),
            "width" => self.render.width = parse_number(key, value)?,
            "height" => self.render.height = parse_number(key, value)?,
            "sort" => self.render.sort = value.to_string(),
            "themes" => {
                self.render.themes = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "dataset" => self.source.dataset.clone_from(&defaults.source.dataset),
            "timeout_secs" | "timeout-secs" => {
                self.source.timeout_secs = defaults.source.timeout_secs;
            }
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "school_reports" | "school-reports" => self
                .paths
                .school_reports
                .clone_from(&defaults.paths.school_reports),
            "width" => self.render.width = defaults.render.width,
            "height" => self.render.height = defaults.render.height,
            "sort" => self.render.sort.clone_from(&defaults.render.sort),
            "themes" => self.render.themes.clone_from(&defaults.render.themes),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load_from()`](Config::load_from) recreates it. Succeeds when there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset(config_file: &Path) -> Result<(), std::io::Error> {
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn merge_string(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        true
    } else {
        false
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid number for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[source]")?;
        writeln!(f, "  dataset = \"{}\"", self.source.dataset)?;
        writeln!(f, "  timeout_secs = {}", self.source.timeout_secs)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  school_reports = \"{}\"", self.paths.school_reports)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  width = {}", self.render.width)?;
        writeln!(f, "  height = {}", self.render.height)?;
        writeln!(f, "  sort = \"{}\"", self.render.sort)?;
        let themes: Vec<String> = self.render.themes.iter().map(|t| format!("\"{t}\"")).collect();
        writeln!(f, "  themes = [{}]", themes.join(", "))?;

        Ok(())
    }
}
