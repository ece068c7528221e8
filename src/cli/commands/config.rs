//! Config command handler
//!
//! `get` prints one value or the whole file; `set` and `unset` validate, then save.
//! Every subcommand works on the file as stored, never on the run's overridden config.

use crate::args::ConfigSubcommand;
use pulse_dashboard::config::Config;
use pulse_dashboard::core::matrix::SortColumn;
use pulse_dashboard::core::models::theme_order;
use pulse_dashboard::logger::Level;
use pulse_dashboard::warn;
use std::io::{self, Write};
use std::path::Path;

/// Dispatch config subcommands and return the text to print
///
/// # Errors
/// Returns a `✗`-prefixed message for unknown keys, invalid values or I/O failures
pub fn run(subcommand: Option<ConfigSubcommand>, config_file: &Path) -> Result<String, String> {
    match subcommand {
        Some(ConfigSubcommand::Reset) => reset(config_file),
        None | Some(ConfigSubcommand::Get { key: None }) => Ok(show_all(
            &Config::load_stored_from(config_file),
            config_file,
        )),
        Some(ConfigSubcommand::Get { key: Some(key) }) => Config::load_stored_from(config_file)
            .get(&key)
            .ok_or_else(|| format!("✗ Unknown config key: '{key}'")),
        Some(ConfigSubcommand::Set { key, value }) => {
            let mut config = Config::load_stored_from(config_file);
            apply_set(&mut config, &key, &value)?;
            persist(&config, config_file)?;
            Ok(format!("✓ Set {key} = {value}"))
        }
        Some(ConfigSubcommand::Unset { key }) => {
            let mut config = Config::load_stored_from(config_file);
            config
                .unset(&key, &Config::stored_defaults())
                .map_err(|e| format!("✗ {e}"))?;
            check_sort(&config);
            persist(&config, config_file)?;
            Ok(format!("✓ Reset {key} to default"))
        }
    }
}

fn show_all(config: &Config, config_file: &Path) -> String {
    format!(
        "\n=== Configuration ===\n({})\n\n{config}",
        config_file.display()
    )
}

/// Validate `value` for `key`, then store it
///
/// `level` must name a log level and `sort` must name a matrix column under the
/// configured theme order. Other keys are checked by [`Config::set`].
///
/// # Errors
/// Returns a `✗`-prefixed message when the value is rejected
pub fn apply_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    match key {
        "level" if Level::parse(value).is_none() => {
            return Err(format!(
                "✗ Invalid log level '{value}' (expected error, warn, info or debug)"
            ));
        }
        "sort" => {
            SortColumn::resolve(value, &theme_order(&config.render.themes))
                .map_err(|e| format!("✗ {e}"))?;
        }
        _ => {}
    }
    config.set(key, value).map_err(|e| format!("✗ {e}"))?;
    check_sort(config);
    Ok(())
}

/// Warn when a theme change leaves the configured sort column dangling
fn check_sort(config: &Config) {
    let themes = theme_order(&config.render.themes);
    if SortColumn::resolve(&config.render.sort, &themes).is_err() {
        warn!(
            "Configured sort '{}' matches no column; `render` will fail until it is changed",
            config.render.sort
        );
    }
}

fn persist(config: &Config, config_file: &Path) -> Result<(), String> {
    config
        .save_to(config_file)
        .map_err(|e| format!("✗ Failed to save config: {e}"))
}

/// Whether a confirmation answer means yes
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

fn reset(config_file: &Path) -> Result<String, String> {
    if !config_file.exists() {
        return Ok("✓ Config is already at defaults".to_string());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if !is_yes(&response) {
        return Ok("✗ Reset cancelled".to_string());
    }
    Config::reset(config_file).map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
    Ok("✓ Config reset to defaults".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_rejects_unknown_levels() {
        let mut config = Config::from_defaults();
        let err = apply_set(&mut config, "level", "trace").expect_err("rejected");
        assert!(err.starts_with("✗ Invalid log level"));
        assert_ne!(config.logging.level, "trace");

        apply_set(&mut config, "level", "INFO").expect("accepted");
        assert_eq!(config.logging.level, "INFO");
    }

    #[test]
    fn set_checks_sort_against_themes() {
        let mut config = Config::from_defaults();
        apply_set(&mut config, "sort", "overall").expect("builtin column");
        apply_set(&mut config, "sort", "resources & capacity").expect("canonical theme");
        assert!(apply_set(&mut config, "sort", "Budget").is_err());

        apply_set(&mut config, "themes", "Budget, Safety").expect("themes stored");
        apply_set(&mut config, "sort", "Budget").expect("configured theme");
        assert_eq!(config.render.sort, "Budget");
    }

    #[test]
    fn set_passes_through_config_errors() {
        let mut config = Config::from_defaults();
        let err = apply_set(&mut config, "width", "wide").expect_err("not a number");
        assert!(err.starts_with("✗ Invalid number"));
        assert!(apply_set(&mut config, "colour", "red").is_err());
    }

    fn config_file(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("dconfig.toml");
        std::fs::write(&path, content).expect("config written");
        path
    }

    #[test]
    fn set_saves_the_stored_file_only() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = config_file(
            &dir,
            "[source]\ndataset = \"$PULSE_DASH/full_dashboard_data.json\"\n\n[paths]\nreports_dir = \"$PULSE_DASH/reports\"\n",
        );

        let set = ConfigSubcommand::Set {
            key: "sort".to_string(),
            value: "overall".to_string(),
        };
        assert_eq!(run(Some(set), &path).as_deref(), Ok("✓ Set sort = overall"));

        let saved = std::fs::read_to_string(&path).expect("config readable");
        assert!(saved.contains("dataset = \"$PULSE_DASH/full_dashboard_data.json\""));
        assert!(saved.contains("reports_dir = \"$PULSE_DASH/reports\""));
        assert!(saved.contains("sort = \"overall\""));
    }

    #[test]
    fn get_and_unset_use_the_stored_values() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = config_file(&dir, "[render]\nsort = \"city\"\n");

        let get = ConfigSubcommand::Get {
            key: Some("sort".to_string()),
        };
        assert_eq!(run(Some(get), &path).as_deref(), Ok("city"));

        let unset = ConfigSubcommand::Unset {
            key: "sort".to_string(),
        };
        assert!(run(Some(unset), &path).is_ok());
        assert_eq!(Config::load_from(&path).render.sort, "name");

        let unknown = ConfigSubcommand::Get {
            key: Some("colour".to_string()),
        };
        assert!(run(Some(unknown), &path).is_err());
    }

    #[test]
    fn confirmation_accepts_y_and_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
