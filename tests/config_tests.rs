//! Integration tests for configuration management

use pulse_dashboard::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.source.dataset.is_empty(),
        "Default dataset should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert_eq!(config.paths.school_reports, "School_Reports");
    assert_eq!(config.render.width, 960);
    assert_eq!(config.render.height, 720);
    assert_eq!(config.render.sort, "name");
    assert!(config.render.themes.is_empty());
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[source]
dataset = "https://example.org/full_dashboard_data.json"
timeout_secs = 5

[paths]
reports_dir = "./out"
school_reports = "pdfs"

[render]
width = 1200
height = 900
sort = "overall"
themes = ["Resources & Capacity", "Community Engagement"]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(
        config.source.dataset,
        "https://example.org/full_dashboard_data.json"
    );
    assert_eq!(config.source.timeout_secs, 5);
    assert_eq!(config.paths.reports_dir, "./out");
    assert_eq!(config.paths.school_reports, "pdfs");
    assert_eq!(config.render.width, 1200);
    assert_eq!(config.render.height, 900);
    assert_eq!(config.render.sort, "overall");
    assert_eq!(
        config.render.themes,
        vec!["Resources & Capacity", "Community Engagement"]
    );
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"

[render]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.source.dataset, "");
    assert_eq!(config.source.timeout_secs, 0);
    assert_eq!(config.render.width, 0);
}

#[test]
fn test_config_from_toml_rejects_wrong_types() {
    let toml_str = r#"
[render]
width = "wide"
"#;
    assert!(Config::from_toml(toml_str).is_err());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$PULSE_DASH/test.log"

[source]
dataset = "$PULSE_DASH/data.json"

[paths]
reports_dir = "$PULSE_DASH/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    for value in [
        &config.logging.file,
        &config.source.dataset,
        &config.paths.reports_dir,
    ] {
        assert!(value.contains("pulsedash"), "not expanded: {value}");
        assert!(!value.contains("$PULSE_DASH"));
    }
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").as_deref(), Some("debug"));

    config.set("verbose", "true").expect("Failed to set verbose");
    assert_eq!(config.get("verbose").as_deref(), Some("true"));
    assert!(config.logging.verbose);

    config.set("width", "1024").expect("Failed to set width");
    assert_eq!(config.render.width, 1024);

    config
        .set("reports-dir", "/srv/dashboards")
        .expect("Failed to set reports-dir");
    assert_eq!(config.get("reports_dir").as_deref(), Some("/srv/dashboards"));

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    let err = config.set("height", "tall").expect_err("height must be numeric");
    assert!(err.contains("height"));
    assert_eq!(config.render.height, 720);

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("timeout_secs", "-3").is_err());
}

#[test]
fn test_config_themes_list() {
    let mut config = Config::from_defaults();

    config
        .set("themes", "Resources & Capacity, ,Community Engagement")
        .expect("Failed to set themes");
    assert_eq!(
        config.render.themes,
        vec!["Resources & Capacity", "Community Engagement"]
    );
    assert_eq!(
        config.get("themes").as_deref(),
        Some("Resources & Capacity,Community Engagement")
    );

    config.set("themes", "").expect("Failed to clear themes");
    assert!(config.render.themes.is_empty());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("sort", "city").expect("Failed to set sort");
    config
        .set("themes", "Community Engagement")
        .expect("Failed to set themes");

    for key in ["level", "sort", "themes"] {
        config.unset(key, &defaults).expect("Failed to unset");
    }
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.render.sort, defaults.render.sort);
    assert!(config.render.themes.is_empty());

    assert!(config.unset("bogus", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("sort", "overall").expect("Failed to set sort");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.render.sort, "overall");
}

#[test]
fn test_config_load_creates_file_on_first_use() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let config = Config::load_from(&config_file);

    assert!(config_file.exists());
    assert_eq!(config.render.width, Config::from_defaults().render.width);
}

#[test]
fn test_config_load_merges_and_resaves_missing_fields() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").expect("Failed to write config");

    let config = Config::load_from(&config_file);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.render.height, 720);
    let saved = fs::read_to_string(&config_file).expect("Failed to read config");
    assert!(saved.contains("[render]"));
}

#[test]
fn test_config_load_falls_back_on_invalid_toml() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(&config_file, "not = [valid").expect("Failed to write config");

    let config = Config::load_from(&config_file);

    assert_eq!(config.render.sort, Config::from_defaults().render.sort);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        dataset: Some("https://example.org/data.json".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.source.dataset, "https://example.org/data.json");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_are_not_persisted() {
    let (_temp_dir, config_file) = setup_temp_config();
    let original = Config::load_from(&config_file).source.dataset;

    let mut run_config = Config::load_from(&config_file);
    run_config.apply_overrides(&ConfigOverrides {
        dataset: Some("/tmp/one_off.json".to_string()),
        reports_dir: Some("/tmp/one_off_reports".to_string()),
        ..Default::default()
    });

    let mut stored = Config::load_stored_from(&config_file);
    stored.set("sort", "overall").expect("Failed to set sort");
    stored.save_to(&config_file).expect("Failed to save config");

    let reloaded = Config::load_from(&config_file);
    assert_eq!(run_config.source.dataset, "/tmp/one_off.json");
    assert_eq!(reloaded.source.dataset, original);
    assert_ne!(reloaded.paths.reports_dir, "/tmp/one_off_reports");
    assert_eq!(reloaded.render.sort, "overall");
}

#[test]
fn test_config_resave_keeps_dir_variable() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(
        &config_file,
        "[paths]\nreports_dir = \"$PULSE_DASH/reports\"\n",
    )
    .expect("Failed to write config");

    let loaded = Config::load_from(&config_file);
    assert!(!loaded.paths.reports_dir.contains("$PULSE_DASH"));

    let saved = fs::read_to_string(&config_file).expect("Failed to read config");
    assert!(saved.contains("[render]"), "missing fields were not merged");
    assert!(saved.contains("reports_dir = \"$PULSE_DASH/reports\""));

    let stored = Config::load_stored_from(&config_file);
    assert_eq!(stored.paths.reports_dir, "$PULSE_DASH/reports");
    assert_eq!(stored.expanded().paths.reports_dir, loaded.paths.reports_dir);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.source.dataset.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..Default::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.source.dataset, before);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    for section in ["[logging]", "[source]", "[paths]", "[render]"] {
        assert!(display_str.contains(section), "missing {section}");
    }
    for field in ["level", "dataset", "timeout_secs", "school_reports", "themes = []"] {
        assert!(display_str.contains(field), "missing {field}");
    }
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[source]
dataset = ""

[paths]
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.source.dataset, defaults.source.dataset);
    assert_eq!(config.source.timeout_secs, defaults.source.timeout_secs);
    assert_eq!(config.render.width, defaults.render.width);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[render]
sort = "city"
themes = ["Community Engagement"]
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.render.sort, "city");
    assert_eq!(config.render.themes, vec!["Community Engagement"]);
}

#[test]
fn test_get_pulsedash_dir() {
    let dir = Config::get_pulsedash_dir();

    assert!(dir.to_string_lossy().contains("pulsedash"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
