//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use cabledrop_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use cabledrop_core::formats::StyleSheet;
use cabledrop_core::models::DropStyle;
use cabledrop_core::CabledropError;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const ENV_VARS: [&str; 4] = [
    "CABLEDROP_MAX_DISTANCE",
    "CABLEDROP_DROP_STYLE",
    "CABLEDROP_DROP_LINE_COLOR",
    "CABLEDROP_DROP_LINE_WIDTH",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
max_distance = 60.0
# Only override the distance, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.max_distance.value, 60.0);
    assert_eq!(config.max_distance.source, ConfigSource::File);
    assert_eq!(config.drop_style.value, DropStyle::Straight);
    assert_eq!(config.drop_style.source, ConfigSource::Default);
    assert_eq!(config.drop_line_color.source, ConfigSource::Default);
}

#[test]
fn test_integer_distance_in_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_distance = 80").unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();
    assert_eq!(config.max_distance.value, 80.0);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("CABLEDROP_MAX_DISTANCE", "40");
    env::set_var("CABLEDROP_DROP_STYLE", "Curved");
    env::set_var("CABLEDROP_DROP_LINE_COLOR", "#123ABC");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r##"
max_distance = 150.0
drop_style = "straight"
drop_line_color = "#ffffff"
"##
    )
    .unwrap();

    let config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.max_distance.value, 40.0);
    assert_eq!(config.max_distance.source, ConfigSource::Environment);
    assert_eq!(config.drop_style.value, DropStyle::Curved);
    assert_eq!(config.drop_style.source, ConfigSource::Environment);
    assert_eq!(config.drop_line_color.value, "#123abc");
    assert_eq!(config.drop_line_color.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("CABLEDROP_MAX_DISTANCE", "very far");
    env::set_var("CABLEDROP_DROP_STYLE", "zigzag");
    env::set_var("CABLEDROP_DROP_LINE_WIDTH", "-1");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_distance = 70.0").unwrap();

    let config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.max_distance.value, 70.0);
    assert_eq!(config.max_distance.source, ConfigSource::File);
    assert_eq!(config.drop_style.value, DropStyle::Straight);
    assert_eq!(config.drop_style.source, ConfigSource::Default);
    assert_eq!(config.drop_line_width.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_configuration_precedence_order() {
    clear_env();
    env::set_var("CABLEDROP_MAX_DISTANCE", "75");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_distance = 150.0").unwrap();

    let mut config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    // At this point, environment should have overridden file
    assert_eq!(config.max_distance.value, 75.0);
    assert_eq!(config.max_distance.source, ConfigSource::Environment);

    // Now CLI should override environment
    config.update_from_cli(CliConfigOverrides { max_distance: Some(25.0), ..Default::default() });

    assert_eq!(config.max_distance.value, 25.0);
    assert_eq!(config.max_distance.source, ConfigSource::Cli);

    assert!(ConfigSource::Cli.precedence() > ConfigSource::Environment.precedence());
    assert!(ConfigSource::Environment.precedence() > ConfigSource::File.precedence());
    assert!(ConfigSource::File.precedence() > ConfigSource::Default.precedence());

    clear_env();
}

#[test]
fn test_configuration_source_tracking() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_distance = 120.0\ndrop_style = \"curved\"").unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();
    let inspection_map = config.to_inspection_map();

    assert_eq!(inspection_map.len(), 8);

    let (distance_value, distance_source) = &inspection_map["max_distance"];
    assert_eq!(distance_value, "120 m");
    assert_eq!(*distance_source, ConfigSource::File);

    let (style_value, style_source) = &inspection_map["drop_style"];
    assert_eq!(style_value, "curved");
    assert_eq!(*style_source, ConfigSource::File);

    let (color_value, color_source) = &inspection_map["drop_line_color"];
    assert_eq!(color_value, "#ff00ff");
    assert_eq!(*color_source, ConfigSource::Default);
}

#[test]
fn test_invalid_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid toml content [[[").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(matches!(result, Err(CabledropError::ConfigInvalid { .. })));
}

#[test]
fn test_invalid_color_in_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "drop_line_color = \"magenta\"").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(matches!(result, Err(CabledropError::ConfigInvalid { .. })));
}

#[test]
#[serial]
fn test_full_configuration_workflow() {
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cabledrop.toml");
    fs::write(
        &config_path,
        r##"
max_distance = 150.0
drop_style = "curved"
drop_line_color = "#00ff00"
drop_line_width = 2.0
"##,
    )
    .unwrap();

    env::set_var("CABLEDROP_DROP_LINE_WIDTH", "3");

    let mut config =
        LayeredConfig::with_defaults().load_from_file(&config_path).unwrap().load_from_env();

    assert_eq!(config.max_distance.value, 150.0); // From file
    assert_eq!(config.drop_style.value, DropStyle::Curved); // From file
    assert_eq!(config.drop_line_width.value, 3.0); // From env
    assert_eq!(config.drop_line_width.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        drop_style: Some(DropStyle::Straight),
        ..Default::default()
    });

    assert_eq!(config.drop_style.value, DropStyle::Straight);
    assert_eq!(config.drop_style.source, ConfigSource::Cli);

    // The style sheet picks up the resolved drop line settings
    let styles = StyleSheet::from_config(&config);
    assert_eq!(styles.drop_line(DropStyle::Straight).color, "#00ff00");
    assert_eq!(styles.drop_line(DropStyle::Straight).width, 3.0);

    clear_env();
}
