use crate::error::{CabledropError, Result};
use crate::formats::FolderNames;
use crate::models::DropStyle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default maximum FAT to HP distance in meters
pub const DEFAULT_MAX_DISTANCE: f64 = 100.0;

/// Default drop line color (magenta)
pub const DEFAULT_DROP_LINE_COLOR: &str = "#ff00ff";

pub const DEFAULT_DROP_LINE_WIDTH: f64 = 1.0;

/// Name of the config file picked up from the working directory
pub const CONFIG_FILE_NAME: &str = "cabledrop.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for drop generation
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Maximum FAT to HP distance in meters
    pub max_distance: ConfigValue<f64>,
    pub drop_style: ConfigValue<DropStyle>,
    /// `#rrggbb`
    pub drop_line_color: ConfigValue<String>,
    pub drop_line_width: ConfigValue<f64>,
    /// KML folder names, read from the `[folders]` table only
    pub folders: ConfigValue<FolderNames>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            max_distance: ConfigValue::new(DEFAULT_MAX_DISTANCE, ConfigSource::Default),
            drop_style: ConfigValue::new(DropStyle::Straight, ConfigSource::Default),
            drop_line_color: ConfigValue::new(
                DEFAULT_DROP_LINE_COLOR.to_string(),
                ConfigSource::Default,
            ),
            drop_line_width: ConfigValue::new(DEFAULT_DROP_LINE_WIDTH, ConfigSource::Default),
            folders: ConfigValue::new(FolderNames::default(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CabledropError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CabledropError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(max_distance) = file_config.max_distance {
            self.max_distance.update(max_distance, ConfigSource::File);
        }

        if let Some(style) = file_config.drop_style {
            self.drop_style.update(parse_drop_style(&style)?, ConfigSource::File);
        }

        if let Some(color) = file_config.drop_line_color {
            self.drop_line_color.update(parse_hex_color(&color)?, ConfigSource::File);
        }

        if let Some(width) = file_config.drop_line_width {
            self.drop_line_width.update(validate_line_width(width)?, ConfigSource::File);
        }

        if let Some(folders) = file_config.folders {
            self.folders.update(folders.resolve()?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CABLEDROP_MAX_DISTANCE
        if let Ok(distance_str) = env::var("CABLEDROP_MAX_DISTANCE") {
            match parse_max_distance(&distance_str) {
                Ok(distance) => self.max_distance.update(distance, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CABLEDROP_MAX_DISTANCE value '{}': expected a number of meters",
                    distance_str
                ),
            }
        }

        // CABLEDROP_DROP_STYLE
        if let Ok(style_str) = env::var("CABLEDROP_DROP_STYLE") {
            match parse_drop_style(&style_str) {
                Ok(style) => self.drop_style.update(style, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CABLEDROP_DROP_STYLE value '{}': expected straight or curved",
                    style_str
                ),
            }
        }

        // CABLEDROP_DROP_LINE_COLOR
        if let Ok(color_str) = env::var("CABLEDROP_DROP_LINE_COLOR") {
            match parse_hex_color(&color_str) {
                Ok(color) => self.drop_line_color.update(color, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CABLEDROP_DROP_LINE_COLOR value '{}': expected #rrggbb",
                    color_str
                ),
            }
        }

        // CABLEDROP_DROP_LINE_WIDTH
        if let Ok(width_str) = env::var("CABLEDROP_DROP_LINE_WIDTH") {
            match parse_line_width(&width_str) {
                Ok(width) => self.drop_line_width.update(width, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CABLEDROP_DROP_LINE_WIDTH value '{}': expected a positive number",
                    width_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(max_distance) = overrides.max_distance {
            self.max_distance.update(max_distance, ConfigSource::Cli);
        }

        if let Some(style) = overrides.drop_style {
            self.drop_style.update(style, ConfigSource::Cli);
        }

        if let Some(color) = overrides.drop_line_color {
            self.drop_line_color.update(color, ConfigSource::Cli);
        }

        if let Some(width) = overrides.drop_line_width {
            self.drop_line_width.update(width, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "max_distance".to_string(),
            (format!("{} m", self.max_distance.value), self.max_distance.source),
        );

        map.insert(
            "drop_style".to_string(),
            (self.drop_style.value.to_string(), self.drop_style.source),
        );

        map.insert(
            "drop_line_color".to_string(),
            (self.drop_line_color.value.clone(), self.drop_line_color.source),
        );

        map.insert(
            "drop_line_width".to_string(),
            (self.drop_line_width.value.to_string(), self.drop_line_width.source),
        );

        let folders = &self.folders.value;
        for (key, name) in [
            ("folders.boundary", &folders.boundary),
            ("folders.access", &folders.access),
            ("folders.distribution", &folders.distribution),
            ("folders.drops", &folders.drops),
        ] {
            map.insert(key.to_string(), (name.clone(), self.folders.source));
        }

        map
    }
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    max_distance: Option<f64>,
    drop_style: Option<String>,
    drop_line_color: Option<String>,
    drop_line_width: Option<f64>,
    folders: Option<FileFolders>,
}

/// `[folders]` table; unset names keep their defaults
#[derive(Debug, Deserialize, Serialize)]
struct FileFolders {
    boundary: Option<String>,
    access: Option<String>,
    distribution: Option<String>,
    drops: Option<String>,
}

impl FileFolders {
    fn resolve(self) -> Result<FolderNames> {
        let mut folders = FolderNames::default();
        for (key, value, slot) in [
            ("boundary", self.boundary, &mut folders.boundary),
            ("access", self.access, &mut folders.access),
            ("distribution", self.distribution, &mut folders.distribution),
            ("drops", self.drops, &mut folders.drops),
        ] {
            if let Some(value) = value {
                *slot = parse_folder_name(key, &value)?;
            }
        }
        Ok(folders)
    }
}

fn parse_folder_name(key: &str, value: &str) -> Result<String> {
    let name = value.trim();
    if name.is_empty() {
        return Err(CabledropError::ConfigInvalid {
            key: format!("folders.{}", key),
            reason: "Folder name must not be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub max_distance: Option<f64>,
    pub drop_style: Option<DropStyle>,
    pub drop_line_color: Option<String>,
    pub drop_line_width: Option<f64>,
}

/// Parse a maximum distance in meters.
///
/// Only the number itself is checked; zero and negative values are accepted
/// and simply produce no matches.
pub fn parse_max_distance(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix('m').unwrap_or(trimmed).trim_end();
    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(CabledropError::ConfigInvalid {
            key: "max_distance".to_string(),
            reason: format!("Invalid distance: {}. Use a number of meters, e.g. 100", s),
        }),
    }
}

/// Parse a drop style name, ignoring case and surrounding whitespace
pub fn parse_drop_style(s: &str) -> Result<DropStyle> {
    s.trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| CabledropError::InvalidStyle { style: s.to_string() })
}

/// Parse and normalize a `#rrggbb` color
pub fn parse_hex_color(s: &str) -> Result<String> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(format!("#{}", hex.to_lowercase()))
    } else {
        Err(CabledropError::ConfigInvalid {
            key: "drop_line_color".to_string(),
            reason: format!("Invalid color: {}. Use #rrggbb", s),
        })
    }
}

/// Parse a positive line width
pub fn parse_line_width(s: &str) -> Result<f64> {
    let width = s.trim().parse::<f64>().map_err(|_| CabledropError::ConfigInvalid {
        key: "drop_line_width".to_string(),
        reason: format!("Invalid line width: {}. Use a positive number", s),
    })?;
    validate_line_width(width)
}

fn validate_line_width(width: f64) -> Result<f64> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(CabledropError::ConfigInvalid {
            key: "drop_line_width".to_string(),
            reason: format!("Invalid line width: {}. Use a positive number", width),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.max_distance.value, 100.0);
        assert_eq!(config.max_distance.source, ConfigSource::Default);
        assert_eq!(config.drop_style.value, DropStyle::Straight);
        assert_eq!(config.drop_line_color.value, "#ff00ff");
        assert_eq!(config.drop_line_width.value, 1.0);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100.0, ConfigSource::Default);

        // File should override default
        value.update(200.0, ConfigSource::File);
        assert_eq!(value.value, 200.0);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300.0, ConfigSource::Environment);
        assert_eq!(value.value, 300.0);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400.0, ConfigSource::Cli);
        assert_eq!(value.value, 400.0);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500.0, ConfigSource::File);
        assert_eq!(value.value, 400.0);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
max_distance = 250.0
drop_style = "curved"
drop_line_color = "#00FF00"
drop_line_width = 2.5
"##
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.max_distance.value, 250.0);
        assert_eq!(config.max_distance.source, ConfigSource::File);
        assert_eq!(config.drop_style.value, DropStyle::Curved);
        assert_eq!(config.drop_line_color.value, "#00ff00");
        assert_eq!(config.drop_line_width.value, 2.5);
    }

    #[test]
    fn test_file_with_unknown_style_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"drop_style = "dashed""#).unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, CabledropError::InvalidStyle { .. }));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = LayeredConfig::with_defaults()
            .load_from_file("/nonexistent/cabledrop.toml")
            .unwrap_err();
        assert!(matches!(err, CabledropError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_folders_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[folders]\naccess = \" HOMEPASS \"\ndrops = \"DROPS\"").unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();
        assert_eq!(config.folders.source, ConfigSource::File);
        assert_eq!(config.folders.value.access, "HOMEPASS");
        assert_eq!(config.folders.value.drops, "DROPS");
        assert_eq!(config.folders.value.boundary, "BOUNDARY");
        assert_eq!(config.folders.value.distribution, "FAT");
    }

    #[test]
    fn test_empty_folder_name_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[folders]\nboundary = \"  \"").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        match err {
            CabledropError::ConfigInvalid { key, .. } => assert_eq!(key, "folders.boundary"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            max_distance: Some(50.0),
            drop_style: Some(DropStyle::Curved),
            drop_line_color: None,
            drop_line_width: None,
        };

        config.update_from_cli(overrides);

        assert_eq!(config.max_distance.value, 50.0);
        assert_eq!(config.max_distance.source, ConfigSource::Cli);
        assert_eq!(config.drop_style.value, DropStyle::Curved);
        assert_eq!(config.drop_style.source, ConfigSource::Cli);
        // These should still be defaults
        assert_eq!(config.drop_line_color.source, ConfigSource::Default);
        assert_eq!(config.drop_line_width.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_max_distance() {
        assert_eq!(parse_max_distance("100").unwrap(), 100.0);
        assert_eq!(parse_max_distance(" 75.5 ").unwrap(), 75.5);
        assert_eq!(parse_max_distance("120m").unwrap(), 120.0);
        assert_eq!(parse_max_distance("0").unwrap(), 0.0);
        assert_eq!(parse_max_distance("-5").unwrap(), -5.0);
        assert!(parse_max_distance("far").is_err());
        assert!(parse_max_distance("NaN").is_err());
    }

    #[test]
    fn test_parse_drop_style() {
        assert_eq!(parse_drop_style("curved").unwrap(), DropStyle::Curved);
        assert_eq!(parse_drop_style(" STRAIGHT ").unwrap(), DropStyle::Straight);
        assert!(matches!(
            parse_drop_style("zigzag"),
            Err(CabledropError::InvalidStyle { style }) if style == "zigzag"
        ));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF00FF").unwrap(), "#ff00ff");
        assert_eq!(parse_hex_color("00ff00").unwrap(), "#00ff00");
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn test_parse_line_width() {
        assert_eq!(parse_line_width("2").unwrap(), 2.0);
        assert!(parse_line_width("0").is_err());
        assert!(parse_line_width("wide").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("max_distance"));
        assert!(map.contains_key("drop_style"));
        assert!(map.contains_key("drop_line_color"));
        assert!(map.contains_key("drop_line_width"));
        assert_eq!(map["folders.access"], ("HP".to_string(), ConfigSource::Default));

        let (distance, source) = &map["max_distance"];
        assert_eq!(distance, "100 m");
        assert_eq!(*source, ConfigSource::Default);
    }
}
