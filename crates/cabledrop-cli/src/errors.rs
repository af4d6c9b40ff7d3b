use cabledrop_core::CabledropError;
use console::style;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), context: None, suggestions: Vec::new(), help_command: None }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a run that matched nothing
pub fn no_drops_produced(max_distance: f64) -> CliError {
    CliError::new("No cable drops generated")
        .with_context(format!(
            "No HP placemark had a FAT in the same BOUNDARY within {} m.",
            max_distance
        ))
        .with_suggestion("Raise the limit: cabledrop generate <input> --max-distance 200")
        .with_suggestion("Check that HP and FAT placemarks lie inside a BOUNDARY polygon")
        .with_suggestion("List points outside every region: cabledrop inspect <input>")
        .with_help("Run: cabledrop generate --help")
}

/// Create error for an unknown drop style
pub fn invalid_style(style: &str) -> CliError {
    CliError::new(format!("Invalid drop style: {}", style))
        .with_context("Drop paths are either straight (2 points) or curved (3 points).")
        .with_suggestion("Use --style straight or --style curved")
        .with_help("Run: cabledrop generate --help")
}

/// Create error for a missing input file
pub fn input_not_found(path: &Path) -> CliError {
    CliError::new("Input file not found")
        .with_context(format!("The specified KML file does not exist.\n\nPath: {}", path.display()))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Use absolute path or path relative to current directory")
        .with_help("Run: cabledrop generate --help")
}

/// Create error for an input the KML reader rejected
pub fn input_unreadable(path: &Path, reason: &str) -> CliError {
    CliError::new("Cannot read input file")
        .with_context(format!("Path: {}\n\nReason: {}", path.display(), reason))
        .with_suggestion("Make sure the file is valid KML")
        .with_suggestion("The file needs BOUNDARY, HP and FAT folders with placemarks")
        .with_help("Run: cabledrop inspect --help")
}

/// Create error for an unsupported input or output extension
pub fn unsupported_format(extension: &str, supported: &[String]) -> CliError {
    CliError::new(format!("Unsupported format: .{}", extension))
        .with_context(format!("Supported extensions: {}", supported.join(", ")))
        .with_suggestion("Pick an output path ending in .kml or .geojson")
        .with_suggestion("Or choose the format explicitly: --format kml")
        .with_help("Run: cabledrop generate --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check cabledrop.toml for syntax errors")
        .with_suggestion("Or unset the matching CABLEDROP_* environment variable")
        .with_help("Run: cabledrop config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    if let Some(core_error) = error.downcast_ref::<CabledropError>() {
        match core_error {
            CabledropError::InvalidStyle { style } => return invalid_style(style),
            CabledropError::UnsupportedFormat { extension, supported } => {
                return unsupported_format(extension, supported)
            }
            CabledropError::ConfigInvalid { key, reason } => return invalid_config(key, reason),
            _ => {}
        }
    }

    let message = format!("{:#}", error);

    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.to_lowercase().contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or run with appropriate privileges")
    } else {
        CliError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cli_error_passes_through() {
        let error = anyhow::Error::new(no_drops_produced(50.0));
        let converted = from_anyhow(error);

        assert_eq!(converted.message, "No cable drops generated");
        assert!(converted.context.unwrap().contains("50 m"));
        assert_eq!(converted.suggestions.len(), 3);
    }

    #[test]
    fn test_core_error_behind_context() {
        let result: Result<(), CabledropError> =
            Err(CabledropError::InvalidStyle { style: "zigzag".to_string() });
        let error = result.context("Failed to load configuration").unwrap_err();

        let converted = from_anyhow(error);
        assert_eq!(converted.message, "Invalid drop style: zigzag");
    }

    #[test]
    fn test_unsupported_format_lists_extensions() {
        let error = anyhow::Error::new(CabledropError::UnsupportedFormat {
            extension: "shp".to_string(),
            supported: vec!["kml".to_string(), "geojson".to_string()],
        });

        let converted = from_anyhow(error);
        assert_eq!(converted.message, "Unsupported format: .shp");
        assert_eq!(converted.context.as_deref(), Some("Supported extensions: kml, geojson"));
    }

    #[test]
    fn test_plain_error_keeps_message() {
        let converted = from_anyhow(anyhow::anyhow!("something broke"));
        assert_eq!(converted.message, "something broke");
        assert!(converted.suggestions.is_empty());
    }
}
