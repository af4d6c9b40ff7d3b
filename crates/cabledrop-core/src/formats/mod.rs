//! Format abstraction layer
//!
//! Readers turn a file into a [`SiteDataset`]; writers turn a dataset (with its
//! generated drops) back into a file. The [`FormatRegistry`] picks the right
//! implementation from a file extension.

use std::fs;
use std::path::Path;

use crate::config::LayeredConfig;
use crate::error::{CabledropError, Result};
use crate::models::SiteDataset;

pub mod geojson;
pub mod kml;
pub mod kml_writer;
pub mod style;
pub mod validation;

pub use self::geojson::GeoJsonWriter;
pub use self::kml::{FolderNames, KmlReader};
pub use self::kml_writer::KmlWriter;
pub use self::style::StyleSheet;

/// Format reader trait that all input formats implement
pub trait FormatReader: Send + Sync {
    /// Read a dataset from the given path
    fn read(&self, path: &Path) -> Result<SiteDataset> {
        let content = fs::read_to_string(path).map_err(|e| CabledropError::FormatError {
            format: self.format_name().to_string(),
            message: format!("Failed to open {}: {}", path.display(), e),
        })?;

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed");
        self.read_str(name, &content)
    }

    /// Parse in-memory content into a dataset called `name`
    fn read_str(&self, name: &str, content: &str) -> Result<SiteDataset>;

    /// Get supported file extensions (e.g., ["kml"])
    fn supported_extensions(&self) -> &[&str];

    /// Get human-readable format name (e.g., "KML")
    fn format_name(&self) -> &str;

    /// Validate file structure without building entities
    fn validate(&self, _path: &Path) -> Result<FormatValidation> {
        Ok(FormatValidation::default())
    }
}

/// Format writer trait that all output formats implement
pub trait FormatWriter: Send + Sync {
    /// Serialize the dataset, drops included
    fn write_string(&self, dataset: &SiteDataset) -> Result<String>;

    /// Serialize the dataset to a file
    fn write(&self, dataset: &SiteDataset, path: &Path) -> Result<()> {
        let content = self.write_string(dataset)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn supported_extensions(&self) -> &[&str];

    fn format_name(&self) -> &str;
}

/// Result of format validation
#[derive(Debug, Clone, Default)]
pub struct FormatValidation {
    /// Validation errors that prevent reading
    pub errors: Vec<String>,

    /// Warnings that don't prevent reading but indicate potential issues
    pub warnings: Vec<String>,
}

impl FormatValidation {
    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Central registry for format readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn FormatReader>>,
    writers: Vec<Box<dyn FormatWriter>>,
}

impl FormatRegistry {
    /// Create a new empty format registry
    pub fn new() -> Self {
        Self { readers: Vec::new(), writers: Vec::new() }
    }

    /// Registry with the KML reader and the KML and GeoJSON writers
    pub fn with_defaults(styles: StyleSheet, folders: FolderNames) -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(KmlReader::new(folders.clone())));
        registry.register_writer(Box::new(KmlWriter::new(styles).with_folders(folders)));
        registry.register_writer(Box::new(GeoJsonWriter));
        registry
    }

    /// Default formats using the configured styles and folder names
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self::with_defaults(StyleSheet::from_config(config), config.folders.value.clone())
    }

    pub fn register_reader(&mut self, reader: Box<dyn FormatReader>) {
        self.readers.push(reader);
    }

    pub fn register_writer(&mut self, writer: Box<dyn FormatWriter>) {
        self.writers.push(writer);
    }

    /// Reader that supports the path's extension
    pub fn detect_reader(&self, path: &Path) -> Result<&dyn FormatReader> {
        let extension = self.extension_of(path, self.supported_input_formats())?;

        self.readers
            .iter()
            .find(|r| r.supported_extensions().iter().any(|e| e.eq_ignore_ascii_case(&extension)))
            .map(|r| r.as_ref())
            .ok_or_else(|| CabledropError::UnsupportedFormat {
                extension,
                supported: self.supported_input_formats(),
            })
    }

    /// Writer that supports the path's extension
    pub fn detect_writer(&self, path: &Path) -> Result<&dyn FormatWriter> {
        let extension = self.extension_of(path, self.supported_output_formats())?;

        self.writer_for_extension(&extension)
    }

    /// Writer registered for an extension such as "kml" or "geojson"
    pub fn writer_for_extension(&self, extension: &str) -> Result<&dyn FormatWriter> {
        self.writers
            .iter()
            .find(|w| w.supported_extensions().iter().any(|e| e.eq_ignore_ascii_case(extension)))
            .map(|w| w.as_ref())
            .ok_or_else(|| CabledropError::UnsupportedFormat {
                extension: extension.to_string(),
                supported: self.supported_output_formats(),
            })
    }

    /// Get list of all readable extensions
    pub fn supported_input_formats(&self) -> Vec<String> {
        self.readers
            .iter()
            .flat_map(|r| r.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }

    /// Get list of all writable extensions
    pub fn supported_output_formats(&self) -> Vec<String> {
        self.writers
            .iter()
            .flat_map(|w| w.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }

    fn extension_of(&self, path: &Path, supported: Vec<String>) -> Result<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_string())
            .ok_or_else(|| CabledropError::UnsupportedFormat {
                extension: "none".to_string(),
                supported,
            })
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults(StyleSheet::default(), FolderNames::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockReader {
        extensions: Vec<&'static str>,
        name: &'static str,
    }

    impl FormatReader for MockReader {
        fn read_str(&self, name: &str, _content: &str) -> Result<SiteDataset> {
            Ok(SiteDataset::new(name))
        }

        fn supported_extensions(&self) -> &[&str] {
            &self.extensions
        }

        fn format_name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn test_format_registry_creation() {
        let registry = FormatRegistry::new();
        assert!(registry.supported_input_formats().is_empty());
        assert!(registry.supported_output_formats().is_empty());
    }

    #[test]
    fn test_default_registry() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.supported_input_formats(), vec!["kml"]);
        assert_eq!(registry.supported_output_formats(), vec!["kml", "geojson", "json"]);
    }

    #[test]
    fn test_reader_detection() {
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(MockReader { extensions: vec!["kml"], name: "KML" }));
        registry.register_reader(Box::new(MockReader { extensions: vec!["gpx"], name: "GPX" }));

        let reader = registry.detect_reader(Path::new("site.KML")).unwrap();
        assert_eq!(reader.format_name(), "KML");

        let reader = registry.detect_reader(Path::new("tracks.gpx")).unwrap();
        assert_eq!(reader.format_name(), "GPX");
    }

    #[test]
    fn test_writer_detection() {
        let registry = FormatRegistry::default();

        assert_eq!(registry.detect_writer(Path::new("out.kml")).unwrap().format_name(), "KML");
        assert_eq!(
            registry.detect_writer(Path::new("out.geojson")).unwrap().format_name(),
            "GeoJSON"
        );
        assert_eq!(registry.writer_for_extension("json").unwrap().format_name(), "GeoJSON");
    }

    #[test]
    fn test_unsupported_format() {
        let registry = FormatRegistry::default();

        let err = registry.detect_reader(Path::new("site.shp")).err().unwrap();
        assert!(matches!(err, CabledropError::UnsupportedFormat { .. }));

        assert!(registry.detect_reader(Path::new("no_extension")).is_err());
        assert!(registry.detect_writer(Path::new("out.csv")).is_err());
    }

    #[test]
    fn test_mock_reader_uses_file_stem() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("area_51.kml");
        std::fs::write(&path, "<kml/>").unwrap();

        let reader = MockReader { extensions: vec!["kml"], name: "KML" };
        assert_eq!(reader.read(&path).unwrap().name, "area_51");
    }

    #[test]
    fn test_format_validation_with_errors() {
        let validation =
            FormatValidation { errors: vec!["Missing file".to_string()], warnings: vec![] };
        assert!(!validation.is_valid());
        assert!(!validation.has_warnings());
    }

    #[test]
    fn test_format_validation_with_warnings() {
        let validation =
            FormatValidation { errors: vec![], warnings: vec!["Unclosed ring".to_string()] };
        assert!(validation.is_valid());
        assert!(validation.has_warnings());
    }
}
