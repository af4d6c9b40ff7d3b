//! Checks run on an input before it is parsed

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

use crate::formats::FormatValidation;

/// Inputs above this size get a warning; matching is brute force
const LARGE_FILE_WARNING_MB: u64 = 50;

impl FormatValidation {
    /// Append the errors and warnings of `other`
    pub fn merge(&mut self, other: FormatValidation) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// File-level checks: the path exists, carries `extension` and is not huge
pub fn check_file(path: &Path, extension: &str) -> FormatValidation {
    let mut validation = FormatValidation::default();

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            validation.errors.push(format!("Cannot access {}: {}", path.display(), e));
            return validation;
        }
    };

    if !metadata.is_file() {
        validation.errors.push(format!("{} is not a file", path.display()));
        return validation;
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(extension) => {}
        Some(ext) => validation
            .errors
            .push(format!("Unexpected file extension: .{} (expected .{})", ext, extension)),
        None => validation.errors.push(format!("File has no extension (expected .{})", extension)),
    }

    let size_mb = metadata.len() / (1024 * 1024);
    if size_mb > LARGE_FILE_WARNING_MB {
        validation
            .warnings
            .push(format!("Large file ({} MB): generating drops may take a while", size_mb));
    }

    validation
}

/// Well-formed XML with at least one element
pub fn check_xml(content: &str) -> FormatValidation {
    let mut validation = FormatValidation::default();
    let mut reader = Reader::from_str(content);

    let mut saw_element = false;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(_)) | Ok(Event::Empty(_)) => saw_element = true,
            Ok(_) => {}
            Err(e) => {
                validation.errors.push(format!(
                    "Invalid XML at byte {}: {}",
                    reader.error_position(),
                    e
                ));
                return validation;
            }
        }
    }

    if !saw_element {
        validation.errors.push("Document contains no XML elements".to_string());
    }

    validation
}
