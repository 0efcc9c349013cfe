//! Loader for the RON movement tuning file.

use ron::Options;
use std::fs;
use std::path::Path;

use super::tuning::MovementTuning;

/// Error type for configuration loading failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse and validate tuning from RON text. `file` is only used for error context.
pub fn parse_movement_tuning(contents: &str, file: &str) -> Result<MovementTuning, ConfigLoadError> {
    let tuning: MovementTuning = ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    tuning.validate().map_err(|e| ConfigLoadError {
        file: file.to_string(),
        message: format!("Validation error: {}", e),
    })?;

    Ok(tuning)
}

/// Load movement tuning from a RON file on disk.
pub fn load_movement_tuning(path: &Path) -> Result<MovementTuning, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_movement_tuning(&contents, &file_name)
}
