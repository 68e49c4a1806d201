//! Optimizer configuration.
//!
//! The configuration is a single immutable value built once at startup and
//! passed by reference into [`process`](crate::process::process). There is no
//! config file and no environment lookup; the compiled-in defaults are:
//!
//! ```text
//! input_dir   = ./images
//! output_dir  = ./images/optimized
//! quality     = 85            # JPEG quality; advisory for PNG
//! max_width   = 1920
//! max_height  = 1080
//! extensions  = .jpg .jpeg .png .JPG .JPEG .PNG
//! ```
//!
//! The CLI can override individual values; [`OptimizerConfig::validate`]
//! rejects combinations the pipeline cannot honour.
//!
//! ## Extension matching
//!
//! Extensions are matched as exact, case-sensitive suffixes of the file name.
//! Casings not listed (`photo.Jpg`) are skipped.

use crate::imaging::Bounds;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Recognized file name suffixes.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".JPG", ".JPEG", ".PNG"];

pub const DEFAULT_INPUT_DIR: &str = "./images";
pub const DEFAULT_OUTPUT_DIR: &str = "./images/optimized";
pub const DEFAULT_QUALITY: u8 = 85;
pub const DEFAULT_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

/// Settings for one optimizer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Directory whose direct children are scanned for images.
    pub input_dir: PathBuf,
    /// Directory that receives optimized copies under the same file names.
    pub output_dir: PathBuf,
    /// JPEG quality (0-100). Passed to the PNG encoder as a hint only.
    pub quality: u8,
    pub max_width: u32,
    pub max_height: u32,
    /// File name suffixes that qualify a file for processing.
    pub extensions: Vec<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            quality: DEFAULT_QUALITY,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl OptimizerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quality > 100 {
            return Err(ConfigError::Validation(
                "quality must be 0-100".to_string(),
            ));
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ConfigError::Validation(
                "max_width and max_height must be non-zero".to_string(),
            ));
        }
        if self.extensions.iter().any(|e| e.is_empty()) {
            return Err(ConfigError::Validation(
                "extensions must not contain an empty suffix".to_string(),
            ));
        }
        Ok(())
    }

    /// The resize bounding box.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}
