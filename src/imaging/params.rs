//! Parameter types for codec operations.
//!
//! These structs describe *what* to produce, not *how*. They are the interface
//! between the [`process`](crate::process) stages (which decide whether to
//! resize and which encoder to use) and the [`backend`](super::backend) (which
//! does the pixel work). Keeping them plain data lets the pipeline run against
//! a recording mock in tests.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100). Clamped on construction.
//! - [`Bounds`]: Bounding box for a fit-inside resize.
//! - [`ResizeParams`]: Exact target dimensions decided by the pipeline.
//! - [`Encoding`]: Format-specific encoder settings.
//! - [`EncodeParams`]: Everything the backend needs to turn one source into bytes.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Maximum output dimensions. Images larger on either axis are scaled down
/// to fit inside; smaller images are never enlarged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_width: u32,
    pub max_height: u32,
}

/// Target dimensions for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
}

/// Highest PNG compression level (zlib scale).
pub const MAX_PNG_COMPRESSION: u8 = 9;

/// Encoder selection for one output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Re-encode as JPEG.
    Jpeg {
        quality: Quality,
        progressive: bool,
        /// Compute per-image Huffman tables instead of the standard ones.
        optimize_coding: bool,
    },
    /// Re-encode as PNG. `quality` is advisory; the encoder is lossless.
    Png {
        quality: Quality,
        /// 0 (fastest) to [`MAX_PNG_COMPRESSION`] (smallest).
        compression_level: u8,
        interlaced: bool,
    },
    /// Encoder defaults for whatever container the output file name implies.
    Default,
}

/// Full specification of one transform: decode `source`, optionally resize,
/// encode. `output` only selects the container for [`Encoding::Default`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub resize: Option<ResizeParams>,
    pub encoding: Encoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }
}
