//! Pure Rust codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Probe | `image::ImageReader` with content sniffing, header-only dimensions |
//! | Decode | `image` crate decoders (JPEG, PNG, TIFF, WebP, GIF) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `jpeg-encoder` (progressive scans, optimized Huffman tables) |
//! | Encode → PNG | `image` PNG encoder, then `oxipng` recompression + Adam7 |
//! | Encode → other | `image::DynamicImage::write_to` with encoder defaults |

use super::backend::{BackendError, ImageBackend, ImageInfo, SourceFormat};
use super::params::{EncodeParams, Encoding, MAX_PNG_COMPRESSION, Quality};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use tracing::debug;

/// Codecs the optimizer cannot run without.
const REQUIRED_CODECS: &[(&str, ImageFormat)] =
    &[("JPEG", ImageFormat::Jpeg), ("PNG", ImageFormat::Png)];

/// Highest oxipng preset.
const MAX_OXIPNG_PRESET: u8 = 6;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Open a reader whose format is sniffed from the file contents.
fn open_sniffed(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_sniffed(path)?
        .decode()
        .map_err(|e| BackendError::Decode(e.to_string()))
}

fn source_format(format: ImageFormat) -> SourceFormat {
    match format {
        ImageFormat::Jpeg => SourceFormat::Jpeg,
        ImageFormat::Png => SourceFormat::Png,
        other => SourceFormat::Other(format!("{other:?}").to_lowercase()),
    }
}

/// Encode as JPEG via `jpeg-encoder`, which supports progressive scans.
fn encode_jpeg(
    img: &DynamicImage,
    quality: Quality,
    progressive: bool,
    optimize_coding: bool,
) -> Result<Vec<u8>, BackendError> {
    let too_large = |axis: &str, value: u32| {
        BackendError::Unsupported(format!("JPEG {axis} {value}px exceeds 65535px"))
    };
    let width = u16::try_from(img.width()).map_err(|_| too_large("width", img.width()))?;
    let height = u16::try_from(img.height()).map_err(|_| too_large("height", img.height()))?;

    let mut buf = Vec::new();
    let mut encoder = jpeg_encoder::Encoder::new(&mut buf, quality.value());
    encoder.set_progressive(progressive);
    encoder.set_optimized_huffman_tables(optimize_coding);

    let encoded = if img.color().has_color() {
        let rgb = img.to_rgb8();
        encoder.encode(rgb.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)
    } else {
        let luma = img.to_luma8();
        encoder.encode(luma.as_raw(), width, height, jpeg_encoder::ColorType::Luma)
    };
    encoded.map_err(|e| BackendError::Encode(format!("JPEG: {e}")))?;

    Ok(buf)
}

/// Map the 0–9 zlib-style level onto the `image` encoder's coarse setting.
fn png_compression(level: u8) -> CompressionType {
    match level {
        0..=2 => CompressionType::Fast,
        3..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Map the 0–9 zlib-style level onto oxipng's 0–6 presets.
fn oxipng_preset(level: u8) -> u8 {
    let level = level.min(MAX_PNG_COMPRESSION) as u32;
    ((level * MAX_OXIPNG_PRESET as u32 + MAX_PNG_COMPRESSION as u32 / 2)
        / MAX_PNG_COMPRESSION as u32) as u8
}

/// Encode as PNG, then let oxipng search filters and deflate settings.
fn encode_png(
    img: &DynamicImage,
    compression_level: u8,
    interlaced: bool,
) -> Result<Vec<u8>, BackendError> {
    let mut raw = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        &mut raw,
        png_compression(compression_level),
        PngFilter::Adaptive,
    );
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode(format!("PNG: {e}")))?;

    let mut options = oxipng::Options::from_preset(oxipng_preset(compression_level));
    if interlaced {
        options.interlace = Some(oxipng::Interlacing::Adam7);
        // Keep the interlaced result even when it is not smaller.
        options.force = true;
    }
    oxipng::optimize_from_memory(&raw, &options)
        .map_err(|e| BackendError::Encode(format!("PNG optimization: {e}")))
}

/// Encode with the `image` crate's defaults for the container `output` implies.
fn encode_default(img: &DynamicImage, output: &Path) -> Result<Vec<u8>, BackendError> {
    let format = ImageFormat::from_path(output).map_err(|_| {
        BackendError::Unsupported(format!("no encoder for {}", output.display()))
    })?;

    let mut buf = Cursor::new(Vec::new());
    let written = if format == ImageFormat::Jpeg {
        // JPEG has no alpha channel
        DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut buf, format)
    } else {
        img.write_to(&mut buf, format)
    };
    written.map_err(|e| BackendError::Encode(format!("{format:?}: {e}")))?;

    Ok(buf.into_inner())
}

impl ImageBackend for RustBackend {
    fn name(&self) -> &'static str {
        "image-rs"
    }

    fn check_available(&self) -> Result<(), BackendError> {
        for (name, format) in REQUIRED_CODECS {
            if !format.reading_enabled() || !format.writing_enabled() {
                return Err(BackendError::Unsupported(format!(
                    "{name} codec not compiled into this build"
                )));
            }
        }
        Ok(())
    }

    fn probe(&self, path: &Path) -> Result<ImageInfo, BackendError> {
        let reader = open_sniffed(path)?;
        let format = reader
            .format()
            .ok_or_else(|| BackendError::Decode("unrecognized image format".to_string()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(ImageInfo {
            width,
            height,
            format: source_format(format),
        })
    }

    fn encode(&self, params: &EncodeParams) -> Result<Vec<u8>, BackendError> {
        let img = load_image(&params.source)?;

        let img = match params.resize {
            Some(target) => {
                debug!(
                    from = ?(img.width(), img.height()),
                    to = ?(target.width, target.height),
                    "resizing"
                );
                img.resize_exact(target.width, target.height, FilterType::Lanczos3)
            }
            None => img,
        };

        match params.encoding {
            Encoding::Jpeg {
                quality,
                progressive,
                optimize_coding,
            } => encode_jpeg(&img, quality, progressive, optimize_coding),
            Encoding::Png {
                compression_level,
                interlaced,
                ..
            } => encode_png(&img, compression_level, interlaced),
            Encoding::Default => encode_default(&img, &params.output),
        }
    }
}
