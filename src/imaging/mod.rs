//! Codec capability in pure Rust, with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Probe** | `image::ImageReader` (content-sniffed format, header dimensions) |
//! | **Resize** | Lanczos3 via `image::imageops` |
//! | **Encode → JPEG** | `jpeg-encoder`, progressive + optimized Huffman |
//! | **Encode → PNG** | `image` PNG encoder + `oxipng` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing codec operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, ImageInfo, SourceFormat};
pub use calculations::{exceeds_bounds, fit_inside};
pub use params::{
    Bounds, EncodeParams, Encoding, MAX_PNG_COMPRESSION, Quality, ResizeParams,
};
pub use rust_backend::RustBackend;
