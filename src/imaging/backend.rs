//! Codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the codec capability the optimizer depends
//! on: a startup availability check, `probe`, and `encode`. The pipeline never
//! touches pixels itself, so everything above this trait is backend-agnostic.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the recording
//! `MockBackend` defined at the bottom of this file.

use super::params::EncodeParams;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Container format detected from file contents (not the extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    /// Any other decodable format, by lowercase name (`"webp"`, `"gif"`, ...).
    Other(String),
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Jpeg => f.write_str("jpeg"),
            SourceFormat::Png => f.write_str("png"),
            SourceFormat::Other(name) => f.write_str(name),
        }
    }
}

/// Result of a probe operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: SourceFormat,
}

impl ImageInfo {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for codec backends.
pub trait ImageBackend {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Fail if a codec the optimizer relies on is missing from this build.
    fn check_available(&self) -> Result<(), BackendError>;

    /// Read dimensions and format without a full decode.
    fn probe(&self, path: &Path) -> Result<ImageInfo, BackendError>;

    /// Decode, optionally resize, and encode. Returns the encoded bytes.
    fn encode(&self, params: &EncodeParams) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{Encoding, ResizeParams};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock backend that records operations without touching pixels.
    ///
    /// Images are registered by file name; probing an unregistered file fails
    /// like an undecodable one would.
    #[derive(Default)]
    pub struct MockBackend {
        pub images: Mutex<HashMap<String, MockImage>>,
        pub unavailable: Option<String>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone)]
    pub struct MockImage {
        pub info: ImageInfo,
        /// Length of the byte buffer `encode` returns.
        pub encoded_len: usize,
        pub fail_encode: bool,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Probe(String),
        Encode {
            source: String,
            output: String,
            resize: Option<ResizeParams>,
            encoding: Encoding,
        },
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_image(self, name: &str, info: ImageInfo, encoded_len: usize) -> Self {
            self.images.lock().unwrap().insert(
                name.to_string(),
                MockImage {
                    info,
                    encoded_len,
                    fail_encode: false,
                },
            );
            self
        }

        pub fn with_broken_encoder(self, name: &str, info: ImageInfo) -> Self {
            self.images.lock().unwrap().insert(
                name.to_string(),
                MockImage {
                    info,
                    encoded_len: 0,
                    fail_encode: true,
                },
            );
            self
        }

        pub fn unavailable(reason: &str) -> Self {
            Self {
                unavailable: Some(reason.to_string()),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    pub fn info(width: u32, height: u32, format: SourceFormat) -> ImageInfo {
        ImageInfo {
            width,
            height,
            format,
        }
    }

    impl ImageBackend for MockBackend {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn check_available(&self) -> Result<(), BackendError> {
            match &self.unavailable {
                Some(reason) => Err(BackendError::Unsupported(reason.clone())),
                None => Ok(()),
            }
        }

        fn probe(&self, path: &Path) -> Result<ImageInfo, BackendError> {
            let name = file_name(path);
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Probe(name.clone()));

            self.images
                .lock()
                .unwrap()
                .get(&name)
                .map(|img| img.info.clone())
                .ok_or_else(|| BackendError::Decode(format!("{name}: not an image")))
        }

        fn encode(&self, params: &EncodeParams) -> Result<Vec<u8>, BackendError> {
            let name = file_name(&params.source);
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                source: name.clone(),
                output: params.output.to_string_lossy().to_string(),
                resize: params.resize,
                encoding: params.encoding,
            });

            let images = self.images.lock().unwrap();
            let image = images
                .get(&name)
                .ok_or_else(|| BackendError::Decode(format!("{name}: not an image")))?;
            if image.fail_encode {
                return Err(BackendError::Encode(format!("{name}: encoder crashed")));
            }
            Ok(vec![0u8; image.encoded_len])
        }
    }

    #[test]
    fn mock_records_probe() {
        let backend =
            MockBackend::new().with_image("a.jpg", info(800, 600, SourceFormat::Jpeg), 10);

        let result = backend.probe(Path::new("/in/a.jpg")).unwrap();
        assert_eq!(result.dimensions(), (800, 600));
        assert_eq!(result.format, SourceFormat::Jpeg);

        let ops = backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Probe("a.jpg".to_string())]);
    }

    #[test]
    fn mock_probe_unknown_file_errors() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.probe(Path::new("/in/notes.jpg")),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn mock_encode_returns_configured_length() {
        let backend =
            MockBackend::new().with_image("b.png", info(10, 10, SourceFormat::Png), 42);
        let bytes = backend
            .encode(&EncodeParams {
                source: PathBuf::from("/in/b.png"),
                output: PathBuf::from("/out/b.png"),
                resize: None,
                encoding: Encoding::Default,
            })
            .unwrap();
        assert_eq!(bytes.len(), 42);
    }

    #[test]
    fn mock_unavailable_fails_check() {
        let backend = MockBackend::unavailable("no png");
        assert!(backend.check_available().is_err());
        assert!(MockBackend::new().check_available().is_ok());
    }

    #[test]
    fn source_format_display() {
        assert_eq!(SourceFormat::Jpeg.to_string(), "jpeg");
        assert_eq!(SourceFormat::Png.to_string(), "png");
        assert_eq!(SourceFormat::Other("webp".into()).to_string(), "webp");
    }
}
