//! # imgopt
//!
//! A batch image optimizer. Every JPEG and PNG directly under an input
//! directory is shrunk to fit a bounding box, re-encoded with web-friendly
//! settings, and written under the same file name to an output directory.
//! Each file's size change is reported along with run totals.
//!
//! # Architecture: One Pass, Named Stages
//!
//! ```text
//! scan      images/           →  jobs          (non-recursive, extension filter)
//! probe     job               →  size, dims    (content-sniffed format)
//! resize    dims + bounds     →  plan          (fit inside, never enlarge)
//! encode    plan + format     →  bytes         (progressive JPEG / interlaced PNG)
//! write     bytes             →  optimized/    (overwrites previous output)
//! measure   output file       →  stats         (savings, totals)
//! ```
//!
//! Jobs run one at a time in directory-listing order. A file that fails any
//! stage is recorded as failed and the run continues; only problems detected
//! before the first job (missing codecs, unreadable input directory, invalid
//! settings) abort the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Run settings and compiled-in defaults |
//! | [`scan`] | Input discovery and output directory setup |
//! | [`process`] | The per-job pipeline and batch driver |
//! | [`summary`] | Per-job outcomes and run totals |
//! | [`imaging`] | Codec backend: probe, resize, encode |
//! | [`output`] | Human and JSON rendering of progress and results |
//! | [`error`] | Run-fatal and per-job error kinds |
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses `image` (decode, Lanczos3 resize, PNG),
//! `jpeg-encoder` (progressive JPEG with optimized Huffman tables), and
//! `oxipng` (PNG recompression and Adam7 interlacing). No system libraries
//! are needed, so the binary is self-contained.

pub mod config;
pub mod error;
pub mod imaging;
pub mod output;
pub mod process;
pub mod scan;
pub mod summary;
