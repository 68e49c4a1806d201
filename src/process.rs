//! The optimization pipeline.
//!
//! [`process`] runs a whole batch; [`optimize_image`] runs one job through
//! five named stages, each returning a `Result`:
//!
//! ```text
//! probe ──► decide_resize ──► select_encoding ──► encode ──► write ──► measure
//!  │ size + dims/format        │ fit-inside plan     │ backend    │ fs       │ new size
//! ```
//!
//! Jobs run strictly one after another in discovery order. A failing stage
//! ends its job with [`JobResult::Failed`]; the batch moves on. Only the
//! checks before the first job (codec availability, directories, config)
//! can abort a run.
//!
//! ## Encoder selection
//!
//! | Detected source | Output |
//! |---|---|
//! | JPEG | progressive JPEG at `quality`, optimized Huffman tables |
//! | PNG | PNG at maximum compression, Adam7 interlaced (`quality` advisory) |
//! | anything else | encoder defaults for the output file's extension |
//!
//! ## Progress
//!
//! Callers can pass a channel sender; a [`ProcessEvent`] is sent as each job
//! starts and finishes so output can be printed while the batch runs.

use crate::config::OptimizerConfig;
use crate::error::{JobError, OptimizeError};
use crate::imaging::{
    BackendError, Bounds, EncodeParams, Encoding, ImageBackend, ImageInfo, MAX_PNG_COMPRESSION, Quality,
    ResizeParams, RustBackend, SourceFormat, exceeds_bounds, fit_inside,
};
use crate::scan::{self, ImageJob};
use crate::summary::{JobRecord, JobResult, JobStats, RunReport, RunSummary, savings_percent};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    OutputDirCreated {
        path: PathBuf,
    },
    NoImagesFound {
        input_dir: PathBuf,
    },
    Started {
        total: usize,
    },
    ImageStarted {
        index: usize,
        total: usize,
        file_name: String,
    },
    ImageFinished {
        index: usize,
        total: usize,
        file_name: String,
        outcome: Result<JobStats, String>,
    },
}

fn emit(events: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is printing.
        tx.send(event).ok();
    }
}

/// Optimize every qualifying image with the pure Rust backend.
pub fn process(
    config: &OptimizerConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunReport, OptimizeError> {
    process_with_backend(&RustBackend::new(), config, events)
}

/// Optimize every qualifying image using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    config: &OptimizerConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunReport, OptimizeError> {
    config.validate()?;
    backend
        .check_available()
        .map_err(|e| OptimizeError::DependencyUnavailable {
            codec: backend.name(),
            reason: e.to_string(),
        })?;

    let scanned = scan::scan(config)?;
    if scanned.created_output_dir {
        emit(
            &events,
            ProcessEvent::OutputDirCreated {
                path: config.output_dir.clone(),
            },
        );
    }

    if scanned.jobs.is_empty() {
        emit(
            &events,
            ProcessEvent::NoImagesFound {
                input_dir: config.input_dir.clone(),
            },
        );
        return Ok(RunReport::default());
    }

    let total = scanned.jobs.len();
    emit(&events, ProcessEvent::Started { total });

    let mut summary = RunSummary::default();
    let mut records = Vec::with_capacity(total);

    for (i, job) in scanned.jobs.into_iter().enumerate() {
        let index = i + 1;
        emit(
            &events,
            ProcessEvent::ImageStarted {
                index,
                total,
                file_name: job.file_name.clone(),
            },
        );

        let result = optimize_image(backend, &job, config);
        summary.record(&result);

        emit(
            &events,
            ProcessEvent::ImageFinished {
                index,
                total,
                file_name: job.file_name.clone(),
                outcome: result.to_outcome(),
            },
        );
        records.push(JobRecord { job, result });
    }

    Ok(RunReport { summary, records })
}

/// Run one job through every stage. Never fails: errors become
/// [`JobResult::Failed`].
pub fn optimize_image(
    backend: &impl ImageBackend,
    job: &ImageJob,
    config: &OptimizerConfig,
) -> JobResult {
    match run_stages(backend, job, config) {
        Ok(stats) => JobResult::Optimized(stats),
        Err(err) => {
            warn!(file = %job.file_name, kind = err.kind(), "{err}");
            JobResult::Failed(err)
        }
    }
}

fn run_stages(
    backend: &impl ImageBackend,
    job: &ImageJob,
    config: &OptimizerConfig,
) -> Result<JobStats, JobError> {
    let probed = probe(backend, &job.source)?;
    let resize = decide_resize(probed.info.dimensions(), config.bounds());
    let encoding = select_encoding(&probed.info.format, config.quality);

    let bytes = encode(
        backend,
        &EncodeParams {
            source: job.source.clone(),
            output: job.destination.clone(),
            resize,
            encoding,
        },
    )?;
    write(&job.destination, &bytes)?;
    let new_size = measure(&job.destination)?;

    let output_dimensions = resize
        .map(|r| (r.width, r.height))
        .unwrap_or(probed.info.dimensions());

    Ok(JobStats {
        original_size: probed.size,
        new_size,
        savings_percent: savings_percent(probed.size, new_size),
        resized: resize.is_some(),
        original_dimensions: probed.info.dimensions(),
        output_dimensions,
    })
}

/// What the probe stage learned about a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Probed {
    pub size: u64,
    pub info: ImageInfo,
}

/// Stage 1: byte size and image header of the source.
pub fn probe(backend: &impl ImageBackend, source: &Path) -> Result<Probed, JobError> {
    let probe_error = |e: BackendError| JobError::Probe {
        path: source.to_path_buf(),
        source: e,
    };

    let size = fs::metadata(source).map_err(|e| probe_error(e.into()))?.len();
    let info = backend.probe(source).map_err(probe_error)?;
    debug!(
        source = %source.display(),
        size,
        width = info.width,
        height = info.height,
        format = %info.format,
        "probed"
    );

    Ok(Probed { size, info })
}

/// Stage 2: plan a fit-inside resize when either edge is over its bound.
pub fn decide_resize(dimensions: (u32, u32), bounds: Bounds) -> Option<ResizeParams> {
    exceeds_bounds(dimensions, bounds).then(|| fit_inside(dimensions, bounds))
}

/// Stage 3: pick encoder settings by detected source format.
pub fn select_encoding(format: &SourceFormat, quality: u8) -> Encoding {
    match format {
        SourceFormat::Jpeg => Encoding::Jpeg {
            quality: Quality::new(quality),
            progressive: true,
            optimize_coding: true,
        },
        SourceFormat::Png => Encoding::Png {
            quality: Quality::new(quality),
            compression_level: MAX_PNG_COMPRESSION,
            interlaced: true,
        },
        SourceFormat::Other(_) => Encoding::Default,
    }
}

/// Stage 4: hand the transform to the codec backend.
pub fn encode(backend: &impl ImageBackend, params: &EncodeParams) -> Result<Vec<u8>, JobError> {
    let bytes = backend.encode(params).map_err(|e| JobError::Encode {
        path: params.source.clone(),
        source: e,
    })?;
    debug!(output = %params.output.display(), bytes = bytes.len(), "encoded");
    Ok(bytes)
}

/// Stage 5: persist the encoded image, replacing any previous output.
pub fn write(destination: &Path, bytes: &[u8]) -> Result<(), JobError> {
    fs::write(destination, bytes).map_err(|e| JobError::Write {
        path: destination.to_path_buf(),
        source: e,
    })
}

/// Stage 6: size of the written file as it landed on disk.
pub fn measure(destination: &Path) -> Result<u64, JobError> {
    fs::metadata(destination)
        .map(|m| m.len())
        .map_err(|e| JobError::Write {
            path: destination.to_path_buf(),
            source: e,
        })
}
