//! CLI output formatting for a run.
//!
//! # Output Format
//!
//! ```text
//! Image Optimization Tool
//!
//! ✓ Created output directory: ./images/optimized
//!
//! Found 2 images to optimize
//!
//! [1/2] Processing: a.jpg
//!   ✓ 488.28 KB → 146.48 KB (-70.0%)
//!   ↔ Resized 2000x1000 → 1920x960px
//!
//! [2/2] Processing: broken.jpg
//!   ✗ Error: Cannot read ./images/broken.jpg: Decode failed: ...
//!
//! ═══════════════════════════════════════
//! ✓ Successfully optimized: 1
//! ✗ Failed: 1
//!
//! Total size reduction:
//!   Before: 488.28 KB
//!   After:  146.48 KB
//!   Saved:  341.8 KB (-70.0%)
//!
//! Optimized images saved to: ./images/optimized
//! ```
//!
//! A savings figure is shown with a leading `-` (size went down); an output
//! that grew is shown as `+`.
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects. [`format_json_report`] renders the same run as a
//! single JSON document for `--json`.

use crate::config::OptimizerConfig;
use crate::process::ProcessEvent;
use crate::summary::{JobResult, JobStats, RunReport, RunSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};

const RULE: &str = "═══════════════════════════════════════";
const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];

// ============================================================================
// Shared helpers
// ============================================================================

/// Human-readable byte count, base 1024, at most two decimals.
///
/// Units stop at MB; larger values are shown as a large MB count.
pub fn format_bytes(bytes: i64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let sign = if bytes < 0 { "-" } else { "" };
    let magnitude = bytes.unsigned_abs() as f64;

    let mut unit = 0;
    while unit + 1 < UNITS.len() && magnitude >= 1024f64.powi(unit as i32 + 1) {
        unit += 1;
    }
    let scaled = (magnitude / 1024f64.powi(unit as i32) * 100.0).round() / 100.0;
    format!("{sign}{scaled} {}", UNITS[unit])
}

/// Savings as a signed percentage with one decimal: `-60.0%` saved,
/// `+20.0%` grew.
pub fn format_savings(percent: f64) -> String {
    if percent < 0.0 {
        format!("+{:.1}%", -percent)
    } else {
        format!("-{:.1}%", percent)
    }
}

fn stats_lines(stats: &JobStats) -> Vec<String> {
    let mut lines = vec![format!(
        "  ✓ {} → {} ({})",
        format_bytes(stats.original_size as i64),
        format_bytes(stats.new_size as i64),
        format_savings(stats.savings_percent)
    )];
    if stats.resized {
        let (ow, oh) = stats.original_dimensions;
        let (nw, nh) = stats.output_dimensions;
        lines.push(format!("  ↔ Resized {ow}x{oh} → {nw}x{nh}px"));
    }
    lines
}

// ============================================================================
// Progress
// ============================================================================

pub fn format_header() -> Vec<String> {
    vec!["Image Optimization Tool".to_string(), String::new()]
}

pub fn print_header() {
    for line in format_header() {
        println!("{}", line);
    }
}

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::OutputDirCreated { path } => vec![
            format!("✓ Created output directory: {}", path.display()),
            String::new(),
        ],
        ProcessEvent::NoImagesFound { input_dir } => {
            vec![format!("No images found in {}", input_dir.display())]
        }
        ProcessEvent::Started { total } => {
            vec![format!("Found {} images to optimize", total), String::new()]
        }
        ProcessEvent::ImageStarted {
            index,
            total,
            file_name,
        } => vec![format!("[{}/{}] Processing: {}", index, total, file_name)],
        ProcessEvent::ImageFinished { outcome, .. } => {
            let mut lines = match outcome {
                Ok(stats) => stats_lines(stats),
                Err(message) => vec![format!("  ✗ Error: {}", message)],
            };
            lines.push(String::new());
            lines
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Format the end-of-run summary block.
pub fn format_summary(summary: &RunSummary, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![
        RULE.to_string(),
        format!("✓ Successfully optimized: {}", summary.succeeded),
    ];
    if summary.failed > 0 {
        lines.push(format!("✗ Failed: {}", summary.failed));
    }

    lines.push(String::new());
    lines.push("Total size reduction:".to_string());
    lines.push(format!(
        "  Before: {}",
        format_bytes(summary.total_original as i64)
    ));
    lines.push(format!("  After:  {}", format_bytes(summary.total_new as i64)));
    lines.push(format!(
        "  Saved:  {} ({})",
        format_bytes(summary.bytes_saved()),
        format_savings(summary.savings_percent())
    ));
    lines.push(String::new());
    lines.push(format!(
        "Optimized images saved to: {}",
        output_dir.display()
    ));
    lines
}

pub fn print_summary(summary: &RunSummary, output_dir: &Path) {
    for line in format_summary(summary, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// JSON report
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    input_dir: &'a Path,
    output_dir: &'a Path,
    summary: JsonSummary<'a>,
    jobs: Vec<JsonJob<'a>>,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    #[serde(flatten)]
    totals: &'a RunSummary,
    bytes_saved: i64,
    savings_percent: f64,
}

#[derive(Serialize)]
struct JsonJob<'a> {
    file: &'a str,
    source: &'a Path,
    destination: &'a Path,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a JobStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_path: Option<PathBuf>,
}

/// Render the whole run as pretty-printed JSON.
pub fn format_json_report(
    report: &RunReport,
    config: &OptimizerConfig,
) -> serde_json::Result<String> {
    let jobs = report
        .records
        .iter()
        .map(|record| {
            let base = JsonJob {
                file: &record.job.file_name,
                source: &record.job.source,
                destination: &record.job.destination,
                status: "optimized",
                stats: None,
                error_kind: None,
                error: None,
                failed_path: None,
            };
            match &record.result {
                JobResult::Optimized(stats) => JsonJob {
                    stats: Some(stats),
                    ..base
                },
                JobResult::Failed(err) => JsonJob {
                    status: "failed",
                    error_kind: Some(err.kind()),
                    error: Some(err.to_string()),
                    failed_path: Some(err.path().to_path_buf()),
                    ..base
                },
            }
        })
        .collect();

    serde_json::to_string_pretty(&JsonReport {
        input_dir: &config.input_dir,
        output_dir: &config.output_dir,
        summary: JsonSummary {
            totals: &report.summary,
            bytes_saved: report.summary.bytes_saved(),
            savings_percent: report.summary.savings_percent(),
        },
        jobs,
    })
}

// ============================================================================
// Tests
// ============================================================================
