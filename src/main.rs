use clap::Parser;
use imgopt::config::{
    DEFAULT_INPUT_DIR, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_OUTPUT_DIR,
    DEFAULT_QUALITY, OptimizerConfig,
};
use imgopt::{output, process};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "imgopt")]
#[command(version)]
#[command(about = "Batch-optimize JPEG and PNG images for the web")]
#[command(long_about = "\
Batch-optimize JPEG and PNG images for the web

Every .jpg/.jpeg/.png (and upper-case variants) directly inside the input
directory is scaled down to fit the bounding box, re-encoded, and written
under the same name to the output directory:

  images/
  ├── a.jpg                 # 2000x1000 → optimized/a.jpg, 1920x960 progressive JPEG
  ├── b.png                 # 800x600   → optimized/b.png, interlaced max-compression PNG
  ├── notes.txt             # ignored
  └── optimized/            # created on first run, overwritten on reruns

Files that fail are reported and skipped; the exit status is non-zero only
when the run cannot start.

Set RUST_LOG (e.g. RUST_LOG=imgopt=debug) for stage-level diagnostics.")]
struct Cli {
    /// Directory to scan for images (not recursive)
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Directory that receives the optimized copies
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// JPEG quality (0-100)
    #[arg(long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: u8,

    /// Maximum output width in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH)]
    max_width: u32,

    /// Maximum output height in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_HEIGHT)]
    max_height: u32,

    /// Print a JSON report instead of the summary
    #[arg(long)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            input_dir: self.input.clone(),
            output_dir: self.output.clone(),
            quality: self.quality,
            max_width: self.max_width,
            max_height: self.max_height,
            ..OptimizerConfig::default()
        }
    }
}

/// Filter used when `RUST_LOG` is unset. Job failures already reach stdout
/// as progress lines, so `warn!` stays hidden unless asked for.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "error" }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.to_config();
    config.validate()?;

    let show_progress = !cli.json;
    if show_progress {
        output::print_header();
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            if show_progress {
                for line in output::format_process_event(&event) {
                    println!("{}", line);
                }
            }
        }
    });
    let result = process::process(&config, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    let report = result?;

    if cli.json {
        println!("{}", output::format_json_report(&report, &config)?);
    } else if report.summary.total_jobs() > 0 {
        output::print_summary(&report.summary, &config.output_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["imgopt"]);
        assert_eq!(cli.to_config(), OptimizerConfig::default());
        assert!(!cli.json);
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::parse_from([
            "imgopt",
            "--input",
            "photos",
            "--quality",
            "70",
            "--max-width",
            "800",
        ]);
        let config = cli.to_config();
        assert_eq!(config.input_dir, PathBuf::from("photos"));
        assert_eq!(config.quality, 70);
        assert_eq!(config.max_width, 800);
        assert_eq!(config.max_height, 1080);
    }

    #[test]
    fn default_filter_hides_job_warnings() {
        assert_eq!(default_filter(false), "error");
        assert_eq!(default_filter(true), "debug");
    }

    #[test]
    fn cli_rejects_out_of_range_quality() {
        assert!(Cli::try_parse_from(["imgopt", "--quality", "101"]).is_err());
    }
}
