use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use line_profile::{analyze, AnalyzeConfig};
use line_profile_core::Point;
use log::LevelFilter;

/// Sample RGB intensity profiles along a line drawn on an image.
#[derive(Parser, Debug)]
#[command(name = "line-profile", version, about)]
struct Args {
    /// Path to the input image (required unless --config is given).
    image: Option<PathBuf>,

    /// Starting endpoint of the segment, as X,Y.
    #[arg(long, value_parser = parse_point)]
    p1: Option<Point>,

    /// Ending endpoint of the segment, as X,Y.
    #[arg(long, value_parser = parse_point)]
    p2: Option<Point>,

    /// JSON config file; flags given alongside it override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root directory for analysis outputs.
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Name of the per-image output subdirectory (defaults to the file stem).
    #[arg(long)]
    name: Option<String>,

    /// Histogram bin count.
    #[arg(long)]
    bins: Option<usize>,

    /// Overlay line thickness in pixels.
    #[arg(long)]
    thickness: Option<u32>,

    /// Overlay intensity (0-255).
    #[arg(long)]
    shade: Option<u8>,

    /// Open preview windows after the run.
    #[arg(long)]
    show: bool,

    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines (needs a build with the `tracing` feature).
    #[arg(long)]
    log_json: bool,
}

fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{raw}`"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in `{raw}`"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in `{raw}`"))?;
    Ok(Point::new(x, y))
}

fn build_config(args: &Args) -> Result<AnalyzeConfig, String> {
    let mut cfg = match &args.config {
        Some(path) => AnalyzeConfig::load_json(path)
            .map_err(|e| format!("failed to load config {}: {e}", path.display()))?,
        None => {
            let image = args
                .image
                .clone()
                .ok_or("an image path or --config is required")?;
            let p1 = args.p1.ok_or("--p1 is required without --config")?;
            let p2 = args.p2.ok_or("--p2 is required without --config")?;
            AnalyzeConfig::new(image, p1, p2)
        }
    };

    if let Some(image) = &args.image {
        cfg.image_path = image.clone();
    }
    if let Some(p1) = args.p1 {
        cfg.p1 = p1;
    }
    if let Some(p2) = args.p2 {
        cfg.p2 = p2;
    }
    if let Some(root) = &args.output_root {
        cfg.output_root = root.clone();
    }
    if let Some(name) = &args.name {
        cfg.image_name = Some(name.clone());
    }
    if let Some(bins) = args.bins {
        cfg.histogram_bins = bins;
    }
    if let Some(thickness) = args.thickness {
        cfg.line_thickness = thickness;
    }
    if let Some(shade) = args.shade {
        cfg.overlay_shade = shade;
    }
    if args.show {
        cfg.show = true;
    }
    Ok(cfg)
}

#[cfg(feature = "tracing")]
fn init_logging(args: &Args, level: LevelFilter) {
    let default_filter = match level {
        LevelFilter::Trace => "trace",
        LevelFilter::Debug => "debug",
        _ => "info",
    };
    line_profile_core::init_tracing(args.log_json, default_filter);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(args: &Args, level: LevelFilter) {
    if args.log_json {
        eprintln!(
            "warning: --log-json needs a build with the `tracing` feature; using plain logs"
        );
    }
    let _ = line_profile_core::init_with_level(level);
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    init_logging(&args, level);

    let cfg = match build_config(&args) {
        Ok(cfg) => cfg,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };

    let report = match analyze(&cfg) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            return ExitCode::FAILURE;
        }
    };

    println!(
        "analyzed {}: {} samples -> {}",
        report.image_path.display(),
        report.samples,
        report.csv.display()
    );

    if let Some(path) = &args.report {
        if let Err(e) = report.write_json(path) {
            eprintln!("error: failed to write report {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        println!("wrote report JSON to {}", path.display());
    }

    ExitCode::SUCCESS
}
