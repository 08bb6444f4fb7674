use std::{env, path::PathBuf, time::Instant};

use line_profile::{analyze, AnalyzeConfig};

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/analyze_config.json"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = parse_config_path();
    let cfg = AnalyzeConfig::load_json(&config_path)?;

    let t_total = Instant::now();
    let report = analyze(&cfg)?;
    let total_ms = t_total.elapsed().as_millis();

    println!(
        "analyzed {} ({}x{}) in {total_ms} ms",
        report.image_path.display(),
        report.width,
        report.height
    );
    println!("{} samples -> {}", report.samples, report.csv.display());
    for path in &report.annotated {
        println!("annotated: {}", path.display());
    }

    let report_path = cfg.output_dir().join("report.json");
    report.write_json(&report_path)?;
    println!("wrote report JSON to {}", report_path.display());

    Ok(())
}
