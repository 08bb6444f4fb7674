use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;

fn write_test_image(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("strip.png");
    RgbImage::from_fn(16, 4, |x, _| Rgb([x as u8 * 10, 0, 255 - x as u8 * 10]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn analyzes_from_flags() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_test_image(dir.path());
    let out_root = dir.path().join("Output");

    Command::cargo_bin("line-profile")
        .unwrap()
        .arg(&image)
        .args(["--p1", "0,1", "--p2", "15,1"])
        .arg("--output-root")
        .arg(&out_root)
        .assert()
        .success()
        .stdout(predicate::str::contains("16 samples"));

    assert!(out_root.join("strip/RGB_Channels.csv").exists());
}

#[test]
fn config_file_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_test_image(dir.path());
    let out_root = dir.path().join("Output");

    let config_path = dir.path().join("run.json");
    std::fs::write(
        &config_path,
        format!(
            r#"{{
                "image_path": {:?},
                "p1": {{ "x": 0, "y": 0 }},
                "p2": {{ "x": 15, "y": 3 }},
                "image_name": "from-config",
                "output_root": {:?},
                "histogram_bins": 32
            }}"#,
            image, out_root
        ),
    )
    .unwrap();

    Command::cargo_bin("line-profile")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("16 samples"));

    assert!(out_root.join("from-config/plots.png").exists());
}

// Plain builds accept --log-json but tell the user it needs the `tracing`
// feature before falling back to the elapsed-time logger.
#[cfg(not(feature = "tracing"))]
#[test]
fn log_json_without_tracing_warns_and_still_runs() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_test_image(dir.path());
    let out_root = dir.path().join("Output");

    Command::cargo_bin("line-profile")
        .unwrap()
        .arg(&image)
        .args(["--p1", "0,1", "--p2", "15,1", "--log-json"])
        .arg("--output-root")
        .arg(&out_root)
        .assert()
        .success()
        .stderr(predicate::str::contains("`tracing` feature"));

    assert!(out_root.join("strip/RGB_Channels.csv").exists());
}

#[test]
fn missing_endpoints_fail_with_a_message() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_test_image(dir.path());

    Command::cargo_bin("line-profile")
        .unwrap()
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--p1 is required"));
}

#[test]
fn malformed_point_is_rejected_by_the_parser() {
    Command::cargo_bin("line-profile")
        .unwrap()
        .args(["img.png", "--p1", "12;7", "--p2", "0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y"));
}
