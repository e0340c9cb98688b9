use daylight3d::AnalysisConfig;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn daylight3d(args: &[&str]) -> anyhow::Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_daylight3d")).args(args).output()?)
}

fn write_ill(path: &Path, nrows: usize, ncols: usize) -> anyhow::Result<()> {
    let mut s = String::new();
    writeln!(s, "#?RADIANCE")?;
    writeln!(s, "NROWS={}", nrows)?;
    writeln!(s, "NCOLS={}", ncols)?;
    writeln!(s, "FORMAT=ascii")?;
    writeln!(s)?;
    for r in 0..nrows {
        let row: Vec<String> = (0..ncols).map(|j| (r * 100 + j).to_string()).collect();
        writeln!(s, "{}", row.join("\t"))?;
    }
    fs::write(path, s)?;
    Ok(())
}

fn write_measured_hour(dir: &Path, hour: u32) -> anyhow::Result<()> {
    let config = AnalysisConfig::new();
    let mut s = String::new();
    writeln!(s, "Time,{}", config.measured.columns.join(","))?;
    for _ in 0..7 {
        let cells = vec!["0.5"; config.measured.columns.len()];
        writeln!(s, "{:02}:00,{}", hour, cells.join(","))?;
    }
    fs::write(dir.join(config.measured.file_name(hour)), s)?;
    Ok(())
}

#[test]
fn test_show_names_ill_with_wrong_sensor_count() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let ill = dir.path().join("annual_62cols.ill");
    write_ill(&ill, 24, 62)?;

    let out = daylight3d(&[
        "show",
        "--ill",
        ill.to_str().unwrap(),
        "--month",
        "1",
        "--day",
        "1",
        "--hour",
        "9",
    ])?;
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("annual_62cols.ill"), "{}", stderr);
    assert!(stderr.contains("expected 63 sensors, found 62"), "{}", stderr);
    Ok(())
}

#[test]
fn test_compare_names_ill_with_wrong_sensor_count() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let ill = dir.path().join("annual_62cols.ill");
    write_ill(&ill, 24, 62)?;
    write_measured_hour(dir.path(), 9)?;

    let out = daylight3d(&[
        "compare",
        "--ill",
        ill.to_str().unwrap(),
        "--measured-dir",
        dir.path().to_str().unwrap(),
        "--month",
        "1",
        "--day",
        "1",
        "--hours",
        "9",
        "--output-dir",
        dir.path().join("out").to_str().unwrap(),
        "--tag",
        "1jan",
    ])?;
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("annual_62cols.ill"), "{}", stderr);
    assert!(stderr.contains("expected 63 sensors, found 62"), "{}", stderr);
    Ok(())
}

#[test]
fn test_compare_rejects_empty_ill() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let ill = dir.path().join("empty.ill");
    fs::write(&ill, "#?RADIANCE\nNROWS=0\n")?;

    let out = daylight3d(&[
        "compare",
        "--ill",
        ill.to_str().unwrap(),
        "--measured-dir",
        dir.path().to_str().unwrap(),
        "--month",
        "1",
        "--day",
        "1",
        "--output-dir",
        dir.path().join("out").to_str().unwrap(),
        "--tag",
        "1jan",
    ])?;
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("empty.ill holds no data rows"), "{}", stderr);
    Ok(())
}

#[test]
fn test_compare_prints_hourly_statistics() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let ill = dir.path().join("annual.ill");
    write_ill(&ill, 24, 63)?;
    write_measured_hour(dir.path(), 9)?;
    write_measured_hour(dir.path(), 10)?;

    let out = daylight3d(&[
        "compare",
        "--ill",
        ill.to_str().unwrap(),
        "--measured-dir",
        dir.path().to_str().unwrap(),
        "--month",
        "1",
        "--day",
        "1",
        "--hours",
        "9,10",
        "--output-dir",
        dir.path().join("out").to_str().unwrap(),
        "--tag",
        "1jan",
    ])?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Error by hour"));
    assert!(stdout.contains("Mean illuminance per grid row"));
    assert!(dir.path().join("out").join("comparison_1jan.csv").exists());
    Ok(())
}
