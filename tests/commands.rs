use std::path::Path;
use std::process::{Command, Output};

const LOCATION: &str = r#"{
    "5.5": {"https://github.com/a/a": 12, "https://github.com/b/b": 30},
    "-3": {"https://github.com/c/c": 8},
    "6": {"https://github.com/a/a": 4, "https://github.com/d/d": 9},
    "4.5": {"https://github.com/a/a": 7}
}"#;

const DEMOGRAPHIC: &str = r#"{
    "1": {
        "female": [
            ["https://github.com/x/x", 4, 10, 40, 100, 1.5, 1.5],
            ["https://github.com/y/y", 2, 40, 5, 200, 19.0, 39.0]
        ]
    },
    "global": {
        "female": [["https://github.com/x/x", 40, 100, 40, 100, 1.5, 1.5]]
    }
}"#;

fn tzscout(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tzscout"))
        .args(args)
        .args(["--color", "never"])
        .current_dir(dir)
        .env_remove("TZSCOUT_LOG")
        .output()
        .unwrap()
}

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tz_project.json"), LOCATION).unwrap();
    std::fs::write(dir.path().join("tz_gender_project.json"), DEMOGRAPHIC).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "tzscout failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn zones_are_listed_in_ascending_order() {
    let dir = workspace();
    let out = stdout(&tzscout(dir.path(), &["zones"]));
    assert_eq!(out, "UTC-3:00\nUTC+4:30\nUTC+5:30\nUTC+6:00\n");
}

#[test]
fn zones_from_demographic_data_skip_global() {
    let dir = workspace();
    let out = stdout(&tzscout(dir.path(), &["zones", "--demographic", "--format", "json"]));
    let zones: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(zones, serde_json::json!([{"key": "1", "display": "UTC+1:00"}]));
}

#[test]
fn recommend_prints_own_and_nearby_zones() {
    let dir = workspace();
    let out = stdout(&tzscout(dir.path(), &["recommend", "--offset", "UTC+5:30"]));
    assert!(out.contains("Projects in your time zone (UTC+5:30)"));
    assert!(out.contains("Projects in nearby time zones (UTC+6:00, UTC+4:30)"));

    let b = out.find("https://github.com/b/b").unwrap();
    let a = out.find("https://github.com/a/a").unwrap();
    assert!(b < a, "higher count should rank first:\n{out}");
    assert!(!out.contains("https://github.com/c/c"));
}

#[test]
fn recommend_json_report() {
    let dir = workspace();
    let out = stdout(&tzscout(
        dir.path(),
        &["recommend", "--offset", "UTC+5:30", "--count", "1", "--format", "json"],
    ));
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["offset"], "5.5");
    assert_eq!(report["primary"].as_array().unwrap().len(), 1);
    assert_eq!(report["primary"][0]["projectUrl"], "https://github.com/b/b");
    assert_eq!(report["nearby"][0]["projectUrl"], "https://github.com/a/a");
    assert_eq!(report["nearby"][0]["contributorCount"], 11);
}

#[test]
fn recommend_for_offset_without_statistics_is_not_an_error() {
    let dir = workspace();
    let output = tzscout(dir.path(), &["recommend", "--offset", "UTC+9:00"]);
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No statistics for UTC+9:00"));
}

#[test]
fn recommend_rejects_bad_input() {
    let dir = workspace();
    let output = tzscout(dir.path(), &["recommend", "--offset", "UTC+5:30", "--count", "21"]);
    assert!(!output.status.success());

    let output = tzscout(dir.path(), &["recommend", "--offset", "five"]);
    assert!(!output.status.success());

    let output = tzscout(dir.path(), &["recommend"]);
    assert!(!output.status.success(), "--offset or --auto is required");
}

#[test]
fn missing_dataset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = tzscout(dir.path(), &["recommend", "--offset", "UTC+0:00"]);
    assert!(!output.status.success());
}

#[test]
fn diversity_markdown_links_projects() {
    let dir = workspace();
    let out = stdout(&tzscout(
        dir.path(),
        &[
            "diversity", "--gender", "female", "--offset", "UTC+1:00", "--range", "20-50",
            "--format", "markdown",
        ],
    ));
    assert!(out.contains("## Projects in your time zone (UTC+1:00)"));
    assert!(out.contains("[https://github.com/x/x](https://github.com/x/x)"));
    assert!(!out.contains("https://github.com/y/y"));
    assert!(out.contains("## Projects worldwide"));
}

#[test]
fn config_file_points_at_datasets() {
    let dir = workspace();
    std::fs::rename(
        dir.path().join("tz_project.json"),
        dir.path().join("renamed.json"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".tzscout.toml"),
        "[data]\nlocation_path = \"renamed.json\"\n",
    )
    .unwrap();
    let out = stdout(&tzscout(dir.path(), &["zones"]));
    assert!(out.starts_with("UTC-3:00"));
}

fn offline_config(dir: &Path) {
    std::fs::write(
        dir.join(".tzscout.toml"),
        "[geolocation]\nendpoint = \"http://127.0.0.1:9/json\"\ntimeout_secs = 1\n",
    )
    .unwrap();
}

#[test]
fn doctor_json_reports_each_check_status() {
    let dir = workspace();
    offline_config(dir.path());
    let out = stdout(&tzscout(dir.path(), &["doctor", "--format", "json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let checks = json["checks"].as_array().unwrap();
    let status = |name: &str| {
        checks
            .iter()
            .find(|c| c["name"] == name)
            .map(|c| c["status"].as_str().unwrap().to_string())
            .unwrap()
    };
    assert_eq!(status("config_file"), "pass");
    assert_eq!(status("location_data"), "pass");
    assert_eq!(status("demographic_data"), "pass");
    assert_eq!(status("geolocation"), "fail");
    let geolocation = checks.iter().find(|c| c["name"] == "geolocation").unwrap();
    assert!(geolocation["hint"].as_str().unwrap().contains("--offset"));
    assert!(checks.iter().all(|c| c["name"] != "config_file" || c.get("hint").is_none()));
}

#[test]
fn doctor_text_summarizes_counts() {
    let dir = workspace();
    offline_config(dir.path());
    std::fs::remove_file(dir.path().join("tz_gender_project.json")).unwrap();
    let out = stdout(&tzscout(dir.path(), &["doctor"]));
    assert!(out.contains("\u{2713} location data"));
    assert!(out.contains("\u{2717} demographic data"));
    assert!(out.contains("2 checks passed, 2 failed, 0 info"));
}
