use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_tzscout"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "tzscout init failed: {}", String::from_utf8_lossy(&output.stderr));

    let config_path = dir.path().join(".tzscout.toml");
    assert!(config_path.exists(), ".tzscout.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[data]"));
    assert!(content.contains("[geolocation]"));

    // The commented template must parse to the defaults
    let config = tzscout_core::ScoutConfig::from_toml(&content).unwrap();
    assert_eq!(config.recommend.count, 5);
    let _raw: toml::Value = toml::from_str(&content).unwrap();
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".tzscout.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_tzscout"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let content = std::fs::read_to_string(dir.path().join(".tzscout.toml")).unwrap();
    assert_eq!(content, "# existing");
}
