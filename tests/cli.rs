use assert_cmd::Command;

fn kegel() -> Command {
    Command::cargo_bin("kegel").unwrap()
}

#[test]
fn print_plan_uses_defaults_when_config_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.json");

    let output = kegel()
        .args(["--config", config.to_str().unwrap(), "--print-plan"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["set_rest_secs"], 30);
    assert_eq!(report["sets"].as_array().unwrap().len(), 4);
    assert_eq!(report["sets"][0]["set_id"], 1);
}

#[test]
fn print_plan_applies_set_rest_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.json");

    let output = kegel()
        .args(["--config", config.to_str().unwrap(), "--set-rest", "10", "--print-plan"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["set_rest_secs"], 10);
    assert_eq!(report["total_secs"], 286);
}

#[test]
fn invalid_plan_in_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"plan": [{"set_id": 2, "reps": 1, "contract_secs": 1, "rest_secs": 1, "intensity": "low"}]}"#,
    )
    .unwrap();

    let stderr = kegel()
        .args(["--config", config.to_str().unwrap(), "--print-plan"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&stderr).starts_with("error:"));
}

#[test]
fn non_tty_stdin_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.json");
    kegel()
        .args(["--config", config.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn help_lists_options() {
    let stdout = kegel()
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let help = String::from_utf8_lossy(&stdout);
    for flag in ["--set-rest", "--mute", "--config", "--print-plan", "--write-config"] {
        assert!(help.contains(flag), "missing {flag}");
    }
}

#[test]
fn write_config_persists_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");
    let path = config.to_str().unwrap();

    let stdout = kegel()
        .args(["--config", path, "--set-rest", "12", "--mute", "--write-config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8_lossy(&stdout).contains("config.json"));

    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&config).unwrap()).unwrap();
    assert_eq!(saved["set_rest_secs"], 12);
    assert_eq!(saved["sound"], false);

    let output = kegel()
        .args(["--config", path, "--print-plan"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["set_rest_secs"], 12);
}
