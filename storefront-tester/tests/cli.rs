use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "storefront-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_storefront-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("homepage"));
    assert!(content.contains("registered-login"));
}

#[test]
fn cli_aborts_before_scenarios_when_webdriver_is_unreachable() {
    let exe = env!("CARGO_BIN_EXE_storefront-tester");
    let output = Command::new(exe)
        .args([
            "--webdriver-url",
            "http://127.0.0.1:9",
            "--scenarios",
            "homepage",
        ])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not start a browser session"));
}

#[test]
fn cli_exits_cleanly_when_only_unknown_scenarios_are_selected() {
    let exe = env!("CARGO_BIN_EXE_storefront-tester");
    let output = Command::new(exe)
        .args(["--scenarios", "warp-drive"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown scenario"));
}
