use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "farm-raid"])
        .status()
        .expect("failed to invoke cargo check for farm-raid CLI binary");

    assert!(status.success(), "cargo check --bin farm-raid should succeed");
}

#[test]
fn bundled_meadow_runs_to_completion() {
    let output = Command::new(env!("CARGO_BIN_EXE_farm-raid"))
        .args(["--ticks", "600", "--scarecrow", "9,3"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run farm-raid");

    assert!(output.status.success(), "farm-raid should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ticks simulated: 600"), "unexpected summary: {stdout}");
    assert!(stdout.contains("scarecrows 1"), "scarecrow should be built: {stdout}");
}
