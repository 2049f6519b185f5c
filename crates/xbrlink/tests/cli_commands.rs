#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn xbrlink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xbrlink"))
        .env_remove("XBRLINK_PORT")
        .env_remove("XBRLINK_INTERVAL")
        .env_remove("XBRLINK_WIRE")
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("xbrlink should run")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

#[test]
fn encode_pads_standard_frame() {
    let output = xbrlink(&["--format", "json", "encode", "36", "03", "01"]);

    assert!(output.status.success());
    let payload = json_stdout(&output);
    assert_eq!(payload["frame"], "8C0036030001C6");
    assert_eq!(payload["padding"], 1);
    assert_eq!(payload["checksum"], "C6");
    assert_eq!(payload["wire"], "hex");
}

#[test]
fn encode_with_header_overrides_skips_padding() {
    let output = xbrlink(&[
        "--format",
        "json",
        "encode",
        "03",
        "00",
        "00",
        "--header0",
        "81",
        "--header1",
        "#96",
    ]);

    assert!(output.status.success());
    let payload = json_stdout(&output);
    assert_eq!(payload["frame"], "8160030000E4");
    assert_eq!(payload["padding"], 0);
    assert_eq!(payload["command"], "[03 00 00]");
}

#[test]
fn encode_raw_format_writes_wire_bytes() {
    let output = xbrlink(&["--format", "raw", "encode", "00", "02", "01"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"8C000002018F");

    let output = xbrlink(&["--format", "raw", "--wire", "raw", "encode", "00", "02", "01"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, vec![0x8C, 0x00, 0x00, 0x02, 0x01, 0x8F]);
}

#[test]
fn encode_rejects_bad_hex() {
    let output = xbrlink(&["encode", "00", "ZZ"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn checksum_answers_in_input_representation() {
    let output = xbrlink(&["--format", "json", "checksum", "8C", "00", "00", "02", "01"]);
    assert!(output.status.success());
    assert_eq!(json_stdout(&output)["checksum"], "8f");

    let output = xbrlink(&["--format", "raw", "checksum", "#140", "#3"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "#143\n");
}

#[test]
fn checksum_rejects_mixed_fields() {
    let output = xbrlink(&["checksum", "8C", "#1"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("mixes"));
}

#[test]
fn missing_port_exits_with_transport_code() {
    let missing = format!("/tmp/xbrlink-missing-{}", std::process::id());
    let output = xbrlink(&["--port", &missing, "power", "on"]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&missing));
}

#[test]
fn invalid_interval_is_a_usage_error() {
    let output = xbrlink(&["--interval", "0ms", "--port", "/tmp/unused", "display"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_reports_package_version() {
    let output = xbrlink(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("xbrlink {}", env!("CARGO_PKG_VERSION"))
    );

    let output = xbrlink(&["version", "--extended"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: xbrlink"));
    assert!(stdout.contains("baud_rate: 9600"));
}
