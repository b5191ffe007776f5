//! Integration tests for error handling and exit codes.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Semantic failure (required value missing)
//! - 4: Invalid arguments
//! - 5: I/O error (unreadable configuration or schema file)
//! - 6: Other library errors (parse, schema, coercion)

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_success_exit_code() {
    let env = TestEnv::new();
    env.command().args(["get", "anything"]).assert().code(0);
}

#[test]
fn test_missing_file_is_a_warning_by_default() {
    let env = TestEnv::new();
    let missing = env.path().join("missing.json");

    env.command()
        .arg("-f")
        .arg(&missing)
        .args(["get", "port", "--default", "8080"])
        .assert()
        .code(0)
        .stdout("8080\n")
        .stderr(predicate::str::contains("WARN:"))
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_quiet_silences_load_warnings() {
    let env = TestEnv::new();
    let missing = env.path().join("missing.json");

    env.command()
        .arg("--quiet")
        .arg("-f")
        .arg(&missing)
        .args(["get", "port"])
        .assert()
        .code(0)
        .stderr("");
}

#[test]
fn test_strict_missing_file_exits_5() {
    let env = TestEnv::new();
    let missing = env.path().join("missing.json");

    env.command()
        .arg("--strict")
        .arg("-f")
        .arg(&missing)
        .args(["get", "port"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_strict_malformed_file_exits_6() {
    let env = TestEnv::new();
    let bad = env.write_file("bad.json", "{ not json");

    env.command()
        .arg("--strict")
        .arg("-f")
        .arg(&bad)
        .args(["dump"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("failed to parse JSON config"));
}

#[test]
fn test_missing_schema_exits_5() {
    let env = TestEnv::new();
    env.command()
        .arg("bind")
        .arg(env.path().join("nope.yaml"))
        .assert()
        .code(5);
}

#[test]
fn test_unsupported_schema_type_exits_6() {
    let env = TestEnv::new();
    let schema = env.write_file("schema.yaml", "tags: {type: list}\n");
    env.command()
        .arg("bind")
        .arg(&schema)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("unsupported type 'list' for field tags"));
}

#[test]
fn test_schema_coercion_error_exits_6() {
    let env = TestEnv::new();
    let schema = env.write_file("schema.yaml", "port: {type: int}\n");
    env.command()
        .arg("bind")
        .arg(&schema)
        .env("LCIT_PORT", "eighty")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("failed to set field port from 'eighty'"));
}

#[test]
fn test_invalid_format_value_is_rejected_by_clap() {
    let env = TestEnv::new();
    env.command()
        .args(["dump", "--format", "xml"])
        .assert()
        .code(2);
}
