//! Integration tests for global options.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_prefix_from_environment() {
    let env = TestEnv::new();
    env.command_bare()
        .env("LAYERCONF_PREFIX", "svc")
        .env("SVC_PORT_LCIT", "1234")
        .args(["get", "port_lcit"])
        .assert()
        .success()
        .stdout("1234\n");
}

#[test]
fn test_prefix_flag_overrides_environment() {
    let env = TestEnv::new();
    env.command_bare()
        .env("LAYERCONF_PREFIX", "svc")
        .env("OTHER_PORT_LCIT", "4321")
        .args(["--prefix", "other", "get", "port_lcit"])
        .assert()
        .success()
        .stdout("4321\n");
}

#[test]
fn test_prefixed_lookup_ignores_bare_name() {
    let env = TestEnv::new();
    env.command()
        .env("PORT_LCIT", "1111")
        .args(["get", "port_lcit", "--default", "3000"])
        .assert()
        .success()
        .stdout("3000\n");
}

#[test]
fn test_global_options_after_subcommand() {
    let env = TestEnv::new();
    let file = env.write_file("app.env", "NAME=svc\n");
    env.command_bare()
        .args(["get", "name", "--prefix", "lcit", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout("svc\n");
}

#[test]
fn test_later_file_wins() {
    let env = TestEnv::new();
    let first = env.write_file("first.env", "MODE=first\nONLY_FIRST=yes\n");
    let second = env.write_file("second.yaml", "mode: second\n");

    env.command()
        .arg("-f")
        .arg(&first)
        .arg("-f")
        .arg(&second)
        .args(["get", "mode"])
        .assert()
        .success()
        .stdout("second\n");

    env.command()
        .arg("-f")
        .arg(&first)
        .arg("-f")
        .arg(&second)
        .args(["get", "only_first"])
        .assert()
        .success()
        .stdout("yes\n");
}

#[test]
fn test_verbose_reports_loaded_files() {
    let env = TestEnv::new();
    let file = env.write_file("app.env", "A=1\n");
    env.command()
        .arg("--verbose")
        .arg("-f")
        .arg(&file)
        .args(["get", "a"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG: loaded 1 keys"))
        .stderr(predicate::str::contains("INFO: loaded"));
}

#[test]
fn test_log_level_env_controls_warnings() {
    let env = TestEnv::new();
    env.command()
        .env("LAYERCONF_LOG_LEVEL", "error")
        .arg("-f")
        .arg(env.path().join("missing.env"))
        .args(["get", "a"])
        .assert()
        .success()
        .stderr("");
}
