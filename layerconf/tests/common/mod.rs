//! Common test utilities for integration tests.
//!
//! This module provides helpers for writing configuration files and for
//! temporarily setting process environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use layerconf::{MapEnv, Resolver};

/// Writes `content` to `dir/name` and returns the path.
#[allow(dead_code)]
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Creates a resolver over an in-memory environment.
#[allow(dead_code)]
pub fn resolver_with(prefix: &str, vars: &[(&str, &str)]) -> Resolver {
    let env: MapEnv = vars.iter().copied().collect();
    Resolver::with_env(prefix, env)
}

/// RAII guard for setting and restoring process environment variables.
///
/// Tests using this guard must be marked `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}
