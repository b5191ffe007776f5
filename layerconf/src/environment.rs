//! Environment variable sources.
//!
//! The resolver never reads `std::env` directly. It asks an [`EnvSource`],
//! which lets tests supply a [`MapEnv`] instead of mutating the process
//! environment.

use std::collections::HashMap;
use std::env;

/// A source of environment variables.
///
/// # Examples
///
/// ```
/// use layerconf::{EnvSource, MapEnv};
///
/// let env = MapEnv::new().with("APP_PORT", "9000");
/// assert_eq!(env.var("APP_PORT"), Some("9000".to_string()));
/// assert_eq!(env.var("APP_HOST"), None);
/// ```
pub trait EnvSource: Send + Sync {
    /// Look up a variable by its exact name.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
///
/// Variables whose value is not valid UTF-8 are reported as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, returning the updated environment.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a variable in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env_lookup_is_exact() {
        let env = MapEnv::new().with("APP_PORT", "8080");
        assert_eq!(env.var("APP_PORT"), Some("8080".to_string()));
        assert_eq!(env.var("app_port"), None);
    }

    #[test]
    fn test_map_env_set_overwrites() {
        let mut env = MapEnv::new().with("DEBUG", "false");
        env.set("DEBUG", "true");
        assert_eq!(env.var("DEBUG"), Some("true".to_string()));
    }

    #[test]
    fn test_map_env_from_iter() {
        let env: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.var("A"), Some("1".to_string()));
        assert_eq!(env.var("B"), Some("2".to_string()));
    }

    #[test]
    fn test_map_env_keeps_empty_values() {
        // Empty-as-absent is the resolver's rule, not the source's.
        let env = MapEnv::new().with("EMPTY", "");
        assert_eq!(env.var("EMPTY"), Some(String::new()));
    }

    #[test]
    fn test_process_env_missing_var() {
        assert_eq!(ProcessEnv.var("LAYERCONF_SURELY_UNSET_VARIABLE_1234"), None);
    }
}
