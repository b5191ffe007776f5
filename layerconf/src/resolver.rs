//! The configuration resolver.
//!
//! A [`Resolver`] answers every lookup from three layers, first hit wins:
//!
//! 1. the environment variable `PREFIX_KEY` (or `KEY` without a prefix),
//! 2. the file-value table filled by [`Resolver::load_file`],
//! 3. the default supplied by the caller.
//!
//! Keys are case-insensitive; they are uppercased before every comparison.
//! Empty values count as absent in the first two layers.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::RwLock;

use crate::binding::{Bind, BindReport, Binder, Record, Schema};
use crate::coerce::{parse_bool, parse_duration};
use crate::environment::{EnvSource, ProcessEnv};
use crate::error::{Error, Result};
use crate::format::{self, Entries, FileFormat};

/// Path reported for content loaded with [`Resolver::load_str`].
const INLINE_SOURCE: &str = "<inline>";

/// The layer a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An environment variable, with its full name.
    Env(String),
    /// The file-value table.
    File,
    /// The caller-supplied default.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(name) => write!(f, "environment variable {name}"),
            Self::File => write!(f, "configuration file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A value together with the layer that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The raw string value.
    pub value: String,
    /// Where the value came from.
    pub source: Source,
}

/// Priority-ordered configuration lookups over environment, files and defaults.
///
/// A resolver can be shared between threads; loading files and reading values
/// are guarded by internal locks.
///
/// # Examples
///
/// ```
/// use layerconf::{MapEnv, Resolver};
///
/// let env = MapEnv::new().with("APP_PORT", "9000");
/// let resolver = Resolver::with_env("app", env);
///
/// assert_eq!(resolver.int("port", 8080), 9000);
/// assert_eq!(resolver.string("host", "localhost"), "localhost");
/// ```
pub struct Resolver {
    prefix: String,
    values: RwLock<HashMap<String, String>>,
    durations: Option<RwLock<HashMap<String, Duration>>>,
    loaded: RwLock<Vec<PathBuf>>,
    env: Box<dyn EnvSource>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("prefix", &self.prefix)
            .field("keys", &self.values.read().len())
            .field("cache_durations", &self.durations.is_some())
            .field("loaded", &*self.loaded.read())
            .finish_non_exhaustive()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new("")
    }
}

impl Resolver {
    /// Creates a resolver reading the process environment.
    ///
    /// The prefix is uppercased; an empty prefix disables namespacing.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self::with_env(prefix, ProcessEnv)
    }

    /// Creates a resolver reading variables from `env`.
    #[must_use]
    pub fn with_env(prefix: &str, env: impl EnvSource + 'static) -> Self {
        Self {
            prefix: prefix.to_uppercase(),
            values: RwLock::new(HashMap::new()),
            durations: None,
            loaded: RwLock::new(Vec::new()),
            env: Box::new(env),
        }
    }

    /// Enables or disables memoization of parsed durations.
    ///
    /// With caching on, the first successful [`duration`](Self::duration)
    /// lookup of a key is reused by later calls even if the environment
    /// changes. The cache is dropped whenever the file-value table changes.
    #[must_use]
    pub fn cache_durations(mut self, enabled: bool) -> Self {
        self.durations = enabled.then(|| RwLock::new(HashMap::new()));
        self
    }

    /// The uppercased prefix (possibly empty).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The environment variable consulted for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerconf::{MapEnv, Resolver};
    ///
    /// assert_eq!(Resolver::with_env("app", MapEnv::new()).env_var_name("port"), "APP_PORT");
    /// assert_eq!(Resolver::with_env("", MapEnv::new()).env_var_name("port"), "PORT");
    /// ```
    #[must_use]
    pub fn env_var_name(&self, key: &str) -> String {
        let key = key.to_uppercase();
        if self.prefix.is_empty() {
            key
        } else {
            format!("{}_{key}", self.prefix)
        }
    }

    /// Loads a configuration file into the file-value table.
    ///
    /// The format comes from the extension (`.json`, `.yaml`/`.yml`,
    /// `.env`/`.txt`/`.conf`) or, for anything else, from the content.
    /// New keys overwrite existing ones; nothing is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] if the file cannot be read and
    /// [`Error::Parse`] if its content is malformed. The resolver is left
    /// unchanged in both cases.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let (format, entries) = parse_file_content(path, &bytes)?;
        log::debug!(
            "loaded {} keys from {} ({format})",
            entries.len(),
            path.display()
        );

        self.merge(entries);
        self.loaded.write().push(path.to_path_buf());
        Ok(())
    }

    /// Loads in-memory content of a known format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the content is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerconf::{FileFormat, MapEnv, Resolver};
    ///
    /// let resolver = Resolver::with_env("", MapEnv::new());
    /// resolver.load_str("server:\n  port: 9000\n", FileFormat::Yaml).unwrap();
    /// assert_eq!(resolver.int("server.port", 0), 9000);
    /// ```
    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<()> {
        let entries = format
            .parse(content)
            .map_err(|message| Error::parse(INLINE_SOURCE, format, message))?;
        self.merge(entries);
        Ok(())
    }

    /// Sets a single file-table value, as if it had been loaded from a file.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.merge(vec![(key.to_uppercase(), value.into())]);
    }

    fn merge(&self, entries: Entries) {
        // Lock order is cache, then values, matching `duration`.
        let mut cache = self.durations.as_ref().map(|c| c.write());
        self.values.write().extend(entries);
        if let Some(cache) = cache.as_mut() {
            cache.clear();
        }
    }

    /// Files successfully loaded so far, in load order.
    #[must_use]
    pub fn loaded_files(&self) -> Vec<PathBuf> {
        self.loaded.read().clone()
    }

    /// A sorted snapshot of the file-value table.
    #[must_use]
    pub fn file_values(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .values
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }

    /// Reads an environment variable by exact name; empty counts as unset.
    pub(crate) fn env_value(&self, name: &str) -> Option<String> {
        self.env.var(name).filter(|v| !v.is_empty())
    }

    /// Reads the file-value table; empty counts as unset.
    pub(crate) fn file_value(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .get(&key.to_uppercase())
            .filter(|v| !v.is_empty())
            .cloned()
    }

    /// Resolves `key` from the environment and file layers.
    ///
    /// Returns `None` when neither layer has a non-empty value.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerconf::{MapEnv, Resolver, Source};
    ///
    /// let resolver = Resolver::with_env("app", MapEnv::new().with("APP_HOST", "db"));
    /// resolver.set("port", "5432");
    ///
    /// let host = resolver.lookup("host").unwrap();
    /// assert_eq!(host.source, Source::Env("APP_HOST".to_string()));
    /// assert_eq!(resolver.lookup("port").unwrap().source, Source::File);
    /// assert!(resolver.lookup("user").is_none());
    /// ```
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Resolved> {
        let env_name = self.env_var_name(key);
        if let Some(value) = self.env_value(&env_name) {
            return Some(Resolved {
                value,
                source: Source::Env(env_name),
            });
        }

        self.file_value(key).map(|value| Resolved {
            value,
            source: Source::File,
        })
    }

    /// Resolves a string, returning `default` when nothing is set.
    #[must_use]
    pub fn string(&self, key: &str, default: &str) -> String {
        self.lookup(key)
            .map_or_else(|| default.to_string(), |r| r.value)
    }

    /// Resolves a base-10 integer.
    ///
    /// Returns `default` when nothing is set or the value does not parse.
    #[must_use]
    pub fn int(&self, key: &str, default: i64) -> i64 {
        self.lookup(key)
            .and_then(|r| r.value.parse().ok())
            .unwrap_or(default)
    }

    /// Resolves a floating point number.
    ///
    /// Returns `default` when nothing is set or the value does not parse.
    #[must_use]
    pub fn float(&self, key: &str, default: f64) -> f64 {
        self.lookup(key)
            .and_then(|r| r.value.parse().ok())
            .unwrap_or(default)
    }

    /// Resolves a boolean.
    ///
    /// Accepts true/1/yes/on and false/0/no/off in any case; any other value
    /// yields `default`.
    #[must_use]
    pub fn bool(&self, key: &str, default: bool) -> bool {
        self.lookup(key)
            .and_then(|r| parse_bool(&r.value))
            .unwrap_or(default)
    }

    /// Resolves a duration literal such as `30s` or `1h30m`.
    ///
    /// Returns `default` when nothing is set or the value does not parse.
    /// When [`cache_durations`](Self::cache_durations) is enabled, parsed
    /// values are memoized per key; defaults are never cached.
    #[must_use]
    pub fn duration(&self, key: &str, default: Duration) -> Duration {
        let parse = || {
            self.lookup(key)
                .and_then(|r| parse_duration(&r.value).ok())
        };

        let Some(cache) = &self.durations else {
            return parse().unwrap_or(default);
        };

        let cache_key = key.to_uppercase();
        if let Some(cached) = cache.read().get(&cache_key) {
            return *cached;
        }

        // Held across the lookup so a concurrent merge cannot be overtaken
        // by a stale insert.
        let mut cache = cache.write();
        if let Some(cached) = cache.get(&cache_key) {
            return *cached;
        }
        match parse() {
            Some(parsed) => {
                cache.insert(cache_key, parsed);
                parsed
            }
            None => default,
        }
    }

    /// Resolves a value that must be present.
    ///
    /// # Panics
    ///
    /// Panics with `required configuration <ENV_VAR> is not set` when neither
    /// the environment nor the file table supplies a value. Use
    /// [`try_required`](Self::try_required) to handle the absence instead.
    #[must_use]
    pub fn required(&self, key: &str) -> String {
        match self.try_required(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Resolves a value that must be present, without panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequired`] naming the environment variable
    /// that was consulted.
    pub fn try_required(&self, key: &str) -> Result<String> {
        self.lookup(key)
            .map(|r| r.value)
            .ok_or_else(|| Error::MissingRequired {
                env_var: self.env_var_name(key),
            })
    }

    /// Binds a whole struct through its [`Bind`] implementation.
    ///
    /// # Errors
    ///
    /// Returns the first field coercion error. Fields bound before the
    /// failure keep their new values.
    pub fn load<T: Bind + ?Sized>(&self, target: &mut T) -> Result<BindReport> {
        let mut binder = Binder::new(self);
        target.bind(&mut binder)?;
        Ok(binder.into_report())
    }

    /// Binds the fields described by a runtime [`Schema`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for fields with an unknown type and
    /// [`Error::FieldCoercion`] for values that do not convert.
    pub fn load_schema(&self, schema: &Schema) -> Result<Record> {
        schema.bind(&mut Binder::new(self))
    }
}

/// Decodes and parses raw file content for `path`.
fn parse_file_content(path: &Path, bytes: &[u8]) -> Result<(FileFormat, Entries)> {
    let by_extension = FileFormat::from_path(path);

    let content = std::str::from_utf8(bytes).map_err(|e| {
        Error::parse(
            path,
            by_extension.unwrap_or(FileFormat::KeyValue),
            format!("content is not valid UTF-8: {e}"),
        )
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    match by_extension {
        Some(format) => format
            .parse(content)
            .map(|entries| (format, entries))
            .map_err(|message| Error::parse(path, format, message)),
        None => format::detect_and_parse(content)
            .map_err(|message| Error::parse(path, FileFormat::KeyValue, message)),
    }
}


// Property-based tests for resolution order
#[cfg(all(test, feature = "property-tests"))]
#[allow(unused_doc_comments)] // proptest! macro doesn't support doc comments
mod property_tests {
    use super::*;
    use crate::environment::MapEnv;
    use proptest::prelude::*;

    /// Property: the first non-empty layer wins, in the order env, file, default.
    proptest! {
        #[test]
        fn prop_priority_law(
            key in "[a-z][a-z0-9_]{0,11}",
            env_value in proptest::option::of("[a-zA-Z0-9]{0,8}"),
            file_value in proptest::option::of("[a-zA-Z0-9]{0,8}"),
            default in "[a-zA-Z0-9]{1,8}",
        ) {
            let mut env = MapEnv::new();
            if let Some(v) = &env_value {
                env.set(format!("APP_{}", key.to_uppercase()), v.clone());
            }
            let resolver = Resolver::with_env("app", env);
            if let Some(v) = &file_value {
                resolver.set(&key, v.clone());
            }

            let expected = env_value
                .filter(|v| !v.is_empty())
                .or(file_value.filter(|v| !v.is_empty()))
                .unwrap_or_else(|| default.clone());
            prop_assert_eq!(resolver.string(&key, &default), expected);
        }
    }

    /// Property: lookups ignore the case of the key.
    proptest! {
        #[test]
        fn prop_case_insensitive_keys(key in "[a-zA-Z][a-zA-Z0-9_.]{0,15}", value in "[a-z0-9]{1,8}") {
            let resolver = Resolver::with_env("", MapEnv::new());
            resolver.set(&key, value.clone());
            prop_assert_eq!(resolver.string(&key.to_lowercase(), ""), value.clone());
            prop_assert_eq!(resolver.string(&key.to_uppercase(), ""), value);
        }
    }
}
