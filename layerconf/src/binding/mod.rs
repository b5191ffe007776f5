//! Binding resolved values into typed fields.
//!
//! A struct opts in by implementing [`Bind`] and registering each field with
//! a [`FieldSpec`] that says where its value comes from:
//!
//! ```
//! use layerconf::{Bind, Binder, FieldSpec, MapEnv, Resolver, Result};
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct ServerConfig {
//!     port: u16,
//!     timeout: Duration,
//!     token: Option<String>,
//! }
//!
//! impl Bind for ServerConfig {
//!     fn bind(&mut self, binder: &mut Binder<'_>) -> Result<()> {
//!         binder.field(FieldSpec::new("port").default("8080"), &mut self.port)?;
//!         binder.field(FieldSpec::new("timeout").default("30s"), &mut self.timeout)?;
//!         binder.field(FieldSpec::new("token").env("API_TOKEN"), &mut self.token)?;
//!         Ok(())
//!     }
//! }
//!
//! let env = MapEnv::new().with("APP_PORT", "9000").with("API_TOKEN", "t0k3n");
//! let resolver = Resolver::with_env("app", env);
//!
//! let mut config = ServerConfig::default();
//! resolver.load(&mut config).unwrap();
//!
//! assert_eq!(config.port, 9000);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.token.as_deref(), Some("t0k3n"));
//! ```
//!
//! Each field resolves environment first, then the file-value table, then the
//! field's default literal. A field with no value anywhere is left untouched.

mod schema;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::coerce::{parse_bool_literal, parse_duration};
use crate::error::{Error, Result};
use crate::resolver::Resolver;

pub use schema::{FieldKind, Record, Schema, SchemaField, Value};

/// Where a single field's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    key: Option<String>,
    env: Option<String>,
    default: Option<String>,
    file: Option<PathBuf>,
}

impl FieldSpec {
    /// Describes the field `name` with every source left at its default.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
            env: None,
            default: None,
            file: None,
        }
    }

    /// Sets the configuration key (defaults to the lowercased field name).
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets an exact environment variable name, bypassing the prefix.
    #[must_use]
    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.env = Some(name.into());
        self
    }

    /// Sets the literal used when neither environment nor files supply a value.
    #[must_use]
    pub fn default(mut self, literal: impl Into<String>) -> Self {
        self.default = Some(literal.into());
        self
    }

    /// Sets a file loaded into the resolver before this field resolves.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// The field name used in errors and diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration key, explicit or derived from the field name.
    #[must_use]
    pub fn config_key(&self) -> String {
        self.key
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }

    /// The environment variable consulted for this field under `resolver`.
    #[must_use]
    pub fn env_var_name(&self, resolver: &Resolver) -> String {
        self.env
            .clone()
            .unwrap_or_else(|| resolver.env_var_name(&self.config_key()))
    }
}

/// A type that can be parsed from a resolved configuration string.
pub trait FieldValue: Sized {
    /// Converts the raw string, describing the failure on error.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when `raw` is not a valid value.
    fn from_config(raw: &str) -> std::result::Result<Self, String>;
}

impl FieldValue for String {
    fn from_config(raw: &str) -> std::result::Result<Self, String> {
        Ok(raw.to_string())
    }
}

macro_rules! impl_field_value_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn from_config(raw: &str) -> std::result::Result<Self, String> {
                    raw.parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_field_value_from_str!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl FieldValue for bool {
    fn from_config(raw: &str) -> std::result::Result<Self, String> {
        Ok(parse_bool_literal(raw))
    }
}

impl FieldValue for Duration {
    fn from_config(raw: &str) -> std::result::Result<Self, String> {
        parse_duration(raw).map_err(|e| e.to_string())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn from_config(raw: &str) -> std::result::Result<Self, String> {
        T::from_config(raw).map(Some)
    }
}

/// Implemented by structs that can be filled from a [`Resolver`].
pub trait Bind {
    /// Registers every field with the binder, in declaration order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Error::FieldCoercion`] returned by
    /// [`Binder::field`].
    fn bind(&mut self, binder: &mut Binder<'_>) -> Result<()>;
}

/// A non-fatal problem noticed while binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The field being bound.
    pub field: String,
    /// The file that failed to load.
    pub path: PathBuf,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field {}: could not load {}: {}",
            self.field,
            self.path.display(),
            self.message
        )
    }
}

/// Outcome of a successful [`Resolver::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    diagnostics: Vec<Diagnostic>,
}

impl BindReport {
    /// Non-fatal problems collected during binding.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether binding finished without any diagnostics.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Resolves and assigns fields on behalf of a [`Bind`] implementation.
#[derive(Debug)]
pub struct Binder<'r> {
    resolver: &'r Resolver,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> Binder<'r> {
    pub(crate) fn new(resolver: &'r Resolver) -> Self {
        Self {
            resolver,
            diagnostics: Vec::new(),
        }
    }

    /// The resolver values are read from.
    #[must_use]
    pub fn resolver(&self) -> &'r Resolver {
        self.resolver
    }

    /// Resolves `spec` and assigns the converted value to `slot`.
    ///
    /// The slot keeps its current value when nothing resolves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldCoercion`] when the resolved string does not
    /// convert into `T`; the slot is left unchanged.
    pub fn field<T: FieldValue>(&mut self, spec: FieldSpec, slot: &mut T) -> Result<()> {
        let Some(raw) = self.resolve(&spec) else {
            return Ok(());
        };

        *slot = T::from_config(&raw).map_err(|message| Error::coercion(spec.name(), &raw, message))?;
        Ok(())
    }

    /// Resolves the raw string for `spec` without converting it.
    ///
    /// Loads the field's file first; a failed load is recorded as a
    /// [`Diagnostic`] and resolution continues with the remaining layers.
    pub fn resolve(&mut self, spec: &FieldSpec) -> Option<String> {
        if let Some(path) = &spec.file {
            self.load_field_file(spec.name(), path);
        }

        let key = spec.config_key();
        self.resolver
            .env_value(&spec.env_var_name(self.resolver))
            .or_else(|| self.resolver.file_value(&key))
            .or_else(|| spec.default.clone().filter(|d| !d.is_empty()))
    }

    fn load_field_file(&mut self, field: &str, path: &Path) {
        if let Err(err) = self.resolver.load_file(path) {
            log::warn!("field {field}: could not load {}: {err}", path.display());
            self.diagnostics.push(Diagnostic {
                field: field.to_string(),
                path: path.to_path_buf(),
                message: err.to_string(),
            });
        }
    }

    pub(crate) fn into_report(self) -> BindReport {
        BindReport {
            diagnostics: self.diagnostics,
        }
    }
}
