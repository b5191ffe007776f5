//! Application environment: the standard settings most services need, plus
//! the logger built from them.
//!
//! ```
//! use layerconf::{AppEnv, MapEnv, Resolver};
//! use std::time::Duration;
//!
//! let env = MapEnv::new().with("SHOP_PORT", "9090").with("SHOP_ENVIRONMENT", "production");
//! let mut app = AppEnv::with_resolver(Resolver::with_env("shop", env));
//! app.load_standard_config().unwrap();
//!
//! assert_eq!(app.config().port, 9090);
//! assert_eq!(app.config().read_timeout, Duration::from_secs(10));
//! assert!(app.config().is_production());
//! ```

use std::time::Duration;

use crate::binding::{Bind, BindReport, Binder, FieldSpec};
use crate::error::Result;
use crate::logging::{LogLevel, Logger};
use crate::resolver::Resolver;

/// Settings shared by typical network services.
///
/// No field names an explicit environment variable, so the resolver's prefix
/// applies to all of them (`APP_PORT`, `APP_LOG_LEVEL`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardConfig {
    /// Listen port.
    pub port: u16,
    /// Listen address.
    pub host: String,
    /// Request read timeout.
    pub read_timeout: Duration,
    /// Response write timeout.
    pub write_timeout: Duration,
    /// Keep-alive idle timeout.
    pub idle_timeout: Duration,
    /// Graceful shutdown deadline.
    pub shutdown_timeout: Duration,
    /// One of `DEBUG`, `INFO`, `WARN`, `ERROR`.
    pub log_level: String,
    /// Log file path; empty means stderr.
    pub log_file: String,
    /// Deployment environment name.
    pub environment: String,
    /// Debug mode switch.
    pub debug: bool,
    /// Extra configuration file to load before binding.
    pub config_file: String,
}

impl Default for StandardConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(120),
            shutdown_timeout: Duration::from_secs(30),
            log_level: "INFO".to_string(),
            log_file: String::new(),
            environment: "development".to_string(),
            debug: false,
            config_file: String::new(),
        }
    }
}

impl StandardConfig {
    /// Whether `environment` is `production` (case-insensitive).
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Parsed `log_level`, falling back to Info for unknown names.
    #[must_use]
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Info)
    }
}

impl Bind for StandardConfig {
    fn bind(&mut self, binder: &mut Binder<'_>) -> Result<()> {
        binder.field(FieldSpec::new("Port").default("8080"), &mut self.port)?;
        binder.field(FieldSpec::new("Host").default("0.0.0.0"), &mut self.host)?;
        binder.field(
            FieldSpec::new("ReadTimeout").key("read_timeout").default("10s"),
            &mut self.read_timeout,
        )?;
        binder.field(
            FieldSpec::new("WriteTimeout").key("write_timeout").default("10s"),
            &mut self.write_timeout,
        )?;
        binder.field(
            FieldSpec::new("IdleTimeout").key("idle_timeout").default("120s"),
            &mut self.idle_timeout,
        )?;
        binder.field(
            FieldSpec::new("ShutdownTimeout").key("shutdown_timeout").default("30s"),
            &mut self.shutdown_timeout,
        )?;
        binder.field(
            FieldSpec::new("LogLevel").key("log_level").default("INFO"),
            &mut self.log_level,
        )?;
        binder.field(FieldSpec::new("LogFile").key("log_file"), &mut self.log_file)?;
        binder.field(
            FieldSpec::new("Environment").default("development"),
            &mut self.environment,
        )?;
        binder.field(FieldSpec::new("Debug").default("false"), &mut self.debug)?;
        binder.field(FieldSpec::new("ConfigFile").key("config_file"), &mut self.config_file)?;
        Ok(())
    }
}

/// A resolver, the standard settings bound from it, and a logger.
#[derive(Debug)]
pub struct AppEnv {
    resolver: Resolver,
    config: StandardConfig,
    logger: Logger,
}

impl AppEnv {
    /// Creates an environment reading the process environment under `prefix`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self::with_resolver(Resolver::new(prefix))
    }

    /// Creates an environment around an existing resolver.
    #[must_use]
    pub fn with_resolver(resolver: Resolver) -> Self {
        Self {
            resolver,
            config: StandardConfig::default(),
            logger: Logger::new(LogLevel::Info),
        }
    }

    /// Loads the standard settings and rebuilds the logger from them.
    ///
    /// The file named by the `config_file` key is loaded first when set; a
    /// failure there is logged as a warning and does not stop binding. A log
    /// file that cannot be opened leaves the logger on stderr.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldCoercion`](crate::Error::FieldCoercion) if a
    /// standard setting has a value of the wrong type.
    pub fn load_standard_config(&mut self) -> Result<BindReport> {
        let config_file = self.resolver.string("config_file", "");
        if !config_file.is_empty() {
            if let Err(err) = self.resolver.load_file(&config_file) {
                log::warn!("could not load {config_file}: {err}");
            }
        }

        let report = self.resolver.load(&mut self.config)?;
        self.logger = self.build_logger();
        Ok(report)
    }

    fn build_logger(&self) -> Logger {
        let level = self.config.log_level();
        if self.config.log_file.is_empty() {
            return Logger::new(level);
        }

        match Logger::to_file(level, &self.config.log_file) {
            Ok(logger) => logger,
            Err(err) => {
                log::warn!("could not open log file {}: {err}", self.config.log_file);
                Logger::new(level)
            }
        }
    }

    /// Binds an application-specific struct from the same resolver.
    ///
    /// # Errors
    ///
    /// See [`Resolver::load`].
    pub fn load_config<T: Bind + ?Sized>(&self, target: &mut T) -> Result<BindReport> {
        self.resolver.load(target)
    }

    /// Replaces the logger.
    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = logger;
    }

    /// The underlying resolver.
    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The standard settings (defaults until loaded).
    #[must_use]
    pub fn config(&self) -> &StandardConfig {
        &self.config
    }

    /// The current logger.
    #[must_use]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}
