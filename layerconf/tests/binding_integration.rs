//! Integration tests for struct and schema binding.

mod common;

use std::path::PathBuf;
use std::time::Duration;

use common::{resolver_with, write_config};
use layerconf::{Bind, Binder, Error, FieldSpec, Result, Schema, Value};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct ServiceConfig {
    port: u16,
    host: String,
    read_timeout: Duration,
    debug: bool,
    workers: Option<u32>,
    database_url: String,
}

impl Bind for ServiceConfig {
    fn bind(&mut self, binder: &mut Binder<'_>) -> Result<()> {
        binder.field(FieldSpec::new("Port").default("8080"), &mut self.port)?;
        binder.field(FieldSpec::new("Host").default("0.0.0.0"), &mut self.host)?;
        binder.field(
            FieldSpec::new("ReadTimeout").key("read_timeout").default("10s"),
            &mut self.read_timeout,
        )?;
        binder.field(FieldSpec::new("Debug").default("false"), &mut self.debug)?;
        binder.field(FieldSpec::new("Workers"), &mut self.workers)?;
        binder.field(
            FieldSpec::new("DatabaseUrl")
                .key("database.url")
                .env("DATABASE_URL"),
            &mut self.database_url,
        )?;
        Ok(())
    }
}

#[test]
fn test_defaults_fill_unset_fields() {
    let resolver = resolver_with("app", &[]);
    let mut config = ServiceConfig::default();
    let report = resolver.load(&mut config).unwrap();

    assert!(report.is_clean());
    assert_eq!(config.port, 8080);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.read_timeout, Duration::from_secs(10));
    assert!(!config.debug);
    assert_eq!(config.workers, None);
    assert!(config.database_url.is_empty());
}

#[test]
fn test_env_and_files_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "service.yaml",
        "port: 9000\nread_timeout: 1m\ndatabase:\n  url: postgres://file\n",
    );

    let resolver = resolver_with("app", &[("APP_PORT", "9100"), ("APP_WORKERS", "4")]);
    resolver.load_file(&path).unwrap();

    let mut config = ServiceConfig::default();
    resolver.load(&mut config).unwrap();

    assert_eq!(config.port, 9100);
    assert_eq!(config.read_timeout, Duration::from_secs(60));
    assert_eq!(config.workers, Some(4));
    assert_eq!(config.database_url, "postgres://file");
}

#[test]
fn test_explicit_env_name_is_not_prefixed() {
    let resolver = resolver_with("app", &[("DATABASE_URL", "postgres://env")]);
    let mut config = ServiceConfig::default();
    resolver.load(&mut config).unwrap();
    assert_eq!(config.database_url, "postgres://env");
}

#[test]
fn test_bad_value_fails_naming_field_and_keeps_earlier_fields() {
    let resolver = resolver_with("app", &[("APP_PORT", "9100"), ("APP_READ_TIMEOUT", "soon")]);
    let mut config = ServiceConfig::default();
    let err = resolver.load(&mut config).unwrap_err();

    match &err {
        Error::FieldCoercion { field, value, .. } => {
            assert_eq!(field, "ReadTimeout");
            assert_eq!(value, "soon");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(config.port, 9100);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.read_timeout, Duration::ZERO);
}

#[test]
fn test_non_numeric_integer_fails() {
    let resolver = resolver_with("app", &[("APP_PORT", "eighty")]);
    let mut config = ServiceConfig::default();
    let err = resolver.load(&mut config).unwrap_err();
    assert!(err.to_string().starts_with("failed to set field Port from 'eighty'"));
}

#[test]
fn test_field_file_is_loaded_before_resolving() {
    let dir = TempDir::new().unwrap();
    let secrets = write_config(dir.path(), "secrets.env", "API_TOKEN=from-file\n");

    struct Secrets {
        source: PathBuf,
        token: String,
    }
    impl Bind for Secrets {
        fn bind(&mut self, binder: &mut Binder<'_>) -> Result<()> {
            let spec = FieldSpec::new("Token").key("api_token").file(self.source.clone());
            binder.field(spec, &mut self.token)
        }
    }

    let resolver = resolver_with("", &[]);
    let mut secrets_config = Secrets {
        source: secrets.clone(),
        token: String::new(),
    };
    let report = resolver.load(&mut secrets_config).unwrap();

    assert!(report.is_clean());
    assert_eq!(secrets_config.token, "from-file");
    assert_eq!(resolver.loaded_files(), vec![secrets]);
}

#[test]
fn test_unreadable_field_file_is_a_diagnostic() {
    struct WithFile {
        level: String,
    }
    impl Bind for WithFile {
        fn bind(&mut self, binder: &mut Binder<'_>) -> Result<()> {
            binder.field(
                FieldSpec::new("Level")
                    .file("/nonexistent/layerconf/level.env")
                    .default("INFO"),
                &mut self.level,
            )
        }
    }

    let resolver = resolver_with("", &[]);
    let mut target = WithFile {
        level: String::new(),
    };
    let report = resolver.load(&mut target).unwrap();

    assert_eq!(target.level, "INFO");
    assert!(!report.is_clean());
    let diagnostic = &report.diagnostics()[0];
    assert_eq!(diagnostic.field, "Level");
    assert!(diagnostic.path.ends_with("level.env"));
}

#[test]
fn test_schema_from_file() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_config(
        dir.path(),
        "schema.yaml",
        "- name: port\n  type: int\n  default: \"8080\"\n- name: grace\n  type: duration\n  config: shutdown.grace\n- name: token\n  env: API_TOKEN\n",
    );
    let schema = Schema::from_file(&schema_path).unwrap();

    let resolver = resolver_with("svc", &[("API_TOKEN", "t")]);
    resolver.set("shutdown.grace", "45s");
    let record = resolver.load_schema(&schema).unwrap();

    let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["port", "grace", "token"]);
    assert_eq!(record.get("port"), Some(&Value::Int(8080)));
    assert_eq!(record.get("grace"), Some(&Value::Duration(Duration::from_secs(45))));
    assert_eq!(record.get("token"), Some(&Value::String("t".to_string())));
}

#[test]
fn test_schema_json_file() {
    let dir = TempDir::new().unwrap();
    let schema_path = write_config(
        dir.path(),
        "schema.json",
        r#"[{"name": "ratio", "type": "float", "default": "0.25"}]"#,
    );
    let schema = Schema::from_file(&schema_path).unwrap();
    let record = resolver_with("", &[]).load_schema(&schema).unwrap();
    assert_eq!(record.get("ratio"), Some(&Value::Float(0.25)));
}

#[test]
fn test_schema_errors() {
    assert!(matches!(
        Schema::from_yaml_str("42"),
        Err(Error::InvalidTarget { .. })
    ));
    assert!(matches!(
        Schema::from_file("/nonexistent/layerconf/schema.yaml"),
        Err(Error::FileRead { .. })
    ));

    let schema = Schema::from_yaml_str("tags: {type: list}\n").unwrap();
    let err = resolver_with("", &[]).load_schema(&schema).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { ref field, .. } if field == "tags"));
}
