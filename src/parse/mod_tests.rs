//! Tests for parse orchestration and field dispatch.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::{TempDir, tempdir};

use crate::convert::{Tokens, TypeRegistry, converter, one_value};
use crate::error::{ConfigError, ConvertError, FieldError};
use crate::names::Inflector;
use crate::parse::{Handlers, Parser, must_parse, parse};
use crate::record::{Fields, Record};

#[derive(Debug, Default)]
struct UpdaterConfig {
    user: String,
    key_file: String,
    port: u16,
    records: HashMap<String, Vec<String>>,
}

impl Record for UpdaterConfig {
    fn fields(&mut self) -> Fields<'_> {
        Fields::new()
            .field("User", &mut self.user)
            .field("KeyFile", &mut self.key_file)
            .field("Port", &mut self.port)
            .field("Records", &mut self.records)
    }
}

/// Writes `content` to `name` inside a fresh temp dir.
fn config_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn field_error(err: &ConfigError) -> &FieldError {
    err.field_error()
        .unwrap_or_else(|| panic!("expected directive error, got {err:?}"))
}

mod round_trip {
    use super::*;

    #[test]
    fn strings_and_continued_handler_line() {
        let (_dir, path) = config_file(
            "config",
            "user martin\nkey-file  /home/martin/key.pem\n\
             records example.com\n   www.example.com\n",
        );
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();
        let mut calls = Vec::new();

        parse(
            &mut config,
            &path,
            &registry,
            Handlers::new().on("Records", |_: &mut UpdaterConfig, values: &[String]| {
                calls.push(values.to_vec());
                Ok::<(), ConvertError>(())
            }),
        )
        .unwrap();

        assert_eq!(config.user, "martin");
        assert_eq!(config.key_file, "/home/martin/key.pem");
        assert_eq!(calls, vec![vec!["example.com", "www.example.com"]]);
    }

    #[test]
    fn handler_mutates_record() {
        let (_dir, path) = config_file("config", "records example.com www.example.com\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        parse(
            &mut config,
            &path,
            &registry,
            Handlers::new().on("Records", |c: &mut UpdaterConfig, values: &[String]| {
                c.records
                    .entry("example.com".to_string())
                    .or_default()
                    .extend(values.iter().cloned());
                Ok::<(), ConvertError>(())
            }),
        )
        .unwrap();

        assert_eq!(
            config.records["example.com"],
            vec!["example.com", "www.example.com"]
        );
    }

    #[test]
    fn singular_key_reaches_plural_field() {
        let (_dir, path) = config_file("config", "record a.example.com\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();
        let mut seen = 0;

        parse(
            &mut config,
            &path,
            &registry,
            Handlers::new().on("Records", |_: &mut UpdaterConfig, _: &[String]| {
                seen += 1;
                Ok::<(), ConvertError>(())
            }),
        )
        .unwrap();

        assert_eq!(seen, 1);
    }

    #[test]
    fn later_lines_override_earlier_ones() {
        let (_dir, path) = config_file("config", "port 22\nport 2222\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        parse(&mut config, &path, &registry, Handlers::new()).unwrap();

        assert_eq!(config.port, 2222);
    }
}

mod dispatch_errors {
    use super::*;

    #[test]
    fn unknown_key_names_both_candidates_and_stops() {
        let (_dir, path) = config_file("config", "user martin\nbogus value\nport 22\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        let err = parse(&mut config, &path, &registry, Handlers::new()).unwrap_err();

        assert!(matches!(
            field_error(&err),
            FieldError::UnknownOption { candidates } if candidates == &["Bogus", "Boguses"]
        ));
        assert_eq!(err.line(), Some(2));
        assert_eq!(
            err.to_string(),
            format!(
                "{} line 2: error parsing bogus: \
                 unknown option (field Bogus or Boguses is missing)",
                path.display()
            )
        );
        // No rollback of earlier lines, no processing of later ones.
        assert_eq!(config.user, "martin");
        assert_eq!(config.port, 0);
    }

    #[test]
    fn wrong_arity_fails_before_assignment() {
        let (_dir, path) = config_file("config", "port 22 23\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig {
            port: 8,
            ..UpdaterConfig::default()
        };

        let err = parse(&mut config, &path, &registry, Handlers::new()).unwrap_err();

        assert!(matches!(
            field_error(&err),
            FieldError::Convert(ConvertError::ExactlyOne { found: 2 })
        ));
        assert_eq!(config.port, 8);
    }

    #[test]
    fn invalid_value_reports_converter_error() {
        let (_dir, path) = config_file("config", "port lots\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        let err = parse(&mut config, &path, &registry, Handlers::new()).unwrap_err();

        assert!(matches!(
            field_error(&err),
            FieldError::Convert(ConvertError::Invalid { value, .. }) if value == "lots"
        ));
    }

    #[test]
    fn unsupported_type_without_handler() {
        let (_dir, path) = config_file("config", "records example.com\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        let err = parse(&mut config, &path, &registry, Handlers::new()).unwrap_err();

        let FieldError::UnsupportedType { type_name } = field_error(&err) else {
            panic!("expected unsupported type, got {err:?}");
        };
        assert!(type_name.contains("HashMap"));
        let message = err.to_string();
        assert!(message.contains("don't know how to set fields of the type"));
    }

    #[test]
    fn empty_registry_supports_nothing() {
        let (_dir, path) = config_file("config", "user martin\n");
        let registry = TypeRegistry::new();
        let mut config = UpdaterConfig::default();

        let err = parse(&mut config, &path, &registry, Handlers::new()).unwrap_err();

        assert!(matches!(
            field_error(&err),
            FieldError::UnsupportedType { type_name } if type_name.ends_with("String")
        ));
    }

    #[test]
    fn handler_error_is_marked() {
        let (_dir, path) = config_file("config", "records nodots\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        let err = parse(
            &mut config,
            &path,
            &registry,
            Handlers::new().on("Records", |_: &mut UpdaterConfig, values: &[String]| {
                let record = &values[0];
                Err::<(), _>(format!("record {record} doesn't look like a valid FQDN"))
            }),
        )
        .unwrap_err();

        assert!(matches!(field_error(&err), FieldError::Handler(_)));
        let message = err.to_string();
        assert!(message.contains("error parsing records: record nodots "));
        assert!(message.ends_with("valid FQDN (from handler)"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        let err = parse(
            &mut config,
            dir.path().join("missing"),
            &registry,
            Handlers::new(),
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn error_in_sourced_file_points_at_that_file() {
        let dir = tempdir().unwrap();
        let extra = dir.path().join("extra.conf");
        fs::write(&extra, "# comment\nport nope\n").unwrap();
        let main = dir.path().join("main.conf");
        fs::write(&main, format!("user martin\nsource {}\n", extra.display())).unwrap();

        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();
        let err = parse(&mut config, &main, &registry, Handlers::new()).unwrap_err();

        let message = err.to_string();
        let ConfigError::Directive { path, line, .. } = &err else {
            panic!("expected directive error, got {err:?}");
        };
        assert_eq!(path, &extra);
        assert_eq!(*line, 2);
        assert!(message.contains(" error parsing port: "));
    }
}

mod precedence {
    use super::*;

    #[test]
    fn handler_wins_over_registered_converter() {
        let (_dir, path) = config_file("config", "user martin\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        parse(
            &mut config,
            &path,
            &registry,
            Handlers::new().on("User", |c: &mut UpdaterConfig, values: &[String]| {
                c.user = values[0].to_uppercase();
                Ok::<(), ConvertError>(())
            }),
        )
        .unwrap();

        assert_eq!(config.user, "MARTIN");
    }

    #[test]
    fn handlers_for_other_fields_do_not_interfere() {
        let (_dir, path) = config_file("config", "user martin\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        parse(
            &mut config,
            &path,
            &registry,
            Handlers::new().on("Port", |_: &mut UpdaterConfig, _: &[String]| {
                Err::<(), _>("should not run")
            }),
        )
        .unwrap();

        assert_eq!(config.user, "martin");
    }
}

mod chains {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    struct Hostname(String);

    #[derive(Default)]
    struct Target {
        host: Hostname,
    }

    impl Record for Target {
        fn fields(&mut self) -> Fields<'_> {
            Fields::new().field("Host", &mut self.host)
        }
    }

    /// Registers a three-stage chain that records which stages ran.
    fn registry_with_trace(trace: &Arc<AtomicUsize>) -> TypeRegistry {
        let first = Arc::clone(trace);
        let second = Arc::clone(trace);
        let mut registry = TypeRegistry::new();
        registry.register::<Hostname>([
            one_value(),
            converter(move |tokens: Tokens| {
                first.fetch_add(1, Ordering::SeqCst);
                let name = tokens[0].trim_end_matches('.').to_lowercase();
                if name.contains('.') {
                    Ok(name)
                } else {
                    Err(ConvertError::invalid(name, "not a FQDN"))
                }
            }),
            converter(move |name: String| {
                second.fetch_add(10, Ordering::SeqCst);
                Ok(Hostname(name))
            }),
        ]);
        registry
    }

    #[test]
    fn stages_run_in_order_threading_values() {
        let (_dir, path) = config_file("config", "host WWW.Example.COM.\n");
        let trace = Arc::new(AtomicUsize::new(0));
        let registry = registry_with_trace(&trace);
        let mut target = Target::default();

        parse(&mut target, &path, &registry, Handlers::new()).unwrap();

        assert_eq!(target.host, Hostname("www.example.com".to_string()));
        assert_eq!(trace.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn failing_stage_stops_chain_and_keeps_field() {
        let (_dir, path) = config_file("config", "host localhost\n");
        let trace = Arc::new(AtomicUsize::new(0));
        let registry = registry_with_trace(&trace);
        let mut target = Target {
            host: Hostname("old.example.com".to_string()),
        };

        let err = parse(&mut target, &path, &registry, Handlers::new()).unwrap_err();

        assert!(matches!(
            field_error(&err),
            FieldError::Convert(ConvertError::Invalid { .. })
        ));
        assert_eq!(trace.load(Ordering::SeqCst), 1);
        assert_eq!(target.host, Hostname("old.example.com".to_string()));
    }

    #[test]
    fn arity_stage_rejects_before_later_stages() {
        let (_dir, path) = config_file("config", "host a.example.com b.example.com\n");
        let trace = Arc::new(AtomicUsize::new(0));
        let registry = registry_with_trace(&trace);
        let mut target = Target::default();

        let err = parse(&mut target, &path, &registry, Handlers::new()).unwrap_err();

        assert!(matches!(
            field_error(&err),
            FieldError::Convert(ConvertError::ExactlyOne { found: 2 })
        ));
        assert_eq!(trace.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn chain_ending_in_wrong_type_is_a_mismatch() {
        let (_dir, path) = config_file("config", "host a.example.com\n");
        let mut registry = TypeRegistry::new();
        registry.register::<Hostname>([one_value()]);
        let mut target = Target::default();

        let err = parse(&mut target, &path, &registry, Handlers::new()).unwrap_err();

        assert!(matches!(
            field_error(&err),
            FieldError::Convert(ConvertError::Mismatch { .. })
        ));
    }

    #[test]
    fn registries_are_independent() {
        let (_dir, path) = config_file("config", "host a.example.com\n");
        let trace = Arc::new(AtomicUsize::new(0));
        let with_chain = registry_with_trace(&trace);
        let without_chain = TypeRegistry::new();

        let mut first = Target::default();
        let mut second = Target::default();
        let chained = parse(&mut first, &path, &with_chain, Handlers::new());
        let unchained = parse(&mut second, &path, &without_chain, Handlers::new());

        assert!(chained.is_ok());
        assert!(unchained.is_err());
    }
}

mod parser_options {
    use super::*;

    /// Maps every key to `Port`, for checking the strategy is consulted.
    struct AlwaysPort;

    impl Inflector for AlwaysPort {
        fn pluralize(&self, _: &str) -> String {
            "Port".to_string()
        }

        fn singularize(&self, _: &str) -> String {
            "Port".to_string()
        }

        fn normalize_acronyms(&self, name: &str) -> String {
            name.to_owned()
        }
    }

    #[test]
    fn custom_inflector_is_used() {
        let (_dir, path) = config_file("config", "listen 8080\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        Parser::new(&registry)
            .with_inflector(&AlwaysPort)
            .parse(&mut config, &path, Handlers::new())
            .unwrap();

        assert_eq!(config.port, 8080);
    }

    #[test]
    fn apply_all_uses_given_lines() {
        let lines = crate::reader::read_str(Path::new("inline"), "user martin\nport 2\n").unwrap();
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        Parser::new(&registry)
            .apply_all(&mut config, &lines, Handlers::new())
            .unwrap();

        assert_eq!(config.user, "martin");
        assert_eq!(config.port, 2);
    }
}

mod must_parse_wrapper {
    use super::*;

    #[test]
    fn succeeds_quietly() {
        let (_dir, path) = config_file("config", "user martin\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        must_parse(&mut config, &path, &registry, Handlers::new());

        assert_eq!(config.user, "martin");
    }

    #[test]
    #[should_panic(expected = "error parsing bogus")]
    fn panics_with_error_message() {
        let (_dir, path) = config_file("config", "bogus 1\n");
        let registry = TypeRegistry::with_builtins();
        let mut config = UpdaterConfig::default();

        must_parse(&mut config, &path, &registry, Handlers::new());
    }
}
