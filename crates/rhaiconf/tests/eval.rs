//! Integration tests for the typed evaluation entry points.

use std::collections::HashMap;

use rhaiconf::{BindingSet, Error, EvalOptions, eval_ext_to, eval_to, rhai::ImmutableString};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ServerConfig {
    n: i64,
    f: f64,
}

#[test]
fn struct_destination() {
    let mut config = ServerConfig { n: 0, f: 0.0 };
    eval_to(&mut config, "config::value(#{n: 5, f: 0.1})").unwrap();
    assert_eq!(config, ServerConfig { n: 5, f: 0.1 });
}

#[test]
fn string_destination() {
    let mut config = String::new();
    eval_to(&mut config, r#"config::value("Configured")"#).unwrap();
    assert_eq!(config, "Configured");
}

#[test]
fn map_destination() {
    let mut config: HashMap<String, serde_json::Value> = HashMap::new();
    eval_to(&mut config, r#"config::value(#{"int": 5, "float64": 0.1})"#).unwrap();
    assert_eq!(config.len(), 2);
    assert_eq!(config["int"], serde_json::json!(5));
    assert_eq!(config["float64"], serde_json::json!(0.1));
}

#[test]
fn bare_result_expression_is_accepted() {
    // config::value marks the result but is not mandatory; a script whose
    // final expression already has the right shape works the same way.
    let mut config = ServerConfig { n: 0, f: 0.0 };
    eval_to(&mut config, "#{n: 1, f: 2.5}").unwrap();
    assert_eq!(config, ServerConfig { n: 1, f: 2.5 });
}

#[test]
fn scripts_may_compute_before_producing_the_value() {
    let mut config = ServerConfig { n: 0, f: 0.0 };
    eval_to(
        &mut config,
        "let base = 4;\nconfig::value(#{n: base * 2, f: 0.5})",
    )
    .unwrap();
    assert_eq!(config, ServerConfig { n: 8, f: 0.5 });
}

#[test]
fn statements_only_produce_no_value() {
    let mut config = String::from("untouched");
    let err = eval_to(&mut config, "let x = 1;").unwrap_err();
    assert!(matches!(err, Error::NoValue));
    assert_eq!(config, "untouched");
}

#[test]
fn type_mismatch_names_both_types_and_leaves_destination() {
    let mut config = ServerConfig { n: 7, f: 7.0 };
    let err = eval_to(&mut config, "config::value(42)").unwrap_err();
    match err {
        Error::TypeMismatch {
            expected, actual, ..
        } => {
            assert!(expected.contains("ServerConfig"), "expected was {expected}");
            assert_eq!(actual, "i64");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(config, ServerConfig { n: 7, f: 7.0 });
}

#[test]
fn parse_errors_surface() {
    let mut config = String::new();
    let err = eval_to(&mut config, "config::value(").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn undefined_variables_are_rejected_at_parse_time() {
    let mut config = String::new();
    let err = eval_to(&mut config, "config::value(not_defined)").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn runtime_errors_surface() {
    let mut config = String::new();
    let err = eval_to(&mut config, r#"throw "boom""#).unwrap_err();
    match err {
        Error::Eval(inner) => assert!(inner.to_string().contains("boom")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn operations_budget_aborts_runaway_scripts() {
    let mut config = String::new();
    let options = EvalOptions {
        max_operations: 100,
        ..EvalOptions::default()
    };
    let err = eval_ext_to(
        &mut config,
        r#"let x = 0; while x < 1_000_000 { x += 1 } config::value("done")"#,
        options,
        [],
    )
    .unwrap_err();
    assert!(matches!(err, Error::Eval(_)));
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Endpoint {
    host: String,
    port: i64,
}

#[test]
fn extension_constructors_round_trip_exactly() {
    let mut net = BindingSet::new("net");
    net.module_mut()
        .set_native_fn("endpoint", |host: ImmutableString, port: i64| {
            Ok(Endpoint {
                host: host.to_string(),
                port,
            })
        });

    let mut config = Endpoint {
        host: String::new(),
        port: 0,
    };
    eval_ext_to(
        &mut config,
        r#"config::value(net::endpoint("db.internal", 5432))"#,
        EvalOptions::default(),
        [net],
    )
    .unwrap();
    assert_eq!(
        config,
        Endpoint {
            host: "db.internal".to_string(),
            port: 5432,
        }
    );
}

#[test]
fn extension_constants_feed_structural_conversion() {
    let defaults = BindingSet::new("defaults").with_value("port", 5432_i64);

    let mut config = Endpoint {
        host: String::new(),
        port: 0,
    };
    eval_ext_to(
        &mut config,
        r#"config::value(#{host: "localhost", port: defaults::port})"#,
        EvalOptions::default(),
        [defaults],
    )
    .unwrap();
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 5432);
}

#[test]
fn multiple_binding_sets_register_in_order() {
    let hosts = BindingSet::new("hosts").with_value("primary", "db1.internal");
    let ports = BindingSet::new("ports").with_value("postgres", 5432_i64);

    let mut config = Endpoint {
        host: String::new(),
        port: 0,
    };
    eval_ext_to(
        &mut config,
        "config::value(#{host: hosts::primary, port: ports::postgres})",
        EvalOptions::default(),
        [hosts, ports],
    )
    .unwrap();
    assert_eq!(config.host, "db1.internal");
    assert_eq!(config.port, 5432);
}

#[test]
fn binding_validation_fails_before_evaluation() {
    let mut config = String::from("untouched");
    let err = eval_ext_to(
        &mut config,
        r#"config::value("never evaluated")"#,
        EvalOptions::default(),
        [BindingSet::new("dup"), BindingSet::new("dup")],
    )
    .unwrap_err();
    match err {
        Error::Binding { name, .. } => assert_eq!(name, "dup"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(config, "untouched");
}

#[test]
fn reserved_config_name_is_rejected() {
    let mut config = String::new();
    let err = eval_ext_to(
        &mut config,
        r#"config::value("x")"#,
        EvalOptions::default(),
        [BindingSet::new("config")],
    )
    .unwrap_err();
    assert!(matches!(err, Error::Binding { .. }));
}
