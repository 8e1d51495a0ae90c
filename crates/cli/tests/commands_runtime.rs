use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use clap::Parser;
use rust_decimal::Decimal;
use serde_json::Value;
use shopcart_cli::commands::{catalog, config};
use shopcart_cli::Cli;
use shopcart_core::config::{AppConfig, LoadOptions, LogFormat};
use shopcart_core::{Product, ProductId};
use tempfile::TempDir;

#[test]
fn catalog_lists_default_products() {
    with_env(&[], || {
        let config = AppConfig::load(LoadOptions::default()).expect("default config loads");
        let result = catalog::run(&config, false);

        assert_eq!(result.exit_code, 0);
        assert_eq!(
            result.output,
            "Products Available:\n1. Product1 - $19.99\n2. Product2 - $29.99\n3. Product3 - $39.99"
        );
    });
}

#[test]
fn catalog_json_is_machine_readable() {
    with_env(&[], || {
        let config = AppConfig::load(LoadOptions::default()).expect("default config loads");
        let result = catalog::run(&config, true);
        assert_eq!(result.exit_code, 0);

        let payload: Value = serde_json::from_str(&result.output).expect("valid JSON");
        let products = payload.as_array().expect("array of products");
        assert_eq!(products.len(), 3);
        assert_eq!(products[0]["id"], 1);
        assert_eq!(products[0]["name"], "Product1");
        assert_eq!(products[0]["price"], "19.99");
    });
}

#[test]
fn catalog_reports_invalid_products() {
    let mut config = AppConfig::default();
    config.catalog.products = vec![
        Product::new(5, "Pen", Decimal::ONE),
        Product { id: ProductId(5), name: "Pencil".to_string(), price: Decimal::ONE },
    ];

    let result = catalog::run(&config, false);

    assert_eq!(result.exit_code, 2);
    let payload: Value = serde_json::from_str(&result.output).expect("failure payload is JSON");
    assert_eq!(payload["command"], "catalog");
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "catalog_validation");
}

#[test]
fn config_attributes_sources() {
    with_env(&[("SHOPCART_LOG_LEVEL", "debug")], || {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("shopcart.toml");
        fs::write(&path, "[session]\nmax_input_attempts = 7\n").expect("write config");

        let cli = Cli::try_parse_from(["shopcart", "--config", path_arg(&path), "config"])
            .expect("arguments parse");
        let options = cli.load_options();
        let config = AppConfig::load(options.clone()).expect("config loads");
        let output = config::run(&config, &options);

        assert!(output.contains("- session.max_input_attempts = 7 (source: file ("));
        assert!(output.contains("- logging.level = debug (source: env (SHOPCART_LOG_LEVEL))"));
        assert!(output.contains("- logging.format = Compact (source: default)"));
        assert!(output.contains("- catalog.products = 3 products (ids: 1,2,3) (source: default)"));
    });
}

#[test]
fn explicit_config_path_must_exist() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("missing.toml");

        let cli = Cli::try_parse_from(["shopcart", "--config", path_arg(&missing)])
            .expect("arguments parse");

        assert!(AppConfig::load(cli.load_options()).is_err());
    });
}

#[test]
fn command_line_flags_override_env_and_file() {
    with_env(&[("SHOPCART_LOG_LEVEL", "debug")], || {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("shopcart.toml");
        fs::write(&path, "[session]\nmax_input_attempts = 7\n").expect("write config");

        let cli = Cli::try_parse_from([
            "shopcart",
            "--config",
            path_arg(&path),
            "config",
            "--log-level",
            "error",
            "--log-format",
            "json",
            "--max-input-attempts",
            "2",
        ])
        .expect("arguments parse");
        let options = cli.load_options();
        let config = AppConfig::load(options.clone()).expect("config loads");

        assert_eq!(config.logging.level, "error");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.session.max_input_attempts, 2);
        let output = config::run(&config, &options);
        assert!(output.contains("- logging.level = error (source: flag (--log-level))"));
        assert!(output
            .contains("- session.max_input_attempts = 2 (source: flag (--max-input-attempts))"));
    });
}

#[test]
fn unknown_log_format_flag_is_rejected() {
    assert!(Cli::try_parse_from(["shopcart", "--log-format", "xml"]).is_err());
}

#[test]
fn out_of_range_attempts_flag_fails_validation() {
    with_env(&[], || {
        let cli = Cli::try_parse_from(["shopcart", "--max-input-attempts", "0"])
            .expect("arguments parse");

        assert!(AppConfig::load(cli.load_options()).is_err());
    });
}

fn path_arg(path: &std::path::Path) -> &str {
    path.to_str().expect("temp paths are utf-8")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "SHOPCART_SESSION_MAX_INPUT_ATTEMPTS",
        "SHOPCART_LOGGING_LEVEL",
        "SHOPCART_LOGGING_FORMAT",
        "SHOPCART_LOG_LEVEL",
        "SHOPCART_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
