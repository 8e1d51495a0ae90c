use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use shopcart_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

/// Renders the effective configuration with the layer each value came from.
pub fn run(config: &AppConfig, options: &LoadOptions) -> String {
    let config_file_path: Option<PathBuf> = resolve_config_path(options.config_path.as_deref());
    let overrides = &options.overrides;
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let doc = config_file_doc.as_ref();
    let path = config_file_path.as_deref();

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];

    let product_ids = config
        .catalog
        .products
        .iter()
        .map(|product| product.id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    lines.push(render_line(
        "catalog.products",
        &format!("{} products (ids: {product_ids})", config.catalog.products.len()),
        field_source("catalog.products", None, &[], doc, path),
    ));
    lines.push(render_line(
        "session.max_input_attempts",
        &config.session.max_input_attempts.to_string(),
        field_source(
            "session.max_input_attempts",
            overrides.max_input_attempts.map(|_| "--max-input-attempts"),
            &["SHOPCART_SESSION_MAX_INPUT_ATTEMPTS"],
            doc,
            path,
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            overrides.log_level.as_ref().map(|_| "--log-level"),
            &["SHOPCART_LOGGING_LEVEL", "SHOPCART_LOG_LEVEL"],
            doc,
            path,
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source(
            "logging.format",
            overrides.log_format.map(|_| "--log-format"),
            &["SHOPCART_LOGGING_FORMAT", "SHOPCART_LOG_FORMAT"],
            doc,
            path,
        ),
    ));

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    flag: Option<&str>,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(flag) = flag {
        return format!("flag ({flag})");
    }

    let env_hit = env_keys
        .iter()
        .find(|key| env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false));
    if let Some(env_key) = env_hit {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
