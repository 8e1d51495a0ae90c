use shopcart_core::config::AppConfig;
use shopcart_core::Catalog;

use crate::commands::CommandResult;
use crate::session::product_line;

pub fn run(config: &AppConfig, json: bool) -> CommandResult {
    let catalog = match config.build_catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "catalog",
                "catalog_validation",
                format!("catalog issue: {error}"),
                2,
            );
        }
    };

    if json {
        return match serde_json::to_string(catalog.list_all()) {
            Ok(payload) => CommandResult::success(payload),
            Err(error) => CommandResult::failure("catalog", "serialization", error.to_string(), 4),
        };
    }

    CommandResult::success(render_listing(&catalog))
}

pub fn render_listing(catalog: &Catalog) -> String {
    let mut lines = vec!["Products Available:".to_string()];
    lines.extend(catalog.list_all().iter().map(product_line));
    lines.join("\n")
}
