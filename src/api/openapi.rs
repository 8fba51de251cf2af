// Route description rendered as a minimal OpenAPI 3 document

use serde_json::{json, Map, Value};

use super::ApiRoute;

pub fn document<'a>(
    title: &str,
    description: &str,
    routes: impl Iterator<Item = &'a ApiRoute>,
) -> Value {
    let mut paths = Map::new();
    for route in routes {
        let operations = paths
            .entry(route.path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(operations) = operations {
            operations.insert(
                route.method.as_str().to_ascii_lowercase(),
                json!({
                    "summary": route.summary,
                    "responses": { "default": { "description": "Operation result" } }
                }),
            );
        }
    }

    json!({
        "openapi": "3.0.1",
        "info": {
            "title": title,
            "description": description,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": paths,
    })
}
