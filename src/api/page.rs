// Human-readable listing of the registered routes

use std::fmt::Write as _;

use super::{ApiRoute, OPENAPI_PATH};

pub fn render<'a>(
    title: &str,
    description: &str,
    routes: impl Iterator<Item = &'a ApiRoute>,
) -> String {
    let mut rows = String::new();
    for route in routes {
        // Writing to a String cannot fail.
        let _ = writeln!(
            rows,
            "            <tr><td class=\"method\">{}</td><td><code>{}</code></td><td>{}</td></tr>",
            route.method,
            escape(&route.path),
            escape(&route.summary)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <link rel="stylesheet" href="web/style.css">
</head>
<body>
    <main class="container">
        <h1>{title}</h1>
        <p>{description}</p>
        <table class="routes">
            <tr><th>Method</th><th>Path</th><th>Summary</th></tr>
{rows}        </table>
        <p><a href="{openapi}">OpenAPI JSON</a></p>
    </main>
</body>
</html>
"#,
        title = escape(title),
        description = escape(description),
        openapi = OPENAPI_PATH.trim_start_matches('/'),
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
