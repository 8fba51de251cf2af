//! MIME type detection module
//!
//! Infers the Content-Type of a served file from its extension.

const TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("css", "text/css"),
    ("txt", "text/plain; charset=utf-8"),
    ("md", "text/plain; charset=utf-8"),
    ("xml", "application/xml"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("wasm", "application/wasm"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
];

const DEFAULT_TYPE: &str = "application/octet-stream";

/// Content-Type for a path, judged by its last extension (case-insensitive).
///
/// # Examples
/// ```
/// use restabuild_web::http::mime::content_type_for;
/// assert_eq!(content_type_for("web/app.JS"), "application/javascript");
/// assert_eq!(content_type_for("web/LICENSE"), "application/octet-stream");
/// ```
pub fn content_type_for(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return DEFAULT_TYPE;
    };
    if stem.is_empty() {
        return DEFAULT_TYPE;
    }
    TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(DEFAULT_TYPE, |(_, content_type)| content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for("css/site.css"), "text/css");
        assert_eq!(content_type_for("js/build-queue.js"), "application/javascript");
        assert_eq!(content_type_for("openapi.json"), "application/json");
        assert_eq!(content_type_for("img/logo.svg"), "image/svg+xml");
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(content_type_for("archive.xyz"), DEFAULT_TYPE);
        assert_eq!(content_type_for("Makefile"), DEFAULT_TYPE);
        assert_eq!(content_type_for(".hidden"), DEFAULT_TYPE);
        assert_eq!(content_type_for("dir.d/file"), DEFAULT_TYPE);
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert_eq!(content_type_for("LOGO.PNG"), "image/png");
    }
}
