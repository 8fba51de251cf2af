//! Static file serving module
//!
//! Serves files under a context-relative prefix, looking in a filesystem
//! directory first and in the assets compiled into the binary second. A file
//! found in neither is declined so the chain can fall through to 404.

use super::{ContextPath, Handler, Outcome};
use crate::error::HandlerError;
use crate::http::{cache, mime, strip_path_prefix, RequestContext, ResponseWriter};
use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::header;
use hyper::{Method, StatusCode};
use std::io;
use std::path::PathBuf;
use tokio::fs;

const INDEX_FILE: &str = "index.html";

const BUNDLED: &[(&str, &[u8])] = &[
    ("style.css", include_bytes!("../../resources/web/style.css")),
    ("app.js", include_bytes!("../../resources/web/app.js")),
];

/// Named assets embedded at compile time, keyed by relative path.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSet {
    entries: &'static [(&'static str, &'static [u8])],
}

impl ResourceSet {
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }

    /// The web UI assets shipped with the server.
    pub const fn bundled() -> Self {
        Self::new(BUNDLED)
    }

    pub fn get(&self, path: &str) -> Option<&'static [u8]> {
        self.entries
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, content)| *content)
    }
}

/// File-or-resource handler for everything under `prefix`.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    prefix: ContextPath,
    dir: PathBuf,
    resources: ResourceSet,
}

impl StaticFiles {
    pub fn new(prefix: ContextPath, dir: impl Into<PathBuf>, resources: ResourceSet) -> Self {
        Self {
            prefix,
            dir: dir.into(),
            resources,
        }
    }

    async fn load(&self, relative: &str) -> Result<Option<Bytes>, HandlerError> {
        if let Some(content) = self.load_from_directory(relative).await? {
            return Ok(Some(content));
        }
        Ok(self.resources.get(relative).map(Bytes::from_static))
    }

    /// Read `relative` below the directory; `None` if absent or outside it.
    async fn load_from_directory(&self, relative: &str) -> Result<Option<Bytes>, HandlerError> {
        if relative.split('/').any(|segment| segment == "..") {
            return Ok(None);
        }
        // Missing directory is normal when only bundled assets are deployed.
        let Ok(root) = fs::canonicalize(&self.dir).await else {
            return Ok(None);
        };
        let Ok(file) = fs::canonicalize(root.join(relative)).await else {
            return Ok(None);
        };
        if !file.starts_with(&root) {
            return Ok(None);
        }

        match fs::metadata(&file).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }
        Ok(Some(Bytes::from(fs::read(&file).await?)))
    }
}

#[async_trait]
impl Handler for StaticFiles {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        let Some(rest) = strip_path_prefix(ctx.relative_path(), self.prefix.as_str()) else {
            return Ok(Outcome::Declined);
        };
        // Traversal checks run on the decoded path.
        let Ok(decoded) = urlencoding::decode(rest.trim_start_matches('/')) else {
            return Ok(Outcome::Declined);
        };
        let mut relative = decoded.into_owned();
        if relative.is_empty() || relative.ends_with('/') {
            relative.push_str(INDEX_FILE);
        }

        let Some(content) = self.load(&relative).await? else {
            return Ok(Outcome::Declined);
        };

        let etag = cache::etag_for(&content);
        resp.set_header(header::ETAG, &etag)?;
        resp.set_header(header::CACHE_CONTROL, cache::STATIC_CACHE_CONTROL)?;
        if cache::is_not_modified(ctx.headers(), &etag) {
            resp.write_empty(StatusCode::NOT_MODIFIED)?;
            return Ok(Outcome::Claimed);
        }

        let content_type = mime::content_type_for(&relative);
        if ctx.method() == Method::HEAD {
            resp.set_header(header::CONTENT_LENGTH, &content.len().to_string())?;
            resp.write(StatusCode::OK, content_type, Bytes::new())?;
        } else {
            resp.write(StatusCode::OK, content_type, content)?;
        }
        Ok(Outcome::Claimed)
    }
}
