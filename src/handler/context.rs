//! Context-scoped sub-routing.

use super::{Chain, Handler, Outcome};
use crate::error::HandlerError;
use crate::http::{RequestContext, ResponseWriter};
use async_trait::async_trait;
use std::fmt;

/// Normalized path prefix: empty (root) or `/segment[/segment...]` without a
/// trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextPath(String);

impl ContextPath {
    /// Normalize `raw`; surrounding slashes are ignored, so `restabuild`,
    /// `/restabuild` and `/restabuild/` are the same context.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            Self(String::new())
        } else {
            Self(format!("/{trimmed}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The context's own root, `/<prefix>/`.
    pub fn landing_path(&self) -> String {
        format!("{}/", self.0)
    }
}

impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.landing_path())
    }
}

/// Runs a child chain only for requests under a path prefix.
///
/// Outside the prefix the router declines without touching any child.
/// Children see paths relative to the prefix. The bare prefix without its
/// trailing slash is redirected to `/<prefix>/`.
#[derive(Debug)]
pub struct ContextRouter {
    prefix: ContextPath,
    chain: Chain,
}

impl ContextRouter {
    pub const fn new(prefix: ContextPath, chain: Chain) -> Self {
        Self { prefix, chain }
    }

    pub const fn prefix(&self) -> &ContextPath {
        &self.prefix
    }
}

#[async_trait]
impl Handler for ContextRouter {
    async fn handle(
        &self,
        ctx: &RequestContext<'_>,
        resp: &mut ResponseWriter,
    ) -> Result<Outcome, HandlerError> {
        let Some(scoped) = ctx.nest(self.prefix.as_str()) else {
            return Ok(Outcome::Declined);
        };
        // Relative links on `/<prefix>` would resolve against the parent.
        if ctx.relative_path() == self.prefix.as_str() {
            let mut location = format!("{}{}", ctx.context_path(), self.prefix.landing_path());
            if let Some(query) = ctx.uri().query() {
                location.push('?');
                location.push_str(query);
            }
            resp.redirect(&location)?;
            return Ok(Outcome::Claimed);
        }
        self.chain.handle(&scoped, resp).await
    }
}
