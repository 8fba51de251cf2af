//! Request routing assembly
//!
//! Builds the fixed handler tree the server dispatches every request through:
//!
//! ```text
//! [RequestLogger, RootRedirect, ContextRouter(/<context>)]
//!                                 └─ [CorsHeaders, api, IndexPage, StaticFiles(/web)]
//! ```

use super::{
    Chain, ContextRouter, CorsHeaders, Handler, IndexPage, RequestLogger, ResourceSet,
    RootRedirect, StaticFiles,
};
use crate::logger::Logger;
use crate::server::ServerSettings;
use std::sync::Arc;

/// Chain run for requests under the context path.
pub fn context_chain(settings: &ServerSettings, api: Arc<dyn Handler>) -> Chain {
    Chain::new()
        .with(CorsHeaders)
        .with_shared(api)
        .with(IndexPage)
        .with(StaticFiles::new(
            settings.web_prefix.clone(),
            settings.web_dir.clone(),
            ResourceSet::bundled(),
        ))
}

/// Top-level chain every request enters.
pub fn build_router(settings: &ServerSettings, api: Arc<dyn Handler>, logger: Logger) -> Chain {
    Chain::new()
        .with(RequestLogger::new(logger, settings.show_headers))
        .with(RootRedirect::new(&settings.context))
        .with(ContextRouter::new(
            settings.context.clone(),
            context_chain(settings, api),
        ))
}
