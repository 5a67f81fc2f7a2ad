//! State

use std::sync::Arc;

use halfdrinks_app::context::AppContext;

/// Shared request state, injected into every route.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
