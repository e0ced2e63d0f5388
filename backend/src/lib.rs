pub mod config;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod utils;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::i18n::I18n;
use crate::middleware::locale_middleware;

/// Demo routes with the locale middleware installed in front of them.
pub fn build_router(i18n: Arc<I18n>) -> Router {
    Router::new()
        .route("/", get(handlers::greeting))
        .route("/api/locale", get(handlers::current_locale))
        .route("/api/languages", get(handlers::list_languages))
        .route("/api/translate/:key", get(handlers::translate_key))
        .layer(axum::middleware::from_fn_with_state(Arc::clone(&i18n), locale_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(i18n)
}
