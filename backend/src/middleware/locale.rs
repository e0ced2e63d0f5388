//! Locale resolution middleware
//!
//! Resolves the request language (query parameter, cookie, Accept-Language,
//! default), stores the resulting `Locale` in the request extensions and
//! persists the choice in a cookie when it did not already come from one.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        HeaderValue,
        header::{ACCEPT_LANGUAGE, SET_COOKIE},
        request::Parts,
    },
    middleware::Next,
    response::Response,
};

use super::cookie::{cookie_value, query_value, set_cookie_value};
use crate::i18n::{I18n, Locale, Preferences};
use crate::utils::I18nError;

/// Middleware to resolve and inject the request `Locale`
///
/// Install with `axum::middleware::from_fn_with_state(i18n, locale_middleware)`.
pub async fn locale_middleware(
    State(i18n): State<Arc<I18n>>,
    mut req: Request,
    next: Next,
) -> Result<Response, I18nError> {
    let options = i18n.options();

    let query = query_value(req.uri(), &options.query_parameter);
    let resolution = i18n.resolve(&Preferences {
        query: query.as_deref(),
        cookie: cookie_value(req.headers(), &options.cookie.name),
        accept_language: req.headers().get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
    })?;

    let set_cookie = resolution.persist.as_deref().and_then(|lang| {
        let value = set_cookie_value(&options.cookie, lang);
        HeaderValue::from_str(&value)
            .map_err(|e| tracing::warn!("Cannot persist language cookie {:?}: {}", value, e))
            .ok()
    });

    req.extensions_mut().insert(resolution.locale);

    let mut response = next.run(req).await;
    if let Some(value) = set_cookie {
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(response)
}

/// Handlers take `Locale` as an argument once the middleware is installed.
#[async_trait]
impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = I18nError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Locale>().cloned().ok_or(I18nError::MissingLocale)
    }
}
