use std::fmt::Display;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use crate::i18n::{I18n, Language, Locale};

#[derive(Debug, Serialize)]
pub struct LocaleResponse {
    pub lang: String,
    pub description: String,
    pub fallback: String,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub default: String,
    pub languages: Vec<Language>,
}

/// Greeting in the resolved language
pub async fn greeting(locale: Locale) -> String {
    locale.tr("greeting")
}

/// Language picked for this request
pub async fn current_locale(locale: Locale) -> Json<LocaleResponse> {
    tracing::debug!("Current locale requested: {}", locale.lang());
    Json(LocaleResponse {
        lang: locale.lang().to_string(),
        description: locale.description().to_string(),
        fallback: locale.fallback_lang().to_string(),
    })
}

/// Configured languages, in priority order
pub async fn list_languages(State(i18n): State<Arc<I18n>>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        default: i18n.options().default.clone(),
        languages: i18n.store().languages().to_vec(),
    })
}

/// Translate any key; repeated `arg` query parameters become positional
/// arguments.
pub async fn translate_key(
    locale: Locale,
    Path(key): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> String {
    let args: Vec<String> =
        params.into_iter().filter(|(name, _)| name == "arg").map(|(_, value)| value).collect();
    let args: Vec<&dyn Display> = args.iter().map(|arg| arg as &dyn Display).collect();
    locale.translate(&key, &args)
}
