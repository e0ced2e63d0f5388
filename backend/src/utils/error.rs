use std::io;
use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while building the locale store or resolving a request
///
/// Everything except `LocaleNotFound` and `MissingLocale` is a startup
/// error: the server must not begin serving when one of them is returned.
#[derive(Error, Debug)]
pub enum I18nError {
    // Configuration errors 1xxx
    #[error("no language is specified")]
    NoLanguage,

    #[error("language `{name}` is configured more than once")]
    DuplicateLanguage { name: String },

    #[error("malformed language tag {name:?}: {source}")]
    MalformedTag {
        name: String,
        #[source]
        source: unic_langid::LanguageIdentifierError,
    },

    #[error("name format {format:?} must contain exactly one %s")]
    InvalidNameFormat { format: String },

    // Catalog loading errors 2xxx
    #[error("open {file} from {origin}: {source}")]
    PrimaryUnreadable {
        file: String,
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("read override {}: {source}", path.display())]
    OverrideUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse catalog {file}: {message}")]
    CatalogParse { file: String, message: String },

    #[error("default language `{name}` is not loaded")]
    DefaultNotFound { name: String },

    // Per-request errors 3xxx
    #[error("locale `{name}` not found")]
    LocaleNotFound { name: String },

    #[error("locale is not available, is the locale middleware installed?")]
    MissingLocale,
}

impl I18nError {
    /// Helper to create a catalog parse error
    pub fn catalog_parse(file: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::CatalogParse { file: file.into(), message: err.to_string() }
    }

    /// Helper to create a locale not found error
    pub fn locale_not_found(name: impl Into<String>) -> Self {
        Self::LocaleNotFound { name: name.into() }
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::NoLanguage => 1001,
            Self::DuplicateLanguage { .. } => 1002,
            Self::MalformedTag { .. } => 1003,
            Self::InvalidNameFormat { .. } => 1004,

            Self::PrimaryUnreadable { .. } => 2001,
            Self::OverrideUnreadable { .. } => 2002,
            Self::CatalogParse { .. } => 2003,
            Self::DefaultNotFound { .. } => 2004,

            Self::LocaleNotFound { .. } => 3001,
            Self::MissingLocale => 3002,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub message: String,
}

impl IntoResponse for I18nError {
    fn into_response(self) -> Response {
        tracing::error!("Locale resolution failed: {}", self);

        let response = ErrorResponse { code: self.error_code(), message: self.to_string() };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
    }
}

pub type I18nResult<T> = Result<T, I18nError>;
