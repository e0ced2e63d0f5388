//! Per-request language resolution.
//!
//! The precedence chain is query parameter, then cookie, then
//! `Accept-Language`, then the configured default. Everything here is pure
//! and works on values already pulled out of the request, so the same
//! inputs always resolve to the same language.

use std::fmt;

use super::catalog::CatalogStore;
use super::locale::Locale;
use super::matcher::LanguageMatcher;
use super::options::Options;
use super::source::{CatalogSource, DirectorySource};
use crate::utils::{I18nError, I18nResult};

/// Which step of the chain selected the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Query,
    Cookie,
    AcceptLanguage,
    Default,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Query => "query",
            Self::Cookie => "cookie",
            Self::AcceptLanguage => "accept-language",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// Language hints carried by one request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preferences<'a> {
    /// Value of the configured query parameter.
    pub query: Option<&'a str>,
    /// Value of the configured cookie.
    pub cookie: Option<&'a str>,
    /// Raw `Accept-Language` header.
    pub accept_language: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub locale: Locale,
    /// Language picked by the chain. May name an unconfigured language when
    /// it came from the query or cookie; `locale` has then degraded to the
    /// default.
    pub selected: String,
    pub source: ResolutionSource,
    /// Value to persist in the language cookie, if any.
    pub persist: Option<String>,
}

/// Catalogs and matcher shared by every request.
///
/// Built once at startup and never mutated afterwards; share it behind an
/// `Arc`.
#[derive(Debug)]
pub struct I18n {
    options: Options,
    store: CatalogStore,
    matcher: LanguageMatcher,
}

impl I18n {
    /// Load catalogs from `options.directory`.
    pub fn new(options: Options) -> I18nResult<Self> {
        let options = options.normalize()?;
        let source = DirectorySource::new(&options.directory);
        Self::build(options, &source)
    }

    /// Load primary catalogs from `source` instead of `options.directory`.
    /// Override directories still come from the local filesystem.
    pub fn with_source(options: Options, source: impl CatalogSource) -> I18nResult<Self> {
        let options = options.normalize()?;
        Self::build(options, &source)
    }

    fn build(options: Options, source: &dyn CatalogSource) -> I18nResult<Self> {
        tracing::info!(
            "Loading {} locale(s) from {} with {} override director(ies)",
            options.languages.len(),
            source.describe(),
            options.append_directories.len()
        );

        let store = CatalogStore::load(&options, source)?;
        let matcher = LanguageMatcher::new(store.tags().to_vec())?;

        tracing::info!("Locales ready, default language is {}", options.default);
        Ok(Self { options, store, matcher })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Run the precedence chain for one request.
    pub fn resolve(&self, prefs: &Preferences<'_>) -> I18nResult<Resolution> {
        let (selected, source) = self.select(prefs);
        let persist = match source {
            ResolutionSource::Cookie => None,
            _ => Some(selected.clone()),
        };
        let locale = self.locale_for(&selected)?;

        tracing::debug!(
            "Resolved language {} from {} (locale {})",
            selected,
            source,
            locale.lang()
        );
        Ok(Resolution { locale, selected, source, persist })
    }

    fn select(&self, prefs: &Preferences<'_>) -> (String, ResolutionSource) {
        if let Some(lang) = prefs.query.filter(|v| !v.is_empty()) {
            return (lang.to_string(), ResolutionSource::Query);
        }

        if let Some(lang) = prefs.cookie.filter(|v| !v.is_empty()) {
            return (lang.to_string(), ResolutionSource::Cookie);
        }

        if let Some(header) = prefs.accept_language {
            let found = self.matcher.negotiate(header);
            if found.is_match() {
                let name = self.store.languages()[found.index].name.clone();
                return (name, ResolutionSource::AcceptLanguage);
            }
        }

        (self.options.default.clone(), ResolutionSource::Default)
    }

    /// Locale for `lang`, degrading to the default language when `lang` is
    /// not configured.
    pub fn locale_for(&self, lang: &str) -> I18nResult<Locale> {
        let fallback = self.store.default_catalog();
        match self.store.get(lang) {
            Ok(current) => Ok(Locale::new(current, fallback.clone())),
            Err(I18nError::LocaleNotFound { .. }) => {
                tracing::debug!(
                    "Requested language {:?} is not configured, using {}",
                    lang,
                    fallback.lang()
                );
                Ok(Locale::new(fallback.clone(), fallback.clone()))
            },
            Err(err) => Err(err),
        }
    }
}
