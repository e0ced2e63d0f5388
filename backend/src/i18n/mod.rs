//! Locale store, language negotiation and request-bound translators.
//!
//! - `options`: configuration surface, normalized once at startup
//! - `source`: where primary catalog files are read from
//! - `catalog`: INI catalogs merged from primary and override sources
//! - `matcher`: `Accept-Language` negotiation over BCP-47 tags
//! - `locale`: the translator handed to handlers
//! - `resolver`: the per-request precedence chain
//!
//! # Example
//!
//! ```rust,ignore
//! use request_locale::i18n::{I18n, Language, Options, Preferences};
//!
//! let i18n = I18n::new(Options {
//!     languages: vec![Language::new("en-US", "English"), Language::new("zh-CN", "简体中文")],
//!     ..Options::default()
//! })?;
//!
//! let resolved = i18n.resolve(&Preferences { accept_language: Some("zh"), ..Default::default() })?;
//! assert_eq!(resolved.locale.lang(), "zh-CN");
//! ```

mod catalog;
mod locale;
mod matcher;
mod options;
mod resolver;
mod source;

pub use catalog::{Catalog, CatalogStore};
pub use locale::{Locale, format_message};
pub use matcher::{Confidence, LanguageMatcher, Match, parse_accept_language};
pub use options::{CookieOptions, DEFAULT_COOKIE_MAX_AGE, Language, Options, SameSite};
pub use resolver::{I18n, Preferences, Resolution, ResolutionSource};
pub use source::{CatalogSource, DirectorySource, EmbeddedSource};
