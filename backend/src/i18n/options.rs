//! Option set for the locale middleware.
//!
//! `Options` deserializes from the `[i18n]` table of the config file. Every
//! field has a default, so an empty table is valid input to serde; the
//! required-field and consistency checks happen in [`Options::normalize`],
//! which runs once before the catalog store is built.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::{I18nError, I18nResult};

pub const DEFAULT_DIRECTORY: &str = "locales";
pub const DEFAULT_NAME_FORMAT: &str = "locale_%s.ini";
pub const DEFAULT_QUERY_PARAMETER: &str = "lang";
pub const DEFAULT_COOKIE_NAME: &str = "lang";
pub const DEFAULT_COOKIE_PATH: &str = "/";
/// Largest signed 32-bit value, i.e. a cookie that effectively never expires.
pub const DEFAULT_COOKIE_MAX_AGE: i64 = i32::MAX as i64;

/// A configured language: BCP-47 name plus a human readable label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Language {
    /// BCP-47 name, e.g. "en-US"
    pub name: String,
    /// Descriptive name, e.g. "English"
    #[serde(default)]
    pub description: String,
}

impl Language {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}

/// The SameSite attribute of the language cookie.
///
/// `Default` leaves the attribute off and lets the browser decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SameSite {
    Default,
    #[default]
    Lax,
    Strict,
    None,
}

impl SameSite {
    /// Parse a SameSite value, resetting anything unrecognized to `Lax`.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Self::Default,
            "lax" => Self::Lax,
            "strict" => Self::Strict,
            "none" => Self::None,
            _ => {
                tracing::warn!("Invalid cookie same_site value '{}', using Lax", value);
                Self::Lax
            },
        }
    }

    /// Attribute value as written in `Set-Cookie`, `None` when omitted.
    pub fn as_attribute(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Lax => Some("Lax"),
            Self::Strict => Some("Strict"),
            Self::None => Some("None"),
        }
    }
}

impl<'de> Deserialize<'de> for SameSite {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&raw))
    }
}

/// Attributes of the cookie that persists the resolved language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieOptions {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
    /// Max-Age in seconds; non-positive values reset to the default.
    pub max_age: i64,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            path: DEFAULT_COOKIE_PATH.to_string(),
            domain: None,
            max_age: DEFAULT_COOKIE_MAX_AGE,
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
        }
    }
}

/// Options for the locale middleware.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    /// Primary directory of catalog files. Ignored when the middleware is
    /// built with an explicit `CatalogSource`.
    pub directory: PathBuf,
    /// Directories whose catalog files override the primary ones, applied in
    /// order. Missing files are skipped.
    pub append_directories: Vec<PathBuf>,
    /// Languages to load, in priority order.
    pub languages: Vec<Language>,
    /// Language used for missing translations. Empty means the first entry
    /// of `languages`.
    pub default: String,
    /// Catalog file name with one `%s` for the language name.
    pub name_format: String,
    /// URL query parameter that overrides the language.
    pub query_parameter: String,
    pub cookie: CookieOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            append_directories: Vec::new(),
            languages: Vec::new(),
            default: String::new(),
            name_format: DEFAULT_NAME_FORMAT.to_string(),
            query_parameter: DEFAULT_QUERY_PARAMETER.to_string(),
            cookie: CookieOptions::default(),
        }
    }
}

impl Options {
    /// Fill unset values with their defaults and validate the result.
    pub fn normalize(mut self) -> I18nResult<Self> {
        if self.directory.as_os_str().is_empty() {
            self.directory = PathBuf::from(DEFAULT_DIRECTORY);
        }

        if self.languages.is_empty() {
            return Err(I18nError::NoLanguage);
        }

        let mut seen = HashSet::with_capacity(self.languages.len());
        for lang in &self.languages {
            if !seen.insert(lang.name.as_str()) {
                return Err(I18nError::DuplicateLanguage { name: lang.name.clone() });
            }
        }

        if self.default.is_empty() {
            self.default = self.languages[0].name.clone();
        }

        if self.name_format.is_empty() {
            self.name_format = DEFAULT_NAME_FORMAT.to_string();
        }
        if self.name_format.matches("%s").count() != 1 {
            return Err(I18nError::InvalidNameFormat { format: self.name_format });
        }

        if self.query_parameter.is_empty() {
            self.query_parameter = DEFAULT_QUERY_PARAMETER.to_string();
        }

        let cookie = &mut self.cookie;
        if cookie.name.is_empty() {
            cookie.name = DEFAULT_COOKIE_NAME.to_string();
        }
        if cookie.path.is_empty() {
            cookie.path = DEFAULT_COOKIE_PATH.to_string();
        }
        if cookie.domain.as_deref().is_some_and(str::is_empty) {
            cookie.domain = None;
        }
        if cookie.max_age <= 0 {
            cookie.max_age = DEFAULT_COOKIE_MAX_AGE;
        }

        Ok(self)
    }

    /// Catalog file name for the given language name.
    pub fn file_name(&self, lang: &str) -> String {
        self.name_format.replacen("%s", lang, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_languages() -> Vec<Language> {
        vec![Language::new("en-US", "English"), Language::new("zh-CN", "简体中文")]
    }

    #[test]
    fn test_normalize_requires_languages() {
        let err = Options::default().normalize().unwrap_err();
        assert!(matches!(err, I18nError::NoLanguage));
        assert_eq!(err.to_string(), "no language is specified");
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let options = Options {
            directory: PathBuf::new(),
            languages: two_languages(),
            name_format: String::new(),
            query_parameter: String::new(),
            cookie: CookieOptions {
                name: String::new(),
                path: String::new(),
                domain: Some(String::new()),
                max_age: 0,
                ..CookieOptions::default()
            },
            ..Options::default()
        }
        .normalize()
        .unwrap();

        assert_eq!(options.directory, PathBuf::from("locales"));
        assert_eq!(options.default, "en-US");
        assert_eq!(options.name_format, "locale_%s.ini");
        assert_eq!(options.query_parameter, "lang");
        assert_eq!(options.cookie.name, "lang");
        assert_eq!(options.cookie.path, "/");
        assert_eq!(options.cookie.domain, None);
        assert_eq!(options.cookie.max_age, 2147483647);
        assert!(options.cookie.http_only);
        assert!(!options.cookie.secure);
        assert_eq!(options.cookie.same_site, SameSite::Lax);
    }

    #[test]
    fn test_normalize_keeps_explicit_default() {
        let options = Options {
            languages: two_languages(),
            default: "zh-CN".to_string(),
            ..Options::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(options.default, "zh-CN");
    }

    #[test]
    fn test_normalize_rejects_duplicate_language() {
        let options = Options {
            languages: vec![Language::new("en-US", "English"), Language::new("en-US", "Again")],
            ..Options::default()
        };
        let err = options.normalize().unwrap_err();
        assert!(matches!(err, I18nError::DuplicateLanguage { ref name } if name == "en-US"));
    }

    #[test]
    fn test_normalize_rejects_name_format_without_slot() {
        let options = Options {
            languages: two_languages(),
            name_format: "locale.ini".to_string(),
            ..Options::default()
        };
        assert!(matches!(options.normalize(), Err(I18nError::InvalidNameFormat { .. })));
    }

    #[test]
    fn test_file_name() {
        let options = Options { languages: two_languages(), ..Options::default() };
        assert_eq!(options.file_name("zh-CN"), "locale_zh-CN.ini");
    }

    #[test]
    fn test_same_site_parse_lossy() {
        assert_eq!(SameSite::parse_lossy("Strict"), SameSite::Strict);
        assert_eq!(SameSite::parse_lossy("none"), SameSite::None);
        assert_eq!(SameSite::parse_lossy("DEFAULT"), SameSite::Default);
        assert_eq!(SameSite::parse_lossy("sideways"), SameSite::Lax);
        assert_eq!(SameSite::Default.as_attribute(), None);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let options: Options = toml::from_str(
            r#"
            directory = "conf/locales"
            append_directories = ["custom/locales"]
            name_format = "%s.ini"

            [[languages]]
            name = "en-US"
            description = "English"

            [[languages]]
            name = "zh-CN"

            [cookie]
            same_site = "bogus"
            secure = true
            "#,
        )
        .unwrap();

        assert_eq!(options.directory, PathBuf::from("conf/locales"));
        assert_eq!(options.append_directories, vec![PathBuf::from("custom/locales")]);
        assert_eq!(options.languages[1], Language::new("zh-CN", ""));
        assert_eq!(options.query_parameter, "lang");
        assert_eq!(options.cookie.same_site, SameSite::Lax);
        assert!(options.cookie.secure);
        assert!(options.cookie.http_only);
    }
}
