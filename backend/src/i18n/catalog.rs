//! Message catalogs and the store that holds one per configured language.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use ini::Ini;
use unic_langid::LanguageIdentifier;

use super::options::{Language, Options};
use super::source::{CatalogSource, is_file};
use crate::utils::{I18nError, I18nResult};

/// Translation keys of one language mapped to their message templates.
///
/// Keys inside an INI section are addressed as `section.key`.
#[derive(Debug, Clone)]
pub struct Catalog {
    lang: String,
    description: String,
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new(language: &Language) -> Self {
        Self {
            lang: language.name.clone(),
            description: language.description.clone(),
            messages: HashMap::new(),
        }
    }

    /// Configured language name, e.g. "en-US".
    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Parse an INI document and merge it over the current messages.
    pub fn merge_ini(&mut self, file: &str, data: &[u8]) -> I18nResult<()> {
        let text = std::str::from_utf8(data).map_err(|e| I18nError::catalog_parse(file, e))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let ini = Ini::load_from_str(text).map_err(|e| I18nError::catalog_parse(file, e))?;

        for (section, properties) in ini.iter() {
            for (key, value) in properties.iter() {
                let key = match section {
                    Some(section) if !section.is_empty() => format!("{}.{}", section, key),
                    _ => key.to_string(),
                };
                self.messages.insert(key, value.to_string());
            }
        }
        Ok(())
    }
}

/// All loaded catalogs, immutable once built.
#[derive(Debug)]
pub struct CatalogStore {
    catalogs: HashMap<String, Arc<Catalog>>,
    languages: Vec<Language>,
    tags: Vec<LanguageIdentifier>,
    default: Arc<Catalog>,
}

impl CatalogStore {
    /// Load a catalog for every configured language.
    ///
    /// `options` must already be normalized. Each catalog starts from
    /// `name_format(lang)` in `primary`, then every `append_directories`
    /// entry holding the same file name is merged over it, in order.
    pub fn load(options: &Options, primary: &dyn CatalogSource) -> I18nResult<Self> {
        let mut catalogs = HashMap::with_capacity(options.languages.len());
        let mut tags = Vec::with_capacity(options.languages.len());

        for lang in &options.languages {
            let tag: LanguageIdentifier = lang.name.parse().map_err(|source| {
                I18nError::MalformedTag { name: lang.name.clone(), source }
            })?;

            let file_name = options.file_name(&lang.name);
            let data = primary.open(&file_name).map_err(|source| I18nError::PrimaryUnreadable {
                file: file_name.clone(),
                origin: primary.describe(),
                source,
            })?;

            let overrides: Vec<PathBuf> = options
                .append_directories
                .iter()
                .map(|dir| dir.join(&file_name))
                .filter(|path| {
                    let found = is_file(path);
                    if !found {
                        tracing::debug!("No override {} for {}", path.display(), lang.name);
                    }
                    found
                })
                .collect();

            let mut catalog = Catalog::new(lang);
            catalog.merge_ini(&file_name, &data)?;
            for path in &overrides {
                let data = std::fs::read(path).map_err(|source| I18nError::OverrideUnreadable {
                    path: path.clone(),
                    source,
                })?;
                catalog.merge_ini(&path.display().to_string(), &data)?;
            }

            tracing::info!(
                "Loaded locale {} ({}) with {} messages from {} source(s)",
                lang.name,
                lang.description,
                catalog.len(),
                1 + overrides.len()
            );

            tags.push(tag);
            catalogs.insert(lang.name.clone(), Arc::new(catalog));
        }

        let default = catalogs
            .get(&options.default)
            .cloned()
            .ok_or_else(|| I18nError::DefaultNotFound { name: options.default.clone() })?;

        Ok(Self { catalogs, languages: options.languages.clone(), tags, default })
    }

    /// Catalog registered under `name`.
    pub fn get(&self, name: &str) -> I18nResult<Arc<Catalog>> {
        self.catalogs.get(name).cloned().ok_or_else(|| I18nError::locale_not_found(name))
    }

    pub fn default_catalog(&self) -> &Arc<Catalog> {
        &self.default
    }

    /// Configured languages in priority order.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Parsed tags, index-aligned with [`CatalogStore::languages`].
    pub fn tags(&self) -> &[LanguageIdentifier] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
