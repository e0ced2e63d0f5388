//! Request-bound translator.

use std::fmt::{Display, Write};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::catalog::Catalog;

/// `%%`, `%s`, `%v`, `%d`, `%q` with an optional explicit `[n]` position.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%(?:%|(?:\[(\d+)\])?([svdq]))").expect("valid placeholder regex"));

/// The translator handed to request handlers.
///
/// Looks keys up in the resolved language first and in the default language
/// second. Cloning is two reference-count bumps.
#[derive(Debug, Clone)]
pub struct Locale {
    current: Arc<Catalog>,
    fallback: Arc<Catalog>,
}

impl Locale {
    pub fn new(current: Arc<Catalog>, fallback: Arc<Catalog>) -> Self {
        Self { current, fallback }
    }

    /// BCP-47 name of the resolved language.
    pub fn lang(&self) -> &str {
        self.current.lang()
    }

    pub fn description(&self) -> &str {
        self.current.description()
    }

    pub fn fallback_lang(&self) -> &str {
        self.fallback.lang()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.current.contains_key(key) || self.fallback.contains_key(key)
    }

    /// Translate `key`, formatting `args` into the template.
    ///
    /// A key missing from both catalogs translates to the key itself.
    pub fn translate(&self, key: &str, args: &[&dyn Display]) -> String {
        let template = self.current.get(key).or_else(|| self.fallback.get(key));

        match template {
            Some(template) if args.is_empty() => template.to_string(),
            Some(template) => format_message(template, args),
            None => {
                tracing::debug!(
                    "Missing translation key '{}' in {} and fallback {}",
                    key,
                    self.lang(),
                    self.fallback_lang()
                );
                key.to_string()
            },
        }
    }

    /// Shorthand for [`Locale::translate`] without arguments.
    pub fn tr(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// Substitute printf-style placeholders with `args`.
///
/// Implicit placeholders consume arguments left to right; `%[n]s` picks the
/// n-th argument (1-based) and continues from there. `%q` quotes the value.
/// Placeholders without a matching argument render as `%!s(MISSING)`, and
/// surplus arguments are appended as `%!(EXTRA ...)`.
pub fn format_message(template: &str, args: &[&dyn Display]) -> String {
    let mut next = 0;
    let mut highest = 0;

    let mut out = PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let Some(verb) = caps.get(2) else {
                return "%".to_string();
            };
            let verb = verb.as_str();

            if let Some(position) = caps.get(1) {
                match position.as_str().parse::<usize>() {
                    Ok(n) if n >= 1 => next = n - 1,
                    _ => return format!("%!{}(BADINDEX)", verb),
                }
            }

            let index = next;
            next += 1;
            match args.get(index) {
                Some(arg) => {
                    highest = highest.max(next);
                    if verb == "q" { format!("{:?}", arg.to_string()) } else { arg.to_string() }
                },
                None => format!("%!{}(MISSING)", verb),
            }
        })
        .into_owned();

    if highest < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[highest..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", arg);
        }
        out.push(')');
    }
    out
}

/// Translate with a [`Locale`] and positional arguments.
///
/// ```rust,ignore
/// let text = tr!(locale, "welcome", user.name, count);
/// ```
#[macro_export]
macro_rules! tr {
    ($locale:expr, $key:expr) => {
        $locale.translate($key, &[])
    };
    ($locale:expr, $key:expr, $($arg:expr),+ $(,)?) => {
        $locale.translate($key, &[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}
