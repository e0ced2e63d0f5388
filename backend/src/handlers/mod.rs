pub mod locale;

pub use locale::{current_locale, greeting, list_languages, translate_key};
