pub mod error;

pub use error::{ErrorResponse, I18nError, I18nResult};
