pub mod cookie;
pub mod locale;

pub use locale::locale_middleware;
