//! Reading the language hints off a request and writing the language
//! cookie back.

use axum::{
    extract::Query,
    http::{HeaderMap, Uri, header::COOKIE},
};

use crate::i18n::CookieOptions;

/// Value of cookie `name` across all `Cookie` headers, first one wins.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| {
            let value = value.trim();
            value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value)
        })
}

/// First value of query parameter `name`, percent-decoded.
///
/// A query string that does not parse counts as absent.
pub fn query_value(uri: &Uri, name: &str) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map_err(|e| tracing::debug!("Ignoring query string of {}: {}", uri, e))
        .ok()?;
    pairs.into_iter().find(|(key, _)| key == name).map(|(_, value)| value)
}

/// `Set-Cookie` value persisting `lang`.
///
/// Attributes follow the order Path, Domain, Max-Age, HttpOnly, Secure,
/// SameSite. Characters outside the RFC 6265 cookie-octet set are dropped
/// from the value.
pub fn set_cookie_value(options: &CookieOptions, lang: &str) -> String {
    let mut out = format!("{}={}", options.name, sanitize_cookie_value(lang));

    if !options.path.is_empty() {
        out.push_str("; Path=");
        out.push_str(&options.path);
    }
    if let Some(domain) = options.domain.as_deref().filter(|d| !d.is_empty()) {
        out.push_str("; Domain=");
        out.push_str(domain.trim_start_matches('.'));
    }
    if options.max_age > 0 {
        out.push_str(&format!("; Max-Age={}", options.max_age));
    }
    if options.http_only {
        out.push_str("; HttpOnly");
    }
    if options.secure {
        out.push_str("; Secure");
    }
    if let Some(same_site) = options.same_site.as_attribute() {
        out.push_str("; SameSite=");
        out.push_str(same_site);
    }
    out
}

fn sanitize_cookie_value(value: &str) -> String {
    value.chars().filter(|c| is_cookie_octet(*c)).collect()
}

fn is_cookie_octet(c: char) -> bool {
    matches!(c, '\x21' | '\x23'..='\x2b' | '\x2d'..='\x3a' | '\x3c'..='\x5b' | '\x5d'..='\x7e')
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::i18n::SameSite;

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("session=abc; lang=zh-CN"));
        assert_eq!(cookie_value(&headers, "lang"), Some("zh-CN"));
        assert_eq!(cookie_value(&headers, "session"), Some("abc"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_across_headers_and_quotes() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("lang=\"en-US\""));
        assert_eq!(cookie_value(&headers, "lang"), Some("en-US"));
    }

    fn query(uri: &str, name: &str) -> Option<String> {
        query_value(&uri.parse().unwrap(), name)
    }

    #[test]
    fn test_query_value() {
        assert_eq!(query("/?a=1&lang=zh-CN", "lang").as_deref(), Some("zh-CN"));
        assert_eq!(query("/?lang=en%2DUS&lang=fr", "lang").as_deref(), Some("en-US"));
        assert_eq!(query("/?lang", "lang").as_deref(), Some(""));
        assert_eq!(query("/?q=a+b", "q").as_deref(), Some("a b"));
        assert_eq!(query("/?language=fr", "lang"), None);
        assert_eq!(query("/", "lang"), None);
    }

    #[test]
    fn test_set_cookie_value_defaults() {
        let value = set_cookie_value(&CookieOptions::default(), "zh-CN");
        assert_eq!(value, "lang=zh-CN; Path=/; Max-Age=2147483647; HttpOnly; SameSite=Lax");
    }

    #[test]
    fn test_set_cookie_value_all_attributes() {
        let options = CookieOptions {
            name: "locale".to_string(),
            path: "/app".to_string(),
            domain: Some("example.com".to_string()),
            max_age: 3600,
            secure: true,
            http_only: false,
            same_site: SameSite::Strict,
        };
        assert_eq!(
            set_cookie_value(&options, "en-US"),
            "locale=en-US; Path=/app; Domain=example.com; Max-Age=3600; Secure; SameSite=Strict"
        );
    }

    #[test]
    fn test_set_cookie_value_default_same_site_and_sanitizing() {
        let options = CookieOptions { same_site: SameSite::Default, ..CookieOptions::default() };
        assert_eq!(
            set_cookie_value(&options, "en US;\"x\""),
            "lang=enUSx; Path=/; Max-Age=2147483647; HttpOnly"
        );
    }
}
