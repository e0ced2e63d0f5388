// Common test utilities and helpers

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::SET_COOKIE},
    routing::get,
};
use http_body_util::BodyExt;
use rust_embed::RustEmbed;
use tower::ServiceExt;

use crate::i18n::{I18n, Language, Locale, Options};
use crate::middleware::locale_middleware;

pub const PRIMARY_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/primary");
pub const SECONDARY_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/secondary");
pub const BROKEN_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/broken");

/// Same files as `PRIMARY_DIR`, compiled in
#[derive(RustEmbed)]
#[folder = "testdata/primary/"]
pub struct PrimaryLocales;

pub fn english_and_chinese() -> Vec<Language> {
    vec![Language::new("en-US", "English"), Language::new("zh-CN", "简体中文")]
}

/// Primary + secondary directories with en-US and zh-CN
pub fn test_options() -> Options {
    Options {
        directory: PRIMARY_DIR.into(),
        append_directories: vec![SECONDARY_DIR.into()],
        languages: english_and_chinese(),
        ..Options::default()
    }
}

pub fn test_i18n(options: Options) -> Arc<I18n> {
    Arc::new(I18n::new(options).expect("Failed to init locales"))
}

/// Router answering `GET /` with `"<lang> <description>"` and
/// `GET /greeting` with the translated greeting
pub fn describe_app(i18n: Arc<I18n>) -> Router {
    Router::new()
        .route("/", get(|l: Locale| async move { format!("{} {}", l.lang(), l.description()) }))
        .route("/greeting", get(|l: Locale| async move { l.tr("greeting") }))
        .layer(axum::middleware::from_fn_with_state(i18n, locale_middleware))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Vec<String>,
    pub body: String,
}

/// Build a GET request with optional Cookie and Accept-Language headers
pub fn get_request(uri: &str, cookie: Option<&str>, accept_language: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    if let Some(accept_language) = accept_language {
        builder = builder.header("Accept-Language", accept_language);
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("Router is infallible");
    let status = response.status();
    let set_cookie = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().expect("Set-Cookie is ASCII").to_string())
        .collect();
    let bytes = response.into_body().collect().await.expect("Failed to read body").to_bytes();
    let body = String::from_utf8(bytes.to_vec()).expect("Body is UTF-8");

    TestResponse { status, set_cookie, body }
}
