//! Response headers for event stream responses
//!
//! `Content-Type` is always forced to `text/event-stream`. `Cache-Control`
//! is only filled in when the handler has not chosen one.

use axum::Router;
use http::{header, HeaderMap, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::SseConfig;
use crate::encoder::{CONTENT_TYPE, NO_CACHE};
use crate::error::{Error, Result};

/// Set event stream headers with the default `no-cache` policy.
pub fn prepare_headers(headers: &mut HeaderMap) {
    set_headers(headers, HeaderValue::from_static(NO_CACHE));
}

/// Set event stream headers using the configured `Cache-Control` value.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] if the configured value is not a valid
/// header value. Headers are left untouched in that case.
pub fn prepare_headers_with(headers: &mut HeaderMap, config: &SseConfig) -> Result<()> {
    let cache_control = cache_control_value(config)?;
    set_headers(headers, cache_control);
    Ok(())
}

/// Apply event stream headers to every response of the router.
///
/// Content type uses overriding mode; cache control is only set if not
/// present. An invalid configured cache-control value falls back to
/// `no-cache`.
pub fn apply_event_stream_headers(app: Router, config: &SseConfig) -> Router {
    let cache_control = cache_control_value(config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to Cache-Control: {}", NO_CACHE);
        HeaderValue::from_static(NO_CACHE)
    });

    app.layer(SetResponseHeaderLayer::overriding(
        header::CONTENT_TYPE,
        HeaderValue::from_static(CONTENT_TYPE),
    ))
    .layer(SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        cache_control,
    ))
}

pub(crate) fn cache_control_value(config: &SseConfig) -> Result<HeaderValue> {
    HeaderValue::from_str(&config.cache_control)
        .map_err(|_| Error::InvalidHeader(format!("cache_control = {:?}", config.cache_control)))
}

pub(crate) fn set_headers(headers: &mut HeaderMap, cache_control: HeaderValue) {
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    headers
        .entry(header::CACHE_CONTROL)
        .or_insert(cache_control);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get};
    use http::Request;
    use tower::ServiceExt;

    #[test]
    fn test_content_type_is_overwritten() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        prepare_headers(&mut headers);
        assert_eq!(headers[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
    }

    #[test]
    fn test_existing_cache_control_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("private"));
        prepare_headers(&mut headers);
        assert_eq!(headers[header::CACHE_CONTROL], "private");
        assert_eq!(headers.get_all(header::CACHE_CONTROL).iter().count(), 1);
    }

    #[test]
    fn test_configured_cache_control() {
        let config = SseConfig {
            cache_control: "no-store".to_string(),
            ..SseConfig::default()
        };
        let mut headers = HeaderMap::new();
        prepare_headers_with(&mut headers, &config).unwrap();
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    }

    #[test]
    fn test_invalid_cache_control_is_rejected() {
        let config = SseConfig {
            cache_control: "no\ncache".to_string(),
            ..SseConfig::default()
        };
        let mut headers = HeaderMap::new();
        let err = prepare_headers_with(&mut headers, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
        assert!(headers.is_empty());
    }

    #[tokio::test]
    async fn test_router_layer() {
        let app = Router::new()
            .route("/plain", get(|| async { "data:hi\n\n" }))
            .route(
                "/cached",
                get(|| async { ([(header::CACHE_CONTROL, "max-age=5")], "data:hi\n\n") }),
            );
        let app = apply_event_stream_headers(app, &SseConfig::default());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/plain").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");

        let response = app
            .oneshot(Request::builder().uri("/cached").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "max-age=5");
    }
}
