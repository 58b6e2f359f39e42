//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use jewelbench_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// `Content-Disposition` is always exposed so browser clients can read the
/// suggested name of an export download.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.allowed_origins))
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .allow_headers(allow_headers(&config.allowed_headers))
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v.trim() == "*")
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if is_wildcard(origins) {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(origins))
    }
}

fn allow_headers(headers: &[String]) -> AllowHeaders {
    if is_wildcard(headers) {
        AllowHeaders::from(Any)
    } else {
        AllowHeaders::list(parse_all::<HeaderName>(headers))
    }
}

/// Parse every entry, skipping (and logging) the ones that are invalid.
fn parse_all<T: std::str::FromStr>(values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| match v.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!(value = %v, "Ignoring invalid CORS configuration entry");
                None
            }
        })
        .collect()
}
