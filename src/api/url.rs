//! Request URL resolution against the configured base URL.

use serde::Serialize;

use crate::api::error::{ApiError, ApiResult};

/// Resolve `path` against `base_url`.
///
/// - an empty path resolves to the base URL itself
/// - absolute URLs (`scheme://...`) are returned unchanged
/// - protocol-relative URLs (`//host/...`) take the base URL's scheme
/// - anything else is joined with exactly one `/` between base and path
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.is_empty() {
        return base_url.to_string();
    }
    if path.starts_with("//") {
        return match base_url.split_once("://") {
            Some((scheme, _)) => format!("{}:{}", scheme, path),
            None => path.to_string(),
        };
    }
    if is_absolute_url(path) {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Whether `url` carries its own scheme (or is protocol-relative).
pub fn is_absolute_url(url: &str) -> bool {
    let rest = match url.find("//") {
        Some(idx) => &url[..idx],
        None => return false,
    };
    if rest.is_empty() {
        return true;
    }
    let Some(scheme) = rest.strip_suffix(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

/// Append URL-encoded query parameters to `url`, ahead of any `#fragment`.
pub fn with_query<Q: Serialize + ?Sized>(url: &str, query: &Q) -> ApiResult<String> {
    let encoded = serde_urlencoded::to_string(query)
        .map_err(|e| ApiError::InvalidParameter(format!("Invalid query parameters: {}", e)))?;
    if encoded.is_empty() {
        return Ok(url.to_string());
    }
    let (target, fragment) = match url.split_once('#') {
        Some((target, fragment)) => (target, Some(fragment)),
        None => (url, None),
    };
    let separator = if target.contains('?') { '&' } else { '?' };
    let mut resolved = format!("{}{}{}", target, separator, encoded);
    if let Some(fragment) = fragment {
        resolved.push('#');
        resolved.push_str(fragment);
    }
    Ok(resolved)
}
