use axum::http::{header, HeaderMap};

/// Resolve the base URL the browser client should send API requests to.
///
/// A non-empty override always wins. Otherwise the client talks to the
/// origin it was loaded from.
pub fn resolve_api_base_url(override_url: Option<&str>, origin: &str) -> String {
    match override_url {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => origin.to_string(),
    }
}

/// Origin (scheme, host and port) of the page that issued the request.
///
/// Honors `X-Forwarded-Host` / `X-Forwarded-Proto` so the answer is right
/// behind a reverse proxy. Returns `fallback` when no host is known.
///
/// These headers are taken as sent, so a client can pick the origin echoed
/// back to itself. Deployments that must not allow that set `CLIENT_API_URL`,
/// which bypasses this function entirely.
pub fn request_origin(headers: &HeaderMap, fallback: &str) -> String {
    let host = header_str(headers, "x-forwarded-host")
        .or_else(|| header_str(headers, header::HOST.as_str()));

    match host {
        Some(host) => {
            let scheme = header_str(headers, "x-forwarded-proto").unwrap_or("http");
            format!("{}://{}", scheme, host)
        }
        None => fallback.to_string(),
    }
}

// Proxies may append several comma-separated values; the first is the client-facing one.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_override_wins_when_non_empty() {
        for origin in ["http://localhost:5002", "https://books.example", ""] {
            assert_eq!(
                resolve_api_base_url(Some("https://api.example"), origin),
                "https://api.example"
            );
        }
    }

    #[test]
    fn test_origin_used_when_override_unset() {
        assert_eq!(
            resolve_api_base_url(None, "http://localhost:5002"),
            "http://localhost:5002"
        );
    }

    #[test]
    fn test_origin_used_when_override_empty() {
        assert_eq!(
            resolve_api_base_url(Some(""), "https://books.example"),
            "https://books.example"
        );
    }

    #[test]
    fn test_request_origin_from_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:5002"));

        assert_eq!(request_origin(&headers, "http://0.0.0.0:5002"), "http://localhost:5002");
    }

    #[test]
    fn test_request_origin_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("127.0.0.1:5002"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("books.example, edge.internal"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));

        assert_eq!(request_origin(&headers, "http://0.0.0.0:5002"), "https://books.example");
    }

    #[test]
    fn test_request_origin_without_host() {
        let headers = HeaderMap::new();
        assert_eq!(request_origin(&headers, "http://0.0.0.0:5002"), "http://0.0.0.0:5002");
    }
}
