//! Client address extraction for rate-limit keys
//!
//! Forwarding headers are only honoured when a trusted proxy count is configured; otherwise
//! any client could pick its own key by sending `X-Forwarded-For`.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const UNKNOWN: &str = "unknown";

/// Resolve the client IP for a request.
///
/// With `trusted_proxy_count == 0` the socket peer address is used. With N trusted proxies,
/// the address N hops from the end of `X-Forwarded-For` is used, then `X-Real-IP`, then
/// the socket address. Returns `"unknown"` when nothing usable is found.
pub fn extract_client_ip(
    headers: &HeaderMap,
    socket_addr: Option<&SocketAddr>,
    trusted_proxy_count: usize,
) -> String {
    if trusted_proxy_count > 0 {
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| extract_from_forwarded_for(value, trusted_proxy_count))
        {
            return ip;
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| is_valid_ip(value))
        {
            return ip.to_string();
        }
    }

    socket_addr
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// `X-Forwarded-For` is `client, proxy1, proxy2, ...`; the last `trusted_proxy_count`
/// entries were appended by our own proxies.
fn extract_from_forwarded_for(header_value: &str, trusted_proxy_count: usize) -> Option<String> {
    let ips: Vec<&str> = header_value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    // Shorter chain than expected: the first hop is the best guess
    let client_ip = if ips.len() <= trusted_proxy_count {
        ips.first()?
    } else {
        ips.get(ips.len() - trusted_proxy_count - 1)?
    };

    is_valid_ip(client_ip).then(|| client_ip.to_string())
}

fn is_valid_ip(ip_str: &str) -> bool {
    ip_str.parse::<IpAddr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn socket() -> SocketAddr {
        SocketAddr::from(([203, 0, 113, 7], 51000))
    }

    #[test]
    fn test_forwarded_for_ignored_without_trusted_proxies() {
        let headers = headers_with("x-forwarded-for", "192.168.1.1");
        assert_eq!(extract_client_ip(&headers, Some(&socket()), 0), "203.0.113.7");
    }

    #[test]
    fn test_forwarded_for_with_one_proxy() {
        let headers = headers_with("x-forwarded-for", "192.168.1.1, 10.0.0.1");
        assert_eq!(extract_client_ip(&headers, Some(&socket()), 1), "192.168.1.1");
    }

    #[test]
    fn test_forwarded_for_multiple_proxies() {
        assert_eq!(
            extract_from_forwarded_for("198.51.100.2, 192.168.1.1, 10.0.0.1, 10.0.0.2", 2),
            Some("192.168.1.1".to_string())
        );
    }

    #[test]
    fn test_forwarded_for_short_chain() {
        assert_eq!(
            extract_from_forwarded_for("192.168.1.1", 2),
            Some("192.168.1.1".to_string())
        );
    }

    #[test]
    fn test_forwarded_for_invalid_ip_falls_back() {
        let headers = headers_with("x-forwarded-for", "not.an.ip.address, 10.0.0.1");
        assert_eq!(extract_client_ip(&headers, Some(&socket()), 1), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_header() {
        let headers = headers_with("x-real-ip", " 2001:db8::1 ");
        assert_eq!(extract_client_ip(&headers, None, 1), "2001:db8::1");
    }

    #[test]
    fn test_fallback_to_unknown() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), None, 0), "unknown");
    }

    #[test]
    fn test_is_valid_ip() {
        assert!(is_valid_ip("192.168.1.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("not.an.ip"));
        assert!(!is_valid_ip(""));
        assert!(!is_valid_ip("999.999.999.999"));
    }
}
