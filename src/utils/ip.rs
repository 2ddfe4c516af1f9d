//! Client address extraction
//!
//! Click events and audit entries record the caller address. Behind a
//! reverse proxy the connection peer is the proxy, so forwarded headers are
//! consulted first.

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// Best-effort caller address: X-Forwarded-For (first hop), then X-Real-IP,
/// then the connection peer. Falls back to `"unknown"`.
pub fn client_address(req: &HttpRequest) -> String {
    forwarded_address(req.headers())
        .or_else(|| req.connection_info().peer_addr().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_address(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(client_address(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_used_when_no_forwarded_for() {
        let req = TestRequest::default()
            .insert_header(("x-real-ip", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_address(&req), "198.51.100.2");
    }

    #[test]
    fn test_falls_back_to_peer_addr() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.1:44312".parse().unwrap())
            .to_http_request();
        assert_eq!(client_address(&req), "192.0.2.1");
    }

    #[test]
    fn test_unknown_when_nothing_available() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(client_address(&req), "unknown");
    }
}
