//! Shortener service tests
//!
//! Service-level properties that sit above the storage backend: the validity
//! window arithmetic, code reservation across expiry, and click accounting.

use std::sync::Arc;

use chrono::{Duration, Utc};

use linklet::errors::LinkletError;
use linklet::services::ShortenerService;
use linklet::services::shortener::{
    CreateLinkRequest, MAX_VALIDITY_MINUTES, MIN_VALIDITY_MINUTES,
};
use linklet::storages::{ClickEvent, StorageFactory};

fn service() -> ShortenerService {
    ShortenerService::new(StorageFactory::create(), 30, 6)
}

fn request(url: &str, validity: Option<i64>, code: Option<&str>) -> CreateLinkRequest {
    CreateLinkRequest {
        target: url.to_string(),
        validity_minutes: validity,
        custom_code: code.map(String::from),
        created_by: None,
    }
}

fn click() -> ClickEvent {
    ClickEvent {
        timestamp: Utc::now(),
        source: "direct".to_string(),
        location: "127.0.0.1".to_string(),
        user_agent: "test".to_string(),
    }
}

#[tokio::test]
async fn test_one_minute_validity_window_boundaries() {
    let service = service();
    let result = service
        .create(request("https://example.com", Some(1), None))
        .await
        .unwrap();

    let link = result.link;
    assert_eq!((link.expires_at - link.created_at).num_seconds(), 60);

    // 59 seconds in, the link still resolves; 61 seconds in, it is expired.
    assert!(!link.is_expired_at(link.created_at + Duration::seconds(59)));
    assert!(link.is_expired_at(link.created_at + Duration::seconds(61)));
}

#[tokio::test]
async fn test_validity_bounds_are_inclusive() {
    let service = service();

    for validity in [MIN_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES] {
        let result = service
            .create(request("https://example.com", Some(validity), None))
            .await
            .unwrap();
        let window = result.link.expires_at - result.link.created_at;
        assert_eq!(window.num_minutes(), validity);
    }

    for validity in [MIN_VALIDITY_MINUTES - 1, MAX_VALIDITY_MINUTES + 1] {
        let err = service
            .create(request("https://example.com", Some(validity), None))
            .await
            .unwrap_err();
        assert!(matches!(err, LinkletError::InvalidValidity(_)));
    }
}

#[tokio::test]
async fn test_created_link_resolves_to_exact_url() {
    let service = service();

    for url in [
        "https://example.com",
        "http://example.com/path?q=1&other=2",
        "https://example.com/with#fragment",
    ] {
        let result = service.create(request(url, None, None)).await.unwrap();
        let target = service.resolve(&result.link.code, click()).await.unwrap();
        assert_eq!(target, url);
    }
}

#[tokio::test]
async fn test_click_count_matches_successful_redirects() {
    let service = service();
    service
        .create(request("https://example.com", None, Some("counted")))
        .await
        .unwrap();

    for _ in 0..5 {
        service.resolve("counted", click()).await.unwrap();
    }
    // Failed lookups against other codes do not touch this record.
    assert!(service.resolve("other", click()).await.is_err());

    let stats = service.stats("counted").await.unwrap();
    assert_eq!(stats.total_clicks, 5);
    assert_eq!(stats.link.clicks.len(), 5);
}

#[tokio::test]
async fn test_codes_never_reused_while_record_exists() {
    let service = service();
    service
        .create(request("https://example.com", Some(1), Some("keeper")))
        .await
        .unwrap();

    // Same code, different target: rejected no matter the expiry state.
    let err = service
        .create(request("https://example.org", None, Some("keeper")))
        .await
        .unwrap_err();
    assert!(matches!(err, LinkletError::CodeTaken(_)));
}

#[tokio::test]
async fn test_generated_codes_are_unique_across_creates() {
    let service = service();

    let mut codes = std::collections::HashSet::new();
    for _ in 0..50 {
        let result = service
            .create(request("https://example.com", None, None))
            .await
            .unwrap();
        assert!(codes.insert(result.link.code.clone()), "duplicate code");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mixed_operations_stay_consistent() {
    let service = Arc::new(service());
    service
        .create(request("https://example.com", None, Some("shared")))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..10 {
                service.resolve("shared", click()).await.unwrap();
            }
        }));
    }
    for _ in 0..4 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..10 {
                let _ = service.list_all().await;
                let _ = service.stats("shared").await.unwrap();
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let stats = service.stats("shared").await.unwrap();
    assert_eq!(stats.total_clicks, 40);
}
