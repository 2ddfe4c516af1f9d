//! In-memory registry backend
//!
//! Process-local `DashMap` keyed by short code. The entry API makes
//! check-then-insert a single critical section per shard, and click appends
//! run under the shard write guard, so records are never observed half
//! constructed.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::errors::{LinkletError, Result};
use crate::storages::{ClickEvent, ShortLink, Storage};

#[derive(Default)]
pub struct MemoryStorage {
    links: DashMap<String, ShortLink>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn insert(&self, link: ShortLink) -> Result<()> {
        match self.links.entry(link.code.clone()) {
            Entry::Occupied(_) => Err(LinkletError::code_taken(format!(
                "short code '{}' already exists",
                link.code
            ))),
            Entry::Vacant(slot) => {
                slot.insert(link);
                Ok(())
            }
        }
    }

    async fn get(&self, code: &str) -> Result<ShortLink> {
        self.links
            .get(code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LinkletError::not_found(format!("short code '{}' not found", code)))
    }

    async fn load_all(&self) -> Vec<ShortLink> {
        self.links
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    async fn record_click(&self, code: &str, event: ClickEvent) -> Result<()> {
        match self.links.get_mut(code) {
            Some(mut entry) => {
                entry.value_mut().clicks.push(event);
                Ok(())
            }
            None => Err(LinkletError::not_found(format!(
                "short code '{}' not found",
                code
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn sample_link(code: &str) -> ShortLink {
        let now = Utc::now();
        ShortLink {
            code: code.to_string(),
            target: "https://example.com".to_string(),
            created_at: now,
            expires_at: now + Duration::minutes(30),
            clicks: Vec::new(),
            created_by: None,
        }
    }

    fn sample_click() -> ClickEvent {
        ClickEvent {
            timestamp: Utc::now(),
            source: "direct".to_string(),
            location: "127.0.0.1".to_string(),
            user_agent: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let storage = MemoryStorage::new();
        storage.insert(sample_link("abc123")).await.unwrap();

        let link = storage.get("abc123").await.unwrap();
        assert_eq!(link.code, "abc123");
        assert_eq!(link.target, "https://example.com");
    }

    #[tokio::test]
    async fn test_get_unknown_code_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.get("missing").await.unwrap_err();
        assert!(matches!(err, LinkletError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_code_taken() {
        let storage = MemoryStorage::new();
        storage.insert(sample_link("dup")).await.unwrap();

        let err = storage.insert(sample_link("dup")).await.unwrap_err();
        assert!(matches!(err, LinkletError::CodeTaken(_)));
    }

    #[tokio::test]
    async fn test_expired_record_keeps_code_reserved() {
        let storage = MemoryStorage::new();
        let mut link = sample_link("stale");
        link.expires_at = Utc::now() - Duration::minutes(5);
        storage.insert(link).await.unwrap();

        // The record is expired, but the code is still taken.
        let err = storage.insert(sample_link("stale")).await.unwrap_err();
        assert!(matches!(err, LinkletError::CodeTaken(_)));

        // And lookups still find it (expiry classification is the caller's).
        assert!(storage.get("stale").await.unwrap().is_expired());
    }

    #[tokio::test]
    async fn test_record_click_appends_in_order() {
        let storage = MemoryStorage::new();
        storage.insert(sample_link("clicky")).await.unwrap();

        for i in 0..3 {
            let mut event = sample_click();
            event.source = format!("ref-{}", i);
            storage.record_click("clicky", event).await.unwrap();
        }

        let link = storage.get("clicky").await.unwrap();
        assert_eq!(link.clicks.len(), 3);
        let sources: Vec<&str> = link.clicks.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["ref-0", "ref-1", "ref-2"]);
    }

    #[tokio::test]
    async fn test_record_click_unknown_code_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage
            .record_click("missing", sample_click())
            .await
            .unwrap_err();
        assert!(matches!(err, LinkletError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_all_reflects_current_state() {
        let storage = MemoryStorage::new();
        assert!(storage.load_all().await.is_empty());

        storage.insert(sample_link("one")).await.unwrap();
        assert_eq!(storage.load_all().await.len(), 1);

        storage.insert(sample_link("two")).await.unwrap();
        let mut codes: Vec<String> = storage
            .load_all()
            .await
            .into_iter()
            .map(|l| l.code)
            .collect();
        codes.sort();
        assert_eq!(codes, vec!["one", "two"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_single_winner() {
        let storage = Arc::new(MemoryStorage::new());
        let barrier = Arc::new(tokio::sync::Barrier::new(8));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let storage = storage.clone();
            let barrier = barrier.clone();
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                storage.insert(sample_link("contested")).await
            }));
        }

        let mut won = 0;
        let mut taken = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => won += 1,
                Err(LinkletError::CodeTaken(_)) => taken += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!(won, 1);
        assert_eq!(taken, 7);
    }
}
