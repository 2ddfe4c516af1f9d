use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod memory;
pub mod models;

pub use models::{ClickEvent, CreatorIdentity, ShortLink};

/// Registry of short links.
///
/// The registry owns its concurrency guard; callers never coordinate
/// externally. `insert` is atomic with respect to the existence check, so
/// two concurrent inserts for the same code cannot both succeed.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Inserts a new record. Fails with `CodeTaken` when an entry exists for
    /// the code, expired or not.
    async fn insert(&self, link: ShortLink) -> Result<()>;

    /// Snapshot of a single record, or `NotFound`.
    async fn get(&self, code: &str) -> Result<ShortLink>;

    /// Snapshot of all records. Re-callable; each call reflects the state at
    /// that moment.
    async fn load_all(&self) -> Vec<ShortLink>;

    /// Appends a click event to an existing record, or fails with `NotFound`.
    async fn record_click(&self, code: &str, event: ClickEvent) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create() -> Arc<dyn Storage> {
        Arc::new(memory::MemoryStorage::new())
    }
}
