//! Record store gateway: the four key-value primitives the user service needs.

use async_trait::async_trait;

use crate::item::Item;

mod dynamo;
#[cfg(any(test, feature = "test-support"))]
mod memory;

pub use dynamo::DynamoRecordStore;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryRecordStore;

/// Raised when the backing store cannot complete a call (timeout, throttling,
/// connectivity). Never retried here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup. An absent key is `Ok(None)`, not an error.
    async fn get(&self, table_name: &str, key: Item) -> Result<Option<Item>, StoreError>;

    /// Every record in the table, all pages exhausted, in no particular order.
    async fn scan(&self, table_name: &str) -> Result<Vec<Item>, StoreError>;

    /// Unconditional upsert.
    async fn put(&self, table_name: &str, item: Item) -> Result<(), StoreError>;

    /// Remove by key. Deleting an absent key succeeds.
    async fn delete(&self, table_name: &str, key: Item) -> Result<(), StoreError>;
}
