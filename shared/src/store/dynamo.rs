use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, Client as DynamoClient};

use super::{RecordStore, StoreError};
use crate::item::Item;

/// `RecordStore` backed by a DynamoDB table
#[derive(Clone, Debug)]
pub struct DynamoRecordStore {
    client: DynamoClient,
}

impl DynamoRecordStore {
    pub fn new(client: DynamoClient) -> Self {
        Self { client }
    }
}

fn unavailable(operation: &str, table_name: &str, err: impl std::error::Error) -> StoreError {
    let detail = DisplayErrorContext(err).to_string();
    tracing::error!("DynamoDB {} on {} failed: {}", operation, table_name, detail);
    StoreError::Unavailable(detail)
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn get(&self, table_name: &str, key: Item) -> Result<Option<Item>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| unavailable("get_item", table_name, e))?;

        Ok(result.item)
    }

    async fn scan(&self, table_name: &str) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;
        loop {
            let resp = self
                .client
                .scan()
                .table_name(table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| unavailable("scan", table_name, e))?;

            if let Some(page) = resp.items {
                items.extend(page);
            }

            match resp.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!("Scanned {} items from {}", items.len(), table_name);
        Ok(items)
    }

    async fn put(&self, table_name: &str, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| unavailable("put_item", table_name, e))?;
        Ok(())
    }

    async fn delete(&self, table_name: &str, key: Item) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| unavailable("delete_item", table_name, e))?;
        Ok(())
    }
}
