//! Remote document store holding the `products` and `orders` collections.
//!
//! Reads are continuous subscriptions: each yields the full collection on
//! every change, in the store's fixed order (products ascending by id,
//! orders descending by id). Consumers replace their copy on every item.
//! Writes are plain awaited calls with no retry.

use std::pin::Pin;

use async_trait::async_trait;
use thiserror::Error;
use tokio_stream::Stream;
use uuid::Uuid;

use crate::models::{NewOrder, Order, OrderStatus, Product, ProductData};

pub mod memory;
pub mod sea;

pub use memory::MemoryStore;
pub use sea::SeaStore;

/// Infinite stream of full-collection snapshots. Dropping it ends the
/// subscription; a new one must be requested to resume.
pub type SnapshotStream<T> = Pin<Box<dyn Stream<Item = Vec<T>> + Send>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} does not exist")]
    Missing(Uuid),

    #[error("{op} failed: {source}")]
    Backend {
        op: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    pub fn backend(
        op: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StoreError::Backend {
            op,
            source: source.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Every method fails with a [`StoreError`] on any underlying failure.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    fn subscribe_products(&self) -> SnapshotStream<Product>;
    fn subscribe_orders(&self) -> SnapshotStream<Order>;

    async fn create_product(&self, id: i64, data: ProductData) -> StoreResult<Product>;
    async fn update_product(&self, doc_id: Uuid, data: ProductData) -> StoreResult<Product>;
    async fn update_stock(&self, doc_id: Uuid, stock: i32) -> StoreResult<()>;
    async fn set_visibility(&self, doc_id: Uuid, visible: bool) -> StoreResult<()>;
    async fn delete_product(&self, doc_id: Uuid) -> StoreResult<()>;

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order>;
    async fn update_order_status(&self, doc_id: Uuid, status: OrderStatus) -> StoreResult<()>;
    async fn delete_order(&self, doc_id: Uuid) -> StoreResult<()>;
}
