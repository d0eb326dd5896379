#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use goodwin_storefront::{
    config::AppConfig,
    dto::auth::LoginRequest,
    middleware::auth::{AdminSession, ensure_admin},
    models::{NewOrder, Order, OrderStatus, Product, ProductData},
    services::auth_service,
    state::AppState,
    storage::{LocalStorage, MemoryStorage, StorageError},
    store::{DocumentStore, MemoryStore, SnapshotStream, StoreError, StoreResult},
};
use uuid::Uuid;

pub fn rice(id: i64, name: &str, product_type: &str, price: i64, stock: i32) -> Product {
    Product {
        id,
        doc_id: Uuid::new_v4(),
        name: name.to_string(),
        product_type: product_type.to_string(),
        price,
        stock,
        visible: true,
        image: None,
    }
}

pub struct Harness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub local: Arc<MemoryStorage>,
}

pub async fn harness(products: Vec<Product>) -> anyhow::Result<Harness> {
    let store = Arc::new(MemoryStore::with_products(products));
    let local = Arc::new(MemoryStorage::new());
    let state = AppState::new(AppConfig::default(), store.clone(), local.clone()).await?;
    Ok(Harness {
        state,
        store,
        local,
    })
}

pub async fn login(state: &AppState) -> anyhow::Result<AdminSession> {
    let config = AppConfig::default();
    auth_service::login(
        state,
        LoginRequest {
            username: config.admin.username,
            password: config.admin.password,
        },
    )
    .await?;
    Ok(ensure_admin(state).await?)
}

/// Memory store whose order and stock writes can be made to fail.
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_orders: AtomicBool,
    /// Stock writes that succeed before the rest fail.
    pub stock_budget: AtomicUsize,
    pub stock_calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            inner: MemoryStore::with_products(products),
            fail_orders: AtomicBool::new(false),
            stock_budget: AtomicUsize::new(usize::MAX),
            stock_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.inner.list_products().await
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        self.inner.list_orders().await
    }

    fn subscribe_products(&self) -> SnapshotStream<Product> {
        self.inner.subscribe_products()
    }

    fn subscribe_orders(&self) -> SnapshotStream<Order> {
        self.inner.subscribe_orders()
    }

    async fn create_product(&self, id: i64, data: ProductData) -> StoreResult<Product> {
        self.inner.create_product(id, data).await
    }

    async fn update_product(&self, doc_id: Uuid, data: ProductData) -> StoreResult<Product> {
        self.inner.update_product(doc_id, data).await
    }

    async fn update_stock(&self, doc_id: Uuid, stock: i32) -> StoreResult<()> {
        let call = self.stock_calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.stock_budget.load(Ordering::SeqCst) {
            return Err(StoreError::backend("update_stock", "connection reset"));
        }
        self.inner.update_stock(doc_id, stock).await
    }

    async fn set_visibility(&self, doc_id: Uuid, visible: bool) -> StoreResult<()> {
        self.inner.set_visibility(doc_id, visible).await
    }

    async fn delete_product(&self, doc_id: Uuid) -> StoreResult<()> {
        self.inner.delete_product(doc_id).await
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        if self.fail_orders.load(Ordering::SeqCst) {
            return Err(StoreError::backend("create_order", "permission denied"));
        }
        self.inner.create_order(order).await
    }

    async fn update_order_status(&self, doc_id: Uuid, status: OrderStatus) -> StoreResult<()> {
        self.inner.update_order_status(doc_id, status).await
    }

    async fn delete_order(&self, doc_id: Uuid) -> StoreResult<()> {
        self.inner.delete_order(doc_id).await
    }
}

/// Memory storage whose writes start failing once `fail_writes` is set.
#[derive(Default)]
pub struct FailingStorage {
    pub inner: MemoryStorage,
    pub fail_writes: AtomicBool,
}

impl FailingStorage {
    fn refuse(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: PathBuf::from("goodwin_storage.json"),
                source: std::io::Error::other("no space left on device"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LocalStorage for FailingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.refuse()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.refuse()?;
        self.inner.remove(key).await
    }
}
