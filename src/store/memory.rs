use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use uuid::Uuid;

use super::{DocumentStore, SnapshotStream, StoreError, StoreResult};
use crate::models::{NewOrder, Order, OrderStatus, Product, ProductData};

/// Process-local document store. Collections live in watch channels so
/// every write fans out a full snapshot to subscribers.
pub struct MemoryStore {
    products: watch::Sender<Vec<Product>>,
    orders: watch::Sender<Vec<Order>>,
    writes: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    pub fn with_products(mut products: Vec<Product>) -> Self {
        products.sort_by_key(|p| p.id);
        let (products, _) = watch::channel(products);
        let (orders, _) = watch::channel(Vec::new());
        Self {
            products,
            orders,
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful write operations served so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn wrote(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn modify_product<F>(&self, doc_id: Uuid, f: F) -> StoreResult<Product>
    where
        F: FnOnce(&mut Product),
    {
        let mut updated = None;
        self.products.send_if_modified(|products| {
            match products.iter_mut().find(|p| p.doc_id == doc_id) {
                Some(product) => {
                    f(product);
                    updated = Some(product.clone());
                    true
                }
                None => false,
            }
        });
        let product = updated.ok_or(StoreError::Missing(doc_id))?;
        self.wrote();
        Ok(product)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.borrow().clone())
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.borrow().clone())
    }

    fn subscribe_products(&self) -> SnapshotStream<Product> {
        Box::pin(WatchStream::new(self.products.subscribe()))
    }

    fn subscribe_orders(&self) -> SnapshotStream<Order> {
        Box::pin(WatchStream::new(self.orders.subscribe()))
    }

    async fn create_product(&self, id: i64, data: ProductData) -> StoreResult<Product> {
        let product = Product {
            id,
            doc_id: Uuid::new_v4(),
            name: data.name,
            product_type: data.product_type,
            price: data.price,
            stock: data.stock,
            visible: data.visible,
            image: data.image,
        };
        self.products.send_modify(|products| {
            products.push(product.clone());
            products.sort_by_key(|p| p.id);
        });
        self.wrote();
        Ok(product)
    }

    async fn update_product(&self, doc_id: Uuid, data: ProductData) -> StoreResult<Product> {
        self.modify_product(doc_id, |product| {
            product.name = data.name;
            product.product_type = data.product_type;
            product.price = data.price;
            product.stock = data.stock;
            product.visible = data.visible;
            product.image = data.image;
        })
    }

    async fn update_stock(&self, doc_id: Uuid, stock: i32) -> StoreResult<()> {
        self.modify_product(doc_id, |product| product.stock = stock)?;
        Ok(())
    }

    async fn set_visibility(&self, doc_id: Uuid, visible: bool) -> StoreResult<()> {
        self.modify_product(doc_id, |product| product.visible = visible)?;
        Ok(())
    }

    async fn delete_product(&self, doc_id: Uuid) -> StoreResult<()> {
        let removed = self.products.send_if_modified(|products| {
            let before = products.len();
            products.retain(|p| p.doc_id != doc_id);
            products.len() != before
        });
        if !removed {
            return Err(StoreError::Missing(doc_id));
        }
        self.wrote();
        Ok(())
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let order = order.into_order(Uuid::new_v4());
        self.orders.send_modify(|orders| {
            orders.push(order.clone());
            orders.sort_by(|a, b| b.id.cmp(&a.id));
        });
        self.wrote();
        Ok(order)
    }

    async fn update_order_status(&self, doc_id: Uuid, status: OrderStatus) -> StoreResult<()> {
        let updated = self.orders.send_if_modified(|orders| {
            match orders.iter_mut().find(|o| o.doc_id == doc_id) {
                Some(order) => {
                    order.status = status;
                    true
                }
                None => false,
            }
        });
        if !updated {
            return Err(StoreError::Missing(doc_id));
        }
        self.wrote();
        Ok(())
    }

    async fn delete_order(&self, doc_id: Uuid) -> StoreResult<()> {
        let removed = self.orders.send_if_modified(|orders| {
            let before = orders.len();
            orders.retain(|o| o.doc_id != doc_id);
            orders.len() != before
        });
        if !removed {
            return Err(StoreError::Missing(doc_id));
        }
        self.wrote();
        Ok(())
    }
}
