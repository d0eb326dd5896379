use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

use crate::{
    cart::Cart,
    config::AppConfig,
    error::AppResult,
    models::{Order, Product},
    storage::{ADMIN_SESSION_KEY, CART_KEY, LocalStorage},
    store::DocumentStore,
};

/// Last-synchronized copy of the remote collections, replaced wholesale on
/// every snapshot.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub local: Arc<dyn LocalStorage>,
    pub catalog: Arc<RwLock<Catalog>>,
    pub cart: Arc<Mutex<Cart>>,
    /// Order ids ticked in the admin order table.
    pub selection: Arc<Mutex<BTreeSet<String>>>,
}

/// Snapshot consumer tasks; aborted on shutdown.
pub struct Listeners {
    handles: Vec<JoinHandle<()>>,
}

impl Listeners {
    pub fn shutdown(self) {
        for handle in self.handles {
            handle.abort();
        }
    }
}

impl AppState {
    /// Restores the cart from local storage and loads the first snapshot of
    /// both collections.
    pub async fn new(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        local: Arc<dyn LocalStorage>,
    ) -> AppResult<Self> {
        let cart = restore_cart(local.as_ref()).await?;
        let state = Self {
            config: Arc::new(config),
            store,
            local,
            catalog: Arc::new(RwLock::new(Catalog::default())),
            cart: Arc::new(Mutex::new(cart)),
            selection: Arc::new(Mutex::new(BTreeSet::new())),
        };
        state.resync().await?;
        Ok(state)
    }

    /// One-shot query of both collections, replacing the local copies.
    pub async fn resync(&self) -> AppResult<()> {
        let products = self.store.list_products().await?;
        let orders = self.store.list_orders().await?;
        let mut catalog = self.catalog.write().await;
        catalog.products = products;
        catalog.orders = orders;
        Ok(())
    }

    pub fn spawn_listeners(&self) -> Listeners {
        let mut products = self.store.subscribe_products();
        let catalog = self.catalog.clone();
        let product_task = tokio::spawn(async move {
            while let Some(snapshot) = products.next().await {
                tracing::debug!(count = snapshot.len(), "products snapshot");
                catalog.write().await.products = snapshot;
            }
            tracing::warn!("products subscription ended");
        });

        let mut orders = self.store.subscribe_orders();
        let catalog = self.catalog.clone();
        let order_task = tokio::spawn(async move {
            while let Some(snapshot) = orders.next().await {
                tracing::debug!(count = snapshot.len(), "orders snapshot");
                catalog.write().await.orders = snapshot;
            }
            tracing::warn!("orders subscription ended");
        });

        Listeners {
            handles: vec![product_task, order_task],
        }
    }

    pub async fn products(&self) -> Vec<Product> {
        self.catalog.read().await.products.clone()
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.catalog.read().await.orders.clone()
    }

    pub async fn find_product(&self, id: i64) -> Option<Product> {
        self.catalog
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn find_order(&self, id: &str) -> Option<Order> {
        self.catalog
            .read()
            .await
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    pub async fn persist_cart(&self, cart: &Cart) -> AppResult<()> {
        let raw = cart
            .to_json()
            .map_err(|e| anyhow::anyhow!("serialize cart: {e}"))?;
        self.local.set(CART_KEY, raw).await?;
        Ok(())
    }

    pub async fn is_admin(&self) -> AppResult<bool> {
        let flag = self.local.get(ADMIN_SESSION_KEY).await?;
        Ok(flag.as_deref() == Some("true"))
    }
}

async fn restore_cart(local: &dyn LocalStorage) -> AppResult<Cart> {
    let raw = match local.get(CART_KEY).await? {
        Some(raw) => raw,
        None => return Ok(Cart::default()),
    };
    match Cart::from_json(&raw) {
        Ok(cart) => Ok(cart),
        Err(err) => {
            tracing::warn!(error = %err, "stored cart unreadable, starting empty");
            Ok(Cart::default())
        }
    }
}
