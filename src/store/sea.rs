use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use uuid::Uuid;

use super::{DocumentStore, SnapshotStream, StoreError, StoreResult};
use crate::{
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products, Model as ProductModel},
    },
    models::{NewOrder, Order, OrderStatus, Product, ProductData},
};

/// Postgres-backed store. Snapshots are re-read and published after every
/// write made through this handle; writes from other processes show up on
/// the next local write.
pub struct SeaStore {
    orm: DatabaseConnection,
    products: watch::Sender<Vec<Product>>,
    orders: watch::Sender<Vec<Order>>,
}

impl SeaStore {
    pub async fn connect(orm: DatabaseConnection) -> StoreResult<Self> {
        let (products, _) = watch::channel(Vec::new());
        let (orders, _) = watch::channel(Vec::new());
        let store = Self {
            orm,
            products,
            orders,
        };
        store.products.send_replace(store.list_products().await?);
        store.orders.send_replace(store.list_orders().await?);
        Ok(store)
    }

    async fn publish_products(&self) {
        match self.list_products().await {
            Ok(products) => {
                self.products.send_replace(products);
            }
            Err(err) => tracing::warn!(error = %err, "product snapshot refresh failed"),
        }
    }

    async fn publish_orders(&self) {
        match self.list_orders().await {
            Ok(orders) => {
                self.orders.send_replace(orders);
            }
            Err(err) => tracing::warn!(error = %err, "order snapshot refresh failed"),
        }
    }

    async fn update_product_column<V>(&self, op: &'static str, doc_id: Uuid, col: ProdCol, value: V) -> StoreResult<()>
    where
        V: Into<sea_orm::Value>,
    {
        let result = Products::update_many()
            .col_expr(col, Expr::value(value.into()))
            .filter(ProdCol::DocId.eq(doc_id))
            .exec(&self.orm)
            .await
            .map_err(|e| StoreError::backend(op, e))?;
        if result.rows_affected == 0 {
            return Err(StoreError::Missing(doc_id));
        }
        self.publish_products().await;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SeaStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let products = Products::find()
            .order_by_asc(ProdCol::Id)
            .all(&self.orm)
            .await
            .map_err(|e| StoreError::backend("list products", e))?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Orders::find()
            .order_by_desc(OrderCol::Id)
            .all(&self.orm)
            .await
            .map_err(|e| StoreError::backend("list orders", e))?
            .into_iter()
            .map(order_from_entity)
            .collect()
    }

    fn subscribe_products(&self) -> SnapshotStream<Product> {
        Box::pin(WatchStream::new(self.products.subscribe()))
    }

    fn subscribe_orders(&self) -> SnapshotStream<Order> {
        Box::pin(WatchStream::new(self.orders.subscribe()))
    }

    async fn create_product(&self, id: i64, data: ProductData) -> StoreResult<Product> {
        let product = ProductActive {
            doc_id: Set(Uuid::new_v4()),
            id: Set(id),
            name: Set(data.name),
            product_type: Set(data.product_type),
            price: Set(data.price),
            stock: Set(data.stock),
            visible: Set(data.visible),
            image: Set(data.image),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await
        .map_err(|e| StoreError::backend("create product", e))?;

        self.publish_products().await;
        Ok(product_from_entity(product))
    }

    async fn update_product(&self, doc_id: Uuid, data: ProductData) -> StoreResult<Product> {
        let existing = Products::find_by_id(doc_id)
            .one(&self.orm)
            .await
            .map_err(|e| StoreError::backend("update product", e))?;
        let existing = match existing {
            Some(p) => p,
            None => return Err(StoreError::Missing(doc_id)),
        };

        let mut active: ProductActive = existing.into();
        active.name = Set(data.name);
        active.product_type = Set(data.product_type);
        active.price = Set(data.price);
        active.stock = Set(data.stock);
        active.visible = Set(data.visible);
        active.image = Set(data.image);
        let product = active
            .update(&self.orm)
            .await
            .map_err(|e| StoreError::backend("update product", e))?;

        self.publish_products().await;
        Ok(product_from_entity(product))
    }

    async fn update_stock(&self, doc_id: Uuid, stock: i32) -> StoreResult<()> {
        self.update_product_column("update stock", doc_id, ProdCol::Stock, stock)
            .await
    }

    async fn set_visibility(&self, doc_id: Uuid, visible: bool) -> StoreResult<()> {
        self.update_product_column("update visibility", doc_id, ProdCol::Visible, visible)
            .await
    }

    async fn delete_product(&self, doc_id: Uuid) -> StoreResult<()> {
        let result = Products::delete_by_id(doc_id)
            .exec(&self.orm)
            .await
            .map_err(|e| StoreError::backend("delete product", e))?;
        if result.rows_affected == 0 {
            return Err(StoreError::Missing(doc_id));
        }
        self.publish_products().await;
        Ok(())
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let items = serde_json::to_value(&order.items)
            .map_err(|e| StoreError::backend("create order", e))?;
        let model = OrderActive {
            doc_id: Set(Uuid::new_v4()),
            id: Set(order.id),
            customer_name: Set(order.customer_name),
            phone: Set(order.phone),
            address: Set(order.address),
            city: Set(order.city),
            delivery_notes: Set(order.delivery_notes),
            items: Set(items),
            total: Set(order.total),
            date: Set(order.date),
            status: Set(order.status.as_str().to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.orm)
        .await
        .map_err(|e| StoreError::backend("create order", e))?;

        self.publish_orders().await;
        order_from_entity(model)
    }

    async fn update_order_status(&self, doc_id: Uuid, status: OrderStatus) -> StoreResult<()> {
        let result = Orders::update_many()
            .col_expr(OrderCol::Status, Expr::value(status.as_str()))
            .filter(OrderCol::DocId.eq(doc_id))
            .exec(&self.orm)
            .await
            .map_err(|e| StoreError::backend("update order status", e))?;
        if result.rows_affected == 0 {
            return Err(StoreError::Missing(doc_id));
        }
        self.publish_orders().await;
        Ok(())
    }

    async fn delete_order(&self, doc_id: Uuid) -> StoreResult<()> {
        let result = Orders::delete_by_id(doc_id)
            .exec(&self.orm)
            .await
            .map_err(|e| StoreError::backend("delete order", e))?;
        if result.rows_affected == 0 {
            return Err(StoreError::Missing(doc_id));
        }
        self.publish_orders().await;
        Ok(())
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        doc_id: model.doc_id,
        name: model.name,
        product_type: model.product_type,
        price: model.price,
        stock: model.stock,
        visible: model.visible,
        image: model.image,
    }
}

fn order_from_entity(model: OrderModel) -> StoreResult<Order> {
    let items = serde_json::from_value(model.items)
        .map_err(|e| StoreError::backend("decode order items", e))?;
    let status = model
        .status
        .parse::<OrderStatus>()
        .map_err(|_| StoreError::backend("decode order status", format!("unknown status {}", model.status)))?;
    Ok(Order {
        id: model.id,
        doc_id: model.doc_id,
        customer_name: model.customer_name,
        phone: model.phone,
        address: model.address,
        city: model.city,
        delivery_notes: model.delivery_notes,
        items,
        total: model.total,
        date: model.date,
        status,
    })
}
