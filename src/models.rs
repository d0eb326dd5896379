use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    /// Store-assigned document key, distinct from the business id.
    pub doc_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: i64,
    pub stock: i32,
    pub visible: bool,
    pub image: Option<String>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn price_for(&self, size: BagSize) -> i64 {
        size.price_from(self.price)
    }
}

/// Fields written when a product is created or replaced by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: i64,
    pub stock: i32,
    pub visible: bool,
    pub image: Option<String>,
}

/// Highest base price accepted from the admin form.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Bag sizes offered for every product. The 25kg bag carries the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BagSize {
    #[serde(rename = "5kg")]
    Kg5,
    #[serde(rename = "10kg")]
    Kg10,
    #[serde(rename = "25kg")]
    Kg25,
}

impl BagSize {
    pub const ALL: [BagSize; 3] = [BagSize::Kg5, BagSize::Kg10, BagSize::Kg25];

    pub fn as_str(&self) -> &'static str {
        match self {
            BagSize::Kg5 => "5kg",
            BagSize::Kg10 => "10kg",
            BagSize::Kg25 => "25kg",
        }
    }

    /// Tier price rounded half-up: 20% and 40% of the base price for the
    /// smaller bags.
    pub fn price_from(&self, base: i64) -> i64 {
        let tenths = match self {
            BagSize::Kg5 => 2,
            BagSize::Kg10 => 4,
            BagSize::Kg25 => return base,
        };
        base.saturating_mul(tenths).saturating_add(5).div_euclid(10)
    }
}

impl fmt::Display for BagSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BagSize {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5kg" => Ok(BagSize::Kg5),
            "10kg" => Ok(BagSize::Kg10),
            "25kg" => Ok(BagSize::Kg25),
            other => Err(AppError::BadRequest(format!("Unknown bag size {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub size: BagSize,
    pub price: i64,
    pub quantity: i32,
    pub image: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(AppError::BadRequest("Invalid order status".into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub doc_id: Uuid,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub delivery_notes: String,
    pub items: Vec<CartLine>,
    pub total: i64,
    /// Calendar date of submission, `YYYY-MM-DD`.
    pub date: String,
    pub status: OrderStatus,
}

/// An order as handed to the store, before a document key exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub delivery_notes: String,
    pub items: Vec<CartLine>,
    pub total: i64,
    pub date: String,
    pub status: OrderStatus,
}

impl NewOrder {
    pub fn into_order(self, doc_id: Uuid) -> Order {
        Order {
            id: self.id,
            doc_id,
            customer_name: self.customer_name,
            phone: self.phone,
            address: self.address,
            city: self.city,
            delivery_notes: self.delivery_notes,
            items: self.items,
            total: self.total,
            date: self.date,
            status: self.status,
        }
    }
}
