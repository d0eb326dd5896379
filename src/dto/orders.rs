use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderStatus};

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub delivery_notes: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order: Order,
    pub whatsapp_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order: Order,
    pub whatsapp_url: String,
    pub tel_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Selects (or deselects) every order matching `status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectAllRequest {
    pub all: bool,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SelectionView {
    pub selected: Vec<String>,
}
