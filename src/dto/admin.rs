use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    filter::DashboardStats,
    models::{Order, Product},
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub low_stock: Vec<Product>,
    pub recent_orders: Vec<Order>,
}
