//! Views over the in-memory product and order lists for the admin tables.
//! Everything here is pure; source order is preserved.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Order, OrderStatus, Product},
};

pub const RECENT_ORDERS: usize = 5;

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct ProductFilter {
    /// Case-insensitive substring of name, id or type.
    pub q: Option<String>,
    /// Exact type label; `all` or empty disables the filter.
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let term = self.q.as_deref().unwrap_or("").to_lowercase();
        let matches_search = product.name.to_lowercase().contains(&term)
            || product.id.to_string().contains(&term)
            || product.product_type.to_lowercase().contains(&term);

        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(c) if c.eq_ignore_ascii_case("all") => true,
            Some(c) => product.product_type.to_lowercase() == c.to_lowercase(),
        };

        matches_search && matches_category
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// `status=all` (or no status) lists every order.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct OrderFilter {
    pub status: Option<String>,
}

impl OrderFilter {
    pub fn status(&self) -> AppResult<Option<OrderStatus>> {
        match self.status.as_deref() {
            None | Some("") | Some("all") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> AppResult<Vec<&'a Order>> {
        let status = self.status()?;
        Ok(orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .collect())
    }
}

pub fn low_stock(products: &[Product], threshold: i32) -> Vec<&Product> {
    products.iter().filter(|p| p.stock <= threshold).collect()
}

/// Leading orders of the list, which the store keeps newest first.
pub fn recent_orders(orders: &[Order]) -> &[Order] {
    &orders[..orders.len().min(RECENT_ORDERS)]
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_sales: i64,
    pub pending_orders: usize,
    pub total_orders: usize,
}

impl DashboardStats {
    pub fn compute(products: &[Product], orders: &[Order]) -> Self {
        Self {
            total_products: products.len(),
            total_sales: orders.iter().map(|o| o.total).fold(0, i64::saturating_add),
            pending_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            total_orders: orders.len(),
        }
    }
}
