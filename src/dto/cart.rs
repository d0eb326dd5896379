use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    cart::Cart,
    models::{BagSize, CartLine},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i64,
    /// No size selected is rejected.
    pub size: Option<BagSize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustQuantityRequest {
    pub delta: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub index: usize,
    pub line: CartLine,
    pub line_total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: i64,
    /// Sum of quantities.
    pub badge_count: i32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineView {
                    index,
                    line: line.clone(),
                    line_total: line.line_total(),
                })
                .collect(),
            total: cart.total(),
            badge_count: cart.badge_count(),
        }
    }
}
