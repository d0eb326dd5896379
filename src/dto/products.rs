use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{BagSize, Product, ProductData};

#[derive(Debug, Serialize, ToSchema)]
pub struct SizeOption {
    pub size: BagSize,
    pub price: i64,
}

/// A visible product as shown on the storefront.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: i64,
    pub stock: i32,
    pub image: Option<String>,
    pub in_stock: bool,
    pub sizes: Vec<SizeOption>,
}

impl From<&Product> for CatalogEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            product_type: product.product_type.clone(),
            price: product.price,
            stock: product.stock,
            image: product.image.clone(),
            in_stock: product.in_stock(),
            sizes: BagSize::ALL
                .iter()
                .map(|&size| SizeOption {
                    size,
                    price: product.price_for(size),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CatalogList {
    #[schema(value_type = Vec<CatalogEntry>)]
    pub items: Vec<CatalogEntry>,
}

/// Admin product form. Name, type, price and stock are required.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProductRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub image: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl UpsertProductRequest {
    /// `None` when a required field is missing or blank. The type is
    /// required too so every product lands in a category filter.
    pub fn into_data(self) -> Option<ProductData> {
        let name = self.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;
        let product_type = self
            .product_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())?;
        Some(ProductData {
            name,
            product_type,
            price: self.price?,
            stock: self.stock?,
            visible: self.visible,
            image: self.image.filter(|i| !i.is_empty()),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
