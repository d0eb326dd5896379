//! Shopping cart reconciled against the last-synchronized product snapshot.
//!
//! Stock is consumed one unit per cart unit regardless of bag size, summed
//! over every line of the same product. A line never holds a quantity
//! below 1.

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{BagSize, CartLine, Product},
};

pub const OUT_OF_STOCK: &str = "Product is out of stock!";
pub const NO_MORE_STOCK: &str = "No more stock available!";
pub const SELECT_SIZE: &str = "Please select a bag size first";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    Updated { index: usize, quantity: i32 },
    Removed(CartLine),
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities over all lines.
    pub fn badge_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> i64 {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(0, i64::saturating_add)
    }

    /// Units of `product_id` held across all sizes.
    pub fn quantity_of(&self, product_id: i64) -> i32 {
        self.lines
            .iter()
            .filter(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .sum()
    }

    /// Distinct products with the units purchased of each, in order of
    /// first appearance.
    pub fn purchased_quantities(&self) -> Vec<(i64, i32)> {
        let mut out: Vec<(i64, i32)> = Vec::new();
        for line in &self.lines {
            match out.iter_mut().find(|(id, _)| *id == line.product_id) {
                Some((_, qty)) => *qty += line.quantity,
                None => out.push((line.product_id, line.quantity)),
            }
        }
        out
    }

    pub fn add_line(&mut self, product: Option<&Product>, size: Option<BagSize>) -> AppResult<&CartLine> {
        let product = match product {
            Some(p) if p.in_stock() => p,
            _ => return Err(AppError::Warning(OUT_OF_STOCK.into())),
        };
        let size = size.ok_or_else(|| AppError::BadRequest(SELECT_SIZE.into()))?;

        if self.quantity_of(product.id) >= product.stock {
            return Err(AppError::Warning(NO_MORE_STOCK.into()));
        }

        let index = match self
            .lines
            .iter()
            .position(|l| l.product_id == product.id && l.size == size)
        {
            Some(index) => {
                self.lines[index].quantity += 1;
                index
            }
            None => {
                self.lines.push(CartLine {
                    product_id: product.id,
                    name: product.name.clone(),
                    product_type: product.product_type.clone(),
                    size,
                    price: product.price_for(size),
                    quantity: 1,
                    image: product.image.clone(),
                });
                self.lines.len() - 1
            }
        };
        Ok(&self.lines[index])
    }

    pub fn adjust_quantity(&mut self, index: usize, delta: i32, products: &[Product]) -> AppResult<QuantityChange> {
        if delta == 0 {
            return Err(AppError::BadRequest("quantity change must not be 0".into()));
        }
        let line = self.lines.get(index).ok_or(AppError::NotFound)?;

        if delta > 0 {
            let stock = products
                .iter()
                .find(|p| p.id == line.product_id)
                .map(|p| p.stock)
                .unwrap_or(0);
            let wanted = i64::from(self.quantity_of(line.product_id)) + i64::from(delta);
            if wanted > i64::from(stock) {
                return Err(AppError::Warning(NO_MORE_STOCK.into()));
            }
        }

        let quantity = line
            .quantity
            .checked_add(delta)
            .ok_or_else(|| AppError::BadRequest("quantity change out of range".into()))?;
        if quantity < 1 {
            return Ok(QuantityChange::Removed(self.lines.remove(index)));
        }
        self.lines[index].quantity = quantity;
        Ok(QuantityChange::Updated { index, quantity })
    }

    pub fn remove_line(&mut self, index: usize) -> AppResult<CartLine> {
        if index >= self.lines.len() {
            return Err(AppError::NotFound);
        }
        Ok(self.lines.remove(index))
    }

    /// Takes the units of `placed` back out of this cart, matching lines by
    /// product and size. Lines left with no units are dropped; anything added
    /// after `placed` was taken stays.
    pub fn remove_placed(&mut self, placed: &Cart) {
        for sold in &placed.lines {
            if let Some(line) = self
                .lines
                .iter_mut()
                .find(|l| l.product_id == sold.product_id && l.size == sold.size)
            {
                line.quantity = line.quantity.saturating_sub(sold.quantity);
            }
        }
        self.lines.retain(|l| l.quantity >= 1);
    }
}
