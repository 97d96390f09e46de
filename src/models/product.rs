//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product tracked by the inventory ledger
///
/// Stock is unsigned: it can never go below zero, and it only changes
/// through recorded movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: String,
    pub location: String,
    pub price: Decimal,
    pub stock: u32,
    /// Per-product low-stock minimum; None falls back to the global threshold
    pub min_stock: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub last_movement: Option<DateTime<Utc>>,
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: String,
    pub location: String,
    pub price: Decimal,
    /// Opening stock, recorded as an entry movement when greater than zero
    pub initial_stock: u32,
    pub min_stock: Option<u32>,
}

/// Input for updating product master data
///
/// There is no stock field here: stock only changes through movements,
/// which keeps the movement log a complete account of every unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price: Option<Decimal>,
    pub min_stock: Option<u32>,
}

/// Stock level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Normal,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Normal => "normal",
            StockStatus::LowStock => "low_stock",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }
}

/// Classify a stock level against a minimum threshold
pub fn classify_stock(stock: u32, min_stock: u32) -> StockStatus {
    if stock == 0 {
        StockStatus::OutOfStock
    } else if stock <= min_stock {
        StockStatus::LowStock
    } else {
        StockStatus::Normal
    }
}

impl Product {
    /// Minimum stock for alerting, falling back to the global threshold
    pub fn effective_min_stock(&self, global_threshold: u32) -> u32 {
        self.min_stock.unwrap_or(global_threshold)
    }

    /// Stock level classification against the effective minimum
    pub fn status(&self, global_threshold: u32) -> StockStatus {
        classify_stock(self.stock, self.effective_min_stock(global_threshold))
    }

    /// Current inventory value at unit price
    pub fn inventory_value(&self) -> Decimal {
        self.price * Decimal::from(self.stock)
    }
}
