//! Report builders
//!
//! Assembles the standard reports from catalog and movement snapshots.
//! Builders are pure and stamp the caller-provided generation time, so a
//! report can be rebuilt for any snapshot and the output compared. The
//! windowed builders refuse inverted or future-starting date ranges.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Movement, MovementType, Product};
use crate::services::analytics::{category_distribution, CategoryBreakdown};
use crate::validation;

/// Current state of the whole inventory
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub generated_at: DateTime<Utc>,
    pub total_products: usize,
    pub total_stock: u64,
    pub total_value: Decimal,
    pub low_stock: Vec<StockAlertItem>,
    pub categories: Vec<CategoryBreakdown>,
}

/// A product flagged by a stock alert
#[derive(Debug, Clone, Serialize)]
pub struct StockAlertItem {
    pub product_id: Uuid,
    pub name: String,
    pub sku: String,
    pub stock: u32,
    /// Effective minimum the product was compared against
    pub min_stock: u32,
}

/// Movement log activity over a date range
#[derive(Debug, Clone, Serialize)]
pub struct MovementsReport {
    pub generated_at: DateTime<Utc>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_movements: usize,
    pub entries: usize,
    pub exits: usize,
    pub entry_quantity: u64,
    pub exit_quantity: u64,
    pub movements: Vec<Movement>,
}

/// Sales activity over a date range
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub generated_at: DateTime<Utc>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_sales: usize,
    pub units_sold: u64,
    /// Units valued at current prices
    pub revenue: Decimal,
    pub top_products: Vec<TopSeller>,
}

/// A product ranked by units sold
#[derive(Debug, Clone, Serialize)]
pub struct TopSeller {
    pub product_id: Uuid,
    pub product_name: String,
    pub units: u64,
    pub revenue: Decimal,
}

/// Stock alerts grouped by severity
#[derive(Debug, Clone, Serialize)]
pub struct AlertsReport {
    pub generated_at: DateTime<Utc>,
    /// At or below the effective minimum, out-of-stock included
    pub low_stock: Vec<StockAlertItem>,
    /// Exactly zero stock
    pub out_of_stock: Vec<StockAlertItem>,
    /// Above zero but at or below half the effective minimum
    pub critical: Vec<StockAlertItem>,
}

/// Monetary value of the inventory
#[derive(Debug, Clone, Serialize)]
pub struct ValuationReport {
    pub generated_at: DateTime<Utc>,
    pub total_value: Decimal,
    pub average_value: Decimal,
    pub categories: Vec<CategoryBreakdown>,
    pub top_products: Vec<ValuedProduct>,
}

/// A product ranked by inventory value
#[derive(Debug, Clone, Serialize)]
pub struct ValuedProduct {
    pub product_id: Uuid,
    pub name: String,
    pub sku: String,
    pub stock: u32,
    pub price: Decimal,
    pub value: Decimal,
}

fn alert_item(product: &Product, global_threshold: u32) -> StockAlertItem {
    StockAlertItem {
        product_id: product.id,
        name: product.name.clone(),
        sku: product.sku.clone(),
        stock: product.stock,
        min_stock: product.effective_min_stock(global_threshold),
    }
}

fn check_window(from: DateTime<Utc>, to: DateTime<Utc>, now: DateTime<Utc>) -> AppResult<()> {
    if let Err(msg) = validation::validate_date_range(from, to, now) {
        return Err(AppError::Validation {
            field: "date_range".to_string(),
            message: msg.to_string(),
            message_es: "El rango de fechas no es válido".to_string(),
        });
    }
    Ok(())
}

/// Snapshot of the whole inventory with low-stock flags and category totals
pub fn inventory_report(
    products: &[Product],
    global_threshold: u32,
    now: DateTime<Utc>,
) -> InventoryReport {
    InventoryReport {
        generated_at: now,
        total_products: products.len(),
        total_stock: products.iter().map(|p| u64::from(p.stock)).sum(),
        total_value: products.iter().map(|p| p.inventory_value()).sum(),
        low_stock: products
            .iter()
            .filter(|p| p.stock <= p.effective_min_stock(global_threshold))
            .map(|p| alert_item(p, global_threshold))
            .collect(),
        categories: category_distribution(products),
    }
}

/// Movement activity between `from` and `to` inclusive, with the matching
/// movements attached in log order. The window must be ordered and must
/// not start after `now`.
pub fn movements_report(
    movements: &[Movement],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    now: DateTime<Utc>,
) -> AppResult<MovementsReport> {
    check_window(from, to, now)?;
    let filtered: Vec<Movement> = movements
        .iter()
        .filter(|m| m.occurred_at >= from && m.occurred_at <= to)
        .cloned()
        .collect();
    let mut entries = 0;
    let mut exits = 0;
    let mut entry_quantity = 0u64;
    let mut exit_quantity = 0u64;
    for movement in &filtered {
        match movement.movement_type {
            MovementType::Entry => {
                entries += 1;
                entry_quantity += u64::from(movement.quantity);
            }
            MovementType::Exit => {
                exits += 1;
                exit_quantity += u64::from(movement.quantity);
            }
        }
    }
    Ok(MovementsReport {
        generated_at: now,
        from,
        to,
        total_movements: filtered.len(),
        entries,
        exits,
        entry_quantity,
        exit_quantity,
        movements: filtered,
    })
}

/// Sales between `from` and `to` inclusive. Only exits recorded as sales
/// count; revenue values units at current prices, and the top list holds
/// at most ten products ranked by units sold. The window must be ordered
/// and must not start after `now`.
pub fn sales_report(
    products: &[Product],
    movements: &[Movement],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    now: DateTime<Utc>,
) -> AppResult<SalesReport> {
    check_window(from, to, now)?;
    let price_of: HashMap<Uuid, Decimal> = products.iter().map(|p| (p.id, p.price)).collect();
    let mut by_product: IndexMap<Uuid, TopSeller> = IndexMap::new();
    let mut total_sales = 0;
    let mut units_sold = 0u64;
    let mut revenue = Decimal::ZERO;
    for movement in movements
        .iter()
        .filter(|m| m.is_sale() && m.occurred_at >= from && m.occurred_at <= to)
    {
        total_sales += 1;
        units_sold += u64::from(movement.quantity);
        let line = price_of
            .get(&movement.product_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
            * Decimal::from(movement.quantity);
        revenue += line;
        let entry = by_product
            .entry(movement.product_id)
            .or_insert_with(|| TopSeller {
                product_id: movement.product_id,
                product_name: movement.product_name.clone(),
                units: 0,
                revenue: Decimal::ZERO,
            });
        entry.units += u64::from(movement.quantity);
        entry.revenue += line;
    }
    let mut top_products: Vec<TopSeller> = by_product.into_values().collect();
    top_products.sort_by(|a, b| b.units.cmp(&a.units));
    top_products.truncate(10);
    Ok(SalesReport {
        generated_at: now,
        from,
        to,
        total_sales,
        units_sold,
        revenue,
        top_products,
    })
}

/// Stock alerts grouped by severity. A product can appear in more than
/// one group; out-of-stock products are low-stock too.
pub fn alerts_report(
    products: &[Product],
    global_threshold: u32,
    now: DateTime<Utc>,
) -> AlertsReport {
    let mut low_stock = Vec::new();
    let mut out_of_stock = Vec::new();
    let mut critical = Vec::new();
    for product in products {
        let min = product.effective_min_stock(global_threshold);
        if product.stock <= min {
            low_stock.push(alert_item(product, global_threshold));
        }
        if product.stock == 0 {
            out_of_stock.push(alert_item(product, global_threshold));
        } else if product.stock <= min / 2 {
            critical.push(alert_item(product, global_threshold));
        }
    }
    AlertsReport {
        generated_at: now,
        low_stock,
        out_of_stock,
        critical,
    }
}

/// Inventory value totals, per-category splits and the ten most valuable
/// products
pub fn valuation_report(products: &[Product], now: DateTime<Utc>) -> ValuationReport {
    let total_value: Decimal = products.iter().map(|p| p.inventory_value()).sum();
    let average_value = if products.is_empty() {
        Decimal::ZERO
    } else {
        total_value / Decimal::from(products.len() as u64)
    };
    let mut top_products: Vec<ValuedProduct> = products
        .iter()
        .map(|p| ValuedProduct {
            product_id: p.id,
            name: p.name.clone(),
            sku: p.sku.clone(),
            stock: p.stock,
            price: p.price,
            value: p.inventory_value(),
        })
        .collect();
    top_products.sort_by(|a, b| b.value.cmp(&a.value));
    top_products.truncate(10);
    ValuationReport {
        generated_at: now,
        total_value,
        average_value,
        categories: category_distribution(products),
        top_products,
    }
}
