//! Aggregation over catalog and movement snapshots
//!
//! Pure functions: each takes product/movement slices plus an explicit
//! reference time and returns owned summaries. Grouped results keep the
//! first-seen order of their inputs, so the same snapshot always yields
//! the same output.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Movement, MovementType, Product, StockStatus};
use crate::services::history::months_back;

/// Per-category totals across the catalog
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub products: usize,
    pub stock: u64,
    pub value: Decimal,
}

/// A product ranked by how much quantity it moved
#[derive(Debug, Clone, Serialize)]
pub struct TopMovedProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_quantity: u64,
    pub movements: usize,
    pub last_movement: DateTime<Utc>,
}

/// Movement activity within one calendar bucket
#[derive(Debug, Clone, Serialize)]
pub struct ActivityBucket {
    pub period: String,
    pub entries: usize,
    pub exits: usize,
    pub entry_quantity: u64,
    pub exit_quantity: u64,
    pub net_change: i64,
}

impl ActivityBucket {
    fn zeroed(period: String) -> Self {
        Self {
            period,
            entries: 0,
            exits: 0,
            entry_quantity: 0,
            exit_quantity: 0,
            net_change: 0,
        }
    }

    fn record(&mut self, movement: &Movement) {
        match movement.movement_type {
            MovementType::Entry => {
                self.entries += 1;
                self.entry_quantity += u64::from(movement.quantity);
            }
            MovementType::Exit => {
                self.exits += 1;
                self.exit_quantity += u64::from(movement.quantity);
            }
        }
        self.net_change = self.entry_quantity as i64 - self.exit_quantity as i64;
    }
}

/// Annualized turnover of one product over a recent window
#[derive(Debug, Clone, Serialize)]
pub struct ProductTurnover {
    pub product_id: Uuid,
    pub product_name: String,
    pub stock: u32,
    pub exit_quantity: u64,
    /// Annualized rate; times per year the current stock would turn over
    pub rate: f64,
    /// Days the current stock lasts at the observed pace; None when nothing moved
    pub days_of_stock: Option<f64>,
}

/// Movement totals between two instants, inclusive on both ends
#[derive(Debug, Clone, Serialize)]
pub struct PeriodMetrics {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_movements: usize,
    pub entries: usize,
    pub exits: usize,
    pub entry_quantity: u64,
    pub exit_quantity: u64,
    pub net_change: i64,
    /// Entry quantities valued at current prices
    pub entries_value: Decimal,
    /// Exit quantities valued at current prices
    pub exits_value: Decimal,
    pub avg_movements_per_day: f64,
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub total_products: usize,
    pub total_stock: u64,
    pub total_value: Decimal,
    pub low_stock_products: usize,
    pub movements_today: usize,
    pub entries_today: usize,
    pub exits_today: usize,
}

/// Catalog headcount per stock status
#[derive(Debug, Clone, Serialize)]
pub struct StockStatusBreakdown {
    pub normal: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// Per-category product count, stock and value, in first-seen category order
pub fn category_distribution(products: &[Product]) -> Vec<CategoryBreakdown> {
    let mut by_category: IndexMap<&str, CategoryBreakdown> = IndexMap::new();
    for product in products {
        let entry = by_category
            .entry(product.category.as_str())
            .or_insert_with(|| CategoryBreakdown {
                category: product.category.clone(),
                products: 0,
                stock: 0,
                value: Decimal::ZERO,
            });
        entry.products += 1;
        entry.stock += u64::from(product.stock);
        entry.value += product.inventory_value();
    }
    by_category.into_values().collect()
}

/// Products ranked by total quantity moved, descending. Ties keep the
/// order products first appear in the log. Names come from the movements
/// themselves, so deleted products still rank.
pub fn top_moved_products(movements: &[Movement], limit: usize) -> Vec<TopMovedProduct> {
    let mut by_product: IndexMap<Uuid, TopMovedProduct> = IndexMap::new();
    for movement in movements {
        let entry = by_product
            .entry(movement.product_id)
            .or_insert_with(|| TopMovedProduct {
                product_id: movement.product_id,
                product_name: movement.product_name.clone(),
                total_quantity: 0,
                movements: 0,
                last_movement: movement.occurred_at,
            });
        entry.total_quantity += u64::from(movement.quantity);
        entry.movements += 1;
        if movement.occurred_at > entry.last_movement {
            entry.last_movement = movement.occurred_at;
        }
    }
    let mut ranked: Vec<TopMovedProduct> = by_product.into_values().collect();
    ranked.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    ranked.truncate(limit);
    ranked
}

/// One bucket per UTC day for the last `days` days plus today, oldest
/// first, zero-filled where nothing moved
pub fn daily_activity(
    movements: &[Movement],
    days: u32,
    today: DateTime<Utc>,
) -> Vec<ActivityBucket> {
    let today = today.date_naive();
    let mut buckets: IndexMap<NaiveDate, ActivityBucket> = IndexMap::new();
    for back in (0..=days).rev() {
        if let Some(day) = today.checked_sub_days(Days::new(u64::from(back))) {
            buckets.insert(day, ActivityBucket::zeroed(day.format("%Y-%m-%d").to_string()));
        }
    }
    for movement in movements {
        if let Some(bucket) = buckets.get_mut(&movement.occurred_at.date_naive()) {
            bucket.record(movement);
        }
    }
    buckets.into_values().collect()
}

/// One bucket per calendar month for the last `months` months ending with
/// the current one, oldest first, zero-filled. Zero months yields nothing.
pub fn monthly_activity(
    movements: &[Movement],
    months: u32,
    today: DateTime<Utc>,
) -> Vec<ActivityBucket> {
    let mut buckets: IndexMap<String, ActivityBucket> = IndexMap::new();
    for back in (0..months).rev() {
        let (year, month) = months_back(today.year(), today.month(), back);
        let period = format!("{:04}-{:02}", year, month);
        buckets.insert(period.clone(), ActivityBucket::zeroed(period));
    }
    for movement in movements {
        let period = format!(
            "{:04}-{:02}",
            movement.occurred_at.year(),
            movement.occurred_at.month()
        );
        if let Some(bucket) = buckets.get_mut(&period) {
            bucket.record(movement);
        }
    }
    buckets.into_values().collect()
}

/// Movement totals between `from` and `to` inclusive. Quantities are
/// valued at current prices; movements of deleted products value at zero.
pub fn period_metrics(
    products: &[Product],
    movements: &[Movement],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> PeriodMetrics {
    let price_of: HashMap<Uuid, Decimal> = products.iter().map(|p| (p.id, p.price)).collect();
    let mut metrics = PeriodMetrics {
        from,
        to,
        total_movements: 0,
        entries: 0,
        exits: 0,
        entry_quantity: 0,
        exit_quantity: 0,
        net_change: 0,
        entries_value: Decimal::ZERO,
        exits_value: Decimal::ZERO,
        avg_movements_per_day: 0.0,
    };
    for movement in movements
        .iter()
        .filter(|m| m.occurred_at >= from && m.occurred_at <= to)
    {
        metrics.total_movements += 1;
        let value = price_of
            .get(&movement.product_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
            * Decimal::from(movement.quantity);
        match movement.movement_type {
            MovementType::Entry => {
                metrics.entries += 1;
                metrics.entry_quantity += u64::from(movement.quantity);
                metrics.entries_value += value;
            }
            MovementType::Exit => {
                metrics.exits += 1;
                metrics.exit_quantity += u64::from(movement.quantity);
                metrics.exits_value += value;
            }
        }
    }
    metrics.net_change = metrics.entry_quantity as i64 - metrics.exit_quantity as i64;
    let span_days = ((to - from).num_milliseconds() as f64 / 86_400_000.0)
        .ceil()
        .max(1.0);
    metrics.avg_movements_per_day = metrics.total_movements as f64 / span_days;
    metrics
}

/// Annualized turnover per in-stock product over the trailing window
/// ending at `today`. A zero-day window or an empty log yields nothing.
pub fn turnover_rates(
    products: &[Product],
    movements: &[Movement],
    window_days: u32,
    today: DateTime<Utc>,
) -> Vec<ProductTurnover> {
    if window_days == 0 || movements.is_empty() {
        return Vec::new();
    }
    let cutoff = today - Duration::days(i64::from(window_days));
    let mut exits_by_product: HashMap<Uuid, u64> = HashMap::new();
    for movement in movements.iter().filter(|m| {
        m.movement_type == MovementType::Exit
            && m.occurred_at >= cutoff
            && m.occurred_at <= today
    }) {
        *exits_by_product.entry(movement.product_id).or_insert(0) +=
            u64::from(movement.quantity);
    }
    products
        .iter()
        .filter(|p| p.stock > 0)
        .map(|product| {
            let exit_quantity = exits_by_product.get(&product.id).copied().unwrap_or(0);
            let rate = (exit_quantity as f64 / f64::from(product.stock))
                * (365.0 / f64::from(window_days));
            ProductTurnover {
                product_id: product.id,
                product_name: product.name.clone(),
                stock: product.stock,
                exit_quantity,
                rate,
                days_of_stock: if rate > 0.0 { Some(365.0 / rate) } else { None },
            }
        })
        .collect()
}

/// Products that actually turned over in the window, fastest first
pub fn ranked_turnover(
    products: &[Product],
    movements: &[Movement],
    window_days: u32,
    today: DateTime<Utc>,
) -> Vec<ProductTurnover> {
    let mut ranked: Vec<ProductTurnover> = turnover_rates(products, movements, window_days, today)
        .into_iter()
        .filter(|t| t.rate > 0.0 && t.rate.is_finite())
        .collect();
    ranked.sort_by(|a, b| b.rate.partial_cmp(&a.rate).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// Catalog headcount per stock status
pub fn stock_status_breakdown(products: &[Product], global_threshold: u32) -> StockStatusBreakdown {
    let mut breakdown = StockStatusBreakdown {
        normal: 0,
        low_stock: 0,
        out_of_stock: 0,
    };
    for product in products {
        match product.status(global_threshold) {
            StockStatus::Normal => breakdown.normal += 1,
            StockStatus::LowStock => breakdown.low_stock += 1,
            StockStatus::OutOfStock => breakdown.out_of_stock += 1,
        }
    }
    breakdown
}

/// Products at or below their effective minimum, out-of-stock included
pub fn low_stock_products(products: &[Product], global_threshold: u32) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.stock <= p.effective_min_stock(global_threshold))
        .cloned()
        .collect()
}

/// Headline numbers for the dashboard; "today" is the UTC day of the
/// given reference time
pub fn dashboard_metrics(
    products: &[Product],
    movements: &[Movement],
    global_threshold: u32,
    today: DateTime<Utc>,
) -> DashboardMetrics {
    let today = today.date_naive();
    let mut movements_today = 0;
    let mut entries_today = 0;
    let mut exits_today = 0;
    for movement in movements
        .iter()
        .filter(|m| m.occurred_at.date_naive() == today)
    {
        movements_today += 1;
        match movement.movement_type {
            MovementType::Entry => entries_today += 1,
            MovementType::Exit => exits_today += 1,
        }
    }
    DashboardMetrics {
        total_products: products.len(),
        total_stock: products.iter().map(|p| u64::from(p.stock)).sum(),
        total_value: products.iter().map(|p| p.inventory_value()).sum(),
        low_stock_products: products
            .iter()
            .filter(|p| p.stock <= p.effective_min_stock(global_threshold))
            .count(),
        movements_today,
        entries_today,
        exits_today,
    }
}
