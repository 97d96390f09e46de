//! Historical stock reconstruction
//!
//! Current stock is the ground truth. Walking the movement log backwards
//! from it, undoing every movement that happened after the target instant,
//! yields the stock a product held at that instant. Movements before a
//! product existed simply never match it, so reconstruction needs no
//! creation date bookkeeping.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{Movement, Product};

/// Total stock across the catalog at the end of one month
#[derive(Debug, Clone, Serialize)]
pub struct StockTrendPoint {
    pub period: String,
    pub total_stock: u64,
}

/// Stock of a single product at a past instant.
///
/// Movements stamped exactly at `as_of` count as already applied. The
/// reconstructed value is clamped to the representable range once, at the
/// end, matching how the applier floors at zero.
pub fn stock_as_of(product: &Product, movements: &[Movement], as_of: DateTime<Utc>) -> u32 {
    let mut stock = i64::from(product.stock);
    for movement in movements
        .iter()
        .filter(|m| m.product_id == product.id && m.occurred_at > as_of)
    {
        stock -= movement.signed_delta();
    }
    stock.clamp(0, i64::from(u32::MAX)) as u32
}

/// Total stock across all products at a past instant
pub fn total_stock_as_of(
    products: &[Product],
    movements: &[Movement],
    as_of: DateTime<Utc>,
) -> u64 {
    products
        .iter()
        .map(|p| u64::from(stock_as_of(p, movements, as_of)))
        .sum()
}

/// Month-end total stock for the last `months` months plus the current one,
/// oldest first. Periods are labelled `YYYY-MM` in UTC.
pub fn stock_trend(
    products: &[Product],
    movements: &[Movement],
    months: u32,
    today: DateTime<Utc>,
) -> Vec<StockTrendPoint> {
    let mut points = Vec::with_capacity(months as usize + 1);
    for back in (0..=months).rev() {
        let (year, month) = months_back(today.year(), today.month(), back);
        points.push(StockTrendPoint {
            period: format!("{:04}-{:02}", year, month),
            total_stock: total_stock_as_of(products, movements, month_end_instant(year, month)),
        });
    }
    points
}

/// Calendar month `back` months before the given one
pub(crate) fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = i64::from(year) * 12 + i64::from(month) - 1 - i64::from(back);
    let year = total.div_euclid(12) as i32;
    let month = (total.rem_euclid(12) + 1) as u32;
    (year, month)
}

/// Last representable instant of a month in UTC
fn month_end_instant(year: i32, month: u32) -> DateTime<Utc> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    month_start(next_year, next_month) - Duration::nanoseconds(1)
}

// Month is always 1..=12 here, normalized by months_back.
fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}
