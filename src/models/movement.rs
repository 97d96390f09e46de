//! Stock movement models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reason recorded for opening-stock entries emitted at product creation
pub const REASON_INITIAL_STOCK: &str = "Stock inicial";

/// Reason recorded by the quick-entry shortcut
pub const REASON_QUICK_ENTRY: &str = "Entrada rápida";

/// Reason recorded by the quick-exit shortcut
pub const REASON_QUICK_EXIT: &str = "Salida rápida";

/// Reason marking a regular sale
pub const REASON_SALE: &str = "Venta";

/// User name recorded when no acting user is given
pub const SYSTEM_USER: &str = "Sistema";

/// Suggested reasons for entry movements
pub const ENTRY_REASONS: &[&str] = &[
    "Compra",
    "Devolución cliente",
    "Ajuste inventario",
    "Abastecimiento mensual",
    REASON_INITIAL_STOCK,
    REASON_QUICK_ENTRY,
];

/// Suggested reasons for exit movements
pub const EXIT_REASONS: &[&str] = &[
    REASON_SALE,
    "Devolución proveedor",
    "Producto dañado",
    "Ajuste inventario",
    "Muestra gratis",
    REASON_QUICK_EXIT,
];

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    #[serde(rename = "entrada")]
    Entry,
    #[serde(rename = "salida")]
    Exit,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entry => "entrada",
            MovementType::Exit => "salida",
        }
    }

    /// Prefix used in movement reference codes
    pub fn reference_prefix(&self) -> &'static str {
        match self {
            MovementType::Entry => "ENT",
            MovementType::Exit => "SAL",
        }
    }

    /// Signed stock change this movement direction causes for a quantity
    pub fn signed_delta(&self, quantity: u32) -> i64 {
        match self {
            MovementType::Entry => i64::from(quantity),
            MovementType::Exit => -i64::from(quantity),
        }
    }
}

/// A recorded stock movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Product name at the time of recording
    pub product_name: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: u32,
    pub reason: String,
    pub notes: Option<String>,
    pub user_name: String,
    pub occurred_at: DateTime<Utc>,
    /// Reference code, e.g. ENT-2024-001
    pub reference: String,
}

impl Movement {
    /// Signed stock change caused by this movement
    pub fn signed_delta(&self) -> i64 {
        self.movement_type.signed_delta(self.quantity)
    }

    /// Whether this movement counts as a sale for revenue reports
    pub fn is_sale(&self) -> bool {
        self.movement_type == MovementType::Exit
            && (self.reason == REASON_SALE || self.reason == REASON_QUICK_EXIT)
    }
}

/// Input for recording a stock movement
#[derive(Debug, Clone, Deserialize)]
pub struct MovementInput {
    pub product_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: u32,
    pub reason: String,
    pub notes: Option<String>,
    /// Acting user; recorded as "Sistema" when absent
    pub user_name: Option<String>,
    /// Timestamp override; the current time is used when absent
    pub occurred_at: Option<DateTime<Utc>>,
}
