//! Demo fixtures for the in-memory store
//!
//! A small cat-litter warehouse: six products, a short movement log and
//! four directory users. Useful for demos and integration tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Movement, MovementType, Product, Role, User, UserStatus};
use crate::store::{MemoryStore, StoreSnapshot};

/// Categories registered out of the box
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Arena para Gatos",
    "Accesorios",
    "Alimentos",
    "Juguetes",
    "Higiene",
];

/// Warehouse locations registered out of the box
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "Almacén Principal",
    "Almacén Secundario",
    "Tienda",
    "Depósito",
];

fn ts(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
}

/// A store preloaded with the demo dataset
pub fn demo_store() -> MemoryStore {
    MemoryStore::from_snapshot(demo_snapshot())
}

/// The demo dataset as a snapshot
pub fn demo_snapshot() -> StoreSnapshot {
    let perlada_5 = Uuid::new_v4();
    let perlada_10 = Uuid::new_v4();
    let perlada_25 = Uuid::new_v4();
    let perlada_50 = Uuid::new_v4();
    let fina_5 = Uuid::new_v4();
    let granulada_25 = Uuid::new_v4();

    let products = vec![
        Product {
            id: perlada_5,
            name: "Arena Perlada 5 kg".to_string(),
            sku: "AP-5KG-001".to_string(),
            description: None,
            category: "Arena para Gatos".to_string(),
            location: "Almacén Principal".to_string(),
            price: Decimal::new(850, 2),
            stock: 120,
            min_stock: Some(30),
            created_at: ts(2024, 1, 15, 10, 0),
            last_movement: Some(ts(2024, 6, 25, 10, 0)),
        },
        Product {
            id: perlada_10,
            name: "Arena Perlada 10 kg".to_string(),
            sku: "AP-10KG-002".to_string(),
            description: None,
            category: "Arena para Gatos".to_string(),
            location: "Almacén Principal".to_string(),
            price: Decimal::new(1500, 2),
            stock: 80,
            min_stock: Some(20),
            created_at: ts(2024, 1, 15, 10, 5),
            last_movement: Some(ts(2024, 7, 3, 15, 0)),
        },
        Product {
            id: perlada_25,
            name: "Arena Perlada 25 kg".to_string(),
            sku: "AP-25KG-003".to_string(),
            description: None,
            category: "Arena para Gatos".to_string(),
            location: "Almacén Principal".to_string(),
            price: Decimal::new(3500, 2),
            stock: 40,
            min_stock: Some(10),
            created_at: ts(2024, 1, 15, 10, 10),
            last_movement: Some(ts(2024, 6, 30, 8, 0)),
        },
        Product {
            id: perlada_50,
            name: "Arena Perlada 50 kg".to_string(),
            sku: "AP-50KG-004".to_string(),
            description: None,
            category: "Arena para Gatos".to_string(),
            location: "Almacén Principal".to_string(),
            price: Decimal::new(6500, 2),
            stock: 15,
            min_stock: Some(5),
            created_at: ts(2024, 1, 15, 10, 15),
            last_movement: Some(ts(2024, 7, 1, 11, 45)),
        },
        Product {
            id: fina_5,
            name: "Arena Fina 5 kg".to_string(),
            sku: "AF-5KG-005".to_string(),
            description: None,
            category: "Arena para Gatos".to_string(),
            location: "Almacén Principal".to_string(),
            price: Decimal::new(700, 2),
            stock: 150,
            min_stock: Some(40),
            created_at: ts(2024, 2, 1, 9, 0),
            last_movement: Some(ts(2024, 7, 3, 16, 20)),
        },
        Product {
            id: granulada_25,
            name: "Arena Granulada 25 kg".to_string(),
            sku: "AG-25KG-006".to_string(),
            description: None,
            category: "Arena para Gatos".to_string(),
            location: "Almacén Principal".to_string(),
            price: Decimal::new(3200, 2),
            stock: 8,
            min_stock: Some(15),
            created_at: ts(2024, 2, 15, 11, 30),
            last_movement: Some(ts(2024, 7, 2, 9, 15)),
        },
    ];

    let movements = vec![
        Movement {
            id: Uuid::new_v4(),
            product_id: perlada_25,
            product_name: "Arena Perlada 25 kg".to_string(),
            movement_type: MovementType::Entry,
            quantity: 30,
            reason: "Abastecimiento mensual".to_string(),
            notes: None,
            user_name: "Ana".to_string(),
            occurred_at: ts(2024, 6, 30, 8, 0),
            reference: "ENT-2024-001".to_string(),
        },
        Movement {
            id: Uuid::new_v4(),
            product_id: perlada_50,
            product_name: "Arena Perlada 50 kg".to_string(),
            movement_type: MovementType::Exit,
            quantity: 1,
            reason: "Venta".to_string(),
            notes: None,
            user_name: "Pedro".to_string(),
            occurred_at: ts(2024, 7, 1, 11, 45),
            reference: "SAL-2024-001".to_string(),
        },
        Movement {
            id: Uuid::new_v4(),
            product_id: granulada_25,
            product_name: "Arena Granulada 25 kg".to_string(),
            movement_type: MovementType::Exit,
            quantity: 2,
            reason: "Venta".to_string(),
            notes: None,
            user_name: "Juan".to_string(),
            occurred_at: ts(2024, 7, 2, 9, 15),
            reference: "SAL-2024-002".to_string(),
        },
        Movement {
            id: Uuid::new_v4(),
            product_id: perlada_10,
            product_name: "Arena Perlada 10 kg".to_string(),
            movement_type: MovementType::Exit,
            quantity: 5,
            reason: "Venta".to_string(),
            notes: None,
            user_name: "Eduardo".to_string(),
            occurred_at: ts(2024, 7, 3, 15, 0),
            reference: "SAL-2024-003".to_string(),
        },
        Movement {
            id: Uuid::new_v4(),
            product_id: fina_5,
            product_name: "Arena Fina 5 kg".to_string(),
            movement_type: MovementType::Entry,
            quantity: 50,
            reason: "Compra".to_string(),
            notes: None,
            user_name: "María".to_string(),
            occurred_at: ts(2024, 7, 3, 16, 20),
            reference: "ENT-2024-002".to_string(),
        },
    ];

    let users = vec![
        User {
            id: Uuid::new_v4(),
            name: "Eduardo".to_string(),
            username: "admin".to_string(),
            email: "admin@econoarena.com".to_string(),
            role: Role::Admin,
            status: UserStatus::Active,
            last_access: Some(ts(2024, 7, 7, 8, 0)),
            created_at: ts(2024, 1, 1, 0, 0),
        },
        User {
            id: Uuid::new_v4(),
            name: "María Operadora".to_string(),
            username: "operator".to_string(),
            email: "operator@econoarena.com".to_string(),
            role: Role::Operator,
            status: UserStatus::Active,
            last_access: Some(ts(2024, 7, 7, 7, 30)),
            created_at: ts(2024, 1, 15, 0, 0),
        },
        User {
            id: Uuid::new_v4(),
            name: "Juan Visualizador".to_string(),
            username: "viewer".to_string(),
            email: "viewer@econoarena.com".to_string(),
            role: Role::Viewer,
            status: UserStatus::Active,
            last_access: Some(ts(2024, 7, 6, 16, 0)),
            created_at: ts(2024, 2, 1, 0, 0),
        },
        User {
            id: Uuid::new_v4(),
            name: "Carlos Almacén".to_string(),
            username: "carlos".to_string(),
            email: "almacen@econoarena.com".to_string(),
            role: Role::Operator,
            status: UserStatus::Inactive,
            last_access: Some(ts(2024, 6, 28, 16, 0)),
            created_at: ts(2024, 3, 1, 0, 0),
        },
    ];

    StoreSnapshot {
        products,
        movements,
        users,
        categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        locations: DEFAULT_LOCATIONS.iter().map(|l| l.to_string()).collect(),
    }
}
