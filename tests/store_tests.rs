//! Storage boundary tests
//!
//! Tests for the in-memory store including:
//! - Atomic movement-plus-stock writes with compare-and-swap
//! - Duplicate reference rejection
//! - Cascade deletes
//! - JSON snapshot export and restore
//! - Wire format of the Spanish-facing enums

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use econoarena_ledger::error::AppError;
use econoarena_ledger::models::{
    Movement, MovementType, Product, ProductUpdate, Role, User, UserStatus,
};
use econoarena_ledger::store::{seed, InventoryStore, MemoryStore, StoreSnapshot};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn ts(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
}

fn product(name: &str, stock: u32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sku: name.to_string(),
        description: None,
        category: "Arena para Gatos".to_string(),
        location: "Almacén Principal".to_string(),
        price: dec("8.50"),
        stock,
        min_stock: None,
        created_at: ts(2024, 1, 1, 0, 0),
        last_movement: None,
    }
}

fn movement(product: &Product, quantity: u32, reference: &str) -> Movement {
    Movement {
        id: Uuid::new_v4(),
        product_id: product.id,
        product_name: product.name.clone(),
        movement_type: MovementType::Entry,
        quantity,
        reason: "Compra".to_string(),
        notes: None,
        user_name: "Sistema".to_string(),
        occurred_at: ts(2024, 7, 1, 10, 0),
        reference: reference.to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A successful write sets the stock, stamps the product and appends
    /// the movement
    #[test]
    fn test_apply_stock_movement_writes_both() {
        let store = MemoryStore::new();
        let p = store.insert_product(product("Arena Perlada 5 kg", 10)).unwrap();

        let (updated, stored) = store
            .apply_stock_movement(movement(&p, 5, "ENT-2024-001"), 10, 15)
            .unwrap();

        assert_eq!(updated.stock, 15);
        assert_eq!(updated.last_movement, Some(stored.occurred_at));
        assert_eq!(store.list_movements().unwrap().len(), 1);
        assert_eq!(store.movements_for_product(p.id).unwrap().len(), 1);
    }

    /// A stale expected stock writes nothing
    #[test]
    fn test_apply_checks_expected_stock() {
        let store = MemoryStore::new();
        let p = store.insert_product(product("Arena Perlada 5 kg", 10)).unwrap();

        let err = store
            .apply_stock_movement(movement(&p, 5, "ENT-2024-001"), 7, 2)
            .unwrap_err();

        assert!(matches!(err, AppError::ConcurrencyConflict { .. }));
        assert_eq!(store.get_product(p.id).unwrap().unwrap().stock, 10);
        assert!(store.list_movements().unwrap().is_empty());
    }

    /// A reference can only be stored once
    #[test]
    fn test_apply_rejects_duplicate_reference() {
        let store = MemoryStore::new();
        let p = store.insert_product(product("Arena Perlada 5 kg", 10)).unwrap();
        store
            .apply_stock_movement(movement(&p, 5, "ENT-2024-001"), 10, 15)
            .unwrap();

        let err = store
            .apply_stock_movement(movement(&p, 3, "ENT-2024-001"), 15, 18)
            .unwrap_err();

        assert!(matches!(err, AppError::ConcurrencyConflict { .. }));
        assert_eq!(store.get_product(p.id).unwrap().unwrap().stock, 15);
        assert_eq!(store.list_movements().unwrap().len(), 1);
    }

    /// Inserting the same product id twice conflicts
    #[test]
    fn test_insert_duplicate_product_id() {
        let store = MemoryStore::new();
        let p = store.insert_product(product("Arena Perlada 5 kg", 10)).unwrap();

        let err = store.insert_product(p).unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    /// Updates touch master data only; stock stays as written by movements
    #[test]
    fn test_update_product_leaves_stock() {
        let store = MemoryStore::new();
        let p = store.insert_product(product("Arena Perlada 5 kg", 42)).unwrap();

        let updated = store
            .update_product(
                p.id,
                ProductUpdate {
                    name: Some("Arena Premium".to_string()),
                    sku: Some("AP-PREMIUM".to_string()),
                    description: Some("Perlas de sílice".to_string()),
                    category: Some("Higiene".to_string()),
                    location: Some("Tienda".to_string()),
                    price: Some(dec("12.00")),
                    min_stock: Some(9),
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Arena Premium");
        assert_eq!(updated.description.as_deref(), Some("Perlas de sílice"));
        assert_eq!(updated.stock, 42);
    }

    /// Deleting a product removes its movements and reports the count
    #[test]
    fn test_delete_product_cascades() {
        let store = MemoryStore::new();
        let p1 = store.insert_product(product("Arena Perlada 5 kg", 0)).unwrap();
        let p2 = store.insert_product(product("Arena Fina 5 kg", 0)).unwrap();
        store.apply_stock_movement(movement(&p1, 5, "ENT-2024-001"), 0, 5).unwrap();
        store.apply_stock_movement(movement(&p1, 3, "ENT-2024-002"), 5, 8).unwrap();
        store.apply_stock_movement(movement(&p2, 9, "ENT-2024-003"), 0, 9).unwrap();

        let removed = store.delete_product(p1.id).unwrap();

        assert_eq!(removed, 2);
        let remaining = store.list_movements().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_id, p2.id);
    }

    /// The default registries come preloaded
    #[test]
    fn test_with_defaults_registries() {
        let store = MemoryStore::with_defaults();

        let categories = store.list_categories().unwrap();
        let locations = store.list_locations().unwrap();

        assert_eq!(categories.len(), 5);
        assert!(categories.contains(&"Arena para Gatos".to_string()));
        assert_eq!(locations.len(), 4);
        assert!(locations.contains(&"Almacén Principal".to_string()));
    }

    /// Renaming a registry entry onto an existing one conflicts
    #[test]
    fn test_rename_category_to_existing() {
        let store = MemoryStore::with_defaults();

        let err = store.rename_category("Juguetes", "Higiene").unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    /// The snapshot survives a JSON round trip intact
    #[test]
    fn test_snapshot_json_round_trip() {
        let store = seed::demo_store();
        let original = store.snapshot();

        let json = store.to_json().unwrap();
        let restored = MemoryStore::from_json(&json).unwrap().snapshot();

        assert_eq!(restored.products.len(), original.products.len());
        for (restored_product, original_product) in
            restored.products.iter().zip(&original.products)
        {
            assert_eq!(restored_product.id, original_product.id);
            assert_eq!(restored_product.sku, original_product.sku);
            assert_eq!(restored_product.stock, original_product.stock);
            assert_eq!(restored_product.price, original_product.price);
            assert_eq!(restored_product.last_movement, original_product.last_movement);
        }
        let restored_refs: Vec<&str> =
            restored.movements.iter().map(|m| m.reference.as_str()).collect();
        let original_refs: Vec<&str> =
            original.movements.iter().map(|m| m.reference.as_str()).collect();
        assert_eq!(restored_refs, original_refs);
        assert_eq!(restored.users.len(), original.users.len());
        assert_eq!(restored.categories, original.categories);
        assert_eq!(restored.locations, original.locations);
    }

    /// Restore swaps the whole state
    #[test]
    fn test_restore_replaces_state() {
        let store = MemoryStore::new();
        store.insert_product(product("Arena Perlada 5 kg", 10)).unwrap();

        store.restore(StoreSnapshot::default());

        assert!(store.list_products().unwrap().is_empty());
    }

    /// Broken JSON reports a storage error
    #[test]
    fn test_from_json_garbage() {
        let err = MemoryStore::from_json("{not json").unwrap_err();
        assert!(matches!(err, AppError::StorageError(_)));
    }

    /// Movement directions speak Spanish on the wire
    #[test]
    fn test_wire_format() {
        let p = product("Arena Perlada 5 kg", 10);
        let m = movement(&p, 5, "ENT-2024-001");

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["type"], "entrada");
        assert_eq!(value["reference"], "ENT-2024-001");

        let user = User {
            id: Uuid::new_v4(),
            name: "María".to_string(),
            username: "maria".to_string(),
            email: "maria@econoarena.com".to_string(),
            role: Role::Operator,
            status: UserStatus::Active,
            last_access: None,
            created_at: ts(2024, 1, 1, 0, 0),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "operator");
        assert_eq!(value["status"], "active");

        let parsed: Movement = serde_json::from_value(serde_json::to_value(&m).unwrap()).unwrap();
        assert_eq!(parsed.movement_type, MovementType::Entry);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any product list survives the JSON round trip
        #[test]
        fn prop_snapshot_round_trip_preserves_products(
            specs in prop::collection::vec((0u32..=10000, 1i64..=100000), 0..15)
        ) {
            let products: Vec<Product> = specs
                .iter()
                .enumerate()
                .map(|(i, (stock, cents))| {
                    let mut p = product(&format!("Producto {}", i), *stock);
                    p.sku = format!("SKU-{:03}", i);
                    p.price = Decimal::new(*cents, 2);
                    p
                })
                .collect();
            let store = MemoryStore::from_snapshot(StoreSnapshot {
                products: products.clone(),
                ..Default::default()
            });

            let restored = MemoryStore::from_json(&store.to_json().unwrap())
                .unwrap()
                .snapshot();

            prop_assert_eq!(restored.products.len(), products.len());
            for (restored_product, original_product) in restored.products.iter().zip(&products) {
                prop_assert_eq!(restored_product.id, original_product.id);
                prop_assert_eq!(restored_product.stock, original_product.stock);
                prop_assert_eq!(restored_product.price, original_product.price);
            }
        }
    }
}
