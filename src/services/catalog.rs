//! Product catalog service
//!
//! Product lifecycle plus the category and location registries. Creating a
//! product with opening stock records a regular entry movement for it, so
//! the movement log accounts for every unit a product has ever held.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::InventoryConfig;
use crate::error::{AppError, AppResult};
use crate::models::{
    MovementInput, MovementType, NewProduct, Product, ProductUpdate, REASON_INITIAL_STOCK,
};
use crate::services::LedgerService;
use crate::store::InventoryStore;
use crate::validation;

/// Manages products and the category/location registries
pub struct CatalogService<S: InventoryStore> {
    store: Arc<S>,
    ledger: LedgerService<S>,
}

impl<S: InventoryStore> Clone for CatalogService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ledger: self.ledger.clone(),
        }
    }
}

impl<S: InventoryStore> CatalogService<S> {
    /// Create a new CatalogService instance
    pub fn new(store: Arc<S>, config: &InventoryConfig) -> Self {
        let ledger = LedgerService::new(Arc::clone(&store), config);
        Self { store, ledger }
    }

    pub fn list_products(&self) -> AppResult<Vec<Product>> {
        self.store.list_products()
    }

    pub fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.store
            .get_product(id)?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Create a product
    ///
    /// When `initial_stock` is greater than zero an opening entry movement
    /// is recorded on behalf of `acting_user` ("Sistema" when absent), and
    /// the returned product already carries that stock.
    pub fn create_product(
        &self,
        input: NewProduct,
        acting_user: Option<&str>,
    ) -> AppResult<Product> {
        if let Err(msg) = validation::validate_product_name(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_es: "El nombre del producto no es válido".to_string(),
            });
        }
        if let Err(msg) = validation::validate_sku(&input.sku) {
            return Err(AppError::Validation {
                field: "sku".to_string(),
                message: msg.to_string(),
                message_es: "El SKU no es válido".to_string(),
            });
        }
        if let Err(msg) = validation::validate_price(input.price) {
            return Err(AppError::Validation {
                field: "price".to_string(),
                message: msg.to_string(),
                message_es: "El precio no puede ser negativo".to_string(),
            });
        }

        let sku = input.sku.trim().to_string();
        if self.store.list_products()?.iter().any(|p| p.sku == sku) {
            return Err(AppError::Conflict {
                resource: "sku".to_string(),
                message: "A product with this SKU already exists".to_string(),
                message_es: "Ya existe un producto con este SKU".to_string(),
            });
        }

        let product = Product {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            sku,
            description: input.description,
            category: input.category,
            location: input.location,
            price: input.price,
            stock: 0,
            min_stock: input.min_stock,
            created_at: Utc::now(),
            last_movement: None,
        };
        let mut product = self.store.insert_product(product)?;

        if input.initial_stock > 0 {
            let (updated, _) = self.ledger.apply(MovementInput {
                product_id: product.id,
                movement_type: MovementType::Entry,
                quantity: input.initial_stock,
                reason: REASON_INITIAL_STOCK.to_string(),
                notes: None,
                user_name: acting_user.map(|u| u.to_string()),
                occurred_at: None,
            })?;
            product = updated;
        }

        tracing::info!("Product {} created ({})", product.name, product.sku);
        Ok(product)
    }

    /// Update product master data. Stock cannot be edited here; it only
    /// changes through movements.
    pub fn update_product(&self, id: Uuid, update: ProductUpdate) -> AppResult<Product> {
        let update = ProductUpdate {
            name: update.name.map(|n| n.trim().to_string()),
            sku: update.sku.map(|s| s.trim().to_string()),
            ..update
        };

        if let Some(name) = &update.name {
            if let Err(msg) = validation::validate_product_name(name) {
                return Err(AppError::Validation {
                    field: "name".to_string(),
                    message: msg.to_string(),
                    message_es: "El nombre del producto no es válido".to_string(),
                });
            }
        }
        if let Some(sku) = &update.sku {
            if let Err(msg) = validation::validate_sku(sku) {
                return Err(AppError::Validation {
                    field: "sku".to_string(),
                    message: msg.to_string(),
                    message_es: "El SKU no es válido".to_string(),
                });
            }
            if self
                .store
                .list_products()?
                .iter()
                .any(|p| p.id != id && &p.sku == sku)
            {
                return Err(AppError::Conflict {
                    resource: "sku".to_string(),
                    message: "A product with this SKU already exists".to_string(),
                    message_es: "Ya existe un producto con este SKU".to_string(),
                });
            }
        }
        if let Some(price) = update.price {
            if let Err(msg) = validation::validate_price(price) {
                return Err(AppError::Validation {
                    field: "price".to_string(),
                    message: msg.to_string(),
                    message_es: "El precio no puede ser negativo".to_string(),
                });
            }
        }

        self.store.update_product(id, update)
    }

    /// Delete a product together with its movement history.
    /// Returns how many movements were removed.
    pub fn delete_product(&self, id: Uuid) -> AppResult<usize> {
        let removed = self.store.delete_product(id)?;
        tracing::info!("Product {} deleted along with {} movements", id, removed);
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Category registry
    // ------------------------------------------------------------------

    pub fn list_categories(&self) -> AppResult<Vec<String>> {
        self.store.list_categories()
    }

    pub fn add_category(&self, name: &str) -> AppResult<()> {
        let name = name.trim();
        if let Err(msg) = validation::validate_registry_name(name) {
            return Err(AppError::Validation {
                field: "category".to_string(),
                message: msg.to_string(),
                message_es: "El nombre de la categoría no es válido".to_string(),
            });
        }
        self.store.add_category(name)
    }

    /// Rename a category; products using it follow the new name
    pub fn rename_category(&self, from: &str, to: &str) -> AppResult<usize> {
        let to = to.trim();
        if let Err(msg) = validation::validate_registry_name(to) {
            return Err(AppError::Validation {
                field: "category".to_string(),
                message: msg.to_string(),
                message_es: "El nombre de la categoría no es válido".to_string(),
            });
        }
        let updated = self.store.rename_category(from, to)?;
        tracing::info!(
            "Category {} renamed to {}, {} products updated",
            from,
            to,
            updated
        );
        Ok(updated)
    }

    /// Remove a category; refused while products still use it
    pub fn remove_category(&self, name: &str) -> AppResult<()> {
        self.store.remove_category(name)
    }

    // ------------------------------------------------------------------
    // Location registry
    // ------------------------------------------------------------------

    pub fn list_locations(&self) -> AppResult<Vec<String>> {
        self.store.list_locations()
    }

    pub fn add_location(&self, name: &str) -> AppResult<()> {
        let name = name.trim();
        if let Err(msg) = validation::validate_registry_name(name) {
            return Err(AppError::Validation {
                field: "location".to_string(),
                message: msg.to_string(),
                message_es: "El nombre de la ubicación no es válido".to_string(),
            });
        }
        self.store.add_location(name)
    }

    /// Rename a location; products using it follow the new name
    pub fn rename_location(&self, from: &str, to: &str) -> AppResult<usize> {
        let to = to.trim();
        if let Err(msg) = validation::validate_registry_name(to) {
            return Err(AppError::Validation {
                field: "location".to_string(),
                message: msg.to_string(),
                message_es: "El nombre de la ubicación no es válido".to_string(),
            });
        }
        let updated = self.store.rename_location(from, to)?;
        tracing::info!(
            "Location {} renamed to {}, {} products updated",
            from,
            to,
            updated
        );
        Ok(updated)
    }

    /// Remove a location; refused while products still use it
    pub fn remove_location(&self, name: &str) -> AppResult<()> {
        self.store.remove_location(name)
    }
}
