//! In-memory reference implementation of [`InventoryStore`]
//!
//! State lives behind a single `RwLock`, which makes the paired
//! movement-plus-stock write naturally atomic: the compare-and-swap check
//! and both mutations happen under one write guard. The whole state can be
//! exported and restored as a JSON snapshot.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Movement, Product, ProductUpdate, User, UserUpdate};
use crate::store::{seed, InventoryStore};

/// Serializable image of the full store state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub movements: Vec<Movement>,
    pub users: Vec<User>,
    pub categories: Vec<String>,
    pub locations: Vec<String>,
}

/// In-memory store
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<StoreSnapshot>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreSnapshot::default()),
        }
    }

    /// Create an empty store with the standard category and location registries
    pub fn with_defaults() -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write().unwrap();
            inner.categories = seed::DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
            inner.locations = seed::DEFAULT_LOCATIONS.iter().map(|l| l.to_string()).collect();
        }
        store
    }

    /// Create a store from a previously exported snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    /// Clone the full store state
    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.read().unwrap().clone()
    }

    /// Replace the full store state
    pub fn restore(&self, snapshot: StoreSnapshot) {
        *self.inner.write().unwrap() = snapshot;
    }

    /// Export the store state as JSON
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(&self.snapshot()).map_err(|e| AppError::StorageError(e.to_string()))
    }

    /// Build a store from a JSON export
    pub fn from_json(json: &str) -> AppResult<Self> {
        let snapshot: StoreSnapshot =
            serde_json::from_str(json).map_err(|e| AppError::StorageError(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore for MemoryStore {
    fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.inner.read().unwrap().products.clone())
    }

    fn get_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    fn insert_product(&self, product: Product) -> AppResult<Product> {
        let mut inner = self.inner.write().unwrap();
        if inner.products.iter().any(|p| p.id == product.id) {
            return Err(AppError::Conflict {
                resource: "product".to_string(),
                message: "A product with this id already exists".to_string(),
                message_es: "Ya existe un producto con este ID".to_string(),
            });
        }
        inner.products.push(product.clone());
        Ok(product)
    }

    fn update_product(&self, id: Uuid, update: ProductUpdate) -> AppResult<Product> {
        let mut inner = self.inner.write().unwrap();
        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(sku) = update.sku {
            product.sku = sku;
        }
        if let Some(description) = update.description {
            product.description = Some(description);
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(location) = update.location {
            product.location = location;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(min_stock) = update.min_stock {
            product.min_stock = Some(min_stock);
        }

        Ok(product.clone())
    }

    fn delete_product(&self, id: Uuid) -> AppResult<usize> {
        let mut guard = self.inner.write().unwrap();
        let inner = &mut *guard;
        let idx = inner
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
        inner.products.remove(idx);

        let before = inner.movements.len();
        inner.movements.retain(|m| m.product_id != id);
        Ok(before - inner.movements.len())
    }

    fn list_movements(&self) -> AppResult<Vec<Movement>> {
        Ok(self.inner.read().unwrap().movements.clone())
    }

    fn movements_for_product(&self, product_id: Uuid) -> AppResult<Vec<Movement>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .cloned()
            .collect())
    }

    fn apply_stock_movement(
        &self,
        movement: Movement,
        expected_stock: u32,
        new_stock: u32,
    ) -> AppResult<(Product, Movement)> {
        let mut guard = self.inner.write().unwrap();
        let inner = &mut *guard;

        // A racing writer may have minted the same reference code
        if inner.movements.iter().any(|m| m.reference == movement.reference) {
            return Err(AppError::ConcurrencyConflict {
                resource: format!("movement reference {}", movement.reference),
            });
        }

        let product = inner
            .products
            .iter_mut()
            .find(|p| p.id == movement.product_id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if product.stock != expected_stock {
            return Err(AppError::ConcurrencyConflict {
                resource: product.name.clone(),
            });
        }

        product.stock = new_stock;
        product.last_movement = Some(movement.occurred_at);
        let updated = product.clone();
        inner.movements.push(movement.clone());

        Ok((updated, movement))
    }

    fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.inner.read().unwrap().users.clone())
    }

    fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    fn insert_user(&self, user: User) -> AppResult<User> {
        let mut inner = self.inner.write().unwrap();
        if inner.users.iter().any(|u| u.id == user.id) {
            return Err(AppError::Conflict {
                resource: "user".to_string(),
                message: "A user with this id already exists".to_string(),
                message_es: "Ya existe un usuario con este ID".to_string(),
            });
        }
        inner.users.push(user.clone());
        Ok(user)
    }

    fn update_user(&self, id: Uuid, update: UserUpdate) -> AppResult<User> {
        let mut inner = self.inner.write().unwrap();
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        if let Some(last_access) = update.last_access {
            user.last_access = Some(last_access);
        }

        Ok(user.clone())
    }

    fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        let idx = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;
        inner.users.remove(idx);
        Ok(())
    }

    fn list_categories(&self) -> AppResult<Vec<String>> {
        Ok(self.inner.read().unwrap().categories.clone())
    }

    fn add_category(&self, name: &str) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.categories.iter().any(|c| c == name) {
            return Err(AppError::Conflict {
                resource: "category".to_string(),
                message: "Category already exists".to_string(),
                message_es: "La categoría ya existe".to_string(),
            });
        }
        inner.categories.push(name.to_string());
        Ok(())
    }

    fn rename_category(&self, from: &str, to: &str) -> AppResult<usize> {
        let mut guard = self.inner.write().unwrap();
        let inner = &mut *guard;
        let idx = inner
            .categories
            .iter()
            .position(|c| c == from)
            .ok_or_else(|| AppError::NotFound("Category".to_string()))?;
        if to != from && inner.categories.iter().any(|c| c == to) {
            return Err(AppError::Conflict {
                resource: "category".to_string(),
                message: "Category already exists".to_string(),
                message_es: "La categoría ya existe".to_string(),
            });
        }

        inner.categories[idx] = to.to_string();
        let mut updated = 0;
        for product in inner.products.iter_mut().filter(|p| p.category == from) {
            product.category = to.to_string();
            updated += 1;
        }
        Ok(updated)
    }

    fn remove_category(&self, name: &str) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        if !inner.categories.iter().any(|c| c == name) {
            return Err(AppError::NotFound("Category".to_string()));
        }
        if inner.products.iter().any(|p| p.category == name) {
            return Err(AppError::Conflict {
                resource: "category".to_string(),
                message: "Category is in use by existing products".to_string(),
                message_es: "No se puede eliminar la categoría porque tiene productos asignados"
                    .to_string(),
            });
        }
        inner.categories.retain(|c| c != name);
        Ok(())
    }

    fn list_locations(&self) -> AppResult<Vec<String>> {
        Ok(self.inner.read().unwrap().locations.clone())
    }

    fn add_location(&self, name: &str) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.locations.iter().any(|l| l == name) {
            return Err(AppError::Conflict {
                resource: "location".to_string(),
                message: "Location already exists".to_string(),
                message_es: "La ubicación ya existe".to_string(),
            });
        }
        inner.locations.push(name.to_string());
        Ok(())
    }

    fn rename_location(&self, from: &str, to: &str) -> AppResult<usize> {
        let mut guard = self.inner.write().unwrap();
        let inner = &mut *guard;
        let idx = inner
            .locations
            .iter()
            .position(|l| l == from)
            .ok_or_else(|| AppError::NotFound("Location".to_string()))?;
        if to != from && inner.locations.iter().any(|l| l == to) {
            return Err(AppError::Conflict {
                resource: "location".to_string(),
                message: "Location already exists".to_string(),
                message_es: "La ubicación ya existe".to_string(),
            });
        }

        inner.locations[idx] = to.to_string();
        let mut updated = 0;
        for product in inner.products.iter_mut().filter(|p| p.location == from) {
            product.location = to.to_string();
            updated += 1;
        }
        Ok(updated)
    }

    fn remove_location(&self, name: &str) -> AppResult<()> {
        let mut inner = self.inner.write().unwrap();
        if !inner.locations.iter().any(|l| l == name) {
            return Err(AppError::NotFound("Location".to_string()));
        }
        if inner.products.iter().any(|p| p.location == name) {
            return Err(AppError::Conflict {
                resource: "location".to_string(),
                message: "Location is in use by existing products".to_string(),
                message_es: "No se puede eliminar la ubicación porque tiene productos asignados"
                    .to_string(),
            });
        }
        inner.locations.retain(|l| l != name);
        Ok(())
    }
}
