//! Persistence boundary for the inventory ledger
//!
//! Services talk to storage only through [`InventoryStore`]. The trait keeps
//! reads simple and funnels every stock change through one atomic operation,
//! so a movement record and the stock level it produces can never drift
//! apart.

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Movement, Product, ProductUpdate, User, UserUpdate};

pub mod memory;
pub mod seed;

pub use memory::{MemoryStore, StoreSnapshot};

/// Storage operations required by the ledger services
pub trait InventoryStore: Send + Sync {
    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// All products in insertion order
    fn list_products(&self) -> AppResult<Vec<Product>>;

    fn get_product(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Insert a new product; the id must not already exist
    fn insert_product(&self, product: Product) -> AppResult<Product>;

    /// Apply master-data changes to a product. Stock is not part of
    /// [`ProductUpdate`] and is left untouched.
    fn update_product(&self, id: Uuid, update: ProductUpdate) -> AppResult<Product>;

    /// Delete a product and every movement that references it.
    /// Returns how many movements were removed.
    fn delete_product(&self, id: Uuid) -> AppResult<usize>;

    // ------------------------------------------------------------------
    // Movements
    // ------------------------------------------------------------------

    /// All movements in recording order
    fn list_movements(&self) -> AppResult<Vec<Movement>>;

    fn movements_for_product(&self, product_id: Uuid) -> AppResult<Vec<Movement>>;

    /// Persist a movement and set the product's stock in one unit.
    ///
    /// The write only happens when the product's current stock still equals
    /// `expected_stock`; otherwise nothing is stored and
    /// [`crate::error::AppError::ConcurrencyConflict`] is returned so the
    /// caller can re-read and retry. On success the product's stock becomes
    /// `new_stock` and its `last_movement` is set to the movement's
    /// timestamp.
    fn apply_stock_movement(
        &self,
        movement: Movement,
        expected_stock: u32,
        new_stock: u32,
    ) -> AppResult<(Product, Movement)>;

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    fn list_users(&self) -> AppResult<Vec<User>>;

    fn get_user(&self, id: Uuid) -> AppResult<Option<User>>;

    fn insert_user(&self, user: User) -> AppResult<User>;

    fn update_user(&self, id: Uuid, update: UserUpdate) -> AppResult<User>;

    fn delete_user(&self, id: Uuid) -> AppResult<()>;

    // ------------------------------------------------------------------
    // Category and location registries
    // ------------------------------------------------------------------

    fn list_categories(&self) -> AppResult<Vec<String>>;

    fn add_category(&self, name: &str) -> AppResult<()>;

    /// Rename a category and re-point every product that uses it.
    /// Returns how many products were updated.
    fn rename_category(&self, from: &str, to: &str) -> AppResult<usize>;

    /// Remove a category. Fails while any product still uses it.
    fn remove_category(&self, name: &str) -> AppResult<()>;

    fn list_locations(&self) -> AppResult<Vec<String>>;

    fn add_location(&self, name: &str) -> AppResult<()>;

    /// Rename a location and re-point every product that uses it.
    /// Returns how many products were updated.
    fn rename_location(&self, from: &str, to: &str) -> AppResult<usize>;

    /// Remove a location. Fails while any product still uses it.
    fn remove_location(&self, name: &str) -> AppResult<()>;
}
