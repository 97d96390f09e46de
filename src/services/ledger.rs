//! Stock mutation service
//!
//! Every stock change goes through [`LedgerService::apply`]: validate the
//! input, read the product, compute the new stock level under the overdraw
//! policy, mint a reference code and hand the movement-plus-stock pair to
//! the store as one atomic write. Lost updates are prevented by
//! compare-and-swap on the stock the product was read with; a conflicting
//! write is retried against fresh state up to a bounded number of times.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::config::{InventoryConfig, OverdrawPolicy};
use crate::error::{AppError, AppResult};
use crate::models::{
    Movement, MovementInput, MovementType, Product, REASON_QUICK_ENTRY, REASON_QUICK_EXIT,
    SYSTEM_USER,
};
use crate::store::InventoryStore;
use crate::validation;

/// Applies stock movements against a store
pub struct LedgerService<S: InventoryStore> {
    store: Arc<S>,
    policy: OverdrawPolicy,
    retries: u32,
}

impl<S: InventoryStore> Clone for LedgerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            policy: self.policy,
            retries: self.retries,
        }
    }
}

impl<S: InventoryStore> LedgerService<S> {
    /// Create a new LedgerService instance
    pub fn new(store: Arc<S>, config: &InventoryConfig) -> Self {
        Self {
            store,
            policy: config.overdraw_policy,
            retries: config.apply_retries,
        }
    }

    /// The overdraw policy this service applies
    pub fn policy(&self) -> OverdrawPolicy {
        self.policy
    }

    /// Record a stock movement and update the product's stock
    ///
    /// Returns the updated product together with the stored movement.
    /// Nothing is written when validation fails, the product does not
    /// exist, or the overdraw policy rejects the exit.
    pub fn apply(&self, input: MovementInput) -> AppResult<(Product, Movement)> {
        if let Err(msg) = validation::validate_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
                message_es: "La cantidad debe ser mayor a 0".to_string(),
            });
        }
        if input.reason.trim().is_empty() {
            return Err(AppError::Validation {
                field: "reason".to_string(),
                message: "Reason is required".to_string(),
                message_es: "La razón es requerida".to_string(),
            });
        }

        let occurred_at = input.occurred_at.unwrap_or_else(Utc::now);
        let user_name = input
            .user_name
            .clone()
            .unwrap_or_else(|| SYSTEM_USER.to_string());

        let mut attempts = 0;
        loop {
            let product = self
                .store
                .get_product(input.product_id)?
                .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

            let new_stock = match input.movement_type {
                MovementType::Entry => product.stock.saturating_add(input.quantity),
                MovementType::Exit if input.quantity <= product.stock => {
                    product.stock - input.quantity
                }
                MovementType::Exit => match self.policy {
                    OverdrawPolicy::Reject => {
                        return Err(AppError::InsufficientStock {
                            product: product.name.clone(),
                            requested: input.quantity,
                            available: product.stock,
                        });
                    }
                    OverdrawPolicy::Clamp => {
                        tracing::warn!(
                            "Exit of {} exceeds stock {} for {}, clamping at zero",
                            input.quantity,
                            product.stock,
                            product.name
                        );
                        0
                    }
                },
            };

            let movement = Movement {
                id: Uuid::new_v4(),
                product_id: product.id,
                product_name: product.name.clone(),
                movement_type: input.movement_type,
                quantity: input.quantity,
                reason: input.reason.clone(),
                notes: input.notes.clone(),
                user_name: user_name.clone(),
                occurred_at,
                reference: self.next_reference(input.movement_type, occurred_at)?,
            };

            match self
                .store
                .apply_stock_movement(movement, product.stock, new_stock)
            {
                Ok((product, movement)) => {
                    tracing::info!(
                        "Movement {} applied: {} x{} for {}, stock now {}",
                        movement.reference,
                        movement.movement_type.as_str(),
                        movement.quantity,
                        product.name,
                        product.stock
                    );
                    return Ok((product, movement));
                }
                Err(AppError::ConcurrencyConflict { resource }) if attempts < self.retries => {
                    attempts += 1;
                    tracing::debug!(
                        "Concurrent update on {}, retrying ({}/{})",
                        resource,
                        attempts,
                        self.retries
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Record an entry with the quick-entry reason
    pub fn quick_entry(
        &self,
        product_id: Uuid,
        quantity: u32,
        user_name: Option<String>,
    ) -> AppResult<(Product, Movement)> {
        self.apply(MovementInput {
            product_id,
            movement_type: MovementType::Entry,
            quantity,
            reason: REASON_QUICK_ENTRY.to_string(),
            notes: None,
            user_name,
            occurred_at: None,
        })
    }

    /// Record an exit with the quick-exit reason
    pub fn quick_exit(
        &self,
        product_id: Uuid,
        quantity: u32,
        user_name: Option<String>,
    ) -> AppResult<(Product, Movement)> {
        self.apply(MovementInput {
            product_id,
            movement_type: MovementType::Exit,
            quantity,
            reason: REASON_QUICK_EXIT.to_string(),
            notes: None,
            user_name,
            occurred_at: None,
        })
    }

    /// Mint the next reference code for a movement type and year,
    /// e.g. ENT-2024-001
    ///
    /// The sequence is one past the highest sequence already recorded for
    /// that prefix and year, so references stay unique even after movements
    /// are deleted with their product.
    fn next_reference(
        &self,
        movement_type: MovementType,
        occurred_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let prefix = movement_type.reference_prefix();
        let year = occurred_at.year();
        let marker = format!("{}-{}-", prefix, year);

        let last_seq = self
            .store
            .list_movements()?
            .iter()
            .filter_map(|m| m.reference.strip_prefix(&marker))
            .filter_map(|seq| seq.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        Ok(format!("{}-{}-{:03}", prefix, year, last_seq + 1))
    }
}
