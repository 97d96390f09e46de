//! User directory service
//!
//! Accounts are directory entries only. Authentication happens elsewhere;
//! the ledger keeps names for movement attribution and role metadata for
//! the access matrix.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, Role, User, UserStatus, UserUpdate};
use crate::store::InventoryStore;
use crate::validation;

/// Headcount summary of the directory
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub admins: usize,
    pub operators: usize,
    pub viewers: usize,
}

/// Manages the user directory
pub struct UserDirectoryService<S: InventoryStore> {
    store: Arc<S>,
}

impl<S: InventoryStore> Clone for UserDirectoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: InventoryStore> UserDirectoryService<S> {
    /// Create a new UserDirectoryService instance
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        self.store.list_users()
    }

    pub fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.store
            .get_user(id)?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    /// Add a user. New accounts start active with no recorded access.
    pub fn add_user(&self, input: NewUser) -> AppResult<User> {
        if let Err(msg) = validation::validate_person_name(&input.name) {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
                message_es: "El nombre es requerido".to_string(),
            });
        }
        if let Err(msg) = validation::validate_username(&input.username) {
            return Err(AppError::Validation {
                field: "username".to_string(),
                message: msg.to_string(),
                message_es: "El nombre de usuario debe tener al menos 3 caracteres".to_string(),
            });
        }
        if let Err(msg) = validation::validate_email(&input.email) {
            return Err(AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
                message_es: "El correo electrónico no es válido".to_string(),
            });
        }

        let username = input.username.trim().to_string();
        if self
            .store
            .list_users()?
            .iter()
            .any(|u| u.username == username)
        {
            return Err(AppError::Conflict {
                resource: "username".to_string(),
                message: "Username is already taken".to_string(),
                message_es: "El nombre de usuario ya está en uso".to_string(),
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            username,
            email: input.email.trim().to_string(),
            role: input.role,
            status: UserStatus::Active,
            last_access: None,
            created_at: Utc::now(),
        };
        let user = self.store.insert_user(user)?;
        tracing::info!("User {} added with role {}", user.username, user.role.as_str());
        Ok(user)
    }

    pub fn update_user(&self, id: Uuid, update: UserUpdate) -> AppResult<User> {
        let update = UserUpdate {
            name: update.name.map(|n| n.trim().to_string()),
            username: update.username.map(|u| u.trim().to_string()),
            email: update.email.map(|e| e.trim().to_string()),
            ..update
        };

        if let Some(name) = &update.name {
            if let Err(msg) = validation::validate_person_name(name) {
                return Err(AppError::Validation {
                    field: "name".to_string(),
                    message: msg.to_string(),
                    message_es: "El nombre es requerido".to_string(),
                });
            }
        }
        if let Some(username) = &update.username {
            if let Err(msg) = validation::validate_username(username) {
                return Err(AppError::Validation {
                    field: "username".to_string(),
                    message: msg.to_string(),
                    message_es: "El nombre de usuario debe tener al menos 3 caracteres"
                        .to_string(),
                });
            }
            if self
                .store
                .list_users()?
                .iter()
                .any(|u| u.id != id && &u.username == username)
            {
                return Err(AppError::Conflict {
                    resource: "username".to_string(),
                    message: "Username is already taken".to_string(),
                    message_es: "El nombre de usuario ya está en uso".to_string(),
                });
            }
        }
        if let Some(email) = &update.email {
            if let Err(msg) = validation::validate_email(email) {
                return Err(AppError::Validation {
                    field: "email".to_string(),
                    message: msg.to_string(),
                    message_es: "El correo electrónico no es válido".to_string(),
                });
            }
        }

        self.store.update_user(id, update)
    }

    pub fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.store.delete_user(id)?;
        tracing::info!("User {} deleted", id);
        Ok(())
    }

    /// Flip an account between active and inactive
    pub fn toggle_status(&self, id: Uuid) -> AppResult<User> {
        let user = self.get_user(id)?;
        self.store.update_user(
            id,
            UserUpdate {
                status: Some(user.status.toggled()),
                ..Default::default()
            },
        )
    }

    /// Stamp the last access time of an account
    pub fn record_access(&self, id: Uuid, when: DateTime<Utc>) -> AppResult<User> {
        self.store.update_user(
            id,
            UserUpdate {
                last_access: Some(when),
                ..Default::default()
            },
        )
    }

    pub fn stats(&self) -> AppResult<UserStats> {
        let users = self.store.list_users()?;
        Ok(UserStats {
            total: users.len(),
            active: users
                .iter()
                .filter(|u| u.status == UserStatus::Active)
                .count(),
            inactive: users
                .iter()
                .filter(|u| u.status == UserStatus::Inactive)
                .count(),
            admins: users.iter().filter(|u| u.role == Role::Admin).count(),
            operators: users.iter().filter(|u| u.role == Role::Operator).count(),
            viewers: users.iter().filter(|u| u.role == Role::Viewer).count(),
        })
    }
}
