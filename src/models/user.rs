//! User and role models
//!
//! The ledger keeps a user directory for attribution and access control
//! metadata. Credentials and sessions live outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account in the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub last_access: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for adding a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Input for updating a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub last_access: Option<DateTime<Utc>>,
}

/// Access roles, from most to least privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
    Viewer,
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

/// Application areas a role can be granted access to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Dashboard,
    Inventory,
    Movements,
    Reports,
    Analysis,
    Security,
    Settings,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Viewer => "viewer",
        }
    }

    /// Whether this role can access the given application area
    pub fn allows(&self, module: Module) -> bool {
        match self {
            Role::Admin => true,
            Role::Operator => matches!(
                module,
                Module::Dashboard
                    | Module::Inventory
                    | Module::Movements
                    | Module::Reports
                    | Module::Analysis
            ),
            Role::Viewer => matches!(
                module,
                Module::Dashboard | Module::Reports | Module::Analysis
            ),
        }
    }
}

impl UserStatus {
    /// The opposite status
    pub fn toggled(&self) -> UserStatus {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }
}
