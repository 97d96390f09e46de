//! Error handling for the EconoArena inventory ledger
//!
//! Provides consistent error payloads in Spanish and English

use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        resource: String,
        message: String,
        message_es: String,
    },

    // Business logic errors
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    // Concurrent writers raced on the same product
    #[error("Concurrent modification detected on {resource}")]
    ConcurrencyConflict { resource: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } | AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict { .. } => "CONFLICT",
            AppError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            AppError::ConcurrencyConflict { .. } => "CONCURRENCY_CONFLICT",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Bilingual detail payload for API layers and logs
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation {
                field,
                message,
                message_es,
            } => ErrorDetail {
                code: self.code().to_string(),
                message_en: message.clone(),
                message_es: message_es.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: self.code().to_string(),
                message_en: msg.clone(),
                message_es: format!("Datos inválidos: {}", msg),
                field: None,
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: self.code().to_string(),
                message_en: format!("{} not found", resource),
                message_es: format!("No se encontró: {}", resource),
                field: None,
            },
            AppError::Conflict {
                resource,
                message,
                message_es,
            } => ErrorDetail {
                code: self.code().to_string(),
                message_en: message.clone(),
                message_es: message_es.clone(),
                field: Some(resource.clone()),
            },
            AppError::InsufficientStock {
                product,
                requested,
                available,
            } => ErrorDetail {
                code: self.code().to_string(),
                message_en: format!(
                    "Insufficient stock for {}: requested {}, available {}",
                    product, requested, available
                ),
                message_es: format!(
                    "Stock insuficiente para {}: solicitado {}, disponible {}",
                    product, requested, available
                ),
                field: None,
            },
            AppError::ConcurrencyConflict { resource } => ErrorDetail {
                code: self.code().to_string(),
                message_en: format!("Concurrent modification detected on {}", resource),
                message_es: format!("Modificación concurrente detectada en {}", resource),
                field: None,
            },
            AppError::StorageError(msg) => ErrorDetail {
                code: self.code().to_string(),
                message_en: format!("Storage error: {}", msg),
                message_es: format!("Error de almacenamiento: {}", msg),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: self.code().to_string(),
                message_en: format!("Configuration error: {}", msg),
                message_es: format!("Error de configuración: {}", msg),
                field: None,
            },
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
