//! Validation utilities for the EconoArena inventory ledger
//!
//! Field rules shared by the catalog and directory services.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Maximum length of a product name
pub const PRODUCT_NAME_MAX: usize = 100;

/// Maximum length of a SKU
pub const SKU_MAX: usize = 50;

/// Minimum length of a username
pub const USERNAME_MIN: usize = 3;

/// Maximum length of a category or location name
pub const REGISTRY_NAME_MAX: usize = 50;

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate a product name (non-empty, bounded length)
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Product name is required");
    }
    if trimmed.chars().count() > PRODUCT_NAME_MAX {
        return Err("Product name must be at most 100 characters");
    }
    Ok(())
}

/// Validate a SKU (non-empty, bounded length)
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    let trimmed = sku.trim();
    if trimmed.is_empty() {
        return Err("SKU is required");
    }
    if trimmed.chars().count() > SKU_MAX {
        return Err("SKU must be at most 50 characters");
    }
    Ok(())
}

/// Validate a unit price is not negative
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate a movement quantity is positive
pub fn validate_quantity(quantity: u32) -> Result<(), &'static str> {
    if quantity == 0 {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate a category or location name
pub fn validate_registry_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name is required");
    }
    if trimmed.chars().count() > REGISTRY_NAME_MAX {
        return Err("Name must be at most 50 characters");
    }
    Ok(())
}

// ============================================================================
// Directory Validations
// ============================================================================

/// Validate a person's display name
pub fn validate_person_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    Ok(())
}

/// Validate a username (minimum length, no spaces)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let trimmed = username.trim();
    if trimmed.chars().count() < USERNAME_MIN {
        return Err("Username must be at least 3 characters");
    }
    if trimmed.contains(char::is_whitespace) {
        return Err("Username cannot contain spaces");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

// ============================================================================
// Date Validations
// ============================================================================

/// Validate a report date range: ordered, and not starting in the future
pub fn validate_date_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), &'static str> {
    if start > end {
        return Err("Start date must not be after end date");
    }
    if start > now {
        return Err("Start date must not be in the future");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ========================================================================
    // Catalog Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_product_name_valid() {
        assert!(validate_product_name("Arena Premium 10kg").is_ok());
        assert!(validate_product_name("  Rascador  ").is_ok());
    }

    #[test]
    fn test_validate_product_name_invalid() {
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product_name_at_limit() {
        assert!(validate_product_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("ARN-001").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku(&"s".repeat(51)).is_err());
        assert!(validate_sku(&"s".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::from(25)).is_ok());
        assert!(validate_price(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn test_validate_registry_name() {
        assert!(validate_registry_name("Alimentos").is_ok());
        assert!(validate_registry_name(" ").is_err());
        assert!(validate_registry_name(&"c".repeat(51)).is_err());
    }

    // ========================================================================
    // Directory Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_person_name() {
        assert!(validate_person_name("María López").is_ok());
        assert!(validate_person_name("  ").is_err());
    }

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("ana").is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("user name").is_err());
    }

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("ventas@econoarena.pe").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    // ========================================================================
    // Date Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_date_range() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();

        assert!(validate_date_range(earlier, later, now).is_ok());
        assert!(validate_date_range(earlier, earlier, now).is_ok());
        assert!(validate_date_range(later, earlier, now).is_err());
        assert!(validate_date_range(later, later, now).is_err());
    }
}
