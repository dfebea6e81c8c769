//! # Validation Module
//!
//! Input validation for product creation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / menu prompt                                            │
//! │  └── Raw text exactly as typed by the operator                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Trim + non-empty text checks                                      │
//! │  ├── Decimal price parsing (no floats)                                 │
//! │  └── Integer quantity parsing                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price_cents >= 0 AND quantity >= 0)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockledger_core::validation::{parse_quantity, parse_unit_price};
//!
//! assert_eq!(parse_unit_price("10.00").unwrap().cents(), 1000);
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(parse_quantity("-1").is_err());
//! ```

use std::num::IntErrorKind;

use crate::error::ValidationError;
use crate::money::{Money, MoneyParseError};
use crate::{MAX_CATEGORY_LEN, MAX_NAME_LEN, MAX_QUANTITY, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field names as reported in [`ValidationError`].
pub mod fields {
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category";
    pub const UNIT_PRICE: &str = "unit_price";
    pub const QUANTITY: &str = "quantity";
}

// =============================================================================
// Validated Input
// =============================================================================

/// Create input that passed every field rule.
///
/// Holds everything a product needs except the fields the catalog assigns
/// (`id`, `created_at`). Fields are private: [`validate_new_product`] is
/// the only way to build one.
///
/// ```compile_fail
/// use stockledger_core::money::Money;
/// use stockledger_core::validation::NewProduct;
///
/// let unchecked = NewProduct {
///     name: String::new(),
///     category: String::new(),
///     unit_price: Money::from_cents(-500),
///     quantity: -3,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    category: String,
    unit_price: Money,
    quantity: i64,
}

impl NewProduct {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub(crate) fn into_parts(self) -> (String, String, Money, i64) {
        (self.name, self.category, self.unit_price, self.quantity)
    }
}

/// Validates all four create fields, in the order an operator types them.
///
/// The first failing field is reported.
///
/// ```rust
/// use stockledger_core::validation::validate_new_product;
///
/// let input = validate_new_product(" Widget ", "Tools", "10.00", "3").unwrap();
/// assert_eq!(input.name(), "Widget");
///
/// let err = validate_new_product("Widget", "", "10.00", "3").unwrap_err();
/// assert_eq!(err.field(), "category");
/// ```
pub fn validate_new_product(
    name: &str,
    category: &str,
    unit_price: &str,
    quantity: &str,
) -> ValidationResult<NewProduct> {
    Ok(NewProduct {
        name: validate_product_name(name)?,
        category: validate_category(category)?,
        unit_price: parse_unit_price(unit_price)?,
        quantity: parse_quantity(quantity)?,
    })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    required_text(fields::NAME, name, MAX_NAME_LEN)
}

/// Validates a category and returns it trimmed.
///
/// Case is preserved: `"Tools"` and `"tools"` stay distinct categories.
pub fn validate_category(category: &str) -> ValidationResult<String> {
    required_text(fields::CATEGORY, category, MAX_CATEGORY_LEN)
}

fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a unit price typed as a decimal amount.
///
/// ## Rules
/// - Decimal text with at most two fractional digits (see [`Money::parse`])
/// - Zero is allowed (free items)
/// - Negative amounts are rejected
/// - At most [`MAX_UNIT_PRICE_CENTS`]
pub fn parse_unit_price(text: &str) -> ValidationResult<Money> {
    let field = fields::UNIT_PRICE;

    let price = Money::parse(text).map_err(|err| match err {
        MoneyParseError::Empty => ValidationError::Required {
            field: field.to_string(),
        },
        // Below any representable amount: still a negative price.
        MoneyParseError::Overflow if text.trim_start().starts_with('-') => {
            ValidationError::Negative {
                field: field.to_string(),
            }
        }
        MoneyParseError::Overflow => too_large(field, Money::from_cents(MAX_UNIT_PRICE_CENTS)),
        other => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: other.to_string(),
        },
    })?;

    validate_unit_price(price)?;
    Ok(price)
}

/// Checks the range of an already typed price.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: fields::UNIT_PRICE.to_string(),
        });
    }

    if price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(too_large(
            fields::UNIT_PRICE,
            Money::from_cents(MAX_UNIT_PRICE_CENTS),
        ));
    }

    Ok(())
}

/// Parses a stock quantity typed as a whole number.
///
/// ## Rules
/// - Base-10 integer, optional sign, no decimal point
/// - Zero is allowed (out of stock)
/// - Negative values are rejected
/// - At most [`MAX_QUANTITY`]
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let field = fields::QUANTITY;
    let text = text.trim();

    let quantity = text.parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::Empty => ValidationError::Required {
            field: field.to_string(),
        },
        IntErrorKind::PosOverflow => too_large(field, MAX_QUANTITY),
        IntErrorKind::NegOverflow => ValidationError::Negative {
            field: field.to_string(),
        },
        _ => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a whole number", text),
        },
    })?;

    validate_quantity(quantity)?;
    Ok(quantity)
}

/// Checks the range of an already typed quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: fields::QUANTITY.to_string(),
        });
    }

    if quantity > MAX_QUANTITY {
        return Err(too_large(fields::QUANTITY, MAX_QUANTITY));
    }

    Ok(())
}

fn too_large(field: &str, max: impl ToString) -> ValidationError {
    ValidationError::TooLarge {
        field: field.to_string(),
        max: max.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
