//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError         - Catalog rule violations                       │
//! │  ├── ValidationError   - One bad field                                 │
//! │  └── ValidationErrors  - Every bad field of one payload                │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError           - Database operation failures                   │
//! │                                                                         │
//! │  HTTP errors (in the API app)                                          │
//! │  └── ApiError          - Status code + JSON body                       │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationErrors → ApiError (400)             │
//! │        CoreError / DbError ───────────────► ApiError (404/409/500)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product has the requested id.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// No collection has the requested id.
    #[error("Collection not found: {0}")]
    CollectionNotFound(i64),

    /// A collection cannot be removed while products reference it.
    ///
    /// ## User Workflow
    /// ```text
    /// DELETE /collections/3
    ///      │
    ///      ▼
    /// products_count = 2
    ///      │
    ///      ▼
    /// CollectionHasProducts { id: 3, title: "Grocery" }
    ///      │
    ///      ▼
    /// 409 "ID: 3 - Grocery has products, cannot be deleted!"
    /// ```
    #[error("ID: {id} - {title} has products, cannot be deleted!")]
    CollectionHasProducts { id: i64, title: String },

    /// Validation error (wraps ValidationErrors).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range. Bounds are rendered as given.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Invalid format (e.g., bad slug, non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Referenced record does not exist.
    #[error("{field}: object with id {id} does not exist")]
    DoesNotExist { field: String, id: i64 },

    /// Value exists but is not acceptable here.
    #[error("{field}: {reason}")]
    NotAllowed { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::DoesNotExist { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Every field-level failure found in one payload.
///
/// Serializes as `{"field": ["message", ...]}` with fields in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Records a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records the error of a failed check, if any.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Messages grouped by field name.
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for e in &self.errors {
            map.entry(e.field().to_string())
                .or_default()
                .push(e.to_string());
        }
        map
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.by_field().serialize(serializer)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message() {
        let err = CoreError::CollectionHasProducts {
            id: 3,
            title: "Grocery".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ID: 3 - Grocery has products, cannot be deleted!"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::DoesNotExist {
            field: "collection".to_string(),
            id: 9,
        };
        assert_eq!(err.to_string(), "collection: object with id 9 does not exist");
    }

    #[test]
    fn test_errors_group_by_field() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Required {
            field: "title".to_string(),
        });
        errors.push(ValidationError::TooLong {
            field: "slug".to_string(),
            max: 255,
        });
        errors.push(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "bad".to_string(),
        });

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["title"][0], "title is required");
        assert_eq!(json["slug"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_finish() {
        assert_eq!(ValidationErrors::new().finish(5), Ok(5));

        let errors: ValidationErrors = ValidationError::Required {
            field: "title".to_string(),
        }
        .into();
        assert!(errors.finish(()).is_err());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let errors: ValidationErrors = ValidationError::Required {
            field: "title".to_string(),
        }
        .into();
        let core_err: CoreError = errors.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
