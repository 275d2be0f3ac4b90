//! Error types for the product form page objects.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use product_form_driver::{Error, ProductTab, Result};
//!
//! async fn example(form: &ProductForm) -> Result<()> {
//!     if !form.open_tab(ProductTab::AdvancedPricing).await? {
//!         return Err(Error::config("advanced pricing is not available"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidArgument`] |
//! | Lookup | [`Error::ElementNotFound`], [`Error::SuggestionNotFound`] |
//! | Synchronization | [`Error::Timeout`] |
//! | Backend | [`Error::Driver`] |
//! | External | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::browser::BrowserContext;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned for unknown tab identifiers and invalid wait/form options.
    /// Never retried.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument.
    ///
    /// Returned when a fixture lacks a value an operation cannot do without.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// A required element never resolved.
    #[error("Element not found: selector={selector}, context={context}")]
    ElementNotFound {
        /// Selector used, as `strategy:value`.
        selector: String,
        /// Browsing context the lookup ran in.
        context: BrowserContext,
    },

    /// No single type-ahead suggestion carries the requested label.
    ///
    /// `matches` is `0` for a missing label and `> 1` for an ambiguous one.
    #[error("Suggestion not found: label={label:?}, matches={matches}")]
    SuggestionNotFound {
        /// Exact label that was looked for.
        label: String,
        /// Number of suggestions whose label matched exactly.
        matches: usize,
    },

    // ========================================================================
    // Synchronization Errors
    // ========================================================================
    /// A bounded poll never satisfied its predicate.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the condition that was awaited.
        operation: String,
        /// Milliseconds elapsed before giving up.
        timeout_ms: u64,
    },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// The element driver refused an action.
    #[error("Driver error: {message}")]
    Driver {
        /// Description reported by the backend.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(selector: impl Into<String>, context: BrowserContext) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
            context,
        }
    }

    /// Creates a suggestion not found error.
    #[inline]
    pub fn suggestion_not_found(label: impl Into<String>, matches: usize) -> Self {
        Self::SuggestionNotFound {
            label: label.into(),
            matches,
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if a required element or suggestion never resolved.
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::SuggestionNotFound { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::InvalidArgument { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
