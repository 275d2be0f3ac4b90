//! Product form configuration.
//!
//! # Example
//!
//! ```ignore
//! use product_form_driver::{FormOptions, WaitOptions};
//!
//! let options = FormOptions::new()
//!     .with_wait(WaitOptions::new().with_timeout(Duration::from_secs(10)))
//!     .with_default_parent_category("Root Catalog");
//! options.validate()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::wait::WaitOptions;

// ============================================================================
// Constants
// ============================================================================

/// Parent assigned to new categories when the fixture names none.
pub const DEFAULT_PARENT_CATEGORY: &str = "Default Category";

// ============================================================================
// FormOptions
// ============================================================================

/// Settings shared by every page object of a form instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Bound and interval of every wait the form performs.
    pub wait: WaitOptions,

    /// Parent category used by `add_new_category` when the fixture has none.
    pub default_parent_category: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl FormOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wait: WaitOptions::new(),
            default_parent_category: DEFAULT_PARENT_CATEGORY.to_string(),
        }
    }

    /// Sets the wait options.
    #[inline]
    #[must_use]
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Sets the default parent category.
    #[inline]
    #[must_use]
    pub fn with_default_parent_category(mut self, name: impl Into<String>) -> Self {
        self.default_parent_category = name.into();
        self
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for invalid wait options or an empty parent name.
    pub fn validate(&self) -> Result<()> {
        self.wait.validate()?;
        if self.default_parent_category.trim().is_empty() {
            return Err(Error::config("Default parent category must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
