//! Product form page objects for Magento-style admin panels.
//!
//! This library drives the product creation/edit form of an e-commerce admin
//! panel from a test fixture: category selection through the type-ahead
//! field, tab navigation including tabs behind the collapsed "Advanced
//! Settings" section, new attributes defined inside an embedded frame, the
//! configurable variation matrix, and the attribute set dialog shown on save.
//!
//! # Architecture
//!
//! The page objects are written against two capabilities rather than a
//! concrete browser driver:
//!
//! - **[`Session`]**: active browsing context and frame switching
//! - **[`ElementHandle`]**: lazy element lookup, click, typing, visibility
//!
//! Key design principles:
//!
//! - A missing element is "not visible"; acting on it is an error
//! - Every wait is bounded by [`WaitOptions`]
//! - Frame-scoped work always returns to the top-level document
//! - Sub-blocks are built by an explicit [`BlockFactory`]
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use product_form_driver::{FormOptions, MemoryPage, ProductFixture, ProductForm, Result};
//!
//! async fn create_product(
//!     page: MemoryPage,
//!     base: Arc<dyn BaseForm>,
//!     blocks: Arc<dyn BlockFactory>,
//! ) -> Result<()> {
//!     let fixture = ProductFixture::from_json(r#"{ "categoryName": "Bags" }"#)?;
//!
//!     let form = ProductForm::new(Arc::new(page), base, blocks, FormOptions::new())?;
//!     form.fill(&fixture).await?;
//!     form.save(&fixture).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Capabilities: [`Session`], [`ElementHandle`], [`By`] |
//! | [`form`] | Page objects: [`ProductForm`], [`TabNavigator`] |
//! | [`fixture`] | Fixture trait and serde-backed [`ProductFixture`] |
//! | [`wait`] | Bounded polling |
//! | [`error`] | Error types and [`Result`] alias |

// ============================================================================
// Modules
// ============================================================================

/// Browser capabilities and the in-memory backend.
///
/// - [`Session`] - Active browsing context and frame switching
/// - [`ElementHandle`] - Lazy element reference
/// - [`MemoryPage`] - Scripted page for tests and dry runs
pub mod browser;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Fixture data the form is filled from.
pub mod fixture;

/// Product form page objects.
pub mod form;

/// Bounded polling.
pub mod wait;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{
    BrowserContext, By, Element, ElementHandle, MemoryPage, Session, ensure_top_level,
    within_frame,
};

// Error types
pub use error::{Error, Result};

// Fixture types
pub use fixture::{
    AttributeOption, AttributeOptionGroup, AttributeSetChoice, Category, ConfigurableOption,
    FormFixture, ProductFixture, VariationValue,
};

// Form types
pub use form::{
    BaseForm, BlockFactory, CategorySelector, FieldMapping, FormOptions, MappedFieldsForm,
    ProductForm, ProductTab, TabNavigator,
};

// Wait types
pub use wait::WaitOptions;
