//! Product form page objects.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ProductForm`] | Fill and save orchestration |
//! | [`TabNavigator`] | Direct and collapsed tab navigation |
//! | [`CategorySelector`] | Category suggest field and creation dialog |
//! | [`MappedFieldsForm`] | Ordinary fields through a key mapping |
//! | [`FormOptions`] | Wait bounds and category defaults |
//!
//! # Example
//!
//! ```ignore
//! use product_form_driver::form::{FormOptions, ProductForm, ProductTab};
//!
//! let form = ProductForm::new(session, base, blocks, FormOptions::new())?;
//! form.fill(&fixture).await?;
//! form.open_tab(ProductTab::AdvancedPricing).await?;
//! form.save(&fixture).await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Collaborator block traits.
pub mod blocks;

/// Category selection and creation.
pub mod category;

/// Mapped ordinary fields.
pub mod fields;

/// Element locators of the product form.
pub mod locators;

/// Form configuration.
pub mod options;

/// Form orchestration.
pub mod product;

/// Tabs and tab navigation.
pub mod tabs;

// ============================================================================
// Re-exports
// ============================================================================

pub use blocks::{
    AffectedAttributeSetBlock, AttributeEditBlock, BaseForm, BlockFactory, VariationMatrixBlock,
};
pub use category::{CategorySelector, SuggestField};
pub use fields::{FieldMapping, MappedFieldsForm};
pub use options::{DEFAULT_PARENT_CATEGORY, FormOptions};
pub use product::ProductForm;
pub use tabs::{Fallback, ProductTab, TabDescriptor, TabNavigator};
