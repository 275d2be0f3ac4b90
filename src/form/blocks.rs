//! Collaborator blocks the product form delegates to.
//!
//! The form drives these blocks but does not implement them: ordinary field
//! filling lives behind [`BaseForm`], and the three sub-blocks are obtained
//! from a [`BlockFactory`] with an explicit constructor per block type.

use async_trait::async_trait;

use crate::browser::Element;
use crate::error::Result;
use crate::fixture::{AttributeOptionGroup, AttributeSetChoice, ConfigurableOption, FormFixture};

// ============================================================================
// Base Form
// ============================================================================

/// Fills and saves the form's ordinary fields.
#[async_trait]
pub trait BaseForm: Send + Sync {
    /// Fills every ordinary field the fixture provides.
    async fn fill(&self, fixture: &dyn FormFixture) -> Result<()>;

    /// Submits the form.
    async fn save(&self, fixture: &dyn FormFixture) -> Result<()>;
}

// ============================================================================
// Sub-blocks
// ============================================================================

/// Attribute editor rendered inside the new-attribute frame.
#[async_trait]
pub trait AttributeEditBlock: Send + Sync {
    /// Defines the attributes and their options.
    async fn fill_attribute_options(&self, groups: &[AttributeOptionGroup]) -> Result<()>;
}

/// Variation grid of the Variations tab.
#[async_trait]
pub trait VariationMatrixBlock: Send + Sync {
    /// Selects the attribute values the matrix is built from.
    async fn fill_attribute_options(&self, options: &[ConfigurableOption]) -> Result<()>;

    /// Generates the product variants.
    async fn generate_variations(&self) -> Result<()>;
}

/// "Choose affected attribute set" dialog shown after saving new attributes.
#[async_trait]
pub trait AffectedAttributeSetBlock: Send + Sync {
    /// Returns `true` if the dialog is rendered.
    async fn is_visible(&self) -> Result<bool>;

    /// Answers the dialog.
    async fn choose_attribute_set(&self, choice: Option<&AttributeSetChoice>) -> Result<()>;
}

// ============================================================================
// BlockFactory
// ============================================================================

/// Builds sub-blocks scoped to an element.
pub trait BlockFactory: Send + Sync {
    /// Attribute editor scoped to the new-attribute frame's root.
    fn attribute_edit(&self, scope: Element) -> Box<dyn AttributeEditBlock>;

    /// Variation grid scoped to the variations container.
    fn variation_matrix(&self, scope: Element) -> Box<dyn VariationMatrixBlock>;

    /// Affected attribute set dialog scoped to its container.
    fn affected_attribute_set(&self, scope: Element) -> Box<dyn AffectedAttributeSetBlock>;
}
