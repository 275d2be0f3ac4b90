//! Product fixtures consumed by the form.
//!
//! The form only reads fixtures. [`FormFixture`] is the capability it needs;
//! [`ProductFixture`] is a serde-backed implementation that can be loaded
//! from JSON.
//!
//! # Example
//!
//! ```ignore
//! let fixture = ProductFixture::from_json(r#"{
//!     "categoryName": "Bags",
//!     "fields": { "name": "Messenger", "sku": "msg-01" },
//!     "configurableOptions": [
//!         { "attributeLabel": "Color", "values": [{ "label": "Red" }] }
//!     ]
//! }"#)?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

// ============================================================================
// FormFixture
// ============================================================================

/// Read-only data the product form is filled from.
///
/// Empty or absent values short-circuit the matching sub-flow.
pub trait FormFixture: Send + Sync {
    /// Category the product is assigned to.
    fn category_name(&self) -> Option<&str>;

    /// Name of a category created from the form.
    fn new_category_name(&self) -> Option<&str>;

    /// Parent of a category created from the form.
    fn new_category_parent(&self) -> Option<&str>;

    /// Attribute groups defined in the "new variation set" frame.
    fn attribute_options(&self) -> &[AttributeOptionGroup];

    /// Attribute values combined into the variation matrix.
    fn configurable_options(&self) -> &[ConfigurableOption];

    /// Answer to the affected attribute set dialog shown after save.
    fn attribute_set_choice(&self) -> Option<&AttributeSetChoice>;

    /// Ordinary field values, keyed by field name.
    fn fields(&self) -> &Map<String, Value>;
}

// ============================================================================
// Data Types
// ============================================================================

/// Category assigned ahead of a fill through `ProductForm::set_category`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name of the category.
    pub name: String,
}

impl Category {
    /// Creates a category reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An attribute defined in the new-attribute frame, with its options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeOptionGroup {
    /// Label of the attribute (e.g. "Color").
    pub attribute_label: String,
    /// Catalog input type, "dropdown" unless stated.
    pub frontend_input: Option<String>,
    /// Options, in display order.
    pub options: Vec<AttributeOption>,
}

/// One option of an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeOption {
    /// Admin label of the option.
    pub admin_label: String,
    /// Whether the option is the attribute's default.
    pub is_default: bool,
}

/// An attribute whose values span the variation matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurableOption {
    /// Label of the attribute.
    pub attribute_label: String,
    /// Values included in the matrix.
    pub values: Vec<VariationValue>,
}

/// A single attribute value of the variation matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationValue {
    /// Option label.
    pub label: String,
    /// Price adjustment as typed into the grid (e.g. "10" or "5%").
    #[serde(default)]
    pub pricing_value: Option<String>,
    /// Whether the value takes part in generation.
    #[serde(default = "default_include")]
    pub include: bool,
}

fn default_include() -> bool {
    true
}

/// Answer to the dialog asking where new configurable attributes go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum AttributeSetChoice {
    /// Add the attributes to the product's current attribute set.
    Current,
    /// Add them to a new set based on the current one.
    New {
        /// Name of the new attribute set.
        name: String,
    },
}

// ============================================================================
// ProductFixture
// ============================================================================

/// Serde-backed product fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFixture {
    /// Category the product is assigned to.
    pub category_name: Option<String>,
    /// Name of a category created from the form.
    pub new_category_name: Option<String>,
    /// Parent of a category created from the form.
    pub new_category_parent: Option<String>,
    /// Attribute groups defined in the new-attribute frame.
    pub attribute_options: Vec<AttributeOptionGroup>,
    /// Attribute values combined into the variation matrix.
    pub configurable_options: Vec<ConfigurableOption>,
    /// Answer to the affected attribute set dialog.
    pub affected_attribute_set: Option<AttributeSetChoice>,
    /// Ordinary field values.
    pub fields: Map<String, Value>,
}

impl ProductFixture {
    /// Parses a fixture from JSON.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Json`] if the document does not match the fixture shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the category name.
    #[must_use]
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    /// Sets an ordinary field value.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Treats `Some("")` the same as `None`.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl FormFixture for ProductFixture {
    fn category_name(&self) -> Option<&str> {
        non_empty(self.category_name.as_ref())
    }

    fn new_category_name(&self) -> Option<&str> {
        non_empty(self.new_category_name.as_ref())
    }

    fn new_category_parent(&self) -> Option<&str> {
        non_empty(self.new_category_parent.as_ref())
    }

    fn attribute_options(&self) -> &[AttributeOptionGroup] {
        &self.attribute_options
    }

    fn configurable_options(&self) -> &[ConfigurableOption] {
        &self.configurable_options
    }

    fn attribute_set_choice(&self) -> Option<&AttributeSetChoice> {
        self.affected_attribute_set.as_ref()
    }

    fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

// ============================================================================
// Tests
// ============================================================================
