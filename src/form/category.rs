//! Category selection and creation.
//!
//! Categories are picked through a type-ahead ("suggest") control: typing a
//! name renders a dropdown of matching categories, and picking one renders a
//! removable chip. New categories are created in a modal dialog whose parent
//! is chosen through the same kind of control.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, info};

use crate::browser::{By, Element};
use crate::error::{Error, Result};
use crate::wait::{WaitOptions, wait_for_not_visible, wait_for_visible};

use super::locators;

// ============================================================================
// SuggestField
// ============================================================================

/// A type-ahead control and the container its dropdown renders in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestField {
    /// Text input the name is typed into.
    pub input: By,
    /// XPath of the container scoping the dropdown.
    pub container: &'static str,
    /// Remove control of a chip already selected in this field.
    pub chip_close: By,
}

impl SuggestField {
    /// The product's own category field.
    #[must_use]
    pub fn product_categories() -> Self {
        Self {
            input: By::id(locators::CATEGORY_INPUT_ID),
            container: locators::CATEGORY_CONTAINER,
            chip_close: By::css(locators::CATEGORY_CHIP_CLOSE),
        }
    }

    /// The parent field of the new category dialog.
    #[must_use]
    pub fn new_category_parent() -> Self {
        Self {
            input: By::id(locators::NEW_CATEGORY_PARENT_INPUT_ID),
            container: locators::NEW_CATEGORY_FIELDSET,
            chip_close: By::css(locators::NEW_CATEGORY_PARENT_CHIP_CLOSE),
        }
    }

    /// Suggestion dropdown under this field's container.
    #[must_use]
    pub fn dropdown(&self) -> By {
        By::xpath_within(self.container, locators::SUGGEST_DROPDOWN)
    }

    /// Suggestion entries under this field's container.
    #[must_use]
    pub fn suggestions(&self) -> By {
        By::xpath_within(self.container, locators::SUGGEST_OPTION)
    }
}

// ============================================================================
// CategorySelector
// ============================================================================

/// Selects existing categories and creates new ones.
#[derive(Debug, Clone)]
pub struct CategorySelector {
    root: Element,
    wait: WaitOptions,
}

impl CategorySelector {
    /// Creates a selector over the form root element.
    #[must_use]
    pub fn new(root: Element, wait: WaitOptions) -> Self {
        Self { root, wait }
    }

    /// Returns `true` if a chip for `name` is already rendered.
    pub async fn is_selected(&self, name: &str) -> Result<bool> {
        self.root
            .find(locators::category_chip(name))
            .is_visible()
            .await
    }

    /// Assigns the product to the category `name`.
    ///
    /// Does nothing if the category is already selected.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if the suggestion dropdown never renders
    /// - [`Error::SuggestionNotFound`] unless exactly one suggestion is
    ///   labelled `name`
    pub async fn select(&self, name: &str) -> Result<()> {
        if self.is_selected(name).await? {
            debug!(category = name, "Category already selected");
            return Ok(());
        }
        self.choose(&SuggestField::product_categories(), name).await?;
        info!(category = name, "Selected category");
        Ok(())
    }

    /// Types `name` into `field` and clicks the suggestion labelled exactly
    /// `name`.
    pub async fn choose(&self, field: &SuggestField, name: &str) -> Result<()> {
        debug!(field = %field.input, label = name, "Typing into suggest field");
        self.root.find(field.input.clone()).set_value(name).await?;

        let dropdown = field.dropdown();
        wait_for_visible(&self.root, &dropdown, &self.wait).await?;

        let mut matching = Vec::new();
        for suggestion in self.root.find(dropdown).find_all(field.suggestions()).await? {
            if suggestion.text().await?.trim() == name {
                matching.push(suggestion);
            }
        }

        match matching.as_slice() {
            [suggestion] => suggestion.click().await,
            _ => Err(Error::suggestion_not_found(name, matching.len())),
        }
    }

    /// Removes every chip selected in `field`.
    ///
    /// Each visible chip is clicked once, then the wait observes the chips
    /// closing. A field without a chip is left untouched.
    pub async fn clear(&self, field: &SuggestField) -> Result<()> {
        for chip_close in self.root.find_all(field.chip_close.clone()).await? {
            if chip_close.is_visible().await? {
                debug!(chip = %field.chip_close, "Removing selected chip");
                chip_close.click().await?;
            }
        }
        wait_for_not_visible(&self.root, &field.chip_close, &self.wait).await
    }

    /// Creates the category `name` under `parent` through the dialog.
    ///
    /// Any parent already selected in the dialog is removed first, so the
    /// new category ends up with `parent` as its only parent.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if the dialog never opens or never closes
    /// - [`Error::SuggestionNotFound`] if `parent` cannot be picked
    pub async fn add_new(&self, name: &str, parent: &str) -> Result<()> {
        debug!(category = name, parent, "Opening new category dialog");
        self.root
            .find(By::css(locators::ADD_CATEGORY_BUTTON))
            .click()
            .await?;

        let name_field = By::css(locators::NEW_CATEGORY_NAME);
        wait_for_visible(&self.root, &name_field, &self.wait).await?;
        self.root.find(name_field).set_value(name).await?;

        let parent_field = SuggestField::new_category_parent();
        self.clear(&parent_field).await?;
        self.choose(&parent_field, parent).await?;

        let confirm = By::css(locators::NEW_CATEGORY_CONFIRM);
        self.root.find(confirm.clone()).click().await?;
        wait_for_not_visible(&self.root, &confirm, &self.wait).await?;

        info!(category = name, parent, "Created category");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
