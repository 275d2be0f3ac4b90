//! Product form page object.
//!
//! [`ProductForm`] sequences a fill:
//!
//! 1. category: the category given to [`ProductForm::set_category`] wins
//!    over the fixture's; an empty name skips the step
//! 2. ordinary fields, delegated to the [`BaseForm`]
//! 3. with attribute options: Product Details tab, "Create New Variation
//!    Set", then the attribute editor inside the new-attribute frame
//! 4. with configurable options: back on the top-level document, the
//!    variation grid is filled and the matrix generated
//!
//! Saving delegates to the [`BaseForm`] and answers the affected attribute
//! set dialog when the save brought it up.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::browser::{By, BrowserContext, Element, Session, ensure_top_level, within_frame};
use crate::error::{Error, Result};
use crate::fixture::{AttributeOptionGroup, Category, ConfigurableOption, FormFixture};
use crate::wait::wait_for_visible;

use super::blocks::{BaseForm, BlockFactory};
use super::category::{CategorySelector, SuggestField};
use super::locators;
use super::options::FormOptions;
use super::tabs::{ProductTab, TabNavigator};

// ============================================================================
// ProductForm
// ============================================================================

/// Page object of the product creation/edit form.
pub struct ProductForm {
    session: Arc<dyn Session>,
    root: Element,
    base: Arc<dyn BaseForm>,
    blocks: Arc<dyn BlockFactory>,
    options: FormOptions,
    tabs: TabNavigator,
    categories: CategorySelector,
    category: Option<Category>,
}

impl fmt::Debug for ProductForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductForm")
            .field("root", &self.root)
            .field("options", &self.options)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl ProductForm {
    /// Binds the form to the session's top-level document.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if `options` are invalid or the session is inside a
    /// frame.
    pub fn new(
        session: Arc<dyn Session>,
        base: Arc<dyn BaseForm>,
        blocks: Arc<dyn BlockFactory>,
        options: FormOptions,
    ) -> Result<Self> {
        options.validate()?;

        let root = session.root();
        if !root.context().is_top_level() {
            return Err(Error::config(format!(
                "Product form must be bound to the top-level document, not {}",
                root.context()
            )));
        }

        Ok(Self {
            tabs: TabNavigator::new(Arc::clone(&root), options.wait),
            categories: CategorySelector::new(Arc::clone(&root), options.wait),
            session,
            root,
            base,
            blocks,
            options,
            category: None,
        })
    }

    /// Form root element.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Tab navigator of this form.
    #[inline]
    #[must_use]
    pub fn tabs(&self) -> &TabNavigator {
        &self.tabs
    }

    /// Category selector of this form.
    #[inline]
    #[must_use]
    pub fn categories(&self) -> &CategorySelector {
        &self.categories
    }

    /// Form options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Sets the category used by the next fills instead of the fixture's.
    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }
}

// ============================================================================
// ProductForm - Fill & Save
// ============================================================================

impl ProductForm {
    /// Fills the form from `fixture`.
    ///
    /// # Errors
    ///
    /// Propagates timeouts, lookup failures and collaborator errors. The
    /// top-level context is restored even when the attribute editor fails.
    pub async fn fill(&self, fixture: &dyn FormFixture) -> Result<()> {
        ensure_top_level(&*self.session).await?;

        self.fill_category(fixture).await?;
        self.base.fill(fixture).await?;

        let groups = fixture.attribute_options();
        if !groups.is_empty() {
            self.define_attributes(groups).await?;
        }

        let options = fixture.configurable_options();
        if !options.is_empty() {
            self.fill_variations(options).await?;
        }

        info!(
            attribute_groups = groups.len(),
            configurable_options = options.len(),
            "Filled product form"
        );
        Ok(())
    }

    /// Saves the form, answering the affected attribute set dialog if shown.
    pub async fn save(&self, fixture: &dyn FormFixture) -> Result<()> {
        ensure_top_level(&*self.session).await?;
        self.base.save(fixture).await?;

        let dialog = self
            .blocks
            .affected_attribute_set(self.root.find(By::xpath(locators::AFFECTED_ATTRIBUTE_SET)));
        if dialog.is_visible().await? {
            debug!("Answering affected attribute set dialog");
            dialog
                .choose_attribute_set(fixture.attribute_set_choice())
                .await?;
        }

        info!("Saved product form");
        Ok(())
    }

    /// Selects the effective category unless it is empty.
    async fn fill_category(&self, fixture: &dyn FormFixture) -> Result<()> {
        let name = match &self.category {
            Some(category) => category.name.as_str(),
            None => fixture.category_name().unwrap_or_default(),
        };

        if name.is_empty() {
            debug!("No category to select");
            return Ok(());
        }
        self.categories.select(name).await
    }

    /// Defines new attributes in the new-attribute frame.
    async fn define_attributes(&self, groups: &[AttributeOptionGroup]) -> Result<()> {
        let tab = ProductTab::ProductDetails;
        if !self.open_tab(tab).await? {
            return Err(Error::element_not_found(
                tab.descriptor().locator.to_string(),
                BrowserContext::TopLevel,
            ));
        }
        self.click_create_new_variation_set().await?;

        let frame = By::css(locators::NEW_ATTRIBUTE_FRAME);
        wait_for_visible(&self.root, &frame, &self.options.wait).await?;

        let blocks = &self.blocks;
        within_frame(&*self.session, &frame, |frame_root| async move {
            let scope = frame_root.find(By::tag(locators::NEW_ATTRIBUTE_ROOT_TAG));
            blocks.attribute_edit(scope).fill_attribute_options(groups).await
        })
        .await?;

        debug!(groups = groups.len(), "Defined attributes");
        Ok(())
    }

    /// Fills the variation grid and generates the variants.
    pub async fn fill_variations(&self, options: &[ConfigurableOption]) -> Result<()> {
        ensure_top_level(&*self.session).await?;

        let block = self
            .blocks
            .variation_matrix(self.root.find(By::css(locators::VARIATIONS_WRAPPER)));
        block.fill_attribute_options(options).await?;
        block.generate_variations().await?;

        debug!(options = options.len(), "Generated variations");
        Ok(())
    }
}

// ============================================================================
// ProductForm - Tabs & Controls
// ============================================================================

impl ProductForm {
    /// Opens `tab`; `Ok(false)` if it cannot be reached.
    pub async fn open_tab(&self, tab: ProductTab) -> Result<bool> {
        self.tabs.open(tab).await
    }

    /// Opens a tab by identifier; unknown identifiers are [`Error::Config`].
    pub async fn open_tab_by_name(&self, name: &str) -> Result<bool> {
        self.tabs.open_by_name(name).await
    }

    /// Clicks the Variations tab title.
    pub async fn open_variations_tab(&self) -> Result<()> {
        self.root
            .find(By::css(locators::VARIATIONS_TAB_TITLE))
            .click()
            .await
    }

    /// Clicks "Create New Variation Set".
    pub async fn click_create_new_variation_set(&self) -> Result<()> {
        self.root
            .find(By::css(locators::NEW_VARIATION_SET))
            .click()
            .await
    }

    /// Removes the categories selected on the product.
    pub async fn clear_category_select(&self) -> Result<()> {
        self.categories
            .clear(&SuggestField::product_categories())
            .await
    }

    /// Creates the fixture's new category through the dialog.
    ///
    /// The parent defaults to [`FormOptions::default_parent_category`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the fixture names no new category.
    pub async fn add_new_category(&self, fixture: &dyn FormFixture) -> Result<()> {
        let name = fixture
            .new_category_name()
            .ok_or_else(|| Error::invalid_argument("Fixture has no new category name"))?;
        let parent = fixture
            .new_category_parent()
            .unwrap_or(self.options.default_parent_category.as_str());

        ensure_top_level(&*self.session).await?;
        self.categories.add_new(name, parent).await
    }
}

// ============================================================================
// Tests
// ============================================================================
