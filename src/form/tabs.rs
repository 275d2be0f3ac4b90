//! Product form tabs and tab navigation.
//!
//! Every tab is a [`ProductTab`] variant statically bound to its
//! [`TabDescriptor`]. Tabs kept under the collapsed "Advanced Settings"
//! section carry [`Fallback::AdvancedSettings`]: when their control is not
//! directly visible, the navigator expands that section first.
//!
//! # Navigation
//!
//! ```text
//! wait for tab list ──▶ control visible? ──yes──▶ click ──▶ Ok(true)
//!                            │ no
//!                            ▼
//!            fallback + collapsed header visible? ──no──▶ Ok(false)
//!                            │ yes
//!                            ▼
//!   click header ──▶ wait panel expanded ──▶ wait control ──▶ click ──▶ Ok(true)
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::browser::{By, Element};
use crate::error::{Error, Result};
use crate::wait::{WaitOptions, wait_for_visible};

use super::locators;

// ============================================================================
// ProductTab
// ============================================================================

/// Tabs of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductTab {
    /// General product details.
    ProductDetails,
    /// Configurable product variations.
    Variations,
    /// Images and videos.
    Images,
    /// Website assignment.
    Websites,
    /// Tier and special prices.
    AdvancedPricing,
    /// Stock settings.
    AdvancedInventory,
    /// URL key and meta data.
    SearchOptimization,
    /// Related, up-sell and cross-sell products.
    RelatedProducts,
    /// Customizable options.
    CustomOptions,
    /// Page layout and theme.
    Design,
    /// Gift messages.
    GiftOptions,
}

impl ProductTab {
    /// Every tab, in form order.
    pub const ALL: [Self; 11] = [
        Self::ProductDetails,
        Self::Variations,
        Self::Images,
        Self::Websites,
        Self::AdvancedPricing,
        Self::AdvancedInventory,
        Self::SearchOptimization,
        Self::RelatedProducts,
        Self::CustomOptions,
        Self::Design,
        Self::GiftOptions,
    ];

    /// Identifier used in fixtures and by string callers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductDetails => "product-details",
            Self::Variations => "variations",
            Self::Images => "images",
            Self::Websites => "websites",
            Self::AdvancedPricing => "advanced-pricing",
            Self::AdvancedInventory => "advanced-inventory",
            Self::SearchOptimization => "search-optimization",
            Self::RelatedProducts => "related-products",
            Self::CustomOptions => "custom-options",
            Self::Design => "design",
            Self::GiftOptions => "gift-options",
        }
    }

    /// Returns the tab's static descriptor.
    #[must_use]
    pub fn descriptor(self) -> TabDescriptor {
        use Fallback::AdvancedSettings;

        let (locator, fallback) = match self {
            Self::ProductDetails => (By::css("#product_info_tabs_product-details"), None),
            Self::Variations => (By::css(locators::VARIATIONS_TAB_TITLE), None),
            Self::Images => (By::css("#product_info_tabs_image-management"), None),
            Self::Websites => (By::css("#product_info_tabs_websites"), Some(AdvancedSettings)),
            Self::AdvancedPricing => (
                By::css("#product_info_tabs_advanced-pricing"),
                Some(AdvancedSettings),
            ),
            Self::AdvancedInventory => (
                By::css("#product_info_tabs_advanced-inventory"),
                Some(AdvancedSettings),
            ),
            Self::SearchOptimization => (
                By::css("#product_info_tabs_search-optimization"),
                Some(AdvancedSettings),
            ),
            Self::RelatedProducts => (
                By::xpath("//a[@id='product_info_tabs_related']"),
                Some(AdvancedSettings),
            ),
            Self::CustomOptions => (
                By::css("#product_info_tabs_customer_options"),
                Some(AdvancedSettings),
            ),
            Self::Design => (By::css("#product_info_tabs_design"), Some(AdvancedSettings)),
            Self::GiftOptions => (By::id("product_info_tabs_gift-options"), Some(AdvancedSettings)),
        };

        TabDescriptor {
            tab: self,
            locator,
            fallback,
        }
    }
}

impl fmt::Display for ProductTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductTab {
    type Err = Error;

    /// Parses a tab identifier.
    ///
    /// An unknown identifier is a configuration error.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| Error::config(format!("Unknown tab: {s:?}")))
    }
}

// ============================================================================
// TabDescriptor
// ============================================================================

/// Secondary path to a tab whose control may be hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// The control sits in the collapsed "Advanced Settings" section.
    AdvancedSettings,
}

/// Static binding of a tab to its control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    /// Tab described.
    pub tab: ProductTab,
    /// Locator of the clickable tab control (carries the lookup strategy).
    pub locator: By,
    /// Path used when the control is not directly visible.
    pub fallback: Option<Fallback>,
}

// ============================================================================
// TabNavigator
// ============================================================================

/// Opens product form tabs.
#[derive(Debug, Clone)]
pub struct TabNavigator {
    root: Element,
    wait: WaitOptions,
}

impl TabNavigator {
    /// Creates a navigator over the form root element.
    #[must_use]
    pub fn new(root: Element, wait: WaitOptions) -> Self {
        Self { root, wait }
    }

    /// Opens `tab`.
    ///
    /// Returns `Ok(false)` when neither the control nor a usable fallback is
    /// available; the caller decides whether that is an error.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if the tab list, the expanded panel or the revealed
    /// control never renders.
    pub async fn open(&self, tab: ProductTab) -> Result<bool> {
        let descriptor = tab.descriptor();
        debug!(tab = %tab, locator = %descriptor.locator, "Opening tab");

        wait_for_visible(&self.root, &By::css(locators::ADVANCED_TAB_LIST), &self.wait).await?;

        let control = self.root.find(descriptor.locator.clone());
        if control.is_visible().await? {
            control.click().await?;
            debug!(tab = %tab, "Opened tab directly");
            return Ok(true);
        }

        match descriptor.fallback {
            Some(Fallback::AdvancedSettings) => self.open_collapsed(&descriptor, &control).await,
            None => {
                warn!(tab = %tab, "Tab control is not visible");
                Ok(false)
            }
        }
    }

    /// Opens a tab by its string identifier.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for an unknown identifier, before any DOM access.
    pub async fn open_by_name(&self, name: &str) -> Result<bool> {
        let tab: ProductTab = name.parse()?;
        self.open(tab).await
    }

    async fn open_collapsed(&self, descriptor: &TabDescriptor, control: &Element) -> Result<bool> {
        let header = self.root.find(By::css(locators::ADVANCED_SETTINGS));
        if !header.is_visible().await? {
            warn!(tab = %descriptor.tab, "Tab is neither visible nor behind a collapsed section");
            return Ok(false);
        }

        debug!(tab = %descriptor.tab, "Expanding advanced settings");
        header.click().await?;
        wait_for_visible(&self.root, &By::css(locators::ADVANCED_TAB_PANEL), &self.wait).await?;
        wait_for_visible(&self.root, &descriptor.locator, &self.wait).await?;

        control.click().await?;
        debug!(tab = %descriptor.tab, "Opened tab through advanced settings");
        Ok(true)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use proptest::prelude::*;

    use crate::browser::{Effect, MemoryPage, Node, Session};

    fn fast() -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_secs(2))
            .with_interval(Duration::from_millis(50))
    }

    fn header() -> By {
        By::css(locators::ADVANCED_SETTINGS)
    }

    fn panel() -> By {
        By::css(locators::ADVANCED_TAB_PANEL)
    }

    /// Page whose tab list renders after a few polls.
    fn page() -> MemoryPage {
        let page = MemoryPage::new();
        page.insert(Node::new(By::css(locators::ADVANCED_TAB_LIST)).visible_after(2));
        page
    }

    /// Adds the collapsed section hiding `tab` until expanded.
    fn collapse(page: &MemoryPage, tab: ProductTab) {
        let locator = tab.descriptor().locator;
        page.insert(
            Node::new(header())
                .on_click(Effect::Hide(header()))
                .on_click(Effect::Show(panel()))
                .on_click(Effect::Show(locator.clone())),
        );
        page.insert(Node::new(panel()).hidden().visible_after(3));
        page.insert(Node::new(locator).hidden().visible_after(1));
    }

    #[test]
    fn test_parse_known_tab() {
        assert_eq!(
            "advanced-pricing".parse::<ProductTab>().unwrap(),
            ProductTab::AdvancedPricing
        );
    }

    #[test]
    fn test_descriptors_are_bound() {
        for tab in ProductTab::ALL {
            assert_eq!(tab.descriptor().tab, tab);
        }
        assert_eq!(ProductTab::ProductDetails.descriptor().fallback, None);
        assert_eq!(
            ProductTab::Design.descriptor().fallback,
            Some(Fallback::AdvancedSettings)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_direct_tab_skips_fallback() {
        let page = page();
        let tab = ProductTab::AdvancedPricing;
        // Both paths are available.
        page.insert(Node::new(header()).on_click(Effect::Show(panel())));
        page.insert(Node::new(panel()).hidden());
        page.insert(Node::new(tab.descriptor().locator));

        let navigator = TabNavigator::new(page.root(), fast());
        assert!(navigator.open(ProductTab::AdvancedPricing).await.unwrap());

        assert_eq!(
            page.clicks(),
            vec!["css:#product_info_tabs_advanced-pricing".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_collapsed_tab_expands_once() {
        let page = page();
        collapse(&page, ProductTab::SearchOptimization);

        let navigator = TabNavigator::new(page.root(), fast());
        assert!(navigator.open(ProductTab::SearchOptimization).await.unwrap());

        assert_eq!(
            page.clicks(),
            vec![
                header().to_string(),
                "css:#product_info_tabs_search-optimization".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_tab_returns_false() {
        let page = page();

        let navigator = TabNavigator::new(page.root(), fast());
        assert!(!navigator.open(ProductTab::Design).await.unwrap());
        assert!(!navigator.open(ProductTab::Images).await.unwrap());
        assert!(page.clicks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_without_fallback_ignores_header() {
        let page = page();
        page.insert(Node::new(header()));

        let navigator = TabNavigator::new(page.root(), fast());
        assert!(!navigator.open(ProductTab::Variations).await.unwrap());
        assert!(page.clicks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_name_is_config_error() {
        let page = page();

        let navigator = TabNavigator::new(page.root(), fast());
        let err = navigator.open_by_name("bogus").await.unwrap_err();
        assert!(err.is_config_error());
        assert!(page.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_list_never_rendered_times_out() {
        let page = MemoryPage::new();

        let navigator = TabNavigator::new(page.root(), fast());
        let err = navigator.open(ProductTab::ProductDetails).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panel_never_expands_times_out() {
        let page = page();
        let tab = ProductTab::Websites;
        page.insert(Node::new(header()));
        page.insert(Node::new(panel()).hidden());
        page.insert(Node::new(tab.descriptor().locator).hidden());

        let navigator = TabNavigator::new(page.root(), fast());
        let err = navigator.open(tab).await.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(page.clicks(), vec![header().to_string()]);
    }

    proptest! {
        #[test]
        fn prop_unknown_names_are_rejected(name in "[a-z_-]{0,24}") {
            let known = ProductTab::ALL.iter().any(|tab| tab.as_str() == name);
            let parsed = name.parse::<ProductTab>();
            if known {
                prop_assert!(parsed.is_ok());
            } else {
                prop_assert!(parsed.unwrap_err().is_config_error());
            }
        }
    }
}
