//! Ordinary product fields filled from a key mapping.
//!
//! [`MappedFieldsForm`] is the stock [`BaseForm`]: every fixture field with a
//! [`FieldMapping`] is typed into its input, after opening the tab it lives
//! on. Fixture fields without a mapping are ignored.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::browser::{By, BrowserContext, Element};
use crate::error::{Error, Result};
use crate::fixture::FormFixture;
use crate::wait::WaitOptions;

use super::blocks::BaseForm;
use super::locators;
use super::tabs::{ProductTab, TabNavigator};

// ============================================================================
// FieldMapping
// ============================================================================

/// Binds a fixture field to its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Fixture field name.
    pub key: String,
    /// Input the value is typed into.
    pub locator: By,
    /// Tab the input lives on; `None` for fields outside any tab.
    pub tab: Option<ProductTab>,
}

impl FieldMapping {
    /// Maps `key` to an input outside any tab.
    #[must_use]
    pub fn new(key: impl Into<String>, locator: impl Into<By>) -> Self {
        Self {
            key: key.into(),
            locator: locator.into(),
            tab: None,
        }
    }

    /// Places the input on `tab`.
    #[must_use]
    pub fn on_tab(mut self, tab: ProductTab) -> Self {
        self.tab = Some(tab);
        self
    }
}

/// Renders a fixture value the way it is typed into an input.
///
/// `Ok(None)` for `null`, which leaves the field untouched.
fn input_text(key: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(if *b { "1" } else { "0" }.to_string())),
        Value::Array(_) | Value::Object(_) => Err(Error::invalid_argument(format!(
            "Field {key:?} has no text form"
        ))),
    }
}

// ============================================================================
// MappedFieldsForm
// ============================================================================

/// [`BaseForm`] filling fixture fields through a [`FieldMapping`] list.
#[derive(Debug, Clone)]
pub struct MappedFieldsForm {
    root: Element,
    tabs: TabNavigator,
    mapping: Vec<FieldMapping>,
}

impl MappedFieldsForm {
    /// Creates a form over the form root element.
    #[must_use]
    pub fn new(root: Element, wait: WaitOptions, mapping: Vec<FieldMapping>) -> Self {
        Self {
            tabs: TabNavigator::new(root.clone(), wait),
            root,
            mapping,
        }
    }

    /// Field mapping, in fill order.
    #[inline]
    #[must_use]
    pub fn mapping(&self) -> &[FieldMapping] {
        &self.mapping
    }
}

#[async_trait]
impl BaseForm for MappedFieldsForm {
    /// Fills mapped fields in mapping order.
    ///
    /// A tab is opened only when the next field lives on a different tab
    /// than the previous one.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotFound`] if a field's tab cannot be opened
    /// - [`Error::InvalidArgument`] for array or object values
    async fn fill(&self, fixture: &dyn FormFixture) -> Result<()> {
        let fields = fixture.fields();
        let mut current_tab = None;
        let mut filled = 0usize;

        for mapping in &self.mapping {
            let Some(value) = fields.get(&mapping.key) else {
                continue;
            };
            let Some(text) = input_text(&mapping.key, value)? else {
                continue;
            };

            if let Some(tab) = mapping.tab
                && current_tab != Some(tab)
            {
                if !self.tabs.open(tab).await? {
                    return Err(Error::element_not_found(
                        tab.descriptor().locator.to_string(),
                        BrowserContext::TopLevel,
                    ));
                }
                current_tab = Some(tab);
            }

            debug!(field = %mapping.key, locator = %mapping.locator, "Filling field");
            self.root.find(mapping.locator.clone()).set_value(&text).await?;
            filled += 1;
        }

        info!(filled, "Filled mapped fields");
        Ok(())
    }

    async fn save(&self, _fixture: &dyn FormFixture) -> Result<()> {
        self.root.find(By::css(locators::SAVE_BUTTON)).click().await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use serde_json::json;

    use crate::browser::{MemoryPage, Node, PageEvent, Session};
    use crate::fixture::ProductFixture;

    fn fast() -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_secs(2))
            .with_interval(Duration::from_millis(50))
    }

    fn page() -> MemoryPage {
        let page = MemoryPage::new();
        page.insert(Node::new(By::css(locators::ADVANCED_TAB_LIST)));
        page.insert(Node::new(ProductTab::ProductDetails.descriptor().locator));
        page.insert(Node::new(By::id("name")));
        page.insert(Node::new(By::id("sku")));
        page.insert(Node::new(By::id("status")));
        page
    }

    fn mapping() -> Vec<FieldMapping> {
        vec![
            FieldMapping::new("name", By::id("name")).on_tab(ProductTab::ProductDetails),
            FieldMapping::new("sku", By::id("sku")).on_tab(ProductTab::ProductDetails),
            FieldMapping::new("status", By::id("status")),
        ]
    }

    #[test]
    fn test_input_text() {
        assert_eq!(input_text("k", &json!("Bag")).unwrap().as_deref(), Some("Bag"));
        assert_eq!(input_text("k", &json!(12.5)).unwrap().as_deref(), Some("12.5"));
        assert_eq!(input_text("k", &json!(true)).unwrap().as_deref(), Some("1"));
        assert_eq!(input_text("k", &json!(false)).unwrap().as_deref(), Some("0"));
        assert_eq!(input_text("k", &Value::Null).unwrap(), None);
        assert!(input_text("k", &json!([1])).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fill_opens_tab_once() {
        let page = page();
        let form = MappedFieldsForm::new(page.root(), fast(), mapping());
        let fixture = ProductFixture::default()
            .with_field("name", "Joust Duffle Bag")
            .with_field("sku", "MH-DUFFLE")
            .with_field("status", true)
            .with_field("unmapped", "ignored");

        form.fill(&fixture).await.unwrap();

        assert_eq!(
            page.events(),
            vec![
                PageEvent::Click("css:#product_info_tabs_product-details".into()),
                PageEvent::SetValue {
                    target: "id:name".into(),
                    value: "Joust Duffle Bag".into(),
                },
                PageEvent::SetValue {
                    target: "id:sku".into(),
                    value: "MH-DUFFLE".into(),
                },
                PageEvent::SetValue {
                    target: "id:status".into(),
                    value: "1".into(),
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fill_skips_absent_fields() {
        let page = page();
        let form = MappedFieldsForm::new(page.root(), fast(), mapping());

        form.fill(&ProductFixture::default().with_field("status", 0))
            .await
            .unwrap();

        assert_eq!(page.value_of(&By::id("status")).as_deref(), Some("0"));
        assert!(page.clicks().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fill_unreachable_tab_is_not_found() {
        let page = page();
        let form = MappedFieldsForm::new(
            page.root(),
            fast(),
            vec![FieldMapping::new("weight", By::id("weight")).on_tab(ProductTab::Images)],
        );

        let err = form
            .fill(&ProductFixture::default().with_field("weight", 2))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_save_clicks_save_button() {
        let page = MemoryPage::new();
        page.insert(Node::new(By::css(locators::SAVE_BUTTON)));
        let form = MappedFieldsForm::new(page.root(), fast(), Vec::new());

        form.save(&ProductFixture::default()).await.unwrap();
        assert_eq!(page.clicks(), vec!["css:#save-split-button-button".to_string()]);
    }
}
