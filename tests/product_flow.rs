//! End-to-end product form flows on an in-memory page.
//!
//! Run with: RUST_LOG=product_form_driver=debug cargo test --test product_flow

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use product_form_driver::browser::{Effect, MemoryPage, Node, PageEvent};
use product_form_driver::form::{
    AffectedAttributeSetBlock, AttributeEditBlock, SuggestField, VariationMatrixBlock, locators,
};
use product_form_driver::{
    AttributeOptionGroup, AttributeSetChoice, BlockFactory, By, ConfigurableOption, Element,
    FieldMapping, FormOptions, MappedFieldsForm, ProductFixture, ProductForm, ProductTab, Result,
    Session, WaitOptions,
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Setup
// ============================================================================

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_form_driver=info")),
        )
        .with_target(false)
        .with_test_writer()
        .try_init();
}

const FIXTURE: &str = r#"{
    "categoryName": "Bags",
    "fields": { "name": "Joust Duffle Bag", "sku": "MH-DUFFLE", "price": 34 },
    "attributeOptions": [
        {
            "attributeLabel": "Size",
            "frontendInput": "Dropdown",
            "options": [
                { "adminLabel": "S", "isDefault": true },
                { "adminLabel": "M" }
            ]
        }
    ],
    "configurableOptions": [
        {
            "attributeLabel": "Size",
            "values": [
                { "label": "S", "pricingValue": "10" },
                { "label": "M", "include": false }
            ]
        }
    ],
    "affectedAttributeSet": { "mode": "new", "name": "Bags Set" }
}"#;

/// Blocks writing what they receive to the page journal.
struct JournalBlocks {
    page: MemoryPage,
}

struct Journal {
    page: MemoryPage,
    scope: Element,
}

#[async_trait]
impl AttributeEditBlock for Journal {
    async fn fill_attribute_options(&self, groups: &[AttributeOptionGroup]) -> Result<()> {
        for group in groups {
            self.page.note(format!(
                "define {} ({} options) in {}",
                group.attribute_label,
                group.options.len(),
                self.scope.context()
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl VariationMatrixBlock for Journal {
    async fn fill_attribute_options(&self, options: &[ConfigurableOption]) -> Result<()> {
        for option in options {
            let included = option.values.iter().filter(|v| v.include).count();
            self.page
                .note(format!("matrix {} ({included} values)", option.attribute_label));
        }
        Ok(())
    }

    async fn generate_variations(&self) -> Result<()> {
        self.page.note("generate");
        Ok(())
    }
}

#[async_trait]
impl AffectedAttributeSetBlock for Journal {
    async fn is_visible(&self) -> Result<bool> {
        self.scope.is_visible().await
    }

    async fn choose_attribute_set(&self, choice: Option<&AttributeSetChoice>) -> Result<()> {
        let answer = match choice {
            Some(AttributeSetChoice::New { name }) => format!("new set {name}"),
            Some(AttributeSetChoice::Current) | None => "current set".to_string(),
        };
        self.page.note(answer);
        Ok(())
    }
}

impl BlockFactory for JournalBlocks {
    fn attribute_edit(&self, scope: Element) -> Box<dyn AttributeEditBlock> {
        Box::new(Journal {
            page: self.page.clone(),
            scope,
        })
    }

    fn variation_matrix(&self, scope: Element) -> Box<dyn VariationMatrixBlock> {
        Box::new(Journal {
            page: self.page.clone(),
            scope,
        })
    }

    fn affected_attribute_set(&self, scope: Element) -> Box<dyn AffectedAttributeSetBlock> {
        Box::new(Journal {
            page: self.page.clone(),
            scope,
        })
    }
}

/// Product form page: tabs, category field, frame and save dialog.
fn product_page() -> MemoryPage {
    let page = MemoryPage::new();
    let frame = By::css(locators::NEW_ATTRIBUTE_FRAME);
    let dialog = By::xpath(locators::AFFECTED_ATTRIBUTE_SET);

    page.insert(Node::new(By::css(locators::ADVANCED_TAB_LIST)).visible_after(1));
    page.insert(Node::new(ProductTab::ProductDetails.descriptor().locator));
    page.insert(Node::new(By::id("name")));
    page.insert(Node::new(By::id("sku")));
    page.insert(Node::new(By::id("price")));

    let field = SuggestField::product_categories();
    page.insert(Node::new(field.input.clone()).on_input(Effect::Show(field.dropdown())));
    page.insert(Node::new(field.dropdown()).hidden().visible_after(3));
    for label in ["Bags & Totes", "Bags"] {
        page.insert(Node::new(field.suggestions()).text(label));
    }

    page.insert(
        Node::new(By::css(locators::NEW_VARIATION_SET)).on_click(Effect::Show(frame.clone())),
    );
    page.insert(Node::new(frame.clone()).hidden().visible_after(2));
    page.insert(Node::new(By::tag(locators::NEW_ATTRIBUTE_ROOT_TAG)).in_frame(frame));
    page.insert(Node::new(By::css(locators::VARIATIONS_WRAPPER)));

    page.insert(Node::new(By::css(locators::SAVE_BUTTON)).on_click(Effect::Show(dialog.clone())));
    page.insert(Node::new(dialog).hidden());
    page
}

fn product_form(page: &MemoryPage) -> ProductForm {
    let options = FormOptions::new().with_wait(
        WaitOptions::new()
            .with_timeout(Duration::from_secs(5))
            .with_interval(Duration::from_millis(100)),
    );
    let base = MappedFieldsForm::new(
        page.root(),
        options.wait,
        vec![
            FieldMapping::new("name", By::id("name")).on_tab(ProductTab::ProductDetails),
            FieldMapping::new("sku", By::id("sku")).on_tab(ProductTab::ProductDetails),
            FieldMapping::new("price", By::id("price")).on_tab(ProductTab::ProductDetails),
        ],
    );

    ProductForm::new(
        Arc::new(page.clone()),
        Arc::new(base),
        Arc::new(JournalBlocks { page: page.clone() }),
        options,
    )
    .expect("valid form")
}

fn notes(page: &MemoryPage) -> Vec<String> {
    page.events()
        .into_iter()
        .filter_map(|event| match event {
            PageEvent::Note(note) => Some(note),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Flows
// ============================================================================

#[tokio::test(start_paused = true)]
async fn create_configurable_product() {
    init_logging();
    let page = product_page();
    let form = product_form(&page);
    let fixture = ProductFixture::from_json(FIXTURE).expect("fixture");

    form.fill(&fixture).await.expect("fill");
    form.save(&fixture).await.expect("save");

    assert_eq!(page.value_of(&By::id("name")).as_deref(), Some("Joust Duffle Bag"));
    assert_eq!(page.value_of(&By::id("price")).as_deref(), Some("34"));
    assert_eq!(
        notes(&page),
        vec![
            "define Size (2 options) in frame(css:#create_new_attribute_container)".to_string(),
            "matrix Size (1 values)".to_string(),
            "generate".to_string(),
            "new set Bags Set".to_string(),
        ]
    );
    assert!(page.active_context().is_top_level());
}

#[tokio::test(start_paused = true)]
async fn simple_product_skips_variation_flows() {
    init_logging();
    let page = product_page();
    let form = product_form(&page);
    let fixture = ProductFixture::default().with_field("sku", "MH-SIMPLE");

    form.fill(&fixture).await.expect("fill");

    assert!(notes(&page).is_empty());
    assert!(
        !page
            .events()
            .iter()
            .any(|event| matches!(event, PageEvent::SwitchToFrame(_)))
    );
    assert_eq!(page.value_of(&By::id("sku")).as_deref(), Some("MH-SIMPLE"));
}

#[tokio::test(start_paused = true)]
async fn tabs_open_by_name() {
    init_logging();
    let page = product_page();
    let form = product_form(&page);

    assert!(form.open_tab_by_name("product-details").await.expect("open"));
    assert!(!form.open_tab(ProductTab::GiftOptions).await.expect("open"));
    assert!(form.open_tab_by_name("gifts").await.unwrap_err().is_config_error());
}
