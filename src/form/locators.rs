//! Locators of the product form controls the page objects act on.

use crate::browser::{By, xpath_literal};

// ============================================================================
// Form Controls
// ============================================================================

/// "Save" split button.
pub const SAVE_BUTTON: &str = "#save-split-button-button";

/// Frame container opened by "Create New Variation Set".
pub const NEW_ATTRIBUTE_FRAME: &str = "#create_new_attribute_container";

/// Tag scoping the attribute edit block inside the frame.
pub const NEW_ATTRIBUTE_ROOT_TAG: &str = "body";

/// Title of the Variations tab.
pub const VARIATIONS_TAB_TITLE: &str =
    r#"[data-ui-id="product-tabs-tab-content-super-config"] .title"#;

/// Container of the variation matrix block.
pub const VARIATIONS_WRAPPER: &str = r#"[data-ui-id="product-tabs-tab-content-super-config"]"#;

/// "Create New Variation Set" button.
pub const NEW_VARIATION_SET: &str =
    r#"[data-ui-id="admin-product-edit-tab-super-config-grid-container-add-attribute"]"#;

/// "Choose affected attribute set" dialog (XPath).
pub const AFFECTED_ATTRIBUTE_SET: &str = "//div[div/@data-id='affected-attribute-set-selector']";

// ============================================================================
// Tabs
// ============================================================================

/// Collapsed "Advanced Settings" header; only matches while not expanded.
pub const ADVANCED_SETTINGS: &str =
    r#"#ui-accordion-product_info_tabs-advanced-header-0[aria-selected="false"]"#;

/// Tab list rendered once the form has built its tabs.
pub const ADVANCED_TAB_LIST: &str = r#"#product_info_tabs-advanced[role="tablist"]"#;

/// Advanced settings panel once its expand animation is done.
pub const ADVANCED_TAB_PANEL: &str = r#"[role="tablist"] [role="tabpanel"][aria-expanded="true"]"#;

// ============================================================================
// Categories
// ============================================================================

/// Type-ahead input of the product's categories.
pub const CATEGORY_INPUT_ID: &str = "category_ids-suggest";

/// Container of the product's category control (XPath).
pub const CATEGORY_CONTAINER: &str = r#"//*[@id="attribute-category_ids-container"]"#;

/// Remove control of a selected category chip in the product's control.
pub const CATEGORY_CHIP_CLOSE: &str =
    "#attribute-category_ids-container li.mage-suggest-choice span.mage-suggest-choice-close";

/// "New Category" trigger.
pub const ADD_CATEGORY_BUTTON: &str = "#add_category_button";

/// Name field of the new category dialog.
pub const NEW_CATEGORY_NAME: &str = "input#new_category_name";

/// Type-ahead input of the new category's parent.
pub const NEW_CATEGORY_PARENT_INPUT_ID: &str = "new_category_parent-suggest";

/// Fieldset of the new category dialog (XPath).
pub const NEW_CATEGORY_FIELDSET: &str = r#"//*[@id="new_category_form_fieldset"]"#;

/// Remove control of the parent chip in the new category dialog.
pub const NEW_CATEGORY_PARENT_CHIP_CLOSE: &str =
    "#new_category_form_fieldset li.mage-suggest-choice span.mage-suggest-choice-close";

/// Confirm button of the new category dialog.
pub const NEW_CATEGORY_CONFIRM: &str = "div.ui-dialog-buttonset button.action-create";

/// Suggestion dropdown, relative to a type-ahead container.
pub const SUGGEST_DROPDOWN: &str = r#"//div[@class="mage-suggest-dropdown"]"#;

/// Clickable suggestion entries, relative to a type-ahead container.
pub const SUGGEST_OPTION: &str = "//li[@data-suggest-option]//a";

/// Chip rendered for an already selected category named `name`.
#[must_use]
pub fn category_chip(name: &str) -> By {
    By::xpath(format!(
        r#"//*[contains(@class, "mage-suggest-choice")]/*[text()={}]"#,
        xpath_literal(name)
    ))
}
