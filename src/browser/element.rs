//! Element capability consumed by the page objects.
//!
//! Handles are lazy, the way page-object frameworks usually treat them:
//! [`ElementHandle::find`] never fails, it only records where to look. The
//! lookup happens when the handle is acted upon. A missing element is simply
//! not visible; clicking or typing into it is an error.
//!
//! # Example
//!
//! ```ignore
//! let root = session.root();
//! let input = root.find(By::id("category_ids-suggest"));
//!
//! if !input.is_visible().await? {
//!     return Ok(());
//! }
//! input.set_value("Bags").await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

use super::selector::By;
use super::session::BrowserContext;

// ============================================================================
// Element
// ============================================================================

/// Shared handle to a (lazily resolved) DOM element.
pub type Element = Arc<dyn ElementHandle>;

/// Operations the page objects need from a DOM element.
///
/// Implemented by browser backends; the crate ships an in-memory one in
/// [`crate::browser::memory`].
#[async_trait]
pub trait ElementHandle: Send + Sync + fmt::Debug {
    /// Browsing context the handle is bound to.
    fn context(&self) -> &BrowserContext;

    /// Returns a lazy handle for `by`, scoped under this element.
    fn find(&self, by: By) -> Element;

    /// Resolves every element matching `by` under this element.
    async fn find_all(&self, by: By) -> Result<Vec<Element>>;

    /// Clicks the element.
    async fn click(&self) -> Result<()>;

    /// Replaces the element's value with `value`.
    async fn set_value(&self, value: &str) -> Result<()>;

    /// Returns `true` if the element exists and is rendered visibly.
    ///
    /// A missing element is reported as `Ok(false)`, never as an error.
    async fn is_visible(&self) -> Result<bool>;

    /// Returns the element's rendered text.
    async fn text(&self) -> Result<String>;
}
