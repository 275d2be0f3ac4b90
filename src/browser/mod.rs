//! Browser capability boundary.
//!
//! The page objects never talk to a browser directly. They consume two
//! capabilities that any async driver can provide:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ElementHandle`] | Lazy element: find, click, type, visibility |
//! | [`Session`] | Active browsing context and frame switching |
//! | [`By`] | Locator with its lookup strategy |
//! | [`MemoryPage`] | In-memory backend for tests and dry runs |
//!
//! # Example
//!
//! ```ignore
//! use product_form_driver::browser::{within_frame, By, Session};
//!
//! let title = within_frame(&*session, &By::css("#editor"), |root| async move {
//!     root.find(By::css("h1")).text().await
//! })
//! .await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Element capability.
pub mod element;

/// In-memory page model.
pub mod memory;

/// Element locator strategies.
pub mod selector;

/// Browsing context capability and frame scoping.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use element::{Element, ElementHandle};
pub use memory::{Effect, MemoryPage, Node, PageEvent};
pub use selector::{By, xpath_literal};
pub use session::{BrowserContext, Session, ensure_top_level, within_frame};
