//! Browsing context capability and frame scoping.
//!
//! A session has exactly one active [`BrowserContext`]: the top-level
//! document or one embedded frame. Lookups made through [`Session::root`]
//! target whichever context is active when it is called.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

use super::element::Element;
use super::selector::By;

// ============================================================================
// BrowserContext
// ============================================================================

/// Document that element lookups are directed at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "frame", rename_all = "camelCase")]
pub enum BrowserContext {
    /// The page's own document.
    #[default]
    TopLevel,
    /// A document embedded through the frame element matched by the locator.
    Frame(By),
}

impl BrowserContext {
    /// Returns `true` for the top-level document.
    #[inline]
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        matches!(self, Self::TopLevel)
    }
}

impl fmt::Display for BrowserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopLevel => f.write_str("top-level"),
            Self::Frame(by) => write!(f, "frame({by})"),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Context switching capability of a browser session.
#[async_trait]
pub trait Session: Send + Sync {
    /// Document root of the currently active context.
    fn root(&self) -> Element;

    /// Context element lookups currently target.
    fn active_context(&self) -> BrowserContext;

    /// Redirects lookups into the frame matched by `frame`.
    async fn switch_to_frame(&self, frame: &By) -> Result<()>;

    /// Redirects lookups back to the top-level document.
    async fn switch_to_default_content(&self) -> Result<()>;
}

// ============================================================================
// Frame Scoping
// ============================================================================

/// Runs `work` inside the frame matched by `frame`.
///
/// `work` receives the frame's document root. The top-level context is
/// restored on every exit path, including when `work` fails; the error from
/// `work` takes precedence over a failure to restore.
///
/// # Example
///
/// ```ignore
/// let label = within_frame(&*session, &By::css("#editor"), |root| async move {
///     root.find(By::css("h1")).text().await
/// })
/// .await?;
/// ```
pub async fn within_frame<S, F, Fut, T>(session: &S, frame: &By, work: F) -> Result<T>
where
    S: Session + ?Sized,
    F: FnOnce(Element) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    debug!(frame = %frame, "Entering frame");
    session.switch_to_frame(frame).await?;

    let outcome = work(session.root()).await;
    let restored = session.switch_to_default_content().await;
    debug!(frame = %frame, ok = outcome.is_ok(), "Left frame");

    match (outcome, restored) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), restored) => {
            if let Err(restore_err) = restored {
                warn!(frame = %frame, error = %restore_err, "Failed to restore top-level context");
            }
            Err(e)
        }
    }
}

/// Switches to the top-level document unless it is already active.
pub async fn ensure_top_level<S>(session: &S) -> Result<()>
where
    S: Session + ?Sized,
{
    if session.active_context().is_top_level() {
        return Ok(());
    }
    debug!(from = %session.active_context(), "Restoring top-level context");
    session.switch_to_default_content().await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::memory::{MemoryPage, Node, PageEvent};
    use crate::error::Error;

    fn frame() -> By {
        By::css("#create_new_attribute_container")
    }

    fn page_with_frame() -> MemoryPage {
        let page = MemoryPage::new();
        page.insert(Node::new(frame()));
        page.insert(Node::new(By::tag("body")).in_frame(frame()).text("frame body"));
        page
    }

    #[test]
    fn test_context_display() {
        assert_eq!(BrowserContext::TopLevel.to_string(), "top-level");
        assert_eq!(
            BrowserContext::Frame(By::id("f")).to_string(),
            "frame(id:f)"
        );
    }

    #[tokio::test]
    async fn test_within_frame_restores_on_success() {
        let page = page_with_frame();

        let text = within_frame(&page, &frame(), |root| async move {
            assert_eq!(root.context(), &BrowserContext::Frame(frame()));
            root.find(By::tag("body")).text().await
        })
        .await
        .unwrap();

        assert_eq!(text, "frame body");
        assert!(page.active_context().is_top_level());
        assert_eq!(
            page.events(),
            vec![
                PageEvent::SwitchToFrame(frame().to_string()),
                PageEvent::SwitchToDefault,
            ]
        );
    }

    #[tokio::test]
    async fn test_within_frame_restores_on_error() {
        let page = page_with_frame();

        let result: Result<()> = within_frame(&page, &frame(), |_root| async move {
            Err(Error::driver("block failed"))
        })
        .await;

        assert!(matches!(result, Err(Error::Driver { .. })));
        assert!(page.active_context().is_top_level());
    }

    #[tokio::test]
    async fn test_within_frame_missing_frame() {
        let page = MemoryPage::new();

        let result = within_frame(&page, &frame(), |_root| async move { Ok(()) }).await;

        assert!(result.unwrap_err().is_not_found());
        assert!(page.events().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_top_level_is_noop_at_top() {
        let page = page_with_frame();
        ensure_top_level(&page).await.unwrap();
        assert!(page.events().is_empty());

        page.switch_to_frame(&frame()).await.unwrap();
        ensure_top_level(&page).await.unwrap();
        assert!(page.active_context().is_top_level());
        assert_eq!(page.events().last(), Some(&PageEvent::SwitchToDefault));
    }
}
