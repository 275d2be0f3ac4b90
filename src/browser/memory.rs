//! In-memory page model.
//!
//! [`MemoryPage`] implements [`Session`] and [`ElementHandle`] without a
//! browser. Nodes are registered up front with the locator that finds them;
//! lookups are flat per browsing context, so a scoped `find` resolves the
//! same node as a root-level one. Every action is appended to an ordered
//! journal that tests assert against.
//!
//! Rendering delays are modelled with [`Node::visible_after`]: a node stays
//! invisible for that many visibility checks, which is what a polling wait
//! observes while the real page animates.
//!
//! # Example
//!
//! ```ignore
//! use product_form_driver::browser::memory::{Effect, MemoryPage, Node};
//!
//! let page = MemoryPage::new();
//! page.insert(Node::new(By::css("#open")).on_click(Effect::Show(By::css("#panel"))));
//! page.insert(Node::new(By::css("#panel")).hidden().visible_after(2));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{Error, Result};

use super::element::{Element, ElementHandle};
use super::selector::By;
use super::session::{BrowserContext, Session};

// ============================================================================
// Types
// ============================================================================

/// Change applied to the page when a node is clicked or typed into.
///
/// Effects target nodes in the same context as the node that triggered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Renders every node matching the locator.
    Show(By),
    /// Hides every node matching the locator.
    Hide(By),
}

/// Entry of the page journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A node was clicked (locator display form).
    Click(String),
    /// A node's value was replaced.
    SetValue {
        /// Locator display form.
        target: String,
        /// New value.
        value: String,
    },
    /// Lookups moved into a frame (frame locator display form).
    SwitchToFrame(String),
    /// Lookups moved back to the top-level document.
    SwitchToDefault,
    /// Free-form marker recorded by collaborators.
    Note(String),
}

/// Node registration.
#[derive(Debug, Clone)]
pub struct Node {
    by: By,
    context: BrowserContext,
    text: String,
    visible: bool,
    reveal_after: u32,
    on_click: Vec<Effect>,
    on_input: Vec<Effect>,
}

impl Node {
    /// Creates a visible top-level node found by `by`.
    #[must_use]
    pub fn new(by: By) -> Self {
        Self {
            by,
            context: BrowserContext::TopLevel,
            text: String::new(),
            visible: true,
            reveal_after: 0,
            on_click: Vec::new(),
            on_input: Vec::new(),
        }
    }

    /// Places the node inside the frame matched by `frame`.
    #[must_use]
    pub fn in_frame(mut self, frame: By) -> Self {
        self.context = BrowserContext::Frame(frame);
        self
    }

    /// Sets the rendered text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Registers the node as present but not rendered.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Keeps the node invisible for `checks` visibility queries once shown.
    #[must_use]
    pub fn visible_after(mut self, checks: u32) -> Self {
        self.reveal_after = checks;
        self
    }

    /// Adds an effect applied when the node is clicked.
    #[must_use]
    pub fn on_click(mut self, effect: Effect) -> Self {
        self.on_click.push(effect);
        self
    }

    /// Adds an effect applied when a value is typed into the node.
    #[must_use]
    pub fn on_input(mut self, effect: Effect) -> Self {
        self.on_input.push(effect);
        self
    }
}

struct NodeState {
    node: Node,
    value: String,
}

impl NodeState {
    fn is_rendered(&self) -> bool {
        self.node.visible && self.node.reveal_after == 0
    }
}

#[derive(Default)]
struct PageState {
    nodes: Vec<NodeState>,
    index: FxHashMap<(BrowserContext, By), Vec<usize>>,
    active: BrowserContext,
    events: Vec<PageEvent>,
}

impl PageState {
    fn lookup(&self, context: &BrowserContext, by: &By) -> &[usize] {
        self.index
            .get(&(context.clone(), by.clone()))
            .map_or(&[][..], Vec::as_slice)
    }

    fn resolve(&self, context: &BrowserContext, by: &By, index: Option<usize>) -> Option<usize> {
        index.or_else(|| self.lookup(context, by).first().copied())
    }

    fn ensure_active(&self, context: &BrowserContext) -> Result<()> {
        if *context == self.active {
            return Ok(());
        }
        Err(Error::driver(format!(
            "element bound to {context} used while {} is active",
            self.active
        )))
    }

    /// Visibility query; counts down pending reveals.
    fn check_visible(&mut self, slot: usize) -> bool {
        let node = &mut self.nodes[slot].node;
        if !node.visible {
            return false;
        }
        if node.reveal_after > 0 {
            node.reveal_after -= 1;
            return false;
        }
        true
    }

    fn apply(&mut self, context: &BrowserContext, effects: &[Effect]) {
        for effect in effects {
            let (by, visible) = match effect {
                Effect::Show(by) => (by, true),
                Effect::Hide(by) => (by, false),
            };
            let slots = self.lookup(context, by).to_vec();
            for slot in slots {
                self.nodes[slot].node.visible = visible;
            }
        }
    }
}

// ============================================================================
// MemoryPage
// ============================================================================

/// Scripted page implementing the session and element capabilities.
///
/// Cloning shares the same page.
#[derive(Clone, Default)]
pub struct MemoryPage {
    inner: Arc<Mutex<PageState>>,
}

impl fmt::Debug for MemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("MemoryPage")
            .field("nodes", &state.nodes.len())
            .field("active", &state.active)
            .finish_non_exhaustive()
    }
}

impl MemoryPage {
    /// Creates an empty page with the top-level context active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node.
    pub fn insert(&self, node: Node) {
        let mut state = self.inner.lock();
        let slot = state.nodes.len();

        state
            .index
            .entry((node.context.clone(), node.by.clone()))
            .or_default()
            .push(slot);
        state.nodes.push(NodeState {
            node,
            value: String::new(),
        });
    }

    /// Records a collaborator marker in the journal.
    pub fn note(&self, message: impl Into<String>) {
        self.inner.lock().events.push(PageEvent::Note(message.into()));
    }

    /// Returns a copy of the journal.
    #[must_use]
    pub fn events(&self) -> Vec<PageEvent> {
        self.inner.lock().events.clone()
    }

    /// Returns the locators of every click, in order.
    #[must_use]
    pub fn clicks(&self) -> Vec<String> {
        self.inner
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Click(target) => Some(target.clone()),
                _ => None,
            })
            .collect()
    }

    /// Value last typed into the first top-level node matching `by`.
    #[must_use]
    pub fn value_of(&self, by: &By) -> Option<String> {
        let state = self.inner.lock();
        let slot = state.resolve(&BrowserContext::TopLevel, by, None)?;
        Some(state.nodes[slot].value.clone())
    }

    /// Whether the first top-level node matching `by` is rendered.
    ///
    /// Unlike [`ElementHandle::is_visible`], this does not count down reveals.
    #[must_use]
    pub fn is_shown(&self, by: &By) -> bool {
        let state = self.inner.lock();
        state
            .resolve(&BrowserContext::TopLevel, by, None)
            .is_some_and(|slot| state.nodes[slot].is_rendered())
    }

    fn handle(&self, context: BrowserContext, by: Option<By>, slot: Option<usize>) -> Element {
        Arc::new(MemoryElement {
            page: self.clone(),
            context,
            by,
            slot,
        })
    }
}

// ============================================================================
// MemoryPage - Session
// ============================================================================

#[async_trait]
impl Session for MemoryPage {
    fn root(&self) -> Element {
        let context = self.inner.lock().active.clone();
        self.handle(context, None, None)
    }

    fn active_context(&self) -> BrowserContext {
        self.inner.lock().active.clone()
    }

    async fn switch_to_frame(&self, frame: &By) -> Result<()> {
        let mut state = self.inner.lock();
        let active = state.active.clone();
        let rendered = state
            .resolve(&active, frame, None)
            .is_some_and(|slot| state.nodes[slot].is_rendered());
        if !rendered {
            return Err(Error::element_not_found(frame.to_string(), active));
        }

        debug!(frame = %frame, "Switching to frame");
        state.active = BrowserContext::Frame(frame.clone());
        state.events.push(PageEvent::SwitchToFrame(frame.to_string()));
        Ok(())
    }

    async fn switch_to_default_content(&self) -> Result<()> {
        let mut state = self.inner.lock();
        debug!(from = %state.active, "Switching to top-level document");
        state.active = BrowserContext::TopLevel;
        state.events.push(PageEvent::SwitchToDefault);
        Ok(())
    }
}

// ============================================================================
// MemoryElement
// ============================================================================

struct MemoryElement {
    page: MemoryPage,
    context: BrowserContext,
    by: Option<By>,
    slot: Option<usize>,
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryElement")
            .field("context", &self.context)
            .field("by", &self.by)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl MemoryElement {
    fn target(&self) -> Result<&By> {
        self.by
            .as_ref()
            .ok_or_else(|| Error::driver(format!("cannot act on the {} root", self.context)))
    }

    fn not_found(&self, by: &By) -> Error {
        Error::element_not_found(by.to_string(), self.context.clone())
    }
}

#[async_trait]
impl ElementHandle for MemoryElement {
    fn context(&self) -> &BrowserContext {
        &self.context
    }

    fn find(&self, by: By) -> Element {
        self.page.handle(self.context.clone(), Some(by), None)
    }

    async fn find_all(&self, by: By) -> Result<Vec<Element>> {
        let slots = {
            let state = self.page.inner.lock();
            state.ensure_active(&self.context)?;
            state.lookup(&self.context, &by).to_vec()
        };

        Ok(slots
            .into_iter()
            .map(|slot| {
                self.page
                    .handle(self.context.clone(), Some(by.clone()), Some(slot))
            })
            .collect())
    }

    async fn click(&self) -> Result<()> {
        let by = self.target()?;
        let mut state = self.page.inner.lock();
        state.ensure_active(&self.context)?;

        let slot = state
            .resolve(&self.context, by, self.slot)
            .ok_or_else(|| self.not_found(by))?;
        if !state.nodes[slot].is_rendered() {
            return Err(Error::driver(format!("element {by} is not visible")));
        }

        state.events.push(PageEvent::Click(by.to_string()));
        let effects = state.nodes[slot].node.on_click.clone();
        state.apply(&self.context, &effects);
        Ok(())
    }

    async fn set_value(&self, value: &str) -> Result<()> {
        let by = self.target()?;
        let mut state = self.page.inner.lock();
        state.ensure_active(&self.context)?;

        let slot = state
            .resolve(&self.context, by, self.slot)
            .ok_or_else(|| self.not_found(by))?;
        if !state.nodes[slot].is_rendered() {
            return Err(Error::driver(format!("element {by} is not visible")));
        }

        state.nodes[slot].value = value.to_string();
        state.events.push(PageEvent::SetValue {
            target: by.to_string(),
            value: value.to_string(),
        });
        let effects = state.nodes[slot].node.on_input.clone();
        state.apply(&self.context, &effects);
        Ok(())
    }

    async fn is_visible(&self) -> Result<bool> {
        let mut state = self.page.inner.lock();
        state.ensure_active(&self.context)?;

        let Some(by) = self.by.as_ref() else {
            return Ok(true);
        };
        Ok(match state.resolve(&self.context, by, self.slot) {
            Some(slot) => state.check_visible(slot),
            None => false,
        })
    }

    async fn text(&self) -> Result<String> {
        let by = self.target()?;
        let state = self.page.inner.lock();
        state.ensure_active(&self.context)?;

        let slot = state
            .resolve(&self.context, by, self.slot)
            .ok_or_else(|| self.not_found(by))?;
        Ok(state.nodes[slot].node.text.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
