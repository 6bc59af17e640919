//! Scripted in-memory page for deterministic tests.
//!
//! [`MockPage`] implements [`ElementQuery`] over a flat list of scripted
//! nodes, so resolution behavior can be exercised without a browser.
//! Timing is modeled in query counts rather than wall time: a node can be
//! scripted to appear after N `find_all` calls or to vanish after M, which
//! makes polling behavior and trigger/re-scan races reproducible.
//!
//! All mutators take `&self`; pages are usually shared as
//! `Arc<MockPage>` between the resolver under test and the test body.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::locator::Locator;
use crate::query::{ElementHandle, ElementQuery};
use crate::result::{EsperarError, EsperarResult};

// =============================================================================
// MOCK NODE
// =============================================================================

/// A scripted node in the mock page.
#[derive(Debug, Clone)]
pub struct MockNode {
    id: String,
    tag: String,
    text: String,
    displayed: bool,
    enabled: bool,
    selected: bool,
    attributes: HashMap<String, String>,
    parent: Option<String>,
    matched_by: Vec<Locator>,
    present_after: u64,
    removed_after: Option<u64>,
}

impl MockNode {
    /// Create a node that is displayed and enabled from the first query
    #[must_use]
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            text: String::new(),
            displayed: true,
            enabled: true,
            selected: false,
            attributes: HashMap::new(),
            parent: None,
            matched_by: Vec::new(),
            present_after: 0,
            removed_after: None,
        }
    }

    /// Set the node's text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Attach the node under a parent node id
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent = Some(parent_id.into());
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Register a locator this node is found by
    #[must_use]
    pub fn matched_by(mut self, locator: Locator) -> Self {
        self.matched_by.push(locator);
        self
    }

    /// Set displayed state
    #[must_use]
    pub const fn displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Set enabled state
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set selected state
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Keep the node out of the tree for the first `queries` `find_all`
    /// calls, modeling content that is still rendering
    #[must_use]
    pub const fn present_after_queries(mut self, queries: u64) -> Self {
        self.present_after = queries;
        self
    }

    /// Remove the node from the tree after `queries` `find_all` calls,
    /// modeling content that unmounts mid-resolution
    #[must_use]
    pub const fn removed_after_queries(mut self, queries: u64) -> Self {
        self.removed_after = Some(queries);
        self
    }

    fn in_tree_at(&self, call: u64) -> bool {
        call > self.present_after && self.removed_after.map_or(true, |last| call <= last)
    }
}

// =============================================================================
// MOCK PAGE
// =============================================================================

#[derive(Debug, Default)]
struct PageState {
    nodes: Vec<MockNode>,
    find_calls: u64,
    find_calls_by_locator: HashMap<Locator, u64>,
    failure: Option<String>,
}

impl PageState {
    fn is_descendant_of(&self, node: &MockNode, ancestor_id: &str) -> bool {
        let mut current = node.parent.as_deref();
        while let Some(parent_id) = current {
            if parent_id == ancestor_id {
                return true;
            }
            current = self
                .nodes
                .iter()
                .find(|n| n.id == parent_id)
                .and_then(|n| n.parent.as_deref());
        }
        false
    }

    fn node(&self, handle: &ElementHandle) -> EsperarResult<&MockNode> {
        if let Some(message) = &self.failure {
            return Err(EsperarError::QueryFailed {
                message: message.clone(),
            });
        }
        self.nodes
            .iter()
            .find(|n| n.id == handle.id)
            .ok_or_else(|| EsperarError::StaleHandle {
                id: handle.id.clone(),
            })
    }

    fn node_mut(&mut self, id: &str) -> &mut MockNode {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .unwrap_or_else(|| panic!("no scripted node with id {id:?}"))
    }
}

/// Scripted page implementing [`ElementQuery`].
#[derive(Debug, Default)]
pub struct MockPage {
    state: Mutex<PageState>,
}

impl MockPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scripted node; document order is insertion order
    pub fn add(&self, node: MockNode) {
        self.state.lock().unwrap().nodes.push(node);
    }

    /// Remove a node, leaving any outstanding handles to it stale
    pub fn remove(&self, id: &str) {
        self.state.lock().unwrap().nodes.retain(|n| n.id != id);
    }

    /// Flip a node's enabled state
    pub fn set_enabled(&self, id: &str, enabled: bool) {
        self.state.lock().unwrap().node_mut(id).enabled = enabled;
    }

    /// Flip a node's displayed state
    pub fn set_displayed(&self, id: &str, displayed: bool) {
        self.state.lock().unwrap().node_mut(id).displayed = displayed;
    }

    /// Replace a node's text content
    pub fn set_text(&self, id: &str, text: impl Into<String>) {
        self.state.lock().unwrap().node_mut(id).text = text.into();
    }

    /// Make every subsequent query fail, as a dead session would
    pub fn fail_finds(&self, message: impl Into<String>) {
        self.state.lock().unwrap().failure = Some(message.into());
    }

    /// Clear an injected failure
    pub fn restore(&self) {
        self.state.lock().unwrap().failure = None;
    }

    /// Total number of `find_all` calls the page has served
    #[must_use]
    pub fn find_calls(&self) -> u64 {
        self.state.lock().unwrap().find_calls
    }

    /// Number of `find_all` calls issued for a specific locator
    #[must_use]
    pub fn find_calls_for(&self, locator: &Locator) -> u64 {
        self.state
            .lock()
            .unwrap()
            .find_calls_by_locator
            .get(locator)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ElementQuery for MockPage {
    async fn find_all(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
    ) -> EsperarResult<Vec<ElementHandle>> {
        let mut state = self.state.lock().unwrap();
        state.find_calls += 1;
        *state
            .find_calls_by_locator
            .entry(locator.clone())
            .or_insert(0) += 1;
        if let Some(message) = &state.failure {
            return Err(EsperarError::QueryFailed {
                message: message.clone(),
            });
        }
        let call = state.find_calls;
        let state = &*state;
        Ok(state
            .nodes
            .iter()
            .filter(|node| node.in_tree_at(call))
            .filter(|node| node.matched_by.contains(locator))
            .filter(|node| scope.map_or(true, |s| state.is_descendant_of(node, &s.id)))
            .map(|node| ElementHandle::new(node.id.clone(), node.tag.clone()))
            .collect())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> EsperarResult<bool> {
        Ok(self.state.lock().unwrap().node(element)?.displayed)
    }

    async fn is_enabled(&self, element: &ElementHandle) -> EsperarResult<bool> {
        Ok(self.state.lock().unwrap().node(element)?.enabled)
    }

    async fn is_selected(&self, element: &ElementHandle) -> EsperarResult<bool> {
        Ok(self.state.lock().unwrap().node(element)?.selected)
    }

    async fn text(&self, element: &ElementHandle) -> EsperarResult<String> {
        Ok(self.state.lock().unwrap().node(element)?.text.clone())
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> EsperarResult<Option<String>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .node(element)?
            .attributes
            .get(name)
            .cloned())
    }
}

// =============================================================================
// TESTS
// =============================================================================
