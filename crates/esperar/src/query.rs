//! The remote-document capability boundary.
//!
//! Everything the resolver knows about the page arrives through
//! [`ElementQuery`], an injected trait in the manner of a driver
//! abstraction: find elements by locator (optionally scoped under a parent
//! handle), and read per-handle state. Swapping implementations swaps the
//! transport (a WebDriver session, a CDP connection, or the scripted page
//! in [`crate::mock`]) without touching resolution logic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::locator::Locator;
use crate::result::EsperarResult;

/// An opaque, non-owning reference to a node in the remote document's
/// current render.
///
/// Handles are borrowed from the remote session: once the DOM mutates
/// underneath one, state queries against it fail with
/// [`crate::EsperarError::StaleHandle`]. Nothing in this crate caches a
/// handle across calls, and callers must re-resolve after any
/// DOM-mutating action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Session-unique identifier for the referenced node
    pub id: String,
    /// Tag name of the referenced node
    pub tag_name: String,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
        }
    }
}

/// Query interface onto the remote document.
///
/// `find_all` returns handles in document order; an empty vec means the
/// locator currently matches nothing, which is not an error. The
/// per-handle accessors fail with [`crate::EsperarError::StaleHandle`]
/// when the handle no longer refers to a live node, and with
/// [`crate::EsperarError::QueryFailed`] when the session itself breaks.
#[async_trait]
pub trait ElementQuery: Send + Sync {
    /// Find every element matching `locator`, in document order.
    ///
    /// With `scope` set, only the subtree under that handle is searched.
    /// Callers are expected to pass a locator already rewritten via
    /// [`Locator::for_scope`] when scoping.
    async fn find_all(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
    ) -> EsperarResult<Vec<ElementHandle>>;

    /// Whether the element is currently rendered visibly
    async fn is_displayed(&self, element: &ElementHandle) -> EsperarResult<bool>;

    /// Whether the element is currently enabled
    async fn is_enabled(&self, element: &ElementHandle) -> EsperarResult<bool>;

    /// Whether the element (checkbox, option, radio) is currently selected
    async fn is_selected(&self, element: &ElementHandle) -> EsperarResult<bool>;

    /// The element's rendered text content
    async fn text(&self, element: &ElementHandle) -> EsperarResult<String>;

    /// The element's attribute value, if the attribute is present
    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> EsperarResult<Option<String>>;
}

#[async_trait]
impl<Q: ElementQuery + ?Sized> ElementQuery for std::sync::Arc<Q> {
    async fn find_all(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
    ) -> EsperarResult<Vec<ElementHandle>> {
        (**self).find_all(locator, scope).await
    }

    async fn is_displayed(&self, element: &ElementHandle) -> EsperarResult<bool> {
        (**self).is_displayed(element).await
    }

    async fn is_enabled(&self, element: &ElementHandle) -> EsperarResult<bool> {
        (**self).is_enabled(element).await
    }

    async fn is_selected(&self, element: &ElementHandle) -> EsperarResult<bool> {
        (**self).is_selected(element).await
    }

    async fn text(&self, element: &ElementHandle) -> EsperarResult<String> {
        (**self).text(element).await
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> EsperarResult<Option<String>> {
        (**self).attribute(element, name).await
    }
}
