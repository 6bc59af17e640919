//! Bounded-polling element resolution.
//!
//! The resolver hides the race between "the page is still rendering" and
//! "the test wants to act now": every lookup is a fixed-cadence poll loop
//! against the injected [`ElementQuery`] capability, bounded by a clamped
//! wait budget. Not finding anything in time is an expected outcome, so it
//! comes back as `Ok(None)` / an empty `Vec` rather than an error; see
//! [`crate::result`] for what *does* count as one.
//!
//! Handles returned here are borrowed from the remote session and go stale
//! as soon as the DOM mutates. The resolver holds no state between calls
//! beyond its configuration, and never caches a handle.

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::config::ResolverConfig;
use crate::locator::Locator;
use crate::query::{ElementHandle, ElementQuery};
use crate::result::EsperarResult;

// =============================================================================
// READINESS
// =============================================================================

/// The condition a resolved element must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The element exists in the document tree
    Present,
    /// The element exists and is currently displayed and enabled
    Interactable,
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Resolves locators to element handles by polling the remote document.
///
/// Construct one per session with the capability implementation and an
/// explicit [`ResolverConfig`]; every method is then a self-contained
/// lookup with no state carried across calls.
#[derive(Debug)]
pub struct ElementResolver<Q> {
    query: Q,
    config: ResolverConfig,
}

impl<Q: ElementQuery> ElementResolver<Q> {
    /// Create a resolver over a capability with the given configuration
    pub fn new(query: Q, config: ResolverConfig) -> Self {
        Self { query, config }
    }

    /// The configuration this resolver was built with
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The underlying capability, for per-handle reads (text, attributes)
    #[must_use]
    pub const fn query(&self) -> &Q {
        &self.query
    }

    /// Resolve a locator to one handle, waiting up to `budget`.
    ///
    /// Polls at the configured cadence until some matching element
    /// satisfies `readiness` or the clamped budget elapses. On success the
    /// document is queried once more and the first handle satisfying the
    /// predicate in that fresh read is returned. The polled handle and
    /// the returned one are independent reads of live state, logically
    /// equivalent but not necessarily the same object. A zero budget
    /// performs exactly one probe with no polling delay.
    ///
    /// `Ok(None)` means nothing satisfied the predicate in time. A failure
    /// of the underlying capability is not absence and propagates as an
    /// error.
    pub async fn resolve_one(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
        budget: Duration,
        readiness: Readiness,
    ) -> EsperarResult<Option<ElementHandle>> {
        let locator = self.locator_for(locator, scope);
        let effective = self.config.clamp_wait(budget);
        let start = Instant::now();
        loop {
            if self.first_ready(&locator, scope, readiness).await?.is_some() {
                // The trigger and the fetch are two independent queries:
                // re-read and hand back whatever is first-and-ready now.
                if let Some(handle) = self.first_ready(&locator, scope, readiness).await? {
                    trace!(%locator, elapsed = ?start.elapsed(), "resolved element");
                    return Ok(Some(handle));
                }
            }
            if start.elapsed() >= effective {
                debug!(%locator, budget = ?effective, "element not ready within budget");
                return Ok(None);
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Resolve a locator to every currently-matching handle.
    ///
    /// Waits until at least one matching element satisfies `readiness`,
    /// then performs one full re-scan and keeps the elements individually
    /// satisfying the predicate at that instant: a best-effort snapshot,
    /// not a transactional read. Under [`Readiness::Present`] the full
    /// re-scanned set is returned unfiltered.
    ///
    /// Timeouts and capability failures both come back as the empty vec;
    /// a list scan never raises.
    pub async fn resolve_many(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
        budget: Duration,
        readiness: Readiness,
    ) -> Vec<ElementHandle> {
        match self.resolve_many_inner(locator, scope, budget, readiness).await {
            Ok(handles) => handles,
            Err(error) => {
                warn!(%locator, %error, "list resolution failed; returning empty set");
                Vec::new()
            }
        }
    }

    /// Resolve `sub` under the element found by `parent`, decaying the
    /// budget across the two steps.
    ///
    /// The parent is resolved first with the full clamped budget; the
    /// child then gets whatever wall time is left, saturating at zero. If
    /// the parent never resolves, the child is not attempted and `Ok(None)`
    /// is returned immediately.
    pub async fn resolve_one_within(
        &self,
        parent: &Locator,
        sub: &Locator,
        budget: Duration,
        readiness: Readiness,
    ) -> EsperarResult<Option<ElementHandle>> {
        let requested = self.config.clamp_wait(budget);
        let start = Instant::now();
        let Some(parent) = self.resolve_one(parent, None, requested, readiness).await? else {
            return Ok(None);
        };
        let remaining = requested.saturating_sub(start.elapsed());
        self.resolve_one(sub, Some(&parent), remaining, readiness).await
    }

    /// Resolve every `sub` element under the element found by `parent`,
    /// with the same budget decay as [`Self::resolve_one_within`].
    ///
    /// Inherits the list-scan contract: an unresolvable parent, a timeout,
    /// or a capability failure all produce the empty vec.
    pub async fn resolve_many_within(
        &self,
        parent: &Locator,
        sub: &Locator,
        budget: Duration,
        readiness: Readiness,
    ) -> Vec<ElementHandle> {
        let requested = self.config.clamp_wait(budget);
        let start = Instant::now();
        let parent = match self.resolve_one(parent, None, requested, readiness).await {
            Ok(Some(parent)) => parent,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(%sub, %error, "parent resolution failed; returning empty set");
                return Vec::new();
            }
        };
        let remaining = requested.saturating_sub(start.elapsed());
        self.resolve_many(sub, Some(&parent), remaining, readiness).await
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn locator_for(&self, locator: &Locator, scope: Option<&ElementHandle>) -> Locator {
        if scope.is_some() {
            locator.for_scope()
        } else {
            locator.clone()
        }
    }

    async fn resolve_many_inner(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
        budget: Duration,
        readiness: Readiness,
    ) -> EsperarResult<Vec<ElementHandle>> {
        let locator = self.locator_for(locator, scope);
        let effective = self.config.clamp_wait(budget);
        let start = Instant::now();
        loop {
            if self.first_ready(&locator, scope, readiness).await?.is_some() {
                let all = self.query.find_all(&locator, scope).await?;
                return match readiness {
                    Readiness::Present => Ok(all),
                    Readiness::Interactable => {
                        let mut ready = Vec::with_capacity(all.len());
                        for handle in all {
                            if self.is_ready(&handle, readiness).await? {
                                ready.push(handle);
                            }
                        }
                        Ok(ready)
                    }
                };
            }
            if start.elapsed() >= effective {
                debug!(%locator, budget = ?effective, "no element ready within budget");
                return Ok(Vec::new());
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// One probe cycle: query the document and return the first matching
    /// handle that satisfies the predicate, if any.
    async fn first_ready(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
        readiness: Readiness,
    ) -> EsperarResult<Option<ElementHandle>> {
        let found = self.query.find_all(locator, scope).await?;
        for handle in found {
            if self.is_ready(&handle, readiness).await? {
                return Ok(Some(handle));
            }
        }
        Ok(None)
    }

    async fn is_ready(&self, handle: &ElementHandle, readiness: Readiness) -> EsperarResult<bool> {
        match readiness {
            Readiness::Present => Ok(true),
            Readiness::Interactable => Ok(self.query.is_displayed(handle).await?
                && self.query.is_enabled(handle).await?),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
