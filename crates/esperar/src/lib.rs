//! Esperar: deterministic element resolution for browser UI tests.
//!
//! An asynchronously-rendering page and a test that wants to act now are
//! permanently racing. Esperar hides that race behind a bounded-polling
//! resolver: every lookup waits up to a clamped budget for its element to
//! become present or interactable, and "nothing turned up in time" is an
//! ordinary return value, not an exception to catch.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      ESPERAR Architecture                    │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌─────────────────┐    ┌─────────────┐   │
//! │   │ Table      │    │ Element         │    │ Element     │   │
//! │   │ Navigator  │───►│ Resolver        │───►│ Query       │   │
//! │   │ (grids)    │    │ (bounded polls) │    │ (session)   │   │
//! │   └────────────┘    └─────────────────┘    └─────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The remote session is an injected [`ElementQuery`] capability; the
//! crate never launches or owns a browser. [`mock::MockPage`] scripts one
//! in memory for tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use esperar::mock::{MockNode, MockPage};
//! use esperar::{ElementResolver, Locator, Readiness, ResolverConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let page = Arc::new(MockPage::new());
//! page.add(MockNode::new("b1", "button").matched_by(Locator::id("save")));
//!
//! let resolver = ElementResolver::new(Arc::clone(&page), ResolverConfig::default());
//! let button = resolver
//!     .resolve_one(&Locator::id("save"), None, Duration::ZERO, Readiness::Interactable)
//!     .await
//!     .unwrap();
//! assert!(button.is_some());
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod config;
mod locator;
mod query;
mod resolver;
mod result;
mod table;

/// Scripted in-memory page for deterministic tests.
pub mod mock;

pub use config::{
    AbsencePolicy, ResolverConfig, DEFAULT_MAX_WAIT_SECS, DEFAULT_POLL_INTERVAL_MS,
    FAIL_IF_NOT_FOUND_ENV_VAR, MAX_WAIT_ENV_VAR,
};
pub use locator::Locator;
pub use query::{ElementHandle, ElementQuery};
pub use resolver::{ElementResolver, Readiness};
pub use result::{EsperarError, EsperarResult};
pub use table::{MatchMode, TableNavigator};
