//! Error types for route resolution.
//!
//! Only one thing can go wrong while resolving a location: the route table has
//! no entry for it. That always means the declared routes and the navigation
//! disagree, so callers propagate it to their own error boundary instead of
//! retrying.

use thiserror::Error;

/// Errors raised while resolving a path against a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No entry of the route table matched the path fragment.
    #[error("route {path} does not match")]
    Unmatched {
        /// The offending path fragment, relative to the routing level
        path: String,
    },
}

impl RouteError {
    /// Path fragment carried by the error.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            RouteError::Unmatched { path } => path,
        }
    }
}
