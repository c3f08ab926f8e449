//! # Router Module
//!
//! Path matching for one routing level: given the built route table and a
//! pathname, find the chain of routes that renders it.
//!
//! ## Overview
//!
//! - [`PathPattern`] compiles `react-router` style patterns (`/users/:id`,
//!   `:lang?/about`, `files/*`) into anchored regexes and extracts params
//! - [`PatternMatcher`] flattens nested routes into ranked branches and returns
//!   the first branch that matches, top-level route first
//! - [`RouteMatcher`] is the seam: hosts that already own a matcher can plug it
//!   in instead
//!
//! ## Example
//!
//! ```rust
//! use slide_routes::router::{PatternMatcher, RouteMatcher};
//! use slide_routes::routes::{RouteDecl, RouteTable};
//!
//! let table = RouteTable::build(
//!     vec![
//!         Some(RouteDecl::route("/users", "users")),
//!         Some(RouteDecl::route("/users/:id", "user")),
//!     ],
//!     None,
//! );
//!
//! let chain = PatternMatcher::new()
//!     .match_routes(table.entries(), "/users/42")
//!     .expect("matches");
//! assert_eq!(chain[0].param("id"), Some("42"));
//! ```

mod core;
mod pattern;

use smallvec::SmallVec;
use std::sync::Arc;

use crate::routes::RouteNode;

pub use core::PatternMatcher;
pub use pattern::{PathMatch, PathPattern, SPLAT_PARAM};

/// Maximum number of params stored inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 4;

/// Accumulated params of a match, in capture order.
pub type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// One level of a successful match.
#[derive(Debug)]
pub struct MatchedRoute<V> {
    /// The route at this level
    pub route: Arc<RouteNode<V>>,
    /// Params captured by this level and every level above it
    pub params: ParamVec,
    /// Pathname consumed up to and including this level
    pub pathname: String,
    /// `pathname` without any splat; the base nested routers resolve against
    pub pathname_base: String,
}

impl<V> Clone for MatchedRoute<V> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            params: self.params.clone(),
            pathname: self.pathname.clone(),
            pathname_base: self.pathname_base.clone(),
        }
    }
}

impl<V> MatchedRoute<V> {
    /// Get a param by name
    ///
    /// Uses "last write wins" semantics when a nested level reuses a name.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Resolves a pathname against a list of routes.
///
/// Returns the chain of matched routes, outermost first, or `None` when
/// nothing matches.
pub trait RouteMatcher<V> {
    fn match_routes(
        &self,
        routes: &[Arc<RouteNode<V>>],
        pathname: &str,
    ) -> Option<Vec<MatchedRoute<V>>>;
}

impl<V, F> RouteMatcher<V> for F
where
    F: Fn(&[Arc<RouteNode<V>>], &str) -> Option<Vec<MatchedRoute<V>>>,
{
    fn match_routes(
        &self,
        routes: &[Arc<RouteNode<V>>],
        pathname: &str,
    ) -> Option<Vec<MatchedRoute<V>>> {
        self(routes, pathname)
    }
}
