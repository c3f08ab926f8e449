//! # slide-routes
//!
//! **slide-routes** turns a list of routes into animated, direction-aware
//! transitions: navigating to a route declared later slides the new view in
//! from one side, navigating to an earlier one slides it in from the other.
//!
//! ## Overview
//!
//! The crate is headless. It decides *which* view is shown, *which way* the
//! navigation went and *which CSS classes* every mounted view carries at each
//! step of the transition; the host UI renders the views and paints the
//! classes.
//!
//! ## Architecture
//!
//! - **[`routes`]** - route declarations, route files and the built route table
//! - **[`router`]** - `react-router` v6 style path matching behind the
//!   [`RouteMatcher`] seam
//! - **[`resolve`]** - path fragments for routers nested under other routes
//! - **[`direction`]** - forward/back inference from table order
//! - **[`transition`]** - the single-slot transition group and its stylesheet
//! - **[`slide_routes`]** - [`SlideRoutes`], the component tying it together
//! - **[`config`]** - options, defaults and `SLIDE_ROUTES_*` overrides
//! - **[`hot_reload`]** - route file watching
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `slide-routes` tool
//!
//! ### Render Flow
//!
//! ```text
//! pathname ──resolve_pathname──► fragment ──DirectionTracker──► (match, direction)
//!                                                                     │
//!            RenderOutput ◄──── TransitionGroup::render(key, node, match, direction)
//! ```
//!
//! 1. The fragment for this routing level is the pathname minus the enclosing
//!    router's base.
//! 2. The fragment is matched against the table; its top-level entry's
//!    position is compared with the previous fragment's to get the direction.
//! 3. The matched entry's key (declared path, else index) drives the
//!    transition group: a new key sends the current view out and the new one
//!    in, both under the `forward-` or `back-` class namespace.
//!
//! ## Quick Start
//!
//! ```rust
//! use slide_routes::{Direction, RouteDecl, SlideOptions, SlideRoutes};
//!
//! let mut router = SlideRoutes::new(
//!     SlideOptions::default(),
//!     vec![
//!         Some(RouteDecl::route("/one", "one")),
//!         Some(RouteDecl::route("/two", "two")),
//!         Some(RouteDecl::route("/three", "three")),
//!     ],
//! );
//!
//! router.render("/three", None)?;
//! let out = router.render("/one", None)?;
//! assert_eq!(out.direction, Direction::Back);
//! assert_eq!(out.slots[0].classes, vec!["item", "back-exit"]);
//! assert_eq!(out.slots[1].classes, vec!["item", "back-enter"]);
//! # Ok::<(), slide_routes::RouteError>(())
//! ```
//!
//! ## Runtime Considerations
//!
//! Everything runs synchronously inside `&mut self` calls on the host's UI
//! thread. Time is passed in by the host through
//! [`SlideRoutes::frame`] and [`SlideRoutes::advance`]; the crate starts no
//! timers. The only background thread is the optional file watcher in
//! [`hot_reload`].

pub mod cli;
pub mod config;
pub mod direction;
pub mod error;
pub mod hot_reload;
pub mod ids;
pub mod logging;
pub mod resolve;
pub mod router;
pub mod routes;
pub mod slide_routes;
pub mod transition;

pub use config::SlideOptions;
pub use direction::{find_match, Direction, DirectionTracker, RouteMatch};
pub use error::RouteError;
pub use ids::{NodeRef, RouteId};
pub use resolve::{resolve_pathname, RouteContext};
pub use router::{MatchedRoute, PatternMatcher, RouteMatcher};
pub use routes::{load_routes, Comparator, RouteDecl, RouteTable, RoutesFile};
pub use slide_routes::{RenderOutput, SlideRoutes, SlotView};
pub use transition::{Animation, Completion, Phase, StyleSheet, Timing, TransitionKey};
