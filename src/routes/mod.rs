//! Route declarations and the tables built from them.
//!
//! - [`decl`] - what callers write: routes, redirects, groups, placeholders
//! - [`table`] - what the router consumes: an ordered list of top-level
//!   entries with identities and attachment handles
//! - [`load`] - route files (YAML/JSON) for tooling and hot reload

pub mod decl;
pub mod load;
pub mod table;

pub use decl::{RedirectProps, RouteDecl, RouteProps};
pub use load::{load_routes, parse_routes, RoutesFile};
pub use table::{Comparator, Element, Redirect, RouteNode, RouteTable};
