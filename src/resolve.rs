//! Path resolution for nested routing levels.
//!
//! A router mounted inside another route only sees the part of the URL below
//! its parent's matched base: a router under `/wizard/*` resolves
//! `/wizard/step-2` as `/step-2`. Direction inference runs on these relative
//! fragments so sibling levels do not influence each other.

use serde::{Deserialize, Serialize};

use crate::router::{MatchedRoute, ParamVec};

/// One level of an enclosing router's match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextMatch {
    pub pathname: String,
    pub pathname_base: String,
    pub params: ParamVec,
}

/// Matches of the enclosing routers, outermost first.
///
/// An empty context behaves like the root (`/`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteContext {
    pub matches: Vec<ContextMatch>,
}

impl RouteContext {
    /// Context with no enclosing matches.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Context whose innermost match has the given base.
    #[must_use]
    pub fn with_base(pathname_base: impl Into<String>) -> Self {
        let pathname_base = pathname_base.into();
        Self {
            matches: vec![ContextMatch {
                pathname: pathname_base.clone(),
                pathname_base,
                params: ParamVec::new(),
            }],
        }
    }

    /// Extend this context with a router's match chain.
    ///
    /// The chain's pathnames are relative to this context's base; the result
    /// holds absolute ones, ready to hand to a router nested one level deeper.
    #[must_use]
    pub fn nest<V>(&self, chain: &[MatchedRoute<V>]) -> Self {
        let base = self.pathname_base();
        let mut matches = self.matches.clone();
        matches.extend(chain.iter().map(|m| ContextMatch {
            pathname: absolute(base, &m.pathname),
            pathname_base: if m.pathname_base == "/" {
                base.to_string()
            } else {
                absolute(base, &m.pathname_base)
            },
            params: m.params.clone(),
        }));
        Self { matches }
    }

    /// Base path of the innermost enclosing match, `/` at the root.
    #[must_use]
    pub fn pathname_base(&self) -> &str {
        self.matches
            .last()
            .map(|m| m.pathname_base.as_str())
            .unwrap_or("/")
    }
}

fn absolute(base: &str, path: &str) -> String {
    if base == "/" {
        return path.to_string();
    }
    let joined = format!("{base}/{path}");
    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if !(c == '/' && out.ends_with('/')) {
            out.push(c);
        }
    }
    out
}

/// Compute the path fragment this routing level resolves.
///
/// At the root the pathname is returned unchanged. Otherwise the first
/// `base.len()` bytes are dropped, and an empty remainder becomes `/`.
#[must_use]
pub fn resolve_pathname(pathname: &str, parent: Option<&RouteContext>) -> String {
    let base = parent.map_or("/", RouteContext::pathname_base);
    if base == "/" {
        return pathname.to_string();
    }
    match pathname.get(base.len()..) {
        Some("") | None => "/".to_string(),
        Some(rest) => rest.to_string(),
    }
}
