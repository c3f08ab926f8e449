//! Route matching engine.
//!
//! Matching works in three steps, the same way `react-router` does it, so a
//! route table behaves identically whichever side renders it:
//!
//! 1. **Flatten**: every route that can terminate a match (it has a path or is
//!    an index route) becomes a *branch*: the chain of routes from the top
//!    level down to it, with the joined path. Optional segments are exploded
//!    into one branch per concrete path.
//! 2. **Rank**: branches are scored by their joined path (static segments beat
//!    dynamic ones, splats are penalised, index routes get a bonus) and stably
//!    sorted, so among equal scores declaration order wins.
//! 3. **Match**: branches are tried in rank order; each route of a branch
//!    consumes its part of the pathname and the last one must consume the rest.

use std::cmp::Reverse;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::pattern::{
    explode_optional_segments, join_paths, normalize_pathname, PathPattern,
};
use super::{MatchedRoute, ParamVec, RouteMatcher};
use crate::routes::RouteNode;

const DYNAMIC_SEGMENT_VALUE: i32 = 3;
const INDEX_ROUTE_VALUE: i32 = 2;
const EMPTY_SEGMENT_VALUE: i32 = 1;
const STATIC_SEGMENT_VALUE: i32 = 10;
const SPLAT_PENALTY: i32 = -2;

/// Matching above this is reported as slow.
const SLOW_MATCH: Duration = Duration::from_millis(1);

struct BranchRoute<V> {
    relative_path: String,
    case_sensitive: bool,
    route: Arc<RouteNode<V>>,
}

struct Branch<V> {
    path: String,
    score: i32,
    routes: Vec<BranchRoute<V>>,
}

/// Default [`RouteMatcher`] implementing `react-router` v6 semantics.
///
/// Stateless: branches are flattened and ranked on every call, which keeps
/// the matcher valid across table rebuilds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Joined paths of all matchable branches, in rank order.
    #[must_use]
    pub fn ranked_paths<V>(&self, routes: &[Arc<RouteNode<V>>]) -> Vec<String> {
        rank(flatten(routes)).into_iter().map(|b| b.path).collect()
    }
}

impl<V> RouteMatcher<V> for PatternMatcher {
    fn match_routes(
        &self,
        routes: &[Arc<RouteNode<V>>],
        pathname: &str,
    ) -> Option<Vec<MatchedRoute<V>>> {
        debug!(pathname = %pathname, routes_count = routes.len(), "Route match attempt");
        let start = Instant::now();

        let decoded = decode_path(pathname);
        let branches = rank(flatten(routes));
        let result = branches
            .iter()
            .find_map(|branch| match_branch(branch, &decoded));

        let elapsed = start.elapsed();
        if elapsed > SLOW_MATCH {
            warn!(
                pathname = %pathname,
                branches = branches.len(),
                duration_us = elapsed.as_micros(),
                "Slow route matching detected"
            );
        }

        match &result {
            Some(chain) => debug!(
                pathname = %pathname,
                depth = chain.len(),
                duration_us = elapsed.as_micros(),
                "Route matched"
            ),
            None => debug!(
                pathname = %pathname,
                duration_us = elapsed.as_micros(),
                "No route matched"
            ),
        }

        result
    }
}

fn flatten<V>(routes: &[Arc<RouteNode<V>>]) -> Vec<Branch<V>> {
    let mut branches = Vec::new();
    flatten_into(routes, &mut branches, &[], "");
    branches
}

fn flatten_into<V>(
    routes: &[Arc<RouteNode<V>>],
    branches: &mut Vec<Branch<V>>,
    parents: &[BranchRoute<V>],
    parent_path: &str,
) {
    for route in routes {
        match route.path.as_deref() {
            Some(path) if path.contains('?') => {
                for exploded in explode_optional_segments(path) {
                    flatten_route(route, Some(&exploded), branches, parents, parent_path);
                }
            }
            path => flatten_route(route, path, branches, parents, parent_path),
        }
    }
}

fn flatten_route<V>(
    route: &Arc<RouteNode<V>>,
    path: Option<&str>,
    branches: &mut Vec<Branch<V>>,
    parents: &[BranchRoute<V>],
    parent_path: &str,
) {
    let mut relative_path = path.unwrap_or("").to_string();
    if relative_path.starts_with('/') {
        match relative_path.strip_prefix(parent_path).map(str::to_string) {
            Some(rest) => relative_path = rest,
            None => {
                warn!(
                    path = %relative_path,
                    parent_path = %parent_path,
                    "Absolute child route path is not nested under its parent; skipping"
                );
                return;
            }
        }
    }

    let joined = join_paths(&[parent_path, &relative_path]);
    let mut chain: Vec<BranchRoute<V>> = parents
        .iter()
        .map(|p| BranchRoute {
            relative_path: p.relative_path.clone(),
            case_sensitive: p.case_sensitive,
            route: Arc::clone(&p.route),
        })
        .collect();
    chain.push(BranchRoute {
        relative_path,
        case_sensitive: route.case_sensitive,
        route: Arc::clone(route),
    });

    if !route.children.is_empty() {
        flatten_into(&route.children, branches, &chain, &joined);
    }

    // Pathless layout routes only match through their children.
    if path.is_none() && !route.index {
        return;
    }

    let score = compute_score(&joined, route.index);
    branches.push(Branch {
        path: joined,
        score,
        routes: chain,
    });
}

fn compute_score(path: &str, index: bool) -> i32 {
    let segments: Vec<&str> = path.split('/').collect();
    let mut score = i32::try_from(segments.len()).unwrap_or(i32::MAX);
    if segments.iter().any(|s| *s == "*") {
        score += SPLAT_PENALTY;
    }
    if index {
        score += INDEX_ROUTE_VALUE;
    }
    segments
        .iter()
        .filter(|s| **s != "*")
        .fold(score, |score, segment| {
            score
                + if is_param_segment(segment) {
                    DYNAMIC_SEGMENT_VALUE
                } else if segment.is_empty() {
                    EMPTY_SEGMENT_VALUE
                } else {
                    STATIC_SEGMENT_VALUE
                }
        })
}

fn is_param_segment(segment: &str) -> bool {
    segment
        .strip_prefix(':')
        .is_some_and(|name| {
            !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        })
}

fn rank<V>(mut branches: Vec<Branch<V>>) -> Vec<Branch<V>> {
    // Stable: siblings are flattened in declaration order, so ties keep it.
    branches.sort_by_key(|b| Reverse(b.score));
    branches
}

fn match_branch<V>(branch: &Branch<V>, pathname: &str) -> Option<Vec<MatchedRoute<V>>> {
    let mut matched_params = ParamVec::new();
    let mut matched_pathname = "/".to_string();
    let mut matches = Vec::with_capacity(branch.routes.len());
    let last = branch.routes.len().saturating_sub(1);

    for (i, meta) in branch.routes.iter().enumerate() {
        let end = i == last;
        let remaining = if matched_pathname == "/" {
            pathname
        } else {
            match pathname.get(matched_pathname.len()..) {
                Some("") | None => "/",
                Some(rest) => rest,
            }
        };

        let pattern = match PathPattern::compile(&meta.relative_path, meta.case_sensitive, end) {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!(
                    path = %meta.relative_path,
                    error = %err,
                    "Route pattern failed to compile; it will never match"
                );
                return None;
            }
        };
        let found = pattern.matches(remaining)?;

        for (name, value) in found.params {
            match matched_params.iter_mut().find(|(k, _)| *k == name) {
                Some(slot) => slot.1 = value,
                None => matched_params.push((name, value)),
            }
        }

        matches.push(MatchedRoute {
            route: Arc::clone(&meta.route),
            params: matched_params.clone(),
            pathname: join_paths(&[&matched_pathname, &found.pathname]),
            pathname_base: normalize_pathname(&join_paths(&[
                &matched_pathname,
                &found.pathname_base,
            ])),
        });

        if found.pathname_base != "/" {
            matched_pathname = join_paths(&[&matched_pathname, &found.pathname_base]);
        }
    }

    Some(matches)
}

/// Percent-decode each segment, leaving encoded slashes encoded.
fn decode_path(pathname: &str) -> String {
    pathname
        .split('/')
        .map(|segment| match urlencoding::decode(segment) {
            Ok(decoded) => decoded.replace('/', "%2F"),
            Err(_) => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
