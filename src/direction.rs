//! # Direction Inference
//!
//! Route order in the table stands in for logical sequence: step 1, step 2,
//! step 3 of a wizard. Moving to a higher-index route is *forward*, to a lower
//! one *back*, and anything else leaves the direction alone or makes it
//! *undirected*.
//!
//! ## State
//!
//! A [`DirectionTracker`] belongs to exactly one mounted router. It keeps the
//! last resolved path fragment and the current direction, and memoizes the
//! last match so re-rendering with an unchanged path neither re-runs lookups
//! nor touches state.
//!
//! ## Algorithm
//!
//! On a new fragment `next`:
//!
//! 1. look up `next` (fails with [`RouteError::Unmatched`]);
//! 2. if a previous fragment exists and differs, look it up **in the current
//!    table** and compare indices: `> 0` forward, `< 0` back, `== 0`
//!    undirected;
//! 3. otherwise keep the direction;
//! 4. remember `next` as the previous fragment.
//!
//! Re-deriving the previous index against the current table keeps the result
//! consistent when the table is rebuilt between renders, at the cost of
//! comparing against a table the previous path was never resolved in.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::RouteError;
use crate::router::{MatchedRoute, RouteMatcher};
use crate::routes::{RouteNode, RouteTable};
use crate::transition::TransitionKey;

/// Classification of a navigation relative to declared route order.
///
/// The string form doubles as the CSS class namespace of the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Back,
    /// Neutral: first render, same-index navigation
    #[default]
    Undirected,
}

impl Direction {
    /// Direction implied by an index difference `next - previous`.
    #[must_use]
    pub fn from_diff(diff: isize) -> Self {
        match diff {
            d if d > 0 => Direction::Forward,
            d if d < 0 => Direction::Back,
            _ => Direction::Undirected,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Back => "back",
            Direction::Undirected => "undirected",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "back" => Ok(Direction::Back),
            "undirected" | "neutral" => Ok(Direction::Undirected),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// A path fragment resolved against a route table.
#[derive(Debug)]
pub struct RouteMatch<V> {
    /// Position of the matched top-level entry in the table
    pub index: usize,
    /// The matched top-level entry
    pub entry: Arc<RouteNode<V>>,
    /// Full match chain, top-level first
    pub chain: Vec<MatchedRoute<V>>,
}

impl<V> Clone for RouteMatch<V> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            entry: Arc::clone(&self.entry),
            chain: self.chain.clone(),
        }
    }
}

impl<V> RouteMatch<V> {
    /// Identity key that triggers a transition when it changes.
    #[must_use]
    pub fn key(&self) -> TransitionKey {
        TransitionKey::for_entry(self.entry.path.as_deref(), self.index)
    }

    /// Innermost level of the chain.
    #[must_use]
    pub fn leaf(&self) -> Option<&MatchedRoute<V>> {
        self.chain.last()
    }
}

/// Resolve `path` to its top-level entry and that entry's position.
///
/// The matcher's chain is searched for a route that is an entry of `table`;
/// when several could correspond, the first in table order wins.
pub fn find_match<V, M>(
    table: &RouteTable<V>,
    matcher: &M,
    path: &str,
) -> Result<RouteMatch<V>, RouteError>
where
    M: RouteMatcher<V> + ?Sized,
{
    let unmatched = || {
        warn!(path = %path, routes_count = table.len(), "No route matched");
        RouteError::Unmatched {
            path: path.to_string(),
        }
    };

    let chain = matcher
        .match_routes(table.entries(), path)
        .ok_or_else(unmatched)?;

    let (index, entry) = table
        .entries()
        .iter()
        .enumerate()
        .find(|(_, entry)| chain.iter().any(|m| m.route.id == entry.id))
        .ok_or_else(unmatched)?;

    Ok(RouteMatch {
        index,
        entry: Arc::clone(entry),
        chain,
    })
}

/// Per-instance direction state.
#[derive(Debug)]
pub struct DirectionTracker<V> {
    previous_path: Option<String>,
    direction: Direction,
    memo: Option<(String, RouteMatch<V>)>,
}

impl<V> Default for DirectionTracker<V> {
    fn default() -> Self {
        Self {
            previous_path: None,
            direction: Direction::Undirected,
            memo: None,
        }
    }
}

impl<V> DirectionTracker<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn previous_path(&self) -> Option<&str> {
        self.previous_path.as_deref()
    }

    /// Forget everything, as if freshly mounted.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resolve `next_path` and update the direction.
    ///
    /// Memoized on `next_path`: resolving the same value twice in a row
    /// returns the first result without consulting `table`. On error no state
    /// changes.
    pub fn resolve<M>(
        &mut self,
        table: &RouteTable<V>,
        matcher: &M,
        next_path: &str,
    ) -> Result<RouteMatch<V>, RouteError>
    where
        M: RouteMatcher<V> + ?Sized,
    {
        if let Some((key, cached)) = &self.memo {
            if key == next_path {
                debug!(path = %next_path, "Resolved path unchanged; reusing match");
                return Ok(cached.clone());
            }
        }

        let next = find_match(table, matcher, next_path)?;

        if let Some(previous) = self.previous_path.as_deref() {
            if previous != next_path {
                let prev = find_match(table, matcher, previous)?;
                let diff = signed_diff(next.index, prev.index);
                let direction = Direction::from_diff(diff);
                info!(
                    from = %previous,
                    to = %next_path,
                    from_index = prev.index,
                    to_index = next.index,
                    direction = %direction,
                    "Navigation direction inferred"
                );
                self.direction = direction;
            }
        }

        self.previous_path = Some(next_path.to_string());
        self.memo = Some((next_path.to_string(), next.clone()));
        Ok(next)
    }
}

fn signed_diff(next: usize, previous: usize) -> isize {
    if next >= previous {
        isize::try_from(next - previous).unwrap_or(isize::MAX)
    } else {
        isize::try_from(previous - next).map_or(isize::MIN, |d| -d)
    }
}
