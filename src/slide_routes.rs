//! The embeddable router.
//!
//! [`SlideRoutes`] is one mounted routing level: it owns the route table, the
//! direction state and the transition group, and turns every location change
//! into a render output the host UI applies.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use slide_routes::{Direction, RouteDecl, SlideOptions, SlideRoutes};
//!
//! let mut router = SlideRoutes::new(
//!     SlideOptions::default(),
//!     vec![
//!         Some(RouteDecl::route("/one", "step one")),
//!         Some(RouteDecl::route("/two", "step two")),
//!     ],
//! );
//!
//! router.render("/one", None).expect("routed");
//! let out = router.render("/two", None).expect("routed");
//! assert_eq!(out.direction, Direction::Forward);
//! assert_eq!(out.slots.len(), 2);
//!
//! let start = Instant::now();
//! router.frame(start);
//! router.advance(start + Duration::from_millis(200));
//! assert_eq!(router.slots().len(), 1);
//! ```

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::SlideOptions;
use crate::direction::{find_match, Direction, DirectionTracker, RouteMatch};
use crate::error::RouteError;
use crate::ids::NodeRef;
use crate::resolve::{resolve_pathname, RouteContext};
use crate::router::{ParamVec, PatternMatcher, RouteMatcher};
use crate::routes::{Comparator, Redirect, RouteDecl, RouteNode, RouteTable};
use crate::transition::{
    Phase, Slot, StyleSheet, TransitionEvent, TransitionGroup, TransitionKey,
};

/// Snapshot of one mounted slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub key: TransitionKey,
    pub node: Option<NodeRef>,
    pub classes: Vec<String>,
    pub phase: Phase,
    /// Table position of the slot's route when it was rendered
    pub index: usize,
    pub pathname: String,
    pub params: ParamVec,
    pub redirect: Option<Redirect>,
}

/// What the host applies after a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderOutput {
    /// Container classes: `slide-routes {animation} {scope}`
    pub class_name: String,
    /// Instance-unique class the stylesheet is scoped to
    pub scope_class: String,
    pub direction: Direction,
    /// Resolved path fragment for this routing level
    pub path: String,
    /// Scoped stylesheet; empty if the template failed to render
    pub stylesheet: String,
    pub slots: Vec<SlotView>,
}

/// One mounted routing level with animated, direction-aware transitions.
pub struct SlideRoutes<V, M = PatternMatcher> {
    options: SlideOptions,
    compare: Option<Comparator<V>>,
    declared: RouteTable<V>,
    table: RouteTable<V>,
    matcher: M,
    tracker: DirectionTracker<V>,
    group: TransitionGroup<RouteMatch<V>>,
    parent: Option<RouteContext>,
    scope_class: String,
    last_path: Option<String>,
}

impl<V> SlideRoutes<V, PatternMatcher> {
    /// Mount a router over `children` using the built-in matcher.
    #[must_use]
    pub fn new(options: SlideOptions, children: Vec<Option<RouteDecl<V>>>) -> Self {
        Self::with_matcher(options, children, PatternMatcher::new())
    }
}

impl<V, M: RouteMatcher<V>> SlideRoutes<V, M> {
    /// Mount a router over `children` using a caller-supplied matcher.
    pub fn with_matcher(
        options: SlideOptions,
        children: Vec<Option<RouteDecl<V>>>,
        matcher: M,
    ) -> Self {
        let declared = RouteTable::build(children, None);
        let scope_class = format!("slide-routes-{}", NodeRef::new().dom_id());
        info!(
            animation = %options.animation,
            duration_ms = options.duration,
            timing = %options.timing,
            destroy = options.destroy,
            routes_count = declared.len(),
            scope = %scope_class,
            "SlideRoutes mounted"
        );
        Self {
            group: TransitionGroup::new(options.completion()),
            options,
            compare: None,
            table: declared.clone(),
            declared,
            matcher,
            tracker: DirectionTracker::new(),
            parent: None,
            scope_class,
            last_path: None,
        }
    }

    /// Reorder the table with `compare`. Indices used for direction inference
    /// are post-sort positions.
    #[must_use]
    pub fn with_compare(mut self, compare: Comparator<V>) -> Self {
        self.set_compare(Some(compare));
        self
    }

    /// Replace the comparator, re-sorting from declaration order.
    pub fn set_compare(&mut self, compare: Option<Comparator<V>>) {
        self.table = match &compare {
            Some(compare) => self.declared.sorted(compare),
            None => self.declared.clone(),
        };
        self.compare = compare;
    }

    /// Rebuild the table from new declarations.
    ///
    /// Direction state survives: the next navigation compares against the
    /// previous path resolved in the new table.
    pub fn set_routes(&mut self, children: Vec<Option<RouteDecl<V>>>) {
        self.declared = RouteTable::build(children, None);
        self.table = match &self.compare {
            Some(compare) => self.declared.sorted(compare),
            None => self.declared.clone(),
        };
    }

    /// Change options; a new `destroy` or `duration` applies to transitions
    /// completing from now on.
    pub fn set_options(&mut self, options: SlideOptions) {
        self.options = options;
        self.group.set_completion(options.completion());
    }

    /// Resolve `pathname` and drive the transition.
    ///
    /// `parent` is the enclosing router's context when this router is nested.
    /// The transition key comes from the memoized match; the rendered content
    /// is always taken from the current table.
    pub fn render(
        &mut self,
        pathname: &str,
        parent: Option<&RouteContext>,
    ) -> Result<RenderOutput, RouteError> {
        let next_path = resolve_pathname(pathname, parent);
        let memoized = self.tracker.resolve(&self.table, &self.matcher, &next_path)?;
        let key = memoized.key();
        let matched = if self.is_current(&memoized) {
            memoized
        } else {
            debug!(path = %next_path, "Table changed since last match; re-resolving content");
            find_match(&self.table, &self.matcher, &next_path)?
        };
        let direction = self.tracker.direction();

        debug!(
            pathname = %pathname,
            path = %next_path,
            index = matched.index,
            direction = %direction,
            "Rendering route"
        );

        self.group
            .render(key, matched.entry.node_ref(), matched, direction);
        self.parent = parent.cloned();
        self.last_path = Some(next_path);
        Ok(self.output())
    }

    /// Promote freshly started transitions to their active classes.
    pub fn frame(&mut self, now: Instant) {
        self.group.frame(now);
    }

    /// Complete transitions whose duration has elapsed.
    pub fn advance(&mut self, now: Instant) -> Vec<TransitionEvent> {
        self.group.advance(now)
    }

    /// Current render output without resolving anything.
    #[must_use]
    pub fn output(&self) -> RenderOutput {
        RenderOutput {
            class_name: format!(
                "slide-routes {} {}",
                self.options.animation, self.scope_class
            ),
            scope_class: self.scope_class.clone(),
            direction: self.tracker.direction(),
            path: self.last_path.clone().unwrap_or_default(),
            stylesheet: self.stylesheet().unwrap_or_else(|err| {
                error!(error = %err, scope = %self.scope_class, "Stylesheet render failed");
                String::new()
            }),
            slots: self.group.slots().iter().map(slot_view).collect(),
        }
    }

    /// Stylesheet for the container, reflecting the current direction.
    pub fn stylesheet(&self) -> Result<String, minijinja::Error> {
        StyleSheet::render(
            &format!(".{}", self.scope_class),
            self.options.duration,
            self.options.timing,
            self.tracker.direction(),
        )
    }

    /// Context a router nested inside the active view receives.
    #[must_use]
    pub fn route_context(&self) -> RouteContext {
        let parent = self.parent.clone().unwrap_or_default();
        match self.group.active() {
            Some(slot) => parent.nest(&slot.content.chain),
            None => parent,
        }
    }

    /// Forget direction state and unmount every view.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.group.clear();
        self.last_path = None;
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.tracker.direction()
    }

    #[must_use]
    pub fn previous_path(&self) -> Option<&str> {
        self.tracker.previous_path()
    }

    #[must_use]
    pub fn options(&self) -> &SlideOptions {
        &self.options
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// Mounted slots, with their matched routes and views.
    #[must_use]
    pub fn slots(&self) -> &[Slot<RouteMatch<V>>] {
        self.group.slots()
    }

    /// Whether the element attached to `node` is still mounted.
    #[must_use]
    pub fn is_mounted(&self, node: NodeRef) -> bool {
        self.group.is_mounted(node)
    }

    /// Shared handle to the matched entry of the active slot.
    #[must_use]
    pub fn active_entry(&self) -> Option<Arc<RouteNode<V>>> {
        self.group
            .active()
            .map(|slot| Arc::clone(&slot.content.entry))
    }

    /// Whether `matched` still points at the entry at its position in the table.
    fn is_current(&self, matched: &RouteMatch<V>) -> bool {
        self.table
            .entries()
            .get(matched.index)
            .is_some_and(|entry| Arc::ptr_eq(entry, &matched.entry))
    }
}

fn slot_view<V>(slot: &Slot<RouteMatch<V>>) -> SlotView {
    let leaf = slot.content.leaf();
    SlotView {
        key: slot.key.clone(),
        node: slot.node,
        classes: slot.classes(),
        phase: slot.phase,
        index: slot.content.index,
        pathname: leaf.map(|m| m.pathname.clone()).unwrap_or_default(),
        params: leaf.map(|m| m.params.clone()).unwrap_or_default(),
        redirect: slot.content.entry.redirect().cloned(),
    }
}
