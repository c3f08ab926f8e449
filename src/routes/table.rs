use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::decl::{RouteDecl, RouteProps};
use crate::ids::{NodeRef, RouteId};

/// Caller-supplied ordering applied to the built table.
///
/// The post-sort position of an entry is its index for direction inference.
pub type Comparator<V> = Arc<dyn Fn(&RouteNode<V>, &RouteNode<V>) -> Ordering + Send + Sync>;

/// What a matched route renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Element<V> {
    /// View wrapped in a single-slot container with its own attachment handle
    Slot { node: NodeRef, view: V },
    /// Nested view rendered by an outlet of its parent, never wrapped
    View(V),
    /// Redirect target
    Redirect(Redirect),
    /// Layout or placeholder route without content
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    pub replace: bool,
}

/// One built route, top-level or nested.
#[derive(Debug)]
pub struct RouteNode<V> {
    pub id: RouteId,
    pub path: Option<String>,
    pub index: bool,
    pub case_sensitive: bool,
    pub element: Element<V>,
    pub children: Vec<Arc<RouteNode<V>>>,
}

impl<V> RouteNode<V> {
    /// Attachment handle of a wrapped view.
    #[must_use]
    pub fn node_ref(&self) -> Option<NodeRef> {
        match &self.element {
            Element::Slot { node, .. } => Some(*node),
            _ => None,
        }
    }

    /// The renderable content, wrapped or not.
    #[must_use]
    pub fn view(&self) -> Option<&V> {
        match &self.element {
            Element::Slot { view, .. } | Element::View(view) => Some(view),
            _ => None,
        }
    }

    #[must_use]
    pub fn redirect(&self) -> Option<&Redirect> {
        match &self.element {
            Element::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }
}

/// Ordered list of top-level routes for one routing level.
///
/// Entry positions are unique and stable for the lifetime of the table; a
/// rebuild only reproduces them when the declarations and comparator are
/// unchanged.
pub struct RouteTable<V> {
    entries: Vec<Arc<RouteNode<V>>>,
}

impl<V> Clone for RouteTable<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.iter().map(Arc::clone).collect(),
        }
    }
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("entries", &self.entries)
            .finish()
    }
}

impl<V> RouteTable<V> {
    /// Build a table from a routing level's declarations.
    ///
    /// Placeholders are dropped and groups spliced inline. Every top-level
    /// route with a view gets a fresh [`NodeRef`]; redirects, view-less routes
    /// and nested children pass through unwrapped. When `compare` is given the
    /// result is stably sorted with it.
    #[must_use]
    pub fn build(decls: Vec<Option<RouteDecl<V>>>, compare: Option<&Comparator<V>>) -> Self {
        let mut entries = Vec::with_capacity(decls.len());
        collect(decls, true, &mut entries);

        if let Some(compare) = compare {
            entries.sort_by(|a, b| compare(a, b));
        }

        log_built(&entries, compare.is_some());
        Self { entries }
    }

    /// Copy of this table stably sorted with `compare`.
    ///
    /// Entries keep their identities and attachment handles.
    #[must_use]
    pub fn sorted(&self, compare: &Comparator<V>) -> Self {
        let mut entries: Vec<_> = self.entries.iter().map(Arc::clone).collect();
        entries.sort_by(|a, b| compare(a, b));
        log_built(&entries, true);
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Arc<RouteNode<V>>] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<RouteNode<V>>> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the first entry with the given identity.
    #[must_use]
    pub fn position(&self, id: RouteId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Entry owning the given attachment handle.
    #[must_use]
    pub fn find_node(&self, node: NodeRef) -> Option<(usize, &Arc<RouteNode<V>>)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.node_ref() == Some(node))
    }
}

fn log_built<V>(entries: &[Arc<RouteNode<V>>], sorted: bool) {
    let summary: Vec<String> = entries
        .iter()
        .take(10)
        .map(|e| e.path.clone().unwrap_or_else(|| "<index>".to_string()))
        .collect();
    info!(
        routes_count = entries.len(),
        sorted,
        routes_summary = ?summary,
        "Route table built"
    );
}

fn collect<V>(decls: Vec<Option<RouteDecl<V>>>, wrap: bool, out: &mut Vec<Arc<RouteNode<V>>>) {
    for decl in decls.into_iter().flatten() {
        match decl {
            RouteDecl::Group { group } => collect(group, wrap, out),
            RouteDecl::Redirect(props) => out.push(Arc::new(RouteNode {
                id: RouteId::new(),
                path: props.path,
                index: false,
                case_sensitive: false,
                element: Element::Redirect(Redirect {
                    to: props.to,
                    replace: props.replace,
                }),
                children: Vec::new(),
            })),
            RouteDecl::Route(props) => out.push(Arc::new(build_route(props, wrap))),
        }
    }
}

fn build_route<V>(props: RouteProps<V>, wrap: bool) -> RouteNode<V> {
    let RouteProps {
        path,
        index,
        case_sensitive,
        view,
        children: child_decls,
    } = props;

    if index && !child_decls.is_empty() {
        debug!(path = ?path, "Index route declares children; they can never match");
    }

    let mut children = Vec::with_capacity(child_decls.len());
    collect(child_decls, false, &mut children);

    let element = match view {
        Some(view) if wrap => Element::Slot {
            node: NodeRef::new(),
            view,
        },
        Some(view) => Element::View(view),
        None => Element::Empty,
    };

    RouteNode {
        id: RouteId::new(),
        path,
        index,
        case_sensitive,
        element,
        children,
    }
}
