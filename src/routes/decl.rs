use serde::Deserialize;

/// One child of a routing level, before the table is built.
///
/// Lists of declarations use `Option<RouteDecl<V>>` so conditionally rendered
/// children can leave a `None` placeholder; placeholders are dropped at build
/// time. Route files deserialize into the same shape: a map with a `redirect`
/// key is a [`RedirectProps`], a map with a `group` key is a fragment, and any
/// other map is a [`RouteProps`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RouteDecl<V> {
    /// Redirect to another location when matched
    Redirect(RedirectProps),
    /// Fragment whose children are spliced into the enclosing list
    Group {
        group: Vec<Option<RouteDecl<V>>>,
    },
    /// Plain routed view
    Route(RouteProps<V>),
}

/// Properties of a plain route declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RouteProps<V> {
    /// Path pattern (`/users/:id`, `files/*`, `:lang?/about`); `None` marks an
    /// index or layout route
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub index: bool,
    #[serde(default)]
    pub case_sensitive: bool,
    /// Renderable content; routes without a view are never wrapped
    #[serde(default = "Option::default")]
    pub view: Option<V>,
    #[serde(default = "Vec::new")]
    pub children: Vec<Option<RouteDecl<V>>>,
}

/// Properties of a redirect declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RedirectProps {
    #[serde(default)]
    pub path: Option<String>,
    /// Target location
    #[serde(rename = "redirect")]
    pub to: String,
    #[serde(default)]
    pub replace: bool,
}

impl<V> RouteDecl<V> {
    /// Route rendering `view` at `path`.
    pub fn route(path: impl Into<String>, view: V) -> Self {
        RouteDecl::Route(RouteProps {
            path: Some(path.into()),
            index: false,
            case_sensitive: false,
            view: Some(view),
            children: Vec::new(),
        })
    }

    /// Index route rendering `view` at its parent's path.
    pub fn index(view: V) -> Self {
        RouteDecl::Route(RouteProps {
            path: None,
            index: true,
            case_sensitive: false,
            view: Some(view),
            children: Vec::new(),
        })
    }

    /// Pathless layout route grouping `children` under `view`.
    pub fn layout(view: Option<V>, children: Vec<Option<RouteDecl<V>>>) -> Self {
        RouteDecl::Route(RouteProps {
            path: None,
            index: false,
            case_sensitive: false,
            view,
            children,
        })
    }

    /// Redirect from `path` (or the fallback position when `None`) to `to`.
    pub fn redirect(path: Option<&str>, to: impl Into<String>) -> Self {
        RouteDecl::Redirect(RedirectProps {
            path: path.map(str::to_string),
            to: to.into(),
            replace: true,
        })
    }

    /// Fragment of declarations spliced into the enclosing list.
    pub fn group(children: Vec<Option<RouteDecl<V>>>) -> Self {
        RouteDecl::Group { group: children }
    }

    /// Replace the nested children of a route declaration.
    ///
    /// Redirects and groups are returned unchanged.
    #[must_use]
    pub fn with_children(self, children: Vec<Option<RouteDecl<V>>>) -> Self {
        match self {
            RouteDecl::Route(props) => RouteDecl::Route(RouteProps { children, ..props }),
            other => other,
        }
    }

    /// Mark a route declaration's path as case sensitive.
    #[must_use]
    pub fn case_sensitive(self) -> Self {
        match self {
            RouteDecl::Route(props) => RouteDecl::Route(RouteProps {
                case_sensitive: true,
                ..props
            }),
            other => other,
        }
    }
}
