use slide_routes::router::{MatchedRoute, PatternMatcher, RouteMatcher, SPLAT_PARAM};
use slide_routes::{RouteDecl, RouteTable};

fn routes() -> RouteTable<&'static str> {
    RouteTable::build(
        vec![
            Some(RouteDecl::index("home")),
            Some(RouteDecl::route("/users/:id", "user")),
            Some(RouteDecl::route("/users/new", "new_user")),
            Some(
                RouteDecl::route("/teams", "teams").with_children(vec![
                    Some(RouteDecl::index("team_list")),
                    Some(RouteDecl::route(":team", "team")),
                    Some(RouteDecl::route(":team/members/*", "members")),
                ]),
            ),
            Some(RouteDecl::route("/:lang?/about", "about")),
            Some(RouteDecl::route("/Admin", "admin").case_sensitive()),
            Some(RouteDecl::route("/files/*", "files")),
            Some(RouteDecl::redirect(Some("*"), "/")),
        ],
        None,
    )
}

fn match_path(table: &RouteTable<&'static str>, path: &str) -> Option<Vec<MatchedRoute<&'static str>>> {
    PatternMatcher.match_routes(table.entries(), path)
}

fn leaf_view(table: &RouteTable<&'static str>, path: &str) -> Option<&'static str> {
    let chain = match_path(table, path)?;
    chain.last().and_then(|m| m.route.view().copied())
}

#[test]
fn test_static_beats_dynamic_regardless_of_order() {
    let table = routes();
    assert_eq!(leaf_view(&table, "/users/new"), Some("new_user"));
    assert_eq!(leaf_view(&table, "/users/42"), Some("user"));
}

#[test]
fn test_root_hits_index_route() {
    let table = routes();
    let chain = match_path(&table, "/").unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].route.view(), Some(&"home"));
    assert_eq!(chain[0].pathname, "/");
}

#[test]
fn test_nested_layout_chain() {
    let table = routes();

    let list = match_path(&table, "/teams").unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].route.view(), Some(&"teams"));
    assert_eq!(list[1].route.view(), Some(&"team_list"));

    let team = match_path(&table, "/teams/rust").unwrap();
    assert_eq!(team.len(), 2);
    assert_eq!(team[1].param("team"), Some("rust"));
    assert_eq!(team[0].pathname, "/teams");
    assert_eq!(team[1].pathname, "/teams/rust");
}

#[test]
fn test_nested_splat_collects_rest() {
    let table = routes();
    let chain = match_path(&table, "/teams/rust/members/core/leads").unwrap();
    let leaf = chain.last().unwrap();
    assert_eq!(leaf.route.view(), Some(&"members"));
    assert_eq!(leaf.param("team"), Some("rust"));
    assert_eq!(leaf.param(SPLAT_PARAM), Some("core/leads"));
    assert_eq!(leaf.pathname_base, "/teams/rust/members");
}

#[test]
fn test_optional_segment_matches_with_and_without() {
    let table = routes();

    let bare = match_path(&table, "/about").unwrap();
    assert_eq!(bare[0].route.view(), Some(&"about"));
    assert_eq!(bare[0].param("lang"), None);

    let localized = match_path(&table, "/fr/about").unwrap();
    assert_eq!(localized[0].route.view(), Some(&"about"));
    assert_eq!(localized[0].param("lang"), Some("fr"));
}

#[test]
fn test_case_sensitivity() {
    let table = routes();
    assert_eq!(leaf_view(&table, "/Admin"), Some("admin"));
    // Falls through to the catch-all redirect
    let chain = match_path(&table, "/admin").unwrap();
    assert_eq!(chain[0].route.redirect().map(|r| r.to.as_str()), Some("/"));
    // Non-sensitive routes ignore case
    assert_eq!(leaf_view(&table, "/USERS/NEW"), Some("new_user"));
}

#[test]
fn test_params_are_percent_decoded() {
    let table = routes();
    let chain = match_path(&table, "/users/j%C3%B6rg").unwrap();
    assert_eq!(chain[0].param("id"), Some("jörg"));
}

#[test]
fn test_splat_matches_bare_prefix() {
    let table = routes();
    let chain = match_path(&table, "/files").unwrap();
    assert_eq!(chain[0].route.view(), Some(&"files"));
    assert_eq!(chain[0].param(SPLAT_PARAM), Some(""));

    let deep = match_path(&table, "/files/a/b.txt").unwrap();
    assert_eq!(deep[0].param(SPLAT_PARAM), Some("a/b.txt"));
}

#[test]
fn test_trailing_slash_matches() {
    let table = routes();
    assert_eq!(leaf_view(&table, "/users/7/"), Some("user"));
}

#[test]
fn test_unmatched_without_catch_all() {
    let table = RouteTable::build(vec![Some(RouteDecl::route("/only", "only"))], None);
    assert!(match_path(&table, "/other").is_none());
    assert!(match_path(&table, "/only/deeper").is_none());
}

#[test]
fn test_ranked_paths_order() {
    let table = routes();
    let ranked = PatternMatcher.ranked_paths(table.entries());
    let pos = |p: &str| ranked.iter().position(|r| r == p).unwrap();
    assert!(pos("/users/new") < pos("/users/:id"));
    assert!(pos("/users/:id") < pos("/files/*"));
    assert_eq!(ranked.last().map(String::as_str), Some("/*"));
}
