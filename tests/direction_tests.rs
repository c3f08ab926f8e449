use std::cell::Cell;
use std::sync::Arc;

use slide_routes::router::{MatchedRoute, PatternMatcher, RouteMatcher};
use slide_routes::routes::{Comparator, RouteNode};
use slide_routes::{Direction, DirectionTracker, RouteDecl, RouteError, RouteTable};

mod common;
use common::fixtures::wizard;

fn table(decls: Vec<Option<RouteDecl<&'static str>>>) -> RouteTable<&'static str> {
    RouteTable::build(decls, None)
}

fn navigate(
    tracker: &mut DirectionTracker<&'static str>,
    table: &RouteTable<&'static str>,
    path: &str,
) -> Direction {
    tracker.resolve(table, &PatternMatcher, path).unwrap();
    tracker.direction()
}

#[test]
fn test_first_navigation_is_undirected() {
    let table = table(wizard());
    let mut tracker = DirectionTracker::new();
    assert_eq!(navigate(&mut tracker, &table, "/two"), Direction::Undirected);
    assert_eq!(tracker.previous_path(), Some("/two"));
}

#[test]
fn test_wizard_forward_back_unchanged() {
    let table = table(wizard());
    let mut tracker = DirectionTracker::new();

    navigate(&mut tracker, &table, "/one");
    assert_eq!(navigate(&mut tracker, &table, "/two"), Direction::Forward);
    assert_eq!(navigate(&mut tracker, &table, "/one"), Direction::Back);
    assert_eq!(navigate(&mut tracker, &table, "/one"), Direction::Back);
}

#[test]
fn test_direction_follows_index_difference_for_every_pair() {
    let table = table(wizard());
    let paths = ["/one", "/two", "/three"];

    for (i, from) in paths.iter().enumerate() {
        for (j, to) in paths.iter().enumerate() {
            let mut tracker = DirectionTracker::new();
            navigate(&mut tracker, &table, from);
            let direction = navigate(&mut tracker, &table, to);
            let expected = match j.cmp(&i) {
                std::cmp::Ordering::Greater => Direction::Forward,
                std::cmp::Ordering::Less => Direction::Back,
                std::cmp::Ordering::Equal => Direction::Undirected,
            };
            assert_eq!(direction, expected, "{from} -> {to}");
        }
    }
}

#[test]
fn test_same_entry_different_path_is_undirected() {
    let table = table(vec![
        Some(RouteDecl::route("/intro", "intro")),
        Some(RouteDecl::route("/step/:n", "step")),
    ]);
    let mut tracker = DirectionTracker::new();

    navigate(&mut tracker, &table, "/intro");
    assert_eq!(navigate(&mut tracker, &table, "/step/1"), Direction::Forward);
    assert_eq!(navigate(&mut tracker, &table, "/step/2"), Direction::Undirected);
}

#[test]
fn test_unmatched_path_errors_without_state_change() {
    let table = table(wizard());
    let mut tracker = DirectionTracker::new();
    navigate(&mut tracker, &table, "/two");
    navigate(&mut tracker, &table, "/three");

    let err = tracker
        .resolve(&table, &PatternMatcher, "/missing")
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::Unmatched {
            path: "/missing".to_string()
        }
    );
    assert_eq!(err.to_string(), "route /missing does not match");
    assert_eq!(tracker.direction(), Direction::Forward);
    assert_eq!(tracker.previous_path(), Some("/three"));

    assert_eq!(navigate(&mut tracker, &table, "/one"), Direction::Back);
}

#[test]
fn test_repeated_path_skips_lookup_even_after_table_change() {
    let full = table(wizard());
    let empty: RouteTable<&'static str> = RouteTable::default();
    let calls = Cell::new(0);
    let counting = |routes: &[Arc<RouteNode<&'static str>>], path: &str| {
        calls.set(calls.get() + 1);
        RouteMatcher::match_routes(&PatternMatcher, routes, path)
    };

    let mut tracker = DirectionTracker::new();
    tracker.resolve(&full, &counting, "/one").unwrap();
    tracker.resolve(&full, &counting, "/two").unwrap();
    let calls_before = calls.get();
    let direction = tracker.direction();

    let again = tracker.resolve(&empty, &counting, "/two").unwrap();
    assert_eq!(calls.get(), calls_before);
    assert_eq!(again.index, 1);
    assert_eq!(tracker.direction(), direction);
    assert_eq!(tracker.previous_path(), Some("/two"));
}

#[test]
fn test_reversing_comparator_flips_direction() {
    let reverse: Comparator<&'static str> =
        Arc::new(|a: &RouteNode<&'static str>, b: &RouteNode<&'static str>| b.path.cmp(&a.path));
    // Descending by path: "/three" then "/one"
    let table = RouteTable::build(
        vec![
            Some(RouteDecl::route("/one", "one")),
            Some(RouteDecl::route("/three", "three")),
        ],
        Some(&reverse),
    );
    let mut tracker = DirectionTracker::new();
    navigate(&mut tracker, &table, "/one");
    assert_eq!(navigate(&mut tracker, &table, "/three"), Direction::Back);
}

#[test]
fn test_previous_path_is_resolved_in_current_table() {
    let forward = table(wizard());
    let mut tracker = DirectionTracker::new();
    navigate(&mut tracker, &forward, "/three");

    let reversed = table(vec![
        Some(RouteDecl::route("/three", "three")),
        Some(RouteDecl::route("/two", "two")),
        Some(RouteDecl::route("/one", "one")),
    ]);
    // "/three" sits at index 0 in the new table, so moving to "/two" is forward
    assert_eq!(navigate(&mut tracker, &reversed, "/two"), Direction::Forward);
}

#[test]
fn test_previous_path_missing_from_new_table_is_an_error() {
    let first = table(wizard());
    let mut tracker = DirectionTracker::new();
    navigate(&mut tracker, &first, "/three");

    let shrunk = table(vec![Some(RouteDecl::route("/one", "one"))]);
    let err = tracker
        .resolve(&shrunk, &PatternMatcher, "/one")
        .unwrap_err();
    assert_eq!(err.path(), "/three");
    assert_eq!(tracker.previous_path(), Some("/three"));
}

#[test]
fn test_nested_match_resolves_to_top_level_entry() {
    let table = table(vec![
        Some(RouteDecl::route("/intro", "intro")),
        Some(RouteDecl::route("/wizard", "wizard").with_children(vec![
            Some(RouteDecl::index("start")),
            Some(RouteDecl::route("step/:n", "step")),
        ])),
    ]);
    let mut tracker = DirectionTracker::new();

    let matched = tracker
        .resolve(&table, &PatternMatcher, "/wizard/step/3")
        .unwrap();
    assert_eq!(matched.index, 1);
    assert_eq!(matched.chain.len(), 2);
    assert_eq!(matched.leaf().and_then(|m| m.param("n")), Some("3"));
    assert_eq!(matched.key().to_string(), "/wizard");

    assert_eq!(navigate(&mut tracker, &table, "/intro"), Direction::Back);
}

#[test]
fn test_custom_matcher_plugs_in() {
    let table = table(wizard());
    let last_only = |routes: &[Arc<RouteNode<&'static str>>], _path: &str| {
        routes.last().map(|route| {
            vec![MatchedRoute {
                route: Arc::clone(route),
                params: Default::default(),
                pathname: "/".to_string(),
                pathname_base: "/".to_string(),
            }]
        })
    };

    let mut tracker = DirectionTracker::new();
    let matched = tracker.resolve(&table, &last_only, "/anything").unwrap();
    assert_eq!(matched.index, 2);
}

#[test]
fn test_reset_forgets_state() {
    let table = table(wizard());
    let mut tracker = DirectionTracker::new();
    navigate(&mut tracker, &table, "/one");
    navigate(&mut tracker, &table, "/two");
    tracker.reset();
    assert_eq!(tracker.direction(), Direction::Undirected);
    assert!(tracker.previous_path().is_none());
}
