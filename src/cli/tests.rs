//! Unit tests for CLI commands

use crate::cli::{describe_table, simulate, Cli, Commands};
use crate::direction::Direction;
use crate::routes::{parse_routes, RoutesFile};
use crate::transition::{Animation, TransitionKey};
use clap::Parser;

const WIZARD: &str = r#"
routes:
  - path: /one
    view: one
  - path: /two
    view: two
  - path: /three
    view: three
"#;

fn wizard() -> RoutesFile {
    parse_routes(WIZARD, true).unwrap()
}

fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_simulate_command_parses_paths() {
    let cli = Cli::try_parse_from([
        "slide-routes",
        "simulate",
        "--routes",
        "wizard.yaml",
        "--path",
        "/one",
        "/two",
        "--reverse",
    ])
    .unwrap();

    match cli.command {
        Commands::Simulate {
            routes,
            paths,
            reverse,
            base,
            json,
        } => {
            assert_eq!(routes.to_string_lossy(), "wizard.yaml");
            assert_eq!(paths, vec!["/one", "/two"]);
            assert!(reverse);
            assert!(base.is_none());
            assert!(!json);
        }
        _ => panic!("Expected Simulate command"),
    }
}

#[test]
fn test_css_command_defaults() {
    let cli = Cli::try_parse_from(["slide-routes", "css", "--animation", "rotate"]).unwrap();
    match cli.command {
        Commands::Css {
            animation,
            duration,
            direction,
            scope,
            ..
        } => {
            assert_eq!(animation, Animation::Rotate);
            assert_eq!(duration, 200);
            assert_eq!(direction, Direction::Forward);
            assert_eq!(scope, ".slide-routes");
        }
        _ => panic!("Expected Css command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["slide-routes", "simulate", "-r", "w.yaml", "-p", "/one"],
        vec!["slide-routes", "routes", "--routes", "w.yaml", "--json"],
        vec!["slide-routes", "css", "--timing", "ease-in-out"],
        vec!["slide-routes", "watch", "--routes", "w.yaml"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_rejects_unknown_option_values() {
    assert!(Cli::try_parse_from(["slide-routes", "css", "--animation", "wobble"]).is_err());
    assert!(Cli::try_parse_from(["slide-routes", "simulate", "-r", "w.yaml"]).is_err());
}

#[test]
fn test_simulate_reports_directions_and_classes() {
    let steps = simulate(wizard(), &paths(&["/one", "/two", "/one"]), false, None).unwrap();

    assert_eq!(steps[0].direction, Direction::Undirected);
    assert_eq!(steps[0].slots.len(), 1);
    assert_eq!(steps[0].slots[0].classes, vec!["item"]);

    assert_eq!(steps[1].direction, Direction::Forward);
    assert_eq!(steps[1].index, 1);
    assert_eq!(steps[1].key, TransitionKey::Path("/two".to_string()));
    assert_eq!(steps[1].slots[0].classes, vec!["item", "forward-exit"]);
    assert_eq!(steps[1].slots[1].classes, vec!["item", "forward-enter"]);

    assert_eq!(steps[2].direction, Direction::Back);
    assert_eq!(steps[2].slots.len(), 2);
    assert_eq!(steps[2].slots[0].classes, vec!["item", "back-exit"]);
}

#[test]
fn test_simulate_reverse_flips_direction() {
    let steps = simulate(wizard(), &paths(&["/one", "/two"]), true, None).unwrap();
    assert_eq!(steps[1].direction, Direction::Back);
    assert_eq!(steps[1].index, 1);
    assert_eq!(steps[0].index, 2);
}

#[test]
fn test_simulate_with_base_resolves_fragments() {
    let steps = simulate(
        wizard(),
        &paths(&["/wizard/one", "/wizard/three"]),
        false,
        Some("/wizard"),
    )
    .unwrap();
    assert_eq!(steps[0].fragment, "/one");
    assert_eq!(steps[1].fragment, "/three");
    assert_eq!(steps[1].direction, Direction::Forward);
}

#[test]
fn test_simulate_fails_on_unmatched_path() {
    let err = simulate(wizard(), &paths(&["/one", "/missing"]), false, None).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("navigation to /missing failed"));
    assert!(message.contains("route /missing does not match"));
}

#[test]
fn test_describe_table_rows() {
    let file = parse_routes(
        r#"{"routes": [{"index": true, "view": "home"}, {"path": "/a", "view": "a"}, {"path": "*", "redirect": "/"}]}"#,
        false,
    )
    .unwrap();
    let router = crate::SlideRoutes::new(file.options, file.routes);
    let rows = describe_table(router.table());

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].key, TransitionKey::Index(0));
    assert_eq!(rows[0].view.as_deref(), Some("home"));
    assert_eq!(rows[1].key.to_string(), "/a");
    assert_eq!(rows[2].redirect.as_deref(), Some("/"));
    assert!(rows[2].view.is_none());
}
