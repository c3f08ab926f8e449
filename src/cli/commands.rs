use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::direction::Direction;
use crate::hot_reload::watch_routes;
use crate::resolve::RouteContext;
use crate::routes::{load_routes, Comparator, RouteNode, RouteTable, RoutesFile};
use crate::transition::{Animation, StyleSheet, Timing, TransitionKey};
use crate::SlideRoutes;

/// Command-line interface for slide-routes
///
/// Inspect route files and replay navigations without a UI.
#[derive(Parser)]
#[command(name = "slide-routes")]
#[command(about = "Directional route transition tooling", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Replay navigations and print direction and slot classes for each
    Simulate {
        /// Route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Pathnames to navigate to, in order
        #[arg(short, long = "path", required = true, num_args = 1..)]
        paths: Vec<String>,

        /// Reverse the route table order
        #[arg(long, default_value_t = false)]
        reverse: bool,

        /// Base of an enclosing router the paths are nested under
        #[arg(long)]
        base: Option<String>,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the stylesheet for a container
    Css {
        #[arg(long, value_parser = clap::value_parser!(Animation), default_value = "slide")]
        animation: Animation,

        /// Transition duration in milliseconds
        #[arg(long, default_value_t = crate::config::DEFAULT_DURATION_MS)]
        duration: u64,

        #[arg(long, value_parser = clap::value_parser!(Timing), default_value = "ease")]
        timing: Timing,

        /// Direction whose transition rule is emitted
        #[arg(long, value_parser = clap::value_parser!(Direction), default_value = "forward")]
        direction: Direction,

        /// Class selector of the container
        #[arg(long, default_value = ".slide-routes")]
        scope: String,
    },
    /// Dump the built route table
    Routes {
        /// Route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// Reverse the route table order
        #[arg(long, default_value_t = false)]
        reverse: bool,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Watch a route file and dump the table on every change
    Watch {
        /// Route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,
    },
}

/// One row of a table dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub key: TransitionKey,
    pub path: Option<String>,
    pub view: Option<String>,
    pub redirect: Option<String>,
}

/// Mounted slot after one simulated navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSummary {
    pub key: TransitionKey,
    pub classes: Vec<String>,
}

/// Outcome of one simulated navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub pathname: String,
    pub fragment: String,
    pub index: usize,
    pub key: TransitionKey,
    pub direction: Direction,
    pub slots: Vec<SlotSummary>,
}

/// Comparator that reverses `table`'s current order.
///
/// Entries unknown to `table` compare equal and keep their relative order.
#[must_use]
pub fn reverse_order<V>(table: &RouteTable<V>) -> Comparator<V> {
    let positions: HashMap<_, _> = table
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.id, index))
        .collect();
    Arc::new(move |a: &RouteNode<V>, b: &RouteNode<V>| {
        positions.get(&b.id).cmp(&positions.get(&a.id))
    })
}

fn mount(file: RoutesFile, reverse: bool) -> SlideRoutes<String> {
    let options = file.options.with_env_overrides();
    let mut router = SlideRoutes::new(options, file.routes);
    if reverse {
        let compare = reverse_order(router.table());
        router.set_compare(Some(compare));
    }
    router
}

/// Rows describing `table`, in table order.
#[must_use]
pub fn describe_table(table: &RouteTable<String>) -> Vec<TableRow> {
    table
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| TableRow {
            index,
            key: TransitionKey::for_entry(entry.path.as_deref(), index),
            path: entry.path.clone(),
            view: entry.view().cloned(),
            redirect: entry.redirect().map(|r| r.to.clone()),
        })
        .collect()
}

/// Replay `paths` against the routes in `file`.
///
/// Slot classes are captured right after each render, before the transition
/// runs; the transition is then played to completion so the next navigation
/// starts from a settled group.
pub fn simulate(
    file: RoutesFile,
    paths: &[String],
    reverse: bool,
    base: Option<&str>,
) -> anyhow::Result<Vec<Step>> {
    let mut router = mount(file, reverse);
    let parent = base.map(RouteContext::with_base);
    let settle = router.options().duration() + Duration::from_millis(1);
    let mut now = Instant::now();
    let mut steps = Vec::with_capacity(paths.len());

    for pathname in paths {
        let out = router
            .render(pathname, parent.as_ref())
            .with_context(|| format!("navigation to {pathname} failed"))?;

        let (index, key) = out
            .slots
            .iter()
            .rev()
            .find(|s| !s.phase.is_exiting())
            .map(|s| (s.index, s.key.clone()))
            .context("render produced no active slot")?;

        steps.push(Step {
            pathname: pathname.clone(),
            fragment: out.path,
            index,
            key,
            direction: out.direction,
            slots: out
                .slots
                .into_iter()
                .map(|s| SlotSummary {
                    key: s.key,
                    classes: s.classes,
                })
                .collect(),
        });

        router.frame(now);
        now += settle;
        router.advance(now);
    }

    Ok(steps)
}

fn format_step(step: &Step) -> String {
    let slots: Vec<String> = step
        .slots
        .iter()
        .map(|s| format!("{}[{}]", s.key, s.classes.join(" ")))
        .collect();
    format!(
        "{} -> {} #{} key={} {} {}",
        step.pathname,
        step.fragment,
        step.index,
        step.key,
        step.direction,
        slots.join(" ")
    )
}

fn format_row(row: &TableRow) -> String {
    let target = match (&row.view, &row.redirect) {
        (_, Some(to)) => format!("redirect {to}"),
        (Some(view), None) => view.clone(),
        (None, None) => "-".to_string(),
    };
    format!(
        "{:>3}  {:<24} {:<24} {}",
        row.index,
        row.key.to_string(),
        row.path.as_deref().unwrap_or("<index>"),
        target
    )
}

fn print_table(path: &Path, reverse: bool, json: bool) -> anyhow::Result<()> {
    let file = load_routes(path)?;
    let router = mount(file, reverse);
    let rows = describe_table(router.table());
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{}", format_row(row));
        }
    }
    Ok(())
}

/// Execute the CLI command specified by the user
///
/// # Errors
///
/// Returns an error if a route file cannot be loaded, a navigation does not
/// match, or output cannot be produced.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Simulate {
            routes,
            paths,
            reverse,
            base,
            json,
        } => {
            let file = load_routes(&routes)?;
            let steps = simulate(file, &paths, reverse, base.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&steps)?);
            } else {
                for step in &steps {
                    println!("{}", format_step(step));
                }
            }
            Ok(())
        }
        Commands::Css {
            animation,
            duration,
            timing,
            direction,
            scope,
        } => {
            let css = StyleSheet::render(&scope, duration, timing, direction)
                .context("failed to render stylesheet")?;
            let container = scope.trim_start_matches('.');
            println!("/* container: class=\"{container} {animation}\" */");
            println!("{css}");
            Ok(())
        }
        Commands::Routes {
            routes,
            reverse,
            json,
        } => print_table(&routes, reverse, json),
        Commands::Watch { routes } => {
            print_table(&routes, false, false)?;

            let (tx, rx) = mpsc::channel();
            let _watcher = watch_routes(&routes, move |file| {
                if tx.send(file).is_err() {
                    info!("hot-reload: receiver gone");
                }
            })
            .with_context(|| format!("failed to watch {}", routes.display()))?;

            for file in rx {
                let router = mount(file, false);
                println!("--- reloaded {} ---", routes.display());
                for row in describe_table(router.table()) {
                    println!("{}", format_row(&row));
                }
            }
            Ok(())
        }
    }
}
