//! # CLI Module
//!
//! Tooling around route files: replay navigations, inspect tables and emit
//! stylesheets without mounting a UI.
//!
//! ## Commands
//!
//! ### `simulate`
//!
//! Replay a sequence of navigations and print, for each, the resolved
//! fragment, table index, transition key, direction and slot classes:
//!
//! ```bash
//! slide-routes simulate --routes wizard.yaml --path /one /two /one
//! ```
//!
//! Options:
//! - `--reverse` - reverse the table order (forward becomes back)
//! - `--base <PATH>` - treat the paths as nested under an enclosing router
//! - `--json` - machine-readable output
//!
//! ### `routes`
//!
//! Dump the built table (index, key, path, view or redirect target):
//!
//! ```bash
//! slide-routes routes --routes wizard.yaml
//! ```
//!
//! ### `css`
//!
//! Print the stylesheet for a container:
//!
//! ```bash
//! slide-routes css --animation rotate --duration 300 --direction back
//! ```
//!
//! ### `watch`
//!
//! Re-dump the table whenever the route file changes:
//!
//! ```bash
//! slide-routes watch --routes wizard.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use clap::Parser;
//! use slide_routes::cli::{run_cli, Cli};
//!
//! let cli = Cli::parse();
//! run_cli(cli)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Route file options are layered with `SLIDE_ROUTES_*` environment variables
//! (see [`config`](crate::config)).

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{
    describe_table, reverse_order, run_cli, simulate, Cli, Commands, SlotSummary, Step, TableRow,
};
