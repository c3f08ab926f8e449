//! # Hot Reload
//!
//! Watches a route file and hands every successfully reloaded version to a
//! callback, so a host can call
//! [`SlideRoutes::set_routes`](crate::SlideRoutes::set_routes) while editing
//! routes without restarting.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::mpsc;
//! use slide_routes::hot_reload::watch_routes;
//!
//! let (tx, rx) = mpsc::channel();
//! let _watcher = watch_routes("routes.yaml", move |file| {
//!     let _ = tx.send(file);
//! })?;
//!
//! for file in rx {
//!     println!("reloaded {} routes", file.routes.len());
//! }
//! # Ok::<(), notify::Error>(())
//! ```
//!
//! The callback runs on the watcher's thread; send the file back to whichever
//! thread owns the router.
//!
//! ## Error Handling
//!
//! A file that fails to load or parse is logged and skipped. The previous
//! routes stay active until a valid version is saved.

use std::path::{Path, PathBuf};

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::routes::{load_routes, RoutesFile};

/// Watch a route file and call `on_reload` with each valid new version.
///
/// The returned watcher stops watching when dropped.
pub fn watch_routes<P, F>(routes_path: P, mut on_reload: F) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(RoutesFile) + Send + 'static,
{
    let path: PathBuf = routes_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                match load_routes(&watch_path) {
                    Ok(file) => {
                        info!(
                            path = %watch_path.display(),
                            routes_count = file.routes.len(),
                            "hot-reload: applying route updates"
                        );
                        on_reload(file);
                    }
                    Err(err) => warn!(
                        path = %watch_path.display(),
                        error = %format!("{err:#}"),
                        "hot-reload: keeping previous routes"
                    ),
                }
            }
            Err(err) => warn!(error = %err, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    info!(path = %path.display(), "hot-reload: watching route file");
    Ok(watcher)
}
