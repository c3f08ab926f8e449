use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use super::decl::RouteDecl;
use crate::config::SlideOptions;

/// Contents of a route file: options plus declarations whose views are
/// view names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoutesFile {
    #[serde(default)]
    pub options: SlideOptions,
    pub routes: Vec<Option<RouteDecl<String>>>,
}

/// Load a route file. YAML is detected by `.yaml`/`.yml`, anything else is
/// parsed as JSON.
pub fn load_routes(file_path: impl AsRef<Path>) -> anyhow::Result<RoutesFile> {
    let path = file_path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    parse_routes(&content, yaml)
        .with_context(|| format!("failed to parse route file {}", path.display()))
}

/// Parse route file content.
pub fn parse_routes(content: &str, yaml: bool) -> anyhow::Result<RoutesFile> {
    let file = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Ok(file)
}
