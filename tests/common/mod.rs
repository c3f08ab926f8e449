#![allow(dead_code)]

pub mod fixtures {
    use slide_routes::RouteDecl;

    /// Three-step wizard: `/one`, `/two`, `/three`
    pub fn wizard() -> Vec<Option<RouteDecl<&'static str>>> {
        vec![
            Some(RouteDecl::route("/one", "one")),
            Some(RouteDecl::route("/two", "two")),
            Some(RouteDecl::route("/three", "three")),
        ]
    }

    pub const WIZARD_YAML: &str = r#"
options:
  duration: 150
routes:
  - path: /one
    view: one
  - path: /two
    view: two
  - path: /three
    view: three
  - path: "*"
    redirect: /one
"#;

    pub const WIZARD_JSON: &str = r#"{
  "routes": [
    {"path": "/one", "view": "one"},
    {"path": "/two", "view": "two"}
  ]
}"#;
}

pub mod temp_files {
    use std::io::Write;

    use tempfile::NamedTempFile;

    /// Write `content` to a fresh temp file ending in `.{ext}`.
    ///
    /// The file is deleted when the handle is dropped.
    pub fn create_temp_routes(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("slide_routes_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_routes(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_routes(content, "json")
    }
}
