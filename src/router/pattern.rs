//! Path pattern compilation.
//!
//! Patterns use the `react-router` syntax familiar to SPA authors:
//!
//! - static segments match exactly (case-insensitive unless requested)
//! - `:name` captures one segment, `:name?` captures an optional one
//! - a trailing `*` captures the rest of the path as the `*` param
//!
//! A pattern can match a whole pathname (`end`) or only a prefix of it, which
//! is how layout routes consume their part of the URL before their children
//! match the remainder.

use regex::Regex;

/// Name under which a trailing splat is captured.
pub const SPLAT_PARAM: &str = "*";

#[derive(Debug, Clone)]
struct ParamSpec {
    name: String,
    optional: bool,
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    params: Vec<ParamSpec>,
}

/// Successful match of one pattern against a pathname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Captured params in pattern order; absent optional params are omitted
    pub params: Vec<(String, String)>,
    /// Portion of the pathname the pattern consumed
    pub pathname: String,
    /// Consumed portion minus any splat, without trailing slashes
    pub pathname_base: String,
}

impl PathPattern {
    /// Compile `path`.
    ///
    /// With `end` the pattern must consume the whole pathname (trailing
    /// slashes allowed); otherwise it matches when the pathname continues
    /// with a `/` or ends right after it.
    pub fn compile(path: &str, case_sensitive: bool, end: bool) -> Result<Self, regex::Error> {
        let splat = path.ends_with('*');
        let body = path
            .strip_suffix('*')
            .unwrap_or(path)
            .trim_end_matches('/');

        let mut params = Vec::with_capacity(body.matches(':').count() + usize::from(splat));
        let mut prefix = String::with_capacity(body.len() + 8);
        for segment in body.split('/').filter(|s| !s.is_empty()) {
            if let Some(name) = segment.strip_prefix(':') {
                let (name, optional) = match name.strip_suffix('?') {
                    Some(name) => (name, true),
                    None => (name, false),
                };
                prefix.push_str(if optional { "/?([^/]+)?" } else { "/([^/]+)" });
                params.push(ParamSpec {
                    name: name.to_string(),
                    optional,
                });
            } else {
                prefix.push('/');
                prefix.push_str(&regex::escape(segment));
            }
        }

        let (matched, tail) = if splat {
            params.push(ParamSpec {
                name: SPLAT_PARAM.to_string(),
                optional: false,
            });
            if path == "*" || path == "/*" {
                ("/(.*)".to_string(), "")
            } else {
                (format!("{prefix}(?:/(.+)|/*)"), "")
            }
        } else if end {
            let root = if prefix.is_empty() { "/" } else { "" };
            (format!("{prefix}{root}/*"), "")
        } else if !prefix.is_empty() {
            (prefix, "(?:/.*)?")
        } else {
            ("/".to_string(), ".*")
        };

        let flags = if case_sensitive { "" } else { "(?i)" };
        let regex = Regex::new(&format!("{flags}^({matched}){tail}$"))?;
        Ok(Self { regex, params })
    }

    /// Match `pathname` against this pattern.
    #[must_use]
    pub fn matches(&self, pathname: &str) -> Option<PathMatch> {
        let captures = self.regex.captures(pathname)?;
        let matched = captures.get(1)?.as_str();
        let mut pathname_base = trim_trailing_slashes(matched).to_string();

        let mut params = Vec::with_capacity(self.params.len());
        for (i, spec) in self.params.iter().enumerate() {
            let value = captures.get(i + 2).map(|m| m.as_str());
            if spec.name == SPLAT_PARAM {
                let splat = value.unwrap_or("");
                let base = &matched[..matched.len() - splat.len()];
                pathname_base = trim_trailing_slashes(base).to_string();
                params.push((spec.name.clone(), splat.to_string()));
                continue;
            }
            match value {
                Some(value) => params.push((spec.name.clone(), value.to_string())),
                None if spec.optional => {}
                None => params.push((spec.name.clone(), String::new())),
            }
        }

        Some(PathMatch {
            params,
            pathname: matched.to_string(),
            pathname_base,
        })
    }
}

/// Strip trailing slashes while keeping at least the first character.
pub(crate) fn trim_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && !path.is_empty() {
        &path[..1]
    } else {
        trimmed
    }
}

/// Join path pieces with `/` and collapse repeated slashes.
pub(crate) fn join_paths(parts: &[&str]) -> String {
    let joined = parts.join("/");
    let mut out = String::with_capacity(joined.len());
    let mut last_slash = false;
    for c in joined.chars() {
        if c == '/' {
            if !last_slash {
                out.push(c);
            }
            last_slash = true;
        } else {
            out.push(c);
            last_slash = false;
        }
    }
    out
}

/// Drop trailing slashes and force exactly one leading slash.
pub(crate) fn normalize_pathname(path: &str) -> String {
    let trimmed = path.trim_end_matches('/').trim_start_matches('/');
    format!("/{trimmed}")
}

/// Expand optional segments into every concrete path they stand for.
///
/// `:lang?/about` yields `about` and `:lang/about`; the required variant of a
/// segment is listed before the variant that omits it.
pub(crate) fn explode_optional_segments(path: &str) -> Vec<String> {
    let mut segments = path.split('/');
    let Some(first) = segments.next() else {
        return Vec::new();
    };
    let rest: Vec<&str> = segments.collect();

    let optional = first.ends_with('?');
    let required = first.strip_suffix('?').unwrap_or(first);

    if rest.is_empty() {
        return if optional {
            vec![required.to_string(), String::new()]
        } else {
            vec![required.to_string()]
        };
    }

    let rest_exploded = explode_optional_segments(&rest.join("/"));
    let mut result: Vec<String> = rest_exploded
        .iter()
        .map(|sub| {
            if sub.is_empty() {
                required.to_string()
            } else {
                format!("{required}/{sub}")
            }
        })
        .collect();
    if optional {
        result.extend(rest_exploded);
    }

    result
        .into_iter()
        .map(|exploded| {
            if path.starts_with('/') && exploded.is_empty() {
                "/".to_string()
            } else {
                exploded
            }
        })
        .collect()
}
