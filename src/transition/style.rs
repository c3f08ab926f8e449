//! Scoped stylesheet for the transition container.
//!
//! The container is a one-cell grid: every slot sits in the same cell so an
//! entering and an exiting view overlap instead of reflowing. Each animation
//! family defines a start/end transform pair for `enter` and `exit` in both
//! directions; only the namespace of the current direction gets the
//! `transition` property, and only while more than one slot is mounted.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::direction::Direction;

/// Visual transform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Animation {
    /// Horizontal translate
    #[default]
    Slide,
    /// Vertical translate
    VerticalSlide,
    /// 3-D flip around the Y axis
    Rotate,
}

impl Animation {
    /// Class name applied to the container.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Animation::Slide => "slide",
            Animation::VerticalSlide => "vertical-slide",
            Animation::Rotate => "rotate",
        }
    }

    /// CSS transform function and its full-travel amount.
    #[must_use]
    pub fn transform(&self) -> (&'static str, &'static str) {
        match self {
            Animation::Slide => ("translateX", "100%"),
            Animation::VerticalSlide => ("translateY", "100%"),
            Animation::Rotate => ("rotateY", "180deg"),
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Animation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slide" => Ok(Animation::Slide),
            "vertical-slide" | "vertical_slide" => Ok(Animation::VerticalSlide),
            "rotate" => Ok(Animation::Rotate),
            other => Err(format!("unknown animation: {other}")),
        }
    }
}

/// Easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timing {
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
}

impl Timing {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Timing::Ease => "ease",
            Timing::EaseIn => "ease-in",
            Timing::EaseOut => "ease-out",
            Timing::EaseInOut => "ease-in-out",
            Timing::Linear => "linear",
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ease" => Ok(Timing::Ease),
            "ease-in" => Ok(Timing::EaseIn),
            "ease-out" => Ok(Timing::EaseOut),
            "ease-in-out" => Ok(Timing::EaseInOut),
            "linear" => Ok(Timing::Linear),
            other => Err(format!("unknown timing: {other}")),
        }
    }
}

const STYLESHEET_TEMPLATE: &str = r#"{{ scope }} {
  display: grid;
}
{{ scope }} > .item {
  grid-area: 1 / 1 / 2 / 2;
}
{{ scope }} > .item:not(:only-child).{{ direction }}-enter-active,
{{ scope }} > .item:not(:only-child).{{ direction }}-exit-active {
  transition: transform {{ duration }}ms {{ timing }};
}
{%- for family in families %}
{{ scope }}.{{ family.name }} {
{%- if family.name == "rotate" %}
  perspective: 2000px;
{%- else %}
  overflow: hidden;
{%- endif %}
}
{%- if family.name == "rotate" %}
{{ scope }}.rotate > .item {
  backface-visibility: hidden;
}
{%- endif %}
{%- for rule in family.rules %}
{{ scope }}.{{ family.name }} > .{{ rule.class }} {
  transform: {{ family.function }}({{ rule.value }});
}
{%- endfor %}
{%- endfor %}
"#;

const TEMPLATE_NAME: &str = "slide-routes.css";

static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();

/// Shared environment with the stylesheet template compiled once.
///
/// A template that fails to compile is logged and left out, so rendering
/// reports it as a missing template.
fn environment() -> &'static Environment<'static> {
    ENVIRONMENT.get_or_init(|| {
        let mut env = Environment::new();
        if let Err(err) = env.add_template(TEMPLATE_NAME, STYLESHEET_TEMPLATE) {
            error!(error = %err, "Stylesheet template failed to compile");
        }
        env
    })
}

/// Stylesheet generator for one container.
pub struct StyleSheet;

impl StyleSheet {
    /// Render the stylesheet for a container identified by `scope`
    /// (a class selector such as `.slide-routes-01h...`).
    ///
    /// Rules for all three families are emitted; the container's animation
    /// class selects which apply.
    pub fn render(
        scope: &str,
        duration_ms: u64,
        timing: Timing,
        direction: Direction,
    ) -> Result<String, minijinja::Error> {
        let families: Vec<_> = [Animation::Slide, Animation::VerticalSlide, Animation::Rotate]
            .iter()
            .map(|animation| {
                let (function, max) = animation.transform();
                context! {
                    name => animation.as_str(),
                    function => function,
                    rules => transform_rules(max),
                }
            })
            .collect();

        let tmpl = environment().get_template(TEMPLATE_NAME)?;
        tmpl.render(context! {
            scope => scope,
            duration => duration_ms,
            timing => timing.as_str(),
            direction => direction.as_str(),
            families => families,
        })
    }
}

fn transform_rules(max: &str) -> Vec<minijinja::Value> {
    let negative = format!("-{max}");
    [
        ("back-enter", negative.as_str()),
        ("back-enter-active", "0"),
        ("back-exit", "0"),
        ("back-exit-active", max),
        ("forward-enter", max),
        ("forward-enter-active", "0"),
        ("forward-exit", "0"),
        ("forward-exit-active", negative.as_str()),
    ]
    .iter()
    .map(|(class, value)| context! { class => class, value => value })
    .collect()
}
