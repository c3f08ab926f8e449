//! # Configuration
//!
//! Options of one [`SlideRoutes`](crate::SlideRoutes) instance.
//!
//! Options come from code, from the `options` section of a route file, or from
//! environment variables layered on top of either:
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `SLIDE_ROUTES_ANIMATION` | `slide`, `vertical-slide`, `rotate` | `slide` |
//! | `SLIDE_ROUTES_DURATION` | milliseconds | `200` |
//! | `SLIDE_ROUTES_TIMING` | `ease`, `ease-in`, `ease-out`, `ease-in-out`, `linear` | `ease` |
//! | `SLIDE_ROUTES_DESTROY` | `true`, `false` | `true` |
//!
//! Values are not validated beyond parsing; an unparsable variable is ignored
//! and the existing value kept.
//!
//! ```yaml
//! options:
//!   animation: vertical-slide
//!   duration: 300
//!   timing: ease-in-out
//!   destroy: false
//! ```

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::transition::{Animation, Completion, Timing};

pub const DEFAULT_DURATION_MS: u64 = 200;

/// Transition options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SlideOptions {
    pub animation: Animation,
    /// Transition duration in milliseconds
    pub duration: u64,
    pub timing: Timing,
    /// Unmount exited views (`true`) or retain them (`false`)
    pub destroy: bool,
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            animation: Animation::Slide,
            duration: DEFAULT_DURATION_MS,
            timing: Timing::Ease,
            destroy: true,
        }
    }
}

impl SlideOptions {
    /// Defaults overridden from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `SLIDE_ROUTES_*` variables on top of these options.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SLIDE_ROUTES_ANIMATION") {
            match val.parse() {
                Ok(animation) => self.animation = animation,
                Err(err) => warn!(error = %err, "Ignoring SLIDE_ROUTES_ANIMATION"),
            }
        }
        if let Some(val) = lookup("SLIDE_ROUTES_DURATION") {
            match val.trim().parse() {
                Ok(duration) => self.duration = duration,
                Err(_) => warn!(value = %val, "Ignoring SLIDE_ROUTES_DURATION"),
            }
        }
        if let Some(val) = lookup("SLIDE_ROUTES_TIMING") {
            match val.parse() {
                Ok(timing) => self.timing = timing,
                Err(err) => warn!(error = %err, "Ignoring SLIDE_ROUTES_TIMING"),
            }
        }
        if let Some(val) = lookup("SLIDE_ROUTES_DESTROY") {
            match val.trim().parse() {
                Ok(destroy) => self.destroy = destroy,
                Err(_) => warn!(value = %val, "Ignoring SLIDE_ROUTES_DESTROY"),
            }
        }
        self
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration)
    }

    /// Completion policy implied by `destroy`.
    #[must_use]
    pub fn completion(&self) -> Completion {
        Completion::for_destroy(self.destroy, self.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_documented_values() {
        let options = SlideOptions::default();
        assert_eq!(options.animation, Animation::Slide);
        assert_eq!(options.duration, 200);
        assert_eq!(options.timing, Timing::Ease);
        assert!(options.destroy);
        assert_eq!(
            options.completion(),
            Completion::Timeout(Duration::from_millis(200))
        );
    }

    #[test]
    fn overrides_apply_valid_values() {
        let env = vars(&[
            ("SLIDE_ROUTES_ANIMATION", "rotate"),
            ("SLIDE_ROUTES_DURATION", "450"),
            ("SLIDE_ROUTES_TIMING", "linear"),
            ("SLIDE_ROUTES_DESTROY", "false"),
        ]);
        let options = SlideOptions::default().with_overrides(|k| env.get(k).cloned());
        assert_eq!(options.animation, Animation::Rotate);
        assert_eq!(options.duration, 450);
        assert_eq!(options.timing, Timing::Linear);
        assert_eq!(options.completion(), Completion::Retain);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let env = vars(&[
            ("SLIDE_ROUTES_ANIMATION", "wobble"),
            ("SLIDE_ROUTES_DURATION", "soon"),
        ]);
        let options = SlideOptions::default().with_overrides(|k| env.get(k).cloned());
        assert_eq!(options, SlideOptions::default());
    }

    #[test]
    fn deserializes_partial_yaml() {
        let options: SlideOptions =
            serde_yaml::from_str("animation: vertical-slide\ntiming: ease-in-out\n").unwrap();
        assert_eq!(options.animation, Animation::VerticalSlide);
        assert_eq!(options.timing, Timing::EaseInOut);
        assert_eq!(options.duration, DEFAULT_DURATION_MS);
        assert!(options.destroy);
    }
}
