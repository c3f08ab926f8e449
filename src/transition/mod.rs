//! # Transition Driver
//!
//! Headless model of a single-slot animated route replacement.
//!
//! ## Lifecycle
//!
//! ```text
//! render(new key) ──► active slot: Exit ─frame─► ExitActive ─advance─► removed
//!                 └─► new slot:    Enter ─frame─► EnterActive ─advance─► EnterDone
//! ```
//!
//! Each phase maps to classes under the current [`Direction`] namespace
//! (`forward-enter forward-enter-active`, `back-exit`, ...). The namespace is
//! re-applied to every mounted slot on each render, so an exiting view always
//! animates in the direction of the navigation that displaced it.
//!
//! With `destroy = false` the group runs under [`Completion::Retain`]: phases
//! never complete, exited views stay mounted (translated out of the slot) and
//! keep whatever state they own. Navigating back to a retained view revives it
//! rather than mounting a new one.
//!
//! [`Direction`]: crate::direction::Direction

mod group;
pub mod style;

pub use group::{Completion, Phase, Slot, TransitionEvent, TransitionGroup, TransitionKey};
pub use style::{Animation, StyleSheet, Timing};
