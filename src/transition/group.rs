use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, trace};

use crate::direction::Direction;
use crate::ids::NodeRef;

/// Identity of the active view.
///
/// The matched route's declared path when it has one, else its table index.
/// A key change is what starts an enter/exit transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TransitionKey {
    Path(String),
    Index(usize),
}

impl TransitionKey {
    #[must_use]
    pub fn for_entry(path: Option<&str>, index: usize) -> Self {
        match path {
            Some(path) => TransitionKey::Path(path.to_string()),
            None => TransitionKey::Index(index),
        }
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionKey::Path(path) => f.write_str(path),
            TransitionKey::Index(index) => write!(f, "{index}"),
        }
    }
}

/// When an active phase is considered finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Finish after the duration; exited slots are unmounted
    Timeout(Duration),
    /// Never finish; exited slots stay mounted in their end position
    Retain,
}

impl Completion {
    /// Policy for the `destroy` option.
    #[must_use]
    pub fn for_destroy(destroy: bool, duration: Duration) -> Self {
        if destroy {
            Completion::Timeout(duration)
        } else {
            Completion::Retain
        }
    }
}

/// Lifecycle position of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Mounted without animation (first render)
    Idle,
    Enter,
    EnterActive,
    EnterDone,
    Exit,
    ExitActive,
}

impl Phase {
    /// Lifecycle classes under the namespace `ns`.
    #[must_use]
    pub fn classes(&self, ns: &str) -> Vec<String> {
        match self {
            Phase::Idle => Vec::new(),
            Phase::Enter => vec![format!("{ns}-enter")],
            Phase::EnterActive => vec![format!("{ns}-enter"), format!("{ns}-enter-active")],
            Phase::EnterDone => vec![format!("{ns}-enter-done")],
            Phase::Exit => vec![format!("{ns}-exit")],
            Phase::ExitActive => vec![format!("{ns}-exit"), format!("{ns}-exit-active")],
        }
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        matches!(self, Phase::Exit | Phase::ExitActive)
    }
}

/// Lifecycle notifications produced by [`TransitionGroup::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    Entered(TransitionKey),
    Exited(TransitionKey),
}

/// One mounted view.
#[derive(Debug, Clone)]
pub struct Slot<C> {
    pub key: TransitionKey,
    pub node: Option<NodeRef>,
    pub content: C,
    pub phase: Phase,
    namespace: Direction,
    active_since: Option<Instant>,
}

impl<C> Slot<C> {
    /// Class namespace currently applied.
    #[must_use]
    pub fn namespace(&self) -> Direction {
        self.namespace
    }

    /// Full class list: `item` plus the lifecycle classes.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec!["item".to_string()];
        classes.extend(self.phase.classes(self.namespace.as_str()));
        classes
    }

    fn start(&mut self, phase: Phase) {
        self.phase = phase;
        self.active_since = None;
    }
}

/// Single-slot animated replacement.
///
/// Holds the active view plus any views still exiting (or retained), all
/// stacked in one layout cell. Time is supplied by the caller: [`frame`]
/// promotes freshly started phases to their active step, [`advance`]
/// completes them once the policy allows.
///
/// [`frame`]: TransitionGroup::frame
/// [`advance`]: TransitionGroup::advance
#[derive(Debug)]
pub struct TransitionGroup<C> {
    slots: Vec<Slot<C>>,
    completion: Completion,
}

impl<C> TransitionGroup<C> {
    #[must_use]
    pub fn new(completion: Completion) -> Self {
        Self {
            slots: Vec::new(),
            completion,
        }
    }

    #[must_use]
    pub fn completion(&self) -> Completion {
        self.completion
    }

    pub fn set_completion(&mut self, completion: Completion) {
        self.completion = completion;
    }

    /// Mounted slots in stacking order.
    #[must_use]
    pub fn slots(&self) -> &[Slot<C>] {
        &self.slots
    }

    /// The slot that is (or is becoming) visible.
    #[must_use]
    pub fn active(&self) -> Option<&Slot<C>> {
        self.slots.iter().rev().find(|s| !s.phase.is_exiting())
    }

    /// Slot attached to `node`, whatever its phase.
    #[must_use]
    pub fn find(&self, node: NodeRef) -> Option<&Slot<C>> {
        self.slots.iter().find(|s| s.node == Some(node))
    }

    #[must_use]
    pub fn is_mounted(&self, node: NodeRef) -> bool {
        self.find(node).is_some()
    }

    /// Render `content` under `key`.
    ///
    /// Every slot takes `direction` as its class namespace. An unchanged key
    /// only refreshes the active content; a new key sends the active slot into
    /// `Exit` and mounts (or revives) the slot for `key` in `Enter`. The very
    /// first slot mounts `Idle`.
    pub fn render(
        &mut self,
        key: TransitionKey,
        node: Option<NodeRef>,
        content: C,
        direction: Direction,
    ) {
        for slot in &mut self.slots {
            slot.namespace = direction;
        }

        if self.slots.is_empty() {
            debug!(key = %key, "Mounting initial view");
            self.slots.push(Slot {
                key,
                node,
                content,
                phase: Phase::Idle,
                namespace: direction,
                active_since: None,
            });
            return;
        }

        if let Some(active) = self.slots.iter_mut().rev().find(|s| !s.phase.is_exiting()) {
            if active.key == key {
                active.content = content;
                active.node = node;
                return;
            }
            debug!(from = %active.key, to = %key, direction = %direction, "Exiting view");
            active.start(Phase::Exit);
        }

        match self.slots.iter_mut().find(|s| s.key == key) {
            Some(slot) => {
                debug!(key = %key, direction = %direction, "Reviving retained view");
                slot.content = content;
                slot.node = node;
                slot.start(Phase::Enter);
            }
            None => {
                debug!(key = %key, direction = %direction, "Entering view");
                self.slots.push(Slot {
                    key,
                    node,
                    content,
                    phase: Phase::Enter,
                    namespace: direction,
                    active_since: None,
                });
            }
        }
    }

    /// Promote `Enter`/`Exit` to their active step; the next paint starts the
    /// CSS transition.
    pub fn frame(&mut self, now: Instant) {
        for slot in &mut self.slots {
            let next = match slot.phase {
                Phase::Enter => Phase::EnterActive,
                Phase::Exit => Phase::ExitActive,
                _ => continue,
            };
            trace!(key = %slot.key, phase = ?next, "Transition phase active");
            slot.phase = next;
            slot.active_since = Some(now);
        }
    }

    /// Complete active phases whose time is up.
    ///
    /// Under [`Completion::Retain`] nothing completes and no slot is ever
    /// removed.
    pub fn advance(&mut self, now: Instant) -> Vec<TransitionEvent> {
        let Completion::Timeout(duration) = self.completion else {
            return Vec::new();
        };

        let elapsed = |slot: &Slot<C>| {
            slot.active_since
                .is_some_and(|since| now.saturating_duration_since(since) >= duration)
        };

        let mut events = Vec::new();
        for slot in &mut self.slots {
            if slot.phase == Phase::EnterActive && elapsed(slot) {
                slot.phase = Phase::EnterDone;
                slot.active_since = None;
                events.push(TransitionEvent::Entered(slot.key.clone()));
            }
        }

        self.slots.retain(|slot| {
            if slot.phase == Phase::ExitActive && elapsed(slot) {
                debug!(key = %slot.key, "Unmounting exited view");
                events.push(TransitionEvent::Exited(slot.key.clone()));
                false
            } else {
                true
            }
        });

        events
    }

    /// Drop every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
