//! Dropdown/Click Controller.
//!
//! Owns the click history and decides, for each click, which verb panel is
//! shown and which command (if any) is dispatched.
//!
//! # State Machine
//!
//! The controller is either [`DropdownState::Closed`] or
//! [`DropdownState::Open`] on the most recently clicked trigger. Only that
//! trigger is authoritative for which panel is open.
//!
//! | Click | Effect |
//! |-------|--------|
//! | outside any trigger | close every panel |
//! | trigger E, E is open | close E |
//! | trigger E, F ≠ E is open | close F, open E |
//! | trigger E, nothing open | open E |
//! | verb, exit or command | close every panel, dispatch if enabled |
//!
//! A disabled trigger is not clickable, so clicking one behaves like a
//! click outside. A verb can only be clicked while its panel is shown.
//!
//! # Invariants
//!
//! - After every click at most one panel is visible
//! - A disabled link never dispatches a command
//!
//! Clicks must be delivered one at a time; the controller takes `&mut self`
//! and `&mut Document`, so serialisation is enforced by the borrow checker.

use std::collections::VecDeque;

use linkdom::{Document, Element, ElementId};
use tracing::{debug, trace};

use crate::config::{LinkSettings, MIN_CLICK_HISTORY};
use crate::dispatch::CommandSink;

/// A user click, resolved to the element it hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Click {
    /// An object link's label.
    Trigger(ElementId),
    /// One verb in an object link's panel.
    Verb {
        /// The object link owning the panel.
        trigger: ElementId,
        /// Position of the verb in the panel.
        index: usize,
    },
    /// An exit link.
    Exit(ElementId),
    /// A generic command link.
    Command(ElementId),
    /// Anywhere else.
    Outside,
}

/// Which panel is considered open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownState {
    /// No panel open.
    Closed,
    /// The panel of this trigger is open.
    Open(ElementId),
}

/// Result of handling one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Command handed to the sink, if any.
    pub dispatched: Option<String>,
    /// Dropdown state after the click.
    pub state: DropdownState,
}

/// Click handler with a bounded LIFO history of clicked triggers.
#[derive(Debug, Clone)]
pub struct DropdownController {
    /// Most recent first.
    history: VecDeque<ElementId>,
    capacity: usize,
}

impl Default for DropdownController {
    fn default() -> Self {
        Self::from_settings(&LinkSettings::default())
    }
}

impl DropdownController {
    /// Creates a controller remembering up to `capacity` clicked triggers
    /// (at least [`MIN_CLICK_HISTORY`]).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CLICK_HISTORY);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates a controller sized from settings.
    #[must_use]
    pub fn from_settings(settings: &LinkSettings) -> Self {
        Self::new(settings.click_history)
    }

    /// Clicked triggers, most recent first.
    pub fn history(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.history.iter().copied()
    }

    /// The most recently clicked trigger.
    #[must_use]
    pub fn last_clicked(&self) -> Option<ElementId> {
        self.history.front().copied()
    }

    /// Current state as seen through the most recently clicked trigger.
    #[must_use]
    pub fn state(&self, doc: &Document) -> DropdownState {
        match self.last_clicked() {
            Some(id) if doc.panel_visible(id) => DropdownState::Open(id),
            _ => DropdownState::Closed,
        }
    }

    /// Handles one click.
    ///
    /// # Arguments
    ///
    /// * `doc` - The transcript holding the clicked elements
    /// * `click` - What was clicked
    /// * `sink` - Receives the command of an enabled verb, exit or command
    pub fn click<S>(&mut self, doc: &mut Document, click: Click, sink: &mut S) -> ClickOutcome
    where
        S: CommandSink + ?Sized,
    {
        let dispatched = match click {
            Click::Trigger(id) => {
                self.trigger(doc, id);
                None
            }
            Click::Verb { trigger, index } => {
                let command = doc
                    .object(trigger)
                    .ok()
                    .filter(|link| link.state.is_enabled() && link.panel.visible)
                    .and_then(|link| link.panel.verbs.get(index))
                    .map(linkdom::VerbEntry::command);
                Self::leaf(doc, command, sink)
            }
            Click::Exit(id) => {
                let command = Self::enabled(doc, id)
                    .and_then(Element::as_exit)
                    .map(|exit| exit.direction().to_string());
                Self::leaf(doc, command, sink)
            }
            Click::Command(id) => {
                let command = Self::enabled(doc, id)
                    .and_then(Element::as_command)
                    .map(|cmd| cmd.command.clone());
                Self::leaf(doc, command, sink)
            }
            Click::Outside => {
                doc.hide_all_panels();
                None
            }
        };

        let state = self.state(doc);
        debug!(?click, ?state, dispatched = dispatched.as_deref(), "handled click");
        ClickOutcome { dispatched, state }
    }

    /// Forgets the history and closes every panel.
    pub fn reset(&mut self, doc: &mut Document) {
        self.history.clear();
        doc.hide_all_panels();
    }

    fn enabled(doc: &Document, id: ElementId) -> Option<&Element> {
        doc.get(id).filter(|el| el.is_enabled())
    }

    fn remember(&mut self, id: ElementId) {
        self.history.push_front(id);
        self.history.truncate(self.capacity);
    }

    fn trigger(&mut self, doc: &mut Document, id: ElementId) {
        let clickable = Self::enabled(doc, id).is_some_and(|el| el.as_object().is_some());
        if !clickable {
            trace!(%id, "click on inert trigger");
            doc.hide_all_panels();
            return;
        }

        let previous = self.last_clicked();
        self.remember(id);

        match previous {
            Some(other) if other != id && doc.panel_visible(other) => {
                trace!(from = %other, to = %id, "switching panel");
                Self::open(doc, id);
            }
            _ if doc.panel_visible(id) => {
                trace!(%id, "closing panel");
                doc.hide_all_panels();
            }
            _ => {
                trace!(%id, "opening panel");
                Self::open(doc, id);
            }
        }
    }

    fn open(doc: &mut Document, id: ElementId) {
        doc.hide_all_panels();
        if let Err(err) = doc.show_panel(id) {
            trace!(%id, %err, "cannot open panel");
        }
    }

    fn leaf<S>(doc: &mut Document, command: Option<String>, sink: &mut S) -> Option<String>
    where
        S: CommandSink + ?Sized,
    {
        doc.hide_all_panels();
        let command = command?;
        sink.run_command(&command);
        Some(command)
    }
}
