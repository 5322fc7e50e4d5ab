//! Typed link elements.
//!
//! A printed link is one of three kinds:
//! - [`ObjectLink`]: a clickable object name (the trigger) plus its hidden
//!   verb panel
//! - [`ExitLink`]: a compass direction bound to a movement command
//! - [`CommandLink`]: an arbitrary command token
//!
//! Every element carries a [`LinkState`]. Disabling is always reversible:
//! it never discards the data needed to re-enable the element (an object's
//! verb list, an exit's direction, a command's text).

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Link State / Kind
// =============================================================================

/// Render state of a link element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinkState {
    /// Clickable.
    #[default]
    Enabled,
    /// Inert; rendered with the disabled class pair.
    Disabled,
}

impl LinkState {
    /// Returns true for [`LinkState::Enabled`].
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Maps a boolean to a state.
    #[must_use]
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Kind of a link element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// Object name trigger with a verb panel.
    Object,
    /// Compass exit.
    Exit,
    /// Generic command token.
    Command,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => write!(f, "object-link"),
            Self::Exit => write!(f, "exit-link"),
            Self::Command => write!(f, "cmd-link"),
        }
    }
}

// =============================================================================
// Object Links
// =============================================================================

/// One clickable verb inside an object's panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbEntry {
    /// Verb as displayed (already sentence-cased by the renderer).
    pub verb: String,
    /// Object alias appended to the verb to form the command.
    pub alias: String,
}

impl VerbEntry {
    /// Creates a verb entry.
    #[must_use]
    pub fn new(verb: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            alias: alias.into(),
        }
    }

    /// The command dispatched when this verb is clicked: `"<verb> <alias>"`.
    #[must_use]
    pub fn command(&self) -> String {
        format!("{} {}", self.verb, self.alias)
    }
}

/// The hidden-by-default verb list attached to an object trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbPanel {
    /// Whether the panel is currently shown.
    pub visible: bool,
    /// Verbs in display order.
    pub verbs: Vec<VerbEntry>,
}

impl VerbPanel {
    /// Creates a hidden panel with the given verbs.
    #[must_use]
    pub fn new(verbs: Vec<VerbEntry>) -> Self {
        Self {
            visible: false,
            verbs,
        }
    }

    /// Verb names in display order.
    pub fn verb_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.verbs.iter().map(|v| v.verb.as_str())
    }
}

/// A rendered object name with its verb panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLink {
    /// Stable identifier of the referenced game object. Fixed at creation
    /// so the document's index stays valid.
    object: String,
    /// Literal display text of the trigger.
    pub label: String,
    /// Enabled while the object is in scope.
    pub state: LinkState,
    /// Verb panel.
    pub panel: VerbPanel,
}

impl ObjectLink {
    /// Creates an enabled object link with a hidden panel.
    #[must_use]
    pub fn new(object: impl Into<String>, label: impl Into<String>, verbs: Vec<VerbEntry>) -> Self {
        Self {
            object: object.into(),
            label: label.into(),
            state: LinkState::Enabled,
            panel: VerbPanel::new(verbs),
        }
    }

    /// Stable identifier of the referenced game object.
    #[must_use]
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Disables the trigger and closes its panel. The verb list is kept.
    pub fn disable(&mut self) {
        self.state = LinkState::Disabled;
        self.panel.visible = false;
    }

    /// Enables the trigger and replaces the panel's verbs.
    pub fn enable_with(&mut self, verbs: Vec<VerbEntry>) {
        self.state = LinkState::Enabled;
        self.panel.verbs = verbs;
    }
}

// =============================================================================
// Exit Links
// =============================================================================

/// Label of an exit link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitLabel {
    /// Plain direction token.
    Plain(String),
    /// Dispatchable command snippet (pre-rendered markup).
    Command(String),
}

/// A rendered compass exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitLink {
    /// Direction, used as the stable identifier.
    direction: String,
    /// Current label.
    pub label: ExitLabel,
    /// Enabled while the direction is traversable.
    pub state: LinkState,
}

impl ExitLink {
    /// Creates an enabled exit link whose label is a command snippet.
    #[must_use]
    pub fn new(direction: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            direction: direction.into(),
            label: ExitLabel::Command(snippet.into()),
            state: LinkState::Enabled,
        }
    }

    /// Direction this exit leads.
    #[must_use]
    pub fn direction(&self) -> &str {
        &self.direction
    }

    /// Disables the exit and reverts its label to the plain direction.
    pub fn disable(&mut self) {
        self.state = LinkState::Disabled;
        self.label = ExitLabel::Plain(self.direction.clone());
    }

    /// Enables the exit with a fresh command snippet as its label.
    pub fn enable_with(&mut self, snippet: impl Into<String>) {
        self.state = LinkState::Enabled;
        self.label = ExitLabel::Command(snippet.into());
    }
}

// =============================================================================
// Command Links
// =============================================================================

/// A generic clickable command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLink {
    /// Command dispatched on click.
    pub command: String,
    /// Display text.
    pub label: String,
    /// Render state.
    pub state: LinkState,
}

impl CommandLink {
    /// Creates an enabled command link.
    #[must_use]
    pub fn new(command: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            label: label.into(),
            state: LinkState::Enabled,
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// A printed link element of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    /// Object trigger + verb panel.
    Object(ObjectLink),
    /// Compass exit.
    Exit(ExitLink),
    /// Generic command.
    Command(CommandLink),
}

impl Element {
    /// Returns the element's kind.
    #[must_use]
    pub const fn kind(&self) -> LinkKind {
        match self {
            Self::Object(_) => LinkKind::Object,
            Self::Exit(_) => LinkKind::Exit,
            Self::Command(_) => LinkKind::Command,
        }
    }

    /// Returns the stable identifier: object name, direction or command.
    #[must_use]
    pub fn ref_id(&self) -> &str {
        match self {
            Self::Object(o) => &o.object,
            Self::Exit(e) => &e.direction,
            Self::Command(c) => &c.command,
        }
    }

    /// An element without a usable identifier is malformed and is skipped
    /// by every pass that resolves identifiers.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.ref_id().trim().is_empty()
    }

    /// Returns the render state.
    #[must_use]
    pub const fn state(&self) -> LinkState {
        match self {
            Self::Object(o) => o.state,
            Self::Exit(e) => e.state,
            Self::Command(c) => c.state,
        }
    }

    /// Returns true if the element is clickable.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    /// Applies the kind-specific disabled transform.
    pub fn disable(&mut self) {
        match self {
            Self::Object(o) => o.disable(),
            Self::Exit(e) => e.disable(),
            Self::Command(c) => c.state = LinkState::Disabled,
        }
    }

    /// Returns the object link, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectLink> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the object link mutably, if this is one.
    pub fn as_object_mut(&mut self) -> Option<&mut ObjectLink> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the exit link, if this is one.
    #[must_use]
    pub const fn as_exit(&self) -> Option<&ExitLink> {
        match self {
            Self::Exit(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the exit link mutably, if this is one.
    pub fn as_exit_mut(&mut self) -> Option<&mut ExitLink> {
        match self {
            Self::Exit(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the command link, if this is one.
    #[must_use]
    pub const fn as_command(&self) -> Option<&CommandLink> {
        match self {
            Self::Command(c) => Some(c),
            _ => None,
        }
    }

    /// Plain-text rendering of the label, as a screen reader would see it.
    #[must_use]
    pub fn plain_label(&self) -> &str {
        match self {
            Self::Object(o) => &o.label,
            Self::Exit(e) => &e.direction,
            Self::Command(c) => &c.label,
        }
    }
}
