//! World model seam.
//!
//! The link layer never owns game state. It reads objects through the
//! [`World`] trait once per reconciliation pass:
//! - [`GameObject`]: identity, alias, scope status, available verbs, flags
//! - [`Holder`]: the containment capability of an object
//! - [`ExitSet`]: the directions currently traversable from the player's room
//!
//! [`MemoryWorld`] is a small in-memory implementation used by tests, the
//! benchmark and the demo. Engines with their own object model implement
//! [`World`] directly.
//!
//! # Example
//!
//! ```
//! use itemlinks::world::{GameObject, MemoryWorld, ObjectFlags, World};
//!
//! let mut world = MemoryWorld::new("me");
//! world.add(GameObject::new("lounge").with_flags(ObjectFlags::ROOM));
//! world.add(GameObject::new("me").at("lounge"));
//! world.add(GameObject::new("lamp").at("lounge").with_verbs(["take", "light"]));
//! world.refresh_scope();
//!
//! let lamp = world.object("lamp").unwrap();
//! assert!(lamp.in_scope);
//! assert_eq!(lamp.verbs, vec!["take", "light"]);
//! ```

pub mod memory;

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use memory::MemoryWorld;

// =============================================================================
// Object Flags
// =============================================================================

bitflags! {
    /// Boolean attributes of a game object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ObjectFlags: u16 {
        /// Can hold other objects.
        const CONTAINER = 1 << 0;
        /// A character that can carry objects.
        const NPC = 1 << 1;
        /// Container is closed.
        const CLOSED = 1 << 2;
        /// Contents visible even when closed.
        const TRANSPARENT = 1 << 3;
        /// Part of the scenery; never listed as contents.
        const SCENERY = 1 << 4;
        /// A location. Rooms are never rendered as links.
        const ROOM = 1 << 5;
        /// Several identical instances may share a location.
        const COUNTABLE = 1 << 6;
        /// Proper noun; takes no article.
        const PROPER_NAME = 1 << 7;
        /// Plural noun ("some scissors").
        const PLURAL = 1 << 8;
    }
}

/// How a container presents its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentsType {
    /// Contents are inside.
    #[default]
    Container,
    /// Contents sit on top.
    Surface,
}

/// Grammatical person of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pronouns {
    /// "I" (a first-person player).
    FirstPerson,
    /// "you" (the usual player).
    SecondPerson,
    /// "it", "he", "she" or a name.
    #[default]
    ThirdPerson,
    /// "they".
    Plural,
}

impl Pronouns {
    /// Returns true for first- and second-person pronouns, which are
    /// rendered as pronouns instead of names.
    #[must_use]
    pub const fn is_personal(self) -> bool {
        matches!(self, Self::FirstPerson | Self::SecondPerson)
    }
}

// =============================================================================
// Holder Capability
// =============================================================================

/// Containment capability of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holder {
    /// A container or surface.
    Container {
        /// Contents can be seen (open or transparent).
        visible: bool,
        /// Contents sit on top rather than inside.
        surface: bool,
    },
    /// A character carrying things.
    Npc,
    /// Holds nothing.
    Item,
}

impl Holder {
    /// Returns true if contents of this holder can be seen and listed.
    #[must_use]
    pub const fn shows_contents(self) -> bool {
        match self {
            Self::Container { visible, .. } => visible,
            Self::Npc => true,
            Self::Item => false,
        }
    }
}

// =============================================================================
// Game Object
// =============================================================================

/// A game object as read by the link layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    /// Stable identifier.
    pub name: String,
    /// Display alias; the name is used when absent.
    #[serde(default)]
    pub alias: Option<String>,
    /// Plural display alias for counted objects.
    #[serde(default)]
    pub plural_alias: Option<String>,
    /// Adjective printed before the alias.
    #[serde(default)]
    pub adjective: Option<String>,
    /// Name of the holder this object is in.
    #[serde(default)]
    pub location: Option<String>,
    /// Scope status: visible and interactable this turn.
    #[serde(default)]
    pub in_scope: bool,
    /// Verbs currently available for this object.
    #[serde(default)]
    pub verbs: Vec<String>,
    /// Attribute flags.
    #[serde(default)]
    pub flags: ObjectFlags,
    /// Presentation of contents.
    #[serde(default)]
    pub contents_type: ContentsType,
    /// Grammatical person.
    #[serde(default)]
    pub pronouns: Pronouns,
    /// Instance counts per location, for countable objects.
    #[serde(default)]
    pub counts: BTreeMap<String, u32>,
}

impl GameObject {
    /// Creates an out-of-scope object with no verbs.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            plural_alias: None,
            adjective: None,
            location: None,
            in_scope: false,
            verbs: Vec::new(),
            flags: ObjectFlags::empty(),
            contents_type: ContentsType::Container,
            pronouns: Pronouns::ThirdPerson,
            counts: BTreeMap::new(),
        }
    }

    /// Sets the display alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the adjective.
    #[must_use]
    pub fn with_adjective(mut self, adjective: impl Into<String>) -> Self {
        self.adjective = Some(adjective.into());
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the available verbs.
    #[must_use]
    pub fn with_verbs<I, S>(mut self, verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.verbs = verbs.into_iter().map(Into::into).collect();
        self
    }

    /// Adds flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Sets the grammatical person.
    #[must_use]
    pub fn with_pronouns(mut self, pronouns: Pronouns) -> Self {
        self.pronouns = pronouns;
        self
    }

    /// Makes this a surface.
    #[must_use]
    pub fn as_surface(mut self) -> Self {
        self.contents_type = ContentsType::Surface;
        self
    }

    /// Sets the scope status.
    #[must_use]
    pub fn in_scope(mut self, in_scope: bool) -> Self {
        self.in_scope = in_scope;
        self
    }

    /// Alias if set, otherwise the name.
    #[must_use]
    pub fn display_alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns true if the flag set contains `flags`.
    #[must_use]
    pub fn has(&self, flags: ObjectFlags) -> bool {
        self.flags.contains(flags)
    }

    /// Returns true for rooms.
    #[must_use]
    pub fn is_room(&self) -> bool {
        self.has(ObjectFlags::ROOM)
    }

    /// Returns true for scenery.
    #[must_use]
    pub fn is_scenery(&self) -> bool {
        self.has(ObjectFlags::SCENERY)
    }

    /// Containment capability.
    #[must_use]
    pub fn holder(&self) -> Holder {
        if self.has(ObjectFlags::CONTAINER) {
            Holder::Container {
                visible: !self.has(ObjectFlags::CLOSED) || self.has(ObjectFlags::TRANSPARENT),
                surface: self.contents_type == ContentsType::Surface,
            }
        } else if self.has(ObjectFlags::NPC) {
            Holder::Npc
        } else {
            Holder::Item
        }
    }

    /// Number of instances at `location` for countable objects.
    #[must_use]
    pub fn count_at(&self, location: &str) -> Option<u32> {
        if !self.has(ObjectFlags::COUNTABLE) {
            return None;
        }
        self.counts.get(location).copied()
    }
}

// =============================================================================
// Exit Set
// =============================================================================

/// Directions currently traversable from the player's location, in the
/// order the room lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSet(Vec<String>);

impl ExitSet {
    /// Creates an empty exit set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `direction` is traversable.
    #[must_use]
    pub fn contains(&self, direction: &str) -> bool {
        self.0.iter().any(|d| d == direction)
    }

    /// Directions in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Number of directions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there is nowhere to go.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExitSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dirs: Vec<String> = Vec::new();
        for dir in iter {
            let dir = dir.into();
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        Self(dirs)
    }
}

// =============================================================================
// World Trait
// =============================================================================

/// Read access to the authoritative game state.
pub trait World {
    /// Looks up an object by stable identifier.
    fn object(&self, name: &str) -> Option<&GameObject>;

    /// Direct contents of a holder, in the world's listing order.
    fn contents(&self, holder: &str) -> Vec<&GameObject>;

    /// Traversable directions from the player's current location.
    fn exits(&self) -> ExitSet;

    /// Identifier of the player object.
    fn player(&self) -> &str;

    /// The player object, if it exists.
    fn player_object(&self) -> Option<&GameObject> {
        self.object(self.player())
    }
}
