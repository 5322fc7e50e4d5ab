//! Link session and lifecycle hooks.
//!
//! [`ItemLinks`] ties the pieces together for one game: settings, the
//! renderer, the transcript document and the dropdown controller. The host
//! engine drives it through three entry points:
//!
//! - [`ItemLinks::print`] for every block of output
//! - [`ItemLinks::on_turn_complete`] after each turn's output, before the
//!   next input is accepted
//! - [`ItemLinks::on_game_end`] wrapped around its own finish routine
//!
//! Clicks arrive through [`ItemLinks::click`].
//!
//! # Example
//!
//! ```
//! use itemlinks::config::LinkSettings;
//! use itemlinks::session::ItemLinks;
//! use itemlinks::world::{GameObject, MemoryWorld, ObjectFlags, World};
//!
//! let mut world = MemoryWorld::new("me");
//! world
//!     .add(GameObject::new("hall").with_flags(ObjectFlags::ROOM))
//!     .add(GameObject::new("me").at("hall"))
//!     .add(GameObject::new("lamp").at("hall").with_verbs(["take"]));
//! world.refresh_scope();
//!
//! let mut links = ItemLinks::new(LinkSettings::default());
//! let lamp = links.renderer().object_link(world.object("lamp").unwrap(), None, false);
//! links.print(lamp);
//!
//! world.move_to("lamp", "nowhere").unwrap();
//! world.refresh_scope();
//! let report = links.on_turn_complete(&world).unwrap();
//! assert_eq!(report.objects.disabled, 1);
//!
//! let finished = links.on_game_end(|| "THE END");
//! assert_eq!(finished, "THE END");
//! ```

use linkdom::{Document, ElementId, Fragment};
use tracing::{info, trace};

use crate::config::LinkSettings;
use crate::contents::{self, CommandOutcome};
use crate::dispatch::CommandSink;
use crate::dropdown::{Click, ClickOutcome, DropdownController};
use crate::error::{LinkError, Result};
use crate::format::{EnglishFormatter, Formatter};
use crate::reconcile::{self, ReconcileReport};
use crate::render::{LinkRenderer, RenderMode};
use crate::world::World;

/// Reports from one post-turn update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Object link pass.
    pub objects: ReconcileReport,
    /// Exit link pass.
    pub exits: ReconcileReport,
}

/// An entry in the engine's "after each turn" hook list.
pub trait TurnHook<W: World + ?Sized> {
    /// Called once per completed turn.
    fn after_turn(&mut self, world: &W);
}

/// Link state for one game.
#[derive(Debug, Clone)]
pub struct ItemLinks<F = EnglishFormatter> {
    settings: LinkSettings,
    renderer: LinkRenderer<F>,
    document: Document,
    dropdown: DropdownController,
}

impl ItemLinks<EnglishFormatter> {
    /// Creates a session with the English formatter.
    #[must_use]
    pub fn new(settings: LinkSettings) -> Self {
        let formatter = EnglishFormatter::new(settings.lexicon.clone());
        Self::with_formatter(settings, formatter)
    }
}

impl<F: Formatter> ItemLinks<F> {
    /// Creates a session with a host-supplied formatter.
    #[must_use]
    pub fn with_formatter(settings: LinkSettings, formatter: F) -> Self {
        Self {
            renderer: LinkRenderer::new(RenderMode::from_settings(&settings), formatter),
            document: Document::new(),
            dropdown: DropdownController::from_settings(&settings),
            settings,
        }
    }

    /// Active settings.
    #[must_use]
    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    /// The global link-enabled flag.
    #[must_use]
    pub fn links_enabled(&self) -> bool {
        self.settings.links_enabled
    }

    /// Switches link rendering on or off. Links already printed keep their
    /// state until the next reconciliation or game end.
    pub fn set_links_enabled(&mut self, enabled: bool) {
        self.settings.links_enabled = enabled;
        self.renderer.set_mode(RenderMode::from_settings(&self.settings));
    }

    /// The renderer hosts route names, exits and contents through.
    #[must_use]
    pub fn renderer(&self) -> &LinkRenderer<F> {
        &self.renderer
    }

    /// The transcript.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The transcript, mutably.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The click controller.
    #[must_use]
    pub fn dropdown(&self) -> &DropdownController {
        &self.dropdown
    }

    /// Prints a block of output, then trims scrollback if bounded.
    /// Returns the handles of the printed links.
    pub fn print(&mut self, fragment: Fragment) -> Vec<ElementId> {
        let ids = self.document.print(fragment);
        if let Some(keep) = self.settings.scrollback {
            self.document.retain_blocks(keep);
        }
        ids
    }

    /// Post-turn update: reconciles object links, then exit links.
    ///
    /// Returns `None` without touching the document when links are
    /// disabled.
    pub fn on_turn_complete<W: World + ?Sized>(&mut self, world: &W) -> Option<TurnReport> {
        if !self.links_enabled() {
            trace!("links disabled, skipping reconciliation");
            return None;
        }
        let objects = reconcile::reconcile_object_links(&mut self.document, world, &self.renderer);
        let exits = reconcile::reconcile_exit_links(&mut self.document, &world.exits(), &self.renderer);
        Some(TurnReport { objects, exits })
    }

    /// End-of-game hook: disables every printed link, then runs the
    /// engine's own `finish` routine and returns its result.
    ///
    /// Runs regardless of the link-enabled flag, since links may have been
    /// printed while it was on.
    pub fn on_game_end<R>(&mut self, finish: impl FnOnce() -> R) -> R {
        let disabled = reconcile::disable_all_links(&mut self.document);
        self.dropdown.reset(&mut self.document);
        info!(disabled, "game over, links disabled");
        finish()
    }

    /// Routes a click through the dropdown controller.
    pub fn click<S>(&mut self, click: Click, sink: &mut S) -> ClickOutcome
    where
        S: CommandSink + ?Sized,
    {
        self.dropdown.click(&mut self.document, click, sink)
    }

    /// Inventory command: prints "You are carrying ..." and reports whether
    /// the turn advances.
    pub fn run_inventory<W: World + ?Sized>(&mut self, world: &W) -> CommandOutcome {
        let (text, outcome) =
            contents::inventory(&self.renderer, world, self.settings.look_counts_as_turn);
        self.print(text);
        outcome
    }

    /// Prints what a container holds or an NPC carries. Returns whether
    /// anything was printed.
    ///
    /// # Errors
    ///
    /// [`LinkError::UnknownObject`] if `name` is not in the world.
    pub fn examine<W: World + ?Sized>(&mut self, world: &W, name: &str) -> Result<bool> {
        let object = world
            .object(name)
            .ok_or_else(|| LinkError::UnknownObject(name.to_string()))?;
        match contents::examine_holder(&self.renderer, world, object) {
            Some(text) => {
                self.print(text);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<F: Formatter, W: World + ?Sized> TurnHook<W> for ItemLinks<F> {
    fn after_turn(&mut self, world: &W) {
        self.on_turn_complete(world);
    }
}
