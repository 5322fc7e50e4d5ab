//! # Itemlinks
//!
//! Clickable object names, verb dropdowns and compass exits for
//! interactive fiction transcripts.
//!
//! Every object mention a game prints becomes a trigger that opens a panel
//! of the verbs currently available for that object; every exit becomes a
//! movement command. After each turn the printed links are reconciled with
//! the world so that nothing stale stays clickable, and when the story
//! ends every link is disabled.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          ItemLinks                           │
//! │                                                              │
//! │  print ──► LinkRenderer ──► Document (linkdom)               │
//! │                                 ▲                            │
//! │  on_turn_complete ──► reconcile objects ──► reconcile exits  │
//! │                                 ▲                            │
//! │  click ──► DropdownController ──┴──► CommandSink             │
//! │                                                              │
//! │  on_game_end ──► disable all links ──► finish()              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host engine supplies three collaborators through traits:
//!
//! - [`World`]: objects, scope, verbs, containment and exits
//! - [`Formatter`]: articles, pronouns, list joining, command snippets
//! - [`CommandSink`]: executes commands produced by clicks
//!
//! ## Quick Start
//!
//! ```
//! use itemlinks::{Click, DropdownState, GameObject, ItemLinks, LinkSettings, MemoryWorld, ObjectFlags, World};
//!
//! let mut world = MemoryWorld::new("me");
//! world
//!     .add(GameObject::new("hall").with_flags(ObjectFlags::ROOM))
//!     .add(GameObject::new("me").at("hall"))
//!     .add(GameObject::new("lamp").at("hall").with_verbs(["take", "light"]));
//! world.set_exits("hall", ["north"]);
//! world.refresh_scope();
//!
//! let mut links = ItemLinks::new(LinkSettings::default());
//! let lamp = links.renderer().object_link(world.object("lamp").unwrap(), None, false);
//! let trigger = links.print(lamp)[0];
//! links.on_turn_complete(&world);
//!
//! let mut commands: Vec<String> = Vec::new();
//! links.click(Click::Trigger(trigger), &mut commands);
//! let outcome = links.click(Click::Verb { trigger, index: 1 }, &mut commands);
//! assert_eq!(outcome.dispatched.as_deref(), Some("Light lamp"));
//! assert_eq!(outcome.state, DropdownState::Closed);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod contents;
pub mod dispatch;
pub mod dropdown;
pub mod error;
pub mod format;
pub mod reconcile;
pub mod render;
pub mod session;
pub mod world;

#[cfg(test)]
mod tests;

pub use linkdom;

// Re-exports for convenience
pub use config::{Lexicon, LinkSettings};
pub use contents::CommandOutcome;
pub use dispatch::CommandSink;
pub use dropdown::{Click, ClickOutcome, DropdownController, DropdownState};
pub use error::{LinkError, Result};
pub use format::{Article, EnglishFormatter, Formatter, NameOptions};
pub use reconcile::ReconcileReport;
pub use render::{LinkRenderer, RenderMode};
pub use session::{ItemLinks, TurnHook, TurnReport};
pub use world::{ExitSet, GameObject, Holder, MemoryWorld, ObjectFlags, World};

