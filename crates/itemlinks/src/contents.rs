//! Containment queries and contents listings.
//!
//! Recursive traversal goes through [`World::contents`] and the
//! [`Holder`](crate::world::Holder) capability of each object. Descendants
//! are produced lazily, depth-first, as one flat sequence (a child is
//! followed by its own descendants before its next sibling). Each object is
//! produced at most once, so a containment cycle ends the walk instead of
//! looping.
//!
//! The listing functions replace the engine's contents, examine and
//! inventory text so that every item they mention is rendered through the
//! [`LinkRenderer`].

use std::collections::HashSet;

use linkdom::Fragment;

use crate::format::{Formatter, NameOptions};
use crate::render::LinkRenderer;
use crate::world::{GameObject, Holder, World};

// =============================================================================
// Queries
// =============================================================================

/// Returns true if `object` may show contents: an open or transparent
/// container, or an NPC.
#[must_use]
pub fn can_hold(object: &GameObject) -> bool {
    object.holder().shows_contents()
}

/// Direct contents of `item`.
pub fn direct_children<'w, W: World + ?Sized>(world: &'w W, item: &GameObject) -> Vec<&'w GameObject> {
    world.contents(&item.name)
}

/// Returns true if `item` contains or carries anything.
pub fn has_children<W: World + ?Sized>(world: &W, item: &GameObject) -> bool {
    !world.contents(&item.name).is_empty()
}

/// Lazy depth-first iterator over every object below a holder.
pub struct Descendants<'w, W: World + ?Sized> {
    world: &'w W,
    stack: Vec<std::vec::IntoIter<&'w GameObject>>,
    skip: Option<&'w str>,
    seen: HashSet<&'w str>,
}

impl<'w, W: World + ?Sized> Descendants<'w, W> {
    fn new(world: &'w W, root: &'w str, skip: Option<&'w str>) -> Self {
        Self {
            world,
            stack: vec![world.contents(root).into_iter()],
            skip,
            seen: HashSet::from([root]),
        }
    }
}

impl<'w, W: World + ?Sized> Iterator for Descendants<'w, W> {
    type Item = &'w GameObject;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(child) if Some(child.name.as_str()) == self.skip => {}
                Some(child) if !self.seen.insert(child.name.as_str()) => {}
                Some(child) => {
                    self.stack.push(self.world.contents(&child.name).into_iter());
                    return Some(child);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Every object below `item`, flattened depth-first.
pub fn descendants<'w, W: World + ?Sized>(world: &'w W, item: &'w GameObject) -> Descendants<'w, W> {
    Descendants::new(world, &item.name, None)
}

/// Every object in `room`, excluding the player and what the player
/// carries.
pub fn room_contents<'w, W: World + ?Sized>(world: &'w W, room: &'w GameObject) -> Vec<&'w GameObject> {
    Descendants::new(world, &room.name, Some(world.player())).collect()
}

// =============================================================================
// Listings
// =============================================================================

/// Outcome of a command handled here, as reported back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandOutcome {
    /// Succeeded; the turn advances and turn scripts run.
    Success,
    /// Succeeded without consuming a turn.
    SuccessNoTurnscripts,
}

fn list_objects<F: Formatter>(
    renderer: &LinkRenderer<F>,
    holder: &GameObject,
    objects: &[&GameObject],
) -> Fragment {
    let f = renderer.formatter();
    let names = objects
        .iter()
        .map(|o| renderer.name(o, &NameOptions::indefinite().at(holder.name.clone())))
        .collect();
    f.join_list(names, &f.lexicon().list_and, &f.lexicon().list_nothing)
}

fn listable<'w, W: World + ?Sized>(world: &'w W, item: &GameObject) -> Vec<&'w GameObject> {
    direct_children(world, item)
        .into_iter()
        .filter(|o| !o.is_scenery())
        .collect()
}

/// Direct contents of `item` as linked names, "a lamp, a coin and a hat",
/// or "nothing". World order is kept; scenery is left out.
pub fn contents_list<W, F>(renderer: &LinkRenderer<F>, world: &W, item: &GameObject) -> Fragment
where
    W: World + ?Sized,
    F: Formatter,
{
    list_objects(renderer, item, &listable(world, item))
}

/// Contents of a container, or an empty fragment when it holds nothing
/// but scenery or its contents cannot be seen.
pub fn contents_link<W, F>(renderer: &LinkRenderer<F>, world: &W, item: &GameObject) -> Fragment
where
    W: World + ?Sized,
    F: Formatter,
{
    let visible = match item.holder() {
        Holder::Container { visible, .. } => visible,
        Holder::Npc | Holder::Item => true,
    };
    let contents = listable(world, item);
    if !visible || contents.is_empty() {
        return Fragment::new();
    }
    list_objects(renderer, item, &contents)
}

/// Sentence describing what a container holds or an NPC carries.
///
/// - container, open or transparent, with non-scenery contents:
///   "Inside, you see a coin." / "On top, you see a vase."
/// - NPC carrying something other than scenery: "Bob is carrying a hat."
///
/// Returns `None` when there is nothing to say.
pub fn examine_holder<W, F>(renderer: &LinkRenderer<F>, world: &W, object: &GameObject) -> Option<Fragment>
where
    W: World + ?Sized,
    F: Formatter,
{
    let f = renderer.formatter();
    let lexicon = f.lexicon();
    match object.holder() {
        Holder::Container { visible, surface } => {
            if !visible {
                return None;
            }
            let contents = listable(world, object);
            if contents.is_empty() {
                return None;
            }
            let place = if surface { &lexicon.on_top } else { &lexicon.inside };
            let see = world
                .player_object()
                .map_or_else(|| "you see".to_string(), |pov| f.subject_verb(pov, "see", false));
            Some(
                Fragment::text(format!("{}, {see} ", f.sentence_case(place)))
                    .with(list_objects(renderer, object, &contents))
                    .with_text("."),
            )
        }
        Holder::Npc => {
            let carried = listable(world, object);
            if carried.is_empty() {
                return None;
            }
            let subject = f.subject_verb(object, "be", true);
            Some(
                Fragment::text(format!("{subject} {} ", lexicon.carrying))
                    .with(list_objects(renderer, object, &carried))
                    .with_text("."),
            )
        }
        Holder::Item => None,
    }
}

/// The inventory sentence, "You are carrying a lamp and a hat.", and
/// whether it consumes a turn.
pub fn inventory<W, F>(
    renderer: &LinkRenderer<F>,
    world: &W,
    look_counts_as_turn: bool,
) -> (Fragment, CommandOutcome)
where
    W: World + ?Sized,
    F: Formatter,
{
    let preamble = &renderer.formatter().lexicon().inventory_preamble;
    let list = match world.player_object() {
        Some(player) => contents_list(renderer, world, player),
        None => Fragment::text(&renderer.formatter().lexicon().list_nothing),
    };
    let fragment = Fragment::text(format!("{preamble} ")).with(list).with_text(".");
    let outcome = if look_counts_as_turn {
        CommandOutcome::Success
    } else {
        CommandOutcome::SuccessNoTurnscripts
    };
    (fragment, outcome)
}
