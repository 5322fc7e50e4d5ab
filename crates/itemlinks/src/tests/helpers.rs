//! Test helpers: a small sample world and session setup.

use linkdom::ElementId;

use crate::config::LinkSettings;
use crate::format::{Formatter, NameOptions};
use crate::session::ItemLinks;
use crate::world::{GameObject, MemoryWorld, ObjectFlags, Pronouns, World};

// =============================================================================
// Sample World
// =============================================================================

/// Builds the sample world.
///
/// The player stands in the lounge with:
/// - a lamp (take, light)
/// - a closed chest holding a coin
/// - Bob, carrying a hat
///
/// Exits from the lounge are north and east. The hall to the north holds a
/// vase.
pub fn sample_world() -> MemoryWorld {
    let mut world = MemoryWorld::new("me");
    world
        .add(GameObject::new("lounge").with_alias("Lounge").with_flags(ObjectFlags::ROOM))
        .add(GameObject::new("hall").with_alias("Hall").with_flags(ObjectFlags::ROOM))
        .add(
            GameObject::new("me")
                .at("lounge")
                .with_pronouns(Pronouns::SecondPerson),
        )
        .add(GameObject::new("lamp").at("lounge").with_verbs(["take", "light"]))
        .add(
            GameObject::new("chest")
                .at("lounge")
                .with_verbs(["open"])
                .with_flags(ObjectFlags::CONTAINER | ObjectFlags::CLOSED),
        )
        .add(GameObject::new("coin").at("chest").with_verbs(["take"]))
        .add(
            GameObject::new("bob")
                .with_alias("Bob")
                .at("lounge")
                .with_verbs(["talk to"])
                .with_flags(ObjectFlags::NPC | ObjectFlags::PROPER_NAME),
        )
        .add(GameObject::new("hat").at("bob").with_verbs(["ask about"]))
        .add(GameObject::new("vase").at("hall").with_verbs(["take"]));
    world.set_exits("lounge", ["north", "east"]);
    world.set_exits("hall", ["south"]);
    world.refresh_scope();
    world
}

/// A session with default settings.
pub fn linked_session() -> ItemLinks {
    ItemLinks::new(LinkSettings::default())
}

/// Prints one object link and returns its handle.
///
/// # Panics
///
/// Panics if `name` is not in the world.
pub fn print_object(links: &mut ItemLinks, world: &MemoryWorld, name: &str) -> ElementId {
    let object = world.object(name).expect("object exists");
    let fragment = links.renderer().object_link(object, None, false);
    links.print(fragment)[0]
}

/// Prints one exit link and returns its handle.
pub fn print_exit(links: &mut ItemLinks, direction: &str) -> ElementId {
    let fragment = links.renderer().exit_link(direction);
    links.print(fragment)[0]
}

/// Prints a "You can see ..." room description and returns the handles of
/// its links.
pub fn print_room(links: &mut ItemLinks, world: &MemoryWorld) -> Vec<ElementId> {
    let room = world
        .player_room()
        .and_then(|name| world.object(name))
        .expect("player is in a room");
    let renderer = links.renderer();
    let mut fragment = renderer.name(room, &NameOptions::default().capitalised(true));
    fragment.push_text(". You can see ");
    let visible = world
        .contents(&room.name)
        .into_iter()
        .filter(|o| o.name != world.player())
        .map(|o| renderer.name(o, &NameOptions::indefinite()))
        .collect();
    fragment.append(renderer.formatter().join_list(visible, "and", "nothing"));
    fragment.push_text(". You can go ");
    fragment.append(renderer.exits_list(&world.exits()));
    fragment.push_text(".");
    links.print(fragment)
}
