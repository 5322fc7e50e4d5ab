//! In-memory reference world.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{ExitSet, GameObject, World};
use crate::error::{LinkError, Result};

/// A minimal world: objects in insertion order, exits per room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryWorld {
    /// Identifier of the player object.
    player: String,
    /// Objects in listing order.
    #[serde(default)]
    objects: Vec<GameObject>,
    /// Room name to its traversable directions.
    #[serde(default)]
    exits: BTreeMap<String, Vec<String>>,
}

impl MemoryWorld {
    /// Creates an empty world whose player object is `player`.
    #[must_use]
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            objects: Vec::new(),
            exits: BTreeMap::new(),
        }
    }

    /// Loads a world from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds an object, replacing any object with the same name.
    pub fn add(&mut self, object: GameObject) -> &mut Self {
        if let Some(existing) = self.objects.iter_mut().find(|o| o.name == object.name) {
            *existing = object;
        } else {
            self.objects.push(object);
        }
        self
    }

    /// Removes an object. Links to it become dangling.
    pub fn remove(&mut self, name: &str) -> Option<GameObject> {
        let index = self.objects.iter().position(|o| o.name == name)?;
        Some(self.objects.remove(index))
    }

    /// Returns an object mutably.
    pub fn object_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Iterates over every object.
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.objects.iter()
    }

    /// Sets one object's scope status.
    ///
    /// # Errors
    ///
    /// [`LinkError::UnknownObject`] if there is no such object.
    pub fn set_scope(&mut self, name: &str, in_scope: bool) -> Result<()> {
        let object = self
            .object_mut(name)
            .ok_or_else(|| LinkError::UnknownObject(name.to_string()))?;
        object.in_scope = in_scope;
        Ok(())
    }

    /// Moves an object into another holder.
    ///
    /// # Errors
    ///
    /// [`LinkError::UnknownObject`] if there is no such object,
    /// [`LinkError::CyclicContainment`] if `location` is `name` itself or
    /// somewhere inside it.
    pub fn move_to(&mut self, name: &str, location: &str) -> Result<()> {
        if self.encloses(name, location) {
            return Err(LinkError::CyclicContainment {
                object: name.to_string(),
                location: location.to_string(),
            });
        }
        let object = self
            .object_mut(name)
            .ok_or_else(|| LinkError::UnknownObject(name.to_string()))?;
        object.location = Some(location.to_string());
        Ok(())
    }

    /// Returns true if `inner` is `outer` or is held by it at any depth.
    fn encloses(&self, outer: &str, inner: &str) -> bool {
        let mut current = Some(inner);
        // Bounded by the object count in case the world already has a cycle.
        for _ in 0..=self.objects.len() {
            match current {
                Some(name) if name == outer => return true,
                Some(name) => current = self.object(name).and_then(|o| o.location.as_deref()),
                None => return false,
            }
        }
        false
    }

    /// Sets the traversable directions of a room.
    pub fn set_exits<I, S>(&mut self, room: &str, directions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exits
            .insert(room.to_string(), directions.into_iter().map(Into::into).collect());
    }

    /// The room the player is in.
    #[must_use]
    pub fn player_room(&self) -> Option<&str> {
        self.player_object()?.location.as_deref()
    }

    /// Recomputes every object's scope status.
    ///
    /// An object is in scope when it is in the player's room or carried,
    /// directly or through holders whose contents are visible. The room
    /// itself is not in scope.
    pub fn refresh_scope(&mut self) {
        let mut reachable = BTreeSet::new();
        if let Some(room) = self.player_room() {
            let mut pending = vec![room.to_string()];
            while let Some(holder) = pending.pop() {
                for child in self.contents(&holder) {
                    if reachable.insert(child.name.clone())
                        && (child.name == self.player || child.holder().shows_contents())
                    {
                        pending.push(child.name.clone());
                    }
                }
            }
        }

        for object in &mut self.objects {
            object.in_scope = reachable.contains(&object.name);
        }
        trace!(in_scope = reachable.len(), "refreshed scope");
    }
}

impl World for MemoryWorld {
    fn object(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    fn contents(&self, holder: &str) -> Vec<&GameObject> {
        self.objects
            .iter()
            .filter(|o| o.location.as_deref() == Some(holder))
            .collect()
    }

    fn exits(&self) -> ExitSet {
        self.player_room()
            .and_then(|room| self.exits.get(room))
            .map(|dirs| dirs.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn player(&self) -> &str {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ObjectFlags;

    fn sample() -> MemoryWorld {
        let mut world = MemoryWorld::new("me");
        world
            .add(GameObject::new("lounge").with_flags(ObjectFlags::ROOM))
            .add(GameObject::new("hall").with_flags(ObjectFlags::ROOM))
            .add(GameObject::new("me").at("lounge"))
            .add(GameObject::new("lamp").at("lounge"))
            .add(
                GameObject::new("chest")
                    .at("lounge")
                    .with_flags(ObjectFlags::CONTAINER | ObjectFlags::CLOSED),
            )
            .add(GameObject::new("coin").at("chest"))
            .add(GameObject::new("hat").at("me"))
            .add(GameObject::new("vase").at("hall"));
        world.set_exits("lounge", ["north", "east"]);
        world
    }

    #[test]
    fn refresh_scope_follows_visible_holders() {
        let mut world = sample();
        world.refresh_scope();

        let in_scope: Vec<_> = world
            .objects()
            .filter(|o| o.in_scope)
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(in_scope, vec!["me", "lamp", "chest", "hat"]);
    }

    #[test]
    fn opening_container_brings_contents_into_scope() {
        let mut world = sample();
        world.object_mut("chest").unwrap().flags.remove(ObjectFlags::CLOSED);
        world.refresh_scope();
        assert!(world.object("coin").unwrap().in_scope);
    }

    #[test]
    fn exits_follow_player_room() {
        let mut world = sample();
        assert_eq!(world.exits().iter().collect::<Vec<_>>(), vec!["north", "east"]);

        world.move_to("me", "hall").unwrap();
        assert!(world.exits().is_empty());
    }

    #[test]
    fn moves_into_own_contents_are_rejected() {
        let mut world = sample();
        world.move_to("lamp", "chest").unwrap();

        assert!(matches!(
            world.move_to("chest", "lamp"),
            Err(LinkError::CyclicContainment { object, .. }) if object == "chest"
        ));
        assert!(world.move_to("chest", "chest").is_err());
        assert_eq!(world.object("chest").unwrap().location.as_deref(), Some("lounge"));
        assert!(world.move_to("lamp", "nowhere").is_ok());
    }

    #[test]
    fn add_replaces_by_name() {
        let mut world = sample();
        world.add(GameObject::new("lamp").with_alias("brass lamp"));
        assert_eq!(world.objects().filter(|o| o.name == "lamp").count(), 1);
        assert_eq!(world.object("lamp").unwrap().display_alias(), "brass lamp");
    }

    #[test]
    fn unknown_objects_are_errors() {
        let mut world = sample();
        assert!(matches!(
            world.set_scope("ghost", true),
            Err(LinkError::UnknownObject(name)) if name == "ghost"
        ));
        assert!(world.remove("ghost").is_none());
        assert!(world.remove("lamp").is_some());
        assert!(world.object("lamp").is_none());
    }

    #[test]
    fn from_json() {
        let world = MemoryWorld::from_json(
            r#"{
                "player": "me",
                "objects": [
                    { "name": "cellar", "flags": "ROOM" },
                    { "name": "me", "location": "cellar" }
                ],
                "exits": { "cellar": ["up"] }
            }"#,
        )
        .unwrap();
        assert_eq!(world.player_room(), Some("cellar"));
        assert!(world.exits().contains("up"));
    }
}
