//! Scripted demo session.
//!
//! Loads a small world, plays a few turns by clicking links, and writes the
//! resulting HTML transcript to stdout or to the path given as the first
//! argument. Set `RUST_LOG=itemlinks=trace` to watch reconciliation.

use std::collections::VecDeque;

use anyhow::{bail, Context, Result};
use itemlinks::{
    Click, CommandSink, Formatter, ItemLinks, LinkSettings, MemoryWorld, NameOptions, ObjectFlags,
    World,
};
use linkdom::{ElementId, Fragment};
use tracing::info;

const WORLD: &str = r#"{
    "player": "me",
    "objects": [
        { "name": "kitchen", "alias": "Kitchen", "flags": "ROOM" },
        { "name": "cellar", "alias": "Cellar", "flags": "ROOM" },
        { "name": "me", "location": "kitchen", "pronouns": "second_person" },
        { "name": "lamp", "location": "kitchen", "adjective": "brass", "verbs": ["take", "light"] },
        { "name": "cupboard", "location": "kitchen", "verbs": ["open"], "flags": "CONTAINER | CLOSED" },
        { "name": "jar", "location": "cupboard", "verbs": ["take"] },
        { "name": "cook", "alias": "Mrs Hobbs", "location": "kitchen", "verbs": ["talk to"], "flags": "NPC | PROPER_NAME" },
        { "name": "ladle", "location": "cook" },
        { "name": "barrel", "location": "cellar", "verbs": ["push"] }
    ],
    "exits": {
        "kitchen": ["down"],
        "cellar": ["up"]
    }
}"#;

const SETTINGS: &str = r#"{ "click_history": 4, "scrollback": 32 }"#;

/// Commands produced by clicks, run at the start of the next turn.
#[derive(Default)]
struct Queue(VecDeque<String>);

impl CommandSink for Queue {
    fn run_command(&mut self, command: &str) {
        info!(command, "queued");
        self.0.push_back(command.to_string());
    }
}

/// A very small parser: `take X`, `open X`, and directions.
fn execute(world: &mut MemoryWorld, command: &str) -> Result<String> {
    let lower = command.to_lowercase();
    let reply = match lower.split_once(' ') {
        Some(("take", what)) => {
            let name = find(world, what)?;
            world.move_to(&name, "me")?;
            if let Some(object) = world.object_mut(&name) {
                object.verbs = vec!["drop".into()];
            }
            "Taken.".to_string()
        }
        Some(("open", what)) => {
            let name = find(world, what)?;
            if let Some(object) = world.object_mut(&name) {
                object.flags.remove(ObjectFlags::CLOSED);
                object.verbs = vec!["close".into()];
            }
            "Opened.".to_string()
        }
        Some((verb, _)) => format!("You can't {verb} that here."),
        None if world.exits().contains(&lower) => {
            let destination = match lower.as_str() {
                "down" => "cellar",
                _ => "kitchen",
            };
            world.move_to("me", destination)?;
            format!("You go {lower}.")
        }
        None => bail!("unknown command: {command}"),
    };
    world.refresh_scope();
    Ok(reply)
}

fn find(world: &MemoryWorld, alias: &str) -> Result<String> {
    world
        .objects()
        .find(|o| o.display_alias().eq_ignore_ascii_case(alias))
        .map(|o| o.name.clone())
        .with_context(|| format!("nothing called {alias}"))
}

/// Prints the room description and returns its link handles.
fn look(links: &mut ItemLinks, world: &MemoryWorld) -> Vec<ElementId> {
    let Some(room) = world.player_room().and_then(|r| world.object(r)) else {
        return Vec::new();
    };
    let renderer = links.renderer();
    let visible = world
        .contents(&room.name)
        .into_iter()
        .filter(|o| o.name != world.player())
        .map(|o| renderer.name(o, &NameOptions::indefinite()))
        .collect();
    let lexicon = renderer.formatter().lexicon();
    let listing = renderer
        .formatter()
        .join_list(visible, &lexicon.list_and, &lexicon.list_nothing);
    let fragment = renderer
        .name(room, &NameOptions::default().capitalised(true))
        .with_text(". You can see ")
        .with(listing)
        .with_text(". You can go ")
        .with(renderer.exits_list(&world.exits()))
        .with_text(".");
    links.print(fragment)
}

fn turn(links: &mut ItemLinks, world: &mut MemoryWorld, queue: &mut Queue) -> Result<()> {
    while let Some(command) = queue.0.pop_front() {
        links.print(Fragment::text(format!("> {command}")));
        let reply = execute(world, &command)?;
        links.print(Fragment::text(reply));
    }
    if let Some(report) = links.on_turn_complete(world) {
        info!(
            objects_enabled = report.objects.enabled,
            objects_disabled = report.objects.disabled,
            exits_enabled = report.exits.enabled,
            "turn complete"
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut world = MemoryWorld::from_json(WORLD).context("parsing world")?;
    world.refresh_scope();
    let settings = LinkSettings::from_json(SETTINGS).context("parsing settings")?;
    let mut links = ItemLinks::new(settings);
    let mut queue = Queue::default();

    // Look around, take the lamp, open the cupboard.
    let ids = look(&mut links, &world);
    let &[lamp, cupboard, _, down] = ids.as_slice() else {
        bail!("expected lamp, cupboard, cook and one exit, got {} links", ids.len());
    };
    turn(&mut links, &mut world, &mut queue)?;
    links.click(Click::Trigger(cupboard), &mut queue);
    links.click(Click::Trigger(lamp), &mut queue);
    links.click(Click::Verb { trigger: lamp, index: 0 }, &mut queue);
    turn(&mut links, &mut world, &mut queue)?;

    links.click(Click::Trigger(cupboard), &mut queue);
    links.click(Click::Verb { trigger: cupboard, index: 0 }, &mut queue);
    turn(&mut links, &mut world, &mut queue)?;
    links.examine(&world, "cupboard")?;
    links.examine(&world, "cook")?;
    links.run_inventory(&world);

    // Head downstairs; everything in the kitchen goes stale.
    links.click(Click::Exit(down), &mut queue);
    turn(&mut links, &mut world, &mut queue)?;
    look(&mut links, &world);
    turn(&mut links, &mut world, &mut queue)?;

    links.on_game_end(|| info!("the end"));
    let html = links.document().to_html();
    match std::env::args().nth(1) {
        Some(path) => std::fs::write(&path, html).with_context(|| format!("writing {path}"))?,
        None => println!("{html}"),
    }
    Ok(())
}
