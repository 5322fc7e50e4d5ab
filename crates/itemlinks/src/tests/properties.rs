//! Property tests over random worlds, transcripts and click sequences.

use proptest::prelude::*;

use linkdom::{CommandLink, Element, ElementId, ExitLink, Fragment};

use crate::config::LinkSettings;
use crate::dropdown::Click;
use crate::reconcile::{reconcile_exit_links, reconcile_object_links};
use crate::render::LinkRenderer;
use crate::session::ItemLinks;
use crate::world::{ExitSet, GameObject, MemoryWorld, World};

const VERBS: [&str; 4] = ["take", "drop", "open", "push"];
const DIRECTIONS: [&str; 6] = ["north", "south", "east", "west", "up", "down"];

/// Per object: scope status and indices into `VERBS`.
fn arb_objects() -> impl Strategy<Value = Vec<(bool, Vec<usize>)>> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(0..VERBS.len(), 0..4)),
        1..8,
    )
}

fn build_world(objects: &[(bool, Vec<usize>)]) -> MemoryWorld {
    let mut world = MemoryWorld::new("me");
    for (i, (in_scope, verbs)) in objects.iter().enumerate() {
        world.add(
            GameObject::new(format!("o{i}"))
                .in_scope(*in_scope)
                .with_verbs(verbs.iter().map(|&v| VERBS[v])),
        );
    }
    world
}

/// Prints one object link per entry of `prints` (taken modulo the object
/// count) and returns the handles.
fn print_objects(links: &mut ItemLinks, world: &MemoryWorld, prints: &[usize]) -> Vec<ElementId> {
    let names: Vec<String> = world.objects().map(|o| o.name.clone()).collect();
    prints
        .iter()
        .map(|p| {
            let object = world.object(&names[p % names.len()]).expect("object exists");
            let fragment = links.renderer().object_link(object, None, false);
            links.print(fragment)[0]
        })
        .collect()
}

/// Flips scope status per object where `flips` says so.
fn apply_flips(world: &mut MemoryWorld, flips: &[bool]) {
    let names: Vec<String> = world.objects().map(|o| o.name.clone()).collect();
    for (name, flip) in names.iter().zip(flips) {
        if *flip {
            let in_scope = world.object(name).is_some_and(|o| o.in_scope);
            world.set_scope(name, !in_scope).expect("object exists");
        }
    }
}

proptest! {
    #[test]
    fn object_reconciliation_is_idempotent(
        objects in arb_objects(),
        prints in prop::collection::vec(any::<usize>(), 0..20),
        flips in prop::collection::vec(any::<bool>(), 8),
    ) {
        let mut world = build_world(&objects);
        let mut links = ItemLinks::new(LinkSettings::default());
        print_objects(&mut links, &world, &prints);
        apply_flips(&mut world, &flips);

        let renderer = LinkRenderer::english(&LinkSettings::default());
        let mut doc = links.document().clone();
        let first = reconcile_object_links(&mut doc, &world, &renderer);
        let snapshot: Vec<_> = doc.elements().map(|(id, el)| (id, el.clone())).collect();
        let second = reconcile_object_links(&mut doc, &world, &renderer);
        let after: Vec<_> = doc.elements().map(|(id, el)| (id, el.clone())).collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(snapshot, after);
    }

    #[test]
    fn object_links_follow_scope(
        objects in arb_objects(),
        prints in prop::collection::vec(any::<usize>(), 0..20),
        flips in prop::collection::vec(any::<bool>(), 8),
    ) {
        let mut world = build_world(&objects);
        let mut links = ItemLinks::new(LinkSettings::default());
        print_objects(&mut links, &world, &prints);
        apply_flips(&mut world, &flips);
        links.on_turn_complete(&world);

        for (_, element) in links.document().elements() {
            let link = element.as_object().expect("only object links printed");
            let object = world.object(link.object()).expect("object exists");
            prop_assert_eq!(link.state.is_enabled(), object.in_scope);
            if object.in_scope {
                let expected: Vec<String> = links
                    .renderer()
                    .verb_entries(object)
                    .into_iter()
                    .map(|entry| entry.verb)
                    .collect();
                let actual: Vec<String> = link.panel.verb_names().map(str::to_string).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }

    #[test]
    fn exit_reconciliation_is_idempotent(
        printed in prop::collection::vec(0..DIRECTIONS.len(), 0..12),
        available in prop::collection::vec(any::<bool>(), DIRECTIONS.len()),
        blank in 0usize..3,
    ) {
        let renderer = LinkRenderer::english(&LinkSettings::default());
        let mut doc = linkdom::Document::new();
        for d in &printed {
            doc.print(renderer.exit_link(DIRECTIONS[*d]));
        }
        for _ in 0..blank {
            doc.print(Fragment::link(Element::Exit(ExitLink::new("", "?"))));
        }
        let exits: ExitSet = DIRECTIONS
            .iter()
            .zip(&available)
            .filter(|(_, on)| **on)
            .map(|(d, _)| *d)
            .collect();

        let first = reconcile_exit_links(&mut doc, &exits, &renderer);
        let snapshot: Vec<_> = doc.elements().map(|(id, el)| (id, el.clone())).collect();
        let second = reconcile_exit_links(&mut doc, &exits, &renderer);
        let after: Vec<_> = doc.elements().map(|(id, el)| (id, el.clone())).collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first.total(), printed.len() + blank);
        prop_assert_eq!(first.skipped, blank);
        prop_assert_eq!(snapshot, after);
    }

    #[test]
    fn exit_links_follow_exit_set(
        printed in prop::collection::vec(0..DIRECTIONS.len(), 0..12),
        available in prop::collection::vec(any::<bool>(), DIRECTIONS.len()),
    ) {
        let renderer = LinkRenderer::english(&LinkSettings::default());
        let mut doc = linkdom::Document::new();
        for d in &printed {
            doc.print(renderer.exit_link(DIRECTIONS[*d]));
        }
        let exits: ExitSet = DIRECTIONS
            .iter()
            .zip(&available)
            .filter(|(_, on)| **on)
            .map(|(d, _)| *d)
            .collect();

        reconcile_exit_links(&mut doc, &exits, &renderer);

        for (_, element) in doc.elements() {
            let exit = element.as_exit().expect("only exit links printed");
            prop_assert_eq!(exit.state.is_enabled(), exits.contains(exit.direction()));
        }
    }

    #[test]
    fn at_most_one_panel_open(
        objects in arb_objects(),
        prints in prop::collection::vec(any::<usize>(), 1..10),
        clicks in prop::collection::vec((0u8..4, any::<usize>(), 0usize..4), 0..40),
    ) {
        let world = build_world(&objects);
        let mut links = ItemLinks::new(LinkSettings::default());
        let ids = print_objects(&mut links, &world, &prints);
        let mut sink: Vec<String> = Vec::new();

        for (kind, target, verb) in clicks {
            let id = ids[target % ids.len()];
            let click = match kind {
                0 | 1 => Click::Trigger(id),
                2 => Click::Verb { trigger: id, index: verb },
                _ => Click::Outside,
            };
            let outcome = links.click(click, &mut sink);
            prop_assert!(links.document().visible_panels().len() <= 1);
            if let crate::dropdown::DropdownState::Open(open) = outcome.state {
                prop_assert_eq!(links.document().visible_panels(), vec![open]);
            }
        }
    }

    #[test]
    fn disabled_links_dispatch_nothing(
        objects in arb_objects(),
        prints in prop::collection::vec(any::<usize>(), 1..10),
        disabled in prop::collection::vec(any::<bool>(), 12),
        verb in 0usize..4,
    ) {
        let world = build_world(&objects);
        let mut links = ItemLinks::new(LinkSettings::default());
        print_objects(&mut links, &world, &prints);
        let exit = links.renderer().exit_link("north");
        links.print(exit);
        links.print(Fragment::link(Element::Command(CommandLink::new("hint", "hint"))));

        let mut flags = disabled.iter().cycle();
        links.document_mut().update_all(|_, element| {
            if flags.next().copied().unwrap_or(false) {
                element.disable();
            }
        });
        let inert: Vec<_> = links
            .document()
            .elements()
            .filter(|(_, el)| !el.is_enabled())
            .map(|(id, _)| id)
            .collect();

        let mut sink: Vec<String> = Vec::new();
        for id in inert {
            for click in [
                Click::Trigger(id),
                Click::Verb { trigger: id, index: verb },
                Click::Exit(id),
                Click::Command(id),
            ] {
                let outcome = links.click(click, &mut sink);
                prop_assert_eq!(outcome.dispatched, None);
            }
        }
        prop_assert!(sink.is_empty());
    }

    #[test]
    fn game_end_disables_all_regardless_of_flag(
        objects in arb_objects(),
        prints in prop::collection::vec(any::<usize>(), 0..10),
        links_enabled in any::<bool>(),
    ) {
        let world = build_world(&objects);
        let mut links = ItemLinks::new(LinkSettings::default());
        print_objects(&mut links, &world, &prints);
        let exit = links.renderer().exit_link("north");
        links.print(exit);
        links.set_links_enabled(links_enabled);

        let finished = links.on_game_end(|| true);

        prop_assert!(finished);
        prop_assert!(links.document().elements().all(|(_, el)| !el.is_enabled()));
        prop_assert!(links.document().visible_panels().is_empty());
    }
}
