use criterion::{black_box, criterion_group, criterion_main, Criterion};
use itemlinks::reconcile::{reconcile_exit_links, reconcile_object_links};
use itemlinks::{GameObject, ItemLinks, LinkRenderer, LinkSettings, MemoryWorld, World};

const DIRECTIONS: [&str; 4] = ["north", "south", "east", "west"];

/// 200 objects, half in scope, and a transcript with 2000 object links
/// plus 400 exit links.
fn setup() -> (MemoryWorld, ItemLinks) {
    let mut world = MemoryWorld::new("me");
    world
        .add(GameObject::new("room"))
        .add(GameObject::new("me").at("room"));
    for i in 0..200 {
        world.add(
            GameObject::new(format!("thing{i}"))
                .at("room")
                .with_verbs(["take", "drop", "examine"])
                .in_scope(i % 2 == 0),
        );
    }
    world.set_exits("room", ["north", "east"]);

    let mut links = ItemLinks::new(LinkSettings::default());
    let names: Vec<String> = world.objects().map(|o| o.name.clone()).collect();
    for turn in 0..2000 {
        let object = world.object(&names[turn % names.len()]).unwrap();
        let fragment = links.renderer().object_link(object, None, false);
        links.print(fragment);
    }
    for turn in 0..400 {
        let fragment = links.renderer().exit_link(DIRECTIONS[turn % DIRECTIONS.len()]);
        links.print(fragment);
    }
    (world, links)
}

fn bench_object_pass(c: &mut Criterion) {
    let (world, links) = setup();
    let renderer = LinkRenderer::english(&LinkSettings::default());
    let mut doc = links.document().clone();

    c.bench_function("reconcile_object_links", |b| {
        b.iter(|| black_box(reconcile_object_links(&mut doc, &world, &renderer)))
    });
}

fn bench_exit_pass(c: &mut Criterion) {
    let (world, links) = setup();
    let renderer = LinkRenderer::english(&LinkSettings::default());
    let mut doc = links.document().clone();
    let exits = world.exits();

    c.bench_function("reconcile_exit_links", |b| {
        b.iter(|| black_box(reconcile_exit_links(&mut doc, &exits, &renderer)))
    });
}

fn bench_full_turn(c: &mut Criterion) {
    let (world, mut links) = setup();

    c.bench_function("on_turn_complete", |b| {
        b.iter(|| black_box(links.on_turn_complete(&world)))
    });
}

criterion_group!(benches, bench_object_pass, bench_exit_pass, bench_full_turn);
criterion_main!(benches);
