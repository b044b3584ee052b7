//! Integration tests: the despawn sweep.

use std::time::Duration;

use cairn_core::{ItemKind, ItemStack, TickTime};
use cairn_engine::{World, WorldConfig};
use cairn_space::Position;

fn ageing_world(age: Option<Duration>) -> World {
    World::new(WorldConfig {
        merge_cooldown: None,
        despawn_age: age,
        ..WorldConfig::default()
    })
    .expect("valid config")
}

fn stack(amount: u32) -> ItemStack {
    ItemStack::new(ItemKind(1), amount)
}

#[test]
fn items_despawn_at_the_age_boundary() {
    let mut world = ageing_world(Some(Duration::from_secs(300)));
    let old = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));
    let young = world.spawn_item(stack(5), Position::new(40.5, 0.0, 0.5), TickTime(200_000));

    let report = world.tick(TickTime(300_000)).unwrap();

    assert_eq!(report.despawned, vec![old]);
    assert_eq!(report.metrics.items_despawned, 1);
    assert!(world.item(old).is_none());
    assert!(world.item(young).is_some());
}

#[test]
fn disabled_ageing_never_despawns() {
    let mut world = ageing_world(None);
    let a = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));

    let report = world.tick(TickTime(10_000_000)).unwrap();

    assert!(report.despawned.is_empty());
    assert!(world.item(a).is_some());
}

#[test]
fn an_expired_item_does_not_merge_on_its_final_tick() {
    let mut world = ageing_world(Some(Duration::from_secs(300)));
    let old = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));
    let young = world.spawn_item(stack(5), Position::new(1.0, 0.0, 0.5), TickTime(200_000));

    // The despawn sweep runs before the merge sweep, so the expired
    // item is gone before anything can absorb it (or scan from it).
    let report = world.tick(TickTime(300_000)).unwrap();

    assert_eq!(report.despawned, vec![old]);
    assert!(report.merges.is_empty());
    assert_eq!(world.item(young).unwrap().stack().amount, 5);
}

#[test]
fn despawned_entities_leave_the_chunk_index() {
    let mut world = ageing_world(Some(Duration::from_secs(300)));
    let old = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));
    let chunk = world.item(old).unwrap().position().chunk();

    world.tick(TickTime(300_000)).unwrap();

    assert_eq!(world.index().population(chunk), 0);
    assert!(!world.index().contains(old, chunk));
}
