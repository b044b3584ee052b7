//! Integration tests: the shared cooldown gate and the pickability
//! coupling of merge scanning.

use std::time::Duration;

use cairn_core::{ItemKind, ItemStack, TickTime};
use cairn_engine::{ItemEntity, World, WorldConfig};
use cairn_space::Position;

fn world_with_cooldown(cooldown: Option<Duration>) -> World {
    World::new(WorldConfig {
        merge_cooldown: cooldown,
        despawn_age: None,
        ..WorldConfig::default()
    })
    .expect("valid config")
}

fn stack(amount: u32) -> ItemStack {
    ItemStack::new(ItemKind(1), amount)
}

#[test]
fn inside_the_window_nothing_scans_and_the_stamp_is_untouched() {
    let mut world = world_with_cooldown(Some(Duration::from_millis(500)));
    let a = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));
    world.spawn_item(stack(5), Position::new(1.0, 0.0, 0.5), TickTime(0));

    // Fresh entities carry a zero merge-check stamp, so the first
    // qualifying tick is at t >= 500.
    let report = world.tick(TickTime(100)).unwrap();

    assert_eq!(report.metrics.scans_run, 0);
    assert_eq!(report.metrics.scans_throttled, 2);
    assert!(report.merges.is_empty());
    assert_eq!(world.item(a).unwrap().last_merge_check(), TickTime(0));
}

#[test]
fn the_window_boundary_itself_qualifies() {
    let mut world = world_with_cooldown(Some(Duration::from_millis(500)));
    let a = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));
    world.spawn_item(stack(5), Position::new(1.0, 0.0, 0.5), TickTime(0));

    let report = world.tick(TickTime(500)).unwrap();

    assert_eq!(report.merges.len(), 1);
    assert_eq!(world.item(a).unwrap().stack().amount, 8);
}

#[test]
fn the_stamp_is_recorded_per_qualifying_tick_regardless_of_outcome() {
    let mut world = world_with_cooldown(Some(Duration::from_millis(500)));
    // Alone in its chunk: the scan finds no candidates, but the stamp
    // still advances, so the next tick is throttled again.
    let a = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));

    let report = world.tick(TickTime(600)).unwrap();
    assert_eq!(report.metrics.scans_run, 1);
    assert_eq!(world.item(a).unwrap().last_merge_check(), TickTime(600));

    let report = world.tick(TickTime(900)).unwrap();
    assert_eq!(report.metrics.scans_run, 0);
    assert_eq!(report.metrics.scans_throttled, 1);
    assert_eq!(world.item(a).unwrap().last_merge_check(), TickTime(600));
}

#[test]
fn disabled_cooldown_scans_every_tick() {
    let mut world = world_with_cooldown(None);
    let a = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));

    for t in [0u64, 1, 2, 3] {
        let report = world.tick(TickTime(t)).unwrap();
        assert_eq!(report.metrics.scans_run, 1);
        assert_eq!(world.item(a).unwrap().last_merge_check(), TickTime(t));
    }
}

#[test]
fn retuning_the_shared_cell_is_seen_on_the_next_tick() {
    let mut world = world_with_cooldown(Some(Duration::from_millis(10_000)));
    let a = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));
    world.spawn_item(stack(5), Position::new(1.0, 0.0, 0.5), TickTime(0));

    assert!(world.tick(TickTime(600)).unwrap().merges.is_empty());

    // An external control surface drops the cooldown through a cloned
    // handle; no per-entity state needs touching.
    let handle = world.cooldown().clone();
    handle.set(Some(Duration::from_millis(100)));

    let report = world.tick(TickTime(700)).unwrap();
    assert_eq!(report.merges.len(), 1);
    assert_eq!(world.item(a).unwrap().stack().amount, 8);
}

#[test]
fn items_inside_their_pickup_delay_never_scan() {
    let mut world = world_with_cooldown(None);
    let mut delayed = ItemEntity::new(stack(3), Position::new(0.5, 0.0, 0.5));
    delayed.set_pickup_delay(Duration::from_millis(1_000));
    let a = world.insert_item(delayed, TickTime(0));
    world.spawn_item(stack(5), Position::new(1.0, 0.0, 0.5), TickTime(0));

    // Even with the cooldown disabled, the delayed item neither scans
    // nor is absorbed (it is not yet pickable, so it also fails the
    // candidate filter of the other entity's scan).
    let report = world.tick(TickTime(500)).unwrap();
    assert!(report.merges.is_empty());
    assert_eq!(report.metrics.scans_ineligible, 1);
    assert_eq!(world.item(a).unwrap().last_merge_check(), TickTime(0));

    // Once the delay elapses, the pair merges normally.
    let report = world.tick(TickTime(1_000)).unwrap();
    assert_eq!(report.merges.len(), 1);
    assert_eq!(world.item(a).unwrap().stack().amount, 8);
}

#[test]
fn unpickable_items_never_scan_even_with_no_delay() {
    let mut world = world_with_cooldown(None);
    let a = world.spawn_item(stack(3), Position::new(0.5, 0.0, 0.5), TickTime(0));
    world.spawn_item(stack(5), Position::new(1.0, 0.0, 0.5), TickTime(0));
    world.item_mut(a).unwrap().set_pickable(false);

    let report = world.tick(TickTime(50)).unwrap();

    // `a` cannot initiate (not pickable) and cannot be absorbed (fails
    // the candidate filter), so both entities survive.
    assert!(report.merges.is_empty());
    assert_eq!(world.item_count(), 2);
}
