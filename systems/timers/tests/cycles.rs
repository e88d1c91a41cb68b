use std::time::Duration;

use gravewatch_catalog::{base_config, overlay};
use gravewatch_core::{Difficulty, Direction, Episode, OwnerId, RuleSet};
use gravewatch_system_merger::ConfigMerger;
use gravewatch_system_timers::{LookCycle, PropCycle, PropState, TimerRegistry};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rules(difficulty: Difficulty) -> RuleSet {
    ConfigMerger::new()
        .resolve(
            &base_config(Episode::Cemetery),
            &overlay(Episode::Cemetery, difficulty),
        )
        .expect("shipped configuration resolves")
}

#[test]
fn look_cycle_turns_clockwise_on_each_expiry() {
    let rules = rules(Difficulty::Normal);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut registry = TimerRegistry::new();
    let mut cycle = LookCycle::new(OwnerId::new(5), Direction::Up, &rules);
    let _ = cycle.start(&mut registry, &mut rng);

    let mut facings = Vec::new();
    let mut events = Vec::new();
    for _ in 0..200 {
        events.clear();
        registry.tick(Duration::from_millis(100), &mut events);
        for event in &events {
            if let Some(facing) = cycle.on_expired(event, &mut registry, &mut rng) {
                facings.push(facing);
            }
        }
    }

    assert!(facings.len() >= 5, "20 seconds hold at least five 4s intervals");
    let expected: Vec<_> = std::iter::successors(Some(Direction::Right), |facing| {
        Some(facing.clockwise())
    })
    .take(facings.len())
    .collect();
    assert_eq!(facings, expected);
    assert!(registry.handle_for(cycle.key()).is_some(), "cycle stays armed");
}

#[test]
fn restarting_a_look_cycle_keeps_one_timer() {
    let rules = rules(Difficulty::Easy);
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut registry = TimerRegistry::new();
    let cycle = LookCycle::new(OwnerId::new(1), Direction::Left, &rules);
    let first = cycle.start(&mut registry, &mut rng);
    let second = cycle.start(&mut registry, &mut rng);
    assert_ne!(first, second);
    assert_eq!(registry.len(), 1);
}

#[test]
fn grave_fills_then_empties_after_fill_duration() {
    let rules = rules(Difficulty::Normal);
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mut registry = TimerRegistry::new();
    let mut grave = PropCycle::grave(OwnerId::new(40), &rules);
    assert_eq!(grave.state(), PropState::Empty);

    let _ = grave.trigger(&mut registry, &mut rng).expect("grave fills");
    assert_eq!(grave.state(), PropState::Filled);
    assert!(
        grave.trigger(&mut registry, &mut rng).is_err(),
        "a grave cannot be filled twice"
    );
    assert_eq!(grave.state(), PropState::Filled);

    let mut events = Vec::new();
    registry.tick(rules.grave_fill_duration() - Duration::from_millis(1), &mut events);
    assert!(events.is_empty());
    registry.tick(Duration::from_millis(1), &mut events);
    assert_eq!(events.len(), 1);
    assert!(grave.on_expired(&events[0]));
    assert!(grave.is_resting());

    let _ = grave
        .trigger(&mut registry, &mut rng)
        .expect("an emptied grave can fill again");
}

#[test]
fn box_refills_within_respawn_range() {
    let rules = rules(Difficulty::Infinite);
    let mut rng = ChaCha8Rng::seed_from_u64(14);
    let mut registry = TimerRegistry::new();
    let mut hussy_box = PropCycle::hussy_box(OwnerId::new(2), &rules);
    assert_eq!(hussy_box.state(), PropState::Filled);

    let handle = hussy_box
        .trigger(&mut registry, &mut rng)
        .expect("box opens");
    assert_eq!(hussy_box.state(), PropState::Empty);
    let drawn = registry.duration(handle).expect("refill timer runs");
    assert!(rules.box_respawn().contains(drawn.as_millis() as f64));

    let mut events = Vec::new();
    registry.tick(drawn, &mut events);
    let mut unrelated = PropCycle::grave(OwnerId::new(2), &rules);
    assert!(!unrelated.on_expired(&events[0]), "purpose distinguishes props");
    assert!(hussy_box.on_expired(&events[0]));
    assert_eq!(hussy_box.state(), PropState::Filled);
}
