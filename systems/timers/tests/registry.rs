use std::time::Duration;

use gravewatch_catalog::{base_config, overlay};
use gravewatch_core::{
    Difficulty, Episode, OwnerId, RuleSet, SpawnRange, StartPolicy, TimerKey, TimerPurpose,
    TimerSpan,
};
use gravewatch_system_merger::ConfigMerger;
use gravewatch_system_timers::{DuplicateTimerError, TimerExpired, TimerRegistry};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn key(owner: u32, purpose: TimerPurpose) -> TimerKey {
    TimerKey::new(OwnerId::new(owner), purpose)
}

fn shipped_rules(difficulty: Difficulty) -> RuleSet {
    ConfigMerger::new()
        .resolve(
            &base_config(Episode::Cemetery),
            &overlay(Episode::Cemetery, difficulty),
        )
        .expect("shipped configuration resolves")
}

#[test]
fn five_second_timer_expires_on_fifth_tick() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut registry = TimerRegistry::new();
    let grave = key(1, TimerPurpose::GraveFill);
    let handle = registry
        .start(grave, TimerSpan::from_millis(5_000), &mut rng)
        .expect("first start succeeds");

    let mut events = Vec::new();
    for tick in 1..=4 {
        registry.tick(Duration::from_millis(1_000), &mut events);
        assert!(events.is_empty(), "expired early on tick {tick}");
    }
    assert_eq!(registry.remaining(handle), Some(Duration::from_millis(1_000)));

    registry.tick(Duration::from_millis(1_000), &mut events);
    assert_eq!(
        events,
        vec![TimerExpired {
            handle,
            key: grave,
            overrun: Duration::ZERO,
        }]
    );

    for _ in 0..3 {
        registry.tick(Duration::from_millis(1_000), &mut events);
    }
    assert_eq!(events.len(), 1, "expiry is reported exactly once");
    assert!(registry.is_empty());
}

#[test]
fn cancelled_timers_never_expire() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut registry = TimerRegistry::new();
    let handle = registry
        .start(
            key(3, TimerPurpose::EnemyRespawn),
            TimerSpan::from_millis(500),
            &mut rng,
        )
        .expect("start succeeds");

    assert!(registry.cancel(handle));
    assert!(!registry.cancel(handle), "cancel is idempotent");

    let mut events = Vec::new();
    registry.tick(Duration::from_secs(10), &mut events);
    assert!(events.is_empty());
    assert!(!registry.is_running(handle));
}

#[test]
fn grave_fill_rejects_a_second_start() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut registry = TimerRegistry::new();
    let grave = key(9, TimerPurpose::GraveFill);
    let first = registry
        .start(grave, TimerSpan::from_millis(30_000), &mut rng)
        .expect("first start succeeds");

    assert_eq!(
        registry.start(grave, TimerSpan::from_millis(30_000), &mut rng),
        Err(DuplicateTimerError {
            key: grave,
            running: first,
        })
    );
    assert!(registry.is_running(first));
    assert_eq!(registry.len(), 1);
}

#[test]
fn look_direction_replaces_the_running_timer() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut registry = TimerRegistry::new();
    let look = key(2, TimerPurpose::LookDirection);
    let first = registry
        .start(look, TimerSpan::from_millis(2_000), &mut rng)
        .expect("first start succeeds");
    let second = registry
        .start(look, TimerSpan::from_millis(3_000), &mut rng)
        .expect("look timers replace");

    assert_ne!(first, second);
    assert!(!registry.is_running(first));
    assert_eq!(registry.handle_for(look), Some(second));

    let mut events = Vec::new();
    registry.tick(Duration::from_millis(2_500), &mut events);
    assert!(events.is_empty(), "the replaced timer must not fire");
    registry.tick(Duration::from_millis(500), &mut events);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].handle, second);
}

#[test]
fn explicit_policy_overrides_purpose_default() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut registry = TimerRegistry::new();
    let spawn = key(0, TimerPurpose::EnemySpawn);
    let _ = registry
        .start(spawn, TimerSpan::from_millis(1_000), &mut rng)
        .expect("first start succeeds");
    assert!(registry
        .start_with_policy(
            spawn,
            TimerSpan::from_millis(1_000),
            StartPolicy::Reject,
            &mut rng
        )
        .is_err());
}

#[test]
fn ranged_spans_are_sampled_once_at_start() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut registry = TimerRegistry::new();
    let range = SpawnRange::new(8_000.0, 15_000.0);
    let handle = registry
        .start(
            key(4, TimerPurpose::BoxRespawn),
            TimerSpan::Range(range),
            &mut rng,
        )
        .expect("start succeeds");

    let drawn = registry.duration(handle).expect("timer is running");
    assert!(range.contains(drawn.as_millis() as f64));
    assert_eq!(registry.span(handle), Some(TimerSpan::Range(range)));

    let mut events = Vec::new();
    registry.tick(Duration::from_millis(1), &mut events);
    assert_eq!(
        registry.remaining(handle),
        Some(drawn - Duration::from_millis(1)),
        "remaining time counts down from the original draw"
    );
}

#[test]
fn simultaneous_expiries_follow_start_order() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut registry = TimerRegistry::new();
    let late = key(1, TimerPurpose::AttackCooldown);
    let early = key(2, TimerPurpose::AttackCooldown);
    let _ = registry
        .start(late, TimerSpan::from_millis(300), &mut rng)
        .expect("start succeeds");
    let _ = registry
        .start(early, TimerSpan::from_millis(100), &mut rng)
        .expect("start succeeds");

    let mut events = Vec::new();
    registry.tick(Duration::from_millis(400), &mut events);
    let keys: Vec<_> = events.iter().map(|event| event.key).collect();
    assert_eq!(keys, vec![late, early]);
    assert_eq!(events[1].overrun, Duration::from_millis(300));
}

#[test]
fn seeded_registries_replay_identically() {
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut registry = TimerRegistry::new();
        let span = TimerSpan::Range(SpawnRange::new(2_000.0, 4_000.0));
        for owner in 0..8 {
            let _ = registry.replace(key(owner, TimerPurpose::LookDirection), span, &mut rng);
        }
        let mut events = Vec::new();
        for _ in 0..50 {
            registry.tick(Duration::from_millis(100), &mut events);
        }
        events
    };

    let first = run(99);
    assert_eq!(first, run(99));
    assert_eq!(first.len(), 8, "every look timer fits within five seconds");
}

#[test]
fn cancelling_by_key_stops_the_running_timer() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut registry = TimerRegistry::new();
    let respawn = key(5, TimerPurpose::GraveRespawn);
    let handle = registry
        .start(respawn, TimerSpan::from_millis(1_000), &mut rng)
        .expect("start succeeds");

    assert!(registry.cancel_key(respawn));
    assert!(!registry.cancel_key(respawn), "nothing left to cancel");
    assert_eq!(registry.handle_for(respawn), None);
    assert!(!registry.is_running(handle));

    let mut events = Vec::new();
    registry.tick(Duration::from_secs(5), &mut events);
    assert!(events.is_empty());

    let _ = registry
        .start(respawn, TimerSpan::from_millis(1_000), &mut rng)
        .expect("a cancelled key can start again");
}

#[test]
fn running_timers_keep_their_span_when_another_ruleset_resolves() {
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let mut registry = TimerRegistry::new();
    let easy = shipped_rules(Difficulty::Easy);
    let easy_spawn = easy
        .timer_span(TimerPurpose::EnemySpawn)
        .expect("spawn interval is always configured");
    let easy_look = easy
        .timer_span(TimerPurpose::LookDirection)
        .expect("look interval is always configured");
    let spawner = registry
        .start(key(0, TimerPurpose::EnemySpawn), easy_spawn, &mut rng)
        .expect("start succeeds");
    let watcher = registry
        .start(key(1, TimerPurpose::LookDirection), easy_look, &mut rng)
        .expect("start succeeds");
    let watcher_draw = registry.duration(watcher).expect("watcher is running");

    let mut events = Vec::new();
    registry.tick(Duration::from_millis(1_000), &mut events);

    let hard = shipped_rules(Difficulty::Hard);
    let hard_spawn = hard
        .timer_span(TimerPurpose::EnemySpawn)
        .expect("spawn interval is always configured");
    assert_ne!(hard_spawn, easy_spawn);
    let _ = registry
        .start(key(2, TimerPurpose::EnemySpawn), hard_spawn, &mut rng)
        .expect("start succeeds");

    assert_eq!(registry.span(spawner), Some(easy_spawn));
    assert_eq!(registry.duration(spawner), Some(Duration::from_millis(4_000)));
    assert_eq!(registry.remaining(spawner), Some(Duration::from_millis(3_000)));
    assert_eq!(registry.span(watcher), Some(easy_look));
    assert_eq!(registry.duration(watcher), Some(watcher_draw));
}
