use std::time::Duration;

use gravewatch_core::{Direction, OwnerId, RuleSet, TimerKey, TimerPurpose, TimerSpan};
use gravewatch_system_selection::WeightedSelector;
use gravewatch_system_timers::{
    DuplicateTimerError, LookCycle, PropCycle, TimerExpired, TimerRegistry,
};
use rand::Rng;

const SPAWNER: OwnerId = OwnerId::new(0);
const WATCHER: OwnerId = OwnerId::new(1);
const GRAVE: OwnerId = OwnerId::new(2);
const HUSSY_BOX: OwnerId = OwnerId::new(3);

/// Drives one watching enemy, one grave, one box and the spawner for `length`.
///
/// Returns one line per expiry, stamped with the simulated time.
pub(crate) fn simulate<R>(
    rules: &RuleSet,
    length: Duration,
    step: Duration,
    rng: &mut R,
) -> Result<Vec<String>, DuplicateTimerError>
where
    R: Rng + ?Sized,
{
    let selector = WeightedSelector::new();
    let mut registry = TimerRegistry::new();
    let mut watcher = LookCycle::new(WATCHER, Direction::Down, rules);
    let mut grave = PropCycle::grave(GRAVE, rules);
    let mut hussy_box = PropCycle::hussy_box(HUSSY_BOX, rules);
    let spawn_key = TimerKey::new(SPAWNER, TimerPurpose::EnemySpawn);
    let spawn_span = TimerSpan::Fixed(rules.spawn_interval());

    let _ = watcher.start(&mut registry, rng);
    let _ = grave.trigger(&mut registry, rng)?;
    let _ = hussy_box.trigger(&mut registry, rng)?;
    let _ = registry.start(spawn_key, spawn_span, rng)?;

    let mut lines = Vec::new();
    let mut events: Vec<TimerExpired> = Vec::new();
    let mut now = Duration::ZERO;
    while now < length && !step.is_zero() {
        now += step;
        registry.tick(step, &mut events);
        for event in events.drain(..) {
            let stamp = now.as_millis();
            if let Some(facing) = watcher.on_expired(&event, &mut registry, rng) {
                lines.push(format!("{stamp:>7}ms  watcher turns {facing}"));
            } else if grave.on_expired(&event) {
                lines.push(format!("{stamp:>7}ms  grave empties"));
                let _ = grave.trigger(&mut registry, rng)?;
            } else if hussy_box.on_expired(&event) {
                lines.push(format!("{stamp:>7}ms  box refills"));
                let _ = hussy_box.trigger(&mut registry, rng)?;
            } else if event.key == spawn_key {
                let spawned = selector
                    .sample(rules.enemy_spawn(), rng)
                    .map_or("nothing", |kind| rules.enemy_name(*kind));
                lines.push(format!("{stamp:>7}ms  spawner releases {spawned}"));
                let _ = registry.start(spawn_key, spawn_span, rng)?;
            }
        }
    }
    Ok(lines)
}
