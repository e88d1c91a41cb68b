use std::{collections::BTreeMap, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    AssetTable, Difficulty, EnemyKind, Episode, FieldValue, GridGeometry, PlayerLimits, RuleField,
    SpawnDistribution, SpawnRange, TimerPurpose, TimerSpan, WallBehavior,
};

/// Field values keyed by canonical field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldTable {
    entries: BTreeMap<RuleField, FieldValue>,
}

impl FieldTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a value, returning the updated table.
    #[must_use]
    pub fn with(mut self, field: RuleField, value: FieldValue) -> Self {
        let _ = self.insert(field, value);
        self
    }

    /// Adds or replaces a value, returning the previous one.
    pub fn insert(&mut self, field: RuleField, value: FieldValue) -> Option<FieldValue> {
        self.entries.insert(field, value)
    }

    /// Value stored for the field.
    #[must_use]
    pub fn get(&self, field: RuleField) -> Option<&FieldValue> {
        self.entries.get(&field)
    }

    /// Mutable value stored for the field.
    pub fn get_mut(&mut self, field: RuleField) -> Option<&mut FieldValue> {
        self.entries.get_mut(&field)
    }

    /// Reports whether the field holds a value.
    #[must_use]
    pub fn contains(&self, field: RuleField) -> bool {
        self.entries.contains_key(&field)
    }

    /// Entries in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleField, &FieldValue)> {
        self.entries.iter().map(|(field, value)| (*field, value))
    }

    /// Number of populated fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no field is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Episode-level configuration that every difficulty overlay is merged onto.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseConfig {
    episode: Episode,
    fields: FieldTable,
    assets: Arc<AssetTable>,
    enemy_names: BTreeMap<EnemyKind, String>,
}

impl BaseConfig {
    /// Creates a base configuration.
    #[must_use]
    pub fn new(
        episode: Episode,
        fields: FieldTable,
        assets: Arc<AssetTable>,
        enemy_names: BTreeMap<EnemyKind, String>,
    ) -> Self {
        Self {
            episode,
            fields,
            assets,
            enemy_names,
        }
    }

    /// Episode the configuration belongs to.
    #[must_use]
    pub const fn episode(&self) -> Episode {
        self.episode
    }

    /// Base field values.
    #[must_use]
    pub const fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Shared asset bindings.
    #[must_use]
    pub fn assets(&self) -> &Arc<AssetTable> {
        &self.assets
    }

    /// Display names of the enemy kinds.
    #[must_use]
    pub const fn enemy_names(&self) -> &BTreeMap<EnemyKind, String> {
        &self.enemy_names
    }
}

/// Difficulty-specific field set applied on top of a base configuration.
///
/// Keys are kept as written by the data source so that misspellings surface
/// as schema errors during resolution instead of being dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyOverlay {
    difficulty: Difficulty,
    extension: bool,
    entries: Vec<(String, FieldValue)>,
}

impl DifficultyOverlay {
    /// Creates an overlay that may only override fields the base declares.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            extension: false,
            entries: Vec::new(),
        }
    }

    /// Creates an overlay that may also introduce extension fields.
    #[must_use]
    pub fn extension(difficulty: Difficulty) -> Self {
        Self {
            extension: true,
            ..Self::new(difficulty)
        }
    }

    /// Appends an entry, returning the updated overlay.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.push(key, value);
        self
    }

    /// Appends an entry.
    pub fn push(&mut self, key: impl Into<String>, value: FieldValue) {
        self.entries.push((key.into(), value));
    }

    /// Difficulty the overlay configures.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Reports whether the overlay may introduce extension fields.
    #[must_use]
    pub const fn is_extension(&self) -> bool {
        self.extension
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[(String, FieldValue)] {
        &self.entries
    }
}

/// Every typed value a [`RuleSet`] is assembled from.
///
/// Produced by the merger after schema and range checks; hosts should obtain
/// rulesets through resolution rather than filling this in by hand.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSetParts {
    /// Episode the ruleset belongs to.
    pub episode: Episode,
    /// Difficulty the ruleset was resolved for.
    pub difficulty: Difficulty,
    /// Grid dimensions and placement.
    pub grid: GridGeometry,
    /// Player spawn and movement limits.
    pub player: PlayerLimits,
    /// Interpolation factor in `(0, 1]`.
    pub interpolation_factor: f32,
    /// Buffered input capacity, at least one.
    pub input_buffer_capacity: usize,
    /// Delay between attacks.
    pub attack_cooldown: Duration,
    /// Total on-screen time of a score popup.
    pub number_display_duration: Duration,
    /// Fallback per-frame duration of effect animations.
    pub effect_animation_speed: Duration,
    /// Milliseconds per enemy step.
    pub enemy_speed: SpawnRange,
    /// Fractional speed-up per progression step.
    pub speed_increment: f64,
    /// Delay between enemy spawns.
    pub spawn_interval: Duration,
    /// Maximum simultaneous enemies.
    pub max_enemies: u32,
    /// Look-direction change interval in milliseconds.
    pub look_interval: SpawnRange,
    /// Time a filled grave stays filled.
    pub grave_fill_duration: Duration,
    /// Base-level infinite-mode grave respawn constant.
    pub infinite_mode_grave_respawn_time: Duration,
    /// Overlay-introduced grave respawn timer.
    pub grave_respawn_time: Option<Duration>,
    /// Overlay-introduced enemy respawn delay.
    pub enemy_respawn_delay: Option<Duration>,
    /// Box refill interval in milliseconds.
    pub box_respawn: SpawnRange,
    /// Boundary-crossing policy.
    pub wall_behavior: WallBehavior,
    /// Rows pushed by the `push_down` behavior.
    pub push_down_distance: u32,
    /// Enemy kind weights.
    pub enemy_spawn: SpawnDistribution<EnemyKind>,
    /// Enemy display names.
    pub enemy_names: BTreeMap<EnemyKind, String>,
    /// Shared asset bindings.
    pub assets: Arc<AssetTable>,
}

/// Immutable, fully resolved configuration for one episode and difficulty.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSet {
    parts: RuleSetParts,
}

impl RuleSet {
    /// Freezes resolved parts into a ruleset.
    #[must_use]
    pub fn from_parts(parts: RuleSetParts) -> Self {
        Self { parts }
    }

    /// Episode the ruleset belongs to.
    #[must_use]
    pub const fn episode(&self) -> Episode {
        self.parts.episode
    }

    /// Difficulty the ruleset was resolved for.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.parts.difficulty
    }

    /// Grid dimensions and placement.
    #[must_use]
    pub const fn grid(&self) -> &GridGeometry {
        &self.parts.grid
    }

    /// Player spawn and movement limits.
    #[must_use]
    pub const fn player(&self) -> &PlayerLimits {
        &self.parts.player
    }

    /// Fraction of remaining distance covered per rendered frame.
    #[must_use]
    pub const fn interpolation_factor(&self) -> f32 {
        self.parts.interpolation_factor
    }

    /// Capacity of the buffered input queue.
    #[must_use]
    pub const fn input_buffer_capacity(&self) -> usize {
        self.parts.input_buffer_capacity
    }

    /// Delay between player attacks.
    #[must_use]
    pub const fn attack_cooldown(&self) -> Duration {
        self.parts.attack_cooldown
    }

    /// Total on-screen time of a score popup.
    #[must_use]
    pub const fn number_display_duration(&self) -> Duration {
        self.parts.number_display_duration
    }

    /// Fallback per-frame duration of effect animations.
    #[must_use]
    pub const fn effect_animation_speed(&self) -> Duration {
        self.parts.effect_animation_speed
    }

    /// Milliseconds per enemy step; a non-degenerate range means variable speed.
    #[must_use]
    pub const fn enemy_speed(&self) -> &SpawnRange {
        &self.parts.enemy_speed
    }

    /// Fractional speed-up per progression step.
    #[must_use]
    pub const fn speed_increment(&self) -> f64 {
        self.parts.speed_increment
    }

    /// Delay between enemy spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        self.parts.spawn_interval
    }

    /// Maximum simultaneous enemies.
    #[must_use]
    pub const fn max_enemies(&self) -> u32 {
        self.parts.max_enemies
    }

    /// Look-direction change interval in milliseconds.
    #[must_use]
    pub const fn look_interval(&self) -> &SpawnRange {
        &self.parts.look_interval
    }

    /// Time a filled grave stays filled.
    #[must_use]
    pub const fn grave_fill_duration(&self) -> Duration {
        self.parts.grave_fill_duration
    }

    /// Base-level infinite-mode grave respawn constant.
    #[must_use]
    pub const fn infinite_mode_grave_respawn_time(&self) -> Duration {
        self.parts.infinite_mode_grave_respawn_time
    }

    /// Grave respawn timer introduced by an extension overlay.
    #[must_use]
    pub const fn grave_respawn_time(&self) -> Option<Duration> {
        self.parts.grave_respawn_time
    }

    /// Enemy respawn delay introduced by an extension overlay.
    #[must_use]
    pub const fn enemy_respawn_delay(&self) -> Option<Duration> {
        self.parts.enemy_respawn_delay
    }

    /// Box refill interval in milliseconds.
    #[must_use]
    pub const fn box_respawn(&self) -> &SpawnRange {
        &self.parts.box_respawn
    }

    /// Boundary-crossing policy.
    #[must_use]
    pub const fn wall_behavior(&self) -> WallBehavior {
        self.parts.wall_behavior
    }

    /// Rows pushed by the `push_down` behavior.
    #[must_use]
    pub const fn push_down_distance(&self) -> u32 {
        self.parts.push_down_distance
    }

    /// Enemy kind weights.
    #[must_use]
    pub const fn enemy_spawn(&self) -> &SpawnDistribution<EnemyKind> {
        &self.parts.enemy_spawn
    }

    /// Display name of the enemy kind, falling back to its label.
    #[must_use]
    pub fn enemy_name(&self, kind: EnemyKind) -> &str {
        self.parts
            .enemy_names
            .get(&kind)
            .map_or(kind.label(), String::as_str)
    }

    /// Shared asset bindings.
    #[must_use]
    pub fn assets(&self) -> &AssetTable {
        &self.parts.assets
    }

    /// Span a timer of the given purpose is armed with, copied at start.
    ///
    /// Returns `None` for purposes backed by extension fields the ruleset does
    /// not carry.
    #[must_use]
    pub fn timer_span(&self, purpose: TimerPurpose) -> Option<TimerSpan> {
        let parts = &self.parts;
        match purpose {
            TimerPurpose::LookDirection => Some(TimerSpan::Range(parts.look_interval)),
            TimerPurpose::GraveFill => Some(TimerSpan::Fixed(parts.grave_fill_duration)),
            TimerPurpose::GraveRespawn => parts.grave_respawn_time.map(TimerSpan::Fixed),
            TimerPurpose::InfiniteGraveRespawn => {
                Some(TimerSpan::Fixed(parts.infinite_mode_grave_respawn_time))
            }
            TimerPurpose::BoxRespawn => Some(TimerSpan::Range(parts.box_respawn)),
            TimerPurpose::EnemyRespawn => parts.enemy_respawn_delay.map(TimerSpan::Fixed),
            TimerPurpose::EnemySpawn => Some(TimerSpan::Fixed(parts.spawn_interval)),
            TimerPurpose::AttackCooldown => Some(TimerSpan::Fixed(parts.attack_cooldown)),
        }
    }

    /// Reports whether both grave respawn constants are present and disagree.
    #[must_use]
    pub fn grave_respawn_discrepancy(&self) -> Option<(Duration, Duration)> {
        let base = self.parts.infinite_mode_grave_respawn_time;
        self.parts
            .grave_respawn_time
            .filter(|overlay| *overlay != base)
            .map(|overlay| (base, overlay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridPosition;

    fn parts() -> RuleSetParts {
        RuleSetParts {
            episode: Episode::Cemetery,
            difficulty: Difficulty::Infinite,
            grid: GridGeometry::new(10, 34, 32, (10, 17), (0, 64)),
            player: PlayerLimits::new(GridPosition::new(4, 30), 0, 33),
            interpolation_factor: 0.25,
            input_buffer_capacity: 3,
            attack_cooldown: Duration::from_millis(500),
            number_display_duration: Duration::from_millis(800),
            effect_animation_speed: Duration::from_millis(60),
            enemy_speed: SpawnRange::fixed(400.0),
            speed_increment: 0.05,
            spawn_interval: Duration::from_secs(3),
            max_enemies: 6,
            look_interval: SpawnRange::new(2_000.0, 4_000.0),
            grave_fill_duration: Duration::from_secs(30),
            infinite_mode_grave_respawn_time: Duration::from_millis(30_000),
            grave_respawn_time: Some(Duration::from_millis(33_333)),
            enemy_respawn_delay: None,
            box_respawn: SpawnRange::new(8_000.0, 15_000.0),
            wall_behavior: WallBehavior::Teleport,
            push_down_distance: 3,
            enemy_spawn: SpawnDistribution::new(vec![(EnemyKind::Zombie, 1.0)]),
            enemy_names: BTreeMap::new(),
            assets: Arc::new(AssetTable::new()),
        }
    }

    #[test]
    fn timer_spans_follow_purpose() {
        let rules = RuleSet::from_parts(parts());
        assert_eq!(
            rules.timer_span(TimerPurpose::LookDirection),
            Some(TimerSpan::Range(SpawnRange::new(2_000.0, 4_000.0)))
        );
        assert_eq!(
            rules.timer_span(TimerPurpose::GraveRespawn),
            Some(TimerSpan::from_millis(33_333))
        );
        assert_eq!(
            rules.timer_span(TimerPurpose::InfiniteGraveRespawn),
            Some(TimerSpan::from_millis(30_000))
        );
        assert_eq!(rules.timer_span(TimerPurpose::EnemyRespawn), None);
    }

    #[test]
    fn grave_respawn_discrepancy_is_reported_not_unified() {
        let rules = RuleSet::from_parts(parts());
        assert_eq!(
            rules.grave_respawn_discrepancy(),
            Some((Duration::from_millis(30_000), Duration::from_millis(33_333)))
        );

        let mut agreeing = parts();
        agreeing.grave_respawn_time = Some(Duration::from_millis(30_000));
        assert_eq!(RuleSet::from_parts(agreeing).grave_respawn_discrepancy(), None);
    }

    #[test]
    fn enemy_names_fall_back_to_labels() {
        let mut named = parts();
        let _ = named
            .enemy_names
            .insert(EnemyKind::Zombie, "Shambler".to_owned());
        let rules = RuleSet::from_parts(named);
        assert_eq!(rules.enemy_name(EnemyKind::Zombie), "Shambler");
        assert_eq!(rules.enemy_name(EnemyKind::Ghost), "ghost");
    }

    #[test]
    fn overlays_round_trip_through_bincode() {
        let overlay = DifficultyOverlay::extension(Difficulty::Infinite)
            .with("GRAVE_RESPAWN_TIME", FieldValue::Integer(33_333))
            .with("HUSSY_BOX_RESPAWN_MIN", FieldValue::Integer(6_000))
            .with(
                "ENEMY_SPAWN_WEIGHTS",
                FieldValue::weights([("zombie", 0.5), ("ghost", 0.5)]),
            );
        let bytes = bincode::serialize(&overlay).expect("serialize");
        let restored: DifficultyOverlay = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, overlay);
    }
}
