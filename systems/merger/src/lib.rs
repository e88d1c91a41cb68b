#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Resolves a difficulty overlay onto an episode's base configuration.
//!
//! Merging is shallow and per field: every overlay entry replaces the base
//! value for its field, and fields the overlay does not mention keep the base
//! value. Range fields may also be patched one bound at a time through the
//! `<NAME>_MIN` and `<NAME>_MAX` spellings. Every structural and domain check
//! runs before a [`RuleSet`] is produced, so a broken configuration never
//! reaches gameplay.

mod reader;

use std::collections::HashSet;

use gravewatch_core::{
    BaseConfig, Bound, ConfigError, DifficultyOverlay, FieldKey, FieldKind, FieldTable,
    FieldValue, GridGeometry, GridPosition, PlayerLimits, RuleField, RuleSet, RuleSetParts,
    SchemaError,
};
use gravewatch_system_selection::WeightedSelector;
use reader::{mismatch, mismatch_as, out_of_range, FieldReader};
use tracing::{debug, trace, warn};

/// Pure merger producing immutable rulesets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConfigMerger {
    selector: WeightedSelector,
}

impl ConfigMerger {
    /// Creates a merger that validates distributions with the default selector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selector: WeightedSelector::new(),
        }
    }

    /// Creates a merger that validates distributions with the given selector.
    #[must_use]
    pub const fn with_selector(selector: WeightedSelector) -> Self {
        Self { selector }
    }

    /// Merges the overlay onto the base and validates the result.
    pub fn resolve(
        &self,
        base: &BaseConfig,
        overlay: &DifficultyOverlay,
    ) -> Result<RuleSet, ConfigError> {
        ensure_required_fields(base)?;
        let fields = apply_overlay(base, overlay)?;
        let rules = self.build(base, overlay, &fields)?;
        base.assets().validate()?;

        debug!(
            episode = %rules.episode(),
            difficulty = %rules.difficulty(),
            overrides = overlay.entries().len(),
            wall_behavior = %rules.wall_behavior(),
            "resolved ruleset"
        );
        if let Some((base_ms, overlay_ms)) = rules.grave_respawn_discrepancy() {
            warn!(
                episode = %rules.episode(),
                difficulty = %rules.difficulty(),
                infinite_mode_grave_respawn_ms = base_ms.as_millis() as u64,
                grave_respawn_ms = overlay_ms.as_millis() as u64,
                "grave respawn constants disagree; both timers are kept"
            );
        }
        Ok(rules)
    }

    fn build(
        &self,
        base: &BaseConfig,
        overlay: &DifficultyOverlay,
        fields: &FieldTable,
    ) -> Result<RuleSet, ConfigError> {
        let read = FieldReader::new(base.episode(), fields, &self.selector);

        let width = read.count(RuleField::GridWidth, 1, "must be positive")?;
        let height = read.count(RuleField::GridHeight, 1, "must be positive")?;
        let cell_size = read.count(RuleField::CellSize, 1, "must be positive")?;
        let camera_width = read.count(RuleField::CameraWidth, 1, "must be positive")?;
        let camera_height = read.count(RuleField::CameraHeight, 1, "must be positive")?;
        if camera_width > width {
            return Err(out_of_range(
                RuleField::CameraWidth,
                f64::from(camera_width),
                "must not exceed GRID_WIDTH",
            ));
        }
        if camera_height > height {
            return Err(out_of_range(
                RuleField::CameraHeight,
                f64::from(camera_height),
                "must not exceed GRID_HEIGHT",
            ));
        }
        let origin = (
            read.count(RuleField::PlayAreaX, 0, "must not be negative")?,
            read.count(RuleField::PlayAreaY, 0, "must not be negative")?,
        );
        let grid = GridGeometry::new(
            width,
            height,
            cell_size,
            (camera_width, camera_height),
            origin,
        );

        let player = read_player(&read, &grid)?;

        let interpolation_factor = read.float(RuleField::InterpolationFactor)?;
        if interpolation_factor <= 0.0 || interpolation_factor > 1.0 {
            return Err(out_of_range(
                RuleField::InterpolationFactor,
                interpolation_factor,
                "must lie in (0, 1]",
            ));
        }
        let speed_increment = read.float(RuleField::SpeedIncrement)?;
        if speed_increment < 0.0 {
            return Err(out_of_range(
                RuleField::SpeedIncrement,
                speed_increment,
                "must not be negative",
            ));
        }

        let parts = RuleSetParts {
            episode: base.episode(),
            difficulty: overlay.difficulty(),
            grid,
            player,
            interpolation_factor: interpolation_factor as f32,
            input_buffer_capacity: read.count(RuleField::InputBufferSize, 1, "must be at least 1")?
                as usize,
            attack_cooldown: read.duration(RuleField::AttackCooldown, 0, "must not be negative")?,
            number_display_duration: read.duration(
                RuleField::NumberDisplayDuration,
                1,
                "must be positive",
            )?,
            effect_animation_speed: read.duration(
                RuleField::EffectAnimationSpeed,
                1,
                "must be positive",
            )?,
            enemy_speed: read.range(RuleField::EnemySpeed)?,
            speed_increment,
            spawn_interval: read.duration(RuleField::SpawnInterval, 1, "must be positive")?,
            max_enemies: read.count(RuleField::MaxEnemies, 1, "must be at least 1")?,
            look_interval: read.range(RuleField::LookDirectionInterval)?,
            grave_fill_duration: read.duration(
                RuleField::GraveFillDuration,
                0,
                "must not be negative",
            )?,
            infinite_mode_grave_respawn_time: read.duration(
                RuleField::InfiniteModeGraveRespawnTime,
                0,
                "must not be negative",
            )?,
            grave_respawn_time: read.optional_duration(RuleField::GraveRespawnTime)?,
            enemy_respawn_delay: read.optional_duration(RuleField::EnemyRespawnDelay)?,
            box_respawn: read.range(RuleField::HussyBoxRespawn)?,
            wall_behavior: read.wall_behavior(RuleField::WallBehavior)?,
            push_down_distance: read.count(RuleField::PushDownDistance, 1, "must be at least 1")?,
            enemy_spawn: read.enemy_weights(RuleField::EnemySpawnWeights)?,
            enemy_names: base.enemy_names().clone(),
            assets: base.assets().clone(),
        };
        Ok(RuleSet::from_parts(parts))
    }
}

fn ensure_required_fields(base: &BaseConfig) -> Result<(), SchemaError> {
    RuleField::ALL
        .into_iter()
        .filter(|field| !field.is_extension())
        .find(|field| !base.fields().contains(*field))
        .map_or(Ok(()), |field| {
            Err(SchemaError::MissingField {
                episode: base.episode(),
                field,
            })
        })
}

fn apply_overlay(
    base: &BaseConfig,
    overlay: &DifficultyOverlay,
) -> Result<FieldTable, ConfigError> {
    let mut fields = base.fields().clone();
    let mut addressed = HashSet::new();

    for (key, value) in overlay.entries() {
        let parsed = FieldKey::parse(key)?;
        let field = parsed.field();
        if !addressed.insert((field, parsed.bound())) {
            return Err(SchemaError::DuplicateField {
                key: key.clone(),
                difficulty: overlay.difficulty(),
            }
            .into());
        }
        let conflicts = match parsed.bound() {
            None => {
                addressed.contains(&(field, Some(Bound::Lower)))
                    || addressed.contains(&(field, Some(Bound::Upper)))
            }
            Some(_) => addressed.contains(&(field, None)),
        };
        if conflicts {
            return Err(SchemaError::ConflictingKeys {
                field,
                difficulty: overlay.difficulty(),
            }
            .into());
        }

        if !base.fields().contains(field) && !overlay.is_extension() {
            return Err(SchemaError::UndeclaredExtension {
                field,
                difficulty: overlay.difficulty(),
            }
            .into());
        }

        match parsed.bound() {
            None => {
                let _ = fields.insert(field, value.clone());
            }
            Some(bound) => patch_bound(base, &mut fields, field, bound, value)?,
        }
        trace!(key = key.as_str(), field = %field, "applied overlay entry");
    }
    Ok(fields)
}

fn patch_bound(
    base: &BaseConfig,
    fields: &mut FieldTable,
    field: RuleField,
    bound: Bound,
    value: &FieldValue,
) -> Result<(), ConfigError> {
    let number = value
        .as_number()
        .ok_or_else(|| mismatch_as(field, FieldKind::Float, value))?;

    let Some(current) = fields.get_mut(field) else {
        return Err(SchemaError::MissingField {
            episode: base.episode(),
            field,
        }
        .into());
    };

    let (min, max) = match &*current {
        FieldValue::Range { min, max } => (*min, *max),
        FieldValue::Integer(fixed) => (*fixed as f64, *fixed as f64),
        FieldValue::Float(fixed) => (*fixed, *fixed),
        other => return Err(mismatch(field, other)),
    };
    *current = match bound {
        Bound::Lower => FieldValue::range(number, max),
        Bound::Upper => FieldValue::range(min, number),
    };
    Ok(())
}

fn read_player(read: &FieldReader<'_>, grid: &GridGeometry) -> Result<PlayerLimits, ConfigError> {
    let start = GridPosition::new(
        read.count(RuleField::PlayerStartX, 0, "must not be negative")?,
        read.count(RuleField::PlayerStartY, 0, "must not be negative")?,
    );
    let min_row = read.count(RuleField::PlayerMinRow, 0, "must not be negative")?;
    let max_row = read.count(RuleField::PlayerMaxRow, 0, "must not be negative")?;

    if start.x() >= grid.width() {
        return Err(out_of_range(
            RuleField::PlayerStartX,
            f64::from(start.x()),
            "must lie within the grid",
        ));
    }
    if max_row >= grid.height() {
        return Err(out_of_range(
            RuleField::PlayerMaxRow,
            f64::from(max_row),
            "must lie within the grid",
        ));
    }
    if min_row > max_row {
        return Err(out_of_range(
            RuleField::PlayerMinRow,
            f64::from(min_row),
            "must not exceed PLAYER_MAX_ROW",
        ));
    }
    if start.y() < min_row || start.y() > max_row {
        return Err(out_of_range(
            RuleField::PlayerStartY,
            f64::from(start.y()),
            "must lie between PLAYER_MIN_ROW and PLAYER_MAX_ROW",
        ));
    }
    Ok(PlayerLimits::new(start, min_row, max_row))
}
