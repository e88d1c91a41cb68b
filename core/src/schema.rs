use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Canonical fields of a resolved ruleset.
///
/// Overlays and bases refer to these by their uppercase wire name. A field is
/// either required, in which case every base configuration must declare it,
/// or an extension, in which case it may only be introduced by an overlay
/// flagged as an extension overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleField {
    /// Number of grid columns.
    GridWidth,
    /// Number of grid rows.
    GridHeight,
    /// Side length of one cell in pixels.
    CellSize,
    /// Visible columns.
    CameraWidth,
    /// Visible rows.
    CameraHeight,
    /// Horizontal pixel offset of the play area.
    PlayAreaX,
    /// Vertical pixel offset of the play area.
    PlayAreaY,
    /// Column the player spawns in.
    PlayerStartX,
    /// Row the player spawns in.
    PlayerStartY,
    /// Topmost row the player may occupy.
    PlayerMinRow,
    /// Bottommost row the player may occupy.
    PlayerMaxRow,
    /// Fraction of the remaining distance covered per rendered frame.
    InterpolationFactor,
    /// Number of buffered direction inputs.
    InputBufferSize,
    /// Minimum delay between two player attacks.
    AttackCooldown,
    /// Total time a score popup stays on screen.
    NumberDisplayDuration,
    /// Fallback per-frame duration for effect animations.
    EffectAnimationSpeed,
    /// Milliseconds an enemy waits between steps, as a range.
    EnemySpeed,
    /// Fractional speed-up applied per progression step.
    SpeedIncrement,
    /// Delay between enemy spawns.
    SpawnInterval,
    /// Upper bound on simultaneously active enemies.
    MaxEnemies,
    /// Interval between enemy look-direction changes, as a range.
    LookDirectionInterval,
    /// Time a filled grave stays filled.
    GraveFillDuration,
    /// Base-level grave respawn constant used by infinite mode.
    InfiniteModeGraveRespawnTime,
    /// Grave respawn timer introduced by the infinite overlay.
    GraveRespawnTime,
    /// Delay before a defeated enemy returns, introduced by extension overlays.
    EnemyRespawnDelay,
    /// Interval before an opened box refills, as a range.
    HussyBoxRespawn,
    /// Boundary-crossing behavior name.
    WallBehavior,
    /// Rows an actor is pushed down by the `push_down` behavior.
    PushDownDistance,
    /// Categorical weights used to pick spawned enemy kinds.
    EnemySpawnWeights,
}

impl RuleField {
    /// Every field in schema order.
    pub const ALL: [RuleField; 29] = [
        RuleField::GridWidth,
        RuleField::GridHeight,
        RuleField::CellSize,
        RuleField::CameraWidth,
        RuleField::CameraHeight,
        RuleField::PlayAreaX,
        RuleField::PlayAreaY,
        RuleField::PlayerStartX,
        RuleField::PlayerStartY,
        RuleField::PlayerMinRow,
        RuleField::PlayerMaxRow,
        RuleField::InterpolationFactor,
        RuleField::InputBufferSize,
        RuleField::AttackCooldown,
        RuleField::NumberDisplayDuration,
        RuleField::EffectAnimationSpeed,
        RuleField::EnemySpeed,
        RuleField::SpeedIncrement,
        RuleField::SpawnInterval,
        RuleField::MaxEnemies,
        RuleField::LookDirectionInterval,
        RuleField::GraveFillDuration,
        RuleField::InfiniteModeGraveRespawnTime,
        RuleField::GraveRespawnTime,
        RuleField::EnemyRespawnDelay,
        RuleField::HussyBoxRespawn,
        RuleField::WallBehavior,
        RuleField::PushDownDistance,
        RuleField::EnemySpawnWeights,
    ];

    /// Uppercase wire name of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GridWidth => "GRID_WIDTH",
            Self::GridHeight => "GRID_HEIGHT",
            Self::CellSize => "CELL_SIZE",
            Self::CameraWidth => "CAMERA_WIDTH",
            Self::CameraHeight => "CAMERA_HEIGHT",
            Self::PlayAreaX => "PLAY_AREA_X",
            Self::PlayAreaY => "PLAY_AREA_Y",
            Self::PlayerStartX => "PLAYER_START_X",
            Self::PlayerStartY => "PLAYER_START_Y",
            Self::PlayerMinRow => "PLAYER_MIN_ROW",
            Self::PlayerMaxRow => "PLAYER_MAX_ROW",
            Self::InterpolationFactor => "INTERPOLATION_FACTOR",
            Self::InputBufferSize => "INPUT_BUFFER_SIZE",
            Self::AttackCooldown => "ATTACK_COOLDOWN",
            Self::NumberDisplayDuration => "NUMBER_DISPLAY_DURATION",
            Self::EffectAnimationSpeed => "EFFECT_ANIMATION_SPEED",
            Self::EnemySpeed => "ENEMY_SPEED",
            Self::SpeedIncrement => "SPEED_INCREMENT",
            Self::SpawnInterval => "SPAWN_INTERVAL",
            Self::MaxEnemies => "MAX_ENEMIES",
            Self::LookDirectionInterval => "LOOK_DIRECTION_INTERVAL",
            Self::GraveFillDuration => "GRAVE_FILL_DURATION",
            Self::InfiniteModeGraveRespawnTime => "INFINITE_MODE_GRAVE_RESPAWN_TIME",
            Self::GraveRespawnTime => "GRAVE_RESPAWN_TIME",
            Self::EnemyRespawnDelay => "ENEMY_RESPAWN_DELAY",
            Self::HussyBoxRespawn => "HUSSY_BOX_RESPAWN",
            Self::WallBehavior => "WALL_BEHAVIOR",
            Self::PushDownDistance => "PUSH_DOWN_DISTANCE",
            Self::EnemySpawnWeights => "ENEMY_SPAWN_WEIGHTS",
        }
    }

    /// Shape of value the field accepts.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::GridWidth
            | Self::GridHeight
            | Self::CellSize
            | Self::CameraWidth
            | Self::CameraHeight
            | Self::PlayAreaX
            | Self::PlayAreaY
            | Self::PlayerStartX
            | Self::PlayerStartY
            | Self::PlayerMinRow
            | Self::PlayerMaxRow
            | Self::InputBufferSize
            | Self::MaxEnemies
            | Self::PushDownDistance => FieldKind::Integer,
            Self::AttackCooldown
            | Self::NumberDisplayDuration
            | Self::EffectAnimationSpeed
            | Self::SpawnInterval
            | Self::GraveFillDuration
            | Self::InfiniteModeGraveRespawnTime
            | Self::GraveRespawnTime
            | Self::EnemyRespawnDelay => FieldKind::Duration,
            Self::InterpolationFactor | Self::SpeedIncrement => FieldKind::Float,
            Self::EnemySpeed | Self::LookDirectionInterval | Self::HussyBoxRespawn => {
                FieldKind::Range
            }
            Self::WallBehavior => FieldKind::Text,
            Self::EnemySpawnWeights => FieldKind::Weights,
        }
    }

    /// Reports whether the field may be absent from a base configuration.
    #[must_use]
    pub const fn is_extension(self) -> bool {
        matches!(self, Self::GraveRespawnTime | Self::EnemyRespawnDelay)
    }

    /// Looks up a field by its exact wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of value a [`RuleField`] accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Whole number.
    Integer,
    /// Whole number of milliseconds.
    Duration,
    /// Real number.
    Float,
    /// Free-form identifier resolved into a closed enumeration.
    Text,
    /// Closed `[min, max]` interval.
    Range,
    /// Ordered `(label, weight)` pairs.
    Weights,
}

impl FieldKind {
    /// Human-readable description used in error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Integer => "an integer",
            Self::Duration => "a duration in milliseconds",
            Self::Float => "a number",
            Self::Text => "a string",
            Self::Range => "a {min, max} range",
            Self::Weights => "a list of weighted labels",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Raw value carried by a base configuration or an overlay entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Whole number, also used for millisecond durations.
    Integer(i64),
    /// Real number.
    Float(f64),
    /// Identifier such as a wall behavior name.
    Text(String),
    /// Closed interval.
    Range {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// Ordered `(label, weight)` pairs.
    Weights(Vec<(String, f64)>),
}

impl FieldValue {
    /// Convenience constructor for text values.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Convenience constructor for range values.
    #[must_use]
    pub const fn range(min: f64, max: f64) -> Self {
        Self::Range { min, max }
    }

    /// Convenience constructor for weight tables.
    #[must_use]
    pub fn weights<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self::Weights(
            entries
                .into_iter()
                .map(|(label, weight)| (label.to_owned(), weight))
                .collect(),
        )
    }

    /// Short name of the value's shape, used in kind mismatch reports.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Range { .. } => "range",
            Self::Weights(_) => "weights",
        }
    }

    /// Numeric view of scalar values.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
}

/// Which bound of a range a split overlay key addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The `_MIN` suffix.
    Lower,
    /// The `_MAX` suffix.
    Upper,
}

/// Parsed overlay key: the targeted field and, for split spellings, the bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey {
    field: RuleField,
    bound: Option<Bound>,
}

impl FieldKey {
    /// Parses an overlay key.
    ///
    /// Exact wire names address the whole field. Range fields additionally
    /// accept `<NAME>_MIN` and `<NAME>_MAX`, each addressing one bound.
    pub fn parse(key: &str) -> Result<Self, SchemaError> {
        if let Some(field) = RuleField::from_name(key) {
            return Ok(Self { field, bound: None });
        }

        let split = key
            .strip_suffix("_MIN")
            .map(|stem| (stem, Bound::Lower))
            .or_else(|| key.strip_suffix("_MAX").map(|stem| (stem, Bound::Upper)));

        let Some((stem, bound)) = split else {
            return Err(SchemaError::UnknownField {
                key: key.to_owned(),
            });
        };

        let Some(field) = RuleField::from_name(stem) else {
            return Err(SchemaError::UnknownField {
                key: key.to_owned(),
            });
        };

        if field.kind() != FieldKind::Range {
            return Err(SchemaError::SplitBoundOnScalar {
                key: key.to_owned(),
                field,
            });
        }

        Ok(Self {
            field,
            bound: Some(bound),
        })
    }

    /// Field addressed by the key.
    #[must_use]
    pub const fn field(&self) -> RuleField {
        self.field
    }

    /// Bound addressed by a split key, if any.
    #[must_use]
    pub const fn bound(&self) -> Option<Bound> {
        self.bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_parses_from_its_name() {
        for field in RuleField::ALL {
            let key = FieldKey::parse(field.name()).expect("canonical name parses");
            assert_eq!(key.field(), field);
            assert_eq!(key.bound(), None);
        }
    }

    #[test]
    fn split_keys_address_range_bounds() {
        let lower = FieldKey::parse("HUSSY_BOX_RESPAWN_MIN").expect("lower bound");
        assert_eq!(lower.field(), RuleField::HussyBoxRespawn);
        assert_eq!(lower.bound(), Some(Bound::Lower));

        let upper = FieldKey::parse("ENEMY_SPEED_MAX").expect("upper bound");
        assert_eq!(upper.field(), RuleField::EnemySpeed);
        assert_eq!(upper.bound(), Some(Bound::Upper));
    }

    #[test]
    fn split_keys_on_scalars_are_rejected() {
        assert_eq!(
            FieldKey::parse("SPAWN_INTERVAL_MAX"),
            Err(SchemaError::SplitBoundOnScalar {
                key: "SPAWN_INTERVAL_MAX".to_owned(),
                field: RuleField::SpawnInterval,
            })
        );
    }

    #[test]
    fn misspelled_keys_are_unknown() {
        assert_eq!(
            FieldKey::parse("WALL_BEHAVIOUR"),
            Err(SchemaError::UnknownField {
                key: "WALL_BEHAVIOUR".to_owned()
            })
        );
        assert!(FieldKey::parse("GRID_WIDHT_MIN").is_err());
    }

    #[test]
    fn extension_fields_are_not_required() {
        let extensions: Vec<_> = RuleField::ALL
            .into_iter()
            .filter(|field| field.is_extension())
            .collect();
        assert_eq!(
            extensions,
            vec![RuleField::GraveRespawnTime, RuleField::EnemyRespawnDelay]
        );
    }
}
