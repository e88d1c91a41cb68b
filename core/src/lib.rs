#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gravewatch rules engine.
//!
//! This crate defines the configuration schema that every episode is written
//! against, the immutable [`RuleSet`] produced by merging a difficulty overlay
//! onto a base configuration, and the small value types (directions, grid
//! positions, timer identities, asset bindings) that the pure systems consume.
//! Nothing in here performs I/O or holds mutable gameplay state; systems read
//! these values and adapters feed them in.

mod assets;
mod direction;
mod distribution;
mod errors;
mod grid;
mod rules;
mod schema;
mod timer;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use assets::{
    AssetBinding, AssetClass, AssetKey, AssetTable, DirectionalFrames, FrameSequence, Playback,
    SoundKey, VisualModifiers,
};
pub use direction::{Direction, DirectionVector, KeyLayout};
pub use distribution::{SpawnDistribution, SpawnRange, WEIGHT_EPSILON};
pub use errors::{
    AssetError, ConfigError, RangeError, SchemaError, UnknownNameError, UnknownWallBehaviorError,
    ValidationError,
};
pub use grid::{Boundary, GridGeometry, GridPosition, PlayerLimits, WallBehavior};
pub use rules::{BaseConfig, DifficultyOverlay, FieldTable, RuleSet, RuleSetParts};
pub use schema::{Bound, FieldKey, FieldKind, FieldValue, RuleField};
pub use timer::{OwnerId, StartPolicy, TimerKey, TimerPurpose, TimerSpan};

/// Episode variants that ship their own configuration set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Episode {
    /// The open-air graveyard episode.
    Cemetery,
    /// The underground episode with tighter walls.
    Catacombs,
}

impl Episode {
    /// Every episode in declaration order.
    pub const ALL: [Episode; 2] = [Episode::Cemetery, Episode::Catacombs];

    /// Lowercase identifier used by hosts and configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cemetery => "cemetery",
            Self::Catacombs => "catacombs",
        }
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Episode {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|episode| episode.name() == value)
            .ok_or_else(|| SchemaError::UnknownEpisode {
                name: value.to_owned(),
            })
    }
}

/// Difficulty presets a player can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Slow enemies and long look intervals.
    Easy,
    /// The base ruleset with light adjustments.
    Normal,
    /// Fast, variable-speed enemies.
    Hard,
    /// Endless mode; its overlay is allowed to introduce extension fields.
    Infinite,
}

impl Difficulty {
    /// Every difficulty in declaration order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Infinite,
    ];

    /// Lowercase identifier used by hosts and configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Infinite => "infinite",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name() == value)
            .ok_or_else(|| SchemaError::UnknownDifficulty {
                name: value.to_owned(),
            })
    }
}

/// Enemy archetypes that can be drawn from a spawn distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Slow walker that patrols the lower rows.
    Zombie,
    /// Standard chaser.
    Skeleton,
    /// Chaser that ignores graves.
    Ghost,
    /// Heavy chaser found deeper in the catacombs.
    Mummy,
}

impl EnemyKind {
    /// Every enemy kind in declaration order.
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Zombie,
        EnemyKind::Skeleton,
        EnemyKind::Ghost,
        EnemyKind::Mummy,
    ];

    /// Lowercase label used in spawn-weight tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Zombie => "zombie",
            Self::Skeleton => "skeleton",
            Self::Ghost => "ghost",
            Self::Mummy => "mummy",
        }
    }

    /// Resolves a spawn-weight label into an enemy kind.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
