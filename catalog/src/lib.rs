#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shipped configuration for both Gravewatch episodes.
//!
//! The shared shape is written once in [`base_config`]; each episode only
//! supplies the fields where it departs from the common defaults. Overlays are
//! returned with raw string keys exactly as a data file would carry them, so
//! the merger applies the same schema checks to shipped and host-provided
//! overlays alike.

mod assets;
mod fields;

use std::{collections::BTreeMap, sync::Arc};

use gravewatch_core::{
    AssetTable, BaseConfig, Difficulty, DifficultyOverlay, EnemyKind, Episode,
};

/// Base configuration of the episode with its shared asset table.
#[must_use]
pub fn base_config(episode: Episode) -> BaseConfig {
    BaseConfig::new(
        episode,
        fields::base_fields(episode),
        Arc::new(asset_table(episode)),
        enemy_names(episode),
    )
}

/// Difficulty overlay shipped with the episode.
#[must_use]
pub fn overlay(episode: Episode, difficulty: Difficulty) -> DifficultyOverlay {
    fields::overlay(episode, difficulty)
}

/// Every shipped overlay of the episode, in difficulty order.
#[must_use]
pub fn overlays(episode: Episode) -> Vec<DifficultyOverlay> {
    Difficulty::ALL
        .into_iter()
        .map(|difficulty| overlay(episode, difficulty))
        .collect()
}

/// Sprite and animation bindings of the episode.
#[must_use]
pub fn asset_table(episode: Episode) -> AssetTable {
    assets::table(episode)
}

/// Display names of the enemy kinds as shown in the episode.
#[must_use]
pub fn enemy_names(episode: Episode) -> BTreeMap<EnemyKind, String> {
    let names: [(EnemyKind, &str); 4] = match episode {
        Episode::Cemetery => [
            (EnemyKind::Zombie, "Shambler"),
            (EnemyKind::Skeleton, "Rattlebones"),
            (EnemyKind::Ghost, "Wisp"),
            (EnemyKind::Mummy, "Wrapped One"),
        ],
        Episode::Catacombs => [
            (EnemyKind::Zombie, "Crypt Walker"),
            (EnemyKind::Skeleton, "Bone Guard"),
            (EnemyKind::Ghost, "Shade"),
            (EnemyKind::Mummy, "Pharaoh"),
        ],
    };
    names
        .into_iter()
        .map(|(kind, name)| (kind, name.to_owned()))
        .collect()
}
