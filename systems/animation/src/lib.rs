#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maps asset keys and elapsed time onto concrete sprite frames.
//!
//! The resolver is a pure function of the active ruleset, the asset key, the
//! elapsed time and an optional facing. Hosts call it once per rendered frame
//! and forward the returned sound cue, if any, to their audio collaborator.

mod playback;

use std::time::Duration;

use gravewatch_core::{
    AssetBinding, AssetClass, AssetKey, Direction, Playback, RuleSet, SoundKey, VisualModifiers,
};
use thiserror::Error;

pub use playback::AnimationPlayback;

/// Concrete frame to draw for one animation at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameDescriptor<'a> {
    /// Sprite-sheet identifier.
    pub sheet: &'a str,
    /// Frame index within the sheet.
    pub frame: u32,
    /// Position of the frame within its sequence.
    pub position: usize,
    /// Set once a one-shot sequence has fully played; never set for loops.
    pub complete: bool,
    /// Sound cue to raise toward the audio host.
    pub sound: Option<SoundKey>,
    /// Presentation adjustments.
    pub modifiers: VisualModifiers,
}

/// How long frames of a binding stay on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameTiming {
    /// Each frame lasts the given duration.
    PerFrame(Duration),
    /// The whole sequence spans the given duration.
    Total(Duration),
}

/// Failure to resolve an animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// No binding is registered for the key.
    #[error("asset `{0}` is not bound")]
    UnboundAsset(AssetKey),
    /// The sequence selected for the facing has no frames.
    #[error("asset `{0}` has no frames to play")]
    EmptySequence(AssetKey),
}

/// Resolves frames against one ruleset's asset table and fallback timings.
#[derive(Clone, Copy, Debug)]
pub struct AnimationResolver<'r> {
    rules: &'r RuleSet,
}

impl<'r> AnimationResolver<'r> {
    /// Creates a resolver bound to the ruleset.
    #[must_use]
    pub const fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    fn binding(&self, key: AssetKey) -> Result<&'r AssetBinding, AnimationError> {
        self.rules
            .assets()
            .get(key)
            .ok_or(AnimationError::UnboundAsset(key))
    }

    /// Effective timing of the binding.
    ///
    /// A nonzero binding speed always wins. Otherwise score digits span the
    /// number display duration in total, while every other class advances one
    /// frame per effect animation step.
    pub fn timing(&self, key: AssetKey) -> Result<FrameTiming, AnimationError> {
        let binding = self.binding(key)?;
        Ok(self.timing_of(binding))
    }

    fn timing_of(&self, binding: &AssetBinding) -> FrameTiming {
        if binding.speed_ms() != 0 {
            return FrameTiming::PerFrame(Duration::from_millis(u64::from(binding.speed_ms())));
        }
        match binding.class() {
            AssetClass::NumericDisplay => FrameTiming::Total(self.rules.number_display_duration()),
            AssetClass::Effect | AssetClass::Character | AssetClass::Prop => {
                FrameTiming::PerFrame(self.rules.effect_animation_speed())
            }
        }
    }

    /// Sound cue bound to the asset, regardless of elapsed time.
    pub fn cue(&self, key: AssetKey) -> Result<Option<SoundKey>, AnimationError> {
        Ok(self.binding(key)?.sound())
    }

    /// Frame to draw `elapsed` after the animation started.
    ///
    /// The bound sound cue is reported only when `elapsed` is zero.
    pub fn frame_at(
        &self,
        key: AssetKey,
        elapsed: Duration,
        direction: Option<Direction>,
    ) -> Result<FrameDescriptor<'r>, AnimationError> {
        let binding = self.binding(key)?;
        let frames = binding.frames().resolve(direction);
        if frames.is_empty() {
            return Err(AnimationError::EmptySequence(key));
        }

        let len = frames.len() as u128;
        let looping = binding.playback() == Playback::Looping;
        let (step, complete) = match self.timing_of(binding) {
            FrameTiming::PerFrame(per_frame) => {
                let step = elapsed.as_nanos() / per_frame.as_nanos().max(1);
                (step, !looping && step >= len)
            }
            FrameTiming::Total(total) => {
                let total = total.as_nanos().max(1);
                let into = if looping {
                    elapsed.as_nanos() % total
                } else {
                    elapsed.as_nanos()
                };
                (into * len / total, !looping && elapsed.as_nanos() >= total)
            }
        };
        let wrapped = if looping { step % len } else { step.min(len - 1) };
        let position = wrapped as usize;

        Ok(FrameDescriptor {
            sheet: binding.sheet(),
            frame: frames[position],
            position,
            complete,
            sound: binding.sound().filter(|_| elapsed.is_zero()),
            modifiers: binding.modifiers(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, sync::Arc};

    use gravewatch_core::{
        AssetTable, Difficulty, Episode, FrameSequence, GridGeometry, GridPosition, PlayerLimits,
        RuleSetParts, SpawnDistribution, SpawnRange, WallBehavior,
    };

    use super::*;

    fn rules_with(assets: AssetTable) -> RuleSet {
        RuleSet::from_parts(RuleSetParts {
            episode: Episode::Cemetery,
            difficulty: Difficulty::Normal,
            grid: GridGeometry::new(10, 34, 32, (10, 17), (0, 64)),
            player: PlayerLimits::new(GridPosition::new(4, 30), 0, 33),
            interpolation_factor: 0.25,
            input_buffer_capacity: 3,
            attack_cooldown: Duration::from_millis(500),
            number_display_duration: Duration::from_millis(1_000),
            effect_animation_speed: Duration::from_millis(100),
            enemy_speed: SpawnRange::fixed(400.0),
            speed_increment: 0.05,
            spawn_interval: Duration::from_secs(3),
            max_enemies: 6,
            look_interval: SpawnRange::new(2_000.0, 4_000.0),
            grave_fill_duration: Duration::from_secs(30),
            infinite_mode_grave_respawn_time: Duration::from_secs(30),
            grave_respawn_time: None,
            enemy_respawn_delay: None,
            box_respawn: SpawnRange::new(8_000.0, 15_000.0),
            wall_behavior: WallBehavior::Teleport,
            push_down_distance: 3,
            enemy_spawn: SpawnDistribution::new(Vec::new()),
            enemy_names: BTreeMap::new(),
            assets: Arc::new(assets),
        })
    }

    #[test]
    fn fallback_kinds_are_not_conflated() {
        let rules = rules_with(
            AssetTable::new()
                .with(
                    AssetKey::NumberDigits,
                    AssetBinding::new(
                        "digits",
                        AssetClass::NumericDisplay,
                        Playback::OneShot,
                        FrameSequence::run(0, 4),
                    ),
                )
                .with(
                    AssetKey::ExplosionAnim,
                    AssetBinding::new(
                        "boom",
                        AssetClass::Effect,
                        Playback::OneShot,
                        FrameSequence::run(0, 4),
                    ),
                ),
        );
        let resolver = AnimationResolver::new(&rules);

        assert_eq!(
            resolver.timing(AssetKey::NumberDigits),
            Ok(FrameTiming::Total(Duration::from_millis(1_000)))
        );
        assert_eq!(
            resolver.timing(AssetKey::ExplosionAnim),
            Ok(FrameTiming::PerFrame(Duration::from_millis(100)))
        );

        let digits = resolver
            .frame_at(AssetKey::NumberDigits, Duration::from_millis(500), None)
            .expect("digits resolve");
        assert_eq!(digits.position, 2);
        assert!(!digits.complete);

        let explosion = resolver
            .frame_at(AssetKey::ExplosionAnim, Duration::from_millis(500), None)
            .expect("explosion resolves");
        assert_eq!(explosion.position, 3);
        assert!(explosion.complete);
    }

    #[test]
    fn unbound_keys_are_reported() {
        let rules = rules_with(AssetTable::new());
        let resolver = AnimationResolver::new(&rules);
        assert_eq!(
            resolver.frame_at(AssetKey::WinAnim, Duration::ZERO, None),
            Err(AnimationError::UnboundAsset(AssetKey::WinAnim))
        );
    }
}
