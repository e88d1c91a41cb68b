use std::time::Duration;

use gravewatch_catalog::{base_config, overlay};
use gravewatch_core::{AssetKey, Difficulty, Direction, EnemyKind, Episode, RuleSet, SoundKey};
use gravewatch_system_animation::{AnimationPlayback, AnimationResolver, FrameTiming};
use gravewatch_system_merger::ConfigMerger;

fn rules() -> RuleSet {
    ConfigMerger::new()
        .resolve(
            &base_config(Episode::Cemetery),
            &overlay(Episode::Cemetery, Difficulty::Normal),
        )
        .expect("shipped configuration resolves")
}

#[test]
fn death_animation_starts_with_game_over_cue() {
    let rules = rules();
    let resolver = AnimationResolver::new(&rules);

    let first = resolver
        .frame_at(AssetKey::DeathAnim, Duration::ZERO, None)
        .expect("death animation is bound");
    assert_eq!(first.position, 0);
    assert_eq!(first.frame, 0);
    assert_eq!(first.sound, Some(SoundKey::GameOver));
    assert_eq!(first.sound.map(SoundKey::name), Some("gameOver"));
    assert!(!first.complete);
    assert!(first.modifiers.monochrome);

    let later = resolver
        .frame_at(AssetKey::DeathAnim, Duration::from_millis(50), None)
        .expect("death animation is bound");
    assert_eq!(later.position, 1);
    assert_eq!(later.sound, None, "the cue is raised only at zero");
}

#[test]
fn death_animation_completes_after_eight_frames() {
    let rules = rules();
    let resolver = AnimationResolver::new(&rules);

    let almost = resolver
        .frame_at(AssetKey::DeathAnim, Duration::from_millis(8 * 50 - 1), None)
        .expect("death animation is bound");
    assert_eq!(almost.position, 7);
    assert!(!almost.complete);

    let done = resolver
        .frame_at(AssetKey::DeathAnim, Duration::from_millis(8 * 50), None)
        .expect("death animation is bound");
    assert_eq!(done.position, 7);
    assert_eq!(done.frame, 7);
    assert!(done.complete);

    let long_after = resolver
        .frame_at(AssetKey::DeathAnim, Duration::from_secs(60), None)
        .expect("death animation is bound");
    assert_eq!(long_after.position, 7, "one-shot sequences clamp");
}

#[test]
fn zero_speed_effects_use_effect_animation_speed() {
    let rules = rules();
    let resolver = AnimationResolver::new(&rules);
    assert_eq!(
        resolver.timing(AssetKey::SpawnAnim),
        Ok(FrameTiming::PerFrame(rules.effect_animation_speed()))
    );

    let per_frame = rules.effect_animation_speed();
    let spawn_done = resolver
        .frame_at(AssetKey::SpawnAnim, per_frame * 6, None)
        .expect("spawn animation is bound");
    assert!(spawn_done.complete);
    assert_eq!(spawn_done.position, 5);
}

#[test]
fn score_digits_span_the_number_display_duration() {
    let rules = rules();
    let resolver = AnimationResolver::new(&rules);
    let total = rules.number_display_duration();
    assert_eq!(
        resolver.timing(AssetKey::NumberDigits),
        Ok(FrameTiming::Total(total))
    );

    let halfway = resolver
        .frame_at(AssetKey::NumberDigits, total / 2, None)
        .expect("digits are bound");
    assert_eq!(halfway.position, 5);
    assert!(!halfway.complete);

    let finished = resolver
        .frame_at(AssetKey::NumberDigits, total, None)
        .expect("digits are bound");
    assert_eq!(finished.position, 9);
    assert!(finished.complete);
}

#[test]
fn looping_sprites_wrap_and_follow_facing() {
    let rules = rules();
    let resolver = AnimationResolver::new(&rules);
    let key = AssetKey::EnemySprite(EnemyKind::Skeleton);

    let facing_left = resolver
        .frame_at(key, Duration::from_millis(150 * 4), Some(Direction::Left))
        .expect("skeleton is bound");
    assert_eq!(facing_left.position, 1);
    assert_eq!(facing_left.frame, 10);
    assert!(!facing_left.complete, "loops never complete");

    let unfaced = resolver
        .frame_at(key, Duration::ZERO, None)
        .expect("skeleton is bound");
    assert_eq!(unfaced.frame, 6, "unfaced sprites look down");
}

#[test]
fn playback_surfaces_cue_once_even_when_first_seen_late() {
    let rules = rules();
    let resolver = AnimationResolver::new(&rules);
    let mut playback = AnimationPlayback::new(AssetKey::WinAnim, None);

    playback.advance(Duration::from_millis(30));
    let first = playback.frame(&resolver).expect("win animation is bound");
    assert_eq!(first.sound, Some(SoundKey::Win));
    assert_eq!(first.modifiers.scale, 1.5);

    playback.advance(Duration::from_millis(80));
    let second = playback.frame(&resolver).expect("win animation is bound");
    assert_eq!(second.sound, None);
    assert_eq!(second.position, 1);

    playback.restart();
    let replay = playback.frame(&resolver).expect("win animation is bound");
    assert_eq!(replay.sound, Some(SoundKey::Win));
    assert_eq!(replay.position, 0);
}

#[test]
fn turning_a_playback_switches_sequence_without_rewinding() {
    let rules = rules();
    let resolver = AnimationResolver::new(&rules);
    let mut playback = AnimationPlayback::new(AssetKey::EnemySprite(EnemyKind::Skeleton), None);

    let down = playback.frame(&resolver).expect("skeleton is bound");
    assert_eq!(down.frame, 6);

    playback.advance(Duration::from_millis(150));
    playback.advance(Duration::from_millis(150));
    assert_eq!(playback.elapsed(), Duration::from_millis(300));

    playback.face(Direction::Left);
    assert_eq!(playback.elapsed(), Duration::from_millis(300));
    playback.advance(Duration::from_millis(300));
    let left = playback.frame(&resolver).expect("skeleton is bound");
    assert_eq!(left.position, 1);
    assert_eq!(left.frame, 10);
}
