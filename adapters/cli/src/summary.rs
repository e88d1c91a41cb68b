use std::{fmt::Write as _, time::Duration};

use gravewatch_core::{RuleSet, SpawnRange, TimerPurpose, TimerSpan};
use gravewatch_system_animation::{AnimationResolver, FrameTiming};

const TIMER_PURPOSES: [TimerPurpose; 8] = [
    TimerPurpose::LookDirection,
    TimerPurpose::GraveFill,
    TimerPurpose::GraveRespawn,
    TimerPurpose::InfiniteGraveRespawn,
    TimerPurpose::BoxRespawn,
    TimerPurpose::EnemyRespawn,
    TimerPurpose::EnemySpawn,
    TimerPurpose::AttackCooldown,
];

/// Renders a human-readable description of a resolved ruleset.
pub(crate) fn render(rules: &RuleSet) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, rules);
    out
}

fn write_summary(out: &mut String, rules: &RuleSet) -> std::fmt::Result {
    let grid = rules.grid();
    let player = rules.player();
    writeln!(out, "{} / {}", rules.episode(), rules.difficulty())?;
    writeln!(
        out,
        "grid        {}x{} cells of {}px, camera {}x{}, origin {:?}",
        grid.width(),
        grid.height(),
        grid.cell_size(),
        grid.camera().0,
        grid.camera().1,
        grid.play_area_origin()
    )?;
    writeln!(
        out,
        "player      start ({}, {}), rows {}..={}, buffer {}, interpolation {}",
        player.start().x(),
        player.start().y(),
        player.min_row(),
        player.max_row(),
        rules.input_buffer_capacity(),
        rules.interpolation_factor()
    )?;
    writeln!(
        out,
        "enemies     up to {}, step {}, +{}% per level, spawn every {}",
        rules.max_enemies(),
        range(rules.enemy_speed()),
        rules.speed_increment() * 100.0,
        millis(rules.spawn_interval())
    )?;
    writeln!(
        out,
        "walls       {} (push {} rows)",
        rules.wall_behavior(),
        rules.push_down_distance()
    )?;

    writeln!(out, "spawn weights")?;
    for (kind, weight) in rules.enemy_spawn().entries() {
        writeln!(
            out,
            "  {:<10} {:<14} {:.3}",
            kind.label(),
            rules.enemy_name(*kind),
            weight
        )?;
    }

    writeln!(out, "timers")?;
    for purpose in TIMER_PURPOSES {
        let span = match rules.timer_span(purpose) {
            Some(TimerSpan::Fixed(duration)) => millis(duration),
            Some(TimerSpan::Range(interval)) => range(&interval),
            None => "not configured".to_owned(),
        };
        writeln!(out, "  {:<24} {span}", purpose.to_string())?;
    }
    if let Some((base, overlay)) = rules.grave_respawn_discrepancy() {
        writeln!(
            out,
            "  note: grave respawn constants differ ({} vs {})",
            millis(base),
            millis(overlay)
        )?;
    }

    writeln!(out, "assets")?;
    let resolver = AnimationResolver::new(rules);
    for (key, binding) in rules.assets().iter() {
        let timing = match resolver.timing(key) {
            Ok(FrameTiming::PerFrame(per_frame)) => format!("{}/frame", millis(per_frame)),
            Ok(FrameTiming::Total(total)) => format!("{} total", millis(total)),
            Err(error) => error.to_string(),
        };
        let sound = binding
            .sound()
            .map_or(String::new(), |sound| format!(" sound={sound}"));
        writeln!(
            out,
            "  {:<18} {:<24} {timing}{sound}",
            key.to_string(),
            binding.sheet()
        )?;
    }
    Ok(())
}

fn millis(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

fn range(range: &SpawnRange) -> String {
    if range.is_fixed() {
        format!("{}ms", range.min())
    } else {
        format!("{}..={}ms", range.min(), range.max())
    }
}

#[cfg(test)]
mod tests {
    use gravewatch_catalog::{base_config, overlay};
    use gravewatch_core::{Difficulty, Episode};
    use gravewatch_system_merger::ConfigMerger;

    use super::*;

    fn timer_line<'s>(summary: &'s str, purpose: &str) -> &'s str {
        summary
            .lines()
            .find(|line| line.trim_start().split_whitespace().next() == Some(purpose))
            .unwrap_or_default()
    }

    #[test]
    fn summary_lists_extension_timers_and_discrepancy() {
        let rules = ConfigMerger::new()
            .resolve(
                &base_config(Episode::Cemetery),
                &overlay(Episode::Cemetery, Difficulty::Infinite),
            )
            .expect("shipped configuration resolves");
        let summary = render(&rules);
        assert!(summary.starts_with("cemetery / infinite"));
        assert!(timer_line(&summary, "grave_respawn").ends_with("33333ms"));
        assert!(summary.contains("grave respawn constants differ (30000ms vs 33333ms)"));
        assert!(summary.contains("DEATH_ANIM"));
        assert!(summary.contains("sound=gameOver"));
    }

    #[test]
    fn summary_marks_missing_extension_timers() {
        let rules = ConfigMerger::new()
            .resolve(
                &base_config(Episode::Catacombs),
                &overlay(Episode::Catacombs, Difficulty::Easy),
            )
            .expect("shipped configuration resolves");
        let summary = render(&rules);
        assert!(timer_line(&summary, "enemy_respawn").ends_with("not configured"));
        assert!(!summary.contains("note:"));
    }
}
