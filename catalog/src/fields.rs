use gravewatch_core::{Difficulty, DifficultyOverlay, Episode, FieldTable, FieldValue, RuleField};

/// Defaults every episode starts from.
fn shared_fields() -> FieldTable {
    FieldTable::new()
        .with(RuleField::GridWidth, FieldValue::Integer(10))
        .with(RuleField::GridHeight, FieldValue::Integer(34))
        .with(RuleField::CellSize, FieldValue::Integer(32))
        .with(RuleField::CameraWidth, FieldValue::Integer(10))
        .with(RuleField::CameraHeight, FieldValue::Integer(17))
        .with(RuleField::PlayAreaX, FieldValue::Integer(0))
        .with(RuleField::PlayAreaY, FieldValue::Integer(64))
        .with(RuleField::PlayerStartX, FieldValue::Integer(4))
        .with(RuleField::PlayerStartY, FieldValue::Integer(30))
        .with(RuleField::PlayerMinRow, FieldValue::Integer(0))
        .with(RuleField::PlayerMaxRow, FieldValue::Integer(33))
        .with(RuleField::InterpolationFactor, FieldValue::Float(0.25))
        .with(RuleField::InputBufferSize, FieldValue::Integer(3))
        .with(RuleField::AttackCooldown, FieldValue::Integer(500))
        .with(RuleField::NumberDisplayDuration, FieldValue::Integer(800))
        .with(RuleField::EffectAnimationSpeed, FieldValue::Integer(60))
        .with(RuleField::EnemySpeed, FieldValue::range(400.0, 400.0))
        .with(RuleField::SpeedIncrement, FieldValue::Float(0.05))
        .with(RuleField::SpawnInterval, FieldValue::Integer(3_000))
        .with(RuleField::MaxEnemies, FieldValue::Integer(6))
        .with(
            RuleField::LookDirectionInterval,
            FieldValue::range(2_000.0, 4_000.0),
        )
        .with(RuleField::GraveFillDuration, FieldValue::Integer(30_000))
        .with(
            RuleField::InfiniteModeGraveRespawnTime,
            FieldValue::Integer(30_000),
        )
        .with(RuleField::HussyBoxRespawn, FieldValue::range(8_000.0, 15_000.0))
        .with(RuleField::WallBehavior, FieldValue::text("teleport"))
        .with(RuleField::PushDownDistance, FieldValue::Integer(3))
        .with(
            RuleField::EnemySpawnWeights,
            FieldValue::weights([
                ("zombie", 0.5),
                ("skeleton", 0.3),
                ("ghost", 0.2),
                ("mummy", 0.0),
            ]),
        )
}

pub(crate) fn base_fields(episode: Episode) -> FieldTable {
    let shared = shared_fields();
    match episode {
        Episode::Cemetery => shared,
        Episode::Catacombs => shared
            .with(RuleField::WallBehavior, FieldValue::text("push_down"))
            .with(RuleField::PushDownDistance, FieldValue::Integer(2))
            .with(RuleField::MaxEnemies, FieldValue::Integer(7))
            .with(
                RuleField::LookDirectionInterval,
                FieldValue::range(1_500.0, 3_500.0),
            )
            .with(
                RuleField::EnemySpawnWeights,
                FieldValue::weights([
                    ("zombie", 0.3),
                    ("skeleton", 0.3),
                    ("ghost", 0.2),
                    ("mummy", 0.2),
                ]),
            ),
    }
}

pub(crate) fn overlay(episode: Episode, difficulty: Difficulty) -> DifficultyOverlay {
    match difficulty {
        Difficulty::Easy => DifficultyOverlay::new(difficulty)
            .with("ENEMY_SPEED", FieldValue::Integer(500))
            .with("SPAWN_INTERVAL", FieldValue::Integer(4_000))
            .with("MAX_ENEMIES", FieldValue::Integer(4))
            .with("LOOK_DIRECTION_INTERVAL_MIN", FieldValue::Integer(3_000))
            .with("LOOK_DIRECTION_INTERVAL_MAX", FieldValue::Integer(5_000))
            .with(
                "ENEMY_SPAWN_WEIGHTS",
                FieldValue::weights([("zombie", 0.7), ("skeleton", 0.3)]),
            ),
        Difficulty::Normal => DifficultyOverlay::new(difficulty)
            .with("SPEED_INCREMENT", FieldValue::Float(0.05))
            .with("ATTACK_COOLDOWN", FieldValue::Integer(450)),
        Difficulty::Hard => {
            let hard = DifficultyOverlay::new(difficulty)
                .with("ENEMY_SPEED_MIN", FieldValue::Integer(250))
                .with("ENEMY_SPEED_MAX", FieldValue::Integer(350))
                .with("SPAWN_INTERVAL", FieldValue::Integer(2_000))
                .with("MAX_ENEMIES", FieldValue::Integer(8))
                .with(
                    "LOOK_DIRECTION_INTERVAL",
                    FieldValue::range(1_000.0, 2_500.0),
                );
            match episode {
                Episode::Cemetery => hard.with("WALL_BEHAVIOR", FieldValue::text("game_over")),
                Episode::Catacombs => hard.with("PUSH_DOWN_DISTANCE", FieldValue::Integer(4)),
            }
        }
        Difficulty::Infinite => DifficultyOverlay::extension(difficulty)
            .with("GRAVE_RESPAWN_TIME", FieldValue::Integer(33_333))
            .with("ENEMY_RESPAWN_DELAY", FieldValue::Integer(5_000))
            .with("SPEED_INCREMENT", FieldValue::Float(0.1))
            .with("MAX_ENEMIES", FieldValue::Integer(10))
            .with("HUSSY_BOX_RESPAWN_MIN", FieldValue::Integer(6_000)),
    }
}
