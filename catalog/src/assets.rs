use gravewatch_core::{
    AssetBinding, AssetClass, AssetKey, AssetTable, DirectionalFrames, EnemyKind, Episode,
    FrameSequence, Playback, SoundKey, VisualModifiers,
};

/// Three-frame walk cycles laid out up, right, down, left on a character sheet.
fn walk_cycle() -> FrameSequence {
    FrameSequence::Directional(DirectionalFrames::new(
        vec![0, 1, 2],
        vec![3, 4, 5],
        vec![6, 7, 8],
        vec![9, 10, 11],
    ))
}

fn character(sheet: String, speed_ms: u32) -> AssetBinding {
    AssetBinding::new(sheet, AssetClass::Character, Playback::Looping, walk_cycle())
        .with_speed(speed_ms)
}

pub(crate) fn table(episode: Episode) -> AssetTable {
    let root = episode.name();
    let sheet = |name: &str| format!("{root}/{name}");

    let mut table = AssetTable::new()
        .with(
            AssetKey::SpawnAnim,
            AssetBinding::new(
                sheet("fx_spawn"),
                AssetClass::Effect,
                Playback::OneShot,
                FrameSequence::run(0, 6),
            )
            .with_sound(SoundKey::Spawn),
        )
        .with(
            AssetKey::DeathAnim,
            AssetBinding::new(
                sheet("fx_death"),
                AssetClass::Effect,
                Playback::OneShot,
                FrameSequence::run(0, 8),
            )
            .with_speed(50)
            .with_sound(SoundKey::GameOver)
            .with_modifiers(VisualModifiers {
                scale: 1.0,
                monochrome: true,
            }),
        )
        .with(
            AssetKey::WinAnim,
            AssetBinding::new(
                sheet("fx_win"),
                AssetClass::Effect,
                Playback::OneShot,
                FrameSequence::run(0, 6),
            )
            .with_speed(80)
            .with_sound(SoundKey::Win)
            .with_modifiers(VisualModifiers {
                scale: 1.5,
                monochrome: false,
            }),
        )
        .with(
            AssetKey::ExplosionAnim,
            AssetBinding::new(
                sheet("fx_explosion"),
                AssetClass::Effect,
                Playback::OneShot,
                FrameSequence::run(0, 5),
            )
            .with_sound(SoundKey::Explosion),
        )
        .with(
            AssetKey::NumberDigits,
            AssetBinding::new(
                sheet("digits"),
                AssetClass::NumericDisplay,
                Playback::OneShot,
                FrameSequence::run(0, 10),
            )
            .with_sound(SoundKey::Score),
        )
        .with(AssetKey::PlayerSprite, character(sheet("player"), 120))
        .with(
            AssetKey::GraveSprite,
            AssetBinding::new(
                sheet("grave"),
                AssetClass::Prop,
                Playback::Looping,
                FrameSequence::run(0, 4),
            ),
        )
        .with(
            AssetKey::HussyBoxSprite,
            AssetBinding::new(
                sheet("hussy_box"),
                AssetClass::Prop,
                Playback::OneShot,
                FrameSequence::run(0, 3),
            )
            .with_speed(100),
        );

    for kind in EnemyKind::ALL {
        let speed = match kind {
            EnemyKind::Ghost => 200,
            EnemyKind::Zombie | EnemyKind::Skeleton | EnemyKind::Mummy => 150,
        };
        table = table.with(
            AssetKey::EnemySprite(kind),
            character(sheet(kind.label()), speed),
        );
    }
    table
}
