use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{AssetError, Direction, EnemyKind, UnknownNameError};

/// Symbolic key identifying a sprite or animation binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetKey {
    /// Puff shown while an actor materialises.
    SpawnAnim,
    /// Player death sequence.
    DeathAnim,
    /// Level-complete sequence.
    WinAnim,
    /// Explosion effect shown when an enemy is destroyed.
    ExplosionAnim,
    /// Score popup digits.
    NumberDigits,
    /// Player character sheet.
    PlayerSprite,
    /// Character sheet of one enemy kind.
    EnemySprite(EnemyKind),
    /// Grave prop.
    GraveSprite,
    /// Box prop.
    HussyBoxSprite,
}

impl AssetKey {
    /// Every asset key in declaration order.
    #[must_use]
    pub fn all() -> Vec<AssetKey> {
        let mut keys = vec![
            AssetKey::SpawnAnim,
            AssetKey::DeathAnim,
            AssetKey::WinAnim,
            AssetKey::ExplosionAnim,
            AssetKey::NumberDigits,
            AssetKey::PlayerSprite,
        ];
        keys.extend(EnemyKind::ALL.into_iter().map(AssetKey::EnemySprite));
        keys.push(AssetKey::GraveSprite);
        keys.push(AssetKey::HussyBoxSprite);
        keys
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpawnAnim => f.write_str("SPAWN_ANIM"),
            Self::DeathAnim => f.write_str("DEATH_ANIM"),
            Self::WinAnim => f.write_str("WIN_ANIM"),
            Self::ExplosionAnim => f.write_str("EXPLOSION_ANIM"),
            Self::NumberDigits => f.write_str("NUMBER_DIGITS"),
            Self::PlayerSprite => f.write_str("player_sprite"),
            Self::EnemySprite(kind) => write!(f, "{kind}_sprite"),
            Self::GraveSprite => f.write_str("grave_sprite"),
            Self::HussyBoxSprite => f.write_str("hussy_box_sprite"),
        }
    }
}

impl FromStr for AssetKey {
    type Err = UnknownNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|key| key.to_string() == value)
            .ok_or_else(|| UnknownNameError::new("asset key", value))
    }
}

/// Category that selects the fallback timing of a binding with speed zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Transient effect; falls back to the effect animation speed per frame.
    Effect,
    /// Score digits; falls back to the total number display duration.
    NumericDisplay,
    /// Player or enemy sheet.
    Character,
    /// Static or idly animated scenery.
    Prop,
}

/// Whether a sequence repeats or stops on its last frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Wraps around indefinitely.
    Looping,
    /// Plays once and holds the last frame.
    OneShot,
}

/// Sound cues raised toward the audio host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundKey {
    /// Run lost.
    GameOver,
    /// Level cleared.
    Win,
    /// Actor materialised.
    Spawn,
    /// Enemy destroyed.
    Explosion,
    /// Score popup.
    Score,
}

impl SoundKey {
    /// Identifier the audio host expects.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GameOver => "gameOver",
            Self::Win => "win",
            Self::Spawn => "spawn",
            Self::Explosion => "explosion",
            Self::Score => "score",
        }
    }
}

impl fmt::Display for SoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One frame sequence per facing direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalFrames {
    up: Vec<u32>,
    right: Vec<u32>,
    down: Vec<u32>,
    left: Vec<u32>,
}

impl DirectionalFrames {
    /// Creates per-direction sequences.
    #[must_use]
    pub fn new(up: Vec<u32>, right: Vec<u32>, down: Vec<u32>, left: Vec<u32>) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    /// Sequence for the given facing.
    #[must_use]
    pub fn for_direction(&self, direction: Direction) -> &[u32] {
        match direction {
            Direction::Up => &self.up,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
        }
    }
}

/// Ordered sprite-sheet frame indices of a binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameSequence {
    /// Same sequence regardless of facing.
    Flat(Vec<u32>),
    /// Facing-specific sequences.
    Directional(DirectionalFrames),
}

impl FrameSequence {
    /// Consecutive frames `start..start + count`.
    #[must_use]
    pub fn run(start: u32, count: u32) -> Self {
        Self::Flat((start..start + count).collect())
    }

    /// Sequence for the facing; flat sequences ignore it and directional ones
    /// face down when no facing is supplied.
    #[must_use]
    pub fn resolve(&self, direction: Option<Direction>) -> &[u32] {
        match self {
            Self::Flat(frames) => frames,
            Self::Directional(frames) => {
                frames.for_direction(direction.unwrap_or(Direction::Down))
            }
        }
    }

    /// Reports whether any reachable sequence is empty.
    #[must_use]
    pub fn has_empty_sequence(&self) -> bool {
        match self {
            Self::Flat(frames) => frames.is_empty(),
            Self::Directional(frames) => Direction::ALL
                .into_iter()
                .any(|direction| frames.for_direction(direction).is_empty()),
        }
    }
}

/// Optional presentation adjustments applied by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualModifiers {
    /// Uniform scale factor.
    pub scale: f32,
    /// Render in greyscale.
    pub monochrome: bool,
}

impl Default for VisualModifiers {
    fn default() -> Self {
        Self {
            scale: 1.0,
            monochrome: false,
        }
    }
}

/// Resolution record from a symbolic key to a playable sprite sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetBinding {
    sheet: String,
    class: AssetClass,
    playback: Playback,
    frames: FrameSequence,
    speed_ms: u32,
    sound: Option<SoundKey>,
    modifiers: VisualModifiers,
}

impl AssetBinding {
    /// Creates a binding that uses its class fallback timing.
    #[must_use]
    pub fn new(
        sheet: impl Into<String>,
        class: AssetClass,
        playback: Playback,
        frames: FrameSequence,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            class,
            playback,
            frames,
            speed_ms: 0,
            sound: None,
            modifiers: VisualModifiers::default(),
        }
    }

    /// Overrides the per-frame duration; zero keeps the class fallback.
    #[must_use]
    pub fn with_speed(mut self, speed_ms: u32) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    /// Attaches a sound cue raised when playback starts.
    #[must_use]
    pub fn with_sound(mut self, sound: SoundKey) -> Self {
        self.sound = Some(sound);
        self
    }

    /// Overrides the visual modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: VisualModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sprite-sheet identifier.
    #[must_use]
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Fallback timing class.
    #[must_use]
    pub const fn class(&self) -> AssetClass {
        self.class
    }

    /// Looping or one-shot.
    #[must_use]
    pub const fn playback(&self) -> Playback {
        self.playback
    }

    /// Frame indices.
    #[must_use]
    pub const fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    /// Per-frame duration in milliseconds; zero selects the class fallback.
    #[must_use]
    pub const fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    /// Sound cue raised when playback starts.
    #[must_use]
    pub const fn sound(&self) -> Option<SoundKey> {
        self.sound
    }

    /// Presentation adjustments.
    #[must_use]
    pub const fn modifiers(&self) -> VisualModifiers {
        self.modifiers
    }

    /// Checks that the binding can be played back.
    pub fn validate(&self, key: AssetKey) -> Result<(), AssetError> {
        if self.frames.has_empty_sequence() {
            return Err(AssetError::EmptySequence { key });
        }
        let scale = self.modifiers.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AssetError::InvalidScale { key, scale });
        }
        Ok(())
    }
}

/// Episode-wide table of asset bindings, loaded once and shared read-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetTable {
    bindings: BTreeMap<AssetKey, AssetBinding>,
}

impl AssetTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a binding.
    #[must_use]
    pub fn with(mut self, key: AssetKey, binding: AssetBinding) -> Self {
        let _ = self.bindings.insert(key, binding);
        self
    }

    /// Binding registered under the key.
    #[must_use]
    pub fn get(&self, key: AssetKey) -> Option<&AssetBinding> {
        self.bindings.get(&key)
    }

    /// Bindings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetKey, &AssetBinding)> {
        self.bindings.iter().map(|(key, binding)| (*key, binding))
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Reports whether the table holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Checks every binding, reporting the first that cannot be played back.
    pub fn validate(&self) -> Result<(), AssetError> {
        self.iter()
            .try_for_each(|(key, binding)| binding.validate(key))
    }
}
