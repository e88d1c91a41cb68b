use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::SpawnRange;

/// Identifier of the gameplay entity that owns a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(u32);

impl OwnerId {
    /// Creates a new owner identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// What a timer is counting down to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerPurpose {
    /// Next enemy look-direction change.
    LookDirection,
    /// A filled grave emptying again.
    GraveFill,
    /// A grave reappearing, as configured by extension overlays.
    GraveRespawn,
    /// A grave reappearing in infinite mode, from the base-level constant.
    InfiniteGraveRespawn,
    /// An opened box refilling.
    BoxRespawn,
    /// A defeated enemy returning.
    EnemyRespawn,
    /// The next enemy spawn.
    EnemySpawn,
    /// The player's attack becoming available again.
    AttackCooldown,
}

impl TimerPurpose {
    /// Policy applied when a timer for the same owner and purpose is running.
    ///
    /// Look-direction cycling and spawn cadence are re-armed freely; anything
    /// modelling a physical prop or a one-off cooldown must not be armed twice.
    #[must_use]
    pub const fn start_policy(self) -> StartPolicy {
        match self {
            Self::LookDirection | Self::EnemySpawn => StartPolicy::Replace,
            Self::GraveFill
            | Self::GraveRespawn
            | Self::InfiniteGraveRespawn
            | Self::BoxRespawn
            | Self::EnemyRespawn
            | Self::AttackCooldown => StartPolicy::Reject,
        }
    }
}

impl fmt::Display for TimerPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LookDirection => "look_direction",
            Self::GraveFill => "grave_fill",
            Self::GraveRespawn => "grave_respawn",
            Self::InfiniteGraveRespawn => "infinite_grave_respawn",
            Self::BoxRespawn => "box_respawn",
            Self::EnemyRespawn => "enemy_respawn",
            Self::EnemySpawn => "enemy_spawn",
            Self::AttackCooldown => "attack_cooldown",
        };
        f.write_str(name)
    }
}

/// Behavior when starting a timer whose key already has a running timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StartPolicy {
    /// Cancel the running timer and arm the new one.
    Replace,
    /// Refuse to start and leave the running timer untouched.
    Reject,
}

/// Identity of a timer: at most one may run per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerKey {
    owner: OwnerId,
    purpose: TimerPurpose,
}

impl TimerKey {
    /// Creates a timer key.
    #[must_use]
    pub const fn new(owner: OwnerId, purpose: TimerPurpose) -> Self {
        Self { owner, purpose }
    }

    /// Owning entity.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Purpose of the timer.
    #[must_use]
    pub const fn purpose(&self) -> TimerPurpose {
        self.purpose
    }
}

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.purpose, self.owner.get())
    }
}

/// Duration configuration copied into a timer when it starts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TimerSpan {
    /// Exact duration.
    Fixed(Duration),
    /// Millisecond range, sampled once at start.
    Range(SpawnRange),
}

impl TimerSpan {
    /// Fixed span measured in milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self::Fixed(Duration::from_millis(millis))
    }
}
