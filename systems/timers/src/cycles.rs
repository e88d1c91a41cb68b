use gravewatch_core::{Direction, OwnerId, RuleSet, TimerKey, TimerPurpose, TimerSpan};
use rand::Rng;

use crate::{DuplicateTimerError, TimerExpired, TimerHandle, TimerRegistry};

/// Rotates an enemy's facing clockwise whenever its look timer expires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookCycle {
    key: TimerKey,
    facing: Direction,
    span: TimerSpan,
}

impl LookCycle {
    /// Creates a cycle drawing its intervals from the ruleset's look range.
    #[must_use]
    pub fn new(owner: OwnerId, facing: Direction, rules: &RuleSet) -> Self {
        Self {
            key: TimerKey::new(owner, TimerPurpose::LookDirection),
            facing,
            span: TimerSpan::Range(*rules.look_interval()),
        }
    }

    /// Arms the first look timer, replacing any stale one for the owner.
    pub fn start<R>(&self, registry: &mut TimerRegistry, rng: &mut R) -> TimerHandle
    where
        R: Rng + ?Sized,
    {
        registry.replace(self.key, self.span, rng)
    }

    /// Turns clockwise and re-arms when the event belongs to this cycle.
    ///
    /// Returns the new facing, or `None` for unrelated events.
    pub fn on_expired<R>(
        &mut self,
        event: &TimerExpired,
        registry: &mut TimerRegistry,
        rng: &mut R,
    ) -> Option<Direction>
    where
        R: Rng + ?Sized,
    {
        if event.key != self.key {
            return None;
        }
        self.facing = self.facing.clockwise();
        let _ = registry.replace(self.key, self.span, rng);
        Some(self.facing)
    }

    /// Current facing.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Timer key used by the cycle.
    #[must_use]
    pub const fn key(&self) -> TimerKey {
        self.key
    }
}

/// Visible state of a grave or box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropState {
    /// Nothing inside.
    Empty,
    /// Occupied or stocked.
    Filled,
}

impl PropState {
    const fn flipped(self) -> Self {
        match self {
            Self::Empty => Self::Filled,
            Self::Filled => Self::Empty,
        }
    }
}

/// Prop that leaves its resting state when triggered and returns on expiry.
///
/// Graves rest empty and stay filled for the grave fill duration. Boxes rest
/// stocked, and once opened refill after a draw from the box respawn range.
/// Triggering a prop whose timer is still running fails fast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropCycle {
    key: TimerKey,
    resting: PropState,
    state: PropState,
    span: TimerSpan,
}

impl PropCycle {
    /// Grave that empties again after the grave fill duration.
    #[must_use]
    pub fn grave(owner: OwnerId, rules: &RuleSet) -> Self {
        Self::new(
            TimerKey::new(owner, TimerPurpose::GraveFill),
            PropState::Empty,
            TimerSpan::Fixed(rules.grave_fill_duration()),
        )
    }

    /// Box that refills after a randomized delay.
    #[must_use]
    pub fn hussy_box(owner: OwnerId, rules: &RuleSet) -> Self {
        Self::new(
            TimerKey::new(owner, TimerPurpose::BoxRespawn),
            PropState::Filled,
            TimerSpan::Range(*rules.box_respawn()),
        )
    }

    fn new(key: TimerKey, resting: PropState, span: TimerSpan) -> Self {
        Self {
            key,
            resting,
            state: resting,
            span,
        }
    }

    /// Leaves the resting state and arms the return timer.
    pub fn trigger<R>(
        &mut self,
        registry: &mut TimerRegistry,
        rng: &mut R,
    ) -> Result<TimerHandle, DuplicateTimerError>
    where
        R: Rng + ?Sized,
    {
        let handle = registry.start(self.key, self.span, rng)?;
        self.state = self.resting.flipped();
        Ok(handle)
    }

    /// Returns to the resting state when the event belongs to this prop.
    pub fn on_expired(&mut self, event: &TimerExpired) -> bool {
        if event.key != self.key {
            return false;
        }
        self.state = self.resting;
        true
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PropState {
        self.state
    }

    /// Reports whether the prop is in its resting state.
    #[must_use]
    pub fn is_resting(&self) -> bool {
        self.state == self.resting
    }

    /// Timer key used by the prop.
    #[must_use]
    pub const fn key(&self) -> TimerKey {
        self.key
    }
}
