#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Boundary-crossing outcomes for the three wall behaviors.
//!
//! The behavior is chosen once from the resolved ruleset and stays fixed for
//! the episode and difficulty. Resolving a crossing never mutates anything;
//! callers apply the returned outcome to their own actor state.

use gravewatch_core::{Boundary, GridPosition, RuleSet, UnknownWallBehaviorError, WallBehavior};

/// Run-ending event raised by the `game_over` behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerminalEvent {
    /// Cell the actor occupied when it crossed.
    pub position: GridPosition,
    /// Boundary that was crossed.
    pub boundary: Boundary,
}

/// Result of an actor attempting to leave the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallOutcome {
    /// The actor continues from a new cell.
    Moved(GridPosition),
    /// The actor stays where it is.
    Blocked(GridPosition),
    /// The run ends.
    Terminal(TerminalEvent),
}

/// Fixed boundary policy for one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallBehaviorPolicy {
    behavior: WallBehavior,
    width: u32,
    height: u32,
    push_down_distance: u32,
}

impl WallBehaviorPolicy {
    /// Creates a policy for a grid of the given size.
    #[must_use]
    pub const fn new(
        behavior: WallBehavior,
        width: u32,
        height: u32,
        push_down_distance: u32,
    ) -> Self {
        Self {
            behavior,
            width,
            height,
            push_down_distance,
        }
    }

    /// Creates the policy a ruleset selects.
    #[must_use]
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self::new(
            rules.wall_behavior(),
            rules.grid().width(),
            rules.grid().height(),
            rules.push_down_distance(),
        )
    }

    /// Creates a policy from a behavior name, failing on unknown names.
    pub fn named(
        name: &str,
        width: u32,
        height: u32,
        push_down_distance: u32,
    ) -> Result<Self, UnknownWallBehaviorError> {
        let behavior = name.parse()?;
        Ok(Self::new(behavior, width, height, push_down_distance))
    }

    /// Selected behavior.
    #[must_use]
    pub const fn behavior(&self) -> WallBehavior {
        self.behavior
    }

    /// Resolves an actor at `position` crossing `boundary`.
    #[must_use]
    pub fn resolve(&self, position: GridPosition, boundary: Boundary) -> WallOutcome {
        match self.behavior {
            WallBehavior::Teleport => WallOutcome::Moved(self.wrap(position, boundary)),
            WallBehavior::PushDown => match boundary {
                Boundary::Top => {
                    let last_row = self.height.saturating_sub(1);
                    let row = position
                        .y()
                        .saturating_add(self.push_down_distance)
                        .min(last_row);
                    WallOutcome::Moved(GridPosition::new(position.x(), row))
                }
                Boundary::Bottom | Boundary::Left | Boundary::Right => {
                    WallOutcome::Blocked(position)
                }
            },
            WallBehavior::GameOver => WallOutcome::Terminal(TerminalEvent { position, boundary }),
        }
    }

    fn wrap(&self, position: GridPosition, boundary: Boundary) -> GridPosition {
        match boundary {
            Boundary::Top => GridPosition::new(position.x(), self.height.saturating_sub(1)),
            Boundary::Bottom => GridPosition::new(position.x(), 0),
            Boundary::Left => GridPosition::new(self.width.saturating_sub(1), position.y()),
            Boundary::Right => GridPosition::new(0, position.y()),
        }
    }
}
