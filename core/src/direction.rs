use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::UnknownNameError;

/// The four facing and movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing column indices.
    Right,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting from `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector in grid space, where rows grow downward.
    #[must_use]
    pub const fn vector(self) -> DirectionVector {
        match self {
            Self::Up => DirectionVector::new(0, -1),
            Self::Right => DirectionVector::new(1, 0),
            Self::Down => DirectionVector::new(0, 1),
            Self::Left => DirectionVector::new(-1, 0),
        }
    }

    /// Symbolic uppercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
        }
    }

    /// Next direction when rotating a quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit step associated with a [`Direction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectionVector {
    dx: i32,
    dy: i32,
}

impl DirectionVector {
    const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Column delta.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Row delta.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }
}

/// Physical keyboard layouts with their direction bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyLayout {
    /// `W A S D` plus arrow keys.
    Qwerty,
    /// `Z Q S D` plus arrow keys.
    Azerty,
}

impl KeyLayout {
    /// Every supported layout.
    pub const ALL: [KeyLayout; 2] = [KeyLayout::Qwerty, KeyLayout::Azerty];

    /// Physical key identifiers bound to the direction, in priority order.
    #[must_use]
    pub const fn keys(self, direction: Direction) -> &'static [&'static str] {
        match (self, direction) {
            (Self::Qwerty, Direction::Up) => &["w", "ArrowUp"],
            (Self::Qwerty, Direction::Left) => &["a", "ArrowLeft"],
            (Self::Azerty, Direction::Up) => &["z", "ArrowUp"],
            (Self::Azerty, Direction::Left) => &["q", "ArrowLeft"],
            (_, Direction::Down) => &["s", "ArrowDown"],
            (_, Direction::Right) => &["d", "ArrowRight"],
        }
    }

    /// Direction bound to the physical key, if any.
    #[must_use]
    pub fn direction_for(self, key: &str) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.keys(*direction).contains(&key))
    }

    /// Lowercase layout identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Qwerty => "qwerty",
            Self::Azerty => "azerty",
        }
    }
}

impl FromStr for KeyLayout {
    type Err = UnknownNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.name() == value.to_ascii_lowercase())
            .ok_or_else(|| UnknownNameError::new("key layout", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_cycle_returns_to_start() {
        let mut facing = Direction::Left;
        for _ in 0..4 {
            facing = facing.clockwise();
        }
        assert_eq!(facing, Direction::Left);
        assert_eq!(Direction::Up.clockwise(), Direction::Right);
    }

    #[test]
    fn vectors_are_unit_and_opposites_cancel() {
        for direction in Direction::ALL {
            let vector = direction.vector();
            assert_eq!(vector.dx().abs() + vector.dy().abs(), 1);
            let opposite = direction.opposite().vector();
            assert_eq!(vector.dx() + opposite.dx(), 0);
            assert_eq!(vector.dy() + opposite.dy(), 0);
        }
    }

    #[test]
    fn layouts_resolve_keys_to_directions() {
        assert_eq!(KeyLayout::Qwerty.direction_for("w"), Some(Direction::Up));
        assert_eq!(KeyLayout::Azerty.direction_for("z"), Some(Direction::Up));
        assert_eq!(KeyLayout::Azerty.direction_for("q"), Some(Direction::Left));
        assert_eq!(KeyLayout::Qwerty.direction_for("q"), None);
        for layout in KeyLayout::ALL {
            assert_eq!(layout.direction_for("ArrowDown"), Some(Direction::Down));
        }
    }

    #[test]
    fn layout_names_parse_case_insensitively() {
        assert_eq!("AZERTY".parse::<KeyLayout>(), Ok(KeyLayout::Azerty));
        assert_eq!(
            "dvorak".parse::<KeyLayout>(),
            Err(UnknownNameError {
                kind: "key layout",
                name: "dvorak".to_owned()
            })
        );
    }
}
