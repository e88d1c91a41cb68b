use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{UnknownNameError, UnknownWallBehaviorError};

/// Cell coordinate on the play grid; rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    x: u32,
    y: u32,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Grid edge an actor attempted to cross.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Row zero.
    Top,
    /// Last row.
    Bottom,
    /// Column zero.
    Left,
    /// Last column.
    Right,
}

impl Boundary {
    /// Every boundary.
    pub const ALL: [Boundary; 4] = [
        Boundary::Top,
        Boundary::Bottom,
        Boundary::Left,
        Boundary::Right,
    ];

    /// Lowercase identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl FromStr for Boundary {
    type Err = UnknownNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|boundary| boundary.name() == value)
            .ok_or_else(|| UnknownNameError::new("boundary", value))
    }
}

/// Policy governing how actors respond to crossing a grid boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallBehavior {
    /// Wrap to the opposite edge.
    Teleport,
    /// Crossing the top pushes the actor down; other edges block.
    PushDown,
    /// Crossing a boundary ends the run.
    GameOver,
}

impl WallBehavior {
    /// Every behavior.
    pub const ALL: [WallBehavior; 3] = [
        WallBehavior::Teleport,
        WallBehavior::PushDown,
        WallBehavior::GameOver,
    ];

    /// Configuration name of the behavior.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Teleport => "teleport",
            Self::PushDown => "push_down",
            Self::GameOver => "game_over",
        }
    }
}

impl fmt::Display for WallBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WallBehavior {
    type Err = UnknownWallBehaviorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|behavior| behavior.name() == value)
            .ok_or_else(|| UnknownWallBehaviorError {
                name: value.to_owned(),
            })
    }
}

/// Dimensions and placement of the play grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridGeometry {
    width: u32,
    height: u32,
    cell_size: u32,
    camera_width: u32,
    camera_height: u32,
    play_area_origin: (u32, u32),
}

impl GridGeometry {
    /// Creates a grid description.
    #[must_use]
    pub const fn new(
        width: u32,
        height: u32,
        cell_size: u32,
        camera: (u32, u32),
        play_area_origin: (u32, u32),
    ) -> Self {
        Self {
            width,
            height,
            cell_size,
            camera_width: camera.0,
            camera_height: camera.1,
            play_area_origin,
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell side length in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Visible `(columns, rows)`.
    #[must_use]
    pub const fn camera(&self) -> (u32, u32) {
        (self.camera_width, self.camera_height)
    }

    /// Pixel offset of the play area's top-left corner.
    #[must_use]
    pub const fn play_area_origin(&self) -> (u32, u32) {
        self.play_area_origin
    }

    /// Reports whether the position lies on the grid.
    #[must_use]
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.x() < self.width && position.y() < self.height
    }
}

/// Player spawn cell and vertical movement limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerLimits {
    start: GridPosition,
    min_row: u32,
    max_row: u32,
}

impl PlayerLimits {
    /// Creates player limits.
    #[must_use]
    pub const fn new(start: GridPosition, min_row: u32, max_row: u32) -> Self {
        Self {
            start,
            min_row,
            max_row,
        }
    }

    /// Spawn cell.
    #[must_use]
    pub const fn start(&self) -> GridPosition {
        self.start
    }

    /// Topmost reachable row.
    #[must_use]
    pub const fn min_row(&self) -> u32 {
        self.min_row
    }

    /// Bottommost reachable row.
    #[must_use]
    pub const fn max_row(&self) -> u32 {
        self.max_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_behavior_names_round_trip() {
        for behavior in WallBehavior::ALL {
            assert_eq!(behavior.name().parse::<WallBehavior>(), Ok(behavior));
        }
    }

    #[test]
    fn unknown_wall_behavior_is_rejected() {
        assert_eq!(
            "bounce".parse::<WallBehavior>(),
            Err(UnknownWallBehaviorError {
                name: "bounce".to_owned()
            })
        );
        assert!("Teleport".parse::<WallBehavior>().is_err());
    }

    #[test]
    fn boundaries_parse_from_lowercase_names() {
        for boundary in Boundary::ALL {
            assert_eq!(boundary.name().parse::<Boundary>(), Ok(boundary));
        }
        assert_eq!(
            "Top".parse::<Boundary>(),
            Err(UnknownNameError {
                kind: "boundary",
                name: "Top".to_owned()
            })
        );
    }

    #[test]
    fn geometry_contains_only_in_bounds_cells() {
        let grid = GridGeometry::new(10, 34, 32, (10, 17), (0, 64));
        assert!(grid.contains(GridPosition::new(9, 33)));
        assert!(!grid.contains(GridPosition::new(10, 0)));
        assert!(!grid.contains(GridPosition::new(0, 34)));
    }
}
