use std::fmt;

/// CellState is the value stored for every cell in a universe.
/// 0 is dead, 255 is the canonical alive value. Anything in between is only
/// produced under energy semantics and still counts as alive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct CellState(pub u8);

impl CellState {
    pub const DEAD: CellState = CellState(0);
    pub const ALIVE: CellState = CellState(255);

    /// Check if the cell is currently alive (any non-zero energy)
    pub const fn is_alive(self) -> bool {
        self.0 > 0
    }

    /// Energy magnitude of the cell, 0..=255
    pub const fn energy(self) -> u8 {
        self.0
    }

    /// Build a state from an energy level, saturating at 255
    pub fn from_energy(energy: f64) -> Self {
        if energy >= 255.0 {
            Self::ALIVE
        } else if energy <= 0.0 {
            Self::DEAD
        } else {
            CellState(energy as u8)
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::ALIVE } else { CellState::DEAD }
    }
}

/// Dimension-agnostic coordinate. Unused axes stay 0.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub w: i32,
}

impl Coord {
    pub const fn new_2d(x: i32, y: i32) -> Self {
        Self { x, y, z: 0, w: 0 }
    }

    pub const fn new_3d(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z, w: 0 }
    }

    pub const fn new_4d(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self { x, y, z, w }
    }

    /// Component-wise sum, used to place patterns at an offset
    pub const fn offset(self, by: Coord) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
            z: self.z + by.z,
            w: self.w + by.w,
        }
    }
}

/// Dimensionality reported by a universe
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dimension {
    /// Single flat grid
    TwoD,
    /// Stack of independently addressable 2D layers
    TwoAndHalfD,
    /// Dense volume with 26-cell neighborhoods
    ThreeD,
}

impl Dimension {
    pub const fn label(self) -> &'static str {
        match self {
            Dimension::TwoD => "2D",
            Dimension::TwoAndHalfD => "2.5D",
            Dimension::ThreeD => "3D",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_is_zero() {
        assert_eq!(CellState::DEAD.0, 0);
        assert!(!CellState::DEAD.is_alive());
        assert_eq!(CellState::default(), CellState::DEAD);
    }

    #[test]
    fn test_partial_energy_counts_as_alive() {
        assert!(CellState(1).is_alive());
        assert!(CellState(128).is_alive());
        assert!(CellState::ALIVE.is_alive());
    }

    #[test]
    fn test_from_energy_saturates() {
        assert_eq!(CellState::from_energy(1000.0), CellState::ALIVE);
        assert_eq!(CellState::from_energy(-3.0), CellState::DEAD);
        assert_eq!(CellState::from_energy(42.9), CellState(42));
    }

    #[test]
    fn test_coord_constructors_zero_fill() {
        assert_eq!(Coord::new_2d(3, 4), Coord { x: 3, y: 4, z: 0, w: 0 });
        assert_eq!(Coord::new_3d(1, 2, 3).w, 0);
        assert_eq!(Coord::new_4d(1, 2, 3, 4).w, 4);
    }

    #[test]
    fn test_coord_offset() {
        let moved = Coord::new_3d(1, 2, 3).offset(Coord::new_3d(10, 20, 30));
        assert_eq!(moved, Coord::new_3d(11, 22, 33));
    }

    #[test]
    fn test_dimension_labels() {
        assert_eq!(Dimension::TwoD.to_string(), "2D");
        assert_eq!(Dimension::TwoAndHalfD.to_string(), "2.5D");
        assert_eq!(Dimension::ThreeD.to_string(), "3D");
    }
}
