// The fixed battlefield grid: terrain lookup and algebraic tile naming.

use serde::Serialize;
use thiserror::Error;

/// Side length of the square battlefield grid.
pub const GRID_SIZE: usize = 12;

/// Terrain kind of one grid tile. The table below is part of the protocol
/// with the decision service (the system prompt narrates the same layout),
/// so it must not be edited independently of the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Base,
    Ground,
    Hill,
    Forest,
    Water,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("tile ({x}, {y}) is outside the 12x12 grid")]
    OutOfBounds { x: i32, y: i32 },
}

use Terrain::{Base as B, Forest as F, Ground as G, Hill as H, Water as W};

/// Terrain table indexed `[row = y][col = x]`.
const TERRAIN: [[Terrain; GRID_SIZE]; GRID_SIZE] = [
    [B, G, G, G, F, F, F, G, G, W, W, G],
    [G, G, H, G, F, F, F, G, G, W, W, W],
    [G, W, W, G, G, F, G, G, G, G, W, W],
    [G, W, W, W, G, G, G, H, G, G, G, G],
    [G, G, W, W, G, G, G, G, F, F, F, G],
    [G, G, G, G, H, G, G, G, F, F, F, G],
    [G, F, F, G, G, G, W, W, G, G, G, G],
    [G, F, F, F, G, G, W, W, W, G, H, G],
    [G, G, F, F, G, G, G, W, G, G, G, G],
    [G, G, G, G, W, W, G, G, G, F, F, G],
    [G, H, G, G, W, W, W, G, G, F, F, F],
    [G, G, G, G, G, W, G, G, G, G, F, G],
];

/// Look up the terrain kind at a zero-based Cartesian grid cell.
pub fn terrain_at(x: i32, y: i32) -> Result<Terrain, GridError> {
    match (usize::try_from(x), usize::try_from(y)) {
        (Ok(col), Ok(row)) if col < GRID_SIZE && row < GRID_SIZE => Ok(TERRAIN[row][col]),
        _ => Err(GridError::OutOfBounds { x, y }),
    }
}

/// Convert a zero-based Cartesian cell to the one-based algebraic notation
/// used in client-facing orders: column letter 'A'..'L', then row 1..12.
///
/// Coordinates are not range-checked here; callers that accept untrusted
/// positions go through [`terrain_at`], which is.
pub fn to_algebraic(x: i32, y: i32) -> String {
    let column = char::from(b'A' + x as u8);
    format!("{column}{}", y + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_corners() {
        assert_eq!(to_algebraic(0, 0), "A1");
        assert_eq!(to_algebraic(11, 11), "L12");
    }

    #[test]
    fn test_algebraic_mid_board() {
        assert_eq!(to_algebraic(2, 6), "C7");
        assert_eq!(to_algebraic(7, 3), "H4");
    }

    #[test]
    fn test_terrain_fixed_points() {
        assert_eq!(terrain_at(0, 0), Ok(Terrain::Base));
        assert_eq!(terrain_at(9, 0), Ok(Terrain::Water));
        assert_eq!(terrain_at(2, 1), Ok(Terrain::Hill));
        assert_eq!(terrain_at(4, 0), Ok(Terrain::Forest));
        assert_eq!(terrain_at(11, 11), Ok(Terrain::Ground));
    }

    #[test]
    fn test_terrain_row_column_orientation() {
        // (x=1, y=10) is the hill in row 11, not the water in column 11.
        assert_eq!(terrain_at(1, 10), Ok(Terrain::Hill));
        assert_eq!(terrain_at(10, 1), Ok(Terrain::Water));
    }

    #[test]
    fn test_terrain_out_of_bounds() {
        assert_eq!(
            terrain_at(12, 0),
            Err(GridError::OutOfBounds { x: 12, y: 0 })
        );
        assert_eq!(
            terrain_at(0, -1),
            Err(GridError::OutOfBounds { x: 0, y: -1 })
        );
    }

    #[test]
    fn test_terrain_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Terrain::Base).unwrap(), "\"base\"");
        assert_eq!(serde_json::to_string(&Terrain::Water).unwrap(), "\"water\"");
    }
}
