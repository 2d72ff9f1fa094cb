use super::{geometry::normalize_angle, types::Direction};
use crate::config::GridConfig;

fn bin(value: f32, span: f32) -> u8 {
    let half = span * 0.5;
    if value < -half {
        0
    } else if value > half {
        2
    } else {
        1
    }
}

/// Maps a position to a cell in `[0, 8]` as `row + col * 3`, with the column
/// taken from x and the row from y. Boundaries fall in the middle bin.
pub fn grid_position(x: f32, y: f32, grid: &GridConfig) -> u8 {
    let col = bin(x, grid.cell_width);
    let row = bin(y, grid.cell_height);
    row + col * 3
}

impl Direction {
    /// Buckets a heading into 45° sectors, lower bound inclusive, with South
    /// centred on 0°.
    pub fn from_angle(angle_deg: f32) -> Self {
        let angle = normalize_angle(angle_deg);
        if !(22.5..337.5).contains(&angle) {
            Self::S
        } else if angle < 67.5 {
            Self::SE
        } else if angle < 112.5 {
            Self::E
        } else if angle < 157.5 {
            Self::NE
        } else if angle < 202.5 {
            Self::N
        } else if angle < 247.5 {
            Self::NW
        } else if angle < 292.5 {
            Self::W
        } else {
            Self::SW
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: GridConfig = GridConfig {
        cell_width: 1.0,
        cell_height: 1.0,
    };

    #[test]
    fn sector_boundaries_are_lower_inclusive() {
        let cases = [
            (0.0, Direction::S),
            (22.4, Direction::S),
            (22.5, Direction::SE),
            (67.5, Direction::E),
            (90.0, Direction::E),
            (112.5, Direction::NE),
            (157.5, Direction::N),
            (180.0, Direction::N),
            (202.5, Direction::NW),
            (247.5, Direction::W),
            (292.5, Direction::SW),
            (337.4, Direction::SW),
            (337.5, Direction::S),
            (360.0, Direction::S),
            (-22.5, Direction::S),
            (-90.0, Direction::W),
        ];
        for (angle, expected) in cases {
            assert_eq!(Direction::from_angle(angle), expected, "angle {angle}");
        }
    }

    #[test]
    fn non_finite_heading_falls_back_to_south() {
        assert_eq!(Direction::from_angle(f32::NAN), Direction::S);
    }

    #[test]
    fn grid_composes_row_plus_column_times_three() {
        assert_eq!(grid_position(0.0, 0.0, &GRID), 4);
        assert_eq!(grid_position(-1.0, -1.0, &GRID), 0);
        assert_eq!(grid_position(-1.0, 1.0, &GRID), 2);
        assert_eq!(grid_position(1.0, -1.0, &GRID), 6);
        assert_eq!(grid_position(1.0, 1.0, &GRID), 8);
        assert_eq!(grid_position(0.0, -1.0, &GRID), 3);
    }

    #[test]
    fn half_cell_boundary_stays_in_middle_bin() {
        assert_eq!(grid_position(0.5, -0.5, &GRID), 4);
        assert_eq!(grid_position(0.5001, 0.0, &GRID), 7);
    }

    #[test]
    fn grid_position_stays_in_range() {
        let coords = [-10.0, -1.5, -0.5, 0.0, 0.5, 1.5, 10.0, f32::NAN];
        for &x in &coords {
            for &y in &coords {
                assert!(grid_position(x, y, &GRID) <= 8);
            }
        }
    }
}
