//! Dot grid layout
//!
//! Derives the dot grid and the circular disc boundary from a pixel size, and
//! converts between grid cells, pixels and normalized disc coordinates.

use crate::error::{Result, VoiceDotsError};
use crate::field::IntensityField;

/// Margin between the disc edge and the shorter side of the surface
const DISC_MARGIN: i32 = 20;

/// Size tiers keyed on `min(width, height)`: (upper bound, dot radius, spacing)
const DOT_TIERS: [(u32, u32, u32); 4] = [(300, 1, 3), (500, 2, 6), (800, 3, 9), (1200, 4, 12)];
const LARGEST_TIER: (u32, u32) = (5, 15);

/// Position of a cell relative to the disc, in disc radii
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPos {
    pub nx: f32,
    pub ny: f32,
    pub dist: f32,
}

/// Dot grid derived from a surface size
///
/// Immutable once computed; a resize builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    width: u32,
    height: u32,
    dot_spacing: u32,
    dot_radius: u32,
    cols: usize,
    rows: usize,
    center_x: i32,
    center_y: i32,
    disc_radius: f32,
    /// Row-major, `rows * cols`
    mask: Vec<bool>,
    /// Row-major, `rows * cols`
    positions: Vec<NormalizedPos>,
}

/// Pick (dot radius, spacing) for the shorter surface side
pub fn dot_tier(min_dimension: u32) -> (u32, u32) {
    DOT_TIERS
        .iter()
        .find(|(bound, _, _)| min_dimension <= *bound)
        .map(|&(_, radius, spacing)| (radius, spacing))
        .unwrap_or(LARGEST_TIER)
}

impl GridGeometry {
    /// Compute the grid for a `width` x `height` surface
    ///
    /// Fails when the surface is too small to hold a single dot row/column or
    /// a disc of positive radius.
    pub fn compute(width: u32, height: u32) -> Result<Self> {
        let min_dimension = width.min(height);
        let (dot_radius, dot_spacing) = dot_tier(min_dimension);

        let cols = (width / dot_spacing) as usize;
        let rows = (height / dot_spacing) as usize;
        if cols == 0 || rows == 0 {
            return Err(VoiceDotsError::InvalidGeometry(format!(
                "{}x{} yields an empty {}x{} dot grid",
                width, height, cols, rows
            )));
        }

        let disc_radius = (min_dimension / 2) as i32 - DISC_MARGIN;
        if disc_radius <= 0 {
            return Err(VoiceDotsError::InvalidGeometry(format!(
                "{}x{} leaves no room for the disc (radius {})",
                width, height, disc_radius
            )));
        }

        let center_x = (width / 2) as i32;
        let center_y = (height / 2) as i32;
        let disc_radius = disc_radius as f32;

        let mut positions = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let nx = ((col as u32 * dot_spacing) as i32 - center_x) as f32 / disc_radius;
                let ny = ((row as u32 * dot_spacing) as i32 - center_y) as f32 / disc_radius;
                positions.push(NormalizedPos {
                    nx,
                    ny,
                    dist: (nx * nx + ny * ny).sqrt(),
                });
            }
        }
        let mask = positions.iter().map(|p| p.dist <= 1.0).collect();

        Ok(Self {
            width,
            height,
            dot_spacing,
            dot_radius,
            cols,
            rows,
            center_x,
            center_y,
            disc_radius,
            mask,
            positions,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dot_spacing(&self) -> u32 {
        self.dot_spacing
    }

    pub fn dot_radius(&self) -> u32 {
        self.dot_radius
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    pub fn disc_radius(&self) -> f32 {
        self.disc_radius
    }

    /// Normalized disc position of a cell
    ///
    /// Cached for in-grid cells; computed directly otherwise.
    pub fn to_normalized(&self, col: usize, row: usize) -> NormalizedPos {
        if col < self.cols && row < self.rows {
            return self.positions[row * self.cols + col];
        }
        let nx = (col as f32 * self.dot_spacing as f32 - self.center_x as f32) / self.disc_radius;
        let ny = (row as f32 * self.dot_spacing as f32 - self.center_y as f32) / self.disc_radius;
        NormalizedPos {
            nx,
            ny,
            dist: (nx * nx + ny * ny).sqrt(),
        }
    }

    /// Pixel position of a cell's dot center
    pub fn to_pixel(&self, col: usize, row: usize) -> (i32, i32) {
        (
            (col as u32 * self.dot_spacing) as i32,
            (row as u32 * self.dot_spacing) as i32,
        )
    }

    /// Whether a cell lies inside the grid and inside the disc
    pub fn is_valid(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && self.mask[row * self.cols + col]
    }

    /// Same as [`is_valid`](Self::is_valid) for signed coordinates
    pub fn is_valid_signed(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && self.is_valid(col as usize, row as usize)
    }

    /// Grid cell containing a normalized disc position, if valid
    pub fn cell_for_normalized(&self, nx: f32, ny: f32) -> Option<(usize, usize)> {
        let spacing = self.dot_spacing as f32;
        let col = ((nx * self.disc_radius + self.center_x as f32) / spacing) as i64;
        let row = ((ny * self.disc_radius + self.center_y as f32) / spacing) as i64;
        self.is_valid_signed(col, row)
            .then_some((col as usize, row as usize))
    }

    /// Iterate over valid cells as `(col, row, position)`, row-major
    pub fn valid_cells(&self) -> impl Iterator<Item = (usize, usize, NormalizedPos)> + '_ {
        let cols = self.cols;
        self.positions
            .iter()
            .zip(self.mask.iter())
            .enumerate()
            .filter(|(_, (_, valid))| **valid)
            .map(move |(i, (pos, _))| (i % cols, i / cols, *pos))
    }

    /// Number of cells inside the disc
    pub fn valid_count(&self) -> usize {
        self.mask.iter().filter(|v| **v).count()
    }

    /// All-zero field shaped like this grid
    pub fn empty_field(&self) -> IntensityField {
        IntensityField::new(self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_tiers() {
        assert_eq!(dot_tier(200), (1, 3));
        assert_eq!(dot_tier(300), (1, 3));
        assert_eq!(dot_tier(301), (2, 6));
        assert_eq!(dot_tier(800), (3, 9));
        assert_eq!(dot_tier(1200), (4, 12));
        assert_eq!(dot_tier(1201), (5, 15));
    }

    #[test]
    fn test_600_square_layout() {
        let geo = GridGeometry::compute(600, 600).unwrap();
        assert_eq!(geo.dot_spacing(), 9);
        assert_eq!(geo.dot_radius(), 3);
        assert_eq!(geo.disc_radius(), 280.0);
        assert_eq!(geo.shape(), (66, 66));
        assert_eq!(geo.center(), (300, 300));

        let center = geo.to_normalized(33, 33);
        assert!(center.dist < 0.02);
        assert!(geo.is_valid(33, 33));
    }

    #[test]
    fn test_corners_are_outside_disc() {
        let geo = GridGeometry::compute(600, 600).unwrap();
        assert!(!geo.is_valid(0, 0));
        assert!(!geo.is_valid(65, 65));
        assert!(!geo.is_valid(66, 0));
    }

    #[test]
    fn test_non_square_grid() {
        let geo = GridGeometry::compute(800, 400).unwrap();
        assert_eq!(geo.dot_spacing(), 6);
        assert_eq!(geo.cols(), 133);
        assert_eq!(geo.rows(), 66);
        assert_eq!(geo.disc_radius(), 180.0);
        assert_eq!(geo.empty_field().shape(), (66, 133));
    }

    #[test]
    fn test_mask_matches_distance() {
        let geo = GridGeometry::compute(300, 300).unwrap();
        for row in 0..geo.rows() {
            for col in 0..geo.cols() {
                assert_eq!(geo.is_valid(col, row), geo.to_normalized(col, row).dist <= 1.0);
            }
        }
        assert_eq!(geo.valid_cells().count(), geo.valid_count());
    }

    #[test]
    fn test_pixel_position() {
        let geo = GridGeometry::compute(600, 600).unwrap();
        assert_eq!(geo.to_pixel(10, 4), (90, 36));
    }

    #[test]
    fn test_cell_for_normalized_round_trips_center() {
        let geo = GridGeometry::compute(600, 600).unwrap();
        assert_eq!(geo.cell_for_normalized(0.0, 0.0), Some((33, 33)));
        assert_eq!(geo.cell_for_normalized(1.5, 0.0), None);
    }

    #[test]
    fn test_degenerate_sizes_are_rejected() {
        assert!(matches!(
            GridGeometry::compute(2, 600),
            Err(VoiceDotsError::InvalidGeometry(_))
        ));
        assert!(matches!(
            GridGeometry::compute(40, 40),
            Err(VoiceDotsError::InvalidGeometry(_))
        ));
        assert!(GridGeometry::compute(42, 42).is_ok());
    }
}
