//! Per-cell intensity storage

/// Brightness value at or below which a cell is off
pub const OFF: f32 = 0.0;

/// Upper bound of the normal range; values above it are drawn white-hot
pub const NORMAL_CEILING: f32 = 1.0;

/// 2D grid of dot intensities, shape (rows, cols), row-major
///
/// Coordinates are passed as `(col, row)` to match the grid geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityField {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl IntensityField {
    /// Create an all-zero field
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build a field from row-major values
    ///
    /// Returns `None` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == rows * cols).then_some(Self { rows, cols, data })
    }

    /// Shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn same_shape(&self, other: &IntensityField) -> bool {
        self.shape() == other.shape()
    }

    /// Intensity at a cell; out-of-range cells read as off
    pub fn get(&self, col: usize, row: usize) -> f32 {
        if col < self.cols && row < self.rows {
            self.data[row * self.cols + col]
        } else {
            OFF
        }
    }

    /// Set a cell; out-of-range writes are ignored
    pub fn set(&mut self, col: usize, row: usize, value: f32) {
        if col < self.cols && row < self.rows {
            self.data[row * self.cols + col] = value;
        }
    }

    /// Raise a cell to `value` if it is brighter than what is there
    pub fn raise(&mut self, col: usize, row: usize, value: f32) {
        if col < self.cols && row < self.rows {
            let cell = &mut self.data[row * self.cols + col];
            *cell = cell.max(value);
        }
    }

    /// Whether a cell was drawn at all
    pub fn is_lit(&self, col: usize, row: usize) -> bool {
        self.get(col, row) > OFF
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Iterate over `(col, row, value)`, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % cols, i / cols, *v))
    }

    /// Number of cells brighter than `threshold`
    pub fn count_above(&self, threshold: f32) -> usize {
        self.data.iter().filter(|v| **v > threshold).count()
    }

    /// Brightest cell value, 0.0 for an empty field
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(OFF, f32::max)
    }
}
