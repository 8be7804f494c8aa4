//! Preparation of a 30x30 grid before it is handed to `invoke`.
//!
//! A camera frame is first reduced to a 30x30 intensity grid by the host. The
//! steps here are what happens next: min-max normalisation, clearing the
//! noisy border column, and moving the drawn digit to the centre of the grid.

use crate::tensor::{INPUT_BYTES, INPUT_COLS, INPUT_LEN, INPUT_ROWS};

/// Owned 30x30 single-channel grid in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: [f32; INPUT_LEN],
}

impl Grid {
    pub fn zeros() -> Self {
        Self {
            cells: [0.0; INPUT_LEN],
        }
    }

    pub fn from_rows(rows: &[[f32; INPUT_COLS]; INPUT_ROWS]) -> Self {
        let mut grid = Self::zeros();
        for (row, values) in rows.iter().enumerate() {
            grid.cells[row * INPUT_COLS..(row + 1) * INPUT_COLS].copy_from_slice(values);
        }
        grid
    }

    /// Value at `(row, col)`, or `None` outside the 30x30 grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        Self::index(row, col).map(|i| self.cells[i])
    }

    /// Store `value` at `(row, col)` and return the previous value, or `None`
    /// (leaving the grid unchanged) outside the 30x30 grid.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Option<f32> {
        Self::index(row, col).map(|i| std::mem::replace(&mut self.cells[i], value))
    }

    fn index(row: usize, col: usize) -> Option<usize> {
        (row < INPUT_ROWS && col < INPUT_COLS).then(|| row * INPUT_COLS + col)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    /// Scale values into `[0, 1]`. A flat grid is left untouched.
    pub fn normalize(&mut self) {
        let (min, max) = self
            .cells
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let range = max - min;
        if range > 0.0 {
            for value in self.cells.iter_mut() {
                *value = (*value - min) / range;
            }
        }
    }

    /// Zero every cell in `col`. Columns outside the grid are ignored.
    pub fn clear_column(&mut self, col: usize) {
        for row in 0..INPUT_ROWS {
            self.set(row, col, 0.0);
        }
    }

    /// Crop to the bounding box of non-zero cells and centre it on an empty
    /// grid. An empty grid is returned as is.
    pub fn auto_crop_and_center(&self) -> Grid {
        let Some((min_row, max_row, min_col, max_col)) = self.bounding_box() else {
            return self.clone();
        };

        let height = max_row - min_row + 1;
        let width = max_col - min_col + 1;
        let top = (INPUT_ROWS - height) / 2;
        let left = (INPUT_COLS - width) / 2;

        let mut centered = Grid::zeros();
        for row in 0..height {
            for col in 0..width {
                let src = (min_row + row) * INPUT_COLS + min_col + col;
                centered.cells[(top + row) * INPUT_COLS + left + col] = self.cells[src];
            }
        }
        centered
    }

    fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;

        for row in 0..INPUT_ROWS {
            for col in 0..INPUT_COLS {
                if self.cells[row * INPUT_COLS + col] == 0.0 {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (row, row, col, col),
                    Some((r0, r1, c0, c1)) => (r0.min(row), r1.max(row), c0.min(col), c1.max(col)),
                });
            }
        }

        bounds
    }

    /// The 3600 native-endian bytes `invoke` expects.
    pub fn to_input_bytes(&self) -> Vec<u8> {
        let bytes: &[u8] = bytemuck::cast_slice(&self.cells);
        debug_assert_eq!(bytes.len(), INPUT_BYTES);
        bytes.to_vec()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::zeros()
    }
}
