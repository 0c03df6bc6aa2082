//! Screen-space sample grid and the policy choosing which cells to ray-cast.

use serde::{Deserialize, Serialize};
use tapmeasure_raycast::{ScreenPoint, ViewSize};

use crate::error::{MeasureError, Result};

/// Default distance between grid samples, in view units.
pub const DEFAULT_GRID_SPACING: f64 = 50.0;

/// One candidate sample of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Column index `i`.
    pub column: usize,
    /// Row index `j`.
    pub row: usize,
    /// Screen position `((i+1)·S, (j+1)·S)`.
    pub point: ScreenPoint,
}

/// Candidate sample points covering a view, column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    cells: Vec<GridCell>,
    columns: usize,
    rows: usize,
}

impl SampleGrid {
    /// Build the grid for `view` with `spacing` between samples.
    ///
    /// Cells are ordered column-major: every row of column 0, then column 1,
    /// and so on. The same inputs always give the same grid.
    pub fn generate(view: ViewSize, spacing: f64) -> Result<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(MeasureError::InvalidConfig(format!(
                "grid spacing must be positive, got {spacing}"
            )));
        }
        let columns = count(view.width, spacing);
        let rows = count(view.height, spacing);

        let mut cells = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                cells.push(GridCell {
                    column,
                    row,
                    point: ScreenPoint::new(
                        (column + 1) as f64 * spacing,
                        (row + 1) as f64 * spacing,
                    ),
                });
            }
        }
        Ok(Self {
            cells,
            columns,
            rows,
        })
    }

    /// All cells in generation order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Number of columns (`floor(W / S)`).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows (`floor(H / S)`).
    pub fn rows(&self) -> usize {
        self.rows
    }
}

fn count(extent: f64, spacing: f64) -> usize {
    let n = (extent / spacing).floor();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

/// Which grid cells take part in an area measurement.
///
/// Selected hits are combined in grid order, which fixes the triangle-strip
/// decomposition of the measured polygon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Selected `(column, row)` pairs.
    pub cells: Vec<(usize, usize)>,
}

impl SelectionPolicy {
    /// Policy from explicit `(column, row)` pairs.
    pub fn new(cells: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Four cells forming a quadrilateral near the upper middle of a phone screen.
    pub fn reference() -> Self {
        Self::new([(3, 2), (3, 4), (5, 2), (5, 4)])
    }

    /// Whether `cell` is selected.
    pub fn contains(&self, cell: &GridCell) -> bool {
        self.cells.contains(&(cell.column, cell.row))
    }

    /// Selected cells of `grid`, in grid order. Pairs outside the grid are skipped.
    pub fn select<'a>(&'a self, grid: &'a SampleGrid) -> impl Iterator<Item = &'a GridCell> + 'a {
        grid.cells().iter().filter(move |cell| self.contains(cell))
    }

    /// Number of selected pairs.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::reference()
    }
}
