// Heat grid domain model
//
// Grids are evaluated from a closed-form base function, clamped into
// [0, 100], then box-smoothed over the in-bounds 3x3 neighbourhood.

pub const CELL_MIN: f64 = 0.0;
pub const CELL_MAX: f64 = 100.0;
pub const DEFAULT_SMOOTHING_PASSES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct HeatGrid {
    pub name: String,
    /// One label per column (x axis).
    pub column_labels: Vec<String>,
    /// One label per row (y axis).
    pub row_labels: Vec<String>,
    /// Row-major cells, `cells[row][column]`.
    pub cells: Vec<Vec<f64>>,
}

impl HeatGrid {
    /// Evaluate `base_fn(x, y)` over the labelled axes and smooth the result.
    pub fn build<F>(
        name: impl Into<String>,
        column_labels: Vec<String>,
        row_labels: Vec<String>,
        passes: usize,
        base_fn: F,
    ) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let raw = evaluate(column_labels.len(), row_labels.len(), base_fn);
        Self {
            name: name.into(),
            column_labels,
            row_labels,
            cells: smooth(raw, passes),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row)?.get(column).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().flatten().copied()
    }
}

/// Clamp a raw value into the cell range.
pub fn clamp_cell(value: f64) -> f64 {
    value.clamp(CELL_MIN, CELL_MAX)
}

/// Gaussian bump of unit height centred on `mu`.
pub fn gaussian(x: f64, mu: f64, sigma: f64) -> f64 {
    let d = x - mu;
    (-(d * d) / (2.0 * sigma * sigma)).exp()
}

/// Evaluate and clamp `base_fn` over an `x_count` by `y_count` grid.
pub fn evaluate<F>(x_count: usize, y_count: usize, base_fn: F) -> Vec<Vec<f64>>
where
    F: Fn(usize, usize) -> f64,
{
    (0..y_count)
        .map(|y| (0..x_count).map(|x| clamp_cell(base_fn(x, y))).collect())
        .collect()
}

/// Neighbour-average smoothing. Each pass replaces a cell by the mean of
/// itself and its in-bounds 8-neighbours; no wraparound, no padding.
pub fn smooth(mut cells: Vec<Vec<f64>>, passes: usize) -> Vec<Vec<f64>> {
    for _ in 0..passes {
        cells = smooth_pass(&cells);
    }
    for value in cells.iter_mut().flatten() {
        *value = clamp_cell(*value);
    }
    cells
}

fn smooth_pass(cells: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let rows = cells.len();
    (0..rows)
        .map(|r| {
            let columns = cells[r].len();
            (0..columns)
                .map(|c| {
                    let mut sum = 0.0;
                    let mut count = 0usize;
                    for nr in r.saturating_sub(1)..=(r + 1).min(rows - 1) {
                        for nc in c.saturating_sub(1)..=(c + 1).min(columns - 1) {
                            if let Some(value) = cells[nr].get(nc) {
                                sum += value;
                                count += 1;
                            }
                        }
                    }
                    sum / count as f64
                })
                .collect()
        })
        .collect()
}
