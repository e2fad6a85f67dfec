use nalgebra::Vector2;

/// Row-major 2-D array; rows follow lattice spacing, columns axial offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == rows * cols).then_some(Self { rows, cols, data })
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.rows).then(|| &self.data[row * self.cols..(row + 1) * self.cols])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Cells with their `(row, col)` position, in row-major order.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, value)| (i / cols, i % cols, value))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

/// A computed property grid: energies and rates are scalar, forces are vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum GridValues {
    Scalar(Grid<f64>),
    Vector(Grid<Vector2<f64>>),
}

impl GridValues {
    pub fn rows(&self) -> usize {
        match self {
            GridValues::Scalar(grid) => grid.rows(),
            GridValues::Vector(grid) => grid.rows(),
        }
    }

    pub fn cols(&self) -> usize {
        match self {
            GridValues::Scalar(grid) => grid.cols(),
            GridValues::Vector(grid) => grid.cols(),
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, GridValues::Vector(_))
    }

    pub fn as_scalar(&self) -> Option<&Grid<f64>> {
        match self {
            GridValues::Scalar(grid) => Some(grid),
            GridValues::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Grid<Vector2<f64>>> {
        match self {
            GridValues::Vector(grid) => Some(grid),
            GridValues::Scalar(_) => None,
        }
    }

    /// Number of cells holding the NaN failure sentinel.
    pub fn nan_count(&self) -> usize {
        match self {
            GridValues::Scalar(grid) => grid.as_slice().iter().filter(|v| v.is_nan()).count(),
            GridValues::Vector(grid) => grid
                .as_slice()
                .iter()
                .filter(|v| v.x.is_nan() || v.y.is_nan())
                .count(),
        }
    }
}
