//! Per-cell alive/dead tracking for a formation grid
//!
//! Row-major `width x height` booleans. A cell dies at most once and never
//! comes back.

/// Alive/dead state of every cell in the grid
#[derive(Debug, Clone)]
pub struct LivenessGrid {
    width: usize,
    height: usize,
    /// `alive[y * width + x]`
    alive: Vec<bool>,
    alive_count: usize,
}

impl LivenessGrid {
    /// Create a fully alive grid
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            alive: vec![true; cells],
            alive_count: cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells still alive
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// True if `(x, y)` lies inside the grid
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.alive[self.index(x, y)]
    }

    /// Kill a cell. Returns true only on the live -> dead transition.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn mark_dead(&mut self, x: usize, y: usize) -> bool {
        let idx = self.index(x, y);
        if !self.alive[idx] {
            return false;
        }
        self.alive[idx] = false;
        self.alive_count -= 1;
        true
    }

    /// True if any cell in column `x` is alive
    ///
    /// # Panics
    /// If `x` is not a column of the grid.
    pub fn is_column_alive(&self, x: usize) -> bool {
        assert!(x < self.width, "column {x} outside grid of width {}", self.width);
        (0..self.height).any(|y| self.alive[y * self.width + x])
    }

    /// Ascending list of columns with at least one alive cell
    pub fn alive_columns(&self) -> Vec<usize> {
        (0..self.width).filter(|&x| self.is_column_alive(x)).collect()
    }

    /// True if `(x, y)` is alive and every cell below it in the column is dead
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn is_front_runner(&self, x: usize, y: usize) -> bool {
        self.is_alive(x, y) && ((y + 1)..self.height).all(|below| !self.is_alive(x, below))
    }

    /// Row of the front-runner in column `x`, if the column is alive
    pub fn front_runner(&self, x: usize) -> Option<usize> {
        (0..self.height).rev().find(|&y| self.is_alive(x, y))
    }
}
