//! Dense intensity grid.

/// Row-major `width × height` array of cell intensities.
///
/// Outside of [`AnomalyField`][crate::AnomalyField] this type is only ever
/// seen through a shared reference.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityGrid {
    width:  usize,
    height: usize,
    cells:  Vec<f64>,
}

impl IntensityGrid {
    /// All-zero grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![0.0; width * height] }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Cell value, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<f64> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    /// Raw row-major values.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// Number of cells strictly above `threshold`.
    pub fn count_above(&self, threshold: f64) -> usize {
        self.cells.iter().filter(|&&v| v > threshold).count()
    }

    /// Cells strictly above `threshold` as `(x, y, value)`, in row-major
    /// order (y outer, x inner).
    pub fn cells_above(&self, threshold: f64) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &v)| v > threshold)
            .map(move |(i, &v)| (i % width, i / width, v))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(0.0);
    }
}
