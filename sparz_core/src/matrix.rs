use crate::error::{Result, SparzError};

/// Dense row-major `f32` matrix.
///
/// The minimal container the archiver works against: contiguous row-major
/// storage plus dimensions. Zero entries are stored explicitly — sparsity is
/// exploited only at archive time.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl DenseMatrix {
    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Fails with `InvalidInput` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(SparzError::InvalidInput(
                "buffer length does not match rows * cols",
            ));
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.cols + col] = value;
    }

    /// Row-major view of the whole matrix.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Number of entries not equal to zero.
    pub fn nnz(&self) -> usize {
        self.data.iter().filter(|v| **v != 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_matching_shape() {
        let m = DenseMatrix::zeros(3, 4);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert_eq!(m.as_slice().len(), 12);
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(DenseMatrix::from_vec(2, 3, vec![0.0; 5]).is_err());
        let m = DenseMatrix::from_vec(2, 3, vec![1.0, 0.0, 0.0, 0.0, 0.0, 2.0]).unwrap();
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 2), 2.0);
        assert_eq!(m.nnz(), 2);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut m = DenseMatrix::zeros(2, 2);
        m.set(1, 0, -4.5);
        assert_eq!(m.get(1, 0), -4.5);
    }
}
