//! Conversion between dense containers and ascending (flat index, value)
//! pairs for the nonzero entries.
//!
//! A row-major scan emits `row * cols + col` for matrices and the position
//! itself for vectors, so the index stream is strictly ascending by
//! construction — the property the delta-coded index codec relies on.

use crate::error::{Result, SparzError};
use crate::matrix::DenseMatrix;

/// Flatten the nonzero entries of a matrix into ascending (index, value)
/// pairs. Fails with `InvalidInput` when either dimension is zero.
pub(crate) fn flatten_matrix(matrix: &DenseMatrix) -> Result<(Vec<u32>, Vec<f32>)> {
    if matrix.rows() == 0 || matrix.cols() == 0 {
        return Err(SparzError::InvalidInput(
            "matrix has zero rows or zero columns",
        ));
    }
    // Flat indexes are u32; a larger matrix could not satisfy the archive
    // invariant flat_index < rows * cols.
    if matrix.rows() as u64 * matrix.cols() as u64 > u32::MAX as u64 + 1 {
        return Err(SparzError::InvalidInput(
            "matrix exceeds the u32 flat index space",
        ));
    }

    let nnz = matrix.nnz();
    let mut indexes = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);

    for row in 0..matrix.rows() {
        for col in 0..matrix.cols() {
            let v = matrix.get(row, col);
            if v != 0.0 {
                indexes.push((row * matrix.cols() + col) as u32);
                values.push(v);
            }
        }
    }

    Ok((indexes, values))
}

/// Rebuild a dense matrix from ascending (index, value) pairs.
///
/// Positions not covered by a pair stay zero. No bounds checking: the
/// assembler validates the index range against `rows * cols` before calling.
pub(crate) fn unflatten_matrix(
    rows: usize,
    cols: usize,
    indexes: &[u32],
    values: &[f32],
) -> DenseMatrix {
    let mut matrix = DenseMatrix::zeros(rows, cols);
    for (&index, &value) in indexes.iter().zip(values.iter()) {
        let row = index as usize / cols;
        let col = index as usize % cols;
        matrix.set(row, col, value);
    }
    matrix
}

/// Flatten the nonzero entries of a vector; the flat index is the position.
pub(crate) fn flatten_vector(vector: &[f32]) -> (Vec<u32>, Vec<f32>) {
    let mut indexes = Vec::new();
    let mut values = Vec::new();

    for (position, &v) in vector.iter().enumerate() {
        if v != 0.0 {
            indexes.push(position as u32);
            values.push(v);
        }
    }

    (indexes, values)
}

/// Scatter (index, value) pairs into an all-zero vector of `len`.
///
/// Same bounds contract as [`unflatten_matrix`].
pub(crate) fn unflatten_vector(len: usize, indexes: &[u32], values: &[f32]) -> Vec<f32> {
    let mut vector = vec![0.0f32; len];
    for (&index, &value) in indexes.iter().zip(values.iter()) {
        vector[index as usize] = value;
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_scan_is_row_major_and_ascending() {
        let m = DenseMatrix::from_vec(2, 3, vec![0.0, 0.0, 0.0, 1.0, 0.0, 2.0]).unwrap();
        let (indexes, values) = flatten_matrix(&m).unwrap();
        assert_eq!(indexes, vec![3, 5]);
        assert_eq!(values, vec![1.0, 2.0]);
        assert!(indexes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn matrix_rejects_empty_dimensions() {
        let no_rows = DenseMatrix::zeros(0, 4);
        let no_cols = DenseMatrix::zeros(4, 0);
        assert!(matches!(
            flatten_matrix(&no_rows),
            Err(SparzError::InvalidInput(_))
        ));
        assert!(matches!(
            flatten_matrix(&no_cols),
            Err(SparzError::InvalidInput(_))
        ));
    }

    #[test]
    fn unflatten_matrix_leaves_gaps_zero() {
        let m = unflatten_matrix(2, 3, &[3, 5], &[1.0, 2.0]);
        assert_eq!(m.as_slice(), &[0.0, 0.0, 0.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn matrix_flatten_round_trips() {
        let m = DenseMatrix::from_vec(3, 2, vec![0.5, 0.0, 0.0, -1.0, 0.0, 9.25]).unwrap();
        let (indexes, values) = flatten_matrix(&m).unwrap();
        let back = unflatten_matrix(3, 2, &indexes, &values);
        assert_eq!(back, m);
    }

    #[test]
    fn vector_scan_positions() {
        let (indexes, values) = flatten_vector(&[0.0, 0.0, 3.5, 0.0, -2.25, 0.0]);
        assert_eq!(indexes, vec![2, 4]);
        assert_eq!(values, vec![3.5, -2.25]);
    }

    #[test]
    fn vector_all_zero_flattens_to_nothing() {
        let (indexes, values) = flatten_vector(&[0.0; 8]);
        assert!(indexes.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn unflatten_vector_scatters() {
        let v = unflatten_vector(6, &[2, 4], &[3.5, -2.25]);
        assert_eq!(v, vec![0.0, 0.0, 3.5, 0.0, -2.25, 0.0]);
    }
}
