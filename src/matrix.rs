//! Rectangular matrices stored as nested vectors.

use crate::error::TransposeError;

/// A rectangular 2D array. Producers in this crate only ever build non-empty
/// matrices whose inner vectors share one length.
pub type Matrix<T> = Vec<Vec<T>>;

/// Swap the major and minor axes of a matrix.
///
/// # Errors
///
/// Returns [`TransposeError::Empty`] for a matrix with no rows and
/// [`TransposeError::Ragged`] when the rows differ in length.
pub fn transpose<T: Clone>(matrix: &[Vec<T>]) -> Result<Matrix<T>, TransposeError> {
    let first = matrix.first().ok_or(TransposeError::Empty)?;
    let minor = first.len();

    if let Some((row, found)) = matrix
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, len)| len != minor)
    {
        return Err(TransposeError::Ragged {
            expected: minor,
            found,
            row,
        });
    }

    Ok((0..minor)
        .map(|minor_index| {
            matrix
                .iter()
                .map(|major| major[minor_index].clone())
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_square() {
        let m = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(transpose(&m), Ok(vec![vec![1, 3], vec![2, 4]]));
    }

    #[test]
    fn test_transpose_wide() {
        let m = vec![vec!['a', 'b', 'c']];
        assert_eq!(transpose(&m), Ok(vec![vec!['a'], vec!['b'], vec!['c']]));
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let m = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let back = transpose(&m).and_then(|t| transpose(&t));
        assert_eq!(back, Ok(m));
    }

    #[test]
    fn test_transpose_empty_fails() {
        let m: Matrix<u8> = Vec::new();
        assert_eq!(transpose(&m), Err(TransposeError::Empty));
    }

    #[test]
    fn test_transpose_ragged_fails() {
        let m = vec![vec![1, 2], vec![3]];
        assert_eq!(
            transpose(&m),
            Err(TransposeError::Ragged {
                expected: 2,
                found: 1,
                row: 1
            })
        );
    }
}
