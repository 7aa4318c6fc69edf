//! # Steady-State Detection
//!
//! Scans the sampled trajectory forward in time and reports the first sample `j ≥ 1` at which
//! every species changed by less than the tolerance since sample `j-1`. If no such sample
//! exists the whole horizon is reported.
//!
//! Only consecutive samples of the fixed output grid are compared. The result is a visualization
//! aid: a slowly drifting or oscillating trajectory can satisfy the criterion long before it
//! has settled.
use nalgebra::{DMatrix, DVector};

/// Index of the first sample that differs from its predecessor by less than `tol` in every
/// column of `y` (rows = samples, columns = species). `None` if there is no such sample.
pub fn steady_state_index(y: &DMatrix<f64>, tol: f64) -> Option<usize> {
    (1..y.nrows()).find(|&j| (0..y.ncols()).all(|i| (y[(j, i)] - y[(j - 1, i)]).abs() < tol))
}

/// Steady-state time on the grid `t`, falls back to the last time point.
/// `None` only for an empty grid.
pub fn detect_steady_state(t: &DVector<f64>, y: &DMatrix<f64>, tol: f64) -> Option<f64> {
    match steady_state_index(y, tol) {
        Some(j) => t.get(j).copied(),
        None => t.iter().last().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> DVector<f64> {
        DVector::from_fn(n, |i, _| i as f64 * 0.5)
    }

    #[test]
    fn test_first_settled_pair_wins() {
        // deltas: 1, 1, 1, 1, 0 (at j = 5), then large again
        let col = [0.0, 1.0, 2.0, 3.0, 4.0, 4.0, 9.0, 9.0, 20.0, 30.0];
        let y = DMatrix::from_fn(10, 2, |j, i| col[j] * (i + 1) as f64);
        assert_eq!(steady_state_index(&y, 1e-4), Some(5));
        assert_eq!(detect_steady_state(&grid(10), &y, 1e-4), Some(2.5));
    }

    #[test]
    fn test_all_species_must_settle() {
        // species 0 settles at j = 2, species 1 only at j = 4
        let y = DMatrix::from_row_slice(
            5,
            2,
            &[
                1.0, 0.0, //
                0.5, 1.0, //
                0.5, 2.0, //
                0.5, 3.0, //
                0.5, 3.0,
            ],
        );
        assert_eq!(steady_state_index(&y, 1e-3), Some(4));
    }

    #[test]
    fn test_no_steady_state_returns_horizon() {
        let y = DMatrix::from_fn(10, 3, |j, i| (j * (i + 1)) as f64);
        assert_eq!(steady_state_index(&y, 1e-4), None);
        assert_eq!(detect_steady_state(&grid(10), &y, 1e-4), Some(4.5));
    }

    #[test]
    fn test_tolerance_is_strict() {
        let y = DMatrix::from_column_slice(3, 1, &[0.0, 0.5, 1.0]);
        assert_eq!(steady_state_index(&y, 0.5), None);
        assert_eq!(steady_state_index(&y, 0.5000001), Some(1));
    }

    #[test]
    fn test_single_sample() {
        let y = DMatrix::from_element(1, 2, 1.0);
        let t = DVector::from_element(1, 0.0);
        assert_eq!(steady_state_index(&y, 1e-4), None);
        assert_eq!(detect_steady_state(&t, &y, 1e-4), Some(0.0));
    }

    #[test]
    fn test_empty_grid() {
        let y = DMatrix::<f64>::zeros(0, 2);
        let t = DVector::<f64>::zeros(0);
        assert_eq!(steady_state_index(&y, 1e-4), None);
        assert_eq!(detect_steady_state(&t, &y, 1e-4), None);
    }
}
