pub mod timing;
pub mod transform;

use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone, Copy)]
pub enum Tolerance {
    Absolute(f64),
    Relative(f64),
    Combined(f64, f64),
}

impl Tolerance {
    /// `reference` is the magnitude the relative part is measured against.
    pub fn check(&self, diff: f64, reference: f64) -> bool {
        match *self {
            Tolerance::Absolute(tol) => diff <= tol,
            Tolerance::Relative(tol) => relative(diff, reference) <= tol,
            Tolerance::Combined(abs_tol, rel_tol) => {
                diff <= abs_tol || relative(diff, reference) <= rel_tol
            }
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Combined(1e-12, 1e-9)
    }
}

fn relative(diff: f64, reference: f64) -> f64 {
    if reference > 0.0 {
        diff / reference
    } else {
        diff
    }
}

/// Largest element-wise absolute difference, or `None` if shapes differ.
pub fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Option<f64> {
    if a.shape() != b.shape() {
        return None;
    }
    Some(
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max),
    )
}

/// Largest absolute difference within each row, or `None` if shapes differ.
pub fn row_max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Option<DVector<f64>> {
    if a.shape() != b.shape() {
        return None;
    }
    let diff = (a - b).map(f64::abs);
    Some(DVector::from_iterator(
        diff.nrows(),
        diff.row_iter().map(|row| row.max()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_tolerance_accepts_either_bound() {
        let tol = Tolerance::Combined(1e-6, 1e-3);
        assert!(tol.check(1e-7, 0.0));
        assert!(tol.check(0.5, 1000.0));
        assert!(!tol.check(0.5, 10.0));
    }

    #[test]
    fn max_abs_diff_requires_equal_shapes() {
        let a = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let b = DMatrix::from_row_slice(1, 2, &[1.5, 1.0]);
        assert_eq!(max_abs_diff(&a, &b), Some(1.0));
        assert_eq!(max_abs_diff(&a, &DMatrix::zeros(2, 1)), None);
    }

    #[test]
    fn row_max_abs_diff_is_per_row() {
        let a = DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = DMatrix::from_row_slice(2, 3, &[0.5, 1.0, 2.0, 3.0, 4.0, 2.0]);
        let rows = row_max_abs_diff(&a, &b).unwrap();
        assert_eq!(rows.as_slice(), &[0.5, 3.0]);
        assert!(row_max_abs_diff(&a, &DMatrix::zeros(3, 2)).is_none());
    }
}
