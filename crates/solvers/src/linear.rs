use nalgebra::{DMatrix, DVector};

/// A linear system whose matrix is singular to the requested tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Singular {
    /// Smallest over largest singular value.
    pub(crate) rcond: f64,
}

/// Solves `matrix · x = rhs` through a singular value decomposition.
///
/// The matrix is singular when its smallest singular value is at most `tol`
/// times its largest. A matrix with non-finite entries is treated as singular.
pub(crate) fn solve(
    matrix: DMatrix<f64>,
    rhs: &DVector<f64>,
    tol: f64,
) -> Result<DVector<f64>, Singular> {
    if matrix.is_empty() {
        return Ok(DVector::zeros(matrix.ncols()));
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(Singular { rcond: f64::NAN });
    }

    let svd = matrix.svd(true, true);
    let largest = svd.singular_values.max();
    let smallest = svd.singular_values.min();
    let rcond = if largest > 0.0 {
        smallest / largest
    } else {
        0.0
    };

    if rcond.is_nan() || rcond <= tol {
        return Err(Singular { rcond });
    }

    svd.solve(rhs, 0.0).map_err(|_| Singular { rcond })
}
