// src/linalg_backends.rs

use ndarray::{Array1, Array2, Axis};
use ndarray_linalg::{Eigh as NdLinalgEigh, UPLO};

use crate::errors::{IdlError, Result};

/// Output of a symmetric eigendecomposition.
#[derive(Debug, Clone)]
pub struct EighOutput<F: 'static> {
    /// Eigenvalues, in whatever order the backend produced them.
    pub eigenvalues: Array1<F>,
    /// Eigenvectors as columns of the matrix.
    /// eigenvectors.column(i) corresponds to eigenvalues[i].
    pub eigenvectors: Array2<F>,
}

/// Trait for symmetric eigendecomposition (similar to LAPACK's DSYEVD).
/// Implementers may assume `matrix` is square and symmetric and read only its upper triangle.
pub trait BackendEigh<F: 'static + Copy + Send + Sync> {
    fn eigh_upper(&self, matrix: &Array2<F>) -> Result<EighOutput<F>>;
}

/// LAPACK-backed solver from `ndarray-linalg`. The LAPACK provider is picked
/// through the `backend_*` cargo features.
#[derive(Debug, Default, Copy, Clone)]
pub struct NdarrayLinAlgBackend;

impl BackendEigh<f64> for NdarrayLinAlgBackend {
    fn eigh_upper(&self, matrix: &Array2<f64>) -> Result<EighOutput<f64>> {
        if matrix.nrows() != matrix.ncols() {
            return Err(IdlError::InvalidArgument(format!(
                "matrix must be square for eigendecomposition, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        if matrix.is_empty() {
            return Ok(EighOutput {
                eigenvalues: Array1::zeros(0),
                eigenvectors: Array2::zeros((0, 0)),
            });
        }
        let (eigenvalues, eigenvectors) = matrix
            .eigh(UPLO::Upper)
            .map_err(|e| IdlError::Eigendecomposition(e.to_string()))?;
        Ok(EighOutput { eigenvalues, eigenvectors })
    }
}

/// Runs `backend` on `matrix` and returns the eigen-pairs ordered by
/// descending eigenvalue.
///
/// A matrix holding NaN or infinite entries is rejected with
/// `IdlError::Eigendecomposition` before the backend sees it, since LAPACK
/// either fails to converge or returns garbage on such input.
pub fn eigh_descending<B>(backend: &B, matrix: &Array2<f64>) -> Result<EighOutput<f64>>
where
    B: BackendEigh<f64> + ?Sized,
{
    if let Some(((i, j), value)) = matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(IdlError::Eigendecomposition(format!(
            "matrix entry ({}, {}) is {}; is a variable constant?",
            i, j, value
        )));
    }
    let EighOutput { eigenvalues, eigenvectors } = backend.eigh_upper(matrix)?;
    if eigenvectors.ncols() != eigenvalues.len() {
        return Err(IdlError::Eigendecomposition(format!(
            "backend returned {} eigenvalues but {} eigenvectors",
            eigenvalues.len(),
            eigenvectors.ncols()
        )));
    }

    let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    Ok(EighOutput {
        eigenvalues: eigenvalues.select(Axis(0), &order),
        eigenvectors: eigenvectors.select(Axis(1), &order),
    })
}
