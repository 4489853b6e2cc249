// Principal components of a set of observations (pcomp)

use log::{debug, trace, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Axis, Data, Dimension, Ix2};
use serde::{Deserialize, Serialize};

use crate::errors::{IdlError, Result};
use crate::linalg_backends::{eigh_descending, BackendEigh, EighOutput, NdarrayLinAlgBackend};

/// Settings for [`Pcomp::compute`].
///
/// The default analyses the correlation matrix of the data exactly as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcompConfig {
    /// Eigendecompose the covariance matrix instead of the correlation matrix.
    pub covariance: bool,
    /// Mean-center each variable and divide by its population standard
    /// deviation before anything else. Derived scores are then computed from
    /// the standardized array.
    pub standardize: bool,
}

impl PcompConfig {
    pub fn with_covariance(mut self, covariance: bool) -> Self {
        self.covariance = covariance;
        self
    }

    pub fn with_standardize(mut self, standardize: bool) -> Self {
        self.standardize = standardize;
        self
    }
}

/// Result of a principal component analysis.
///
/// All four arrays are ordered by descending eigenvalue: column `k` of
/// `coefficients` and `derived`, and element `k` of `eigenvalues` and
/// `variance`, all describe the same component.
///
/// The sign of each eigenvector is whatever the eigensolver returned, so
/// `coefficients` and `derived` are only meaningful up to a sign per column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pcomp {
    /// Observations projected onto the principal axes.
    /// Shape: (n_observations, n_variables)
    derived: Array2<f64>,
    /// Unit-norm eigenvectors, one per column.
    /// Shape: (n_variables, n_variables)
    coefficients: Array2<f64>,
    /// Eigenvalues of the covariance or correlation matrix, largest first.
    /// Shape: (n_variables)
    eigenvalues: Array1<f64>,
    /// Each eigenvalue divided by the sum of all eigenvalues.
    /// Shape: (n_variables)
    variance: Array1<f64>,
}

/// Principal components of `data` (observations as rows, variables as
/// columns), from the covariance matrix if `covariance` is set and from the
/// correlation matrix otherwise.
///
/// Shorthand for [`Pcomp::compute`] with `standardize` off.
///
/// # Errors
/// `IdlError::InvalidInputShape` if `data` is not two-dimensional.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use idlstat::pcomp;
///
/// let data = array![[1.0, 2.0], [2.0, 3.9], [3.0, 6.1], [4.0, 8.0]];
/// let result = pcomp(&data, true).unwrap();
/// assert_eq!(result.coefficients().dim(), (2, 2));
/// assert!(result.eigenvalues()[0] >= result.eigenvalues()[1]);
/// ```
pub fn pcomp<S, D>(data: &ArrayBase<S, D>, covariance: bool) -> Result<Pcomp>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    Pcomp::compute(data, &PcompConfig::default().with_covariance(covariance))
}

impl Pcomp {
    /// Runs the analysis with the LAPACK eigensolver.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `data` is not two-dimensional (`InvalidInputShape`).
    /// - `data` has fewer than 2 observations or no variables (`InvalidArgument`).
    /// - The eigensolver fails (`Eigendecomposition`).
    /// - A variable has zero variance while `standardize` is set or
    ///   `covariance` is off (`Eigendecomposition`). The affected columns are
    ///   also named in a `warn!` record.
    pub fn compute<S, D>(data: &ArrayBase<S, D>, config: &PcompConfig) -> Result<Self>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        Self::compute_with_backend(data, config, &NdarrayLinAlgBackend)
    }

    /// Same as [`Pcomp::compute`] but with a caller supplied eigensolver.
    pub fn compute_with_backend<S, D, B>(
        data: &ArrayBase<S, D>,
        config: &PcompConfig,
        backend: &B,
    ) -> Result<Self>
    where
        S: Data<Elem = f64>,
        D: Dimension,
        B: BackendEigh<f64> + ?Sized,
    {
        let ndim = data.ndim();
        let data = data
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| IdlError::from_shape(e, "2", ndim))?;
        let (n_observations, n_variables) = data.dim();
        debug!(
            "pcomp: {} observations x {} variables (covariance={}, standardize={})",
            n_observations, n_variables, config.covariance, config.standardize
        );

        if n_variables == 0 {
            return Err(IdlError::InvalidArgument(
                "input has zero variables".to_string(),
            ));
        }
        if n_observations < 2 {
            return Err(IdlError::InvalidArgument(format!(
                "at least 2 observations are required, got {}",
                n_observations
            )));
        }

        let working = if config.standardize {
            standardize(data)
        } else {
            data.to_owned()
        };

        let matrix = if config.covariance {
            covariance_matrix(working.view())?
        } else {
            correlation_matrix(working.view())?
        };
        trace!("pcomp: decomposing {:?}", matrix);

        let EighOutput { eigenvalues, eigenvectors } = eigh_descending(backend, &matrix)?;
        if eigenvalues.len() != n_variables || eigenvectors.dim() != (n_variables, n_variables) {
            return Err(IdlError::Eigendecomposition(format!(
                "expected {} eigen-pairs, backend returned {} values and a {:?} vector matrix",
                n_variables,
                eigenvalues.len(),
                eigenvectors.dim()
            )));
        }

        let derived = working.dot(&eigenvectors);
        let total: f64 = eigenvalues.sum();
        let variance = eigenvalues.mapv(|lambda| lambda / total);
        debug!("pcomp: eigenvalues {:?}, variance {:?}", eigenvalues, variance);

        Ok(Self {
            derived,
            coefficients: eigenvectors,
            eigenvalues,
            variance,
        })
    }

    /// Observations projected onto the principal axes,
    /// shape (n_observations, n_variables).
    pub fn derived(&self) -> &Array2<f64> {
        &self.derived
    }

    /// Eigenvectors as columns, shape (n_variables, n_variables).
    pub fn coefficients(&self) -> &Array2<f64> {
        &self.coefficients
    }

    /// Eigenvalues, largest first.
    pub fn eigenvalues(&self) -> &Array1<f64> {
        &self.eigenvalues
    }

    /// Fraction of the total variance carried by each component. Sums to 1.
    pub fn variance(&self) -> &Array1<f64> {
        &self.variance
    }
}

/// Centers every column on zero and scales it to unit population standard
/// deviation. A constant column divides by zero and becomes NaN, which
/// `eigh_descending` later rejects.
fn standardize(data: ArrayView2<f64>) -> Array2<f64> {
    let mut out = data.to_owned();
    if let Some(mean) = data.mean_axis(Axis(0)) {
        out -= &mean;
    }
    let std_dev = out.map_axis(Axis(0), |column| column.std(0.0));
    warn_on_constant_columns(&std_dev, "standardization");
    out /= &std_dev;
    out
}

/// Unbiased (n - 1) covariance matrix of the columns of `data`.
///
/// # Errors
/// `InvalidArgument` if `data` has fewer than 2 rows.
pub fn covariance_matrix(data: ArrayView2<f64>) -> Result<Array2<f64>> {
    let n = data.nrows();
    if n < 2 {
        return Err(IdlError::InvalidArgument(format!(
            "covariance needs at least 2 observations, got {}",
            n
        )));
    }
    let mean = data
        .mean_axis(Axis(0))
        .ok_or_else(|| IdlError::InvalidArgument("cannot take the mean of an empty array".to_string()))?;
    let centered = &data - &mean;
    let mut cov = centered.t().dot(&centered);
    cov /= (n - 1) as f64;
    Ok(cov)
}

/// Pearson correlation matrix of the columns of `data`.
///
/// Entries involving a zero-variance column are NaN.
pub fn correlation_matrix(data: ArrayView2<f64>) -> Result<Array2<f64>> {
    let cov = covariance_matrix(data)?;
    let std_dev = cov.diag().mapv(f64::sqrt);
    warn_on_constant_columns(&std_dev, "correlation matrix");
    let n = cov.nrows();
    Ok(Array2::from_shape_fn((n, n), |(i, j)| {
        cov[[i, j]] / (std_dev[i] * std_dev[j])
    }))
}

fn warn_on_constant_columns(std_dev: &Array1<f64>, context: &str) {
    let constant: Vec<usize> = std_dev
        .iter()
        .enumerate()
        .filter(|(_, &s)| s == 0.0)
        .map(|(i, _)| i)
        .collect();
    if !constant.is_empty() {
        warn!(
            "{}: column(s) {:?} have zero variance; the eigendecomposition will be refused",
            context, constant
        );
    }
}
