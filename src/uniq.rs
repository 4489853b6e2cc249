// Run-end indices of sorted data

use ndarray::{Array1, ArrayBase, Data, Ix1};

use crate::errors::{IdlError, Result};

/// Positions `i` in `0..n` where a run of equal values ends. The final
/// position always ends a run.
fn run_ends<F>(n: usize, same_as_next: F) -> Vec<usize>
where
    F: Fn(usize) -> bool,
{
    if n == 0 {
        return Vec::new();
    }
    (0..n - 1)
        .filter(|&i| !same_as_next(i))
        .chain(std::iter::once(n - 1))
        .collect()
}

/// Index of the last element of every run of equal values in `items`.
///
/// `items` is expected to be sorted, in which case the result holds exactly
/// one index per distinct value. An array of identical values yields its last
/// index and an empty array yields nothing.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use idlstat::uniq;
///
/// let sorted = array![1, 1, 2, 5, 5, 5];
/// assert_eq!(uniq(&sorted), array![1, 2, 5]);
/// ```
pub fn uniq<S>(items: &ArrayBase<S, Ix1>) -> Array1<usize>
where
    S: Data,
    S::Elem: PartialEq,
{
    Array1::from(run_ends(items.len(), |i| items[i] == items[i + 1]))
}

/// Like [`uniq`] for data that is sorted through `index` (for instance the
/// output of an argsort): runs are found in `items[index[..]]` and the
/// returned values are taken from `index`. All-identical items therefore give
/// `[index[n - 1]]`, a position in `items`.
///
/// # Errors
/// `InvalidArgument` if an entry of `index` is out of range for `items`.
pub fn uniq_indexed<S, T>(items: &ArrayBase<S, Ix1>, index: &ArrayBase<T, Ix1>) -> Result<Array1<usize>>
where
    S: Data,
    S::Elem: PartialEq,
    T: Data<Elem = usize>,
{
    if let Some(&bad) = index.iter().find(|&&i| i >= items.len()) {
        return Err(IdlError::InvalidArgument(format!(
            "index {} is out of range for {} items",
            bad,
            items.len()
        )));
    }
    let ends = run_ends(index.len(), |k| items[index[k]] == items[index[k + 1]]);
    Ok(ends.into_iter().map(|k| index[k]).collect())
}
