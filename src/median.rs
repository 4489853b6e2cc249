// Medians and running median filters

use log::debug;
use ndarray::{
    s, Array, Array1, Array2, ArrayBase, ArrayD, ArrayView1, ArrayView2, Axis, Data, Dimension,
    Ix1, Ix2, RemoveAxis,
};
use rayon::prelude::*;

use crate::errors::{IdlError, Result};

/// Median of `values`, reordering them in place.
///
/// With an even count the upper of the two central values is returned,
/// unless `even` is set, in which case the two are averaged.
/// `values` must not be empty.
fn median_of(values: &mut [f64], even: bool) -> f64 {
    values.sort_unstable_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n % 2 == 0 && even {
        0.5 * (values[n / 2 - 1] + values[n / 2])
    } else {
        values[n / 2]
    }
}

/// Median of every element of `array`, whatever its shape.
///
/// # Errors
/// `InvalidArgument` if `array` is empty.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use idlstat::median;
///
/// let data = array![4.0, 1.0, 3.0, 2.0];
/// assert_eq!(median(&data, false).unwrap(), 3.0);
/// assert_eq!(median(&data, true).unwrap(), 2.5);
/// ```
pub fn median<S, D>(array: &ArrayBase<S, D>, even: bool) -> Result<f64>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if array.is_empty() {
        return Err(IdlError::InvalidArgument(
            "median of an empty array".to_string(),
        ));
    }
    let mut values: Vec<f64> = array.iter().copied().collect();
    Ok(median_of(&mut values, even))
}

/// Median of each lane along `axis`. The result has one dimension fewer than
/// `array`.
///
/// # Errors
/// `InvalidArgument` if `axis` does not exist or has length zero.
pub fn median_axis<S, D>(
    array: &ArrayBase<S, D>,
    axis: Axis,
    even: bool,
) -> Result<Array<f64, D::Smaller>>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    if axis.index() >= array.ndim() {
        return Err(IdlError::InvalidArgument(format!(
            "axis {} is out of range for an array of {} dimension(s)",
            axis.index(),
            array.ndim()
        )));
    }
    if array.len_of(axis) == 0 {
        return Err(IdlError::InvalidArgument(format!(
            "axis {} has length zero",
            axis.index()
        )));
    }
    Ok(array.map_axis(axis, |lane| {
        let mut values = lane.to_vec();
        median_of(&mut values, even)
    }))
}

/// Running median with a window of `width` elements (1-D input) or
/// `width` x `width` elements (2-D input).
///
/// Elements whose window would run past an edge of the array are copied
/// unchanged, as are all elements when `width <= 1` or the window is larger
/// than the array. The window at `i` starts at `i - (width - 1) / 2`, so an
/// even width reaches one element further to the right than to the left.
///
/// # Errors
/// `InvalidInputShape` if `array` is neither 1- nor 2-dimensional.
pub fn median_filter<S, D>(array: &ArrayBase<S, D>, width: usize, even: bool) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let ndim = array.ndim();
    debug!("median_filter: shape {:?}, width {}", array.shape(), width);
    let filtered: ArrayD<f64> = match ndim {
        1 => {
            let view = array
                .view()
                .into_dimensionality::<Ix1>()
                .map_err(|e| IdlError::from_shape(e, "1 or 2", ndim))?;
            filter_1d(view, width, even).into_dyn()
        }
        2 => {
            let view = array
                .view()
                .into_dimensionality::<Ix2>()
                .map_err(|e| IdlError::from_shape(e, "1 or 2", ndim))?;
            filter_2d(view, width, even).into_dyn()
        }
        _ => {
            return Err(IdlError::InvalidInputShape {
                expected: "1 or 2",
                found: ndim,
            })
        }
    };
    filtered
        .into_dimensionality::<D>()
        .map_err(|e| IdlError::from_shape(e, "1 or 2", ndim))
}

fn filter_1d(x: ArrayView1<f64>, width: usize, even: bool) -> Array1<f64> {
    let n = x.len();
    let mut out = x.to_owned();
    if width <= 1 || width > n {
        return out;
    }
    let half = (width - 1) / 2;
    let mut window = Vec::with_capacity(width);
    for i in half..=(n - width + half) {
        window.clear();
        window.extend(x.slice(s![i - half..i - half + width]).iter().copied());
        out[i] = median_of(&mut window, even);
    }
    out
}

fn filter_2d(x: ArrayView2<f64>, width: usize, even: bool) -> Array2<f64> {
    let (n_rows, n_cols) = x.dim();
    let mut out = x.to_owned();
    if width <= 1 || width > n_rows || width > n_cols {
        return out;
    }
    let half = (width - 1) / 2;
    let last_row = n_rows - width + half;
    let last_col = n_cols - width + half;

    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            if i < half || i > last_row {
                return;
            }
            let mut window = Vec::with_capacity(width * width);
            for j in half..=last_col {
                window.clear();
                window.extend(
                    x.slice(s![i - half..i - half + width, j - half..j - half + width])
                        .iter()
                        .copied(),
                );
                row[j] = median_of(&mut window, even);
            }
        });
    out
}
