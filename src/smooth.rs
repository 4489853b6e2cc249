// Boxcar smoothing

use ndarray::{s, Array1, ArrayBase, Data, Ix1};

/// Boxcar (running mean) smoothing of `signal` over `width` points.
///
/// An even `width` is bumped to the next odd number so the window stays
/// centred. Widths below 3 return the signal unchanged. Points closer than
/// `width / 2` to either end are copied unchanged, unless `edge_truncate` is
/// set, in which case their window is completed by repeating the end value.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use idlstat::smooth;
///
/// let y = array![0.0, 0.0, 3.0, 0.0, 0.0];
/// assert_eq!(smooth(&y, 3, false), array![0.0, 1.0, 1.0, 1.0, 0.0]);
/// ```
pub fn smooth<S>(signal: &ArrayBase<S, Ix1>, width: usize, edge_truncate: bool) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    let width = if width % 2 == 0 { width + 1 } else { width };
    let mut out = signal.to_owned();
    if width < 3 {
        return out;
    }

    let n = signal.len();
    let half = width / 2;
    let denom = width as f64;
    let last = n.saturating_sub(1);

    for i in 0..n {
        if i >= half && i + half < n {
            out[i] = signal.slice(s![i - half..=i + half]).sum() / denom;
        } else if edge_truncate {
            let sum: f64 = (0..width)
                .map(|k| {
                    let j = (i + k).saturating_sub(half).min(last);
                    signal[j]
                })
                .sum();
            out[i] = sum / denom;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn width_one_returns_input() {
        let y = array![1.0, -2.0, 3.5, 0.25];
        assert_eq!(smooth(&y, 1, false), y);
        assert_eq!(smooth(&y, 1, true), y);
    }

    #[test]
    fn even_width_is_widened() {
        let y = array![0.0, 0.0, 3.0, 0.0, 0.0];
        assert_eq!(smooth(&y, 2, false), smooth(&y, 3, false));
    }

    #[test]
    fn linear_signal_interior_is_unchanged() {
        let y = Array1::range(0.0, 10.0, 1.0);
        let s = smooth(&y, 5, false);
        assert_eq!(s.len(), y.len());
        for i in 0..10 {
            assert_abs_diff_eq!(s[i], y[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn edges_copied_without_truncation() {
        let y = array![5.0, 1.0, 1.0, 1.0, 1.0, 1.0, 9.0];
        let s = smooth(&y, 5, false);
        assert_eq!(s[0], 5.0);
        assert_eq!(s[1], 1.0);
        assert_eq!(s[5], 1.0);
        assert_eq!(s[6], 9.0);
        assert_abs_diff_eq!(s[2], 9.0 / 5.0, epsilon = 1e-12);
    }

    #[test]
    fn edge_truncate_repeats_end_values() {
        let y = array![5.0, 1.0, 1.0, 1.0, 1.0, 1.0, 9.0];
        let s = smooth(&y, 5, true);
        // window for 0 is [5, 5, 5, 1, 1]
        assert_abs_diff_eq!(s[0], 17.0 / 5.0, epsilon = 1e-12);
        // window for 1 is [5, 5, 1, 1, 1]
        assert_abs_diff_eq!(s[1], 13.0 / 5.0, epsilon = 1e-12);
        // window for 6 is [1, 1, 9, 9, 9]
        assert_abs_diff_eq!(s[6], 29.0 / 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s[3], 5.0 / 5.0, epsilon = 1e-12);
    }

    #[test]
    fn window_wider_than_signal() {
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(smooth(&y, 7, false), y);
        let truncated = smooth(&y, 7, true);
        // window for 1 is [1, 1, 1, 2, 3, 3, 3]
        assert_abs_diff_eq!(truncated[1], 14.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_signal() {
        let y = Array1::<f64>::zeros(0);
        assert_eq!(smooth(&y, 5, true).len(), 0);
    }
}
