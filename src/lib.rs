// Data-reduction numerics: principal components, medians, smoothing, run indices

#![doc = include_str!("../README.md")]

pub mod errors;
pub mod file_lines;
pub mod linalg_backends;
pub mod median;
pub mod pcomp;
pub mod smooth;
pub mod uniq;

pub use errors::{IdlError, Result};
pub use file_lines::{file_lines, file_lines_many};
pub use median::{median, median_axis, median_filter};
pub use pcomp::{pcomp, Pcomp, PcompConfig};
pub use smooth::smooth;
pub use uniq::{uniq, uniq_indexed};
