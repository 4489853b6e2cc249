// Line counting for plain and gzip-compressed text files

use flate2::read::MultiGzDecoder;
use log::debug;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::Result;

fn open_reader(path: &Path, compress: bool) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if compress {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Counts newline-terminated lines, plus a final unterminated one if present.
fn count_lines<R: BufRead>(mut reader: R) -> Result<usize> {
    let mut lines = 0usize;
    let mut last_byte = None;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        lines += buf.iter().filter(|&&b| b == b'\n').count();
        last_byte = buf.last().copied();
        let consumed = buf.len();
        reader.consume(consumed);
    }
    if matches!(last_byte, Some(b) if b != b'\n') {
        lines += 1;
    }
    Ok(lines)
}

/// Number of lines in the file at `path`.
///
/// With `compress` set the file is decoded as (possibly multi-member) gzip
/// first. An empty file has zero lines; a last line without a trailing
/// newline is still counted.
///
/// # Errors
/// `IdlError::Io` if the file cannot be opened or read.
pub fn file_lines<P: AsRef<Path>>(path: P, compress: bool) -> Result<usize> {
    let path = path.as_ref();
    let n = count_lines(open_reader(path, compress)?)?;
    debug!("file_lines: {} has {} line(s)", path.display(), n);
    Ok(n)
}

/// [`file_lines`] for several files, counted in parallel. The counts are
/// returned in the same order as `paths`; the first failure aborts the call.
pub fn file_lines_many<P>(paths: &[P], compress: bool) -> Result<Vec<usize>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|p| file_lines(p, compress))
        .collect()
}
