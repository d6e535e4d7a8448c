// src/load/scan.rs

use crate::error::{LoadError, Result};
use crate::load::tokenize::{data_fields, is_blank, next_line};
use serde::Serialize;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use tracing::{debug, instrument};

/// `(rows, columns)` of the data below the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }
}

/// One pass over `reader`: skip the header, take the column count from the
/// first data line, count every non-blank data line.
///
/// Only the first data line is sampled for width; later rows are not
/// checked here.
pub fn scan_dimensions<R: BufRead>(mut reader: R, delimiter: &str) -> io::Result<Dimensions> {
    let mut dims = Dimensions::default();
    let mut buf = Vec::new();
    let mut seen_header = false;
    let mut sampled = false;

    while let Some(line) = next_line(&mut reader, &mut buf)? {
        if !seen_header {
            seen_header = true;
            continue;
        }
        if is_blank(&line) {
            continue;
        }
        if !sampled {
            dims.columns = data_fields(&line, delimiter).len();
            sampled = true;
        }
        dims.rows += 1;
    }

    Ok(dims)
}

/// Open `path`, scan it, close it.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn scan_file(path: impl AsRef<Path>, delimiter: &str) -> Result<Dimensions> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    debug!("opened for scan");
    let dims =
        scan_dimensions(BufReader::new(file), delimiter).map_err(|e| LoadError::io(path, e))?;
    debug!(rows = dims.rows, columns = dims.columns, "scan complete, closed");
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn scan(text: &str) -> Dimensions {
        scan_dimensions(Cursor::new(text), ", ").unwrap()
    }

    #[test]
    fn counts_rows_and_sampled_columns() {
        assert_eq!(scan("a, b, c\n1, 2, 3\n4, 5, 6\n"), Dimensions::new(2, 3));
    }

    #[test]
    fn missing_final_newline_still_counts() {
        assert_eq!(scan("a, b\n1, 2\n3, 4"), Dimensions::new(2, 2));
    }

    #[test]
    fn header_only_is_zero_by_zero() {
        assert_eq!(scan("a, b, c\n"), Dimensions::new(0, 0));
        assert_eq!(scan(""), Dimensions::new(0, 0));
    }

    #[test]
    fn width_comes_from_first_data_row_only() {
        // the wider second row is not looked at
        assert_eq!(scan("a, b\n1, 2\n3, 4, 5\n"), Dimensions::new(2, 2));
    }

    #[test]
    fn blank_lines_are_not_rows() {
        assert_eq!(scan("a, b\n\n1, 2\n   \n3, 4\n\n"), Dimensions::new(2, 2));
    }

    #[test]
    fn trailing_delimiter_does_not_add_a_column() {
        assert_eq!(scan("a, b\n1, 2, \n"), Dimensions::new(1, 2));
    }

    #[test]
    fn non_utf8_header_still_scans() {
        let dims = scan_dimensions(Cursor::new(&b"temp\xb0C, b\n1, 2\n"[..]), ", ").unwrap();
        assert_eq!(dims, Dimensions::new(1, 2));
    }

    #[test]
    fn scans_a_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "x;y;z\n1;2;3\n").unwrap();
        let dims = scan_file(tmp.path(), ";").unwrap();
        assert_eq!(dims, Dimensions::new(1, 3));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = scan_file("/no/such/file.csv", ", ").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
