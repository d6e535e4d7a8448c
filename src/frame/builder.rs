// src/frame/builder.rs

use crate::error::{LoadError, Result};
use crate::frame::Table;
use crate::load::scan::{scan_file, Dimensions};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, instrument};

/// An allocated but not yet filled table.
///
/// Header slots start as empty strings and cells as `0.0`; the loader
/// overwrites them and calls [`FrameBuilder::finish`].
#[derive(Debug)]
pub struct FrameBuilder {
    dims: Dimensions,
    delimiter: String,
    header: Vec<String>,
    cells: Vec<f64>,
}

fn try_alloc<T: Clone>(len: usize, fill: T, dims: Dimensions) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| LoadError::Allocation {
            rows: dims.rows,
            columns: dims.columns,
        })?;
    v.resize(len, fill);
    Ok(v)
}

impl FrameBuilder {
    /// Allocate header and cell storage for `dims` up front.
    pub fn new(dims: Dimensions, delimiter: impl Into<String>) -> Result<Self> {
        let cell_count = dims.cell_count().ok_or(LoadError::Allocation {
            rows: dims.rows,
            columns: dims.columns,
        })?;
        let header = try_alloc(dims.columns, String::new(), dims)?;
        let cells = try_alloc(cell_count, 0.0_f64, dims)?;
        debug!(rows = dims.rows, columns = dims.columns, "frame allocated");
        Ok(Self {
            dims,
            delimiter: delimiter.into(),
            header,
            cells,
        })
    }

    /// Wrap cells that were already filled row by row.
    pub(crate) fn from_filled(
        columns: usize,
        delimiter: impl Into<String>,
        cells: Vec<f64>,
    ) -> Result<Self> {
        let rows = if columns == 0 { 0 } else { cells.len() / columns };
        let dims = Dimensions::new(rows, columns);
        let header = try_alloc(columns, String::new(), dims)?;
        Ok(Self {
            dims,
            delimiter: delimiter.into(),
            header,
            cells,
        })
    }

    /// Scan `path` for its dimensions, then allocate.
    #[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>, delimiter: &str) -> Result<Self> {
        let dims = scan_file(path, delimiter)?;
        Self::new(dims, delimiter)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Fill header slots in order. Missing labels stay `""`; surplus labels
    /// are dropped and their count returned.
    pub fn set_header<I>(&mut self, labels: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut labels = labels.into_iter();
        for (slot, label) in self.header.iter_mut().zip(labels.by_ref()) {
            *slot = label;
        }
        labels.count()
    }

    pub fn row_mut(&mut self, row: usize) -> Option<&mut [f64]> {
        if row >= self.dims.rows {
            return None;
        }
        let start = row * self.dims.columns;
        self.cells.get_mut(start..start + self.dims.columns)
    }

    /// Disjoint mutable row slices, for filling rows in parallel.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, f64> {
        // zero columns means zero cells, so the chunk size never matters there
        self.cells.par_chunks_mut(self.dims.columns.max(1))
    }

    pub fn finish(self) -> Table {
        Table::from_parts(self.dims, self.delimiter, self.header, self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn allocates_to_scanned_size() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "a, b, c\n1, 2, 3\n4, 5, 6\n").unwrap();
        let fb = FrameBuilder::from_file(tmp.path(), ", ").unwrap();
        assert_eq!(fb.dimensions(), Dimensions::new(2, 3));
        assert_eq!(fb.delimiter(), ", ");
        let t = fb.finish();
        assert_eq!(t.header(), &["", "", ""]);
        assert_eq!(t.cells(), &[0.0; 6]);
    }

    #[test]
    fn header_pads_and_reports_surplus() {
        let mut fb = FrameBuilder::new(Dimensions::new(0, 3), ",").unwrap();
        assert_eq!(fb.set_header(vec!["x".to_string()]), 0);
        assert_eq!(fb.finish().header(), &["x", "", ""]);

        let mut fb = FrameBuilder::new(Dimensions::new(0, 1), ",").unwrap();
        let dropped = fb.set_header(["x", "y", "z"].map(String::from));
        assert_eq!(dropped, 2);
        assert_eq!(fb.finish().header(), &["x"]);
    }

    #[test]
    fn rows_are_addressable() {
        let mut fb = FrameBuilder::new(Dimensions::new(2, 2), ",").unwrap();
        fb.row_mut(1).unwrap().copy_from_slice(&[7.0, 8.0]);
        assert!(fb.row_mut(2).is_none());
        assert_eq!(fb.finish().get(1, 1), Some(8.0));
    }

    #[test]
    fn overflowing_dimensions_are_an_allocation_error() {
        let err = FrameBuilder::new(Dimensions::new(usize::MAX, 2), ",").unwrap_err();
        assert!(matches!(err, LoadError::Allocation { .. }));
    }

    #[test]
    fn huge_frame_is_an_allocation_error() {
        // byte size overflows isize
        let err = FrameBuilder::new(Dimensions::new(usize::MAX / 4, 1), ",").unwrap_err();
        assert!(matches!(err, LoadError::Allocation { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FrameBuilder::from_file("/no/such/file.csv", ", ").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
