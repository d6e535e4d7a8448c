// src/frame/table.rs

use crate::load::scan::Dimensions;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A fully loaded CSV: sanitized header labels plus a dense
/// `row_count × column_count` matrix of `f64`, stored row-major.
///
/// Only the loader hands these out, and only once every cell is filled.
/// Header and cells live and die together.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    dims: Dimensions,
    delimiter: String,
    header: Vec<String>,
    cells: Vec<f64>,
}

impl Table {
    pub(crate) fn from_parts(
        dims: Dimensions,
        delimiter: String,
        header: Vec<String>,
        cells: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(header.len(), dims.columns);
        debug_assert_eq!(Some(cells.len()), dims.cell_count());
        Self {
            dims,
            delimiter,
            header,
            cells,
        }
    }

    pub fn row_count(&self) -> usize {
        self.dims.rows
    }

    pub fn column_count(&self) -> usize {
        self.dims.columns
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.dims.rows == 0
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.dims.rows || column >= self.dims.columns {
            return None;
        }
        self.cells.get(row * self.dims.columns + column).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.dims.rows {
            return None;
        }
        let start = row * self.dims.columns;
        self.cells.get(start..start + self.dims.columns)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        (0..self.dims.rows).map(move |r| {
            let start = r * self.dims.columns;
            &self.cells[start..start + self.dims.columns]
        })
    }

    /// Index of the first column whose label equals `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows().map(|r| r[idx]).collect())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<&[f64]> = self.rows().collect();
        let mut s = serializer.serialize_struct("Table", 5)?;
        s.serialize_field("row_count", &self.dims.rows)?;
        s.serialize_field("column_count", &self.dims.columns)?;
        s.serialize_field("delimiter", &self.delimiter)?;
        s.serialize_field("header", &self.header)?;
        s.serialize_field("cells", &rows)?;
        s.end()
    }
}
