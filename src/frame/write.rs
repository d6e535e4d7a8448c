// src/frame/write.rs

use crate::error::{LoadError, Result};
use crate::frame::Table;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};
use tracing::{debug, instrument};

impl Table {
    /// Header line, then one line per row, all joined with the table's own
    /// delimiter. Floats use the shortest form that parses back exactly.
    pub fn write_delimited<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.header().join(self.delimiter()))?;
        for row in self.rows() {
            let line = row
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(self.delimiter());
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    #[instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| LoadError::io(path, e))?;
        self.write_delimited(BufWriter::new(file))
            .map_err(|e| LoadError::io(path, e))?;
        debug!(rows = self.row_count(), "table written");
        Ok(())
    }
}
