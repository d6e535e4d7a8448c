// src/load/mod.rs
pub mod scan;
pub mod tokenize;
pub mod trimming;

use crate::config::{LoadConfig, Strictness};
use crate::error::{LoadError, Result};
use crate::frame::{FrameBuilder, Table};
use rayon::prelude::*;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info, instrument, warn};

pub use scan::{scan_dimensions, scan_file, Dimensions};
pub use tokenize::{tokenize, Tokens};
pub use trimming::trim_token;

/// A data line still to be parsed, with its 1-based line number in the source.
#[derive(Debug)]
struct DataLine {
    number: usize,
    text: String,
}

/// Sanitized labels of the header line.
fn header_labels(line: &str, delimiter: &str) -> Vec<String> {
    tokenize::data_fields(line, delimiter)
        .into_iter()
        .map(|tok| {
            let label = trim_token(tok);
            debug!(label = %label, "header label");
            label
        })
        .collect()
}

fn fill_header(fb: &mut FrameBuilder, line: Option<&str>) {
    let labels = line
        .map(|l| header_labels(l, fb.delimiter()))
        .unwrap_or_default();
    let found = labels.len();
    let expected = fb.dimensions().columns;
    let dropped = fb.set_header(labels);
    if dropped > 0 && expected > 0 {
        warn!(expected, found, "more header labels than data columns, extras dropped");
    } else if found < expected {
        warn!(expected, found, "fewer header labels than data columns, padded with empty labels");
    }
}

fn parse_cell(line: usize, column: usize, token: &str, strictness: Strictness) -> Result<f64> {
    match token.trim().parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) if strictness == Strictness::Lenient => {
            warn!(line, column, token, "not a number, stored as 0.0");
            Ok(0.0)
        }
        Err(_) => Err(LoadError::Parse {
            line,
            column,
            token: token.to_string(),
        }),
    }
}

/// Parse `fields` into `out`, which is exactly one row wide.
fn parse_row(line: usize, fields: &[&str], out: &mut [f64], strictness: Strictness) -> Result<()> {
    let expected = out.len();
    if fields.len() != expected {
        match strictness {
            Strictness::Strict => {
                return Err(LoadError::DimensionMismatch {
                    line,
                    expected,
                    found: fields.len(),
                })
            }
            Strictness::Lenient => {
                warn!(line, expected, found = fields.len(), "row width differs, truncated or padded with 0.0");
            }
        }
    }
    for (column, slot) in out.iter_mut().enumerate() {
        *slot = match fields.get(column) {
            Some(tok) => parse_cell(line, column, tok, strictness)?,
            None => 0.0,
        };
    }
    Ok(())
}

/// Blank lines seen since the last data line. Those followed by more data
/// sit inside the table and are reported; trailing ones are not.
#[derive(Debug, Default)]
struct BlankLines {
    pending: Vec<usize>,
}

impl BlankLines {
    fn blank(&mut self, line: usize) {
        self.pending.push(line);
    }

    /// A data line arrived; returns how many blank lines it closed off.
    fn data(&mut self) -> usize {
        let skipped = self.pending.len();
        if skipped > 0 {
            warn!(lines = ?self.pending, "blank lines inside the data skipped, not counted as rows");
            self.pending.clear();
        }
        skipped
    }
}

/// Read the header and at most `limit` non-blank data lines.
fn read_lines<R: BufRead>(
    mut reader: R,
    limit: usize,
) -> io::Result<(Option<String>, Vec<DataLine>)> {
    let mut buf = Vec::new();
    let header = tokenize::next_line(&mut reader, &mut buf)?;
    let mut data = Vec::with_capacity(limit);
    let mut blanks = BlankLines::default();
    let mut ignored = 0usize;
    let mut number = 1;

    while let Some(text) = tokenize::next_line(&mut reader, &mut buf)? {
        number += 1;
        if tokenize::is_blank(&text) {
            blanks.blank(number);
            continue;
        }
        if data.len() == limit {
            ignored += 1;
            continue;
        }
        blanks.data();
        data.push(DataLine { number, text });
    }

    if ignored > 0 {
        warn!(ignored, "source grew after the dimension scan, extra lines ignored");
    }
    Ok((header, data))
}

/// Load `config.path` as a header line plus numeric rows.
///
/// Two full passes over the file: the first sizes the frame, the second
/// fills it. Rows are parsed in parallel once the frame exists, and the
/// table is only returned after every row has been filled.
#[instrument(level = "info", skip(config), fields(path = %config.path.display()))]
pub fn load_csv(config: &LoadConfig) -> Result<Table> {
    config.validate()?;
    let path = config.path.as_path();
    let delimiter = config.delimiter.as_str();
    let strictness = config.strictness;

    let mut fb = FrameBuilder::from_file(path, delimiter)?;
    let dims = fb.dimensions();

    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    debug!("opened for load");
    let (header, lines) =
        read_lines(BufReader::new(file), dims.rows).map_err(|e| LoadError::io(path, e))?;
    debug!("closed");

    if lines.len() < dims.rows {
        return Err(LoadError::io(
            path,
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "source shrank after the dimension scan: expected {} data lines, found {}",
                    dims.rows,
                    lines.len()
                ),
            ),
        ));
    }

    fill_header(&mut fb, header.as_deref());

    let first_err = fb
        .par_rows_mut()
        .zip(lines.par_iter())
        .filter_map(|(out, line)| {
            let fields = tokenize::data_fields(&line.text, delimiter);
            parse_row(line.number, &fields, out, strictness).err()
        })
        .min_by_key(|e| e.line());
    if let Some(err) = first_err {
        return Err(err);
    }

    let table = fb.finish();
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded"
    );
    Ok(table)
}

/// Same result as [`load_csv`] from a single read of the file: rows go into
/// a growing buffer and the column count locks in at the first data row.
#[instrument(level = "info", skip(config), fields(path = %config.path.display()))]
pub fn load_csv_single_pass(config: &LoadConfig) -> Result<Table> {
    config.validate()?;
    let path = config.path.as_path();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    debug!("opened for load");
    let table = load_buffered(BufReader::new(file), path, &config.delimiter, config.strictness)?;
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded"
    );
    Ok(table)
}

/// Single-pass load from any buffered reader.
pub fn load_from_reader<R: BufRead>(
    reader: R,
    delimiter: &str,
    strictness: Strictness,
) -> Result<Table> {
    if delimiter.is_empty() {
        return Err(LoadError::Config("delimiter must not be empty".into()));
    }
    load_buffered(reader, Path::new("<reader>"), delimiter, strictness)
}

fn load_buffered<R: BufRead>(
    mut reader: R,
    source: &Path,
    delimiter: &str,
    strictness: Strictness,
) -> Result<Table> {
    let mut buf = Vec::new();
    let mut next = |reader: &mut R| {
        tokenize::next_line(reader, &mut buf).map_err(|e| LoadError::io(source, e))
    };
    let header = next(&mut reader)?;

    let mut columns: Option<usize> = None;
    let mut cells: Vec<f64> = Vec::new();
    let mut blanks = BlankLines::default();
    let mut number = 1;
    while let Some(text) = next(&mut reader)? {
        number += 1;
        if tokenize::is_blank(&text) {
            blanks.blank(number);
            continue;
        }
        blanks.data();
        let fields = tokenize::data_fields(&text, delimiter);
        let width = *columns.get_or_insert(fields.len());
        let start = cells.len();
        cells
            .try_reserve(width)
            .map_err(|_| LoadError::Allocation {
                rows: start / width.max(1) + 1,
                columns: width,
            })?;
        cells.resize(start + width, 0.0);
        parse_row(number, &fields, &mut cells[start..], strictness)?;
    }

    let mut fb = FrameBuilder::from_filled(columns.unwrap_or(0), delimiter, cells)?;
    fill_header(&mut fb, header.as_deref());
    Ok(fb.finish())
}
