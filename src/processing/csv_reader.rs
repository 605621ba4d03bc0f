use nalgebra::DMatrix;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to read CSV: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}, column {column}: '{value}' is not a number")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },
    #[error("line {line} has {found} values, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("CSV contains no data rows")]
    Empty,
}

/// Read a rectangular numeric CSV into a matrix, one matrix row per line.
/// Blank lines and lines starting with `#` are skipped.
pub fn read_matrix<P: AsRef<Path>>(path: P, delimiter: char) -> Result<DMatrix<f64>, CsvError> {
    let reader = BufReader::new(File::open(path)?);
    parse_matrix(reader, delimiter)
}

pub fn parse_matrix<R: BufRead>(reader: R, delimiter: char) -> Result<DMatrix<f64>, CsvError> {
    let mut values = Vec::new();
    let mut n_cols: Option<usize> = None;
    let mut n_rows = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut found = 0;
        for (col, field) in trimmed.split(delimiter).enumerate() {
            let field = field.trim();
            let value: f64 = field.parse().map_err(|_| CsvError::Parse {
                line: idx + 1,
                column: col + 1,
                value: field.to_string(),
            })?;
            values.push(value);
            found += 1;
        }

        match n_cols {
            None => n_cols = Some(found),
            Some(expected) if expected != found => {
                return Err(CsvError::Ragged {
                    line: idx + 1,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        n_rows += 1;
    }

    let n_cols = n_cols.ok_or(CsvError::Empty)?;
    Ok(DMatrix::from_row_slice(n_rows, n_cols, &values))
}
