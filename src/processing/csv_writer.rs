use super::config::OutputConfig;
use nalgebra::DMatrix;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write column data to a CSV file. The header line is skipped when
/// `headers` is empty; shorter columns leave trailing cells blank.
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    headers: &[&str],
    data: &[Vec<f64>],
    config: &OutputConfig,
) -> io::Result<()> {
    if !headers.is_empty() && !data.is_empty() && headers.len() != data.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Headers count ({}) doesn't match data columns ({})",
                headers.len(),
                data.len()
            ),
        ));
    }

    let mut file = BufWriter::new(File::create(path)?);
    let sep = config.delimiter.to_string();

    if !headers.is_empty() {
        writeln!(file, "{}", headers.join(sep.as_str()))?;
    }

    let n_rows = data.iter().map(|col| col.len()).max().unwrap_or(0);

    for i in 0..n_rows {
        let row: Vec<String> = data
            .iter()
            .map(|col| {
                if i < col.len() {
                    format!("{:.*e}", config.precision, col[i])
                } else {
                    String::new()
                }
            })
            .collect();
        writeln!(file, "{}", row.join(sep.as_str()))?;
    }

    file.flush()
}

/// Write paired x-y columns, e.g. a per-row error profile.
pub fn write_xy<P: AsRef<Path>>(
    path: P,
    x_header: &str,
    y_header: &str,
    x_data: &[f64],
    y_data: &[f64],
    config: &OutputConfig,
) -> io::Result<()> {
    if x_data.len() != y_data.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "X and Y data lengths don't match ({} vs {})",
                x_data.len(),
                y_data.len()
            ),
        ));
    }
    write_csv(
        path,
        &[x_header, y_header],
        &[x_data.to_vec(), y_data.to_vec()],
        config,
    )
}

/// Write a coordinate matrix, one CSV line per matrix row, no header.
pub fn write_matrix<P: AsRef<Path>>(
    path: P,
    matrix: &DMatrix<f64>,
    config: &OutputConfig,
) -> io::Result<()> {
    let columns: Vec<Vec<f64>> = matrix
        .column_iter()
        .map(|col| col.iter().copied().collect())
        .collect();
    write_csv(path, &[], &columns, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("columns.csv");
        let headers = &["x", "y", "z"];
        let data = vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ];

        write_csv(&path, headers, &data, &OutputConfig::default()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("x,y,z\n"));
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn header_count_must_match() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_csv(
            dir.path().join("bad.csv"),
            &["x"],
            &[vec![1.0], vec![2.0]],
            &OutputConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn matrix_rows_become_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.csv");
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let config = OutputConfig {
            precision: 1,
            delimiter: ';',
            write_summary: false,
        };
        write_matrix(&path, &m, &config).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["1.0e0;2.0e0;3.0e0", "4.0e0;5.0e0;6.0e0"]);
    }

    #[test]
    fn xy_pairs_share_a_header_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.csv");
        let config = OutputConfig {
            precision: 2,
            ..OutputConfig::default()
        };
        write_xy(&path, "row", "error", &[0.0, 1.0], &[0.5, 0.25], &config).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["row,error", "0.00e0,5.00e-1", "1.00e0,2.50e-1"]);
    }

    #[test]
    fn xy_lengths_must_match() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_xy(
            dir.path().join("bad.csv"),
            "x",
            "y",
            &[1.0, 2.0],
            &[1.0],
            &OutputConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
