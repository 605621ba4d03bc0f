use crate::discretization::generator::Placement;
use crate::discretization::mesh::{CenterCoords, EdgeCoords};
use crate::numerics::Tolerance;
use nalgebra::DMatrix;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub struct MeshSummary {
    pub placement: Placement,
    pub num_rows: usize,
    pub num_cols: usize,
    pub x_extent: Option<(f64, f64)>,
    pub y_extent: Option<(f64, f64)>,
    /// Node spacing along each row of X, `None` with a single column.
    pub x_spacing: Option<(f64, f64)>,
    /// Node spacing along each column of Y, `None` with a single row.
    pub y_spacing: Option<(f64, f64)>,
    pub uniform: bool,

    pub round_trip_error: Option<f64>,
}

impl MeshSummary {
    pub fn from_centers(centers: &CenterCoords) -> Self {
        Self::build(Placement::Center, &centers.x, &centers.y)
    }

    pub fn from_edges(edges: &EdgeCoords) -> Self {
        Self::build(Placement::Edge, &edges.x, &edges.y)
    }

    fn build(placement: Placement, x: &DMatrix<f64>, y: &DMatrix<f64>) -> Self {
        let (num_rows, num_cols) = x.shape();

        let x_steps: Vec<f64> = (0..num_rows)
            .flat_map(|i| (1..num_cols).map(move |j| (i, j)))
            .map(|(i, j)| (x[(i, j)] - x[(i, j - 1)]).abs())
            .collect();
        let y_steps: Vec<f64> = (1..num_rows)
            .flat_map(|i| (0..num_cols).map(move |j| (i, j)))
            .map(|(i, j)| (y[(i, j)] - y[(i - 1, j)]).abs())
            .collect();

        let x_spacing = min_max(&x_steps);
        let y_spacing = min_max(&y_steps);
        // an axis without steps cannot vary
        let tol = Tolerance::default();
        let even = |spacing: Option<(f64, f64)>| {
            spacing.is_none_or(|(lo, hi)| tol.check(hi - lo, hi))
        };
        let uniform = even(x_spacing) && even(y_spacing);

        Self {
            placement,
            num_rows,
            num_cols,
            x_extent: min_max(x.as_slice()),
            y_extent: min_max(y.as_slice()),
            x_spacing,
            y_spacing,
            uniform,
            round_trip_error: None,
        }
    }

    pub fn add_round_trip_error(&mut self, max_abs_diff: f64) {
        self.round_trip_error = Some(max_abs_diff);
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file, "MESH COORDINATE SUMMARY")?;
        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file)?;

        writeln!(file, "LAYOUT")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Placement:           {:?}", self.placement)?;
        writeln!(file, "Array shape:         {} x {}", self.num_rows, self.num_cols)?;
        let cells = match self.placement {
            Placement::Center => (self.num_rows, self.num_cols),
            Placement::Edge => (
                self.num_rows.saturating_sub(1),
                self.num_cols.saturating_sub(1),
            ),
        };
        writeln!(file, "Cells:               {} x {}", cells.0, cells.1)?;
        writeln!(file)?;

        writeln!(file, "EXTENT")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "X:                   {}", range_text(self.x_extent, 6))?;
        writeln!(file, "Y:                   {}", range_text(self.y_extent, 6))?;
        writeln!(file)?;

        writeln!(file, "SPACING")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Along columns (x):   {}", range_text(self.x_spacing, 6))?;
        writeln!(file, "Along rows (y):      {}", range_text(self.y_spacing, 6))?;
        writeln!(file, "Uniform:             {}", self.uniform)?;
        writeln!(file)?;

        if let Some(err) = self.round_trip_error {
            writeln!(file, "ROUND TRIP")?;
            writeln!(file, "{}", "-".repeat(60))?;
            writeln!(file, "Max abs error:       {:.6e}", err)?;
            writeln!(file)?;
        }

        writeln!(file, "{}", "=".repeat(60))?;

        Ok(())
    }

    pub fn print_to_console(&self) {
        println!("\n{}", "=".repeat(60));
        println!("MESH SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "Mesh:          {} x {} {:?} nodes",
            self.num_rows, self.num_cols, self.placement
        );
        println!(
            "Extent:        x {}, y {}",
            range_text(self.x_extent, 3),
            range_text(self.y_extent, 3)
        );
        println!("Uniform:       {}", self.uniform);
        if let Some(err) = self.round_trip_error {
            println!("Round trip:    {:.3e}", err);
        }
        println!("{}\n", "=".repeat(60));
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

fn range_text(range: Option<(f64, f64)>, precision: usize) -> String {
    match range {
        Some((lo, hi)) => format!("{:.*e} to {:.*e}", precision, lo, precision, hi),
        None => "n/a".to_string(),
    }
}
