//! Conversion between cell-center and cell-edge mesh coordinates.
//!
//! Both directions work in two passes, one per array axis. Center to edge
//! places interior edges at midpoints between neighbouring centers and
//! extrapolates the outermost edges by half the adjacent spacing. Edge to
//! center only averages neighbours, so it never extrapolates.
//!
//! Pass order is fixed: X is processed along columns first and then along
//! rows, Y along rows first and then along columns. The second Y pass adds
//! half the local step at the first column instead of subtracting it, so on
//! sheared meshes the first and second Y edge columns coincide. Rectilinear
//! meshes have no step there and are unaffected.

use crate::discretization::mesh::{CenterCoords, EdgeCoords, GridError};
use crate::numerics::timing::{record_first_pass, record_second_pass};
use log::debug;
use nalgebra::DMatrix;

/// Smallest number of nodes per axis that still defines a spacing.
const MIN_NODES: usize = 2;

fn check_min_size(m: &DMatrix<f64>) -> Result<(), GridError> {
    let (rows, cols) = m.shape();
    if rows < MIN_NODES || cols < MIN_NODES {
        return Err(GridError::TooSmall {
            shape: (rows, cols),
            min: MIN_NODES,
        });
    }
    Ok(())
}

/// Edge positions along each row: (r, c) -> (r, c + 1).
fn edges_along_cols(m: &DMatrix<f64>) -> DMatrix<f64> {
    let (rows, cols) = m.shape();
    DMatrix::from_fn(rows, cols + 1, |i, j| {
        if j == 0 {
            m[(i, 0)] - (m[(i, 1)] - m[(i, 0)]) / 2.0
        } else if j == cols {
            m[(i, cols - 1)] + (m[(i, cols - 1)] - m[(i, cols - 2)]) / 2.0
        } else {
            m[(i, j - 1)] + (m[(i, j)] - m[(i, j - 1)]) / 2.0
        }
    })
}

/// Edge positions along each column: (r, c) -> (r + 1, c).
fn edges_along_rows(m: &DMatrix<f64>) -> DMatrix<f64> {
    let (rows, cols) = m.shape();
    DMatrix::from_fn(rows + 1, cols, |i, j| {
        if i == 0 {
            m[(0, j)] - (m[(1, j)] - m[(0, j)]) / 2.0
        } else if i == rows {
            m[(rows - 1, j)] + (m[(rows - 1, j)] - m[(rows - 2, j)]) / 2.0
        } else {
            m[(i - 1, j)] + (m[(i, j)] - m[(i - 1, j)]) / 2.0
        }
    })
}

/// Second Y pass: like [`edges_along_cols`] but the first column is
/// shifted up by half the step, not down.
fn y_edges_along_cols(m: &DMatrix<f64>) -> DMatrix<f64> {
    let (rows, cols) = m.shape();
    DMatrix::from_fn(rows, cols + 1, |i, j| {
        if j == 0 {
            m[(i, 0)] + (m[(i, 1)] - m[(i, 0)]) / 2.0
        } else if j == cols {
            m[(i, cols - 1)] + (m[(i, cols - 1)] - m[(i, cols - 2)]) / 2.0
        } else {
            m[(i, j - 1)] + (m[(i, j)] - m[(i, j - 1)]) / 2.0
        }
    })
}

/// (r, c) -> (r, c - 1)
fn midpoints_along_cols(m: &DMatrix<f64>) -> DMatrix<f64> {
    let (rows, cols) = m.shape();
    DMatrix::from_fn(rows, cols - 1, |i, j| {
        m[(i, j)] + (m[(i, j + 1)] - m[(i, j)]) / 2.0
    })
}

/// (r, c) -> (r - 1, c)
fn midpoints_along_rows(m: &DMatrix<f64>) -> DMatrix<f64> {
    let (rows, cols) = m.shape();
    DMatrix::from_fn(rows - 1, cols, |i, j| {
        m[(i, j)] + (m[(i + 1, j)] - m[(i, j)]) / 2.0
    })
}

/// Transform center coordinates of shape (rows, cols) into edge
/// coordinates of shape (rows + 1, cols + 1).
///
/// Fails with [`GridError::ShapeMismatch`] if `xc` and `yc` differ in shape
/// and with [`GridError::TooSmall`] if there are fewer than two rows or
/// columns to take differences from.
pub fn grid_center_to_edge_coordinates(
    xc: &DMatrix<f64>,
    yc: &DMatrix<f64>,
) -> Result<(DMatrix<f64>, DMatrix<f64>), GridError> {
    if xc.shape() != yc.shape() {
        return Err(GridError::ShapeMismatch {
            x: xc.shape(),
            y: yc.shape(),
        });
    }
    check_min_size(xc)?;

    let (x_half, y_half) = record_first_pass(|| (edges_along_cols(xc), edges_along_rows(yc)));
    let (xe, ye) =
        record_second_pass(|| (edges_along_rows(&x_half), y_edges_along_cols(&y_half)));

    debug!(
        "center -> edge: {:?} -> {:?}",
        xc.shape(),
        xe.shape()
    );
    Ok((xe, ye))
}

/// Transform edge coordinates of shape (rows + 1, cols + 1) into center
/// coordinates of shape (rows, cols).
pub fn grid_edge_to_center_coordinates(
    xe: &DMatrix<f64>,
    ye: &DMatrix<f64>,
) -> Result<(DMatrix<f64>, DMatrix<f64>), GridError> {
    if xe.shape() != ye.shape() {
        return Err(GridError::ShapeMismatch {
            x: xe.shape(),
            y: ye.shape(),
        });
    }
    check_min_size(xe)?;

    let (x_half, y_half) =
        record_first_pass(|| (midpoints_along_cols(xe), midpoints_along_rows(ye)));
    let (xc, yc) =
        record_second_pass(|| (midpoints_along_rows(&x_half), midpoints_along_cols(&y_half)));

    debug!(
        "edge -> center: {:?} -> {:?}",
        xe.shape(),
        xc.shape()
    );
    Ok((xc, yc))
}

pub fn center_to_edge(centers: &CenterCoords) -> Result<EdgeCoords, GridError> {
    let (x, y) = grid_center_to_edge_coordinates(&centers.x, &centers.y)?;
    Ok(EdgeCoords { x, y })
}

pub fn edge_to_center(edges: &EdgeCoords) -> Result<CenterCoords, GridError> {
    let (x, y) = grid_edge_to_center_coordinates(&edges.x, &edges.y)?;
    Ok(CenterCoords { x, y })
}
