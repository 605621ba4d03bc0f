use super::mesh::{CenterCoords, EdgeCoords, GridError};
use crate::numerics::transform::{center_to_edge, edge_to_center};
use log::info;
use nalgebra::{DMatrix, DVector};

/// `n` evenly spaced values from `start` to `stop`, both inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> DVector<f64> {
    match n {
        0 => DVector::zeros(0),
        1 => DVector::from_element(1, start),
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            DVector::from_fn(n, |i, _| {
                if i == n - 1 { stop } else { start + step * i as f64 }
            })
        }
    }
}

/// Expand two axes into coordinate matrices of shape (ys.len(), xs.len()).
pub fn meshgrid(xs: &DVector<f64>, ys: &DVector<f64>) -> (DMatrix<f64>, DMatrix<f64>) {
    let x = DMatrix::from_fn(ys.len(), xs.len(), |_, j| xs[j]);
    let y = DMatrix::from_fn(ys.len(), xs.len(), |i, _| ys[i]);
    (x, y)
}

/// Centers of a regular grid with `rows` × `cols` cells of size dx × dy,
/// the lower-left corner at the origin.
pub fn uniform_centers(rows: usize, cols: usize, dx: f64, dy: f64) -> CenterCoords {
    let xs = DVector::from_fn(cols, |j, _| (j as f64 + 0.5) * dx);
    let ys = DVector::from_fn(rows, |i, _| (i as f64 + 0.5) * dy);
    let (x, y) = meshgrid(&xs, &ys);
    CenterCoords { x, y }
}

/// Which node placement a set of coordinates describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Center,
    Edge,
}

/// How the caller describes the coordinates of a gridded data array.
/// The placement is always explicit, it is never guessed from array shapes.
#[derive(Debug, Clone)]
pub enum CoordinateSpec {
    /// Cell indices are used as coordinates.
    None,
    /// Axis limits, filled in with evenly spaced nodes.
    Range { x: (f64, f64), y: (f64, f64) },
    /// 1D axes to be expanded with [`meshgrid`].
    Axes {
        x: DVector<f64>,
        y: DVector<f64>,
        placement: Placement,
    },
    Centers(CenterCoords),
    Edges(EdgeCoords),
}

/// What the renderer is going to draw, which decides the placements needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderNeeds {
    /// Filled contours instead of a cell mesh.
    pub smoothed: bool,
    /// Gouraud shading of cells.
    pub shading: bool,
    /// Contour lines on top.
    pub contours: bool,
}

impl RenderNeeds {
    pub fn needs_centers(&self) -> bool {
        self.smoothed || self.shading || self.contours
    }

    pub fn needs_edges(&self) -> bool {
        !self.smoothed
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedMesh {
    pub centers: Option<CenterCoords>,
    pub edges: Option<EdgeCoords>,
}

/// Build the center and/or edge coordinates required to draw data of shape
/// `data_shape` (rows, cols). Conversions between placements are only done
/// when `needs` asks for the placement the caller did not provide.
pub fn resolve_coordinates(
    data_shape: (usize, usize),
    spec: CoordinateSpec,
    needs: RenderNeeds,
) -> Result<ResolvedMesh, GridError> {
    let (rows, cols) = data_shape;
    if rows == 0 || cols == 0 {
        return Err(GridError::EmptyAxis);
    }

    let (centers, edges) = match spec {
        CoordinateSpec::None => {
            let edges = index_edges(rows, cols);
            let centers = uniform_centers(rows, cols, 1.0, 1.0);
            (Some(centers), Some(edges))
        }
        CoordinateSpec::Range { x, y } => {
            if needs.needs_edges() {
                let (ex, ey) = meshgrid(
                    &linspace(x.0, x.1, cols + 1),
                    &linspace(y.0, y.1, rows + 1),
                );
                (None, Some(EdgeCoords { x: ex, y: ey }))
            } else {
                let (cx, cy) = meshgrid(&linspace(x.0, x.1, cols), &linspace(y.0, y.1, rows));
                (Some(CenterCoords { x: cx, y: cy }), None)
            }
        }
        CoordinateSpec::Axes { x, y, placement } => {
            if x.is_empty() || y.is_empty() {
                return Err(GridError::EmptyAxis);
            }
            let (mx, my) = meshgrid(&x, &y);
            match placement {
                Placement::Center => (Some(CenterCoords { x: mx, y: my }), None),
                Placement::Edge => (None, Some(EdgeCoords { x: mx, y: my })),
            }
        }
        CoordinateSpec::Centers(c) => (Some(c), None),
        CoordinateSpec::Edges(e) => (None, Some(e)),
    };

    if let Some(c) = &centers {
        check_fits(c.shape(), data_shape, 0)?;
    }
    if let Some(e) = &edges {
        check_fits(e.shape(), data_shape, 1)?;
    }

    let centers = match (centers, &edges) {
        (None, Some(e)) if needs.needs_centers() => {
            info!("Transforming edge to center coordinates");
            Some(edge_to_center(e)?)
        }
        (c, _) => c,
    };
    let edges = match (edges, &centers) {
        (None, Some(c)) if needs.needs_edges() => {
            info!("Transforming center to edge coordinates");
            Some(center_to_edge(c)?)
        }
        (e, _) => e,
    };

    Ok(ResolvedMesh {
        centers: centers.filter(|_| needs.needs_centers()),
        edges: edges.filter(|_| needs.needs_edges()),
    })
}

fn index_edges(rows: usize, cols: usize) -> EdgeCoords {
    let xs = DVector::from_fn(cols + 1, |j, _| j as f64);
    let ys = DVector::from_fn(rows + 1, |i, _| i as f64);
    let (x, y) = meshgrid(&xs, &ys);
    EdgeCoords { x, y }
}

fn check_fits(
    coords: (usize, usize),
    data: (usize, usize),
    extra: usize,
) -> Result<(), GridError> {
    if coords != (data.0 + extra, data.1 + extra) {
        return Err(GridError::DataMismatch { coords, data });
    }
    Ok(())
}
