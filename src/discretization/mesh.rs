use nalgebra::DMatrix;
use thiserror::Error;

/// Failures raised while building or converting mesh coordinates.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("coordinate shapes differ: x is {x:?}, y is {y:?}")]
    ShapeMismatch {
        x: (usize, usize),
        y: (usize, usize),
    },
    #[error("grid of shape {shape:?} is too small, need at least {min} rows and {min} columns")]
    TooSmall { shape: (usize, usize), min: usize },
    #[error("coordinates {coords:?} do not fit data of shape {data:?}")]
    DataMismatch {
        coords: (usize, usize),
        data: (usize, usize),
    },
    #[error("coordinate axis is empty")]
    EmptyAxis,
}

impl GridError {
    /// True for errors caused by badly shaped caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            GridError::ShapeMismatch { .. }
                | GridError::TooSmall { .. }
                | GridError::DataMismatch { .. }
                | GridError::EmptyAxis
        )
    }
}

fn check_same_shape(x: &DMatrix<f64>, y: &DMatrix<f64>) -> Result<(), GridError> {
    if x.shape() != y.shape() {
        return Err(GridError::ShapeMismatch {
            x: x.shape(),
            y: y.shape(),
        });
    }
    Ok(())
}

/// Cell-centroid coordinates, one entry per cell: shape (rows, cols).
#[derive(Debug, Clone, PartialEq)]
pub struct CenterCoords {
    pub x: DMatrix<f64>,
    pub y: DMatrix<f64>,
}

/// Cell-corner coordinates shared by adjacent cells: shape (rows+1, cols+1).
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCoords {
    pub x: DMatrix<f64>,
    pub y: DMatrix<f64>,
}

impl CenterCoords {
    pub fn new(x: DMatrix<f64>, y: DMatrix<f64>) -> Result<Self, GridError> {
        check_same_shape(&x, &y)?;
        Ok(Self { x, y })
    }

    /// Array shape, which for centers is also the number of cells.
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    pub fn cell_shape(&self) -> (usize, usize) {
        self.shape()
    }
}

impl EdgeCoords {
    pub fn new(x: DMatrix<f64>, y: DMatrix<f64>) -> Result<Self, GridError> {
        check_same_shape(&x, &y)?;
        Ok(Self { x, y })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// Number of cells enclosed by the corner nodes.
    pub fn cell_shape(&self) -> (usize, usize) {
        let (rows, cols) = self.shape();
        (rows.saturating_sub(1), cols.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_shapes_are_rejected() {
        let x = DMatrix::<f64>::zeros(3, 3);
        let y = DMatrix::<f64>::zeros(3, 4);
        let err = CenterCoords::new(x, y).unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                x: (3, 3),
                y: (3, 4)
            }
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn edge_cell_shape_is_one_smaller() {
        let e = EdgeCoords::new(DMatrix::zeros(4, 5), DMatrix::zeros(4, 5)).unwrap();
        assert_eq!(e.shape(), (4, 5));
        assert_eq!(e.cell_shape(), (3, 4));
    }
}
