use approx::assert_relative_eq;
use nalgebra::DMatrix;

use plotkit_rs::discretization::generator::{meshgrid, uniform_centers};
use plotkit_rs::discretization::mesh::{CenterCoords, EdgeCoords, GridError};
use plotkit_rs::numerics::max_abs_diff;
use plotkit_rs::numerics::transform::{
    center_to_edge, edge_to_center, grid_center_to_edge_coordinates,
    grid_edge_to_center_coordinates,
};

fn offset_centers(rows: usize, cols: usize, x0: f64, y0: f64, step: f64) -> CenterCoords {
    let x = DMatrix::from_fn(rows, cols, |_, j| x0 + j as f64 * step);
    let y = DMatrix::from_fn(rows, cols, |i, _| y0 + i as f64 * step);
    CenterCoords::new(x, y).unwrap()
}

fn assert_rows(m: &DMatrix<f64>, expected: &[[f64; 4]; 4]) {
    for (i, row) in expected.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            assert_relative_eq!(m[(i, j)], *value, epsilon = 1e-12);
        }
    }
}

#[test]
fn unit_grid_example() {
    let xc = DMatrix::from_row_slice(3, 3, &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
    let yc = DMatrix::from_row_slice(3, 3, &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
    let (xe, ye) = grid_center_to_edge_coordinates(&xc, &yc).unwrap();

    let expected = [-0.5, 0.5, 1.5, 2.5];
    for i in 0..4 {
        for j in 0..4 {
            assert_relative_eq!(xe[(i, j)], expected[j], epsilon = 1e-12);
            assert_relative_eq!(ye[(i, j)], expected[i], epsilon = 1e-12);
        }
    }
}

#[test]
fn output_shapes_follow_input_shapes() {
    for (rows, cols) in [(2, 2), (2, 5), (7, 3), (10, 11)] {
        let centers = uniform_centers(rows, cols, 0.3, 1.7);
        let edges = center_to_edge(&centers).unwrap();
        assert_eq!(edges.shape(), (rows + 1, cols + 1));

        let back = edge_to_center(&edges).unwrap();
        assert_eq!(back.shape(), (rows, cols));
    }
}

#[test]
fn uniform_round_trip_is_exact() {
    for centers in [
        uniform_centers(4, 6, 0.25, 2.0),
        uniform_centers(5, 3, 1.5, 0.5),
        offset_centers(3, 7, -4.0, 10.0, 0.1),
    ] {
        let back = edge_to_center(&center_to_edge(&centers).unwrap()).unwrap();
        assert!(max_abs_diff(&centers.x, &back.x).unwrap() < 1e-12);
        assert!(max_abs_diff(&centers.y, &back.y).unwrap() < 1e-12);
    }
}

#[test]
fn interior_edges_are_means_of_neighbouring_centers() {
    let centers = uniform_centers(4, 5, 2.0, 3.0);
    let edges = center_to_edge(&centers).unwrap();

    // interior corner (i, j) is surrounded by centers (i-1..=i, j-1..=j)
    for i in 1..4 {
        for j in 1..5 {
            let mean_x = (centers.x[(i - 1, j - 1)]
                + centers.x[(i - 1, j)]
                + centers.x[(i, j - 1)]
                + centers.x[(i, j)])
                / 4.0;
            let mean_y = (centers.y[(i - 1, j - 1)]
                + centers.y[(i - 1, j)]
                + centers.y[(i, j - 1)]
                + centers.y[(i, j)])
                / 4.0;
            assert_relative_eq!(edges.x[(i, j)], mean_x, epsilon = 1e-12);
            assert_relative_eq!(edges.y[(i, j)], mean_y, epsilon = 1e-12);
        }
    }

    // non-corner boundary node on the bottom edge, mean of the two adjacent centers in x
    for j in 1..5 {
        let mean_x = (centers.x[(0, j - 1)] + centers.x[(0, j)]) / 2.0;
        assert_relative_eq!(edges.x[(0, j)], mean_x, epsilon = 1e-12);
    }
}

#[test]
fn boundary_edges_extrapolate_half_spacing() {
    let centers = uniform_centers(3, 3, 2.0, 4.0);
    let edges = center_to_edge(&centers).unwrap();

    // centers at x = 1, 3, 5 and y = 2, 6, 10
    for i in 0..4 {
        assert_relative_eq!(edges.x[(i, 0)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(edges.x[(i, 3)], 6.0, epsilon = 1e-12);
    }
    for j in 0..4 {
        assert_relative_eq!(edges.y[(0, j)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(edges.y[(3, j)], 12.0, epsilon = 1e-12);
    }
}

#[test]
fn sheared_y_mesh_edges() {
    let xc = DMatrix::from_fn(3, 3, |_, j| j as f64);
    let yc = DMatrix::from_fn(3, 3, |i, j| (i + j) as f64);
    let (xe, ye) = grid_center_to_edge_coordinates(&xc, &yc).unwrap();

    let x_row = [-0.5, 0.5, 1.5, 2.5];
    assert_rows(&xe, &[x_row; 4]);
    // first Y column is shifted up by half a step, so it repeats the second
    assert_rows(
        &ye,
        &[
            [0.0, 0.0, 1.0, 2.0],
            [1.0, 1.0, 2.0, 3.0],
            [2.0, 2.0, 3.0, 4.0],
            [3.0, 3.0, 4.0, 5.0],
        ],
    );
}

#[test]
fn sheared_x_mesh_edges() {
    let xc = DMatrix::from_fn(3, 3, |i, j| (i + j) as f64);
    let yc = DMatrix::from_fn(3, 3, |i, _| i as f64);
    let (xe, ye) = grid_center_to_edge_coordinates(&xc, &yc).unwrap();

    assert_rows(
        &xe,
        &[
            [-1.0, 0.0, 1.0, 2.0],
            [0.0, 1.0, 2.0, 3.0],
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 3.0, 4.0, 5.0],
        ],
    );
    assert_rows(
        &ye,
        &[
            [-0.5; 4],
            [0.5; 4],
            [1.5; 4],
            [2.5; 4],
        ],
    );
}

#[test]
fn curvilinear_round_trip_keeps_interior_close() {
    // gently sheared mesh: extrapolation at the perimeter makes the round trip inexact
    let xc = DMatrix::from_fn(6, 6, |i, j| j as f64 + 0.1 * (i as f64).powi(2));
    let yc = DMatrix::from_fn(6, 6, |i, j| i as f64 + 0.05 * (j as f64).powi(2));
    let centers = CenterCoords::new(xc, yc).unwrap();

    let edges = center_to_edge(&centers).unwrap();
    assert_eq!(edges.shape(), (7, 7));
    let back = edge_to_center(&edges).unwrap();
    assert_eq!(back.shape(), (6, 6));

    let err = max_abs_diff(&centers.x, &back.x).unwrap();
    assert!(err < 0.1, "round trip error {err}");
}

#[test]
fn edge_to_center_of_index_mesh() {
    let xs = nalgebra::DVector::from_vec(vec![0.0, 1.0, 2.0, 3.0]);
    let ys = nalgebra::DVector::from_vec(vec![0.0, 2.0, 4.0]);
    let (xe, ye) = meshgrid(&xs, &ys);
    let (xc, yc) = grid_edge_to_center_coordinates(&xe, &ye).unwrap();

    assert_eq!(xc.shape(), (2, 3));
    assert_eq!(xc.row(0).iter().copied().collect::<Vec<_>>(), vec![0.5, 1.5, 2.5]);
    assert_eq!(yc.column(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 3.0]);
}

#[test]
fn mismatched_shapes_are_invalid_input() {
    let err = grid_center_to_edge_coordinates(&DMatrix::zeros(3, 3), &DMatrix::zeros(3, 4))
        .unwrap_err();
    assert_eq!(
        err,
        GridError::ShapeMismatch {
            x: (3, 3),
            y: (3, 4)
        }
    );
    assert!(err.is_invalid_input());

    assert!(EdgeCoords::new(DMatrix::zeros(4, 4), DMatrix::zeros(5, 4)).is_err());
}

#[test]
fn degenerate_grids_are_rejected() {
    let one_col = uniform_centers(4, 1, 1.0, 1.0);
    let err = center_to_edge(&one_col).unwrap_err();
    assert!(matches!(err, GridError::TooSmall { shape: (4, 1), .. }));
    assert!(err.is_invalid_input());

    let one_row_edges = EdgeCoords::new(DMatrix::zeros(1, 4), DMatrix::zeros(1, 4)).unwrap();
    assert!(edge_to_center(&one_row_edges).is_err());
}

#[test]
fn conversions_run_concurrently() {
    let handles: Vec<_> = (2..6)
        .map(|n| {
            std::thread::spawn(move || {
                let centers = uniform_centers(n, n + 1, 1.0, 1.0);
                center_to_edge(&centers).unwrap().shape()
            })
        })
        .collect();
    for (n, h) in (2..6).zip(handles) {
        assert_eq!(h.join().unwrap(), (n + 1, n + 2));
    }
}
