//! Renderer-independent helpers for gridded and multi-dataset plots:
//! conversion between cell-center and cell-edge mesh coordinates,
//! coordinate resolution for gridded data, and color/style selection.

pub mod discretization;
pub mod numerics;
pub mod processing;
pub mod styling;

pub use discretization::generator::{
    CoordinateSpec, Placement, RenderNeeds, ResolvedMesh, resolve_coordinates,
};
pub use discretization::mesh::{CenterCoords, EdgeCoords, GridError};
pub use numerics::transform::{
    center_to_edge, edge_to_center, grid_center_to_edge_coordinates,
    grid_edge_to_center_coordinates,
};
