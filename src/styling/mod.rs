//! Color and per-dataset style selection for multi-dataset plots.

pub mod colors;
pub mod cycle;
pub mod tables;

pub use colors::{
    ColorError, ColorTable, CustomTable, Rgb, default_cycle, random_colors, spaced_colors,
};
pub use cycle::{DatasetStyle, bin_centers, cycle_to_len, resolve_dataset_styles};
