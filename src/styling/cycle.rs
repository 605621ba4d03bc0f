use super::colors::default_cycle;
use nalgebra::DVector;

/// Repeat `values` cyclically until there are exactly `n` of them.
/// Returns `None` when there is nothing to cycle.
pub fn cycle_to_len<T: Clone>(values: &[T], n: usize) -> Option<Vec<T>> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().cycle().take(n).cloned().collect())
}

/// Color and legend label of one dataset in a multi-dataset plot.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStyle {
    pub color: String,
    pub label: String,
}

/// Give each of `num_datasets` datasets a color and a label, cycling the
/// supplied lists. Empty lists fall back to the default color cycle and to
/// the dataset index as label.
pub fn resolve_dataset_styles(
    num_datasets: usize,
    colors: &[String],
    labels: &[String],
) -> Vec<DatasetStyle> {
    let colors = cycle_to_len(colors, num_datasets).unwrap_or_else(|| {
        default_cycle(num_datasets)
            .into_iter()
            .map(String::from)
            .collect()
    });
    let labels = cycle_to_len(labels, num_datasets)
        .unwrap_or_else(|| (0..num_datasets).map(|i| i.to_string()).collect());

    colors
        .into_iter()
        .zip(labels)
        .map(|(color, label)| DatasetStyle { color, label })
        .collect()
}

/// Midpoints between consecutive bin edges, used as sample positions when
/// data is already binned and the bin counts become weights.
pub fn bin_centers(bins: &DVector<f64>) -> DVector<f64> {
    if bins.len() < 2 {
        return DVector::zeros(0);
    }
    DVector::from_fn(bins.len() - 1, |i, _| (bins[i] + bins[i + 1]) / 2.0)
}
