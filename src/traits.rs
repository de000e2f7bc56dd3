//! Provide traits for the different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. A
/// preprocessing step, for example, learns per-feature statistics (medians, means, category
/// vocabularies) and returns a fitted object which replays them on unseen data.
///
/// Fitting only ever reads the dataset; the returned object owns everything it learned.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}
