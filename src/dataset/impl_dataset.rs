use super::{DatasetBase, Records, Table};
use ndarray::{ArrayBase, Data, Ix2};

impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to the records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns reference to the targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Number of samples in the records
    pub fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    /// Number of features in the records
    pub fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// This allow the reader to understand its purpose while analysing results, for example
    /// correlation analysis or feature importance. If no names were set, generic names
    /// `feature-<i>` are returned.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }
}

impl<S: Data> From<ArrayBase<S, Ix2>> for DatasetBase<ArrayBase<S, Ix2>, ()> {
    fn from(records: ArrayBase<S, Ix2>) -> Self {
        DatasetBase::new(records, ())
    }
}

impl From<Table> for DatasetBase<Table, ()> {
    fn from(records: Table) -> Self {
        let names = records.column_names().to_vec();
        DatasetBase::new(records, ()).with_feature_names(names)
    }
}
