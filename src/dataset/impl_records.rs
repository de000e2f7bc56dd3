use super::{DatasetBase, Records, Table};
use ndarray::{ArrayBase, Data, Ix2};

/// Implement records for NdArrays
impl<S: Data> Records for ArrayBase<S, Ix2> {
    type Elem = S::Elem;

    fn nsamples(&self) -> usize {
        self.nrows()
    }

    fn nfeatures(&self) -> usize {
        self.ncols()
    }
}

/// Implement records for tables of raw cells
impl Records for Table {
    type Elem = Option<String>;

    fn nsamples(&self) -> usize {
        self.nrows()
    }

    fn nfeatures(&self) -> usize {
        self.ncols()
    }
}

/// Implement records for a DatasetBase
impl<R: Records, T> Records for DatasetBase<R, T> {
    type Elem = R::Elem;

    fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }
}
