//! One-hot encoding of label columns

use std::collections::BTreeSet;
use std::marker::PhantomData;

use mlpipe::dataset::DatasetBase;
use mlpipe::traits::Fit;
use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};
use crate::{FeatureNamesOut, Float, Transform};

/// Behaviour of a fitted encoder when it meets a label that was not seen during fitting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Fail the transformation with [`PreprocessingError::UnknownCategory`]
    Error,
    /// Emit an all-zero indicator block for the feature
    Ignore,
}

impl Default for HandleUnknown {
    fn default() -> Self {
        HandleUnknown::Error
    }
}

/// One-hot encoder
///
/// Learns the sorted set of distinct labels of every feature. Transforming replaces each
/// feature with one indicator column per learned label, so a feature with `k` categories
/// expands into `k` columns holding a single `1` per row.
///
/// ### Example
///
/// ```rust
/// use mlpipe::traits::Fit;
/// use mlpipe::DatasetBase;
/// use mlpipe_preprocessing::one_hot_encoding::OneHotEncoder;
/// use mlpipe_preprocessing::Transform;
/// use ndarray::array;
///
/// let labels = array![["male".to_string()], ["female".to_string()]];
/// let dataset: DatasetBase<_, ()> = labels.into();
/// let encoder = OneHotEncoder::<f64>::new().fit(&dataset).unwrap();
///
/// // categories are sorted, so `female` comes first
/// let encoded = encoder.transform(dataset.records()).unwrap();
/// assert_eq!(encoded, array![[0., 1.], [1., 0.]]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OneHotEncoder<F: Float> {
    handle_unknown: HandleUnknown,
    phantom: PhantomData<F>,
}

impl<F: Float> Default for OneHotEncoder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> OneHotEncoder<F> {
    pub fn new() -> Self {
        Self {
            handle_unknown: HandleUnknown::default(),
            phantom: PhantomData,
        }
    }

    /// Sets the behaviour for labels unseen during fitting
    pub fn handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }
}

impl<F: Float, D: Data<Elem = String>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for OneHotEncoder<F>
{
    type Object = FittedOneHotEncoder<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let records = dataset.records();
        if records.nrows() == 0 {
            return Err(PreprocessingError::NotEnoughSamples);
        }

        let categories = records
            .axis_iter(Axis(1))
            .map(|column| {
                column
                    .iter()
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .collect();

        Ok(FittedOneHotEncoder {
            categories,
            handle_unknown: self.handle_unknown,
            phantom: PhantomData,
        })
    }
}

/// The result of fitting a [one-hot encoder](struct.OneHotEncoder.html)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedOneHotEncoder<F: Float> {
    categories: Vec<Vec<String>>,
    handle_unknown: HandleUnknown,
    #[serde(skip)]
    phantom: PhantomData<F>,
}

impl<F: Float> FittedOneHotEncoder<F> {
    /// The sorted categories of every input feature
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    pub fn handle_unknown(&self) -> HandleUnknown {
        self.handle_unknown
    }

    /// Number of indicator columns produced
    pub fn n_features_out(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }
}

impl<F: Float, D: Data<Elem = String>> Transform<ArrayBase<D, Ix2>> for FittedOneHotEncoder<F> {
    type Output = Array2<F>;

    fn transform(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        if x.ncols() != self.categories.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected: self.categories.len(),
                found: x.ncols(),
            });
        }

        let mut encoded = Array2::zeros((x.nrows(), self.n_features_out()));
        let mut offset = 0;
        for (feature, (column, categories)) in
            x.axis_iter(Axis(1)).zip(self.categories.iter()).enumerate()
        {
            for (row, label) in column.iter().enumerate() {
                match categories.binary_search(label) {
                    Ok(idx) => encoded[[row, offset + idx]] = F::one(),
                    Err(_) if self.handle_unknown == HandleUnknown::Ignore => {}
                    Err(_) => {
                        return Err(PreprocessingError::UnknownCategory {
                            feature,
                            category: label.clone(),
                        })
                    }
                }
            }
            offset += categories.len();
        }

        Ok(encoded)
    }
}

impl<F: Float> FeatureNamesOut for FittedOneHotEncoder<F> {
    /// One `<feature>_<category>` name per indicator column
    fn feature_names_out(&self, input: &[String]) -> Vec<String> {
        input
            .iter()
            .zip(self.categories.iter())
            .flat_map(|(name, categories)| {
                categories
                    .iter()
                    .map(move |category| format!("{}_{}", name, category))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn labels(rows: &[[&str; 2]]) -> Array2<String> {
        Array2::from_shape_fn((rows.len(), 2), |(row, col)| rows[row][col].to_string())
    }

    #[test]
    fn test_sorted_categories_and_indicators() {
        let dataset: DatasetBase<_, ()> = labels(&[
            ["male", "standard"],
            ["female", "free/reduced"],
            ["female", "standard"],
        ])
        .into();
        let encoder = OneHotEncoder::<f64>::new().fit(&dataset).unwrap();
        assert_eq!(
            encoder.categories(),
            &[
                vec!["female".to_string(), "male".to_string()],
                vec!["free/reduced".to_string(), "standard".to_string()]
            ]
        );
        assert_eq!(encoder.n_features_out(), 4);

        let encoded = encoder.transform(dataset.records()).unwrap();
        assert_abs_diff_eq!(
            encoded,
            array![
                [0., 1., 0., 1.],
                [1., 0., 1., 0.],
                [1., 0., 0., 1.]
            ]
        );
        // every feature block sums to one per row
        for row in encoded.rows() {
            assert_abs_diff_eq!(row.sum(), 2.);
        }
    }

    #[test]
    fn test_unknown_category_is_an_error_by_default() {
        let dataset: DatasetBase<_, ()> = labels(&[["male", "a"], ["female", "b"]]).into();
        let encoder = OneHotEncoder::<f64>::new().fit(&dataset).unwrap();

        let err = encoder
            .transform(&labels(&[["other", "a"]]))
            .unwrap_err();
        assert!(matches!(
            err,
            PreprocessingError::UnknownCategory { feature: 0, ref category } if category == "other"
        ));
    }

    #[test]
    fn test_unknown_category_can_be_ignored() {
        let dataset: DatasetBase<_, ()> = labels(&[["male", "a"], ["female", "b"]]).into();
        let encoder = OneHotEncoder::<f64>::new()
            .handle_unknown(HandleUnknown::Ignore)
            .fit(&dataset)
            .unwrap();

        let encoded = encoder.transform(&labels(&[["other", "b"]])).unwrap();
        assert_abs_diff_eq!(encoded, array![[0., 0., 0., 1.]]);
    }

    #[test]
    fn test_feature_names() {
        let dataset: DatasetBase<_, ()> = labels(&[["male", "a"], ["female", "b"]]).into();
        let encoder = OneHotEncoder::<f32>::new().fit(&dataset).unwrap();
        let names = encoder.feature_names_out(&["gender".to_string(), "lunch".to_string()]);
        assert_eq!(
            names,
            vec!["gender_female", "gender_male", "lunch_a", "lunch_b"]
        );
    }

    #[test]
    fn test_wrong_number_of_features() {
        let dataset: DatasetBase<_, ()> = labels(&[["male", "a"]]).into();
        let encoder = OneHotEncoder::<f64>::new().fit(&dataset).unwrap();
        let single = Array2::from_elem((1, 1), "male".to_string());
        assert!(matches!(
            encoder.transform(&single),
            Err(PreprocessingError::FeatureMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_empty_input() {
        let dataset: DatasetBase<Array2<String>, ()> = Array2::from_elem((0, 2), String::new()).into();
        assert!(matches!(
            OneHotEncoder::<f64>::new().fit(&dataset),
            Err(PreprocessingError::NotEnoughSamples)
        ));
    }
}
