//! Imputation of missing values
//!
//! Numeric columns mark missing values with `NaN`, label columns with `None`. Imputers learn
//! one fill value per column from the training data and substitute it for every missing cell
//! they are later asked to transform.

use mlpipe::dataset::DatasetBase;
use mlpipe::traits::Fit;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};
use crate::helpers;
use crate::{FeatureNamesOut, Float, Transform};

/// Strategy used by a [`SimpleImputer`] to compute the fill value of each column
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy<F> {
    /// Arithmetic mean of the observed values
    Mean,
    /// Median of the observed values
    Median,
    /// Most frequent observed value, the smallest one on ties
    MostFrequent,
    /// A fixed value, independent of the data
    Constant(F),
}

/// Imputer for numeric columns, learns a fill value per column according to its
/// [strategy](enum.ImputeStrategy.html)
///
/// ### Example
///
/// ```rust
/// use mlpipe::traits::Fit;
/// use mlpipe::DatasetBase;
/// use mlpipe_preprocessing::imputation::SimpleImputer;
/// use mlpipe_preprocessing::Transform;
/// use ndarray::array;
///
/// let train: DatasetBase<_, ()> = array![[1.], [3.], [f64::NAN], [5.]].into();
/// let imputer = SimpleImputer::median().fit(&train).unwrap();
/// let imputed = imputer.transform(&train.records).unwrap();
/// assert_eq!(imputed[[2, 0]], 3.);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleImputer<F: Float> {
    strategy: ImputeStrategy<F>,
}

impl<F: Float> SimpleImputer<F> {
    /// Initializes the imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy<F>) -> Self {
        Self { strategy }
    }

    /// Setter for the imputation strategy
    pub fn strategy(mut self, strategy: ImputeStrategy<F>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Fill with the column mean
    pub fn mean() -> Self {
        Self::new(ImputeStrategy::Mean)
    }

    /// Fill with the column median
    pub fn median() -> Self {
        Self::new(ImputeStrategy::Median)
    }

    /// Fill with the most frequent value of the column
    pub fn most_frequent() -> Self {
        Self::new(ImputeStrategy::MostFrequent)
    }

    /// Fill with a constant
    pub fn constant(value: F) -> Self {
        Self::new(ImputeStrategy::Constant(value))
    }
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for SimpleImputer<F>
{
    type Object = FittedSimpleImputer<F>;

    /// Learns one fill value per column from the non-`NaN` entries. Fails if the dataset is
    /// empty, or if a column has no observed value and the strategy depends on the data.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let records = dataset.records();
        if records.nrows() == 0 {
            return Err(PreprocessingError::NotEnoughSamples);
        }

        let statistics = records
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(idx, column)| {
                let observed = column
                    .iter()
                    .copied()
                    .filter(|v| !v.is_nan())
                    .collect::<Vec<_>>();

                match &self.strategy {
                    ImputeStrategy::Constant(value) => Ok(*value),
                    _ if observed.is_empty() => Err(PreprocessingError::NoObservedValues(idx)),
                    ImputeStrategy::Mean => Ok(helpers::mean(&observed)),
                    ImputeStrategy::Median => Ok(helpers::median(observed)),
                    ImputeStrategy::MostFrequent => Ok(helpers::most_frequent(observed)),
                }
            })
            .collect::<Result<Array1<F>>>()?;

        Ok(FittedSimpleImputer {
            statistics,
            strategy: self.strategy.clone(),
        })
    }
}

/// The result of fitting a [simple imputer](struct.SimpleImputer.html).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FittedSimpleImputer<F: Float> {
    statistics: Array1<F>,
    strategy: ImputeStrategy<F>,
}

impl<F: Float> FittedSimpleImputer<F> {
    /// Array of size `n_features` holding the fill value of each feature
    pub fn statistics(&self) -> &Array1<F> {
        &self.statistics
    }

    /// The strategy used for fitting
    pub fn strategy(&self) -> &ImputeStrategy<F> {
        &self.strategy
    }
}

impl<F: Float, D: Data<Elem = F>> Transform<ArrayBase<D, Ix2>> for FittedSimpleImputer<F> {
    type Output = Array2<F>;

    /// Replaces every `NaN` with the fill value learned for its column
    fn transform(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        if x.ncols() != self.statistics.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected: self.statistics.len(),
                found: x.ncols(),
            });
        }

        let mut imputed = x.to_owned();
        Zip::from(imputed.columns_mut())
            .and(&self.statistics)
            .for_each(|mut column, &fill| {
                column.mapv_inplace(|v| if v.is_nan() { fill } else { v })
            });

        Ok(imputed)
    }
}

impl<F: Float> FeatureNamesOut for FittedSimpleImputer<F> {
    fn feature_names_out(&self, input: &[String]) -> Vec<String> {
        input.to_vec()
    }
}

/// Strategy used by a [`CategoricalImputer`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoricalStrategy {
    /// Most frequent observed label, the lexicographically smallest one on ties
    MostFrequent,
    /// A fixed label, independent of the data
    Constant(String),
}

/// Imputer for label columns, maps a matrix of optional labels to a matrix of labels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoricalImputer {
    strategy: CategoricalStrategy,
}

impl CategoricalImputer {
    pub fn new(strategy: CategoricalStrategy) -> Self {
        Self { strategy }
    }

    pub fn most_frequent() -> Self {
        Self::new(CategoricalStrategy::MostFrequent)
    }

    pub fn constant<S: Into<String>>(label: S) -> Self {
        Self::new(CategoricalStrategy::Constant(label.into()))
    }
}

impl<D: Data<Elem = Option<String>>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for CategoricalImputer
{
    type Object = FittedCategoricalImputer;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let records = dataset.records();
        if records.nrows() == 0 {
            return Err(PreprocessingError::NotEnoughSamples);
        }

        let fill_values = records
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(idx, column)| match &self.strategy {
                CategoricalStrategy::Constant(label) => Ok(label.clone()),
                CategoricalStrategy::MostFrequent => {
                    helpers::most_frequent_label(column.iter().filter_map(|v| v.as_deref()))
                        .ok_or(PreprocessingError::NoObservedValues(idx))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FittedCategoricalImputer { fill_values })
    }
}

/// The result of fitting a [categorical imputer](struct.CategoricalImputer.html).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FittedCategoricalImputer {
    fill_values: Vec<String>,
}

impl FittedCategoricalImputer {
    /// The fill label of each feature
    pub fn fill_values(&self) -> &[String] {
        &self.fill_values
    }
}

impl<D: Data<Elem = Option<String>>> Transform<ArrayBase<D, Ix2>> for FittedCategoricalImputer {
    type Output = Array2<String>;

    fn transform(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<String>> {
        if x.ncols() != self.fill_values.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected: self.fill_values.len(),
                found: x.ncols(),
            });
        }

        Ok(Array2::from_shape_fn(x.dim(), |(row, col)| {
            x[[row, col]]
                .clone()
                .unwrap_or_else(|| self.fill_values[col].clone())
        }))
    }
}

impl FeatureNamesOut for FittedCategoricalImputer {
    fn feature_names_out(&self, input: &[String]) -> Vec<String> {
        input.to_vec()
    }
}
