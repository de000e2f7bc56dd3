//! Standard scaling of numeric features

use std::fmt;
use std::marker::PhantomData;

use crate::error::{PreprocessingError, Result};
use crate::{FeatureNamesOut, Float, Transform};
use approx::abs_diff_eq;
use mlpipe::dataset::DatasetBase;
use mlpipe::traits::Fit;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
use serde::{Deserialize, Serialize};

/// How a [`LinearScaler`] derives offsets and scales from the training data
///
/// `Standard(with_mean, with_std)` subtracts the mean of each feature if `with_mean` is set and
/// divides by its population standard deviation if `with_std` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingMethod {
    Standard(bool, bool),
}

impl fmt::Display for ScalingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingMethod::Standard(with_mean, with_std) => write!(
                f,
                "Standard scaler (with_mean = {}, with_std = {})",
                with_mean, with_std
            ),
        }
    }
}

/// Learns an offset and a scale per feature, producing a [`FittedLinearScaler`]
///
/// ### Example
///
/// ```rust
/// use mlpipe::traits::Fit;
/// use mlpipe::DatasetBase;
/// use mlpipe_preprocessing::linear_scaling::LinearScaler;
/// use mlpipe_preprocessing::Transform;
/// use ndarray::array;
///
/// let dataset: DatasetBase<_, ()> = array![[1., -1.], [2., 0.], [0., 1.]].into();
/// let scaler = LinearScaler::standard().fit(&dataset).unwrap();
/// let scaled = scaler.transform(dataset.records()).unwrap();
/// assert_eq!(scaled.dim(), (3, 2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScaler<F: Float> {
    method: ScalingMethod,
    phantom: PhantomData<F>,
}

impl<F: Float> LinearScaler<F> {
    pub fn new(method: ScalingMethod) -> Self {
        Self {
            method,
            phantom: PhantomData,
        }
    }

    /// Centers every feature and scales it to unit variance
    pub fn standard() -> Self {
        Self::new(ScalingMethod::Standard(true, true))
    }

    /// Scales every feature to unit variance without centering
    ///
    /// Sparse inputs such as one-hot indicators keep their zeros.
    pub fn standard_no_mean() -> Self {
        Self::new(ScalingMethod::Standard(false, true))
    }

    pub fn method(&self) -> ScalingMethod {
        self.method
    }
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for LinearScaler<F>
{
    type Object = FittedLinearScaler<F>;

    /// Fails with `NotEnoughSamples` on a dataset without rows
    fn fit(&self, x: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let ScalingMethod::Standard(with_mean, with_std) = self.method;
        let records = x.records();
        let means = records
            .mean_axis(Axis(0))
            .ok_or(PreprocessingError::NotEnoughSamples)?;

        let scales = if with_std {
            records.std_axis(Axis(0), F::zero()).mapv(|s| {
                // constant features are left unscaled
                if abs_diff_eq!(s, F::zero()) {
                    F::one()
                } else {
                    F::one() / s
                }
            })
        } else {
            Array1::ones(records.ncols())
        };
        let offsets = if with_mean {
            means
        } else {
            Array1::zeros(records.ncols())
        };

        Ok(FittedLinearScaler {
            offsets,
            scales,
            method: self.method,
        })
    }
}

/// Offsets and scales learned by a [`LinearScaler`]
///
/// Transforming computes `(x - offset) * scale` for every feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FittedLinearScaler<F: Float> {
    offsets: Array1<F>,
    scales: Array1<F>,
    method: ScalingMethod,
}

impl<F: Float> FittedLinearScaler<F> {
    /// Value subtracted from each feature, zero when fitted without centering
    pub fn offsets(&self) -> &Array1<F> {
        &self.offsets
    }

    /// Factor applied to each feature after the offset
    pub fn scales(&self) -> &Array1<F> {
        &self.scales
    }

    pub fn method(&self) -> ScalingMethod {
        self.method
    }
}

impl<F: Float, D: Data<Elem = F>> Transform<ArrayBase<D, Ix2>> for FittedLinearScaler<F> {
    type Output = Array2<F>;

    /// Fails if `x` has a different number of features than the fitting data
    fn transform(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        if x.ncols() != self.offsets.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected: self.offsets.len(),
                found: x.ncols(),
            });
        }
        let mut x = x.to_owned();
        Zip::from(x.columns_mut())
            .and(&self.offsets)
            .and(&self.scales)
            .for_each(|mut col, &offset, &scale| {
                col.mapv_inplace(|el| (el - offset) * scale);
            });
        Ok(x)
    }
}

impl<F: Float> FeatureNamesOut for FittedLinearScaler<F> {
    fn feature_names_out(&self, input: &[String]) -> Vec<String> {
        input.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn standard_scaling_centers_and_normalizes() {
        let dataset = array![[1., -1., 2.], [2., 0., 0.], [0., 1., -1.]].into();
        let scaler = LinearScaler::standard().fit(&dataset).unwrap();
        assert_abs_diff_eq!(*scaler.offsets(), array![1., 0., 1. / 3.]);
        assert_abs_diff_eq!(
            *scaler.scales(),
            array![1. / 0.81, 1. / 0.81, 1. / 1.24],
            epsilon = 1e-2
        );

        let scaled = scaler.transform(dataset.records()).unwrap();
        assert_abs_diff_eq!(scaled.mean_axis(Axis(0)).unwrap(), array![0., 0., 0.]);
        assert_abs_diff_eq!(scaled.std_axis(Axis(0), 0.), array![1., 1., 1.]);
    }

    #[test]
    fn unit_variance_without_centering_keeps_zeros() {
        let dataset = array![[1., -1., 2.], [2., 0., 0.], [0., 1., -1.]].into();
        let scaler = LinearScaler::standard_no_mean().fit(&dataset).unwrap();
        assert_abs_diff_eq!(*scaler.offsets(), array![0., 0., 0.]);

        let scaled = scaler.transform(dataset.records()).unwrap();
        assert_abs_diff_eq!(scaled[[1, 1]], 0.);
        assert_abs_diff_eq!(scaled[[1, 2]], 0.);
        assert_abs_diff_eq!(scaled[[0, 0]], 1. / 0.8165, epsilon = 1e-3);
        assert_abs_diff_eq!(scaled.std_axis(Axis(0), 0.), array![1., 1., 1.]);
    }

    #[test]
    fn balanced_indicators_are_doubled() {
        let dataset = array![[1., 0.], [0., 1.], [0., 1.], [1., 0.]].into();
        let scaler = LinearScaler::standard_no_mean().fit(&dataset).unwrap();
        let scaled = scaler.transform(dataset.records()).unwrap();
        // std of a balanced indicator is 0.5
        assert_abs_diff_eq!(scaled, array![[2., 0.], [0., 2.], [0., 2.], [2., 0.]]);
    }

    #[test]
    fn constant_feature_is_only_centered() {
        let dataset = array![[1., 2.], [2., 2.], [0., 2.]].into();
        let scaler = LinearScaler::standard().fit(&dataset).unwrap();
        assert_abs_diff_eq!(scaler.scales()[1], 1.);

        let scaled = scaler.transform(dataset.records()).unwrap();
        assert_abs_diff_eq!(scaled.column(1), array![0., 0., 0.]);
    }

    #[test]
    fn fitting_needs_rows() {
        let dataset: DatasetBase<Array2<f64>, ()> = Array2::zeros((0, 2)).into();
        for scaler in vec![LinearScaler::standard(), LinearScaler::standard_no_mean()] {
            let err = scaler.fit(&dataset).unwrap_err();
            assert!(matches!(err, PreprocessingError::NotEnoughSamples));
        }
    }

    #[test]
    fn empty_input_transforms_to_empty_output() {
        let dataset = array![[1., -1., 2.], [2., 0., 2.], [0., 1., 2.]].into();
        let scaler = LinearScaler::standard().fit(&dataset).unwrap();
        let scaled = scaler.transform(&Array2::<f64>::zeros((0, 3))).unwrap();
        assert_eq!(scaled.dim(), (0, 3));
    }

    #[test]
    fn feature_count_must_match() {
        let dataset = array![[1., -1., 2.], [2., 0., 2.], [0., 1., 2.]].into();
        let scaler = LinearScaler::standard().fit(&dataset).unwrap();
        let err = scaler.transform(&array![[0., 0.]]).unwrap_err();
        assert!(matches!(
            err,
            PreprocessingError::FeatureMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn fitted_scaler_survives_json() {
        let dataset = array![[1., -1.], [2., 0.], [0., 1.]].into();
        let scaler = LinearScaler::<f64>::standard_no_mean().fit(&dataset).unwrap();
        let json = serde_json::to_string(&scaler).unwrap();
        let restored: FittedLinearScaler<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scaler);
        assert_eq!(
            restored.method().to_string(),
            "Standard scaler (with_mean = false, with_std = true)"
        );
    }
}
