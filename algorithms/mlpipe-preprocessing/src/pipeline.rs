//! Chaining of preprocessing steps
//!
//! A [`Pipeline`] fits its first step on the input, transforms the input with the fitted step
//! and then fits the second step on the result. Longer chains are built by nesting, see
//! [`Pipeline::then`].

use mlpipe::dataset::{DatasetBase, Records};
use mlpipe::traits::Fit;
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};
use crate::{FeatureNamesOut, Transform};

/// An ordered chain of two unfitted steps
#[derive(Clone, Debug, PartialEq)]
pub struct Pipeline<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pipeline<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Pipeline { first, second }
    }

    /// Appends another step to the end of the chain
    pub fn then<C>(self, step: C) -> Pipeline<Self, C> {
        Pipeline::new(self, step)
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<R, T, A, B> Fit<R, T, PreprocessingError> for Pipeline<A, B>
where
    R: Records,
    A: Fit<R, T, PreprocessingError>,
    A::Object: Transform<R>,
    B: Fit<<A::Object as Transform<R>>::Output, (), PreprocessingError>,
{
    type Object = FittedPipeline<A::Object, B::Object>;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object> {
        let first = self.first.fit(dataset)?;
        // the second step only ever sees the output of the fitted first step
        let intermediate = DatasetBase::new(first.transform(dataset.records())?, ());
        let second = self.second.fit(&intermediate)?;

        Ok(FittedPipeline { first, second })
    }
}

/// The result of fitting a [`Pipeline`], applies both fitted steps in order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline<A, B> {
    first: A,
    second: B,
}

impl<A, B> FittedPipeline<A, B> {
    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<R, A, B> Transform<R> for FittedPipeline<A, B>
where
    A: Transform<R>,
    B: Transform<A::Output>,
{
    type Output = B::Output;

    fn transform(&self, x: &R) -> Result<Self::Output> {
        let intermediate = self.first.transform(x)?;
        self.second.transform(&intermediate)
    }
}

impl<A: FeatureNamesOut, B: FeatureNamesOut> FeatureNamesOut for FittedPipeline<A, B> {
    fn feature_names_out(&self, input: &[String]) -> Vec<String> {
        self.second
            .feature_names_out(&self.first.feature_names_out(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imputation::{CategoricalImputer, SimpleImputer};
    use crate::linear_scaling::LinearScaler;
    use crate::one_hot_encoding::OneHotEncoder;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_impute_then_scale() {
        let dataset: DatasetBase<_, ()> = array![[1.], [3.], [f64::NAN], [5.]].into();
        let pipeline = Pipeline::new(SimpleImputer::median(), LinearScaler::<f64>::standard());
        let fitted = pipeline.fit(&dataset).unwrap();

        assert_abs_diff_eq!(*fitted.first().statistics(), array![3.]);
        // the scaler learns from the imputed column [1, 3, 3, 5]
        assert_abs_diff_eq!(*fitted.second().offsets(), array![3.]);

        let transformed = fitted.transform(dataset.records()).unwrap();
        let std = 2f64.sqrt();
        assert_abs_diff_eq!(
            transformed,
            array![[-2. / std], [0.], [0.], [2. / std]],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_three_step_chain() {
        let labels: Array2<Option<String>> = array![
            [Some("b".to_string())],
            [None],
            [Some("a".to_string())],
            [Some("b".to_string())]
        ];
        let dataset: DatasetBase<_, ()> = labels.into();
        let pipeline = Pipeline::new(
            CategoricalImputer::most_frequent(),
            OneHotEncoder::<f64>::new(),
        )
        .then(LinearScaler::<f64>::standard_no_mean());
        let fitted = pipeline.fit(&dataset).unwrap();

        let transformed = fitted.transform(dataset.records()).unwrap();
        assert_eq!(transformed.dim(), (4, 2));
        // the missing label was imputed with `b`, so `a` is the only zero in column 1
        assert_abs_diff_eq!(transformed[[1, 0]], 0.);
        assert!(transformed[[1, 1]] > 0.);
        assert_abs_diff_eq!(transformed[[2, 1]], 0.);

        let names = fitted.feature_names_out(&["letter".to_string()]);
        assert_eq!(names, vec!["letter_a", "letter_b"]);
    }

    #[test]
    fn test_errors_of_the_first_step_propagate() {
        let dataset: DatasetBase<_, ()> = array![[f64::NAN], [f64::NAN]].into();
        let pipeline = Pipeline::new(SimpleImputer::median(), LinearScaler::<f64>::standard());
        assert!(matches!(
            pipeline.fit(&dataset),
            Err(PreprocessingError::NoObservedValues(0))
        ));
    }
}
