//! Construction of the numeric/categorical preprocessor
//!
//! [`build_preprocessor`] wires the two standard column pipelines into a column transformer:
//!
//! * numeric columns: median imputation followed by standard scaling
//! * categorical columns: most-frequent imputation, one-hot encoding and scaling to unit
//!   variance without centering, so that the indicator matrix keeps its zeros
//!
//! The returned value is unfitted. Fitting it on a training [`Table`](mlpipe::Table) yields a
//! [`FittedPreprocessor`], which can be persisted with [`save_object`](crate::persistence::save_object).

use mlpipe::ParamGuard;
use serde::{Deserialize, Serialize};

use crate::column_transformer::{ColumnGroup, ColumnTransformer, ColumnTransformerParams};
use crate::error::Result;
use crate::imputation::{
    CategoricalImputer, FittedCategoricalImputer, FittedSimpleImputer, SimpleImputer,
};
use crate::linear_scaling::{FittedLinearScaler, LinearScaler};
use crate::one_hot_encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
use crate::pipeline::{FittedPipeline, Pipeline};
use crate::Float;

/// Name of the numeric column group, prefixes the numeric output feature names
pub const NUMERIC_GROUP: &str = "num_pipeline";
/// Name of the categorical column group, prefixes the categorical output feature names
pub const CATEGORICAL_GROUP: &str = "cat_pipeline";

/// Declares which columns of a table are numeric and which are categorical
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    /// What the encoder does with categories unseen during fitting
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl Schema {
    pub fn new<N: Into<String>, C: Into<String>>(numeric: Vec<N>, categorical: Vec<C>) -> Self {
        Schema {
            numeric_columns: numeric.into_iter().map(Into::into).collect(),
            categorical_columns: categorical.into_iter().map(Into::into).collect(),
            handle_unknown: HandleUnknown::default(),
        }
    }

    pub fn handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }
}

pub type NumericPipeline<F> = Pipeline<SimpleImputer<F>, LinearScaler<F>>;
pub type CategoricalPipeline<F> =
    Pipeline<Pipeline<CategoricalImputer, OneHotEncoder<F>>, LinearScaler<F>>;

pub type FittedNumericPipeline<F> = FittedPipeline<FittedSimpleImputer<F>, FittedLinearScaler<F>>;
pub type FittedCategoricalPipeline<F> = FittedPipeline<
    FittedPipeline<FittedCategoricalImputer, FittedOneHotEncoder<F>>,
    FittedLinearScaler<F>,
>;

/// The unfitted numeric/categorical preprocessor
pub type Preprocessor<F> = ColumnTransformerParams<F, NumericPipeline<F>, CategoricalPipeline<F>>;
/// A preprocessor fitted on training data
pub type FittedPreprocessor<F> =
    ColumnTransformer<F, FittedNumericPipeline<F>, FittedCategoricalPipeline<F>>;

/// Numeric pipeline: median imputation, then standard scaling
pub fn numeric_pipeline<F: Float>() -> NumericPipeline<F> {
    Pipeline::new(SimpleImputer::median(), LinearScaler::standard())
}

/// Categorical pipeline: most-frequent imputation, one-hot encoding, then scaling without centering
pub fn categorical_pipeline<F: Float>(handle_unknown: HandleUnknown) -> CategoricalPipeline<F> {
    Pipeline::new(
        CategoricalImputer::most_frequent(),
        OneHotEncoder::new().handle_unknown(handle_unknown),
    )
    .then(LinearScaler::standard_no_mean())
}

/// Builds an unfitted preprocessor for the given schema
///
/// Fails if a column group is empty, lists a column twice or shares a column with the other
/// group.
pub fn build_preprocessor<F: Float>(schema: &Schema) -> Result<Preprocessor<F>> {
    tracing::info!("numerical columns: {:?}", schema.numeric_columns);
    tracing::info!("categorical columns: {:?}", schema.categorical_columns);

    let params = ColumnTransformerParams::new(
        ColumnGroup::new(
            NUMERIC_GROUP,
            schema.numeric_columns.clone(),
            numeric_pipeline(),
        ),
        ColumnGroup::new(
            CATEGORICAL_GROUP,
            schema.categorical_columns.clone(),
            categorical_pipeline(schema.handle_unknown),
        ),
    );
    params.check_ref()?;

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreprocessingError;
    use crate::Transform;
    use approx::assert_abs_diff_eq;
    use mlpipe::dataset::{DatasetBase, Table};
    use mlpipe::traits::Fit;
    use ndarray::Axis;

    fn students() -> DatasetBase<Table, ndarray::Array1<f64>> {
        mlpipe_datasets::students()
            .split_target::<f64>("math_score")
            .unwrap()
    }

    fn full_schema() -> Schema {
        Schema::new(
            vec!["writing_score", "reading_score"],
            vec![
                "gender",
                "race_ethnicity",
                "parental_level_of_education",
                "lunch",
                "test_preparation_course",
            ],
        )
    }

    #[test]
    fn test_numeric_features_are_standardized() {
        let dataset = students();
        let fitted = build_preprocessor::<f64>(&full_schema())
            .unwrap()
            .fit(&dataset)
            .unwrap();
        let features = fitted.transform(dataset.records()).unwrap();

        let numeric = features.slice(ndarray::s![.., ..2]);
        assert_abs_diff_eq!(
            numeric.mean_axis(Axis(0)).unwrap(),
            ndarray::array![0., 0.],
            epsilon = 1e-10
        );
        assert_abs_diff_eq!(
            numeric.std_axis(Axis(0), 0.),
            ndarray::array![1., 1.],
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_categorical_features_keep_their_zeros() {
        let dataset = students();
        let fitted = build_preprocessor::<f64>(&full_schema())
            .unwrap()
            .fit(&dataset)
            .unwrap();
        let features = fitted.transform(dataset.records()).unwrap();

        let names = fitted.feature_names();
        assert_eq!(names.len(), features.ncols());
        assert_eq!(names[0], "num_pipeline__writing_score");
        assert_eq!(names[1], "num_pipeline__reading_score");
        assert!(names[2..].iter().all(|name| name.starts_with("cat_pipeline__")));
        assert!(names.contains(&"cat_pipeline__gender_female".to_string()));

        let categorical = features.slice(ndarray::s![.., 2..]);
        assert!(categorical.iter().all(|&v| v >= 0.));
        // every row has exactly one non-zero indicator per categorical column
        for row in categorical.rows() {
            assert_eq!(row.iter().filter(|&&v| v > 0.).count(), 5);
        }
    }

    #[test]
    fn test_invalid_schema() {
        let overlapping = Schema::new(vec!["gender"], vec!["gender"]);
        assert!(matches!(
            build_preprocessor::<f64>(&overlapping),
            Err(PreprocessingError::OverlappingColumns(_))
        ));

        let empty = Schema::new(Vec::<String>::new(), vec!["gender"]);
        assert!(matches!(
            build_preprocessor::<f64>(&empty),
            Err(PreprocessingError::EmptyColumnGroup(name)) if name == NUMERIC_GROUP
        ));
    }

    #[test]
    fn test_schema_defaults_to_failing_on_unknown_categories() {
        let schema: Schema = serde_json::from_str(
            r#"{"numeric_columns": ["a"], "categorical_columns": ["b"]}"#,
        )
        .unwrap();
        assert_eq!(schema.handle_unknown, HandleUnknown::Error);
    }
}
