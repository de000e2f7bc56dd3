//! # Preprocessing
//! ## The Big Picture
//!
//! `mlpipe-preprocessing` is a crate in the `mlpipe` workspace. It turns the raw cells of a
//! [`Table`](mlpipe::Table) into a purely numeric matrix that a model can be trained on, and
//! makes sure the exact same transformation is replayed on test and inference data.
//!
//! ## Current state
//! `mlpipe-preprocessing` provides the following steps:
//! * Imputation: [`SimpleImputer`](imputation::SimpleImputer) for numeric columns and
//!   [`CategoricalImputer`](imputation::CategoricalImputer) for label columns
//! * Encoding: [`OneHotEncoder`](one_hot_encoding::OneHotEncoder)
//! * Scaling: [`LinearScaler`](linear_scaling::LinearScaler) (standard scaling, with or without centering)
//!
//! and the machinery to compose them:
//! * [`Pipeline`](pipeline::Pipeline): an ordered chain of steps
//! * [`ColumnTransformerParams`](column_transformer::ColumnTransformerParams): routes named
//!   column groups to their own pipeline, the fitted
//!   [`ColumnTransformer`](column_transformer::ColumnTransformer) concatenates the results
//! * [`build_preprocessor`](builder::build_preprocessor): the numeric/categorical preprocessor
//!   for a [`Schema`](builder::Schema)
//! * [`save_object`](persistence::save_object) / [`load_object`](persistence::load_object):
//!   persistence of fitted transformers
//!
//! Every step follows the same life cycle: an unfitted value holds hyperparameters, calling
//! [`Fit::fit`](mlpipe::traits::Fit::fit) on training data returns a fitted value which owns
//! the learned state, and [`Transform::transform`] applies that state without learning
//! anything new.
//!
//! ## Example
//!
//! ```rust
//! use mlpipe::traits::Fit;
//! use mlpipe_preprocessing::builder::{build_preprocessor, Schema};
//! use mlpipe_preprocessing::Transform;
//!
//! let table = mlpipe_datasets::students();
//! let dataset = table.split_target::<f64>("math_score").unwrap();
//!
//! let preprocessor = build_preprocessor::<f64>(&Schema::new(
//!     vec!["writing_score", "reading_score"],
//!     vec!["gender", "lunch"],
//! ))
//! .unwrap();
//! let fitted = preprocessor.fit(&dataset).unwrap();
//! let features = fitted.transform(dataset.records()).unwrap();
//!
//! // two numeric columns, two genders and two lunch types
//! assert_eq!(features.dim(), (40, 6));
//! ```

pub mod builder;
pub mod column_transformer;
pub mod error;
pub mod imputation;
pub mod linear_scaling;
pub mod one_hot_encoding;
pub mod persistence;
pub mod pipeline;

mod helpers;

use mlpipe::Records;
use serde::{de::DeserializeOwned, Serialize};

pub use error::{PreprocessingError, Result};

pub trait Float: mlpipe::Float + Serialize + DeserializeOwned {}

impl Float for f32 {}
impl Float for f64 {}

/// A fitted preprocessing step
///
/// Applies the state learned during fitting to records of type `R`. Transforming never
/// changes the learned state, so the same fitted value can be applied to training, test and
/// inference data alike.
pub trait Transform<R> {
    type Output: Records;

    fn transform(&self, x: &R) -> Result<Self::Output>;
}

/// Names of the features a fitted step produces
pub trait FeatureNamesOut {
    /// Given the names of the input features, returns one name per output feature
    fn feature_names_out(&self, input: &[String]) -> Vec<String>;
}
