//! The transformation stage of a training run
//!
//! [`DataTransformation::initiate_data_transformation`] reads the train and test splits, fits
//! the preprocessor on the training features only, transforms both splits with it and stores
//! the fitted preprocessor. The returned matrices carry the target as their last column.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use mlpipe::traits::Fit;
use mlpipe::Table;
use mlpipe_datasets::read_table;
use mlpipe_preprocessing::builder::{build_preprocessor, FittedPreprocessor, Preprocessor};
use mlpipe_preprocessing::persistence::{load_object, save_object};
use mlpipe_preprocessing::{Float, Transform};
use ndarray::{concatenate, Array1, Array2, Axis};

use crate::config::DataTransformationConfig;
use crate::error::{Result, ResultExt};

/// Output of a transformation run
#[derive(Clone, Debug, PartialEq)]
pub struct TransformationArtifact<F> {
    /// Transformed training features followed by the training target
    pub train: Array2<F>,
    /// Transformed test features followed by the test target
    pub test: Array2<F>,
    /// Names of the transformed feature columns, without the target
    pub feature_names: Vec<String>,
    /// Where the fitted preprocessor was stored
    pub preprocessor_path: PathBuf,
}

pub struct DataTransformation {
    config: DataTransformationConfig,
}

impl Default for DataTransformation {
    fn default() -> Self {
        Self::new(DataTransformationConfig::default())
    }
}

impl DataTransformation {
    pub fn new(config: DataTransformationConfig) -> Self {
        DataTransformation { config }
    }

    pub fn config(&self) -> &DataTransformationConfig {
        &self.config
    }

    /// Returns the unfitted preprocessor for the configured schema
    ///
    /// Fails if the target column is also declared as a feature.
    pub fn get_data_transformer_object<F: Float>(&self) -> Result<Preprocessor<F>> {
        self.config
            .validate()
            .during("checking the configured columns")?;
        build_preprocessor(&self.config.schema).during("building the preprocessor")
    }

    /// Fits the preprocessor on the training split and transforms both splits
    ///
    /// Nothing is written if any step before persisting fails.
    pub fn initiate_data_transformation<F: Float, P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        train_path: P,
        test_path: Q,
    ) -> Result<TransformationArtifact<F>> {
        let train = read_table(train_path.as_ref()).during("reading the training data")?;
        let test = read_table(test_path.as_ref()).during("reading the test data")?;
        tracing::info!(
            "read train ({} rows) and test ({} rows) data",
            train.nrows(),
            test.nrows()
        );

        let target = self.config.target_column.as_str();
        let train = train
            .split_target::<F>(target)
            .during("separating the target from the training data")?;
        let test = test
            .split_target::<F>(target)
            .during("separating the target from the test data")?;

        tracing::info!("obtaining preprocessing object");
        let preprocessor = self.get_data_transformer_object::<F>()?;

        tracing::info!("applying preprocessing object on training and testing data");
        let fitted: FittedPreprocessor<F> = preprocessor
            .fit(&train)
            .during("fitting the preprocessor on the training data")?;
        let train_features = fitted
            .transform(train.records())
            .during("transforming the training data")?;
        let test_features = fitted
            .transform(test.records())
            .during("transforming the test data")?;

        let train_arr = append_target(train_features, train.targets())
            .during("appending the target to the training data")?;
        let test_arr = append_target(test_features, test.targets())
            .during("appending the target to the test data")?;

        let preprocessor_path = self.config.preprocessor_path.clone();
        save_object(&preprocessor_path, &fitted).during("saving the preprocessor")?;
        tracing::info!("saved preprocessing object to {}", preprocessor_path.display());

        Ok(TransformationArtifact {
            train: train_arr,
            test: test_arr,
            feature_names: fitted.feature_names(),
            preprocessor_path,
        })
    }
}

/// Loads a stored preprocessor
pub fn load_preprocessor<F: Float, P: AsRef<Path>>(path: P) -> Result<FittedPreprocessor<F>> {
    load_object(path.as_ref()).during("loading the preprocessor")
}

/// Transforms a feature table with a stored preprocessor
///
/// Columns the preprocessor does not know about, such as the target, are ignored.
pub fn apply_preprocessor<F: Float, P: AsRef<Path>>(path: P, table: &Table) -> Result<Array2<F>> {
    let fitted = load_preprocessor::<F, _>(path)?;
    transform_table(&fitted, table)
}

/// Transforms a feature table with an already loaded preprocessor
pub fn transform_table<F: Float>(
    fitted: &FittedPreprocessor<F>,
    table: &Table,
) -> Result<Array2<F>> {
    fitted
        .transform(table)
        .during("transforming the input data")
}

/// Appends `target` as the last column of `features`
pub fn append_target<F: Float>(
    features: Array2<F>,
    target: &Array1<F>,
) -> std::result::Result<Array2<F>, ndarray::ShapeError> {
    concatenate(
        Axis(1),
        &[features.view(), target.view().insert_axis(Axis(1))],
    )
}

/// Writes a matrix as comma separated values with a header row
pub fn write_csv<F: Float, P: AsRef<Path>>(
    path: P,
    header: &[String],
    values: &Array2<F>,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(csv::Error::from)
            .during("creating the output directory")?;
    }

    let file = File::create(path)
        .map_err(csv::Error::from)
        .during("creating the output file")?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(header).during("writing the output header")?;
    for row in values.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .during("writing the output rows")?;
    }
    writer
        .flush()
        .map_err(csv::Error::from)
        .during("flushing the output file")?;

    tracing::info!("wrote {} rows to {}", values.nrows(), path.display());
    Ok(())
}
