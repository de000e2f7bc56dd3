use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use mlpipe_preprocessing::builder::Schema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ResultExt, SetupError};

/// Settings of a transformation run
///
/// Every field has a default, so a configuration file only needs to list what differs from
/// the student performance setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTransformationConfig {
    /// Where the fitted preprocessor is written, replaced on every run
    pub preprocessor_path: PathBuf,
    pub schema: Schema,
    /// Column which is split off the features and appended to the transformed output
    pub target_column: String,
}

impl Default for DataTransformationConfig {
    fn default() -> Self {
        DataTransformationConfig {
            preprocessor_path: Path::new("artifacts").join("preprocessor.json"),
            schema: Schema::new(
                vec!["writing_score", "reading_score"],
                vec![
                    "gender",
                    "race_ethnicity",
                    "parental_level_of_education",
                    "lunch",
                    "test_preparation_course",
                ],
            ),
            target_column: "math_score".to_string(),
        }
    }
}

impl DataTransformationConfig {
    /// Reads a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).during("opening the configuration file")?;
        let config = serde_json::from_reader(BufReader::new(file))
            .during("parsing the configuration file")?;

        Ok(config)
    }

    /// Checks that the target column is not routed to a feature group
    pub fn validate(&self) -> std::result::Result<(), SetupError> {
        let target = &self.target_column;
        if self.schema.numeric_columns.contains(target)
            || self.schema.categorical_columns.contains(target)
        {
            return Err(SetupError::TargetIsFeature(target.clone()));
        }
        Ok(())
    }

    pub fn with_preprocessor_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.preprocessor_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"target_column": "total_score", "preprocessor_path": "out/pre.json"}}"#
        )
        .unwrap();

        let config = DataTransformationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.target_column, "total_score");
        assert_eq!(config.preprocessor_path, PathBuf::from("out/pre.json"));
        assert_eq!(config.schema, DataTransformationConfig::default().schema);
    }

    #[test]
    fn invalid_file_is_a_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();

        let err = DataTransformationConfig::from_json_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.operation(), "parsing the configuration file");
    }

    #[test]
    fn target_cannot_be_a_feature() {
        assert!(DataTransformationConfig::default().validate().is_ok());

        let mut config = DataTransformationConfig::default();
        config.target_column = "writing_score".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SetupError::TargetIsFeature(ref name) if name == "writing_score"));
    }

    #[test]
    fn default_artifact_location() {
        let config = DataTransformationConfig::default();
        assert_eq!(
            config.preprocessor_path,
            PathBuf::from("artifacts/preprocessor.json")
        );
        assert_eq!(config.schema.numeric_columns.len(), 2);
        assert_eq!(config.schema.categorical_columns.len(), 5);
    }
}
