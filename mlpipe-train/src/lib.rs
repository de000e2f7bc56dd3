//! `mlpipe-train` runs the data transformation stage of a training pipeline.
//!
//! ## The Big Picture
//!
//! Given a training and a test split stored as CSV files, the
//! [`DataTransformation`](transformation::DataTransformation) runner
//!
//! * splits the configured target column off both tables,
//! * fits the numeric/categorical preprocessor of `mlpipe-preprocessing` on the training
//!   features only,
//! * transforms both splits with the fitted preprocessor and appends the target as the last
//!   column,
//! * stores the fitted preprocessor so that inference applies the very same transformation.
//!
//! Failures are reported as [`PipelineError`](error::PipelineError)s naming the operation and
//! the source location which observed them. Progress is logged with `tracing`; the binary
//! installs a subscriber writing one log file per run, see [`init_logging`](logger::init_logging).
//!
//! ## Example
//!
//! ```no_run
//! use mlpipe_train::config::DataTransformationConfig;
//! use mlpipe_train::transformation::DataTransformation;
//!
//! let runner = DataTransformation::new(DataTransformationConfig::default());
//! let artifact = runner
//!     .initiate_data_transformation::<f64, _, _>("artifacts/train.csv", "artifacts/test.csv")
//!     .unwrap();
//! println!(
//!     "train {:?}, test {:?}, preprocessor stored in {}",
//!     artifact.train.dim(),
//!     artifact.test.dim(),
//!     artifact.preprocessor_path.display()
//! );
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod transformation;

pub use config::DataTransformationConfig;
pub use error::{ErrorKind, PipelineError, Result, ResultExt, SetupError};
pub use logger::{init_logging, LogHandle};
pub use transformation::{DataTransformation, TransformationArtifact};
