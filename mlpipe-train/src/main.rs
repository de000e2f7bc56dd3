use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;

use mlpipe_train::transformation::{load_preprocessor, transform_table, write_csv};
use mlpipe_train::{init_logging, DataTransformation, DataTransformationConfig, ResultExt};

/// Fits and applies the preprocessor of a training run
#[derive(Debug, StructOpt)]
#[structopt(name = "mlpipe-train")]
enum Command {
    /// Fit the preprocessor on a training split, transform both splits and store it
    Fit {
        #[structopt(long, parse(from_os_str))]
        /// Training split, CSV with a header row
        train: PathBuf,
        #[structopt(long, parse(from_os_str))]
        /// Test split, CSV with a header row
        test: PathBuf,
        #[structopt(long, parse(from_os_str))]
        /// JSON configuration, defaults to the student performance setup
        config: Option<PathBuf>,
        #[structopt(long, parse(from_os_str))]
        /// Where to store the fitted preprocessor, overrides the configuration
        artifact: Option<PathBuf>,
        #[structopt(long, parse(from_os_str))]
        /// Write the transformed splits as `train.csv` and `test.csv` into this directory
        output_dir: Option<PathBuf>,
        #[structopt(long, parse(from_os_str), default_value = "logs")]
        /// Directory of the run's log file
        log_dir: PathBuf,
    },
    /// Transform a table with a stored preprocessor
    Apply {
        #[structopt(long, parse(from_os_str))]
        /// Fitted preprocessor written by `fit`
        preprocessor: PathBuf,
        #[structopt(long, parse(from_os_str))]
        /// Table to transform, CSV with a header row
        input: PathBuf,
        #[structopt(long, parse(from_os_str))]
        /// Destination of the transformed features
        output: PathBuf,
        #[structopt(long, parse(from_os_str), default_value = "logs")]
        /// Directory of the run's log file
        log_dir: PathBuf,
    },
}

fn fit(
    train: PathBuf,
    test: PathBuf,
    config: Option<PathBuf>,
    artifact: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = match config {
        Some(path) => DataTransformationConfig::from_json_file(path)?,
        None => DataTransformationConfig::default(),
    };
    if let Some(path) = artifact {
        config = config.with_preprocessor_path(path);
    }

    let runner = DataTransformation::new(config);
    let artifact = runner.initiate_data_transformation::<f64, _, _>(&train, &test)?;
    println!(
        "Transformed train {:?} and test {:?}, preprocessor stored in {}",
        artifact.train.dim(),
        artifact.test.dim(),
        artifact.preprocessor_path.display()
    );

    if let Some(dir) = output_dir {
        let mut header = artifact.feature_names.clone();
        header.push(runner.config().target_column.clone());
        write_csv(dir.join("train.csv"), &header, &artifact.train)?;
        write_csv(dir.join("test.csv"), &header, &artifact.test)?;
    }

    Ok(())
}

fn apply(preprocessor: PathBuf, input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let table = mlpipe_datasets::read_table(&input).during("reading the input data")?;
    let fitted = load_preprocessor::<f64, _>(&preprocessor)?;
    let features = transform_table(&fitted, &table)?;
    write_csv(&output, &fitted.feature_names(), &features)?;

    println!(
        "Transformed {} rows into {} features, written to {}",
        features.nrows(),
        features.ncols(),
        output.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    match Command::from_args() {
        Command::Fit {
            train,
            test,
            config,
            artifact,
            output_dir,
            log_dir,
        } => {
            let _log = init_logging(&log_dir).context("failed to set up logging")?;
            fit(train, test, config, artifact, output_dir)
        }
        Command::Apply {
            preprocessor,
            input,
            output,
            log_dir,
        } => {
            let _log = init_logging(&log_dir).context("failed to set up logging")?;
            apply(preprocessor, input, output)
        }
    }
}
