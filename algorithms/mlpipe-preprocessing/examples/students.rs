use mlpipe::prelude::*;
use mlpipe_preprocessing::builder::{build_preprocessor, Schema};
use mlpipe_preprocessing::Transform;

fn main() {
    // Read in the bundled sample and separate the target
    let dataset = mlpipe_datasets::students()
        .split_target::<f64>("math_score")
        .unwrap();

    let schema = Schema::new(
        vec!["writing_score", "reading_score"],
        vec![
            "gender",
            "race_ethnicity",
            "parental_level_of_education",
            "lunch",
            "test_preparation_course",
        ],
    );

    // Learn imputation, encoding and scaling parameters
    let preprocessor = build_preprocessor::<f64>(&schema)
        .unwrap()
        .fit(&dataset)
        .unwrap();

    let features = preprocessor.transform(dataset.records()).unwrap();
    println!(
        "{} rows transformed into {} features",
        features.nrows(),
        features.ncols()
    );
    for name in preprocessor.feature_names() {
        println!("  {}", name);
    }
}
