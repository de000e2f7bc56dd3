//! `mlpipe` provides the shared vocabulary of a small training-data preparation toolkit.
//!
//! Kin in spirit to Python's `scikit-learn` preprocessing module, it focuses on the step that
//! sits between reading a tabular dataset and training a model: cleaning, encoding and scaling
//! heterogeneous columns so that the same transformation can be replayed at inference time.
//!
//! ## The Big Picture
//!
//! The workspace is split into a handful of crates:
//!
//! * `mlpipe` (this crate): the [`Table`](dataset::Table) of raw tabular cells, the
//!   [`DatasetBase`] pairing records with targets, and the [`Fit`](traits::Fit) /
//!   [`ParamGuard`] traits every preprocessing step implements.
//! * `mlpipe-datasets`: reading delimited text files into a [`Table`](dataset::Table).
//! * `mlpipe-preprocessing`: imputers, scalers, one-hot encoding, pipelines and the column
//!   router that ties them to named column groups.
//! * `mlpipe-train`: the end-to-end fit/transform/persist runner and its command line.
//!
//! ## Example
//!
//! ```
//! use mlpipe::dataset::Table;
//!
//! let table = Table::from_rows(
//!     vec!["reading_score".into(), "math_score".into()],
//!     vec![
//!         vec![Some("72".into()), Some("70".into())],
//!         vec![None, Some("55".into())],
//!     ],
//! )
//! .unwrap();
//!
//! let dataset = table.split_target::<f64>("math_score").unwrap();
//! assert_eq!(dataset.nsamples(), 2);
//! assert_eq!(dataset.records().column_names(), &["reading_score".to_string()]);
//! ```

pub mod dataset;
pub mod error;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{DatasetBase, Float, Records, Table};
pub use param_guard::ParamGuard;
