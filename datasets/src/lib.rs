//! `mlpipe-datasets` reads delimited text files into [`mlpipe::Table`]s.
//!
//! ## The Big Picture
//!
//! `mlpipe-datasets` is a crate in the `mlpipe` workspace. Preprocessing needs the raw cells of
//! a table before any column is interpreted, so loading does not infer types: every cell is
//! kept as text and missing markers (empty cells, `NA`, `NaN`, `null`, ...) become `None`.
//! Row order and row count are preserved exactly.
//!
//! ## Bundled data
//!
//! * `["students"]` : a small sample of the student performance dataset used in tests and
//!   examples
//!
//! ```ignore
//! mlpipe-datasets = { version = "0.1.0", features = ["students"] }
//! ```
//!
//! ## Reading a file
//!
//! ```no_run
//! let table = mlpipe_datasets::read_table("data/train.csv").unwrap();
//! println!("{} rows, columns: {:?}", table.nrows(), table.column_names());
//! ```

mod dataset;
mod error;

pub use dataset::{read_table, table_from_csv, table_from_gz_csv};
pub use error::{Error, Result};

#[cfg(feature = "students")]
pub use dataset::students;
