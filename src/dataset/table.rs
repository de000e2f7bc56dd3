use std::collections::HashSet;

use ndarray::{Array1, Array2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::{DatasetBase, Float};
use crate::error::{Error, Result};

/// Cell contents treated as a missing value when a table is read from text.
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A",
];

/// Returns `true` if a raw text cell denotes a missing value
pub fn is_missing_marker(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

/// A table of raw, untyped cells
///
/// Columns are stored in header order, each as one optional string per row, where `None`
/// marks a missing value. A table never reorders or drops rows, so row `i` of any matrix
/// extracted from it corresponds to row `i` of the source file.
///
/// Interpretation of the cells is deferred to the consumer: [`numeric_matrix`](Table::numeric_matrix)
/// parses a column group into floats, [`categorical_matrix`](Table::categorical_matrix) keeps
/// them as labels.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Create a table from named columns
    ///
    /// Fails if a column name is repeated or if the columns differ in length.
    pub fn new(names: Vec<String>, columns: Vec<Vec<Option<String>>>) -> Result<Table> {
        if names.len() != columns.len() {
            return Err(Error::Parameters(format!(
                "{} column names for {} columns",
                names.len(),
                columns.len()
            )));
        }

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            for (name, column) in names.iter().zip(columns.iter()) {
                if column.len() != expected {
                    return Err(Error::LengthMismatch {
                        column: name.clone(),
                        expected,
                        found: column.len(),
                    });
                }
            }
        }

        Ok(Table { names, columns })
    }

    /// Create a table from a header and a list of rows
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Table> {
        let mut columns = vec![Vec::with_capacity(rows.len()); names.len()];
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(Error::RaggedRow {
                    row: row_idx,
                    expected: names.len(),
                    found: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        Table::new(names, columns)
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.names.len()
    }

    /// Column names in header order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns `true` if a column with this name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Returns the cells of a single column
    pub fn column(&self, name: &str) -> Result<&[Option<String>]> {
        let idx = self.position(name)?;
        Ok(&self.columns[idx])
    }

    /// Returns a new table holding only the given columns, in the given order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let mut selected_names = Vec::with_capacity(names.len());
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            selected.push(self.column(name)?.to_vec());
            selected_names.push(name.to_string());
        }

        Table::new(selected_names, selected)
    }

    /// Removes a column and returns the remaining table together with the removed cells
    pub fn drop_column(mut self, name: &str) -> Result<(Table, Vec<Option<String>>)> {
        let idx = self.position(name)?;
        self.names.remove(idx);
        let column = self.columns.remove(idx);

        Ok((self, column))
    }

    /// Parses the given columns into a numeric matrix of shape `(nrows, names.len())`
    ///
    /// Missing cells become `NaN`. A cell which is present but is not a number fails with
    /// [`Error::NotNumeric`].
    pub fn numeric_matrix<F: Float, S: AsRef<str>>(&self, names: &[S]) -> Result<Array2<F>> {
        let mut matrix = Array2::zeros((self.nrows(), names.len()));
        for (col_idx, name) in names.iter().enumerate() {
            let name = name.as_ref();
            for (row_idx, cell) in self.column(name)?.iter().enumerate() {
                matrix[[row_idx, col_idx]] = match cell {
                    None => F::nan(),
                    Some(value) => parse_float(name, row_idx, value)?,
                };
            }
        }

        Ok(matrix)
    }

    /// Collects the given columns into a matrix of optional labels of shape `(nrows, names.len())`
    pub fn categorical_matrix<S: AsRef<str>>(&self, names: &[S]) -> Result<Array2<Option<String>>> {
        let mut matrix = Array2::from_elem((self.nrows(), names.len()), None);
        for (col_idx, name) in names.iter().enumerate() {
            for (row_idx, cell) in self.column(name.as_ref())?.iter().enumerate() {
                matrix[[row_idx, col_idx]] = cell.clone();
            }
        }

        Ok(matrix)
    }

    /// Separates the target column from the features
    ///
    /// The returned dataset holds every other column as its records, in their original order,
    /// and the parsed target values in row order. The target must be present and numeric in
    /// every row.
    pub fn split_target<F: Float>(self, target: &str) -> Result<DatasetBase<Table, Array1<F>>> {
        let (features, cells) = self.drop_column(target)?;
        let targets = cells
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Some(value) => parse_float(target, row, value),
                None => Err(Error::MissingTarget {
                    column: target.to_string(),
                    row,
                }),
            })
            .collect::<Result<Array1<F>>>()?;

        let names = features.column_names().to_vec();
        Ok(DatasetBase::new(features, targets).with_feature_names(names))
    }
}

fn parse_float<F: Float>(column: &str, row: usize, value: &str) -> Result<F> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .and_then(F::from_f64)
        .ok_or_else(|| Error::NotNumeric {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn cell(x: &str) -> Option<String> {
        Some(x.to_string())
    }

    fn sample() -> Table {
        Table::from_rows(
            vec!["score".into(), "gender".into(), "target".into()],
            vec![
                vec![cell("1.5"), cell("male"), cell("10")],
                vec![None, cell("female"), cell("20")],
                vec![cell("3"), None, cell("30")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn shape_and_names() {
        let table = sample();
        assert_eq!(table.nrows(), 3);
        assert_eq!(table.ncols(), 3);
        assert!(table.has_column("gender"));
        assert!(!table.has_column("lunch"));
    }

    #[test]
    fn numeric_matrix_marks_missing_as_nan() {
        let matrix: Array2<f64> = sample().numeric_matrix(&["score"]).unwrap();
        assert_abs_diff_eq!(matrix[[0, 0]], 1.5);
        assert!(matrix[[1, 0]].is_nan());
        assert_abs_diff_eq!(matrix[[2, 0]], 3.);
    }

    #[test]
    fn numeric_matrix_rejects_labels() {
        let err = sample().numeric_matrix::<f64, _>(&["gender"]).unwrap_err();
        assert!(matches!(err, Error::NotNumeric { row: 0, .. }));
    }

    #[test]
    fn categorical_matrix_keeps_labels() {
        let matrix = sample().categorical_matrix(&["gender"]).unwrap();
        assert_eq!(matrix, array![[cell("male")], [cell("female")], [None]]);
    }

    #[test]
    fn split_target_preserves_row_order() {
        let dataset = sample().split_target::<f64>("target").unwrap();
        assert_eq!(dataset.records().column_names(), &["score", "gender"]);
        assert_abs_diff_eq!(*dataset.targets(), array![10., 20., 30.]);
    }

    #[test]
    fn split_target_requires_the_column() {
        let err = sample().split_target::<f64>("math_score").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(name) if name == "math_score"));
    }

    #[test]
    fn split_target_rejects_missing_values() {
        let table = Table::from_rows(
            vec!["target".into()],
            vec![vec![cell("1")], vec![None]],
        )
        .unwrap();
        let err = table.split_target::<f64>("target").unwrap_err();
        assert!(matches!(err, Error::MissingTarget { row: 1, .. }));
    }

    #[test]
    fn duplicate_and_ragged_input_is_rejected() {
        let err = Table::new(vec!["a".into(), "a".into()], vec![vec![], vec![]]).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn(_)));

        let err = Table::from_rows(vec!["a".into(), "b".into()], vec![vec![cell("1")]])
            .unwrap_err();
        assert!(matches!(err, Error::RaggedRow { row: 0, expected: 2, found: 1 }));
    }

    #[test]
    fn select_reorders_columns() {
        let table = sample().select(&["target", "score"]).unwrap();
        assert_eq!(table.column_names(), &["target", "score"]);
        assert_eq!(table.column("target").unwrap()[2], cell("30"));
    }

    #[test]
    fn missing_markers() {
        assert!(is_missing_marker(""));
        assert!(is_missing_marker(" NA "));
        assert!(is_missing_marker("nan"));
        assert!(!is_missing_marker("none at all"));
    }
}
