//! Column routing
//!
//! A column transformer owns one step per column group. The numeric group is parsed into a
//! float matrix, the categorical group is kept as raw labels, each group is fitted and
//! transformed by its own step and the results are concatenated column-wise, numeric group
//! first. Columns that belong to neither group are dropped.

use std::collections::HashSet;
use std::marker::PhantomData;

use mlpipe::dataset::{DatasetBase, Table};
use mlpipe::traits::Fit;
use mlpipe::ParamGuard;
use ndarray::{concatenate, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};
use crate::{FeatureNamesOut, Float, Transform};

/// A named list of columns bound to the step which processes them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnGroup<S> {
    name: String,
    columns: Vec<String>,
    step: S,
}

impl<S> ColumnGroup<S> {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, columns: Vec<C>, step: S) -> Self {
        ColumnGroup {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            step,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn step(&self) -> &S {
        &self.step
    }

    fn check(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(PreprocessingError::EmptyColumnGroup(self.name.clone()));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.as_str()) {
                return Err(PreprocessingError::DuplicateColumn {
                    group: self.name.clone(),
                    column: column.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Validated hyperparameters of a column transformer
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnTransformerValidParams<F, N, C> {
    numeric: ColumnGroup<N>,
    categorical: ColumnGroup<C>,
    phantom: PhantomData<F>,
}

impl<F, N, C> ColumnTransformerValidParams<F, N, C> {
    pub fn numeric(&self) -> &ColumnGroup<N> {
        &self.numeric
    }

    pub fn categorical(&self) -> &ColumnGroup<C> {
        &self.categorical
    }
}

/// Hyperparameters of a column transformer
///
/// Holds an unfitted numeric and categorical group. The groups are checked when the
/// parameters are validated: both must list at least one column, no column may be listed
/// twice and no column may be routed to both groups.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnTransformerParams<F, N, C>(ColumnTransformerValidParams<F, N, C>);

impl<F, N, C> ColumnTransformerParams<F, N, C> {
    pub fn new(numeric: ColumnGroup<N>, categorical: ColumnGroup<C>) -> Self {
        Self(ColumnTransformerValidParams {
            numeric,
            categorical,
            phantom: PhantomData,
        })
    }
}

impl<F, N, C> ParamGuard for ColumnTransformerParams<F, N, C> {
    type Checked = ColumnTransformerValidParams<F, N, C>;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        self.0.numeric.check()?;
        self.0.categorical.check()?;

        let numeric = self.0.numeric.columns().iter().collect::<HashSet<_>>();
        if let Some(column) = self
            .0
            .categorical
            .columns()
            .iter()
            .find(|column| numeric.contains(column))
        {
            return Err(PreprocessingError::OverlappingColumns(column.clone()));
        }

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F, T, N, C> Fit<Table, T, PreprocessingError> for ColumnTransformerValidParams<F, N, C>
where
    F: Float,
    N: Fit<Array2<F>, (), PreprocessingError>,
    C: Fit<Array2<Option<String>>, (), PreprocessingError>,
{
    type Object = ColumnTransformer<F, N::Object, C::Object>;

    fn fit(&self, dataset: &DatasetBase<Table, T>) -> Result<Self::Object> {
        let records = dataset.records();
        tracing::debug!(
            "fitting column transformer on {} rows, {} columns",
            records.nrows(),
            records.ncols()
        );

        let numeric = records.numeric_matrix::<F, _>(self.numeric.columns())?;
        let numeric_step = self.numeric.step().fit(&DatasetBase::new(numeric, ()))?;
        tracing::debug!("fitted `{}` on {:?}", self.numeric.name(), self.numeric.columns());

        let categorical = records.categorical_matrix(self.categorical.columns())?;
        let categorical_step = self
            .categorical
            .step()
            .fit(&DatasetBase::new(categorical, ()))?;
        tracing::debug!(
            "fitted `{}` on {:?}",
            self.categorical.name(),
            self.categorical.columns()
        );

        Ok(ColumnTransformer {
            numeric: ColumnGroup::new(
                self.numeric.name(),
                self.numeric.columns().to_vec(),
                numeric_step,
            ),
            categorical: ColumnGroup::new(
                self.categorical.name(),
                self.categorical.columns().to_vec(),
                categorical_step,
            ),
            phantom: PhantomData,
        })
    }
}

/// A fitted column transformer
///
/// Replays the fitted steps on any table which contains the routed columns, in whatever order
/// they appear. The output holds the numeric group's features followed by the categorical
/// group's features.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer<F, N, C> {
    numeric: ColumnGroup<N>,
    categorical: ColumnGroup<C>,
    #[serde(skip)]
    phantom: PhantomData<F>,
}

impl<F, N, C> ColumnTransformer<F, N, C> {
    pub fn numeric(&self) -> &ColumnGroup<N> {
        &self.numeric
    }

    pub fn categorical(&self) -> &ColumnGroup<C> {
        &self.categorical
    }
}

impl<F, N: FeatureNamesOut, C: FeatureNamesOut> ColumnTransformer<F, N, C> {
    /// Names of the output features, prefixed with the name of the group that produced them
    pub fn feature_names(&self) -> Vec<String> {
        let numeric = self
            .numeric
            .step()
            .feature_names_out(self.numeric.columns())
            .into_iter()
            .map(|name| format!("{}__{}", self.numeric.name(), name));
        let categorical = self
            .categorical
            .step()
            .feature_names_out(self.categorical.columns())
            .into_iter()
            .map(|name| format!("{}__{}", self.categorical.name(), name));

        numeric.chain(categorical).collect()
    }

    /// Number of output features
    pub fn n_features_out(&self) -> usize {
        self.feature_names().len()
    }
}

impl<F, N, C> Transform<Table> for ColumnTransformer<F, N, C>
where
    F: Float,
    N: Transform<Array2<F>, Output = Array2<F>>,
    C: Transform<Array2<Option<String>>, Output = Array2<F>>,
{
    type Output = Array2<F>;

    fn transform(&self, x: &Table) -> Result<Array2<F>> {
        let numeric = self
            .numeric
            .step()
            .transform(&x.numeric_matrix::<F, _>(self.numeric.columns())?)?;
        let categorical = self
            .categorical
            .step()
            .transform(&x.categorical_matrix(self.categorical.columns())?)?;

        for block in [&numeric, &categorical].iter() {
            if block.nrows() != x.nrows() {
                return Err(PreprocessingError::RowMismatch {
                    expected: x.nrows(),
                    found: block.nrows(),
                });
            }
        }

        let features = concatenate(Axis(1), &[numeric.view(), categorical.view()])
            .map_err(mlpipe::error::Error::from)?;
        tracing::debug!("transformed table into {:?} features", features.dim());

        Ok(features)
    }
}
