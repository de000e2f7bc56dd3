//! Datasets
//!
//! This module implements the dataset struct, the raw [`Table`] of tabular cells and various
//! helper traits to extend their functionality.
use ndarray::ScalarOperand;
use num_traits::{FromPrimitive, NumAssignOps, NumCast};

use std::fmt;
use std::iter::Sum;

mod impl_dataset;
mod impl_records;
mod table;

pub use table::{is_missing_marker, Table};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in the numeric matrices
/// produced by preprocessing and, for regression tasks, in the targets as well.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + NumAssignOps
    + ScalarOperand
    + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the
/// data and may contain targets and feature names. In order to keep the type complexity low the
/// dataset base is only generic over the records and targets and introduces a trait bound on
/// the records.
///
/// # Fields
///
/// * `records`: either a two-dimensional matrix with dimensionality (nsamples, nfeatures) or a
/// [`Table`] of raw cells with named columns
/// * `targets`: one value per sample, or `()` for unsupervised preprocessing
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
///
/// # Trait bounds
///
/// * `R: Records`: generic over feature matrices or tables
/// * `T`: generic over any target container
#[derive(Debug)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}
