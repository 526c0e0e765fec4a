//! In-memory expression dataset.
//!
//! The [`ExpressionStore`] holds a dense samples × genes matrix together with
//! each sample's identifier and disease status. It is populated once, either
//! programmatically or from a delimited text file, and is read-only afterwards.

mod store;

pub use store::{ExpressionStore, Series};

use std::fmt;

/// Disease status of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Normal,
    Case,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Normal => write!(f, "NORMAL"),
            Status::Case => write!(f, "CASE"),
        }
    }
}

/// One measurement of one gene in one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRecord<'a> {
    pub sample_id: &'a str,
    pub status: Status,
    pub value: f64,
}
