//! Error type shared by the loaders and the planner facade
//!
//! The numeric core (life events, projection, comparison, coverage, matching)
//! is total and never fails; errors only arise at the boundary where profiles
//! and catalogs enter the crate.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// No financial profile was supplied to an operation that needs one
    #[error("no financial profile supplied")]
    MissingProfile,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed profile json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown {field} `{value}`")]
    UnknownValue { field: &'static str, value: String },

    #[error("invalid number `{value}` for {field}")]
    InvalidNumber { field: String, value: String },

    /// The baseline scenario must leave the profile unchanged
    #[error("scenario `{id}` is the baseline but adjusts the profile")]
    BaselineWithDelta { id: String },
}

impl PlannerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlannerError::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PlannerError::Csv { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
