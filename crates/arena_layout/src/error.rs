//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid settings, layouts that could not be generated within the configured budget,
//! and cancellation.
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no layout with min_dist {min_dist} found after {attempts} attempts")]
    Infeasible { attempts: usize, min_dist: f64 },

    #[error("layout generation timed out after {attempts} attempts ({elapsed:?})")]
    Timeout { attempts: usize, elapsed: Duration },

    #[error("layout generation cancelled after {attempts} attempts")]
    Cancelled { attempts: usize },
}

impl Error {
    /// Number of sampling attempts made before the generator gave up, if any.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            Error::Infeasible { attempts, .. }
            | Error::Timeout { attempts, .. }
            | Error::Cancelled { attempts } => Some(*attempts),
            Error::InvalidConfig(_) => None,
        }
    }
}
