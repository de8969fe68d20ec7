//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced by `velo-core` constructors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("point ({e}, {n}) lies outside the Swiss bounds")]
    OutOfBounds { e: f64, n: f64 },

    #[error("web mercator coordinate ({x}, {y}) is outside the unit square")]
    OutsideUnitSquare { x: f64, y: f64 },

    #[error("sampled function needs at least 2 samples and a positive domain (got {samples} samples over {x_max})")]
    InvalidSampling { samples: usize, x_max: f64 },
}

/// Shorthand result type for `velo-core`.
pub type CoreResult<T> = Result<T, CoreError>;
