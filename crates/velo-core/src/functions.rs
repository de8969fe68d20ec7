//! One-dimensional functions of a position along an edge or a route.
//!
//! Altitude profiles are either unknown (`Constant(NaN)`) or a set of
//! samples spaced uniformly over `[0, x_max]`.  Samples are shared behind an
//! `Arc` so cloning a route edge never copies them.

use std::sync::Arc;

use crate::{math, CoreError, CoreResult};

#[derive(Clone, Debug, PartialEq)]
pub enum Function {
    /// `f(x) = y` everywhere.
    Constant(f64),
    /// Piecewise-linear interpolation of uniformly spaced samples.
    Sampled { samples: Arc<[f32]>, x_max: f64 },
}

impl Function {
    #[inline]
    pub fn constant(y: f64) -> Self {
        Function::Constant(y)
    }

    /// A function sampled uniformly over `[0, x_max]`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidSampling`] if fewer than two samples are given or
    /// `x_max` is not strictly positive.
    pub fn sampled(samples: impl Into<Arc<[f32]>>, x_max: f64) -> CoreResult<Self> {
        let samples = samples.into();
        if samples.len() < 2 || !(x_max > 0.0) {
            return Err(CoreError::InvalidSampling { samples: samples.len(), x_max });
        }
        Ok(Function::Sampled { samples, x_max })
    }

    /// Evaluate the function at `x`.
    ///
    /// A sampled function returns its first sample left of the domain and its
    /// last sample right of it.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Function::Constant(y) => *y,
            Function::Sampled { samples, x_max } => sample_at(samples, *x_max, x),
        }
    }
}

fn sample_at(samples: &[f32], x_max: f64, x: f64) -> f64 {
    let last = samples.len() - 1;
    if x <= 0.0 {
        return samples[0] as f64;
    }
    if x >= x_max {
        return samples[last] as f64;
    }
    let spacing = x_max / last as f64;
    let scaled = x / spacing;
    let lower = (scaled.floor() as usize).min(last - 1);
    math::interpolate(
        samples[lower] as f64,
        samples[lower + 1] as f64,
        scaled - lower as f64,
    )
}
