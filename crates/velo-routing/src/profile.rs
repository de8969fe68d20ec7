//! Elevation profiles of routes.

use std::sync::Arc;

use velo_core::{math, Function};

use crate::{Route, RoutingError, RoutingResult};

/// Altitude samples spaced uniformly over `[0, length]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationProfile {
    length:    f64,
    samples:   Arc<[f32]>,
    elevation: Function,
}

impl ElevationProfile {
    /// # Errors
    ///
    /// [`RoutingError::InvalidProfile`] if `length <= 0` or fewer than two
    /// samples are given.
    pub fn new(length: f64, samples: impl Into<Arc<[f32]>>) -> RoutingResult<Self> {
        let samples = samples.into();
        let elevation = Function::sampled(samples.clone(), length).map_err(|_| {
            RoutingError::InvalidProfile { length, samples: samples.len() }
        })?;
        Ok(Self { length, samples, elevation })
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn min_elevation(&self) -> f64 {
        self.samples.iter().fold(f64::INFINITY, |min, &s| min.min(s as f64))
    }

    pub fn max_elevation(&self) -> f64 {
        self.samples.iter().fold(f64::NEG_INFINITY, |max, &s| max.max(s as f64))
    }

    /// Sum of all positive differences between consecutive samples.
    pub fn total_ascent(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| (w[1] as f64 - w[0] as f64).max(0.0))
            .sum()
    }

    /// Sum of all negative differences between consecutive samples, as a
    /// positive number.
    pub fn total_descent(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| (w[0] as f64 - w[1] as f64).max(0.0))
            .sum()
    }

    /// Linear interpolation of the samples, clamped outside `[0, length]`.
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.elevation.apply(position)
    }
}

/// Upper bound on the number of sampling steps of one profile.
const MAX_STEPS: f64 = u32::MAX as f64;

/// Sample the altitude of `route` at most `max_step_length` metres apart.
///
/// Gaps in the altitude data are filled: leading and trailing gaps repeat
/// the nearest known sample, interior gaps are interpolated linearly.  A
/// route without any altitude data gets a flat profile at 0.
///
/// # Errors
///
/// [`RoutingError::InvalidStep`] if `max_step_length <= 0` or so small that
/// the route would need more than `u32::MAX` steps;
/// [`RoutingError::InvalidProfile`] if the route has zero length.
pub fn elevation_profile(route: &Route, max_step_length: f64) -> RoutingResult<ElevationProfile> {
    if !(max_step_length > 0.0) {
        return Err(RoutingError::InvalidStep(max_step_length));
    }
    let length = route.length();
    let steps = (length / max_step_length).ceil();
    if steps > MAX_STEPS {
        return Err(RoutingError::InvalidStep(max_step_length));
    }
    let count = (steps as usize).max(1) + 1;
    let step = length / (count - 1) as f64;

    let mut samples: Vec<f32> =
        (0..count).map(|i| route.elevation_at(i as f64 * step) as f32).collect();
    fill_gaps(&mut samples);
    ElevationProfile::new(length, samples)
}

fn fill_gaps(samples: &mut [f32]) {
    let Some(first) = samples.iter().position(|s| !s.is_nan()) else {
        samples.fill(0.0);
        return;
    };
    let last = samples.iter().rposition(|s| !s.is_nan()).unwrap_or(first);

    let (head, tail) = (samples[first], samples[last]);
    samples[..first].fill(head);
    samples[last + 1..].fill(tail);

    let mut i = first + 1;
    while i < last {
        if !samples[i].is_nan() {
            i += 1;
            continue;
        }
        // samples[i - 1] and samples[end] are known; everything between is NaN.
        let end = i + samples[i..].iter().position(|s| !s.is_nan()).unwrap_or(last - i);
        let (y0, y1) = (samples[i - 1] as f64, samples[end] as f64);
        let gap = (end - i + 1) as f64;
        for (k, sample) in samples[i..end].iter_mut().enumerate() {
            *sample = math::interpolate(y0, y1, (k + 1) as f64 / gap) as f32;
        }
        i = end + 1;
    }
}
