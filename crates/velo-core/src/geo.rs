//! Planar coordinates in the Swiss CH1903+ / LV95 grid.
//!
//! `PointCh` stores east (`e`) and north (`n`) coordinates in metres.  All
//! distances in the graph and on routes are plain Euclidean distances in
//! this plane.

use std::fmt;

use crate::projection::ch1903;
use crate::{CoreError, CoreResult};

/// The rectangle covering Switzerland in CH1903+ coordinates.  The graph's
/// sector grid is laid over this rectangle.
pub struct SwissBounds;

impl SwissBounds {
    pub const MIN_E: f64 = 2_485_000.0;
    pub const MAX_E: f64 = 2_834_000.0;
    pub const MIN_N: f64 = 1_075_000.0;
    pub const MAX_N: f64 = 1_296_000.0;
    pub const WIDTH: f64 = Self::MAX_E - Self::MIN_E;
    pub const HEIGHT: f64 = Self::MAX_N - Self::MIN_N;

    #[inline]
    pub fn contains_en(e: f64, n: f64) -> bool {
        (Self::MIN_E..=Self::MAX_E).contains(&e) && (Self::MIN_N..=Self::MAX_N).contains(&n)
    }
}

/// A point of the Swiss plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointCh {
    pub e: f64,
    pub n: f64,
}

impl PointCh {
    /// Build a point without bounds checking.  Graph decoders use this for
    /// coordinates read from trusted buffers.
    #[inline]
    pub fn new(e: f64, n: f64) -> Self {
        Self { e, n }
    }

    /// Build a point from untrusted input, rejecting coordinates outside
    /// [`SwissBounds`].
    pub fn checked(e: f64, n: f64) -> CoreResult<Self> {
        if SwissBounds::contains_en(e, n) {
            Ok(Self { e, n })
        } else {
            Err(CoreError::OutOfBounds { e, n })
        }
    }

    #[inline]
    pub fn squared_distance_to(self, that: PointCh) -> f64 {
        let de = that.e - self.e;
        let dn = that.n - self.n;
        de * de + dn * dn
    }

    #[inline]
    pub fn distance_to(self, that: PointCh) -> f64 {
        self.squared_distance_to(that).sqrt()
    }

    /// WGS 84 longitude in radians.
    pub fn lon(self) -> f64 {
        ch1903::lon(self.e, self.n)
    }

    /// WGS 84 latitude in radians.
    pub fn lat(self) -> f64 {
        ch1903::lat(self.e, self.n)
    }
}

impl fmt::Display for PointCh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(E {:.2}, N {:.2})", self.e, self.n)
    }
}
