//! Closed-form conversions between WGS 84, the Swiss CH1903+ grid, and the
//! Web Mercator tile plane.
//!
//! Angles are in radians throughout.  These formulas are the approximations
//! published by swisstopo; they are accurate to about a metre inside
//! Switzerland, which is all the planner needs.

use crate::geo::{PointCh, SwissBounds};
use crate::{math, CoreError, CoreResult};

pub mod ch1903 {
    //! WGS 84 ⇄ CH1903+ (LV95).

    fn auxiliary(lon: f64, lat: f64) -> (f64, f64) {
        let lambda = 1e-4 * (3600.0 * lon.to_degrees() - 26_782.5);
        let phi = 1e-4 * (3600.0 * lat.to_degrees() - 169_028.66);
        (lambda, phi)
    }

    /// East coordinate of the point at (`lon`, `lat`).
    pub fn e(lon: f64, lat: f64) -> f64 {
        let (l, p) = auxiliary(lon, lat);
        2_600_072.37 + 211_455.93 * l - 10_938.51 * l * p - 0.36 * l * p * p - 44.54 * l * l * l
    }

    /// North coordinate of the point at (`lon`, `lat`).
    pub fn n(lon: f64, lat: f64) -> f64 {
        let (l, p) = auxiliary(lon, lat);
        1_200_147.07 + 308_807.95 * p + 3_745.25 * l * l + 76.63 * p * p - 194.56 * l * l * p
            + 119.79 * p * p * p
    }

    pub fn lon(e: f64, n: f64) -> f64 {
        let x = 1e-6 * (e - 2_600_000.0);
        let y = 1e-6 * (n - 1_200_000.0);
        let lon0 = 2.677_909_4 + 4.728_982 * x + 0.791_484 * x * y + 0.130_6 * x * y * y
            - 0.043_6 * x * x * x;
        (lon0 * 100.0 / 36.0).to_radians()
    }

    pub fn lat(e: f64, n: f64) -> f64 {
        let x = 1e-6 * (e - 2_600_000.0);
        let y = 1e-6 * (n - 1_200_000.0);
        let lat0 = 16.902_389_2 + 3.238_272 * y - 0.270_978 * x * x - 0.002_528 * y * y
            - 0.044_7 * x * x * y
            - 0.014_0 * y * y * y;
        (lat0 * 100.0 / 36.0).to_radians()
    }
}

pub mod web_mercator {
    //! WGS 84 ⇄ Web Mercator, with the whole world mapped onto `[0, 1]²`.

    use std::f64::consts::PI;

    use crate::math;

    pub fn x(lon: f64) -> f64 {
        (lon + PI) / (2.0 * PI)
    }

    pub fn y(lat: f64) -> f64 {
        (PI - math::asinh(lat.tan())) / (2.0 * PI)
    }

    pub fn lon(x: f64) -> f64 {
        2.0 * PI * x - PI
    }

    pub fn lat(y: f64) -> f64 {
        (PI - 2.0 * PI * y).sinh().atan()
    }
}

/// Zoom level 0 corresponds to a single 256-pixel tile.
const BASE_ZOOM: i32 = 8;

/// A point of the Web Mercator plane, normalised to `[0, 1]²`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointWebMercator {
    x: f64,
    y: f64,
}

impl PointWebMercator {
    /// # Errors
    ///
    /// [`CoreError::OutsideUnitSquare`] unless both coordinates are in `[0, 1]`.
    pub fn new(x: f64, y: f64) -> CoreResult<Self> {
        if (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y) {
            Ok(Self { x, y })
        } else {
            Err(CoreError::OutsideUnitSquare { x, y })
        }
    }

    /// The point at pixel coordinates (`x`, `y`) of zoom level `zoom`.
    pub fn of(zoom: i32, x: f64, y: f64) -> CoreResult<Self> {
        let scale = 2f64.powi(-(BASE_ZOOM + zoom));
        Self::new(x * scale, y * scale)
    }

    pub fn of_point_ch(point: PointCh) -> Self {
        let x = math::clamp(0.0, web_mercator::x(point.lon()), 1.0);
        let y = math::clamp(0.0, web_mercator::y(point.lat()), 1.0);
        Self { x, y }
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.y
    }

    pub fn x_at_zoom_level(self, zoom: i32) -> f64 {
        self.x * 2f64.powi(BASE_ZOOM + zoom)
    }

    pub fn y_at_zoom_level(self, zoom: i32) -> f64 {
        self.y * 2f64.powi(BASE_ZOOM + zoom)
    }

    pub fn lon(self) -> f64 {
        web_mercator::lon(self.x)
    }

    pub fn lat(self) -> f64 {
        web_mercator::lat(self.y)
    }

    /// The Swiss point at the same location, or `None` outside Switzerland.
    pub fn to_point_ch(self) -> Option<PointCh> {
        let (lon, lat) = (self.lon(), self.lat());
        let (e, n) = (ch1903::e(lon, lat), ch1903::n(lon, lat));
        SwissBounds::contains_en(e, n).then(|| PointCh::new(e, n))
    }
}
