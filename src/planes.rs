// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes the relationship
//! between the real plane the tree lives on and the integral plane of
//! the histogram, with an origin at 0,0.
//!
//! The mapping is a fixed one, calibrated to the tree:
//!
//! ```text
//! column = floor(width  * (x / 3.5 - 0.5))
//! row    = floor(height * (y / 7.5 + 0.05))
//! ```
//!
//! Taken literally, every point with x below 1.75 lands on a negative
//! column, which is all of the tree.  The mapping only makes sense
//! read the way array indices are read from the end: a column of -1
//! is the last column, -width is the first.  So an index `i` in
//! `[-len, 0)` resolves to `len + i`, and anything beyond `[-len, len)`
//! falls off the plane entirely.  In effect the x range [-1.75, 1.75)
//! covers the image from left to right, centered on x = 0.

use crate::affine::Point;
use crate::config::Viewport;
use crate::error::RenderError;

/// Width and height, in cells, of the histogram grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the column, row of a pixel in the histogram.  Row 0 is
/// the lowest y on the real plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps points on the real plane to pixels on the integral plane.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The grid points are mapped onto.
    pub integral_plane: IntegralPlane,
    viewport: Viewport,
}

impl PlaneMapper {
    /// Fails if either dimension is zero.
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            viewport,
        })
    }

    /// The signed column and row a point maps to, before any wrapping.
    pub fn raw_index(&self, point: &Point) -> (i64, i64) {
        let v = &self.viewport;
        let w = self.integral_plane.0 as f64;
        let h = self.integral_plane.1 as f64;
        let column = (w * (point.re / v.x_scale - v.x_offset)).floor();
        let row = (h * (point.im / v.y_scale + v.y_offset)).floor();
        (saturate(column), saturate(row))
    }

    /// Given a point on the real plane, find the histogram pixel it
    /// lands on, or `None` when it misses the plane.
    pub fn point_to_pixel(&self, point: &Point) -> Option<Pixel> {
        let (column, row) = self.raw_index(point);
        let column = resolve(column, self.integral_plane.0)?;
        let row = resolve(row, self.integral_plane.1)?;
        Some(Pixel(column, row))
    }
}

/// Float to integer, with NaN and anything huge pinned far outside any
/// plane so that `resolve` rejects it.
fn saturate(v: f64) -> i64 {
    if v.is_nan() {
        i64::min_value()
    } else {
        v as i64
    }
}

/// Resolves a possibly-negative index against an axis of length `len`.
pub fn resolve(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    if index >= 0 && index < len {
        Some(index as usize)
    } else if index < 0 && index >= -len {
        Some((len + index) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn mapper(w: usize, h: usize) -> PlaneMapper {
        PlaneMapper::new(w, h, Viewport::default()).unwrap()
    }

    #[test]
    fn planemapper_fails_on_empty_plane() {
        assert!(PlaneMapper::new(0, 4, Viewport::default()).is_err());
        assert!(PlaneMapper::new(4, 0, Viewport::default()).is_err());
    }

    #[test]
    fn resolve_wraps_negative_indices_once() {
        assert_eq!(resolve(0, 10), Some(0));
        assert_eq!(resolve(9, 10), Some(9));
        assert_eq!(resolve(10, 10), None);
        assert_eq!(resolve(-1, 10), Some(9));
        assert_eq!(resolve(-10, 10), Some(0));
        assert_eq!(resolve(-11, 10), None);
    }

    #[test]
    fn origin_lands_mid_width() {
        let pm = mapper(1280, 1920);
        // floor(1280 * -0.5) = -640 -> column 640; floor(1920 * 0.05) = 96
        assert_eq!(pm.raw_index(&Complex::new(0.0, 0.0)), (-640, 96));
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(640, 96)));
    }

    #[test]
    fn x_range_spans_the_image_left_to_right() {
        let pm = mapper(100, 100);
        assert_eq!(pm.point_to_pixel(&Complex::new(-1.75, 0.0)), Some(Pixel(0, 5)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-0.875, 0.0)), Some(Pixel(25, 5)));
        assert_eq!(pm.point_to_pixel(&Complex::new(1.7, 0.0)).map(|p| p.0), Some(98));
    }

    #[test]
    fn points_far_off_the_plane_are_dropped() {
        let pm = mapper(100, 100);
        assert_eq!(pm.point_to_pixel(&Complex::new(100.0, 0.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 100.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, -100.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(std::f64::NAN, 1.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(std::f64::INFINITY, 1.0)), None);
    }

    #[test]
    fn floor_not_truncation() {
        let pm = mapper(100, 100);
        // 100 * (-0.0035 / 3.5 - 0.5) = -50.1, floors to -51 -> column 49
        assert_eq!(pm.point_to_pixel(&Complex::new(-0.0035, 0.0)).map(|p| p.0), Some(49));
    }
}
