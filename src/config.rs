// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Every knob of the render in one place.
//!
//! Nothing here is meant to be tuned at run time; the values are the
//! ones the tree was calibrated against.  The only thing the command
//! line is allowed to change is the image size, via `with_size`.

use crate::affine::TransformTable;
use crate::error::RenderError;
use crate::histogram::CHANNELS;
use crate::weights::TransformWeights;

/// The reference image width.
pub const WIDTH: usize = 1280;
/// The reference image height.
pub const HEIGHT: usize = 1920;

/// The constants of the real-to-pixel mapping; see `planes`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// x is divided by this...
    pub x_scale: f64,
    /// ...and then this is subtracted.
    pub x_offset: f64,
    /// y is divided by this...
    pub y_scale: f64,
    /// ...and then this is added.
    pub y_offset: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x_scale: 3.5,
            x_offset: 0.5,
            y_scale: 7.5,
            y_offset: 0.05,
        }
    }
}

/// Which rows get blanked after tone mapping, as divisors of the
/// height.  Rows are counted in histogram order, where row 0 is the
/// lowest y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Masking {
    /// `height / low_divisor` rows are cleared from row 0 upward.
    pub low_divisor: usize,
    /// `height / high_divisor` rows are cleared from the last row down.
    pub high_divisor: usize,
}

impl Masking {
    /// The half-open row ranges to clear for a given height.
    pub fn bands(&self, height: usize) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let low = (height / self.low_divisor).min(height);
        let high = (height / self.high_divisor).min(height);
        (0..low, height - high..height)
    }
}

impl Default for Masking {
    fn default() -> Self {
        Masking {
            low_divisor: 17,
            high_divisor: 10,
        }
    }
}

/// The star on top of the tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Marker {
    /// Center row, as a fraction of the height, counted from the top
    /// of the finished image.
    pub row_fraction: f64,
    /// Center column, as a fraction of the width.
    pub column_fraction: f64,
    /// Disk radius in pixels.
    pub radius: usize,
    /// Fill colour.
    pub color: [u8; CHANNELS],
}

impl Marker {
    /// Center of the marker as (column, row) for an image of this size.
    pub fn center(&self, width: usize, height: usize) -> (usize, usize) {
        (
            (width as f64 * self.column_fraction) as usize,
            (height as f64 * self.row_fraction) as usize,
        )
    }
}

impl Default for Marker {
    fn default() -> Self {
        Marker {
            row_fraction: 0.135,
            column_fraction: 0.634,
            radius: 8,
            color: [255, 255, 0],
        }
    }
}

/// The whole render, start to finish.
#[derive(Clone, Debug)]
pub struct TreeConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Chaos game steps per pixel; the total is `width * height` times this.
    pub iterations_per_pixel: usize,
    /// The five transforms.
    pub transforms: TransformTable,
    /// How often each outcome is drawn.
    pub weights: TransformWeights,
    /// Real plane to pixel mapping.
    pub viewport: Viewport,
    /// Added to a cell on every hit.  Green runs eight times faster,
    /// which is what makes the tree yellow-green.
    pub channel_weights: [u32; CHANNELS],
    /// Bands cleared after tone mapping.
    pub masking: Masking,
    /// The star.
    pub marker: Marker,
}

impl TreeConfig {
    /// The reference configuration at a different size.
    pub fn with_size(width: usize, height: usize) -> Self {
        TreeConfig {
            width,
            height,
            ..TreeConfig::default()
        }
    }

    /// Total chaos game steps.
    pub fn iterations(&self) -> usize {
        self.width * self.height * self.iterations_per_pixel
    }

    /// Checks that the configuration can be rendered at all: a
    /// non-empty image, a real distribution, bands and a marker that
    /// can be drawn, and counters that cannot overflow even if every
    /// single hit lands in one cell.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        TransformWeights::new(*self.weights.weights())?;

        if self.masking.low_divisor == 0 || self.masking.high_divisor == 0 {
            return Err(RenderError::InvalidMasking {
                low: self.masking.low_divisor,
                high: self.masking.high_divisor,
            });
        }

        // draw_marker sums two squared offsets in i64.
        let radius = self.marker.radius as u64;
        match radius.checked_mul(radius).and_then(|r2| r2.checked_mul(2)) {
            Some(n) if n <= i64::max_value() as u64 => (),
            _ => {
                return Err(RenderError::InvalidMarker {
                    radius: self.marker.radius,
                })
            }
        }

        let heaviest = u64::from(self.channel_weights.iter().cloned().max().unwrap_or(0));
        let worst = (self.width as u64)
            .checked_mul(self.height as u64)
            .and_then(|n| n.checked_mul(self.iterations_per_pixel as u64))
            .and_then(|n| n.checked_mul(2))
            .and_then(|n| n.checked_mul(heaviest));
        match worst {
            Some(n) if n <= u64::from(u32::max_value()) => Ok(()),
            _ => Err(RenderError::CounterOverflow {
                width: self.width,
                height: self.height,
            }),
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            width: WIDTH,
            height: HEIGHT,
            iterations_per_pixel: 10,
            transforms: TransformTable::barnsley_tree(),
            weights: TransformWeights::barnsley_tree(),
            viewport: Viewport::default(),
            channel_weights: [1, 8, 1],
            masking: Masking::default(),
            marker: Marker::default(),
        }
    }
}
