// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning hit counts into a picture.
//!
//! The counts span several orders of magnitude, from the single stray
//! hits at the tips of the branches to the tens of millions piled up
//! in the trunk.  A linear scale would show only the trunk, so every
//! count is normalized against the largest one and passed through a
//! square root before being scaled to a byte.  After that, a band at
//! the bottom and the top is cleared (the sampler leaves junk there),
//! the picture is flipped so that y points up, and the star goes on.

use itertools::iproduct;
use log::debug;
use num::clamp;

use crate::config::{Marker, Masking, TreeConfig};
use crate::error::RenderError;
use crate::histogram::{Histogram, CHANNELS};

/// An 8-bit RGB image, row-major, channels interleaved.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RenderedImage {
    /// An all-black image.
    pub fn new(width: usize, height: usize) -> Self {
        RenderedImage {
            width,
            height,
            pixels: vec![0 as u8; width * height * CHANNELS],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw bytes, ready for an encoder.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The colour at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        let offset = (y * self.width + x) * CHANNELS;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: [u8; CHANNELS]) {
        let offset = (y * self.width + x) * CHANNELS;
        self.pixels[offset..offset + CHANNELS].copy_from_slice(&color);
    }

    /// One row of bytes.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * CHANNELS;
        &self.pixels[y * stride..(y + 1) * stride]
    }
}

/// `round(255 * sqrt(count / max))` for every channel of every cell.
/// Fails if nothing was ever plotted.
pub fn tone_map(histogram: &Histogram) -> Result<RenderedImage, RenderError> {
    let max = histogram.max_count();
    if max == 0 {
        return Err(RenderError::EmptyHistogram);
    }
    debug!("Tone mapping against a maximum count of {}", max);

    let max = f64::from(max);
    let pixels = histogram
        .counts()
        .iter()
        .map(|c| clamp((255.0 * (f64::from(*c) / max).sqrt()).round(), 0.0, 255.0) as u8)
        .collect();
    Ok(RenderedImage {
        width: histogram.width(),
        height: histogram.height(),
        pixels,
    })
}

/// Blanks the two bands described by `masking`.  Rows are in
/// histogram order, so this must run before the flip.
pub fn mask_bands(image: &mut RenderedImage, masking: &Masking) {
    let stride = image.width * CHANNELS;
    let (low, high) = masking.bands(image.height);
    for range in &[low, high] {
        for byte in &mut image.pixels[range.start * stride..range.end * stride] {
            *byte = 0;
        }
    }
}

/// Reverses the row order.
pub fn flip_vertical(image: &mut RenderedImage) {
    let stride = image.width * CHANNELS;
    if stride == 0 {
        return;
    }
    image.pixels = image
        .pixels
        .chunks(stride)
        .rev()
        .flat_map(|row| row.iter().cloned())
        .collect();
}

/// Paints a filled disk, clipped to the image.  Only the part of the
/// disk's bounding box that lies inside the image is visited.
pub fn draw_marker(image: &mut RenderedImage, marker: &Marker) {
    if image.width == 0 || image.height == 0 {
        return;
    }
    let (cx, cy) = marker.center(image.width, image.height);
    let (cx, cy, r) = (cx as i64, cy as i64, marker.radius as i64);
    let columns = (cx - r).max(0)..=(cx + r).min(image.width as i64 - 1);
    let rows = (cy - r).max(0)..=(cy + r).min(image.height as i64 - 1);
    for (y, x) in iproduct!(rows, columns) {
        let (dx, dy) = (x - cx, y - cy);
        if dx * dx + dy * dy <= r * r {
            image.put_pixel(x as usize, y as usize, marker.color);
        }
    }
}

/// The whole post-processing pass: tone map, mask, flip, star.
pub fn finish(histogram: &Histogram, config: &TreeConfig) -> Result<RenderedImage, RenderError> {
    config.validate()?;
    let mut image = tone_map(histogram)?;
    mask_bands(&mut image, &config.masking);
    flip_vertical(&mut image);
    draw_marker(&mut image, &config.marker);
    Ok(image)
}
