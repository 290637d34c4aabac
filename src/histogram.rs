// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The three-channel hit counter the sampler plots into.

use crate::error::RenderError;
use crate::planes::Pixel;

/// Red, green, blue.
pub const CHANNELS: usize = 3;

/// A dense, row-major `height x width x 3` grid of hit counts, all
/// zero to start with.  Counts only ever go up.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    width: usize,
    height: usize,
    counts: Vec<u32>,
    dropped: u64,
}

impl Histogram {
    /// An empty histogram.
    pub fn new(width: usize, height: usize) -> Self {
        Histogram {
            width,
            height,
            counts: vec![0 as u32; width * height * CHANNELS],
            dropped: 0,
        }
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Adds `weights` to the cell at `pixel`.  A pixel outside the grid
    /// is not written; it is tallied in `dropped` instead.
    #[inline]
    pub fn accumulate(&mut self, pixel: Pixel, weights: &[u32; CHANNELS]) {
        let Pixel(x, y) = pixel;
        if x >= self.width || y >= self.height {
            self.dropped += 1;
            return;
        }
        let offset = (y * self.width + x) * CHANNELS;
        for (count, w) in self.counts[offset..offset + CHANNELS].iter_mut().zip(weights) {
            *count += w;
        }
    }

    /// Records a write that never found a cell.
    #[inline]
    pub fn drop_write(&mut self) {
        self.dropped += 1;
    }

    /// How many writes missed the grid.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// The counts of the cell at column `x`, row `y`.
    pub fn cell(&self, x: usize, y: usize) -> &[u32] {
        let offset = (y * self.width + x) * CHANNELS;
        &self.counts[offset..offset + CHANNELS]
    }

    /// Every count, row-major, channels interleaved.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The largest count over every cell and channel.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().cloned().max().unwrap_or(0)
    }

    /// Sums the counts from a collection of histograms, all of the
    /// size of the first.  The merge step of the parallel sampler.
    pub fn merge(parts: &[Histogram]) -> Result<Histogram, RenderError> {
        let first = parts.first().ok_or(RenderError::NoWorkers)?;
        let mut ret = Histogram::new(first.width, first.height);
        for part in parts {
            if (part.width, part.height) != (ret.width, ret.height) {
                return Err(RenderError::MismatchedHistograms {
                    expected: (ret.width, ret.height),
                    found: (part.width, part.height),
                });
            }
            for (total, count) in ret.counts.iter_mut().zip(&part.counts) {
                *total += count;
            }
            ret.dropped += part.dropped;
        }
        Ok(ret)
    }
}
