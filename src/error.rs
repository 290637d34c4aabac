// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Every way a render can fail.  There is no recovery anywhere in the
//! pipeline: any one of these aborts the whole render.

use failure::Fail;
use std::io;

/// The single error type of the renderer.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The categorical weights are not a probability distribution.
    #[fail(display = "Transform weights must be non-negative and sum to 1.0 (got {})", sum)]
    InvalidWeights {
        /// What the weights actually summed to.
        sum: f64,
    },

    /// An image with no pixels cannot be rendered.
    #[fail(display = "Image size must be non-zero (got {}x{})", width, height)]
    InvalidSize {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// At this size the densest cell could overflow a 32-bit counter.
    #[fail(display = "A {}x{} render could overflow the histogram counters", width, height)]
    CounterOverflow {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// A band divisor of zero.
    #[fail(display = "Masking divisors must be non-zero (got {} and {})", low, high)]
    InvalidMasking {
        /// Divisor of the low-y band.
        low: usize,
        /// Divisor of the high-y band.
        high: usize,
    },

    /// A marker too large to draw.
    #[fail(display = "Marker radius {} is too large", radius)]
    InvalidMarker {
        /// The requested radius.
        radius: usize,
    },

    /// Histograms of different sizes cannot be summed.
    #[fail(display = "Cannot merge a {:?} histogram into a {:?} one", found, expected)]
    MismatchedHistograms {
        /// Width and height of the first part.
        expected: (usize, usize),
        /// Width and height of the part that did not match.
        found: (usize, usize),
    },

    /// Asked to sample with no chains at all.
    #[fail(display = "At least one sampling thread is required")]
    NoWorkers,

    /// Tone mapping a histogram in which nothing was ever plotted.
    #[fail(display = "Histogram is empty; nothing to tone map")]
    EmptyHistogram,

    /// The operating system could not supply a random seed.
    #[fail(display = "Could not seed the random source: {}", _0)]
    Entropy(String),

    /// One of the parallel sampling chains died.
    #[fail(display = "A sampling thread panicked")]
    WorkerPanicked,

    /// Writing an image file failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}
