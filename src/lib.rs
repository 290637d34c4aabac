#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Barnsley tree renderer
//!
//! The tree is the attractor of an Iterated Function System: five
//! affine maps, each of which shrinks the plane and puts the result
//! somewhere.  Start with any point, keep applying maps chosen at
//! random (with fixed probabilities), and the point soon settles onto
//! the one shape that all five maps together reproduce exactly.  That
//! is the "chaos game."
//!
//! By mapping every point the game visits to the nearest integral
//! pixel and incrementing that pixel, we get a histogram of where the
//! game spends its time.  The histogram is normalized against its
//! busiest cell, square-rooted so the faint branch tips still show,
//! cropped, flipped so y points up, and decorated with a star.
//!
//! The pipeline is: `affine` (the maps) feeds `chaos` (the sampler),
//! which fills a `histogram`, which `tonemap` turns into an image that
//! `sink` writes to disk.

pub mod affine;
pub mod chaos;
pub mod config;
pub mod error;
pub mod histogram;
pub mod planes;
pub mod sink;
pub mod tonemap;
pub mod weights;

pub use chaos::ChaosGame;
pub use config::TreeConfig;
pub use error::RenderError;
pub use histogram::Histogram;
pub use tonemap::RenderedImage;

use log::info;
use rand::rngs::OsRng;
use rand::RngCore;

/// Draws a seed from the operating system.  Any failure here stops the
/// render before a single sample is taken.
pub fn entropy_seed() -> Result<u64, RenderError> {
    let mut bytes = [0u8; 8];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RenderError::Entropy(e.to_string()))?;
    Ok(u64::from_le_bytes(bytes))
}

/// Samples and post-processes a tree, leaving the raw histogram
/// alongside the finished image.
pub fn render_histogram(
    config: &TreeConfig,
    seed: u64,
    threads: usize,
) -> Result<(Histogram, RenderedImage), RenderError> {
    let game = ChaosGame::new(config)?;
    let histogram = game.sample(seed, threads)?;
    info!(
        "Sampling done; busiest cell holds {} hits",
        histogram.max_count()
    );
    let image = tonemap::finish(&histogram, config)?;
    Ok((histogram, image))
}

/// The main entry point: one finished tree for a configuration and
/// a seed.
pub fn render(config: &TreeConfig, seed: u64, threads: usize) -> Result<RenderedImage, RenderError> {
    render_histogram(config, seed, threads).map(|(_, image)| image)
}
