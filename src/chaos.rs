// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chaos game.
//!
//! Two points wander the plane, one for each half of the tree.  Every
//! step draws an outcome from the transform weights and moves both
//! points by it, plotting wherever they land.  Most of the time both
//! points take the same transform.  When the outcome is a split, the
//! right point is first snapped onto the left one, and then the left
//! point goes down the left branch and the right point down the right
//! branch; that is how the two halves of the tree stay symmetric
//! without ever being forced to be.
//!
//! Each step depends on where the previous one left the points, so a
//! single chain cannot be split across threads.  What can be done is
//! to run several independent chains, each into its own histogram,
//! and sum the histograms once they have all finished.

use crossbeam::thread::ScopedJoinHandle;
use log::{debug, info, warn};
use num::Complex;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::affine::{Point, TransformTable, LEFT_BRANCH, RIGHT_BRANCH};
use crate::config::TreeConfig;
use crate::error::RenderError;
use crate::histogram::Histogram;
use crate::planes::PlaneMapper;
use crate::weights::Choice;

/// The running state of one chain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackedPoints {
    /// The left half of the tree.
    pub left: Point,
    /// The right half.  Overwritten by `left` on every split, never the
    /// other way around.
    pub right: Point,
}

impl TrackedPoints {
    /// Both points at the origin.
    pub fn new() -> Self {
        TrackedPoints {
            left: Complex::new(0.0, 0.0),
            right: Complex::new(0.0, 0.0),
        }
    }

    /// Moves both points by one outcome.
    #[inline]
    pub fn step(&mut self, choice: Choice, transforms: &TransformTable) {
        match choice.shared_transform() {
            Some(i) => {
                let t = transforms.get(i);
                self.left = t.apply(self.left);
                self.right = t.apply(self.right);
            }
            None => {
                self.right = self.left;
                self.left = transforms.get(LEFT_BRANCH).apply(self.left);
                self.right = transforms.get(RIGHT_BRANCH).apply(self.right);
            }
        }
    }
}

impl Default for TrackedPoints {
    fn default() -> Self {
        TrackedPoints::new()
    }
}

/// The sampler, bound to one configuration.  Once built it is never
/// mutated, so any number of chains may share it.
#[derive(Debug)]
pub struct ChaosGame<'a> {
    config: &'a TreeConfig,
    plane: PlaneMapper,
}

impl<'a> ChaosGame<'a> {
    /// Validates the configuration up front.
    pub fn new(config: &'a TreeConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let plane = PlaneMapper::new(config.width, config.height, config.viewport)?;
        Ok(ChaosGame { config, plane })
    }

    fn plot(&self, point: &Point, histogram: &mut Histogram) {
        match self.plane.point_to_pixel(point) {
            Some(pixel) => histogram.accumulate(pixel, &self.config.channel_weights),
            None => histogram.drop_write(),
        }
    }

    /// Runs one chain of `iterations` steps from the origin, plotting
    /// both points after every step.
    pub fn run_chain<R: Rng + ?Sized>(&self, iterations: usize, rng: &mut R, histogram: &mut Histogram) {
        let mut points = TrackedPoints::new();
        for _ in 0..iterations {
            let choice = self.config.weights.sample(rng);
            points.step(choice, &self.config.transforms);
            self.plot(&points.left, histogram);
            self.plot(&points.right, histogram);
        }
    }

    /// The whole iteration budget on one chain, on this thread.
    pub fn sample_single(&self, seed: u64) -> Histogram {
        let mut histogram = Histogram::new(self.config.width, self.config.height);
        let mut rng = StdRng::seed_from_u64(seed);
        info!("Sampling {} iterations on one chain", self.config.iterations());
        self.run_chain(self.config.iterations(), &mut rng, &mut histogram);
        report_dropped(&histogram);
        histogram
    }

    /// The iteration budget split over `threads` independent chains.
    /// Chain `i` is seeded with `seed + i`, so the result depends only
    /// on the seed and the thread count.
    pub fn sample(&self, seed: u64, threads: usize) -> Result<Histogram, RenderError> {
        if threads == 0 {
            return Err(RenderError::NoWorkers);
        }
        if threads == 1 {
            return Ok(self.sample_single(seed));
        }

        let budgets = split_budget(self.config.iterations(), threads);
        info!(
            "Sampling {} iterations on {} chains",
            self.config.iterations(),
            threads
        );

        let (width, height) = (self.config.width, self.config.height);
        let parts: Vec<Histogram> = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Histogram>> = budgets
                .iter()
                .enumerate()
                .map(|(i, &iterations)| {
                    spawner.spawn(move |_| {
                        let chain_seed = seed.wrapping_add(i as u64);
                        debug!("Chain {} seeded {}: {} iterations", i, chain_seed, iterations);
                        let mut rng = StdRng::seed_from_u64(chain_seed);
                        let mut histogram = Histogram::new(width, height);
                        self.run_chain(iterations, &mut rng, &mut histogram);
                        histogram
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Result<Vec<Histogram>, _>>()
        })
        .map_err(|_| RenderError::WorkerPanicked)?
        .map_err(|_| RenderError::WorkerPanicked)?;

        let histogram = Histogram::merge(&parts)?;
        report_dropped(&histogram);
        Ok(histogram)
    }
}

/// Shares `total` out as evenly as possible; the first chains take the
/// remainder.
pub fn split_budget(total: usize, chains: usize) -> Vec<usize> {
    let (each, extra) = (total / chains, total % chains);
    (0..chains)
        .map(|i| if i < extra { each + 1 } else { each })
        .collect()
}

fn report_dropped(histogram: &Histogram) {
    if histogram.dropped() > 0 {
        warn!("{} writes fell outside the image", histogram.dropped());
    }
}
