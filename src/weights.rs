// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Picking which transform to apply next.
//!
//! The chaos game does not choose among all five transforms.  It
//! chooses among four outcomes, the last of which ("split") means
//! "apply the left branch to one tracked point and the right branch to
//! the other."  The choice is an inverse-CDF lookup: draw a uniform
//! number in [0, 1) and take the first outcome whose cumulative
//! threshold lies above it.

use crate::error::RenderError;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Number of outcomes the sampler chooses between.
pub const OUTCOMES: usize = 4;

const TOLERANCE: f64 = 1e-9;

/// One draw of the categorical sampler.  The first three apply one
/// transform to both tracked points; the branch transforms are only
/// reachable through `Split`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Transform 0 on both points.
    TrunkA,
    /// Transform 1 on both points.
    TrunkB,
    /// Transform 2 on both points.
    SelfCopy,
    /// Mirror the left point onto the right, then send them down the
    /// left and right branch transforms respectively.
    Split,
}

impl Choice {
    /// The outcome as an index in `0..OUTCOMES`.
    pub fn index(self) -> usize {
        match self {
            Choice::TrunkA => 0,
            Choice::TrunkB => 1,
            Choice::SelfCopy => 2,
            Choice::Split => 3,
        }
    }

    /// The transform both points share, or `None` for a split.
    pub fn shared_transform(self) -> Option<usize> {
        match self {
            Choice::Split => None,
            other => Some(other.index()),
        }
    }

    fn from_index(i: usize) -> Self {
        match i {
            0 => Choice::TrunkA,
            1 => Choice::TrunkB,
            2 => Choice::SelfCopy,
            _ => Choice::Split,
        }
    }
}

/// A probability distribution over the four outcomes, stored both as
/// the weights and as their running sum.
#[derive(Clone, Debug)]
pub struct TransformWeights {
    weights: [f64; OUTCOMES],
    thresholds: [f64; OUTCOMES],
    unit: Uniform<f64>,
}

impl TransformWeights {
    /// Fails unless every weight is finite and non-negative and they
    /// sum to one.
    pub fn new(weights: [f64; OUTCOMES]) -> Result<Self, RenderError> {
        let sum: f64 = weights.iter().sum();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || (sum - 1.0).abs() > TOLERANCE {
            return Err(RenderError::InvalidWeights { sum });
        }

        let mut thresholds = [0.0_f64; OUTCOMES];
        let mut running = 0.0;
        for (threshold, weight) in thresholds.iter_mut().zip(weights.iter()) {
            running += weight;
            *threshold = running;
        }
        // Any rounding in the sum must not leave a gap at the top.
        thresholds[OUTCOMES - 1] = 1.0;

        Ok(TransformWeights {
            weights,
            thresholds,
            unit: Uniform::new(0.0, 1.0),
        })
    }

    /// Trunk, trunk, copy, split: 2%, 2%, 76%, 20%.
    pub fn barnsley_tree() -> Self {
        TransformWeights {
            weights: [0.02, 0.02, 0.76, 0.20],
            thresholds: [0.02, 0.04, 0.80, 1.0],
            unit: Uniform::new(0.0, 1.0),
        }
    }

    /// The configured weights.
    pub fn weights(&self) -> &[f64; OUTCOMES] {
        &self.weights
    }

    /// The cumulative thresholds; the last is always exactly 1.0.
    pub fn thresholds(&self) -> &[f64; OUTCOMES] {
        &self.thresholds
    }

    /// Maps a value in [0, 1) to an outcome.
    pub fn choose(&self, u: f64) -> Choice {
        let index = self
            .thresholds
            .iter()
            .position(|t| u < *t)
            .unwrap_or(OUTCOMES - 1);
        Choice::from_index(index)
    }
}

impl Default for TransformWeights {
    fn default() -> Self {
        TransformWeights::barnsley_tree()
    }
}

impl Distribution<Choice> for TransformWeights {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        self.choose(self.unit.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use crate::affine::Role;
    use rand::SeedableRng;

    #[test]
    fn rejects_weights_not_summing_to_one() {
        assert!(TransformWeights::new([0.25, 0.25, 0.25, 0.2]).is_err());
        assert!(TransformWeights::new([0.5, 0.5, 0.5, -0.5]).is_err());
        assert!(TransformWeights::new([std::f64::NAN, 0.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn reference_thresholds_match_constructed_ones() {
        let built = TransformWeights::new([0.02, 0.02, 0.76, 0.20]).unwrap();
        let reference = TransformWeights::barnsley_tree();
        for (a, b) in built.thresholds().iter().zip(reference.thresholds()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn choose_respects_threshold_edges() {
        let w = TransformWeights::barnsley_tree();
        assert_eq!(w.choose(0.0), Choice::TrunkA);
        assert_eq!(w.choose(0.019), Choice::TrunkA);
        assert_eq!(w.choose(0.02), Choice::TrunkB);
        assert_eq!(w.choose(0.04), Choice::SelfCopy);
        assert_eq!(w.choose(0.7999), Choice::SelfCopy);
        assert_eq!(w.choose(0.80), Choice::Split);
        assert_eq!(w.choose(0.999_999), Choice::Split);
    }

    #[test]
    fn only_a_split_reaches_the_branches() {
        let w = TransformWeights::barnsley_tree();
        let table = crate::affine::TransformTable::barnsley_tree();
        for u in &[0.0, 0.03, 0.5, 0.9] {
            let choice = w.choose(*u);
            assert_eq!(Choice::from_index(choice.index()), choice);
            match choice.shared_transform() {
                Some(i) => {
                    let role = table.role(i);
                    assert!(role != Role::LeftBranch && role != Role::RightBranch);
                }
                None => assert_eq!(choice, Choice::Split),
            }
        }
    }

    #[test]
    fn empirical_frequencies_match_weights() {
        let w = TransformWeights::barnsley_tree();
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 1_000_000;
        let mut counts = [0usize; OUTCOMES];
        for _ in 0..trials {
            counts[w.sample(&mut rng).index()] += 1;
        }
        for (count, weight) in counts.iter().zip(w.weights()) {
            let freq = *count as f64 / trials as f64;
            assert!(
                (freq - weight).abs() < 0.005,
                "frequency {} too far from {}",
                freq,
                weight
            );
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let w = TransformWeights::barnsley_tree();
        let a: Vec<Choice> = (&w).sample_iter(StdRng::seed_from_u64(42)).take(1000).collect();
        let b: Vec<Choice> = (&w).sample_iter(StdRng::seed_from_u64(42)).take(1000).collect();
        assert_eq!(a, b);
    }
}
