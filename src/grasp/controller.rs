//! Reactive alpha selection.
//!
//! The controller owns a fixed pool of alphas. Before each construction it
//! draws one by roulette wheel; after the construction it records the
//! resulting cost and, once every alpha has been sampled often enough,
//! re-derives the selection probabilities from the average cost each alpha
//! produced.
//!
//! # Quality score
//!
//! For alpha `i` with average construction cost `A_i` and the best known cost
//! `z*`:
//!
//! ```text
//! q_i = (1 + |z*|) / (1 + max(A_i - z*, 0))
//! p_i = q_i / sum_j q_j
//! ```
//!
//! The score falls strictly as `A_i` rises above `z*`, whatever the signs of
//! the costs. With `z* = 0` it reduces to `1 / (1 + A_i)`.
//!
//! # References
//!
//! Prais, M. & Ribeiro, C. C. (2000). "Reactive GRASP: An Application to a
//! Matrix Decomposition Problem in TDMA Traffic Assignment", *INFORMS
//! Journal on Computing* 12(3), 164-176.

use rand::Rng;

use super::error::GraspError;

/// Running statistics for one alpha of the pool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaStats {
    /// The greediness parameter, in `[0, 1]`.
    pub alpha: f64,
    /// Sum of the costs of all constructions made with this alpha.
    pub cost_sum: f64,
    /// Number of constructions made with this alpha.
    pub count: usize,
    /// Current selection probability.
    pub probability: f64,
}

impl AlphaStats {
    /// Average construction cost, or `None` before the first sample.
    pub fn average_cost(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.cost_sum / self.count as f64)
        }
    }
}

/// Adaptive alpha selector for Reactive GRASP.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::ReactiveController;
///
/// let mut ctl = ReactiveController::new(&[0.1, 0.9], 2).unwrap();
/// for _ in 0..2 {
///     ctl.record_outcome(0, 10.0);
///     ctl.record_outcome(1, 20.0);
/// }
/// assert!(ctl.rebalance(10.0));
/// let p = ctl.probabilities();
/// assert!(p[0] > p[1]);
/// ```
#[derive(Debug, Clone)]
pub struct ReactiveController {
    stats: Vec<AlphaStats>,
    min_samples: usize,
    balancing: bool,
}

impl ReactiveController {
    /// Creates a controller with uniform initial probabilities.
    ///
    /// # Errors
    ///
    /// Fails on an empty pool, an alpha outside `[0, 1]`, or a zero
    /// `min_samples`.
    pub fn new(alphas: &[f64], min_samples: usize) -> Result<Self, GraspError> {
        let uniform = vec![1.0 / alphas.len().max(1) as f64; alphas.len()];
        Self::with_probabilities(alphas, &uniform, min_samples)
    }

    /// Creates a controller with caller-supplied initial probabilities.
    ///
    /// The probabilities are used until the pool is first rebalanced.
    ///
    /// # Errors
    ///
    /// In addition to the checks of [`ReactiveController::new`], fails if
    /// `probabilities` does not have one non-negative entry per alpha or
    /// does not sum to 1.
    pub fn with_probabilities(
        alphas: &[f64],
        probabilities: &[f64],
        min_samples: usize,
    ) -> Result<Self, GraspError> {
        if alphas.is_empty() {
            return Err(GraspError::EmptyAlphaPool);
        }
        if let Some((index, &alpha)) = alphas
            .iter()
            .enumerate()
            .find(|&(_, a)| !(0.0..=1.0).contains(a))
        {
            return Err(GraspError::AlphaOutOfRange { index, alpha });
        }
        check_probabilities(alphas.len(), probabilities)?;
        if min_samples == 0 {
            return Err(GraspError::ZeroMinSamples);
        }

        let stats = alphas
            .iter()
            .zip(probabilities)
            .map(|(&alpha, &probability)| AlphaStats {
                alpha,
                cost_sum: 0.0,
                count: 0,
                probability,
            })
            .collect();

        Ok(Self {
            stats,
            min_samples,
            balancing: false,
        })
    }

    /// A single alpha selected with probability 1 (plain GRASP).
    pub fn fixed(alpha: f64) -> Result<Self, GraspError> {
        Self::new(&[alpha], 1)
    }

    /// Number of alphas in the pool.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Always `false`; a controller cannot be built from an empty pool.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// The alpha at `index`.
    pub fn alpha(&self, index: usize) -> f64 {
        self.stats[index].alpha
    }

    /// Current selection probabilities, in pool order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.stats.iter().map(|s| s.probability).collect()
    }

    /// Per-alpha statistics, in pool order.
    pub fn stats(&self) -> &[AlphaStats] {
        &self.stats
    }

    /// Minimum samples per alpha before rebalancing starts.
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Whether every alpha has reached the sample threshold.
    ///
    /// Once `true` this never reverts.
    pub fn is_balancing(&self) -> bool {
        self.balancing
    }

    /// Draws an alpha index by roulette wheel.
    pub fn select_alpha<R: Rng>(&self, rng: &mut R) -> usize {
        let draw: f64 = rng.random();
        self.select_with_draw(draw)
    }

    /// Roulette-wheel selection for a given draw in `[0, 1)`.
    ///
    /// Returns the first index whose cumulative probability reaches `draw`.
    /// If rounding leaves the total short of `draw`, the last index is
    /// returned.
    pub fn select_with_draw(&self, draw: f64) -> usize {
        let mut cumulative = 0.0;
        for (i, stat) in self.stats.iter().enumerate() {
            cumulative += stat.probability;
            if draw <= cumulative {
                return i;
            }
        }
        self.stats.len() - 1
    }

    /// Records the cost of a construction made with alpha `index`.
    pub fn record_outcome(&mut self, index: usize, cost: f64) {
        let stat = &mut self.stats[index];
        stat.cost_sum += cost;
        stat.count += 1;
    }

    /// Recomputes the probabilities against `reference_cost`, the best cost
    /// known so far.
    ///
    /// Does nothing until every alpha has at least `min_samples` outcomes.
    /// Returns `true` if the probabilities were recomputed.
    pub fn rebalance(&mut self, reference_cost: f64) -> bool {
        if !self.balancing {
            self.balancing = self.stats.iter().all(|s| s.count >= self.min_samples);
            if !self.balancing {
                return false;
            }
            tracing::debug!(
                min_samples = self.min_samples,
                alphas = self.stats.len(),
                "alpha pool sampled; adaptive probabilities enabled"
            );
        }

        let qualities: Vec<f64> = self
            .stats
            .iter()
            .map(|s| quality(reference_cost, s.cost_sum / s.count as f64))
            .collect();
        let total: f64 = qualities.iter().sum();

        if !total.is_finite() || total <= 0.0 {
            tracing::warn!(
                reference_cost,
                total,
                "alpha qualities degenerate; keeping previous probabilities"
            );
            return false;
        }

        for (stat, q) in self.stats.iter_mut().zip(qualities) {
            stat.probability = q / total;
        }
        true
    }
}

/// Quality of an alpha whose constructions average `average` against the
/// best known `reference`. Larger is better.
fn quality(reference: f64, average: f64) -> f64 {
    // NaN must reach the degenerate-total check, so no f64::max here.
    let gap = if average < reference {
        0.0
    } else {
        average - reference
    };
    (1.0 + reference.abs()) / (1.0 + gap)
}

fn check_probabilities(expected: usize, probabilities: &[f64]) -> Result<(), GraspError> {
    if probabilities.len() != expected {
        return Err(GraspError::ProbabilityLengthMismatch {
            expected,
            found: probabilities.len(),
        });
    }
    let sum: f64 = probabilities.iter().sum();
    let valid = probabilities.iter().all(|p| p.is_finite() && *p >= 0.0);
    if !valid || (sum - 1.0).abs() > 1e-9 {
        return Err(GraspError::InvalidProbabilities { sum });
    }
    Ok(())
}
