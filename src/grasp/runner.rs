//! GRASP execution loop.

use super::candidates::CandidateRule;
use super::config::GraspConfig;
use super::construction::construct;
use super::controller::AlphaStats;
use super::error::GraspError;
use super::types::{Evaluator, Solution};
use crate::random::rng_from_option;

/// Result of a GRASP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspResult {
    /// The best solution found.
    pub best: Solution,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of iterations.
    pub iterations: usize,

    /// Number of times the best solution was replaced.
    pub improvements: usize,

    /// Iteration (0-based) that produced the best solution, or `None` if
    /// the empty solution was never beaten.
    pub best_iteration: Option<usize>,

    /// Seed the run was driven by.
    pub seed: u64,

    /// Final alpha selection probabilities.
    pub alpha_probabilities: Vec<f64>,

    /// Per-alpha construction statistics.
    pub alpha_stats: Vec<AlphaStats>,

    /// Best cost after each iteration.
    pub cost_history: Vec<f64>,
}

/// Executes GRASP.
pub struct GraspRunner;

impl GraspRunner {
    /// Runs GRASP.
    ///
    /// # Arguments
    /// * `evaluator` - Objective function (minimized)
    /// * `rule` - Candidate list filter, e.g. a [`TripleTable`](super::TripleTable)
    /// * `config` - Algorithm configuration
    ///
    /// # Errors
    ///
    /// Fails before the first iteration if `config` is invalid or `rule` does
    /// not fit the evaluator's domain.
    pub fn run<E, C>(evaluator: &E, rule: &C, config: &GraspConfig) -> Result<GraspResult, GraspError>
    where
        E: Evaluator + ?Sized,
        C: CandidateRule + ?Sized,
    {
        config.validate()?;
        rule.validate(evaluator.domain_size())?;

        let mut controller = config.controller()?;
        let local_search = config.local_search();
        let (mut rng, seed) = rng_from_option(config.seed);

        let span = tracing::debug_span!(
            "grasp",
            seed,
            iterations = config.iterations,
            domain = evaluator.domain_size()
        );
        let _guard = span.enter();
        tracing::debug!(alphas = ?config.alphas, strategy = ?config.local_search, "run started");

        let mut best = evaluator.empty_solution();
        let mut best_iteration = None;
        let mut improvements = 0usize;
        let mut cost_history = Vec::with_capacity(config.iterations);

        for iteration in 0..config.iterations {
            let index = controller.select_alpha(&mut rng);
            let alpha = controller.alpha(index);

            let mut current =
                construct(evaluator, rule, alpha, config.construction_stop, &mut rng);
            let constructed_cost = current.cost();

            controller.record_outcome(index, constructed_cost);
            controller.rebalance(best.cost().min(constructed_cost));

            let stats = local_search.improve(evaluator, rule, &mut current);
            tracing::trace!(
                iteration,
                alpha,
                constructed_cost,
                cost = current.cost(),
                moves = stats.moves(),
                "iteration"
            );

            if current.cost() < best.cost() {
                best = current;
                best_iteration = Some(iteration);
                improvements += 1;
                if config.verbose {
                    tracing::info!(iteration, alpha, cost = best.cost(), size = best.len(), "new best");
                } else {
                    tracing::debug!(iteration, alpha, cost = best.cost(), size = best.len(), "new best");
                }
            }

            cost_history.push(best.cost());
        }

        tracing::debug!(best_cost = best.cost(), improvements, "run finished");

        Ok(GraspResult {
            best_cost: best.cost(),
            best,
            iterations: config.iterations,
            improvements,
            best_iteration,
            seed,
            alpha_probabilities: controller.probabilities(),
            alpha_stats: controller.stats().to_vec(),
            cost_history,
        })
    }

    /// Reactive GRASP with default settings over `alphas`; returns the best
    /// solution only.
    pub fn solve<E, C>(
        evaluator: &E,
        rule: &C,
        alphas: &[f64],
        iterations: usize,
        min_samples_per_alpha: usize,
    ) -> Result<Solution, GraspError>
    where
        E: Evaluator + ?Sized,
        C: CandidateRule + ?Sized,
    {
        let config = GraspConfig::reactive(alphas.to_vec())
            .with_iterations(iterations)
            .with_min_samples_per_alpha(min_samples_per_alpha);
        Self::run(evaluator, rule, &config).map(|r| r.best)
    }
}
