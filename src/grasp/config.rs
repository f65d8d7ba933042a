//! GRASP configuration.

use super::construction::ConstructionStop;
use super::controller::ReactiveController;
use super::error::GraspError;
use super::local_search::{LocalSearch, LocalSearchStrategy};

/// Evenly spaced alpha pool `(i + 1) / n` for `i in 0..n`.
///
/// ```
/// use u_grasp::grasp::evenly_spaced_alphas;
///
/// assert_eq!(evenly_spaced_alphas(4), vec![0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn evenly_spaced_alphas(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i + 1) as f64 / n as f64).collect()
}

/// Configuration for a GRASP run.
///
/// # Examples
///
/// ```
/// use u_grasp::grasp::{GraspConfig, LocalSearchStrategy};
///
/// let config = GraspConfig::reactive(vec![0.1, 0.3, 0.5])
///     .with_iterations(200)
///     .with_min_samples_per_alpha(10)
///     .with_local_search(LocalSearchStrategy::FirstImprovement)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Number of construct-and-refine cycles. There is no early exit.
    pub iterations: usize,

    /// Alpha pool. Each value in `[0, 1]`; 0 is purely greedy, 1 purely
    /// random.
    pub alphas: Vec<f64>,

    /// Selection probabilities used before the first rebalance.
    /// `None` = uniform.
    pub initial_probabilities: Option<Vec<f64>>,

    /// Samples every alpha needs before probabilities are rebalanced.
    pub min_samples_per_alpha: usize,

    /// Refinement applied to every constructed solution.
    pub local_search: LocalSearchStrategy,

    /// When construction stops adding elements.
    pub construction_stop: ConstructionStop,

    /// A move improves only if its delta is below `-improvement_epsilon`.
    pub improvement_epsilon: f64,

    /// Random seed for reproducibility. `None` draws one at run start.
    pub seed: Option<u64>,

    /// Log every new best solution at `info` level instead of `debug`.
    pub verbose: bool,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            alphas: evenly_spaced_alphas(10),
            initial_probabilities: None,
            min_samples_per_alpha: 5,
            local_search: LocalSearchStrategy::BestThenFirst,
            construction_stop: ConstructionStop::NoImprovement,
            improvement_epsilon: 1e-9,
            seed: None,
            verbose: false,
        }
    }
}

impl GraspConfig {
    /// Reactive GRASP over `alphas`, refined by best-improvement only.
    pub fn reactive(alphas: Vec<f64>) -> Self {
        Self {
            alphas,
            local_search: LocalSearchStrategy::BestImprovement,
            ..Self::default()
        }
    }

    /// Plain GRASP with a single alpha.
    pub fn fixed(alpha: f64) -> Self {
        Self {
            alphas: vec![alpha],
            min_samples_per_alpha: 1,
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_alphas(mut self, alphas: Vec<f64>) -> Self {
        self.alphas = alphas;
        self
    }

    pub fn with_initial_probabilities(mut self, probabilities: Vec<f64>) -> Self {
        self.initial_probabilities = Some(probabilities);
        self
    }

    pub fn with_min_samples_per_alpha(mut self, n: usize) -> Self {
        self.min_samples_per_alpha = n;
        self
    }

    pub fn with_local_search(mut self, strategy: LocalSearchStrategy) -> Self {
        self.local_search = strategy;
        self
    }

    pub fn with_construction_stop(mut self, stop: ConstructionStop) -> Self {
        self.construction_stop = stop;
        self
    }

    pub fn with_improvement_epsilon(mut self, epsilon: f64) -> Self {
        self.improvement_epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validates configuration parameters.
    pub fn validate(&self) -> Result<(), GraspError> {
        if self.iterations == 0 {
            return Err(GraspError::ZeroIterations);
        }
        if !(self.improvement_epsilon.is_finite() && self.improvement_epsilon > 0.0) {
            return Err(GraspError::InvalidEpsilon(self.improvement_epsilon));
        }
        self.controller()?;
        let needed = self.min_samples_per_alpha.checked_mul(self.alphas.len());
        if needed.is_none_or(|n| n > self.iterations) {
            return Err(GraspError::MinSamplesExceedIterations {
                min_samples: self.min_samples_per_alpha,
                alphas: self.alphas.len(),
                iterations: self.iterations,
            });
        }
        Ok(())
    }

    /// Builds the alpha controller described by this configuration.
    pub(crate) fn controller(&self) -> Result<ReactiveController, GraspError> {
        match &self.initial_probabilities {
            Some(p) => ReactiveController::with_probabilities(
                &self.alphas,
                p,
                self.min_samples_per_alpha,
            ),
            None => ReactiveController::new(&self.alphas, self.min_samples_per_alpha),
        }
    }

    pub(crate) fn local_search(&self) -> LocalSearch {
        LocalSearch::new(self.local_search, self.improvement_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GraspConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.alphas.len(), 10);
        assert!((config.alphas[0] - 0.1).abs() < 1e-10);
        assert!((config.alphas[9] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_presets() {
        let reactive = GraspConfig::reactive(vec![0.2, 0.4]);
        assert_eq!(reactive.local_search, LocalSearchStrategy::BestImprovement);
        assert!(reactive.validate().is_ok());

        let fixed = GraspConfig::fixed(0.05);
        assert_eq!(fixed.alphas, vec![0.05]);
        assert_eq!(fixed.local_search, LocalSearchStrategy::BestThenFirst);
        assert!(fixed.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GraspConfig::default()
            .with_iterations(50)
            .with_alphas(vec![0.5])
            .with_min_samples_per_alpha(2)
            .with_construction_stop(ConstructionStop::Exhausted)
            .with_improvement_epsilon(1e-6)
            .with_seed(11)
            .with_verbose(true);
        assert_eq!(config.iterations, 50);
        assert_eq!(config.construction_stop, ConstructionStop::Exhausted);
        assert_eq!(config.seed, Some(11));
        assert!(config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_iterations() {
        let config = GraspConfig::default().with_iterations(0);
        assert_eq!(config.validate(), Err(GraspError::ZeroIterations));
    }

    #[test]
    fn test_empty_pool() {
        let config = GraspConfig::reactive(vec![]);
        assert_eq!(config.validate(), Err(GraspError::EmptyAlphaPool));
    }

    #[test]
    fn test_alpha_out_of_range() {
        let config = GraspConfig::reactive(vec![0.5, 1.5]);
        assert_eq!(
            config.validate(),
            Err(GraspError::AlphaOutOfRange {
                index: 1,
                alpha: 1.5
            })
        );
        assert!(GraspConfig::fixed(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_bad_initial_probabilities() {
        let config = GraspConfig::reactive(vec![0.1, 0.2]).with_initial_probabilities(vec![1.0]);
        assert_eq!(
            config.validate(),
            Err(GraspError::ProbabilityLengthMismatch {
                expected: 2,
                found: 1
            })
        );

        let config =
            GraspConfig::reactive(vec![0.1, 0.2]).with_initial_probabilities(vec![0.7, 0.7]);
        assert!(matches!(
            config.validate(),
            Err(GraspError::InvalidProbabilities { .. })
        ));

        let config =
            GraspConfig::reactive(vec![0.1, 0.2]).with_initial_probabilities(vec![0.3, 0.7]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_min_samples_checks() {
        let config = GraspConfig::default().with_min_samples_per_alpha(0);
        assert_eq!(config.validate(), Err(GraspError::ZeroMinSamples));

        let config = GraspConfig::default()
            .with_iterations(10)
            .with_min_samples_per_alpha(11);
        assert_eq!(
            config.validate(),
            Err(GraspError::MinSamplesExceedIterations {
                min_samples: 11,
                alphas: 10,
                iterations: 10
            })
        );

        // Each alpha fits alone, but ten alphas need 50 samples.
        let config = GraspConfig::default()
            .with_iterations(10)
            .with_min_samples_per_alpha(5);
        assert_eq!(
            config.validate(),
            Err(GraspError::MinSamplesExceedIterations {
                min_samples: 5,
                alphas: 10,
                iterations: 10
            })
        );

        let config = GraspConfig::default()
            .with_iterations(50)
            .with_min_samples_per_alpha(5);
        assert!(config.validate().is_ok());

        let config = GraspConfig::reactive(vec![0.1, 0.2])
            .with_iterations(10)
            .with_min_samples_per_alpha(usize::MAX);
        assert!(matches!(
            config.validate(),
            Err(GraspError::MinSamplesExceedIterations { .. })
        ));
    }

    #[test]
    fn test_epsilon_checks() {
        for eps in [0.0, -1e-9, f64::INFINITY] {
            let config = GraspConfig::default().with_improvement_epsilon(eps);
            assert!(matches!(
                config.validate(),
                Err(GraspError::InvalidEpsilon(_))
            ));
        }
    }

    #[test]
    fn test_evenly_spaced_alphas() {
        let alphas = evenly_spaced_alphas(10);
        assert_eq!(alphas.len(), 10);
        assert!(alphas.windows(2).all(|w| w[0] < w[1]));
        assert!(evenly_spaced_alphas(0).is_empty());
    }
}
