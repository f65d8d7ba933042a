//! Configuration errors.

use std::fmt;

/// Errors raised while validating a GRASP configuration or its triple table.
///
/// All of these are detected before the first iteration runs; the search
/// itself has no failure path.
#[derive(Debug, Clone, PartialEq)]
pub enum GraspError {
    /// The iteration budget is zero.
    ZeroIterations,
    /// The alpha pool has no entries.
    EmptyAlphaPool,
    /// An alpha lies outside `[0, 1]` or is not finite.
    AlphaOutOfRange {
        /// Position in the pool.
        index: usize,
        /// The offending value.
        alpha: f64,
    },
    /// The initial probability vector does not match the pool size.
    ProbabilityLengthMismatch {
        /// Number of alphas in the pool.
        expected: usize,
        /// Number of probabilities supplied.
        found: usize,
    },
    /// The initial probability vector has a negative or non-finite entry,
    /// or does not sum to 1.
    InvalidProbabilities {
        /// Sum of the supplied probabilities.
        sum: f64,
    },
    /// `min_samples_per_alpha` is zero, which would divide by an empty count.
    ZeroMinSamples,
    /// Sampling every alpha `min_samples_per_alpha` times takes more than
    /// the iteration budget, so the pool could never be rebalanced.
    MinSamplesExceedIterations {
        /// Requested threshold.
        min_samples: usize,
        /// Number of alphas in the pool.
        alphas: usize,
        /// Planned iterations.
        iterations: usize,
    },
    /// The improvement epsilon is not a positive finite number.
    InvalidEpsilon(f64),
    /// A triple references an element outside the domain or repeats an
    /// element.
    InvalidTriple {
        /// Position in the triple table.
        index: usize,
        /// The offending triple.
        triple: [usize; 3],
        /// Size of the evaluator's domain.
        domain_size: usize,
    },
}

impl fmt::Display for GraspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroIterations => write!(f, "iterations must be positive"),
            Self::EmptyAlphaPool => write!(f, "alpha pool must contain at least one alpha"),
            Self::AlphaOutOfRange { index, alpha } => {
                write!(f, "alpha #{index} must be in [0, 1], got {alpha}")
            }
            Self::ProbabilityLengthMismatch { expected, found } => write!(
                f,
                "expected {expected} initial probabilities (one per alpha), got {found}"
            ),
            Self::InvalidProbabilities { sum } => write!(
                f,
                "initial probabilities must be non-negative and sum to 1, got sum {sum}"
            ),
            Self::ZeroMinSamples => write!(f, "min_samples_per_alpha must be positive"),
            Self::MinSamplesExceedIterations {
                min_samples,
                alphas,
                iterations,
            } => write!(
                f,
                "min_samples_per_alpha ({min_samples}) x alphas ({alphas}) exceeds \
                 iterations ({iterations}); alpha probabilities would never be rebalanced"
            ),
            Self::InvalidEpsilon(eps) => {
                write!(f, "improvement_epsilon must be positive and finite, got {eps}")
            }
            Self::InvalidTriple {
                index,
                triple,
                domain_size,
            } => write!(
                f,
                "triple #{index} {triple:?} must hold three distinct elements below {domain_size}"
            ),
        }
    }
}

impl std::error::Error for GraspError {}
