//! Reactive Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! Each iteration builds a solution by randomized-greedy construction,
//! refines it by local search, and keeps it if it beats the best so far.
//! The greediness `alpha` of each construction is drawn from a pool whose
//! probabilities adapt to the quality of the solutions each alpha produced.
//!
//! The engine is problem-agnostic: an [`Evaluator`] scores subsets of a
//! finite domain and a [`CandidateRule`] decides which elements may enter.
//! [`TripleTable`] provides ternary exclusion constraints.
//!
//! # References
//!
//! - Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"
//! - Prais & Ribeiro (2000), "Reactive GRASP: An Application to a Matrix
//!   Decomposition Problem in TDMA Traffic Assignment"

mod candidates;
mod config;
mod construction;
mod controller;
mod error;
mod local_search;
mod runner;
mod types;

pub use candidates::{CandidateRule, TripleTable, Unconstrained};
pub use config::{evenly_spaced_alphas, GraspConfig};
pub use construction::{construct, restricted_candidates, ConstructionStop};
pub use controller::{AlphaStats, ReactiveController};
pub use error::GraspError;
pub use local_search::{LocalSearch, LocalSearchStats, LocalSearchStrategy, Move};
pub use runner::{GraspResult, GraspRunner};
pub use types::{Evaluator, Solution};
