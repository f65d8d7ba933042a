//! Reactive GRASP for subset selection under exclusion constraints.
//!
//! - **GRASP**: randomized-greedy construction with a restricted candidate
//!   list, local search over insertion, removal and exchange moves, and a
//!   reactive controller that adapts the greediness parameter.
//! - **QBF**: maximum quadratic binary function with prohibited triples,
//!   the problem the engine ships with (instance loader, evaluator, triple
//!   generator).
//!
//! # Architecture
//!
//! The engine in [`grasp`] knows nothing about QBF. Problems plug in through
//! the [`grasp::Evaluator`] and [`grasp::CandidateRule`] traits; [`qbf`] is
//! one such consumer.

pub mod grasp;
pub mod qbf;
pub mod random;
