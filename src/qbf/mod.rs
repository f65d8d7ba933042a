//! Maximum quadratic binary function with prohibited triples (MAX-QBF-PT).
//!
//! Choose a subset of variables maximizing `f(x) = x'Ax` such that no
//! prohibited triple is fully selected. The engine minimizes, so the
//! problem is handed to it through [`QbfInverse`], which evaluates `-f`.
//!
//! # Examples
//!
//! ```
//! use u_grasp::grasp::{GraspConfig, GraspRunner};
//! use u_grasp::qbf::{prohibited_triple_table, QbfInstance, QbfInverse};
//! use u_grasp::random::create_rng;
//!
//! let instance = QbfInstance::random(20, 10, &mut create_rng(1));
//! let eval = QbfInverse::new(instance);
//! let triples = prohibited_triple_table(20).unwrap();
//! let config = GraspConfig::default().with_iterations(50).with_seed(3);
//!
//! let result = GraspRunner::run(&eval, &triples, &config).unwrap();
//! let value = eval.instance().value(result.best.elements());
//! assert_eq!(value, -result.best_cost);
//! ```

mod evaluator;
mod instance;
mod triples;

pub use evaluator::QbfInverse;
pub use instance::{ParseTokenError, QbfError, QbfInstance};
pub use triples::{prohibited_triple_table, prohibited_triples};
