//! Local search over insertion, removal and exchange neighborhoods.
//!
//! # Strategies
//!
//! - **Best improvement**: scan all three neighborhoods, apply the single
//!   move with the lowest delta if it improves, repeat.
//! - **First improvement**: for insertion, then removal, then exchange,
//!   apply the first improving move found until a full scan of that
//!   neighborhood finds none.
//!
//! A move improves when its delta is below `-epsilon`. Every applied move
//! lowers the cost by more than `epsilon`, so the search terminates on any
//! finite domain.

use super::candidates::CandidateRule;
use super::types::{Evaluator, Solution};

/// Which refinement phases run after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSearchStrategy {
    /// Best-improvement hill climbing only.
    BestImprovement,
    /// Best-improvement, then a first-improvement sweep over each
    /// neighborhood in turn.
    #[default]
    BestThenFirst,
    /// First-improvement sweeps only.
    FirstImprovement,
}

/// A neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Add an element.
    Insert(usize),
    /// Drop an element.
    Remove(usize),
    /// Add `element_in` and drop `element_out`.
    Exchange {
        /// Element entering the solution.
        element_in: usize,
        /// Element leaving the solution.
        element_out: usize,
    },
}

impl Move {
    /// Applies the move and re-evaluates the solution.
    pub fn apply<E: Evaluator + ?Sized>(self, solution: &mut Solution, evaluator: &E) {
        match self {
            Move::Insert(e) => solution.insert(e, evaluator),
            Move::Remove(e) => solution.remove(e, evaluator),
            Move::Exchange {
                element_in,
                element_out,
            } => solution.exchange(element_in, element_out, evaluator),
        }
    }

    /// Cost change the move would cause.
    pub fn delta<E: Evaluator + ?Sized>(self, solution: &Solution, evaluator: &E) -> f64 {
        match self {
            Move::Insert(e) => evaluator.insertion_cost(e, solution),
            Move::Remove(e) => evaluator.removal_cost(e, solution),
            Move::Exchange {
                element_in,
                element_out,
            } => evaluator.exchange_cost(element_in, element_out, solution),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Neighborhood {
    Insertion,
    Removal,
    Exchange,
}

/// Counters for one local search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchStats {
    /// Insertions applied.
    pub insertions: usize,
    /// Removals applied.
    pub removals: usize,
    /// Exchanges applied.
    pub exchanges: usize,
}

impl LocalSearchStats {
    /// Total moves applied.
    pub fn moves(&self) -> usize {
        self.insertions + self.removals + self.exchanges
    }

    fn count(&mut self, mv: Move) {
        match mv {
            Move::Insert(_) => self.insertions += 1,
            Move::Remove(_) => self.removals += 1,
            Move::Exchange { .. } => self.exchanges += 1,
        }
    }
}

/// Refines a solution to a local optimum.
///
/// The candidate list is rebuilt from the full domain before every scan, so
/// an element freed by a removal can re-enter later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSearch {
    strategy: LocalSearchStrategy,
    epsilon: f64,
}

impl LocalSearch {
    /// Creates a local search with the given strategy and improvement
    /// threshold.
    pub fn new(strategy: LocalSearchStrategy, epsilon: f64) -> Self {
        Self { strategy, epsilon }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> LocalSearchStrategy {
        self.strategy
    }

    /// Improves `solution` in place and reports the applied moves.
    pub fn improve<E, C>(&self, evaluator: &E, rule: &C, solution: &mut Solution) -> LocalSearchStats
    where
        E: Evaluator + ?Sized,
        C: CandidateRule + ?Sized,
    {
        let mut stats = LocalSearchStats::default();
        match self.strategy {
            LocalSearchStrategy::BestImprovement => {
                self.best_improvement(evaluator, rule, solution, &mut stats);
            }
            LocalSearchStrategy::BestThenFirst => {
                self.best_improvement(evaluator, rule, solution, &mut stats);
                self.first_improvement(evaluator, rule, solution, &mut stats);
            }
            LocalSearchStrategy::FirstImprovement => {
                self.first_improvement(evaluator, rule, solution, &mut stats);
            }
        }
        stats
    }

    fn best_improvement<E, C>(
        &self,
        evaluator: &E,
        rule: &C,
        solution: &mut Solution,
        stats: &mut LocalSearchStats,
    ) where
        E: Evaluator + ?Sized,
        C: CandidateRule + ?Sized,
    {
        while let Some((mv, delta)) = self.best_move(evaluator, rule, solution) {
            if delta < -self.epsilon {
                mv.apply(solution, evaluator);
                stats.count(mv);
                tracing::trace!(?mv, delta, cost = solution.cost(), "best-improvement move");
            } else {
                break;
            }
        }
    }

    /// Lowest-delta move across all neighborhoods. Ties go to the move
    /// scanned first; NaN deltas are skipped.
    fn best_move<E, C>(&self, evaluator: &E, rule: &C, solution: &Solution) -> Option<(Move, f64)>
    where
        E: Evaluator + ?Sized,
        C: CandidateRule + ?Sized,
    {
        let candidates = candidate_list(evaluator, rule, solution);
        let mut best: Option<(Move, f64)> = None;
        let mut consider = |mv: Move, delta: f64| {
            let better = match best {
                None => !delta.is_nan(),
                Some((_, d)) => delta < d,
            };
            if better {
                best = Some((mv, delta));
            }
        };

        for &c in &candidates {
            consider(Move::Insert(c), evaluator.insertion_cost(c, solution));
        }
        for &e in solution.elements() {
            consider(Move::Remove(e), evaluator.removal_cost(e, solution));
        }
        for &c in &candidates {
            for &e in solution.elements() {
                consider(
                    Move::Exchange {
                        element_in: c,
                        element_out: e,
                    },
                    evaluator.exchange_cost(c, e, solution),
                );
            }
        }
        best
    }

    fn first_improvement<E, C>(
        &self,
        evaluator: &E,
        rule: &C,
        solution: &mut Solution,
        stats: &mut LocalSearchStats,
    ) where
        E: Evaluator + ?Sized,
        C: CandidateRule + ?Sized,
    {
        for hood in [
            Neighborhood::Insertion,
            Neighborhood::Removal,
            Neighborhood::Exchange,
        ] {
            while let Some(mv) = self.first_move(hood, evaluator, rule, solution) {
                mv.apply(solution, evaluator);
                stats.count(mv);
                tracing::trace!(?mv, cost = solution.cost(), "first-improvement move");
            }
        }
    }

    fn first_move<E, C>(
        &self,
        hood: Neighborhood,
        evaluator: &E,
        rule: &C,
        solution: &Solution,
    ) -> Option<Move>
    where
        E: Evaluator + ?Sized,
        C: CandidateRule + ?Sized,
    {
        let improves = |mv: &Move| mv.delta(solution, evaluator) < -self.epsilon;
        match hood {
            Neighborhood::Insertion => candidate_list(evaluator, rule, solution)
                .into_iter()
                .map(Move::Insert)
                .find(improves),
            Neighborhood::Removal => solution
                .elements()
                .iter()
                .map(|&e| Move::Remove(e))
                .find(improves),
            Neighborhood::Exchange => candidate_list(evaluator, rule, solution)
                .into_iter()
                .flat_map(move |c| {
                    solution.elements().iter().map(move |&e| Move::Exchange {
                        element_in: c,
                        element_out: e,
                    })
                })
                .find(improves),
        }
    }
}

fn candidate_list<E, C>(evaluator: &E, rule: &C, solution: &Solution) -> Vec<usize>
where
    E: Evaluator + ?Sized,
    C: CandidateRule + ?Sized,
{
    let all = rule.make_candidate_list(evaluator.domain_size());
    rule.update_candidate_list(solution, &all)
}
