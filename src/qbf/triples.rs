//! Prohibited triples of the QBF-PT benchmark.

use crate::grasp::{GraspError, TripleTable};

/// Deterministic prohibited triples for `n` variables.
///
/// For each `u` in `1..=n` (1-based), the partners are
/// `g(u) = 1 + ((131u + 1031) mod n)` and `h(u) = 1 + ((193u + 1093) mod n)`.
/// A partner that collides with `u` (or `h` with `g`) moves to the next
/// index, wrapping from `n` to 1. The returned triples are 0-based and
/// ordered `[u, g, h]`.
///
/// Returns no triples for `n < 3`.
///
/// ```
/// use u_grasp::qbf::prohibited_triples;
///
/// let triples = prohibited_triples(3);
/// assert_eq!(triples, vec![[0, 1, 2], [1, 0, 2], [2, 0, 1]]);
/// ```
pub fn prohibited_triples(n: usize) -> Vec<[usize; 3]> {
    if n < 3 {
        return Vec::new();
    }
    let next = |x: usize| 1 + (x % n);

    (1..=n)
        .map(|u| {
            let mut g = 1 + ((131 * u + 1031) % n);
            while g == u {
                g = next(g);
            }
            let mut h = 1 + ((193 * u + 1093) % n);
            while h == u || h == g {
                h = next(h);
            }
            [u - 1, g - 1, h - 1]
        })
        .collect()
}

/// [`TripleTable`] over [`prohibited_triples`].
pub fn prohibited_triple_table(n: usize) -> Result<TripleTable, GraspError> {
    TripleTable::new(prohibited_triples(n), n)
}
