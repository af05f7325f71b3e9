//! Cost-based ranking for overload selection.

use std::cmp::Reverse;

use super::OverloadMatch;

/// Find the single best match among viable candidates.
///
/// Candidates are ordered by total conversion cost, then by number of exact
/// argument matches. The best key must be held by exactly one candidate;
/// a tie at the top is ambiguous and yields `None`. Because only the key
/// decides, the result does not depend on the order candidates arrive in.
pub fn find_best_match<'m, 'a>(viable: &'m [OverloadMatch<'a>]) -> Option<&'m OverloadMatch<'a>> {
    match best_candidates(viable).as_slice() {
        [winner] => Some(*winner),
        _ => None,
    }
}

/// Every candidate holding the best rank key, in input order.
pub fn best_candidates<'m, 'a>(viable: &'m [OverloadMatch<'a>]) -> Vec<&'m OverloadMatch<'a>> {
    let Some(best) = viable.iter().map(rank_key).min() else {
        return Vec::new();
    };
    viable.iter().filter(|m| rank_key(m) == best).collect()
}

fn rank_key(m: &OverloadMatch<'_>) -> (u32, Reverse<usize>) {
    (m.total_cost, Reverse(count_exact_matches(m)))
}

/// Count the arguments passed without conversion.
fn count_exact_matches(m: &OverloadMatch<'_>) -> usize {
    m.conversions.iter().filter(|c| c.is_exact()).count()
}
