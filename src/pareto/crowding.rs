//! Crowding distance and the crowded comparison.

use std::cmp::Ordering;

use super::sweep::compare;
use super::Objectives;

/// Writes the crowding distance of every member of `front` into `distances`,
/// which is indexed like `items`.
///
/// Boundary members of every objective get `f64::INFINITY`; interior members
/// sum the normalised gap between their neighbours. A gap that evaluates to NaN,
/// as `inf - inf` does between penalised members, contributes nothing.
pub fn assign_crowding_distance<T: Objectives>(
    items: &[T],
    front: &[usize],
    distances: &mut [f64],
) {
    for &member in front {
        distances[member] = 0.0;
    }
    let Some(&first) = front.first() else {
        return;
    };

    let mut order = front.to_vec();
    for objective in 0..items[first].objectives().len() {
        let value = |idx: usize| items[idx].objectives()[objective];
        order.sort_by(|&a, &b| compare(value(a), value(b)));

        let (lowest, highest) = (order[0], order[order.len() - 1]);
        distances[lowest] = f64::INFINITY;
        distances[highest] = f64::INFINITY;

        let range = value(highest) - value(lowest);
        for window in order.windows(3) {
            let gap = value(window[2]) - value(window[0]);
            let contribution = if range == 0.0 { gap } else { gap / range };
            if !contribution.is_nan() {
                distances[window[1]] += contribution;
            }
        }
    }
}

/// Rank and crowding distance of one individual, ordered by preference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrowdedRank {
    pub rank: usize,
    pub distance: f64,
}

impl CrowdedRank {
    pub fn new(rank: usize, distance: f64) -> Self {
        Self { rank, distance }
    }

    /// `Less` when `self` is preferred: lower rank first, then larger distance.
    pub fn crowded_cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| compare(other.distance, self.distance))
    }

    pub fn is_preferred_over(&self, other: &Self) -> bool {
        self.crowded_cmp(other) == Ordering::Less
    }
}
