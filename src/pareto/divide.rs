//! Divide-and-conquer ranking for three or more objectives.
//!
//! A set is split on the median of one objective into a low half and a high
//! half whose members are strictly greater on that objective, so nothing in
//! the high half can dominate anything in the low half. The low half is ranked
//! first; its final ranks then raise the lower bounds of the high half, which
//! is ranked last. Ranks live in one arena indexed by point and only ever grow.

use std::cmp::Ordering;

use super::dominates;
use super::sweep::compare;

pub(super) fn ranks(points: &[&[f64]]) -> Vec<usize> {
    let mut ranks = vec![1; points.len()];
    let members: Vec<usize> = (0..points.len()).collect();
    rank_subset(points, &members, 0, &mut ranks);
    ranks
}

fn rank_subset(points: &[&[f64]], members: &[usize], objective: usize, ranks: &mut [usize]) {
    match members {
        [] | [_] => return,
        &[a, b] => {
            if dominates(points[a], points[b]) {
                ranks[b] = ranks[b].max(ranks[a] + 1);
            } else if dominates(points[b], points[a]) {
                ranks[a] = ranks[a].max(ranks[b] + 1);
            }
            return;
        }
        _ => {}
    }

    // Identical points dominate nothing.
    let Some((low, high, used)) = split(points, members, objective) else {
        return;
    };
    let next = (used + 1) % points[members[0]].len();

    rank_subset(points, &low, next, ranks);
    merge(points, &low, &high, ranks);
    rank_subset(points, &high, next, ranks);
}

/// Splits `members` on the median of the first objective, starting at
/// `objective`, that separates them.
fn split(
    points: &[&[f64]],
    members: &[usize],
    objective: usize,
) -> Option<(Vec<usize>, Vec<usize>, usize)> {
    let dimensions = points[members[0]].len();
    for offset in 0..dimensions {
        let obj = (objective + offset) % dimensions;
        let mut values: Vec<f64> = members.iter().map(|&i| points[i][obj]).collect();
        let mid = values.len() / 2;
        let (_, median, _) = values.select_nth_unstable_by(mid, |a, b| compare(*a, *b));
        let median = *median;

        let (low, high): (Vec<usize>, Vec<usize>) = members
            .iter()
            .copied()
            .partition(|&i| compare(points[i][obj], median) != Ordering::Greater);
        if !high.is_empty() {
            return Some((low, high, obj));
        }

        // The median is the maximum; split below it instead.
        let (low, high): (Vec<usize>, Vec<usize>) = members
            .iter()
            .copied()
            .partition(|&i| compare(points[i][obj], median) == Ordering::Less);
        if !low.is_empty() {
            return Some((low, high, obj));
        }
    }
    None
}

/// Raises every rank in `high` above the best-ranked dominator in `low`.
fn merge(points: &[&[f64]], low: &[usize], high: &[usize], ranks: &mut [usize]) {
    let mut settled = low.to_vec();
    settled.sort_by(|a, b| ranks[*b].cmp(&ranks[*a]));

    for &h in high {
        for &l in &settled {
            if ranks[l] < ranks[h] {
                break;
            }
            if dominates(points[l], points[h]) {
                ranks[h] = ranks[l] + 1;
                break;
            }
        }
    }
}
