//! Dominated-count peeling sort.

use super::dominates;

/// Ranks by repeatedly removing the points nobody left dominates.
pub(super) fn ranks(points: &[&[f64]]) -> Vec<usize> {
    let n = points.len();
    let mut dominated_by = vec![0usize; n];
    let mut dominating: Vec<Vec<usize>> = vec![Vec::new(); n];

    for p in 0..n {
        for q in (p + 1)..n {
            if dominates(points[p], points[q]) {
                dominating[p].push(q);
                dominated_by[q] += 1;
            } else if dominates(points[q], points[p]) {
                dominating[q].push(p);
                dominated_by[p] += 1;
            }
        }
    }

    let mut ranks = vec![0; n];
    let mut current: Vec<usize> = (0..n).filter(|&p| dominated_by[p] == 0).collect();
    let mut rank = 1;
    while !current.is_empty() {
        let mut next = Vec::new();
        for &p in &current {
            ranks[p] = rank;
            for &q in &dominating[p] {
                dominated_by[q] -= 1;
                if dominated_by[q] == 0 {
                    next.push(q);
                }
            }
        }
        current = next;
        rank += 1;
    }
    ranks
}
