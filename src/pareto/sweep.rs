//! Sorting-based ranking for one and two objectives.

use std::cmp::Ordering;

use super::dominates;

// NaN is rejected before ranking. -0.0 ties with 0.0, as in `dominates`.
pub(super) fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn lexicographic(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| compare(*x, *y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Ranks by the single objective; equal values share a rank.
pub(super) fn ranks_single(points: &[&[f64]]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| compare(points[a][0], points[b][0]));

    let mut ranks = vec![0; points.len()];
    let mut rank = 0;
    let mut previous: Option<f64> = None;
    for idx in order {
        let value = points[idx][0];
        if previous != Some(value) {
            rank += 1;
            previous = Some(value);
        }
        ranks[idx] = rank;
    }
    ranks
}

/// Two-objective sweep.
///
/// After sorting by `(obj0, obj1)` nothing later in the order can dominate
/// anything earlier, and within a front `obj1` never increases. A point
/// therefore belongs to the first front whose latest member does not dominate
/// it, and the fronts that do dominate it form a prefix.
pub(super) fn ranks_bi(points: &[&[f64]]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| lexicographic(points[a], points[b]));

    let mut ranks = vec![0; points.len()];
    // Latest member of every open front.
    let mut last: Vec<usize> = Vec::new();
    for idx in order {
        let front = last.partition_point(|&member| dominates(points[member], points[idx]));
        if front == last.len() {
            last.push(idx);
        } else {
            last[front] = idx;
        }
        ranks[idx] = front + 1;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let values: Vec<Vec<f64>> = vec![vec![2.0], vec![f64::INFINITY], vec![-1.0], vec![2.0]];
        let points: Vec<&[f64]> = values.iter().map(Vec::as_slice).collect();
        assert_eq!(ranks_single(&points), vec![2, 3, 1, 2]);
    }

    #[test]
    fn test_bi_staircase() {
        let values: Vec<Vec<f64>> = vec![
            vec![3.0, 3.0],
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![1.0, 3.0],
            vec![3.0, 1.0],
            vec![1.0, 1.0],
        ];
        let points: Vec<&[f64]> = values.iter().map(Vec::as_slice).collect();
        assert_eq!(ranks_bi(&points), vec![3, 1, 2, 2, 2, 1]);
    }
}
