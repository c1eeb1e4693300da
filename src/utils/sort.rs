use std::cmp::Ordering;

/// Sort by descending score, treating scores closer than `epsilon` as equal
///
/// Tied runs are ordered by `tie_break`. A tie run is anchored at its
/// highest score: every member lies within `epsilon` of the first one.
/// Plain `sort_by` with an epsilon comparator is not a total order, so the
/// work is split into a total-order pass and per-run passes.
pub fn sort_desc_with_tolerance<T, S, B>(items: &mut [T], epsilon: f64, score: S, mut tie_break: B)
where
    S: Fn(&T) -> f64,
    B: FnMut(&T, &T) -> Ordering,
{
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));

    let mut start = 0;
    for i in 1..=items.len() {
        let run_ends = i == items.len() || score(&items[start]) - score(&items[i]) >= epsilon;
        if run_ends {
            if i - start > 1 {
                items[start..i].sort_by(&mut tie_break);
            }
            start = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(mut items: Vec<(f64, i32)>) -> Vec<(f64, i32)> {
        sort_desc_with_tolerance(&mut items, 1e-6, |item| item.0, |a, b| b.1.cmp(&a.1));
        items
    }

    #[test]
    fn handles_empty_and_single() {
        assert!(rank(vec![]).is_empty());
        assert_eq!(rank(vec![(1.0, 1)]), vec![(1.0, 1)]);
    }

    #[test]
    fn orders_by_score_then_tie_break() {
        let ranked = rank(vec![(0.1, 5), (0.5, 1), (0.5 + 1e-9, 3), (0.3, 9)]);
        let ratings: Vec<i32> = ranked.iter().map(|item| item.1).collect();
        assert_eq!(ratings, [3, 1, 9, 5]);

        let ranked = rank(vec![(0.5, 1), (0.5 - 1e-9, 3)]);
        assert_eq!(ranked[0].1, 3);
    }

    #[test]
    fn distinct_scores_are_not_tied() {
        let ranked = rank(vec![(0.2, 9), (0.4, 1)]);
        assert_eq!(ranked, vec![(0.4, 1), (0.2, 9)]);
    }

    #[test]
    fn tie_runs_are_anchored_at_the_top() {
        // 0.3 and 0.3 - 0.8e-6 tie, the third value is 1.6e-6 below the top and starts a new run
        let ranked = rank(vec![(0.3 - 1.6e-6, 9), (0.3 - 0.8e-6, 5), (0.3, 1)]);
        let ratings: Vec<i32> = ranked.iter().map(|item| item.1).collect();
        assert_eq!(ratings, [5, 1, 9]);
    }
}
