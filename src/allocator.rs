//! Window identity allocation.

use crate::types::WindowId;

/// Returns the smallest positive identity not present in `live`.
///
/// Sorts the live set ascending and folds from 1, advancing the candidate
/// past every identity equal to it; the first gap (or one past the maximum
/// when the set is dense) wins. Closing window 2 while window 3 stays live
/// makes 2 the next allocation, so the identity space never grows past the
/// number of simultaneously open windows.
pub fn next_window_id(live: &[WindowId]) -> WindowId {
    let mut taken = live.to_vec();
    taken.sort_unstable();
    taken.into_iter().fold(1, |candidate, id| {
        if id == candidate {
            candidate + 1
        } else {
            candidate
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_allocates_one() {
        assert_eq!(next_window_id(&[]), 1);
    }

    #[test]
    fn test_dense_set_allocates_past_maximum() {
        assert_eq!(next_window_id(&[1, 2, 3]), 4);
    }

    #[test]
    fn test_gap_at_start_is_filled_first() {
        assert_eq!(next_window_id(&[2, 3]), 1);
    }

    #[test]
    fn test_interior_gap_is_filled() {
        assert_eq!(next_window_id(&[1, 3]), 2);
    }

    #[test]
    fn test_order_of_live_set_is_irrelevant() {
        assert_eq!(next_window_id(&[4, 1, 2]), 3);
    }

    #[test]
    fn test_duplicates_do_not_skip_candidates() {
        assert_eq!(next_window_id(&[1, 1, 2]), 3);
    }
}
