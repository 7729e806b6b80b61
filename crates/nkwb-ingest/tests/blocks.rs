//! Properties of the block extractor.

use std::ops::Range;

use proptest::prelude::*;

use nkwb_ingest::find_blocks;

fn mask_and_bound() -> impl Strategy<Value = (Vec<bool>, Range<usize>)> {
    prop::collection::vec(any::<bool>(), 0..64).prop_flat_map(|mask| {
        let len = mask.len();
        (Just(mask), 0..=len, 0..=len).prop_map(|(mask, a, b)| (mask, a.min(b)..a.max(b)))
    })
}

proptest! {
    #[test]
    fn blocks_are_ascending_and_disjoint(mask in prop::collection::vec(any::<bool>(), 0..64)) {
        let blocks = find_blocks(&mask, None);
        for pair in blocks.windows(2) {
            // A gap of at least one false row separates consecutive blocks.
            prop_assert!(pair[0].end < pair[1].start);
        }
        for block in &blocks {
            prop_assert!(block.start < block.end);
        }
    }

    #[test]
    fn blocks_cover_exactly_the_true_rows(mask in prop::collection::vec(any::<bool>(), 0..64)) {
        let covered: Vec<usize> = find_blocks(&mask, None).into_iter().flatten().collect();
        let expected: Vec<usize> = (0..mask.len()).filter(|&idx| mask[idx]).collect();
        prop_assert_eq!(covered, expected);
    }

    #[test]
    fn bounded_blocks_stay_inside_bound((mask, bound) in mask_and_bound()) {
        let blocks = find_blocks(&mask, Some(bound.clone()));
        let covered: Vec<usize> = blocks.iter().cloned().flatten().collect();
        let expected: Vec<usize> = bound.clone().filter(|&idx| mask[idx]).collect();
        prop_assert_eq!(covered, expected);
        for block in &blocks {
            prop_assert!(bound.start <= block.start && block.end <= bound.end);
        }
    }
}

#[test]
fn reference_masks() {
    let t = true;
    let f = false;
    assert_eq!(find_blocks(&[t, t, f, t, t], None), vec![0..2, 3..5]);
    assert_eq!(find_blocks(&[f, f, t, t, t], None), vec![2..5]);
    assert_eq!(find_blocks(&[t, f, t, f, f, t], None), vec![0..1, 2..3, 5..6]);
    assert_eq!(find_blocks(&[t; 6], None), vec![0..6]);
    assert_eq!(find_blocks(&[f; 6], None), Vec::<Range<usize>>::new());
}

#[test]
fn run_open_at_bound_end_closes_there() {
    let mask = [true; 8];
    assert_eq!(find_blocks(&mask, Some(2..5)), vec![2..5]);
}
