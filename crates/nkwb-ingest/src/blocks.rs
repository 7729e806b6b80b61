//! Maximal runs of rows sharing a property.

use std::ops::Range;

/// Find the maximal contiguous runs of `true` in `mask`.
///
/// Only indices inside `bound` (default: the whole mask) are considered, but
/// they keep their global position, so the returned ranges index `mask`
/// directly. A run still open when the scan ends is closed at `bound.end`,
/// not after its last `true` index.
///
/// ```
/// use nkwb_ingest::find_blocks;
///
/// let mask = [true, true, false, true, true];
/// assert_eq!(find_blocks(&mask, None), vec![0..2, 3..5]);
/// ```
pub fn find_blocks(mask: &[bool], bound: Option<Range<usize>>) -> Vec<Range<usize>> {
    let bound = bound.unwrap_or(0..mask.len());
    let scan_end = bound.end.min(mask.len());

    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;
    for idx in bound.start..scan_end {
        match (mask[idx], open) {
            (true, None) => open = Some(idx),
            (false, Some(start)) => {
                blocks.push(start..idx);
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        blocks.push(start..bound.end);
    }
    blocks
}
