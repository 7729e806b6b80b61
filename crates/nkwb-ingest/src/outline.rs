//! Row outline levels.
//!
//! The export groups rows with spreadsheet outlines: level 0 rows belong to a
//! patient, level 1 rows to its EEG section and level 2 rows to its video
//! section. Rows without grouping metadata (headers, separators) are
//! ungrouped and reported as `None`.

use crate::sheet::Sheet;

/// Outline level of every row of `sheet`.
///
/// Row 0 is the sheet header and is always ungrouped, whatever its metadata
/// says. No consistency check is done here.
pub fn outline_levels(sheet: &Sheet) -> Vec<Option<u8>> {
    let mut levels: Vec<Option<u8>> = (0..sheet.row_count())
        .map(|row| sheet.outline_level(row))
        .collect();
    if let Some(first) = levels.first_mut() {
        *first = None;
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CellValue;

    #[test]
    fn first_row_is_forced_ungrouped() {
        let mut sheet = Sheet::new();
        sheet.push_row(vec![CellValue::from("ID")], Some(0));
        sheet.push_row(vec![CellValue::from("S1")], Some(0));
        sheet.push_row(Vec::new(), None);
        sheet.push_row(Vec::new(), Some(2));

        assert_eq!(outline_levels(&sheet), vec![None, Some(0), None, Some(2)]);
    }

    #[test]
    fn empty_sheet_has_no_levels() {
        assert!(outline_levels(&Sheet::new()).is_empty());
    }
}
