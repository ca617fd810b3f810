// 🔲 Lo Shu Grid - 3x3 digit placement
//
//   4 9 2        cell indices   0 1 2
//   3 5 7                       3 4 5
//   8 1 6                       6 7 8
//
// Each digit 1-9 owns one cell. Repeated digits pile up in their cell.

use crate::date::BirthDate;
use crate::reducer::is_master;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in a cell that received no digits
pub const EMPTY_CELL: &str = "-";

/// Cell index (row-major, 0-based) for digits 1..=9. Index 0 is unused.
pub const PLACEMENT: [Option<usize>; 10] = [
    None,    // 0 is never placed
    Some(7), // 1
    Some(2), // 2
    Some(3), // 3
    Some(1), // 4
    Some(4), // 5
    Some(8), // 6
    Some(5), // 7
    Some(6), // 8
    Some(0), // 9
];

/// Cell index for a digit, or None for 0 and anything above 9
pub fn cell_for(digit: u32) -> Option<usize> {
    PLACEMENT.get(digit as usize).copied().flatten()
}

// ============================================================================
// GRID
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoShuGrid {
    cells: [String; 9],
}

impl LoShuGrid {
    /// Raw cell contents, empty string where nothing landed
    pub fn raw_cells(&self) -> &[String; 9] {
        &self.cells
    }

    /// Display text of one cell (placeholder when empty)
    pub fn cell(&self, index: usize) -> &str {
        match self.cells.get(index) {
            Some(c) if !c.is_empty() => c.as_str(),
            _ => EMPTY_CELL,
        }
    }

    /// All nine cells as display text
    pub fn cells(&self) -> Vec<String> {
        (0..9).map(|i| self.cell(i).to_string()).collect()
    }

    /// Display text as three rows of three
    pub fn rows(&self) -> [[&str; 3]; 3] {
        [
            [self.cell(0), self.cell(1), self.cell(2)],
            [self.cell(3), self.cell(4), self.cell(5)],
            [self.cell(6), self.cell(7), self.cell(8)],
        ]
    }

    /// How many times `digit` was placed
    pub fn count(&self, digit: u32) -> usize {
        cell_for(digit)
            .map(|i| self.cells[i].len())
            .unwrap_or(0)
    }

    /// Digits 1-9 that never appeared
    pub fn missing(&self) -> Vec<u32> {
        (1..=9).filter(|d| self.count(*d) == 0).collect()
    }
}

impl fmt::Display for LoShuGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (0..9).map(|i| self.cell(i).len()).max().unwrap_or(1);
        for (r, row) in self.rows().iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|c| format!("{:^width$}", c)).collect();
            write!(f, "| {} |", line.join(" | "))?;
        }
        Ok(())
    }
}

/// Place each digit into its cell, in input order.
/// 0 and values outside 1-9 are dropped.
pub fn build_grid(digits: &[u32]) -> LoShuGrid {
    let mut cells: [String; 9] = Default::default();

    for &d in digits {
        if let Some(index) = cell_for(d) {
            cells[index].push_str(&d.to_string());
        }
    }

    LoShuGrid { cells }
}

/// Grid input for a calculation: the date digits, then moolank, bhagyank
/// and destiny. A master number (11, 22) goes in as its two digits.
pub fn grid_digits(date: &BirthDate, moolank: u32, bhagyank: u32, destiny: u32) -> Vec<u32> {
    let mut digits = date.digits();

    for value in [moolank, bhagyank, destiny] {
        if is_master(value) {
            digits.push(value / 10);
            digits.push(value % 10);
        } else {
            digits.push(value);
        }
    }

    digits
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_is_bijection() {
        let mut seen = [false; 9];
        for d in 1..=9 {
            let i = cell_for(d).unwrap();
            assert!(!seen[i], "cell {} assigned twice", i);
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(cell_for(0), None);
        assert_eq!(cell_for(10), None);
    }

    #[test]
    fn test_build_grid_from_birth_date() {
        let grid = build_grid(&[1, 9, 9, 0, 0, 5, 1, 5, 6, 3, 3]);

        assert_eq!(grid.cell(7), "11");
        assert_eq!(grid.cell(0), "99");
        assert_eq!(grid.cell(4), "55");
        assert_eq!(grid.cell(8), "6");
        assert_eq!(grid.cell(3), "33");
        for i in [1, 2, 5, 6] {
            assert_eq!(grid.cell(i), EMPTY_CELL, "cell {} should be empty", i);
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = build_grid(&[]);
        assert_eq!(grid.cells(), vec!["-"; 9]);
        assert_eq!(grid.missing(), (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let grid = build_grid(&[0, 11, 22, 10, 4]);
        assert_eq!(grid.cell(1), "4");
        assert_eq!(grid.missing().len(), 8);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let input = [2, 0, 2, 4, 7, 7, 8];
        assert_eq!(build_grid(&input), build_grid(&input));
    }

    #[test]
    fn test_counts_and_rows() {
        let grid = build_grid(&[4, 9, 2, 2, 2]);
        assert_eq!(grid.count(2), 3);
        assert_eq!(grid.count(5), 0);
        assert_eq!(grid.rows()[0], ["4", "9", "222"]);
        assert_eq!(grid.rows()[2], ["-", "-", "-"]);
    }

    #[test]
    fn test_grid_digits_splits_master_numbers() {
        let date = BirthDate::parse("1985-03-29").unwrap();
        let digits = grid_digits(&date, 11, 22, 9);
        assert_eq!(digits, vec![1, 9, 8, 5, 0, 3, 2, 9, 1, 1, 2, 2, 9]);
    }

    #[test]
    fn test_display() {
        let grid = build_grid(&[4, 9, 2, 3, 5, 7, 8, 1, 6]);
        assert_eq!(grid.to_string(), "| 4 | 9 | 2 |\n| 3 | 5 | 7 |\n| 8 | 1 | 6 |");
    }
}
