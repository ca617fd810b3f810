// 🔢 Digit Reducer - Repeated digit sum down to a single digit
// Master numbers 11 and 22 can be kept as terminal values

use serde::{Deserialize, Serialize};

// ============================================================================
// REDUCE MODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReduceMode {
    /// Stop at 11 or 22 instead of collapsing them to 2 or 4
    PreserveMaster,

    /// Always reduce to 1-9 (first-generation calculator behavior)
    Legacy,
}

impl ReduceMode {
    fn halts_at(&self, n: u32) -> bool {
        match self {
            ReduceMode::PreserveMaster => n == 11 || n == 22,
            ReduceMode::Legacy => false,
        }
    }
}

impl Default for ReduceMode {
    fn default() -> Self {
        ReduceMode::PreserveMaster
    }
}

// ============================================================================
// REDUCTION
// ============================================================================

/// Sum of the base-10 digits of `n`
pub fn digit_sum(mut n: u64) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += (n % 10) as u32;
        n /= 10;
    }
    sum
}

/// Reduce `n` by repeated digit sum until it is 9 or less
/// (or a master number, when `mode` preserves them).
///
/// 0 stays 0: the loop never runs for inputs <= 9.
pub fn reduce(mut n: u32, mode: ReduceMode) -> u32 {
    while n > 9 && !mode.halts_at(n) {
        n = digit_sum(u64::from(n));
    }
    n
}

/// True for the two master numbers the reducer can stop at
pub fn is_master(n: u32) -> bool {
    n == 11 || n == 22
}

// ============================================================================
// TESTS
// ============================================================================
