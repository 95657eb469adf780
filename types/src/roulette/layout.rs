//! Static knowledge of the roulette board.
//!
//! The table is laid out as twelve rows of three:
//!
//! ```text
//!  0 |  1  2  3 |  4  5  6 | ... | 34 35 36
//!      col1 col2 col3
//! ```
//!
//! Rows are streets (identified by their first number), pairs of rows are
//! lines, and any 2x2 block is a corner. `0` (and the `00` sentinel) sit outside
//! every row, column, dozen and even-money region.

use super::{DOUBLE_ZERO, MAX_NUMBER, RED_NUMBERS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a pocket or selector does not describe a position on the board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("pocket {0} is not on the board")]
    InvalidPocket(u8),
    #[error("split {0:?} is not two adjacent pockets")]
    InvalidSplit([u8; 2]),
    #[error("street must start at 1, 4, ..., 34 (got {0})")]
    InvalidStreet(u8),
    #[error("line must start at 1, 4, ..., 31 (got {0})")]
    InvalidLine(u8),
    #[error("corner {0:?} is not a square of four pockets")]
    InvalidCorner([u8; 4]),
    #[error("{kind} must be 1, 2 or 3 (got {value})")]
    InvalidThird { kind: &'static str, value: u8 },
}

/// Pocket colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Green,
    Red,
    Black,
}

/// A family of board regions that partition the non-zero pockets.
///
/// Used by triggers ("three spins in the same dozen") and by targets that
/// follow or count recent results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    /// 1-12, 13-24, 25-36 (indices 1..=3).
    Dozen,
    /// Columns 1..=3.
    Column,
    /// Red = 1, black = 2.
    Color,
    /// Odd = 1, even = 2.
    Parity,
    /// Low (1-18) = 1, high (19-36) = 2.
    Half,
}

impl Sector {
    /// Number of regions in this family.
    pub fn regions(self) -> u8 {
        match self {
            Sector::Dozen | Sector::Column => 3,
            Sector::Color | Sector::Parity | Sector::Half => 2,
        }
    }

    /// Region index (1-based) a pocket falls into, or `None` for zero.
    pub fn locate(self, number: u8) -> Option<u8> {
        if is_zero(number) || number > MAX_NUMBER {
            return None;
        }
        match self {
            Sector::Dozen => dozen(number),
            Sector::Column => column(number),
            Sector::Color => Some(if is_red(number) { 1 } else { 2 }),
            Sector::Parity => Some(if number % 2 == 1 { 1 } else { 2 }),
            Sector::Half => Some(if number <= 18 { 1 } else { 2 }),
        }
    }
}

/// Check if a pocket exists on the board (0-36 or the `00` sentinel).
pub fn is_valid_pocket(number: u8) -> bool {
    number <= MAX_NUMBER || number == DOUBLE_ZERO
}

/// Check if a pocket is `0` or `00`.
pub fn is_zero(number: u8) -> bool {
    number == 0 || number == DOUBLE_ZERO
}

/// Check if a number is red.
pub fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

/// Colour of a pocket.
pub fn color(number: u8) -> Color {
    if is_zero(number) || number > MAX_NUMBER {
        Color::Green
    } else if is_red(number) {
        Color::Red
    } else {
        Color::Black
    }
}

/// Dozen (1-3) of a pocket.
pub fn dozen(number: u8) -> Option<u8> {
    match number {
        1..=MAX_NUMBER => Some((number - 1) / 12 + 1),
        _ => None,
    }
}

/// Column (1-3) of a pocket.
pub fn column(number: u8) -> Option<u8> {
    match number {
        1..=MAX_NUMBER => Some((number - 1) % 3 + 1),
        _ => None,
    }
}

/// First number of the street (row) containing a pocket.
pub fn street(number: u8) -> Option<u8> {
    match number {
        1..=MAX_NUMBER => Some(number - (number - 1) % 3),
        _ => None,
    }
}

/// Check if `start` opens a street (1, 4, ..., 34).
pub fn is_street_start(start: u8) -> bool {
    (1..=34).contains(&start) && (start - 1) % 3 == 0
}

/// Check if `start` opens a line (two adjacent streets, 1, 4, ..., 31).
pub fn is_line_start(start: u8) -> bool {
    is_street_start(start) && start <= 31
}

/// Sort and validate a split.
///
/// Valid splits are horizontally or vertically adjacent numbers, plus `0`
/// paired with 1, 2 or 3.
pub fn normalize_split(numbers: [u8; 2]) -> Result<[u8; 2], LayoutError> {
    let mut sorted = numbers;
    sorted.sort_unstable();
    let [a, b] = sorted;
    let adjacent = match a {
        0 => (1..=3).contains(&b),
        1..=MAX_NUMBER => {
            b <= MAX_NUMBER && (b == a + 3 || (b == a + 1 && a % 3 != 0))
        }
        _ => false,
    };
    if adjacent {
        Ok(sorted)
    } else {
        Err(LayoutError::InvalidSplit(numbers))
    }
}

/// Sort and validate a corner.
///
/// Valid corners are 2x2 blocks `{a, a+1, a+3, a+4}` with `a` not in the third
/// column, plus the `0-1-2-3` first four.
pub fn normalize_corner(numbers: [u8; 4]) -> Result<[u8; 4], LayoutError> {
    let mut sorted = numbers;
    sorted.sort_unstable();
    if sorted == [0, 1, 2, 3] {
        return Ok(sorted);
    }
    let a = sorted[0];
    if (1..=32).contains(&a) && a % 3 != 0 && sorted == [a, a + 1, a + 3, a + 4] {
        Ok(sorted)
    } else {
        Err(LayoutError::InvalidCorner(numbers))
    }
}

/// Every street on the board, by first number.
pub fn all_streets() -> impl Iterator<Item = u8> {
    (0..12u8).map(|row| row * 3 + 1)
}

/// Every line on the board, by first number.
pub fn all_lines() -> impl Iterator<Item = u8> {
    (0..11u8).map(|row| row * 3 + 1)
}

/// Every 2x2 corner on the board (the first four is excluded).
pub fn all_corners() -> impl Iterator<Item = [u8; 4]> {
    (1..=32u8)
        .filter(|a| a % 3 != 0)
        .map(|a| [a, a + 1, a + 3, a + 4])
}

/// Every split between two numbered pockets (zero splits are excluded).
pub fn all_splits() -> impl Iterator<Item = [u8; 2]> {
    let horizontal = (1..MAX_NUMBER).filter(|a| a % 3 != 0).map(|a| [a, a + 1]);
    let vertical = (1..=MAX_NUMBER - 3).map(|a| [a, a + 3]);
    horizontal.chain(vertical)
}
