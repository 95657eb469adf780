/// Highest numbered pocket on the board.
pub const MAX_NUMBER: u8 = 36;

/// Sentinel pocket standing in for `00` on American wheels.
pub const DOUBLE_ZERO: u8 = 37;

/// Red numbers on a roulette wheel.
pub const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Maximum number of wager legs accepted when decoding persisted state.
pub const MAX_LEGS: usize = 64;

/// Maximum number of coverage positions accepted when decoding persisted state.
pub const MAX_COVERAGE: usize = 64;
