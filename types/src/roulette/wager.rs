use super::{
    column, dozen, is_line_start, is_red, is_street_start, is_valid_pocket, is_zero,
    normalize_corner, normalize_split, street, LayoutError, Sector, MAX_NUMBER,
};
use serde::{Deserialize, Serialize};

/// Even-money regions.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvenMoney {
    Red = 0,
    Black = 1,
    Odd = 2,
    Even = 3,
    Low = 4,
    High = 5,
}

impl EvenMoney {
    /// Check if a non-zero number lands in this region.
    fn contains(self, number: u8) -> bool {
        match self {
            EvenMoney::Red => is_red(number),
            EvenMoney::Black => !is_red(number),
            EvenMoney::Odd => number % 2 == 1,
            EvenMoney::Even => number % 2 == 0,
            EvenMoney::Low => (1..=18).contains(&number),
            EvenMoney::High => (19..=MAX_NUMBER).contains(&number),
        }
    }
}

impl TryFrom<u8> for EvenMoney {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EvenMoney::Red),
            1 => Ok(EvenMoney::Black),
            2 => Ok(EvenMoney::Odd),
            3 => Ok(EvenMoney::Even),
            4 => Ok(EvenMoney::Low),
            5 => Ok(EvenMoney::High),
            other => Err(other),
        }
    }
}

/// Roulette bet kinds.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetKind {
    Straight = 0,  // Single number (35:1)
    Split = 1,     // Two adjacent numbers (17:1)
    Street = 2,    // Row of three (11:1)
    Corner = 3,    // Block of four (8:1)
    Line = 4,      // Two rows (5:1)
    Column = 5,    // 2:1
    Dozen = 6,     // 2:1
    EvenMoney = 7, // 1:1
}

impl BetKind {
    /// Outside bets are bounded below by the table's outside minimum.
    pub fn is_outside(self) -> bool {
        matches!(self, BetKind::Column | BetKind::Dozen | BetKind::EvenMoney)
    }

    /// Get the payout multiplier for a bet kind (excludes original bet).
    pub fn payout(self) -> u64 {
        match self {
            BetKind::Straight => 35,
            BetKind::Split => 17,
            BetKind::Street => 11,
            BetKind::Corner => 8,
            BetKind::Line => 5,
            BetKind::Column | BetKind::Dozen => 2,
            BetKind::EvenMoney => 1,
        }
    }
}

/// A position on the board, tagged by kind.
///
/// Each variant carries only the selector valid for its kind. Values built
/// through the constructors (or deserialized) are always normalised and on the
/// board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawBet", into = "RawBet")]
pub enum Bet {
    Straight(u8),
    Split([u8; 2]),
    Street(u8),
    Corner([u8; 4]),
    Line(u8),
    Column(u8),
    Dozen(u8),
    EvenMoney(EvenMoney),
}

impl Bet {
    pub fn straight(number: u8) -> Result<Self, LayoutError> {
        Bet::Straight(number).validate()
    }

    pub fn split(a: u8, b: u8) -> Result<Self, LayoutError> {
        Bet::Split([a, b]).validate()
    }

    pub fn street(start: u8) -> Result<Self, LayoutError> {
        Bet::Street(start).validate()
    }

    pub fn corner(numbers: [u8; 4]) -> Result<Self, LayoutError> {
        Bet::Corner(numbers).validate()
    }

    pub fn line(start: u8) -> Result<Self, LayoutError> {
        Bet::Line(start).validate()
    }

    pub fn column(column: u8) -> Result<Self, LayoutError> {
        Bet::Column(column).validate()
    }

    pub fn dozen(dozen: u8) -> Result<Self, LayoutError> {
        Bet::Dozen(dozen).validate()
    }

    /// The outside bet covering region `index` of a sector family.
    pub fn for_sector(sector: Sector, index: u8) -> Result<Self, LayoutError> {
        let region = |a, b| match index {
            1 => Ok(Bet::EvenMoney(a)),
            2 => Ok(Bet::EvenMoney(b)),
            value => Err(LayoutError::InvalidThird { kind: "region", value }),
        };
        match sector {
            Sector::Dozen => Bet::dozen(index),
            Sector::Column => Bet::column(index),
            Sector::Color => region(EvenMoney::Red, EvenMoney::Black),
            Sector::Parity => region(EvenMoney::Odd, EvenMoney::Even),
            Sector::Half => region(EvenMoney::Low, EvenMoney::High),
        }
    }

    /// Normalise the selector and check it describes a real position.
    pub fn validate(self) -> Result<Self, LayoutError> {
        match self {
            Bet::Straight(n) if is_valid_pocket(n) => Ok(self),
            Bet::Straight(n) => Err(LayoutError::InvalidPocket(n)),
            Bet::Split(numbers) => normalize_split(numbers).map(Bet::Split),
            Bet::Street(start) if is_street_start(start) => Ok(self),
            Bet::Street(start) => Err(LayoutError::InvalidStreet(start)),
            Bet::Corner(numbers) => normalize_corner(numbers).map(Bet::Corner),
            Bet::Line(start) if is_line_start(start) => Ok(self),
            Bet::Line(start) => Err(LayoutError::InvalidLine(start)),
            Bet::Column(c) if (1..=3).contains(&c) => Ok(self),
            Bet::Column(value) => Err(LayoutError::InvalidThird { kind: "column", value }),
            Bet::Dozen(d) if (1..=3).contains(&d) => Ok(self),
            Bet::Dozen(value) => Err(LayoutError::InvalidThird { kind: "dozen", value }),
            Bet::EvenMoney(_) => Ok(self),
        }
    }

    pub fn kind(&self) -> BetKind {
        match self {
            Bet::Straight(_) => BetKind::Straight,
            Bet::Split(_) => BetKind::Split,
            Bet::Street(_) => BetKind::Street,
            Bet::Corner(_) => BetKind::Corner,
            Bet::Line(_) => BetKind::Line,
            Bet::Column(_) => BetKind::Column,
            Bet::Dozen(_) => BetKind::Dozen,
            Bet::EvenMoney(_) => BetKind::EvenMoney,
        }
    }

    /// Check if this position wins for a given result.
    pub fn covers(&self, result: u8) -> bool {
        // Zero loses all except bets explicitly including it
        if is_zero(result) {
            return match self {
                Bet::Straight(n) => *n == result,
                Bet::Split(numbers) => numbers.contains(&result),
                Bet::Corner(numbers) => numbers.contains(&result),
                _ => false,
            };
        }

        match self {
            Bet::Straight(n) => *n == result,
            Bet::Split(numbers) => numbers.contains(&result),
            Bet::Street(start) => street(result) == Some(*start),
            Bet::Corner(numbers) => numbers.contains(&result),
            Bet::Line(start) => {
                street(result).is_some_and(|row| row == *start || row == *start + 3)
            }
            Bet::Column(c) => column(result) == Some(*c),
            Bet::Dozen(d) => dozen(result) == Some(*d),
            Bet::EvenMoney(region) => region.contains(result),
        }
    }
}

/// Serialized shape of [Bet]; validated on the way in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawBet {
    Straight(u8),
    Split([u8; 2]),
    Street(u8),
    Corner([u8; 4]),
    Line(u8),
    Column(u8),
    Dozen(u8),
    EvenMoney(EvenMoney),
}

impl TryFrom<RawBet> for Bet {
    type Error = LayoutError;

    fn try_from(raw: RawBet) -> Result<Self, Self::Error> {
        let bet = match raw {
            RawBet::Straight(n) => Bet::Straight(n),
            RawBet::Split(numbers) => Bet::Split(numbers),
            RawBet::Street(start) => Bet::Street(start),
            RawBet::Corner(numbers) => Bet::Corner(numbers),
            RawBet::Line(start) => Bet::Line(start),
            RawBet::Column(c) => Bet::Column(c),
            RawBet::Dozen(d) => Bet::Dozen(d),
            RawBet::EvenMoney(region) => Bet::EvenMoney(region),
        };
        bet.validate()
    }
}

impl From<Bet> for RawBet {
    fn from(bet: Bet) -> Self {
        match bet {
            Bet::Straight(n) => RawBet::Straight(n),
            Bet::Split(numbers) => RawBet::Split(numbers),
            Bet::Street(start) => RawBet::Street(start),
            Bet::Corner(numbers) => RawBet::Corner(numbers),
            Bet::Line(start) => RawBet::Line(start),
            Bet::Column(c) => RawBet::Column(c),
            Bet::Dozen(d) => RawBet::Dozen(d),
            Bet::EvenMoney(region) => RawBet::EvenMoney(region),
        }
    }
}

/// A single wager leg returned to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WagerRequest {
    pub bet: Bet,
    pub amount: u64,
}

impl WagerRequest {
    pub fn new(bet: Bet, amount: u64) -> Self {
        Self { bet, amount }
    }

    pub fn kind(&self) -> BetKind {
        self.bet.kind()
    }

    /// Total returned (stake plus winnings) if this leg wins on `result`.
    pub fn settle(&self, result: u8) -> u64 {
        if self.bet.covers(result) {
            self.amount
                .saturating_mul(self.kind().payout().saturating_add(1))
        } else {
            0
        }
    }
}
