use super::{color, column, dozen, is_valid_pocket, is_zero, street, Color, LayoutError};
use serde::{Deserialize, Serialize};

/// One resolved spin.
///
/// Produced by the host; the derived board regions are cached at construction
/// and the record is never mutated afterwards. Serialized as the bare pocket
/// number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpinRecord {
    number: u8,
    color: Color,
    dozen: Option<u8>,
    column: Option<u8>,
    street: Option<u8>,
}

impl SpinRecord {
    pub fn new(number: u8) -> Result<Self, LayoutError> {
        if !is_valid_pocket(number) {
            return Err(LayoutError::InvalidPocket(number));
        }
        Ok(Self {
            number,
            color: color(number),
            dozen: dozen(number),
            column: column(number),
            street: street(number),
        })
    }

    /// Winning pocket (`37` is the `00` sentinel).
    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn dozen(&self) -> Option<u8> {
        self.dozen
    }

    pub fn column(&self) -> Option<u8> {
        self.column
    }

    pub fn street(&self) -> Option<u8> {
        self.street
    }

    pub fn is_zero(&self) -> bool {
        is_zero(self.number)
    }
}

impl TryFrom<u8> for SpinRecord {
    type Error = LayoutError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        SpinRecord::new(number)
    }
}

impl From<SpinRecord> for u8 {
    fn from(spin: SpinRecord) -> Self {
        spin.number
    }
}
