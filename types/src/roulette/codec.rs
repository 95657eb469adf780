//! Binary encoding of strategy state.
//!
//! Hosts that persist state compactly (instead of as JSON) use the
//! `commonware-codec` traits implemented here. Every decoded value is
//! re-validated against the board layout, and vector lengths are bounded.
//!
//! Bet layout: `[kind:u8] [selector...]` where the selector is one byte for
//! straight/street/line/column/dozen/even-money, two for split, four for corner.

use super::{
    Bet, BetKind, EvenMoney, Mode, SessionWatermark, SpinRecord, StrategyState, WagerRequest,
    MAX_COVERAGE, MAX_LEGS,
};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, ReadRangeExt, Write};

impl Write for Bet {
    fn write(&self, writer: &mut impl BufMut) {
        (self.kind() as u8).write(writer);
        match self {
            Bet::Straight(n) | Bet::Street(n) | Bet::Line(n) | Bet::Column(n) | Bet::Dozen(n) => {
                n.write(writer)
            }
            Bet::Split(numbers) => writer.put_slice(numbers),
            Bet::Corner(numbers) => writer.put_slice(numbers),
            Bet::EvenMoney(region) => (*region as u8).write(writer),
        }
    }
}

impl Read for Bet {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let kind = u8::read(reader)?;
        let bet = match kind {
            k if k == BetKind::Straight as u8 => Bet::Straight(u8::read(reader)?),
            k if k == BetKind::Split as u8 => Bet::Split([u8::read(reader)?, u8::read(reader)?]),
            k if k == BetKind::Street as u8 => Bet::Street(u8::read(reader)?),
            k if k == BetKind::Corner as u8 => Bet::Corner([
                u8::read(reader)?,
                u8::read(reader)?,
                u8::read(reader)?,
                u8::read(reader)?,
            ]),
            k if k == BetKind::Line as u8 => Bet::Line(u8::read(reader)?),
            k if k == BetKind::Column as u8 => Bet::Column(u8::read(reader)?),
            k if k == BetKind::Dozen as u8 => Bet::Dozen(u8::read(reader)?),
            k if k == BetKind::EvenMoney as u8 => {
                let region = u8::read(reader)?;
                Bet::EvenMoney(EvenMoney::try_from(region).map_err(Error::InvalidEnum)?)
            }
            other => return Err(Error::InvalidEnum(other)),
        };
        bet.validate()
            .map_err(|_| Error::Invalid("Bet", "selector not on the board"))
    }
}

impl EncodeSize for Bet {
    fn encode_size(&self) -> usize {
        1 + match self {
            Bet::Split(_) => 2,
            Bet::Corner(_) => 4,
            _ => 1,
        }
    }
}

impl Write for WagerRequest {
    fn write(&self, writer: &mut impl BufMut) {
        self.bet.write(writer);
        self.amount.write(writer);
    }
}

impl Read for WagerRequest {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            bet: Bet::read(reader)?,
            amount: u64::read(reader)?,
        })
    }
}

impl EncodeSize for WagerRequest {
    fn encode_size(&self) -> usize {
        self.bet.encode_size() + self.amount.encode_size()
    }
}

impl Write for SpinRecord {
    fn write(&self, writer: &mut impl BufMut) {
        self.number().write(writer);
    }
}

impl Read for SpinRecord {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let number = u8::read(reader)?;
        SpinRecord::new(number).map_err(|_| Error::Invalid("SpinRecord", "pocket not on the board"))
    }
}

impl FixedSize for SpinRecord {
    const SIZE: usize = 1;
}

impl Write for Mode {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Mode {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        Mode::try_from(value).map_err(Error::InvalidEnum)
    }
}

impl FixedSize for Mode {
    const SIZE: usize = 1;
}

impl Write for SessionWatermark {
    fn write(&self, writer: &mut impl BufMut) {
        self.starting_bankroll.write(writer);
        self.high_water_mark.write(writer);
    }
}

impl Read for SessionWatermark {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            starting_bankroll: u64::read(reader)?,
            high_water_mark: u64::read(reader)?,
        })
    }
}

impl FixedSize for SessionWatermark {
    const SIZE: usize = 16;
}

impl Write for StrategyState {
    fn write(&self, writer: &mut impl BufMut) {
        self.initialized.write(writer);
        (self.level as u64).write(writer);
        self.watermark.write(writer);
        self.mode.write(writer);
        self.coverage.write(writer);
        self.consecutive_losses.write(writer);
        self.consecutive_wins.write(writer);
        self.last_wagers.write(writer);
        self.shadow_wagers.write(writer);
        self.gate_run.write(writer);
        self.gate_sector.write(writer);
        self.spins_observed.write(writer);
    }
}

impl Read for StrategyState {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            initialized: bool::read(reader)?,
            level: usize::try_from(u64::read(reader)?)
                .map_err(|_| Error::Invalid("StrategyState", "level out of range"))?,
            watermark: SessionWatermark::read(reader)?,
            mode: Mode::read(reader)?,
            coverage: Vec::<Bet>::read_range(reader, 0..=MAX_COVERAGE)?,
            consecutive_losses: u32::read(reader)?,
            consecutive_wins: u32::read(reader)?,
            last_wagers: Vec::<WagerRequest>::read_range(reader, 0..=MAX_LEGS)?,
            shadow_wagers: Vec::<WagerRequest>::read_range(reader, 0..=MAX_LEGS)?,
            gate_run: u32::read(reader)?,
            gate_sector: Option::<u8>::read(reader)?,
            spins_observed: u64::read(reader)?,
        })
    }
}

impl EncodeSize for StrategyState {
    fn encode_size(&self) -> usize {
        self.initialized.encode_size()
            + (self.level as u64).encode_size()
            + self.watermark.encode_size()
            + self.mode.encode_size()
            + self.coverage.encode_size()
            + self.consecutive_losses.encode_size()
            + self.consecutive_wins.encode_size()
            + self.last_wagers.encode_size()
            + self.shadow_wagers.encode_size()
            + self.gate_run.encode_size()
            + self.gate_sector.encode_size()
            + self.spins_observed.encode_size()
    }
}
