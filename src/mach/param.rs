use super::{Memory, Word};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The raw value is an absolute address.
    Position,
    /// The raw value is the operand.
    Immediate,
    /// The raw value is an offset from the relative base.
    Relative,
}

impl TryFrom<Word> for Mode {
    type Error = Error;

    fn try_from(digit: Word) -> Result<Mode> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            _ => Err(error!(DecodeError; "UNKNOWN MODE").with_value(digit)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub raw: Word,
    pub mode: Mode,
}

impl Param {
    pub fn new(raw: Word, mode: Mode) -> Param {
        Param { raw, mode }
    }

    /// Operand value of this parameter.
    pub fn read(&self, memory: &Memory, base: Word) -> Result<Word> {
        match self.mode {
            Mode::Immediate => Ok(self.raw),
            Mode::Position | Mode::Relative => memory.read(self.target(base)?),
        }
    }

    /// Address this parameter writes to. Immediate parameters cannot be written.
    pub fn target(&self, base: Word) -> Result<Word> {
        match self.mode {
            Mode::Position => Ok(self.raw),
            Mode::Relative => self
                .raw
                .checked_add(base)
                .ok_or_else(|| error!(InvalidAddress; "ADDRESS OVERFLOW").with_value(self.raw)),
            Mode::Immediate => Err(error!(InvalidWriteTarget).with_value(self.raw)),
        }
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.mode {
            Mode::Position => write!(f, "[{}]", self.raw),
            Mode::Immediate => write!(f, "#{}", self.raw),
            Mode::Relative if self.raw < 0 => write!(f, "[base{}]", self.raw),
            Mode::Relative => write!(f, "[base+{}]", self.raw),
        }
    }
}
