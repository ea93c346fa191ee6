use super::Word;
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

/// ## Machine instruction set
///
/// The opcode is the low two decimal digits of an instruction word.
/// The digits above it select an addressing mode for each parameter,
/// hundreds for the first, thousands for the second, and so on.
///
/// For example: `1002,4,3,4` is `Multiply` with modes `[0, 1, 0]`,
/// storing `mem[4] * 3` into `mem[4]`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // *** Arithmetic
    Add,
    Multiply,
    // *** I/O
    /// Store the next input value.
    Input,
    /// Emit a value to the output queue.
    Output,
    // *** Branch control
    JumpIfTrue,
    JumpIfFalse,
    // *** Comparison
    LessThan,
    Equals,
    // *** Registers
    /// Adjust the relative base.
    BaseOffset,
    Halt,
}

impl Opcode {
    pub fn code(self) -> Word {
        use Opcode::*;
        match self {
            Add => 1,
            Multiply => 2,
            Input => 3,
            Output => 4,
            JumpIfTrue => 5,
            JumpIfFalse => 6,
            LessThan => 7,
            Equals => 8,
            BaseOffset => 9,
            Halt => 99,
        }
    }

    /// Number of parameter cells following the instruction word.
    pub fn arity(self) -> usize {
        use Opcode::*;
        match self {
            Halt => 0,
            Input | Output | BaseOffset => 1,
            JumpIfTrue | JumpIfFalse => 2,
            Add | Multiply | LessThan | Equals => 3,
        }
    }

    /// Cells occupied by the instruction, including the instruction word.
    pub fn width(self) -> usize {
        self.arity() + 1
    }
}

impl TryFrom<Word> for Opcode {
    type Error = Error;

    fn try_from(code: Word) -> Result<Opcode, Error> {
        use Opcode::*;
        Ok(match code {
            1 => Add,
            2 => Multiply,
            3 => Input,
            4 => Output,
            5 => JumpIfTrue,
            6 => JumpIfFalse,
            7 => LessThan,
            8 => Equals,
            9 => BaseOffset,
            99 => Halt,
            _ => return Err(error!(DecodeError; "UNKNOWN OPCODE").with_value(code)),
        })
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Add => write!(f, "ADD"),
            Multiply => write!(f, "MUL"),
            Input => write!(f, "IN"),
            Output => write!(f, "OUT"),
            JumpIfTrue => write!(f, "JNZ"),
            JumpIfFalse => write!(f, "JZ"),
            LessThan => write!(f, "LT"),
            Equals => write!(f, "EQ"),
            BaseOffset => write!(f, "ARB"),
            Halt => write!(f, "HALT"),
        }
    }
}
