use super::{Address, Memory, Mode, Opcode, Param, Word};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Decoded instruction
///
/// One variant per opcode, each carrying its parameters in order.
/// Write targets are always the last parameter.
/// Instructions are decoded fresh on every step and never cached,
/// so programs that rewrite their own code behave as written.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Add(Param, Param, Param),
    Multiply(Param, Param, Param),
    Input(Param),
    Output(Param),
    JumpIfTrue(Param, Param),
    JumpIfFalse(Param, Param),
    LessThan(Param, Param, Param),
    Equals(Param, Param, Param),
    BaseOffset(Param),
    Halt,
}

impl Instruction {
    /// Decodes the instruction whose word is at `pos`.
    pub fn decode(memory: &Memory, pos: Address) -> Result<Instruction> {
        let full_code = memory.get(pos);
        let opcode = Opcode::try_from(full_code.rem_euclid(100)).map_err(|e| e.at_address(pos))?;
        let truncated = pos
            .checked_add(opcode.width())
            .map_or(true, |end| end > memory.len());
        if truncated {
            return Err(error!(DecodeError, pos; "TRUNCATED INSTRUCTION").with_value(full_code));
        }
        let param = |i: usize| -> Result<Param> {
            let digit = full_code.div_euclid(10_i64.pow(i as u32 + 2)).rem_euclid(10);
            let mode = Mode::try_from(digit).map_err(|e| e.at_address(pos))?;
            Ok(Param::new(memory.get(pos + 1 + i), mode))
        };
        use Instruction::*;
        Ok(match opcode {
            Opcode::Add => Add(param(0)?, param(1)?, param(2)?),
            Opcode::Multiply => Multiply(param(0)?, param(1)?, param(2)?),
            Opcode::Input => Input(param(0)?),
            Opcode::Output => Output(param(0)?),
            Opcode::JumpIfTrue => JumpIfTrue(param(0)?, param(1)?),
            Opcode::JumpIfFalse => JumpIfFalse(param(0)?, param(1)?),
            Opcode::LessThan => LessThan(param(0)?, param(1)?, param(2)?),
            Opcode::Equals => Equals(param(0)?, param(1)?, param(2)?),
            Opcode::BaseOffset => BaseOffset(param(0)?),
            Opcode::Halt => Halt,
        })
    }

    pub fn opcode(&self) -> Opcode {
        use Instruction::*;
        match self {
            Add(..) => Opcode::Add,
            Multiply(..) => Opcode::Multiply,
            Input(..) => Opcode::Input,
            Output(..) => Opcode::Output,
            JumpIfTrue(..) => Opcode::JumpIfTrue,
            JumpIfFalse(..) => Opcode::JumpIfFalse,
            LessThan(..) => Opcode::LessThan,
            Equals(..) => Opcode::Equals,
            BaseOffset(..) => Opcode::BaseOffset,
            Halt => Opcode::Halt,
        }
    }

    pub fn width(&self) -> usize {
        self.opcode().width()
    }

    pub fn params(&self) -> Vec<Param> {
        use Instruction::*;
        match *self {
            Add(a, b, c) | Multiply(a, b, c) | LessThan(a, b, c) | Equals(a, b, c) => {
                vec![a, b, c]
            }
            JumpIfTrue(a, b) | JumpIfFalse(a, b) => vec![a, b],
            Input(a) | Output(a) | BaseOffset(a) => vec![a],
            Halt => vec![],
        }
    }

    /// Re-encodes the instruction word. Mode digits of unused
    /// parameter slots come back as zero.
    pub fn word(&self) -> Word {
        let modes = self
            .params()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let digit = match p.mode {
                    Mode::Position => 0,
                    Mode::Immediate => 1,
                    Mode::Relative => 2,
                };
                digit * 10_i64.pow(i as u32 + 2)
            })
            .sum::<Word>();
        modes + self.opcode().code()
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let params: Vec<String> = self.params().iter().map(|p| p.to_string()).collect();
        if params.is_empty() {
            write!(f, "{}", self.opcode())
        } else {
            write!(f, "{} {}", self.opcode(), params.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn decode(image: &[Word], pos: Address) -> Result<Instruction> {
        Instruction::decode(&Memory::new(image.to_vec()), pos)
    }

    #[test]
    fn test_decode_modes() {
        let i = decode(&[1002, 4, 3, 4, 33], 0).unwrap();
        assert_eq!(
            i,
            Instruction::Multiply(
                Param::new(4, Mode::Position),
                Param::new(3, Mode::Immediate),
                Param::new(4, Mode::Position),
            )
        );
        assert_eq!(i.to_string(), "MUL [4], #3, [4]");
    }

    #[test]
    fn test_decode_relative() {
        let i = decode(&[109, -34, 204, 7, 99], 2).unwrap();
        assert_eq!(i, Instruction::Output(Param::new(7, Mode::Relative)));
        assert_eq!(decode(&[109, -34], 0).unwrap().width(), 2);
    }

    #[test]
    fn test_decode_halt_ignores_modes() {
        assert_eq!(decode(&[99], 0).unwrap(), Instruction::Halt);
        assert_eq!(decode(&[11199], 0).unwrap(), Instruction::Halt);
    }

    #[test]
    fn test_extra_mode_digits_ignored() {
        // a mode digit past the last parameter is not examined
        let i = decode(&[30104, 5, 99], 0).unwrap();
        assert_eq!(i, Instruction::Output(Param::new(5, Mode::Immediate)));
    }

    #[test]
    fn test_unknown_opcode() {
        let e = decode(&[1, 0, 0, 0, 42], 4).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DecodeError);
        assert_eq!(e.address(), Some(4));
        assert_eq!(e.value(), Some(42));
    }

    #[test]
    fn test_unknown_mode() {
        let e = decode(&[301, 0, 0, 0], 0).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DecodeError);
        assert_eq!(e.value(), Some(3));
    }

    #[test]
    fn test_truncated() {
        let e = decode(&[1, 0, 0], 0).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DecodeError);
        assert_eq!(e.address(), Some(0));
    }

    #[test]
    fn test_word_round_trip() {
        for word in &[1, 1002, 21107, 109, 204, 1105, 99] {
            let image = vec![*word, 0, 0, 0];
            assert_eq!(decode(&image, 0).unwrap().word(), *word);
        }
    }
}
