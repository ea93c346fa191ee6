use super::{Address, Instruction, Memory, Word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Code(Instruction),
    /// A cell that does not decode as an instruction.
    Data(Word),
}

/// ## Disassembly of a memory image
///
/// Walks the loaded image from address zero. Cells that do not decode
/// are listed as data and the walk resumes at the next cell, so data
/// tables embedded in a program only cost a few odd lines.

#[derive(Debug, Clone, Default)]
pub struct Listing {
    entries: Vec<(Address, Entry)>,
}

impl Listing {
    pub fn new(memory: &Memory) -> Listing {
        let mut entries = vec![];
        let mut pos = 0;
        while pos < memory.len() {
            match Instruction::decode(memory, pos) {
                Ok(instruction) => {
                    entries.push((pos, Entry::Code(instruction)));
                    pos += instruction.width();
                }
                Err(_) => {
                    entries.push((pos, Entry::Data(memory.get(pos))));
                    pos += 1;
                }
            }
        }
        Listing { entries }
    }

    pub fn entries(&self) -> &[(Address, Entry)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let width = self
            .entries
            .last()
            .map_or(1, |(addr, _)| addr.to_string().len());
        for (addr, entry) in &self.entries {
            match entry {
                Entry::Code(instruction) => writeln!(f, "{:>w$}: {}", addr, instruction, w = width)?,
                Entry::Data(value) => writeln!(f, "{:>w$}: DATA {}", addr, value, w = width)?,
            }
        }
        Ok(())
    }
}
