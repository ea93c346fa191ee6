use super::{Address, Word};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Addressable memory
///
/// The loaded program lives in a dense vector. Cells past its end read as
/// zero until written, and are stored sparsely once they are.
/// Negative addresses are rejected on both read and write.

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Memory {
    dense: Vec<Word>,
    sparse: HashMap<Address, Word>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.dense)?;
        if !self.sparse.is_empty() {
            let mut extra: Vec<_> = self.sparse.iter().collect();
            extra.sort();
            write!(f, " + {:?}", extra)?;
        }
        Ok(())
    }
}

impl From<Vec<Word>> for Memory {
    fn from(dense: Vec<Word>) -> Memory {
        Memory::new(dense)
    }
}

impl Memory {
    pub fn new(dense: Vec<Word>) -> Memory {
        Memory {
            dense,
            sparse: HashMap::new(),
        }
    }

    /// Length of the loaded image. The program counter must stay below it.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// The loaded image, including any writes that landed inside it.
    pub fn image(&self) -> &[Word] {
        &self.dense
    }

    /// Converts a signed address, failing on negatives.
    pub fn address(addr: Word) -> Result<Address> {
        Address::try_from(addr).map_err(|_| error!(InvalidAddress).with_value(addr))
    }

    pub fn read(&self, addr: Word) -> Result<Word> {
        Ok(self.get(Memory::address(addr)?))
    }

    pub fn write(&mut self, addr: Word, value: Word) -> Result<()> {
        self.set(Memory::address(addr)?, value);
        Ok(())
    }

    pub fn get(&self, addr: Address) -> Word {
        match self.dense.get(addr) {
            Some(value) => *value,
            None => self.sparse.get(&addr).copied().unwrap_or(0),
        }
    }

    pub fn set(&mut self, addr: Address, value: Word) {
        match self.dense.get_mut(addr) {
            Some(cell) => *cell = value,
            None => {
                self.sparse.insert(addr, value);
            }
        }
    }
}
