/*!
## Rust Machine Module

This Rust module decodes and executes Intcode.

*/

/// A memory cell, register, or operand.
pub type Word = i64;
/// A validated memory address or program counter.
pub type Address = usize;

mod instruction;
mod listing;
mod memory;
mod opcode;
mod param;
mod runtime;

pub use instruction::Instruction;
pub use listing::Entry;
pub use listing::Listing;
pub use memory::Memory;
pub use opcode::Opcode;
pub use param::Mode;
pub use param::Param;
pub use runtime::Event;
pub use runtime::Flow;
pub use runtime::InputFn;
pub use runtime::Runtime;
