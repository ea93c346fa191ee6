/*!
# Rust Language Module

This Rust module reads Intcode program text and defines the errors
shared by the whole crate.

*/

#[macro_use]
mod error;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use parse::parse;
