//! # Intcode
//!
//! Command line runner for Intcode programs.
//!

mod term;

fn main() {
    term::main();
}
