//! # Intcode
//!
//! A stored-program integer machine. Programs are comma separated
//! integers; the machine decodes and executes them one instruction at a
//! time with position, immediate and relative addressing, memory that
//! grows past the loaded image, and input/output queues.
//!
//! Execution can stop at every output and resume later, which is how
//! drivers build feedback loops out of one or more machines.
//! ```
//! use intcode::mach::Runtime;
//!
//! let mut machine: Runtime = "3,0,4,0,99".parse().unwrap();
//! machine.push_input(7);
//! assert_eq!(machine.run_until_output().unwrap(), Some(7));
//! assert_eq!(machine.run_until_output().unwrap(), None);
//! ```
//!
//! Drivers may read and write memory directly, before or between runs.
//! ```
//! use intcode::mach::Runtime;
//!
//! let mut machine: Runtime = "1,0,0,3,99".parse().unwrap();
//! machine.write(1, 4).unwrap();
//! machine.run().unwrap();
//! assert_eq!(machine.read(3).unwrap(), 100);
//! ```

pub mod lang;
pub mod mach;
