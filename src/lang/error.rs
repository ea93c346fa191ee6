use crate::mach::{Address, Word};

#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    address: Option<Address>,
    value: Option<Word>,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $addr:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at_address($addr)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $addr:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_address($addr)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            address: None,
            value: None,
            message: "",
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Program counter of the instruction that failed, when known.
    pub fn address(&self) -> Option<Address> {
        self.address
    }

    /// The offending opcode, mode digit, or address.
    pub fn value(&self) -> Option<Word> {
        self.value
    }

    pub fn at_address(&self, address: Address) -> Error {
        Error {
            address: Some(address),
            ..self.clone()
        }
    }

    pub fn with_value(&self, value: Word) -> Error {
        Error {
            value: Some(value),
            ..self.clone()
        }
    }

    pub fn message(&self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message,
            ..self.clone()
        }
    }

    /// Wraps an error in `MachineFault` for a machine that already failed.
    /// The original location and value are kept.
    pub fn to_fault(&self) -> Error {
        Error {
            code: ErrorCode::MachineFault,
            message: self.code.name(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorCode {
    #[error("DECODE ERROR")]
    DecodeError,
    #[error("INVALID WRITE TARGET")]
    InvalidWriteTarget,
    #[error("INVALID ADDRESS")]
    InvalidAddress,
    #[error("OUT OF BOUNDS")]
    OutOfBounds,
    #[error("OVERFLOW")]
    Overflow,
    #[error("SYNTAX ERROR")]
    SyntaxError,
    #[error("INVALID INPUT")]
    InvalidInput,
    #[error("MACHINE FAULT")]
    MachineFault,
}

impl ErrorCode {
    fn name(self) -> &'static str {
        use ErrorCode::*;
        match self {
            DecodeError => "DECODE ERROR",
            InvalidWriteTarget => "INVALID WRITE TARGET",
            InvalidAddress => "INVALID ADDRESS",
            OutOfBounds => "OUT OF BOUNDS",
            Overflow => "OVERFLOW",
            SyntaxError => "SYNTAX ERROR",
            InvalidInput => "INVALID INPUT",
            MachineFault => "MACHINE FAULT",
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if let Some(value) = self.value {
            suffix.push_str(&format!(" {}", value));
        }
        if let Some(address) = self.address {
            suffix.push_str(&format!(" AT {}", address));
        }
        write!(f, "{}{}", self.code, suffix)
    }
}
