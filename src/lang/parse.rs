use crate::error;
use crate::lang::Error;
use crate::mach::Word;

type Result<T> = std::result::Result<T, Error>;

/// ## Program load format
///
/// A program is a comma separated list of decimal integers in address
/// order. Whitespace around each value, including trailing newlines, is
/// ignored. An empty text is an empty program.
pub fn parse(s: &str) -> Result<Vec<Word>> {
    if s.trim().is_empty() {
        return Ok(vec![]);
    }
    s.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            if token.is_empty() {
                return Err(error!(SyntaxError, index; "EMPTY CELL"));
            }
            token
                .parse::<Word>()
                .map_err(|_| error!(SyntaxError, index; "NOT AN INTEGER"))
        })
        .collect()
}
