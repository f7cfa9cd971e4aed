mod condition;
mod error;
mod grammar;

pub use condition::{isolate_condition, parse_condition, parse_operand};
pub use error::ParseError;

use crate::registry::Registry;
use crate::tokenize::tokenize;
use crate::types::Rule;

use grammar::TokenStream;

/// Parse rule source text into a list of [`Rule`]s.
///
/// Rules are consumed back-to-back until the token stream is exhausted, so
/// one source file can hold any number of rule blocks. A failure anywhere
/// aborts the whole load; no partial rule list is returned.
///
/// # Errors
///
/// Returns [`ParseError`] on the first malformed token sequence.
pub fn parse_rules<T>(input: &str, registry: &Registry<T>) -> Result<Vec<Rule>, ParseError> {
    let mut stream = TokenStream::new(tokenize(input));
    let mut rules = Vec::new();
    while !stream.is_empty() {
        rules.push(grammar::parse_rule(&mut stream, registry)?);
    }
    Ok(rules)
}

/// Read a rules file and parse it wholesale.
///
/// # Errors
///
/// Returns [`SytheError`](crate::SytheError) on I/O or parse failure.
pub fn parse_rules_from_file<T>(
    path: impl AsRef<std::path::Path>,
    registry: &Registry<T>,
) -> Result<Vec<Rule>, crate::SytheError> {
    let input = std::fs::read_to_string(path)?;
    Ok(parse_rules(&input, registry)?)
}
