use crate::registry::Registry;
use crate::types::{ActionInvocation, Rule};

use super::condition::{isolate_condition, parse_condition, parse_operand};
use super::ParseError;

/// Cursor over an immutable token buffer.
///
/// The grammar consumes tokens destructively from the front; modelling that
/// as an advancing index keeps the buffer intact and every consumption an
/// O(1) step, and makes premature end of input a distinct, contextful error
/// rather than an index panic.
#[derive(Debug)]
pub(crate) struct TokenStream {
    tokens: Vec<String>,
    pos: usize,
}

impl TokenStream {
    pub(crate) fn new(tokens: Vec<String>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn remaining(&self) -> &[String] {
        &self.tokens[self.pos..]
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Take the next token, reporting `context` on end of input.
    fn pop(&mut self, context: &str) -> Result<String, ParseError> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token.clone())
            }
            None => Err(ParseError::UnexpectedEof(context.to_owned())),
        }
    }

    /// Consume a literal token, or fail naming what was expected.
    fn expect(&mut self, literal: &str, context: &str) -> Result<(), ParseError> {
        let token = self.pop(context)?;
        if token == literal {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("'{literal}'"),
                found: token,
            })
        }
    }
}

/// Parse one rule block from the front of the stream:
/// resource type, bracketed condition, `{`, actions, `}`.
///
/// The resource type must be registered; the registry decouples this
/// grammar from any concrete resource implementation.
pub(crate) fn parse_rule<T>(
    stream: &mut TokenStream,
    registry: &Registry<T>,
) -> Result<Rule, ParseError> {
    let resource_type = stream.pop("rule")?;
    if !registry.contains(&resource_type) {
        return Err(ParseError::InvalidResourceType(resource_type));
    }

    let span = isolate_condition(stream.remaining())?;
    let condition = parse_condition(&stream.remaining()[..span])?;
    stream.advance(span);

    stream.expect("{", "action block")?;

    let mut actions = Vec::new();
    loop {
        match stream.peek() {
            None => return Err(ParseError::UnexpectedEof("action block".to_owned())),
            Some("}") => {
                stream.advance(1);
                break;
            }
            Some(_) => actions.push(parse_action(stream)?),
        }
    }

    Ok(Rule {
        resource_type,
        condition,
        actions,
    })
}

/// Parse one action invocation: `name ( [argName: operand (, ..)*] )`.
///
/// The tokenizer leaves the `:` attached to the argument name, so argument
/// names arrive as single `name:` tokens whose stem must be alphanumeric.
pub(crate) fn parse_action(stream: &mut TokenStream) -> Result<ActionInvocation, ParseError> {
    let name = stream.pop("action")?;
    stream.expect("(", "action arguments")?;

    let mut args = Vec::new();
    if stream.peek() == Some(")") {
        stream.advance(1);
        return Ok(ActionInvocation { name, args });
    }

    loop {
        let param = stream.pop("action arguments")?;
        let arg_name = parse_param_name(&param)?;
        let raw_value = stream.pop("action arguments")?;
        let value = parse_operand(&raw_value)?;
        args.push((arg_name, value));

        let delim = stream.pop("action arguments")?;
        match delim.as_str() {
            ")" => break,
            "," => {
                // A comma must introduce another argument.
                if stream.peek() == Some(")") {
                    return Err(ParseError::UnexpectedToken {
                        expected: "an argument name".to_owned(),
                        found: ")".to_owned(),
                    });
                }
            }
            other => {
                return Err(ParseError::UnexpectedToken {
                    expected: "',' or ')'".to_owned(),
                    found: other.to_owned(),
                });
            }
        }
    }

    Ok(ActionInvocation { name, args })
}

fn parse_param_name(token: &str) -> Result<String, ParseError> {
    let Some(stem) = token.strip_suffix(':') else {
        return Err(ParseError::InvalidParameterName(token.to_owned()));
    };
    if stem.is_empty() || !stem.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ParseError::InvalidParameterName(token.to_owned()));
    }
    Ok(stem.to_owned())
}
