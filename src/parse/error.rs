use thiserror::Error;

/// Errors raised while turning rule text into an AST, and by variable
/// resolution when an attribute has no representation in the language.
///
/// All parsing errors are terminal: a failure aborts loading of the whole
/// rule set, never producing a partial rule list.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },

    #[error("unexpected end of input while parsing {0}")]
    UnexpectedEof(String),

    #[error("invalid resource type: {0}")]
    InvalidResourceType(String),

    #[error("unbalanced parentheses in condition")]
    UnbalancedCondition,

    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    #[error("malformed condition: does not reduce to a single expression")]
    MalformedCondition,

    #[error("invalid parameter name: {0}")]
    InvalidParameterName(String),

    #[error("unsupported value at '{0}': conditions can only read strings, integers, and booleans")]
    UnsupportedValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_context() {
        let err = ParseError::UnexpectedEof("action block".to_owned());
        assert_eq!(
            err.to_string(),
            "unexpected end of input while parsing action block"
        );

        let err = ParseError::InvalidResourceType("a_random_resource".to_owned());
        assert_eq!(err.to_string(), "invalid resource type: a_random_resource");
    }
}
