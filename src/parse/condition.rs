use crate::types::Expr;

use super::ParseError;

/// The binary operators of the condition language.
///
/// Precedence uses an inverted scale: a *lower* number binds *tighter*.
/// Comparisons (7, 8) therefore bind before `&` (12), which binds before
/// `|` (13). All operators are left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
    Equals,
    Greater,
    Less,
}

impl Operator {
    fn from_token(token: &str) -> Option<Operator> {
        match token {
            "&" => Some(Operator::And),
            "|" => Some(Operator::Or),
            "=" => Some(Operator::Equals),
            ">" => Some(Operator::Greater),
            "<" => Some(Operator::Less),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Operator::Greater | Operator::Less => 7,
            Operator::Equals => 8,
            Operator::And => 12,
            Operator::Or => 13,
        }
    }

    fn build(self, left: Expr, right: Expr) -> Expr {
        let (left, right) = (Box::new(left), Box::new(right));
        match self {
            Operator::And => Expr::And(left, right),
            Operator::Or => Expr::Or(left, right),
            Operator::Equals => Expr::Equals(left, right),
            Operator::Greater => Expr::GreaterThan(left, right),
            Operator::Less => Expr::LessThan(left, right),
        }
    }
}

/// Measure the bracketed condition span at the front of `tokens`.
///
/// Returns the number of tokens up to and including the `)` matching the
/// opening `(`, tracked with a running bracket counter.
///
/// # Errors
///
/// Fails if the span does not start with `(` or the brackets never balance.
pub fn isolate_condition(tokens: &[String]) -> Result<usize, ParseError> {
    match tokens.first() {
        None => return Err(ParseError::UnexpectedEof("condition".to_owned())),
        Some(first) if first != "(" => {
            return Err(ParseError::UnexpectedToken {
                expected: "'('".to_owned(),
                found: first.clone(),
            });
        }
        Some(_) => {}
    }

    let mut depth = 0_usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::UnbalancedCondition)
}

/// One entry in the shunting-yard output queue.
enum RpnItem {
    Operand(Expr),
    Op(Operator),
}

/// Parse a bracketed condition span into an AST.
///
/// Standard shunting-yard over the token span, followed by a postfix
/// reduction. For left-associative operators the stack is popped while its
/// top binds at least as tightly as the incoming operator (on the inverted
/// scale: top precedence <= incoming precedence).
///
/// # Errors
///
/// Fails on unmatched brackets, unclassifiable operands, and spans that do
/// not reduce to exactly one expression.
pub fn parse_condition(tokens: &[String]) -> Result<Expr, ParseError> {
    let mut output: Vec<RpnItem> = Vec::new();
    let mut stack: Vec<Option<Operator>> = Vec::new(); // None marks '('

    for token in tokens {
        match token.as_str() {
            "(" => stack.push(None),
            ")" => loop {
                match stack.pop() {
                    Some(Some(op)) => output.push(RpnItem::Op(op)),
                    Some(None) => break,
                    None => return Err(ParseError::UnbalancedCondition),
                }
            },
            _ => {
                if let Some(op) = Operator::from_token(token) {
                    while let Some(Some(top)) = stack.last() {
                        if top.precedence() <= op.precedence() {
                            output.push(RpnItem::Op(*top));
                            stack.pop();
                        } else {
                            break;
                        }
                    }
                    stack.push(Some(op));
                } else {
                    output.push(RpnItem::Operand(parse_operand(token)?));
                }
            }
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            Some(op) => output.push(RpnItem::Op(op)),
            None => return Err(ParseError::UnbalancedCondition),
        }
    }

    reduce(output)
}

fn reduce(output: Vec<RpnItem>) -> Result<Expr, ParseError> {
    let mut operands: Vec<Expr> = Vec::new();
    for item in output {
        match item {
            RpnItem::Operand(expr) => operands.push(expr),
            RpnItem::Op(op) => {
                let right = operands.pop().ok_or(ParseError::MalformedCondition)?;
                let left = operands.pop().ok_or(ParseError::MalformedCondition)?;
                operands.push(op.build(left, right));
            }
        }
    }
    match (operands.pop(), operands.is_empty()) {
        (Some(expr), true) => Ok(expr),
        _ => Err(ParseError::MalformedCondition),
    }
}

/// Classify a raw token as a leaf expression.
///
/// Tried in order: integer literal, quoted string, boolean literal,
/// identifier/variable. Anything else (including unterminated strings) is
/// an invalid operand.
///
/// # Errors
///
/// Returns [`ParseError::InvalidOperand`] when no classification matches.
pub fn parse_operand(token: &str) -> Result<Expr, ParseError> {
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        // The grammar only admits non-negative integers, so this cannot
        // overflow-panic for any token short enough to matter; excessively
        // long digit runs are rejected as operands.
        return token
            .parse::<i64>()
            .map(Expr::IntLiteral)
            .map_err(|_| ParseError::InvalidOperand(token.to_owned()));
    }

    if let Some(inner) = unquote(token) {
        return Ok(Expr::StringLiteral(inner.to_owned()));
    }

    match token {
        "true" => return Ok(Expr::BooleanLiteral(true)),
        "false" => return Ok(Expr::BooleanLiteral(false)),
        _ => {}
    }

    if !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '.')
    {
        return Ok(Expr::Variable(token.to_owned()));
    }

    Err(ParseError::InvalidOperand(token.to_owned()))
}

/// Strip matching quotes, if the token is a well-formed string literal.
///
/// A string runs from its opening quote to the next occurrence of the same
/// quote, so the closing quote must be the token's last character and the
/// quote cannot reappear inside.
fn unquote(token: &str) -> Option<&str> {
    let first = token.chars().next()?;
    if first != '"' && first != '\'' {
        return None;
    }
    let rest = &token[1..];
    if !rest.is_empty() && rest.ends_with(first) {
        let inner = &rest[..rest.len() - first.len_utf8()];
        if inner.contains(first) {
            return None;
        }
        Some(inner)
    } else {
        None
    }
}
