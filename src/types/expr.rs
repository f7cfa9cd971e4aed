use std::fmt;

use crate::parse::ParseError;

use super::{Resource, Value};

/// Condition/operand AST. A closed set of variants: the operator vocabulary
/// of the language is fixed, so evaluation is one exhaustive match rather
/// than open-ended dispatch.
///
/// Binary nodes own their children; leaves own their literal value. Nodes
/// are immutable after construction and safe to evaluate reentrantly.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Equals(Box<Expr>, Box<Expr>),
    GreaterThan(Box<Expr>, Box<Expr>),
    LessThan(Box<Expr>, Box<Expr>),
    IntLiteral(i64),
    StringLiteral(String),
    BooleanLiteral(bool),
    NoneLiteral,
    /// A dot-separated attribute path, resolved against the resource under
    /// evaluation. `tag:`-prefixed paths read the flattened tag view.
    Variable(String),
}

impl Expr {
    /// Evaluate this expression against a resource.
    ///
    /// Evaluation is pure tree recursion with no side effects. A missing
    /// attribute path yields [`Value::None`]; an attribute that resolves to
    /// something the language cannot represent (a nested map or list) is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnsupportedValue`] when a variable resolves to
    /// a value outside the language's type set.
    pub fn evaluate(&self, resource: &Resource) -> Result<Value, ParseError> {
        match self {
            Expr::And(left, right) => {
                if !left.evaluate(resource)?.truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(right.evaluate(resource)?.truthy()))
            }
            Expr::Or(left, right) => {
                if left.evaluate(resource)?.truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(right.evaluate(resource)?.truthy()))
            }
            Expr::Equals(left, right) => Ok(Value::Bool(
                left.evaluate(resource)? == right.evaluate(resource)?,
            )),
            Expr::GreaterThan(left, right) => {
                let (a, b) = (left.evaluate(resource)?, right.evaluate(resource)?);
                Ok(Value::Bool(
                    a.partial_cmp_value(&b) == Some(std::cmp::Ordering::Greater),
                ))
            }
            Expr::LessThan(left, right) => {
                let (a, b) = (left.evaluate(resource)?, right.evaluate(resource)?);
                Ok(Value::Bool(
                    a.partial_cmp_value(&b) == Some(std::cmp::Ordering::Less),
                ))
            }
            Expr::IntLiteral(i) => Ok(Value::Int(*i)),
            Expr::StringLiteral(s) => Ok(Value::Str(s.clone())),
            Expr::BooleanLiteral(b) => Ok(Value::Bool(*b)),
            Expr::NoneLiteral => Ok(Value::None),
            Expr::Variable(path) => resource.resolve(path),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::And(a, b) => write!(f, "({a} & {b})"),
            Expr::Or(a, b) => write!(f, "({a} | {b})"),
            Expr::Equals(a, b) => write!(f, "({a} = {b})"),
            Expr::GreaterThan(a, b) => write!(f, "({a} > {b})"),
            Expr::LessThan(a, b) => write!(f, "({a} < {b})"),
            Expr::IntLiteral(i) => write!(f, "{i}"),
            Expr::StringLiteral(s) => write!(f, "\"{s}\""),
            Expr::BooleanLiteral(b) => write!(f, "{b}"),
            Expr::NoneLiteral => write!(f, "none"),
            Expr::Variable(path) => write!(f, "{path}"),
        }
    }
}
