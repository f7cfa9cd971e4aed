use std::collections::HashMap;
use std::fmt;

use crate::parse::ParseError;

use super::{Expr, Resource, Value};

/// The unit of policy: a resource type, a condition over one resource of
/// that type, and a flat list of actions to run when the condition holds.
///
/// Built once per rule block by the parser and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub resource_type: String,
    pub condition: Expr,
    pub actions: Vec<ActionInvocation>,
}

/// A named action with its argument expressions, in declaration order.
///
/// Argument expressions are evaluated against the *target resource*, so an
/// argument may itself read resource attributes through a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionInvocation {
    pub name: String,
    pub args: Vec<(String, Expr)>,
}

impl ActionInvocation {
    /// Evaluate every argument expression against the resource.
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures from argument expressions.
    pub fn resolve_args(&self, resource: &Resource) -> Result<HashMap<String, Value>, ParseError> {
        let mut resolved = HashMap::with_capacity(self.args.len());
        for (name, expr) in &self.args {
            resolved.insert(name.clone(), expr.evaluate(resource)?);
        }
        Ok(resolved)
    }
}

impl fmt::Display for ActionInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (name, expr)) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {expr}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {{ ", self.resource_type, self.condition)?;
        for action in &self.actions {
            write!(f, "{action} ")?;
        }
        write!(f, "}}")
    }
}
