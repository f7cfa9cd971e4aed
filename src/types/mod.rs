mod expr;
mod resource;
mod rule;
mod value;

pub use expr::Expr;
pub use resource::{Attr, Resource};
pub use rule::{ActionInvocation, Rule};
pub use value::Value;
