mod actions;
mod client;
mod engine;
mod error;
mod parse;
mod registry;
#[cfg(test)]
mod testing;
mod tokenize;
mod types;

pub use actions::{required_args, run_action, validate_args, ActionError, DELETION_TAG};
pub use client::{ClientError, ResourceClient, ResourceProvider};
pub use engine::{filter_resources, run, run_pass, PassFailure, PassReport};
pub use error::SytheError;
pub use parse::{
    isolate_condition, parse_condition, parse_operand, parse_rules, parse_rules_from_file,
    ParseError,
};
pub use registry::{Registry, RegistryError};
pub use tokenize::tokenize;
pub use types::{ActionInvocation, Attr, Expr, Resource, Rule, Value};
