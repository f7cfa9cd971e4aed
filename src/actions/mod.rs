mod mark;

pub use mark::DELETION_TAG;

use std::collections::HashMap;

use thiserror::Error;

use crate::client::{ClientError, ResourceClient};
use crate::types::{Resource, Value};

/// Errors raised while validating or executing an action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("missing argument in {action} call: {argument}")]
    MissingArgument { action: String, argument: String },

    #[error("invalid argument in {action} call: {reason}")]
    InvalidArgument { action: String, reason: String },

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// The required argument names for every built-in action.
///
/// Grammar validation accepts any argument names; only this table knows
/// which ones an action actually needs, so arity is enforced here, at
/// execution time, by [`validate_args`].
const BUILTIN_ACTIONS: &[(&str, &[&str])] = &[
    ("tag", &["key", "value"]),
    ("delete", &[]),
    ("mark_for_deletion", &["after"]),
];

/// Look up the required argument names of a built-in action.
#[must_use]
pub fn required_args(action: &str) -> Option<&'static [&'static str]> {
    BUILTIN_ACTIONS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, required)| *required)
}

/// Check that every required argument is present in a resolved argument
/// mapping, before the action body runs.
///
/// # Errors
///
/// Returns [`ActionError::MissingArgument`] naming the action and the
/// first absent argument.
pub fn validate_args(
    action: &str,
    required: &[&str],
    args: &HashMap<String, Value>,
) -> Result<(), ActionError> {
    for argument in required {
        if !args.contains_key(*argument) {
            return Err(ActionError::MissingArgument {
                action: action.to_owned(),
                argument: (*argument).to_owned(),
            });
        }
    }
    Ok(())
}

/// Dispatch a named action against a resource.
///
/// Validates arity from the built-in table, then invokes the action body.
/// Each action commits independently; there is no rollback of earlier
/// actions when a later one fails.
///
/// # Errors
///
/// Returns [`ActionError`] for unknown actions, missing or invalid
/// arguments, and collaborator failures.
pub fn run_action(
    name: &str,
    args: &HashMap<String, Value>,
    resource: &mut Resource,
    client: &dyn ResourceClient,
) -> Result<(), ActionError> {
    let required = required_args(name).ok_or_else(|| ActionError::UnknownAction(name.to_owned()))?;
    validate_args(name, required, args)?;

    match name {
        "tag" => tag(args, resource, client),
        "delete" => delete(resource, client),
        "mark_for_deletion" => mark::mark_for_deletion(args, resource, client),
        _ => unreachable!("action validated against the built-in table"),
    }
}

/// The `tag` action: apply a tag remotely, then reflect it into the local
/// tag view so later rules in the same pass observe it.
pub(crate) fn tag(
    args: &HashMap<String, Value>,
    resource: &mut Resource,
    client: &dyn ResourceClient,
) -> Result<(), ActionError> {
    let key = string_arg("tag", args, "key")?;
    let value = string_arg("tag", args, "value")?;
    client.create_tag(resource, &key, &value)?;
    resource.set_tag(&key, &value);
    Ok(())
}

/// The `delete` action: terminate the resource through the client.
pub(crate) fn delete(
    resource: &mut Resource,
    client: &dyn ResourceClient,
) -> Result<(), ActionError> {
    client.delete(resource)?;
    Ok(())
}

/// Coerce an argument to a string. Integers and booleans render naturally;
/// `None` has no string form and is rejected.
pub(crate) fn string_arg(
    action: &str,
    args: &HashMap<String, Value>,
    name: &str,
) -> Result<String, ActionError> {
    match args.get(name) {
        Some(Value::Str(s)) => Ok(s.clone()),
        Some(Value::Int(i)) => Ok(i.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::None) => Err(ActionError::InvalidArgument {
            action: action.to_owned(),
            reason: format!("argument '{name}' resolved to none"),
        }),
        None => Err(ActionError::MissingArgument {
            action: action.to_owned(),
            argument: name.to_owned(),
        }),
    }
}
