use thiserror::Error;

use crate::actions::ActionError;
use crate::client::ClientError;
use crate::parse::ParseError;
use crate::registry::RegistryError;

/// Unified error type covering parsing, registration, action execution,
/// collaborator failures, and I/O.
///
/// Returned by convenience entry points like
/// [`parse_rules_from_file()`](crate::parse_rules_from_file) and
/// [`run()`](crate::engine::run); the per-stage errors remain available for
/// callers that work a layer down.
#[derive(Debug, Error)]
pub enum SytheError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
