use thiserror::Error;

use crate::types::Resource;

/// A failure reported by an external collaborator (provider or client).
///
/// The engine treats collaborator errors as opaque: it neither retries nor
/// interprets them, it only surfaces them through the action that made the
/// call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
}

impl ClientError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Produces the resource records a pass evaluates.
///
/// Implementations may page through a remote API internally; the engine
/// only requires the final flattened sequence.
pub trait ResourceProvider {
    /// List every resource this provider knows about.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the backing service cannot be reached
    /// or enumerated.
    fn list_resources(&self) -> Result<Vec<Resource>, ClientError>;
}

/// Executes side effects on behalf of actions.
///
/// Implementations address the resource by whatever identity field their
/// backing service uses (for EC2, `InstanceId`); the engine passes the
/// whole record and stays ignorant of identity schemes.
pub trait ResourceClient {
    /// Apply a tag to the remote resource.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the remote call fails.
    fn create_tag(&self, resource: &Resource, key: &str, value: &str) -> Result<(), ClientError>;

    /// Delete (terminate) the remote resource.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the remote call fails.
    fn delete(&self, resource: &Resource) -> Result<(), ClientError>;
}
