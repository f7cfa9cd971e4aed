//! In-memory collaborator doubles for unit tests.

use std::cell::RefCell;

use crate::client::{ClientError, ResourceClient};
use crate::types::Resource;

/// A [`ResourceClient`] that records every call instead of touching a
/// remote service. Optionally fails every call, for error-path tests.
pub(crate) struct RecordingClient {
    tags: RefCell<Vec<(String, String)>>,
    deletions: RefCell<usize>,
    failing: bool,
}

impl RecordingClient {
    pub(crate) fn new() -> Self {
        Self {
            tags: RefCell::new(Vec::new()),
            deletions: RefCell::new(0),
            failing: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub(crate) fn tags(&self) -> Vec<(String, String)> {
        self.tags.borrow().clone()
    }

    pub(crate) fn deletions(&self) -> usize {
        *self.deletions.borrow()
    }
}

impl ResourceClient for RecordingClient {
    fn create_tag(&self, _resource: &Resource, key: &str, value: &str) -> Result<(), ClientError> {
        if self.failing {
            return Err(ClientError::new("create_tag refused"));
        }
        self.tags.borrow_mut().push((key.to_owned(), value.to_owned()));
        Ok(())
    }

    fn delete(&self, _resource: &Resource) -> Result<(), ClientError> {
        if self.failing {
            return Err(ClientError::new("delete refused"));
        }
        *self.deletions.borrow_mut() += 1;
        Ok(())
    }
}
