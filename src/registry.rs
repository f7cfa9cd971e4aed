use std::collections::HashMap;

use thiserror::Error;

/// Raised on a duplicate registration. The first binding always survives.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("name '{0}' already in registry")]
    Collision(String),
}

/// One-shot name-to-implementation binding table.
///
/// Used to decouple the grammar parser, which only needs to validate a
/// resource type name, from the concrete resource implementations behind
/// it. Built explicitly at startup and passed by reference into the parser
/// rather than living in global state, so parallel test runs stay isolated
/// and collision detection never depends on timing.
#[derive(Debug, Default)]
pub struct Registry<T> {
    entries: HashMap<String, T>,
}

impl<T> Registry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Bind `name` to an implementation, exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Collision`] if the name is already bound;
    /// the existing binding is left untouched.
    pub fn register(&mut self, name: &str, implementation: T) -> Result<(), RegistryError> {
        if self.entries.contains_key(name) {
            return Err(RegistryError::Collision(name.to_owned()));
        }
        self.entries.insert(name.to_owned(), implementation);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }
}
