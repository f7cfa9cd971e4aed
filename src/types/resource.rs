use std::collections::HashMap;
use std::fmt;

use crate::parse::ParseError;

use super::Value;

/// A single attribute slot: either a language-representable leaf value or
/// structure the language can traverse but not compare against.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    Value(Value),
    Map(HashMap<String, Attr>),
    List(Vec<Attr>),
}

/// The attribute/tag bag a rule evaluates and an action mutates.
///
/// Attributes form a nested map addressed by dot-separated paths. Tags live
/// in a separate flattened view addressed as `tag:<Key>`, seeded once at
/// ingestion from an EC2-style `Tags` list and refreshed whenever a tag
/// action succeeds, so later rules in the same pass observe new tags.
///
/// Records are created per evaluation pass by a resource provider and are
/// not shared between concurrent evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    resource_type: String,
    attrs: HashMap<String, Attr>,
    tags: HashMap<String, String>,
}

impl Resource {
    /// Create an empty resource record of the given type.
    #[must_use]
    pub fn new(resource_type: &str) -> Self {
        Self {
            resource_type: resource_type.to_owned(),
            attrs: HashMap::new(),
            tags: HashMap::new(),
        }
    }

    /// Build a record from a provider's JSON payload.
    ///
    /// Numbers that fit `i64` become integers; other numbers are kept as
    /// their string rendering so they remain visible to string equality.
    /// A top-level `Tags` array of `{Key, Value}` objects additionally
    /// seeds the flattened tag view.
    #[must_use]
    pub fn from_json(resource_type: &str, data: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut resource = Resource::new(resource_type);
        for (key, value) in data {
            resource.attrs.insert(key.clone(), attr_from_json(value));
        }
        resource.seed_tags();
        resource
    }

    /// Set a value at a dot-separated path, creating intermediate maps.
    /// Builder form for tests and hand-rolled records.
    #[must_use]
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.insert(path, value.into());
        self
    }

    /// Insert a value at a dot-separated path (mutable reference version).
    pub fn insert(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        insert_recursive(&mut self.attrs, &segments, value);
    }

    /// The resource type this record belongs to, e.g. `ec2_instance`.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Read a tag from the flattened view.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Write a tag into the flattened view. This is the local half of the
    /// `tag` action; the remote half goes through the resource client.
    pub fn set_tag(&mut self, key: &str, value: &str) {
        self.tags.insert(key.to_owned(), value.to_owned());
    }

    /// Resolve an attribute path to a value.
    ///
    /// `tag:<Key>` paths read the flattened tag view with the whole
    /// remainder as the tag key (tag keys may themselves contain dots).
    /// Other paths are split on `.` and traversed segment by segment; a
    /// missing segment yields [`Value::None`] so optional attributes can be
    /// tested without erroring.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnsupportedValue`] if the path lands on a
    /// nested map or list, which the language cannot represent.
    pub fn resolve(&self, path: &str) -> Result<Value, ParseError> {
        if let Some(key) = path.strip_prefix("tag:") {
            return Ok(match self.tags.get(key) {
                Some(v) => Value::Str(v.clone()),
                None => Value::None,
            });
        }

        let mut current = &self.attrs;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            match current.get(segment) {
                None => return Ok(Value::None),
                Some(Attr::Value(v)) => {
                    return Ok(if segments.peek().is_some() {
                        // The path continues past a leaf: treat as missing.
                        Value::None
                    } else {
                        v.clone()
                    });
                }
                Some(Attr::Map(map)) => {
                    if segments.peek().is_none() {
                        return Err(ParseError::UnsupportedValue(path.to_owned()));
                    }
                    current = map;
                }
                Some(Attr::List(_)) => {
                    return if segments.peek().is_none() {
                        Err(ParseError::UnsupportedValue(path.to_owned()))
                    } else {
                        // Lists have no named segments.
                        Ok(Value::None)
                    };
                }
            }
        }
        Ok(Value::None)
    }

    /// Flatten an EC2-style `Tags` attribute (`[{Key, Value}, ..]`) into the
    /// tag view.
    fn seed_tags(&mut self) {
        let Some(Attr::List(entries)) = self.attrs.get("Tags") else {
            return;
        };
        let mut seeded = Vec::new();
        for entry in entries {
            if let Attr::Map(map) = entry {
                if let (Some(Attr::Value(Value::Str(k))), Some(Attr::Value(Value::Str(v)))) =
                    (map.get("Key"), map.get("Value"))
                {
                    seeded.push((k.clone(), v.clone()));
                }
            }
        }
        for (k, v) in seeded {
            self.tags.insert(k, v);
        }
    }
}

fn insert_recursive(map: &mut HashMap<String, Attr>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_owned(), Attr::Value(value));
        }
        [first, rest @ ..] => {
            let entry = map
                .entry((*first).to_owned())
                .or_insert_with(|| Attr::Map(HashMap::new()));
            match entry {
                Attr::Map(nested) => insert_recursive(nested, rest, value),
                _ => {
                    let mut nested = HashMap::new();
                    insert_recursive(&mut nested, rest, value);
                    *entry = Attr::Map(nested);
                }
            }
        }
    }
}

fn attr_from_json(value: &serde_json::Value) -> Attr {
    match value {
        serde_json::Value::Null => Attr::Value(Value::None),
        serde_json::Value::Bool(b) => Attr::Value(Value::Bool(*b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Attr::Value(Value::Int(i)),
            None => Attr::Value(Value::Str(n.to_string())),
        },
        serde_json::Value::String(s) => Attr::Value(Value::Str(s.clone())),
        serde_json::Value::Array(items) => Attr::List(items.iter().map(attr_from_json).collect()),
        serde_json::Value::Object(map) => Attr::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), attr_from_json(v)))
                .collect(),
        ),
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({} attrs, {} tags)",
            self.resource_type,
            self.attrs.len(),
            self.tags.len()
        )
    }
}
