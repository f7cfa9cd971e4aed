//! Shared in-memory collaborators for integration tests, modelled on an
//! EC2-style API: a paging provider and a call-recording client.

use std::cell::RefCell;

use sythe::{ClientError, Registry, Resource, ResourceClient, ResourceProvider};

/// A provider that serves resources from fixed JSON pages, the way a
/// remote describe-instances API would.
pub struct PagedProvider {
    pages: Vec<Vec<serde_json::Value>>,
}

impl PagedProvider {
    pub fn new(pages: Vec<Vec<serde_json::Value>>) -> Self {
        Self { pages }
    }
}

impl ResourceProvider for PagedProvider {
    fn list_resources(&self) -> Result<Vec<Resource>, ClientError> {
        let mut resources = Vec::new();
        for page in &self.pages {
            for payload in page {
                let serde_json::Value::Object(map) = payload else {
                    return Err(ClientError::new("payload is not an object"));
                };
                resources.push(Resource::from_json("ec2_instance", map));
            }
        }
        Ok(resources)
    }
}

/// Records tag and delete calls instead of performing them.
#[derive(Default)]
pub struct MockClient {
    pub tags: RefCell<Vec<(String, String, String)>>, // (instance, key, value)
    pub deleted: RefCell<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }
}

fn instance_id(resource: &Resource) -> String {
    match resource.resolve("InstanceId") {
        Ok(sythe::Value::Str(id)) => id,
        _ => "<unknown>".to_owned(),
    }
}

impl ResourceClient for MockClient {
    fn create_tag(&self, resource: &Resource, key: &str, value: &str) -> Result<(), ClientError> {
        self.tags
            .borrow_mut()
            .push((instance_id(resource), key.to_owned(), value.to_owned()));
        Ok(())
    }

    fn delete(&self, resource: &Resource) -> Result<(), ClientError> {
        self.deleted.borrow_mut().push(instance_id(resource));
        Ok(())
    }
}

pub fn ec2_registry() -> Registry<()> {
    let mut registry = Registry::new();
    registry.register("ec2_instance", ()).unwrap();
    registry
}

pub fn instance(id: &str, state: &str, tags: &[(&str, &str)]) -> serde_json::Value {
    let tag_objs: Vec<serde_json::Value> = tags
        .iter()
        .map(|(k, v)| serde_json::json!({ "Key": k, "Value": v }))
        .collect();
    serde_json::json!({
        "InstanceId": id,
        "State": { "Name": state },
        "Tags": tag_objs,
    })
}
