//! Run a small cleanup rule set against an in-memory fleet, with a client
//! that prints what a real cloud client would do.
//!
//! ```sh
//! cargo run --example cleanup
//! ```

use sythe::{
    parse_rules, run, ClientError, Registry, Resource, ResourceClient, ResourceProvider,
    SytheError,
};

struct StaticFleet;

impl ResourceProvider for StaticFleet {
    fn list_resources(&self) -> Result<Vec<Resource>, ClientError> {
        let mut fleet = Vec::new();
        for (id, state, stack_state) in [
            ("i-0a1b2c3d", "running", "live"),
            ("i-1b2c3d4e", "running", "superceded"),
            ("i-2c3d4e5f", "stopped", "superceded"),
        ] {
            let mut resource = Resource::new("ec2_instance")
                .set("InstanceId", id)
                .set("State.Name", state);
            resource.set_tag("stack.state", stack_state);
            fleet.push(resource);
        }
        Ok(fleet)
    }
}

struct PrintingClient;

impl ResourceClient for PrintingClient {
    fn create_tag(&self, resource: &Resource, key: &str, value: &str) -> Result<(), ClientError> {
        println!("create_tag {resource} {key}={value}");
        Ok(())
    }

    fn delete(&self, resource: &Resource) -> Result<(), ClientError> {
        println!("delete {resource}");
        Ok(())
    }
}

const RULES: &str = r#"
ec2_instance(State.Name = "running" & tag:stack.state = "superceded") {
    mark_for_deletion(after: "0 seconds")
}
ec2_instance(State.Name = "stopped") {
    tag(key: "lifecycle", value: "parked")
}
"#;

fn main() -> Result<(), SytheError> {
    let mut registry = Registry::new();
    registry.register("ec2_instance", ())?;

    let rules = parse_rules(RULES, &registry)?;
    let report = run(&rules, &StaticFleet, &PrintingClient)?;
    println!("{report}");

    Ok(())
}
