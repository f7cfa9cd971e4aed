//! Select resources with a parsed condition, without running any actions.
//!
//! ```sh
//! cargo run --example filter
//! ```

use sythe::{filter_resources, parse_condition, tokenize, Resource, SytheError};

fn server(name: &str, state: &str) -> Resource {
    let mut resource = Resource::new("ec2_instance").set("State.Name", state);
    resource.set_tag("Name", name);
    resource
}

fn main() -> Result<(), SytheError> {
    let fleet = vec![
        server("api-1", "running"),
        server("api-2", "stopped"),
        server("worker-1", "running"),
    ];

    let condition = parse_condition(&tokenize(r#"(State.Name = "running")"#))?;
    println!("condition: {condition}");

    for resource in filter_resources(&fleet, &condition)? {
        let name = resource.resolve("tag:Name")?;
        println!("matched: {name}");
    }

    Ok(())
}
