use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use crate::client::ResourceClient;
use crate::types::{Resource, Value};

use super::{string_arg, ActionError};

/// The tag that carries a resource's scheduled deletion time, as a unix
/// timestamp rendered to a string.
pub const DELETION_TAG: &str = "SytheDeletionTime";

/// The `mark_for_deletion` action: a two-pass state machine over the
/// `tag:SytheDeletionTime` attribute.
///
/// Untagged resources get tagged with `now + after` (and the tag becomes
/// visible locally in the same pass). Tagged resources are checked against
/// the stored deadline and deleted once it has passed. Both halves run in
/// one invocation, so marking with `after: "0 seconds"` tags and deletes
/// immediately. The engine never schedules passes itself; a resource is
/// only deleted on a later pass if its rule still matches then.
pub(crate) fn mark_for_deletion(
    args: &HashMap<String, Value>,
    resource: &mut Resource,
    client: &dyn ResourceClient,
) -> Result<(), ActionError> {
    if resource.tag(DELETION_TAG).is_none() {
        let phrase = string_arg("mark_for_deletion", args, "after")?;
        let delay = parse_timespan(&phrase).ok_or_else(|| ActionError::InvalidArgument {
            action: "mark_for_deletion".to_owned(),
            reason: format!("invalid timespan: {phrase}"),
        })?;

        let deadline = Utc::now()
            + chrono::Duration::from_std(delay).map_err(|_| ActionError::InvalidArgument {
                action: "mark_for_deletion".to_owned(),
                reason: format!("timespan out of range: {phrase}"),
            })?;
        let stamp = deadline.timestamp().to_string();

        let tag_args: HashMap<String, Value> = [
            ("key".to_owned(), Value::Str(DELETION_TAG.to_owned())),
            ("value".to_owned(), Value::Str(stamp)),
        ]
        .into();
        super::tag(&tag_args, resource, client)?;
        tracing::debug!(resource = %resource, deadline = %deadline, "marked for deletion");
    }

    let stored = resource
        .tag(DELETION_TAG)
        .map(str::to_owned)
        .unwrap_or_default();
    let deadline: f64 = stored.parse().map_err(|_| ActionError::InvalidArgument {
        action: "mark_for_deletion".to_owned(),
        reason: format!("stored deletion time is not a timestamp: {stored}"),
    })?;

    #[allow(clippy::cast_precision_loss)]
    if Utc::now().timestamp() as f64 >= deadline {
        tracing::debug!(resource = %resource, "deletion deadline reached");
        super::delete(resource, client)?;
    }
    Ok(())
}

/// Parse a relative duration phrase like `"3 days"` or `"3 days, 2
/// seconds"`. Commas and whitespace are stripped before handing the phrase
/// to `humantime`, whose grammar wants `3days2seconds`.
fn parse_timespan(phrase: &str) -> Option<Duration> {
    let normalized: String = phrase
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    humantime::parse_duration(&normalized).ok()
}
