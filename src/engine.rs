use std::fmt;

use crate::actions;
use crate::client::{ResourceClient, ResourceProvider};
use crate::parse::ParseError;
use crate::types::{Expr, Resource, Rule};
use crate::SytheError;

impl Rule {
    /// Apply this rule to one resource: evaluate the condition and, when it
    /// holds, run every action in declaration order.
    ///
    /// Returns whether the condition matched. Execution stops on the first
    /// failing action; actions already applied stay applied (each action
    /// commits independently, there is no rollback).
    ///
    /// # Errors
    ///
    /// Propagates condition/argument evaluation failures and action errors.
    pub fn execute(
        &self,
        resource: &mut Resource,
        client: &dyn ResourceClient,
    ) -> Result<bool, SytheError> {
        if !self.condition.evaluate(resource)?.truthy() {
            return Ok(false);
        }
        for action in &self.actions {
            let args = action.resolve_args(resource)?;
            actions::run_action(&action.name, &args, resource, client)?;
        }
        Ok(true)
    }
}

/// Select the resources a condition holds for.
///
/// Pure: no actions run, no resource is mutated.
///
/// # Errors
///
/// Propagates evaluation failures (e.g. a variable resolving to a value
/// the language cannot represent).
pub fn filter_resources<'a>(
    resources: &'a [Resource],
    condition: &Expr,
) -> Result<Vec<&'a Resource>, ParseError> {
    let mut matched = Vec::new();
    for resource in resources {
        if condition.evaluate(resource)?.truthy() {
            matched.push(resource);
        }
    }
    Ok(matched)
}

/// One rule-failure within a pass: which rule, which resource, what went
/// wrong. The pass itself continues past it.
#[derive(Debug)]
pub struct PassFailure {
    pub rule_index: usize,
    pub resource_index: usize,
    pub error: SytheError,
}

/// Outcome of applying a rule set to a resource set.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Rule-resource pairs whose condition was evaluated.
    pub evaluated: usize,
    /// Pairs whose condition held and whose actions all ran.
    pub matched: usize,
    pub failures: Vec<PassFailure>,
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pass: {} evaluated, {} matched, {} failed",
            self.evaluated,
            self.matched,
            self.failures.len()
        )
    }
}

/// Apply every rule to every resource of its type, in order.
///
/// An execution-time failure aborts only that rule for that resource; it
/// is logged, collected into the report, and the pass moves on. Callers
/// wanting fail-fast behaviour can drive [`Rule::execute`] themselves.
/// Resources mutated by actions (e.g. a fresh tag) are observed by the
/// rules that run after them in the same pass.
pub fn run_pass(
    rules: &[Rule],
    resources: &mut [Resource],
    client: &dyn ResourceClient,
) -> PassReport {
    let mut report = PassReport::default();

    for (rule_index, rule) in rules.iter().enumerate() {
        for (resource_index, resource) in resources.iter_mut().enumerate() {
            if resource.resource_type() != rule.resource_type {
                continue;
            }
            report.evaluated += 1;
            match rule.execute(resource, client) {
                Ok(true) => {
                    tracing::debug!(rule = rule_index, resource = %resource, "rule matched");
                    report.matched += 1;
                }
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(
                        rule = rule_index,
                        resource = %resource,
                        %error,
                        "rule execution failed"
                    );
                    report.failures.push(PassFailure {
                        rule_index,
                        resource_index,
                        error,
                    });
                }
            }
        }
    }

    tracing::info!(
        evaluated = report.evaluated,
        matched = report.matched,
        failed = report.failures.len(),
        "pass complete"
    );
    report
}

/// Pull resources from a provider, then run one pass over them.
///
/// # Errors
///
/// Returns [`SytheError::Client`] when the provider cannot enumerate
/// resources. Execution-time failures do not error; they are collected in
/// the report.
pub fn run(
    rules: &[Rule],
    provider: &dyn ResourceProvider,
    client: &dyn ResourceClient,
) -> Result<PassReport, SytheError> {
    let mut resources = provider.list_resources()?;
    Ok(run_pass(rules, &mut resources, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingClient;
    use crate::types::{ActionInvocation, Value};

    fn server(name: &str, state: &str) -> Resource {
        let mut resource = Resource::new("ec2_instance").set("State.Name", state);
        resource.set_tag("Name", name);
        resource
    }

    fn name_equals(name: &str) -> Expr {
        Expr::Equals(
            Box::new(Expr::Variable("tag:Name".into())),
            Box::new(Expr::StringLiteral(name.into())),
        )
    }

    #[test]
    fn filter_selects_exactly_the_matching_subset() {
        let resources = vec![server("A Server", "running"), server("Another Server", "running")];

        let by_name = filter_resources(&resources, &name_equals("A Server")).unwrap();
        assert_eq!(by_name, vec![&resources[0]]);

        let by_state = filter_resources(
            &resources,
            &Expr::Equals(
                Box::new(Expr::Variable("State.Name".into())),
                Box::new(Expr::StringLiteral("running".into())),
            ),
        )
        .unwrap();
        assert_eq!(by_state.len(), 2);
    }

    #[test]
    fn execute_skips_actions_when_condition_is_false() {
        let client = RecordingClient::new();
        let mut resource = server("A Server", "running");
        let rule = Rule {
            resource_type: "ec2_instance".to_owned(),
            condition: name_equals("Another Server"),
            actions: vec![ActionInvocation {
                name: "delete".to_owned(),
                args: vec![],
            }],
        };

        assert!(!rule.execute(&mut resource, &client).unwrap());
        assert_eq!(client.deletions(), 0);
    }

    #[test]
    fn execute_runs_actions_in_order_and_stops_on_error() {
        let client = RecordingClient::new();
        let mut resource = server("A Server", "running");
        let rule = Rule {
            resource_type: "ec2_instance".to_owned(),
            condition: name_equals("A Server"),
            actions: vec![
                ActionInvocation {
                    name: "tag".to_owned(),
                    args: vec![
                        ("key".to_owned(), Expr::StringLiteral("state".into())),
                        ("value".to_owned(), Expr::StringLiteral("checked".into())),
                    ],
                },
                ActionInvocation {
                    name: "unknown_action".to_owned(),
                    args: vec![],
                },
                ActionInvocation {
                    name: "delete".to_owned(),
                    args: vec![],
                },
            ],
        };

        let err = rule.execute(&mut resource, &client).unwrap_err();
        assert!(matches!(err, SytheError::Action(_)));
        // The first action committed; the one after the failure never ran.
        assert_eq!(client.tags().len(), 1);
        assert_eq!(client.deletions(), 0);
    }

    #[test]
    fn action_arguments_read_the_target_resource() {
        let client = RecordingClient::new();
        let mut resource = server("A Server", "running");
        let rule = Rule {
            resource_type: "ec2_instance".to_owned(),
            condition: Expr::BooleanLiteral(true),
            actions: vec![ActionInvocation {
                name: "tag".to_owned(),
                args: vec![
                    ("key".to_owned(), Expr::StringLiteral("Copy".into())),
                    ("value".to_owned(), Expr::Variable("tag:Name".into())),
                ],
            }],
        };

        assert!(rule.execute(&mut resource, &client).unwrap());
        assert_eq!(
            client.tags(),
            vec![("Copy".to_owned(), "A Server".to_owned())]
        );
    }

    #[test]
    fn pass_skips_resources_of_other_types() {
        let client = RecordingClient::new();
        let mut resources = vec![
            server("A Server", "running"),
            Resource::new("s3_bucket").set("Name", "logs"),
        ];
        let rules = vec![Rule {
            resource_type: "ec2_instance".to_owned(),
            condition: Expr::BooleanLiteral(true),
            actions: vec![],
        }];

        let report = run_pass(&rules, &mut resources, &client);
        assert_eq!(report.evaluated, 1);
        assert_eq!(report.matched, 1);
    }

    #[test]
    fn pass_continues_past_failing_resources() {
        let client = RecordingClient::new();
        let mut resources = vec![server("A Server", "running"), server("B Server", "running")];
        let rules = vec![
            Rule {
                resource_type: "ec2_instance".to_owned(),
                condition: Expr::BooleanLiteral(true),
                actions: vec![ActionInvocation {
                    name: "unknown_action".to_owned(),
                    args: vec![],
                }],
            },
            Rule {
                resource_type: "ec2_instance".to_owned(),
                condition: name_equals("B Server"),
                actions: vec![ActionInvocation {
                    name: "delete".to_owned(),
                    args: vec![],
                }],
            },
        ];

        let report = run_pass(&rules, &mut resources, &client);
        assert_eq!(report.failures.len(), 2); // first rule fails on both
        assert_eq!(report.matched, 1); // second rule still ran
        assert_eq!(client.deletions(), 1);
    }

    #[test]
    fn later_rules_observe_tags_set_earlier_in_the_pass() {
        let client = RecordingClient::new();
        let mut resources = vec![server("A Server", "running")];
        let rules = vec![
            Rule {
                resource_type: "ec2_instance".to_owned(),
                condition: Expr::BooleanLiteral(true),
                actions: vec![ActionInvocation {
                    name: "tag".to_owned(),
                    args: vec![
                        ("key".to_owned(), Expr::StringLiteral("stage".into())),
                        ("value".to_owned(), Expr::StringLiteral("doomed".into())),
                    ],
                }],
            },
            Rule {
                resource_type: "ec2_instance".to_owned(),
                condition: Expr::Equals(
                    Box::new(Expr::Variable("tag:stage".into())),
                    Box::new(Expr::StringLiteral("doomed".into())),
                ),
                actions: vec![ActionInvocation {
                    name: "delete".to_owned(),
                    args: vec![],
                }],
            },
        ];

        let report = run_pass(&rules, &mut resources, &client);
        assert_eq!(report.matched, 2);
        assert_eq!(client.deletions(), 1);
    }

    #[test]
    fn report_display() {
        let report = PassReport {
            evaluated: 4,
            matched: 2,
            failures: vec![],
        };
        assert_eq!(report.to_string(), "pass: 4 evaluated, 2 matched, 0 failed");
    }
}
