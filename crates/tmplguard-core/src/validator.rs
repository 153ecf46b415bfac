//! Checks a payload against a [`RequirementSpec`].

use crate::payload;
use crate::requirements::{LoopRequirement, Requirement, RequirementSpec};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReason {
    /// Nothing exists at the path.
    Absent,
    /// Something exists, but a loop needs an array there.
    NotArray,
}

/// One unsatisfied requirement, addressed from the payload root.
///
/// Displays as the path, with a `[]` suffix for [`MissingReason::NotArray`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingVariable {
    pub path: String,
    pub reason: MissingReason,
}

impl fmt::Display for MissingVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            MissingReason::Absent => f.write_str(&self.path),
            MissingReason::NotArray => write!(f, "{}[]", self.path),
        }
    }
}

/// Returns every requirement of `spec` that `payload` does not satisfy, in
/// spec order. Loop elements are reported index by index.
#[tracing::instrument(skip_all)]
pub fn validate(payload: &Value, spec: &RequirementSpec) -> Vec<MissingVariable> {
    let mut missing = Vec::new();
    check_spec(payload, spec, "", &mut missing);
    tracing::debug!(
        requirements = spec.len(),
        missing = missing.len(),
        "validated payload"
    );
    missing
}

fn check_spec(
    payload: &Value,
    spec: &RequirementSpec,
    prefix: &str,
    missing: &mut Vec<MissingVariable>,
) {
    for requirement in spec {
        match requirement {
            Requirement::Field(path) => {
                if !payload::contains(payload, path) {
                    missing.push(MissingVariable {
                        path: format!("{}{}", prefix, path),
                        reason: MissingReason::Absent,
                    });
                }
            }
            Requirement::Loop(lp) => check_loop(payload, lp, prefix, missing),
        }
    }
}

fn check_loop(
    payload: &Value,
    requirement: &LoopRequirement,
    prefix: &str,
    missing: &mut Vec<MissingVariable>,
) {
    let path = format!("{}{}", prefix, requirement.loop_variable);
    let items = match payload::lookup(payload, &requirement.loop_variable) {
        None => {
            missing.push(MissingVariable {
                path,
                reason: MissingReason::Absent,
            });
            return;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            missing.push(MissingVariable {
                path,
                reason: MissingReason::NotArray,
            });
            return;
        }
    };

    if requirement.properties.is_empty() {
        return;
    }
    for (index, item) in items.iter().enumerate() {
        let element_prefix = format!("{}[{}].", path, index);
        check_spec(item, &requirement.properties, &element_prefix, missing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(missing: Vec<MissingVariable>) -> Vec<String> {
        missing.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_array_shape_distinction() {
        let spec: RequirementSpec = vec![Requirement::each("bar", vec![])].into();

        assert_eq!(paths(validate(&json!({ "bar": "x" }), &spec)), vec!["bar[]"]);
        assert_eq!(paths(validate(&json!({}), &spec)), vec!["bar"]);
        assert!(validate(&json!({ "bar": [] }), &spec).is_empty());
    }

    #[test]
    fn test_reasons() {
        let spec: RequirementSpec = vec![
            Requirement::field("title"),
            Requirement::each("rows", vec![]),
        ]
        .into();
        let missing = validate(&json!({ "rows": {} }), &spec);
        assert_eq!(
            missing,
            vec![
                MissingVariable {
                    path: "title".to_string(),
                    reason: MissingReason::Absent,
                },
                MissingVariable {
                    path: "rows".to_string(),
                    reason: MissingReason::NotArray,
                },
            ]
        );
    }

    #[test]
    fn test_element_index_order() {
        let spec: RequirementSpec =
            vec![Requirement::each("rows", vec!["a".into(), "b".into()])].into();
        let payload = json!({ "rows": [{}, { "a": 1 }] });
        assert_eq!(
            paths(validate(&payload, &spec)),
            vec!["rows[0].a", "rows[0].b", "rows[1].b"]
        );
    }

    #[test]
    fn test_nested_loop_prefixes() {
        let spec: RequirementSpec = vec![Requirement::each(
            "groups",
            vec![Requirement::each("members", vec!["name".into()])],
        )]
        .into();
        let payload = json!({
            "groups": [
                { "members": [{ "name": "a" }, {}] },
                { "members": "nobody" }
            ]
        });
        assert_eq!(
            paths(validate(&payload, &spec)),
            vec!["groups[0].members[1].name", "groups[1].members[]"]
        );
    }

    #[test]
    fn test_scalar_elements_fail_property_lookups() {
        let spec: RequirementSpec = vec![Requirement::each("rows", vec!["id".into()])].into();
        let payload = json!({ "rows": ["plain", 3] });
        assert_eq!(
            paths(validate(&payload, &spec)),
            vec!["rows[0].id", "rows[1].id"]
        );
    }

    #[test]
    fn test_missing_reason_serializes() {
        let missing = MissingVariable {
            path: "rows".to_string(),
            reason: MissingReason::NotArray,
        };
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({ "path": "rows", "reason": "not_array" })
        );
    }
}
