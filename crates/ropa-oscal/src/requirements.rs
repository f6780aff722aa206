//! Implemented-requirement scaffolding from a (resolved) profile.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    #[serde(rename = "statement-id")]
    pub statement_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImplementedRequirement {
    pub uuid: String,
    #[serde(rename = "control-id")]
    pub control_id: String,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImplementedRequirements {
    #[serde(rename = "implemented-requirements")]
    pub implemented_requirements: Vec<ImplementedRequirement>,
}

impl ImplementedRequirements {
    pub fn len(&self) -> usize {
        self.implemented_requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implemented_requirements.is_empty()
    }
}

/// One requirement per identifiable control.
///
/// Controls come from `profile.controls`, else `catalog.controls`.
pub fn implemented_requirements(profile: &Value) -> ImplementedRequirements {
    implemented_requirements_with(profile, crate::fresh_uuid)
}

pub(crate) fn implemented_requirements_with(
    profile: &Value,
    mut next_uuid: impl FnMut() -> String,
) -> ImplementedRequirements {
    let controls = profile
        .pointer("/profile/controls")
        .or_else(|| profile.pointer("/catalog/controls"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten();

    let implemented_requirements = controls
        .filter_map(|control| {
            let control_id = control_id(control)?;
            Some(ImplementedRequirement {
                uuid: next_uuid(),
                statements: statements(control, &control_id),
                control_id,
            })
        })
        .collect();
    ImplementedRequirements {
        implemented_requirements,
    }
}

fn control_id(control: &Value) -> Option<String> {
    ["id", "control-id", "control-id-ref"]
        .iter()
        .filter_map(|key| control.get(*key).and_then(Value::as_str))
        .find(|id| !id.is_empty())
        .map(str::to_string)
}

fn statements(control: &Value, control_id: &str) -> Vec<Statement> {
    let default_id = format!("{control_id}_stmt");
    let found: Vec<Statement> = control
        .get("parts")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|part| {
            part.get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name == "statement" || name.ends_with("_stmt"))
        })
        .map(|part| Statement {
            statement_id: part
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| default_id.clone()),
        })
        .collect();

    if found.is_empty() {
        vec![Statement {
            statement_id: default_id,
        }]
    } else {
        found
    }
}
