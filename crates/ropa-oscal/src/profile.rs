//! Profile resolution: filter a catalog down to the controls a profile
//! includes.

use crate::OscalError;
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;

pub const DEFAULT_OSCAL_VERSION: &str = "1.1.2";

/// Control IDs named by `profile.imports[].include-controls[]`.
///
/// Each include reads `with-ids`, falling back to `with-controls`. Entries
/// are plain strings or objects carrying `control-id` or `id`.
pub fn included_control_ids(profile: &Value) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    let imports = profile
        .pointer("/profile/imports")
        .and_then(Value::as_array)
        .into_iter()
        .flatten();
    for import in imports {
        let includes = import
            .get("include-controls")
            .and_then(Value::as_array)
            .into_iter()
            .flatten();
        for include in includes {
            let selectors = include
                .get("with-ids")
                .or_else(|| include.get("with-controls"))
                .and_then(Value::as_array)
                .into_iter()
                .flatten();
            ids.extend(selectors.filter_map(selector_id));
        }
    }
    ids
}

fn selector_id(selector: &Value) -> Option<String> {
    let id = match selector {
        Value::String(id) => Some(id.as_str()),
        Value::Object(fields) => fields
            .get("control-id")
            .or_else(|| fields.get("id"))
            .and_then(Value::as_str),
        _ => None,
    }?;
    (!id.is_empty()).then(|| id.to_string())
}

/// Result of [`resolve_profile`].
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub document: Value,
    pub included: BTreeSet<String>,
}

/// Keep only the catalog groups and controls the profile includes.
pub fn resolve_profile(profile: &Value, catalog: &Value) -> Result<ResolvedProfile, OscalError> {
    let included = included_control_ids(profile);
    if included.is_empty() {
        return Err(OscalError::NoIncludedControls);
    }

    let input = catalog.get("catalog").unwrap_or(catalog);
    let uuid = input
        .get("uuid")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(crate::fresh_uuid);

    let mut metadata = match input.get("metadata") {
        Some(Value::Object(metadata)) => metadata.clone(),
        _ => Map::new(),
    };
    metadata
        .entry("oscal-version")
        .or_insert_with(|| Value::String(DEFAULT_OSCAL_VERSION.to_string()));

    let groups: Vec<Value> = input
        .get("groups")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|group| filter_group(group, &included))
        .collect();
    tracing::debug!(
        included = included.len(),
        groups = groups.len(),
        "resolved profile against catalog"
    );

    Ok(ResolvedProfile {
        document: json!({
            "catalog": {
                "uuid": uuid,
                "metadata": metadata,
                "groups": groups,
            }
        }),
        included,
    })
}

fn filter_group(group: &Value, included: &BTreeSet<String>) -> Option<Value> {
    let controls: Vec<Value> = group
        .get("controls")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|control| {
            control
                .get("id")
                .and_then(Value::as_str)
                .is_some_and(|id| included.contains(id))
        })
        .cloned()
        .collect();
    if controls.is_empty() {
        return None;
    }

    let mut kept = Map::new();
    for key in ["id", "title"] {
        if let Some(value) = group.get(key) {
            kept.insert(key.to_string(), value.clone());
        }
    }
    kept.insert("controls".to_string(), Value::Array(controls));
    Some(Value::Object(kept))
}
