//! Process-model (BPMN-style) source document.

use crate::normalize::{join_or, sorted_distinct_trimmed};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DATA_CATEGORIES_PLACEHOLDER: &str = "<categories of personal data>";
pub const DATA_SUBJECTS_PLACEHOLDER: &str = "<data subject categories>";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessModel {
    #[serde(default)]
    pub data_objects: Option<Vec<DataObject>>,
    #[serde(default)]
    pub lanes: Option<Vec<Lane>>,
    #[serde(default)]
    pub message_flows: Option<Vec<MessageFlow>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataObject {
    #[serde(default)]
    pub name: Option<String>,
}

/// A participant lane. `external` is kept as raw JSON: only an explicit
/// `false` marks a lane as internal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lane {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub external: Value,
}

/// A cross-pool message flow. Any truthy `external` marks it as leaving
/// the organisation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFlow {
    #[serde(default)]
    pub target_pool: Option<String>,
    #[serde(default)]
    pub external: Value,
}

impl Lane {
    pub fn is_internal(&self) -> bool {
        self.external == Value::Bool(false)
    }
}

impl MessageFlow {
    pub fn is_external(&self) -> bool {
        is_truthy(&self.external)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

impl ProcessModel {
    pub fn data_categories(&self) -> Vec<String> {
        sorted_distinct_trimmed(
            self.data_objects
                .iter()
                .flatten()
                .filter_map(|object| object.name.as_deref()),
        )
    }

    pub fn data_subjects(&self) -> Vec<String> {
        sorted_distinct_trimmed(
            self.lanes
                .iter()
                .flatten()
                .filter(|lane| lane.is_internal())
                .filter_map(|lane| lane.label.as_deref()),
        )
    }

    pub fn external_recipients(&self) -> Vec<String> {
        sorted_distinct_trimmed(
            self.message_flows
                .iter()
                .flatten()
                .filter(|flow| flow.is_external())
                .filter_map(|flow| flow.target_pool.as_deref()),
        )
    }

    pub fn summarize(&self) -> ProcessSummary {
        let summary = ProcessSummary {
            data_categories: join_or(&self.data_categories(), DATA_CATEGORIES_PLACEHOLDER),
            data_subjects: join_or(&self.data_subjects(), DATA_SUBJECTS_PLACEHOLDER),
            recipients_ext: join_or(&self.external_recipients(), ""),
        };
        tracing::debug!(?summary, "extracted process model");
        summary
    }
}

/// Values extracted from a process model, already joined for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    pub data_categories: String,
    pub data_subjects: String,
    pub recipients_ext: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> ProcessModel {
        serde_json::from_value(value).expect("process model should decode")
    }

    #[test]
    fn only_explicitly_internal_lanes_are_subjects() {
        let model = decode(json!({
            "lanes": [
                {"label": "Customer", "external": false},
                {"label": "Vendor", "external": true},
                {"label": "Unknown"},
                {"label": "Stringly", "external": "false"}
            ]
        }));
        assert_eq!(model.summarize().data_subjects, "Customer");
    }

    #[test]
    fn truthy_message_flows_are_external_recipients() {
        let model = decode(json!({
            "messageFlows": [
                {"targetPool": "PartnerCo", "external": true},
                {"targetPool": "Internal", "external": false},
                {"targetPool": "Missing"},
                {"targetPool": " Registry ", "external": 1},
                {"targetPool": "PartnerCo", "external": "yes"}
            ]
        }));
        assert_eq!(model.summarize().recipients_ext, "PartnerCo, Registry");
    }

    #[test]
    fn data_categories_are_trimmed_distinct_and_sorted() {
        let model = decode(json!({
            "dataObjects": [
                {"name": "Telefon"},
                {"name": " E-Mail "},
                {"name": "  "},
                {},
                {"name": "Telefon"}
            ]
        }));
        assert_eq!(model.summarize().data_categories, "E-Mail, Telefon");
    }

    #[test]
    fn empty_model_uses_placeholders() {
        let summary = decode(json!({"lanes": [{"label": "Vendor", "external": true}]})).summarize();
        insta::assert_json_snapshot!(summary, @r###"
        {
          "data_categories": "<categories of personal data>",
          "data_subjects": "<data subject categories>",
          "recipients_ext": ""
        }
        "###);
    }

    #[test]
    fn truthiness_follows_json_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!(0.5)));
        assert!(is_truthy(&json!({"k": 1})));
    }
}
