//! Records-export (xdomea-style) source document.

use crate::normalize::{LIST_SEPARATOR, sorted_distinct};
use serde::{Deserialize, Serialize};

pub const PURPOSE_PLACEHOLDER: &str = "<purpose-unclassified>";
pub const RETENTION_DEFAULT: &str = "policy-defined";
pub const LEGAL_BASIS_DEFAULT: &str = "<Art. 6 GDPR>";
pub const RECIPIENTS_DEFAULT: &str = "<internal>";

/// A records export. Every field is optional; absent fields default in the
/// accessors, never at decode time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsExport {
    #[serde(default)]
    pub records: Option<Vec<Record>>,
    #[serde(default)]
    pub retention: Option<Retention>,
    #[serde(default)]
    pub legal_basis: Option<Vec<String>>,
    #[serde(default)]
    pub recipients: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Retention {
    #[serde(default)]
    pub policy: Option<String>,
}

impl RecordsExport {
    /// Distinct sorted subjects of the first record.
    ///
    /// A present but empty `subjects` list yields no purposes; only a
    /// missing list (or missing first record) yields the placeholder.
    pub fn purposes(&self) -> Vec<String> {
        let subjects = self
            .records
            .as_deref()
            .and_then(<[Record]>::first)
            .and_then(|record| record.subjects.as_deref());
        match subjects {
            Some(subjects) => sorted_distinct(subjects.iter().map(String::as_str)),
            None => vec![PURPOSE_PLACEHOLDER.to_string()],
        }
    }

    pub fn retention_policy(&self) -> &str {
        self.retention
            .as_ref()
            .and_then(|retention| retention.policy.as_deref())
            .unwrap_or(RETENTION_DEFAULT)
    }

    pub fn legal_basis(&self) -> Vec<&str> {
        list_or(self.legal_basis.as_deref(), LEGAL_BASIS_DEFAULT)
    }

    pub fn recipients(&self) -> Vec<&str> {
        list_or(self.recipients.as_deref(), RECIPIENTS_DEFAULT)
    }

    /// Normalize into display values.
    pub fn summarize(&self) -> RecordsSummary {
        let summary = RecordsSummary {
            purposes: self.purposes(),
            retention: self.retention_policy().to_string(),
            legal_basis: self.legal_basis().join(LIST_SEPARATOR),
            recipients: self.recipients().join(LIST_SEPARATOR),
        };
        tracing::debug!(?summary, "extracted records export");
        summary
    }
}

fn list_or<'a>(values: Option<&'a [String]>, default: &'a str) -> Vec<&'a str> {
    match values {
        Some(values) => values.iter().map(String::as_str).collect(),
        None => vec![default],
    }
}

/// Values extracted from a records export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordsSummary {
    pub purposes: Vec<String>,
    pub retention: String,
    pub legal_basis: String,
    pub recipients: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> RecordsExport {
        serde_json::from_value(value).expect("records export should decode")
    }

    #[test]
    fn purposes_are_distinct_and_sorted() {
        let export = decode(json!({"records": [{"subjects": ["b", "a", "a"]}]}));
        assert_eq!(export.purposes(), vec!["a", "b"]);
    }

    #[test]
    fn only_the_first_record_is_consulted() {
        let export = decode(json!({
            "records": [{"subjects": ["Haushalt"]}, {"subjects": ["Personal"]}]
        }));
        assert_eq!(export.purposes(), vec!["Haushalt"]);
    }

    #[test]
    fn purposes_fall_back_to_placeholder() {
        for doc in [
            json!({}),
            json!({"records": []}),
            json!({"records": [{}]}),
            json!({"records": [{"subjects": null}]}),
        ] {
            assert_eq!(decode(doc).purposes(), vec![PURPOSE_PLACEHOLDER]);
        }
    }

    #[test]
    fn empty_subject_list_yields_no_purposes() {
        let export = decode(json!({"records": [{"subjects": []}]}));
        assert!(export.purposes().is_empty());
    }

    #[test]
    fn empty_document_uses_every_default() {
        let summary = decode(json!({})).summarize();
        insta::assert_json_snapshot!(summary, @r###"
        {
          "purposes": [
            "<purpose-unclassified>"
          ],
          "retention": "policy-defined",
          "legal_basis": "<Art. 6 GDPR>",
          "recipients": "<internal>"
        }
        "###);
    }

    #[test]
    fn present_lists_are_joined_in_source_order() {
        let summary = decode(json!({
            "records": [{"subjects": ["Finanzen", "Haushalt"], "title": "ignored"}],
            "retention": {"policy": "10y"},
            "legal_basis": ["Art. 6(1)(e)", "Art. 6(1)(c)"],
            "recipients": ["<internal processing units>", "Archiv"]
        }))
        .summarize();

        assert_eq!(summary.purposes, vec!["Finanzen", "Haushalt"]);
        assert_eq!(summary.retention, "10y");
        assert_eq!(summary.legal_basis, "Art. 6(1)(e), Art. 6(1)(c)");
        assert_eq!(summary.recipients, "<internal processing units>, Archiv");
    }

    #[test]
    fn empty_lists_join_to_empty_strings() {
        let summary = decode(json!({"legal_basis": [], "recipients": []})).summarize();
        assert_eq!(summary.legal_basis, "");
        assert_eq!(summary.recipients, "");
    }
}
