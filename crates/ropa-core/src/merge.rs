//! Mapping of extracted values onto `ropa:*` properties.

use crate::normalize::LIST_SEPARATOR;
use crate::process_model::ProcessSummary;
use crate::props::{PropertySet, Upsert};
use crate::records::RecordsSummary;

pub const PROP_PURPOSE: &str = "ropa:purpose";
pub const PROP_DATA_CATEGORIES: &str = "ropa:data-categories";
pub const PROP_DATA_SUBJECTS: &str = "ropa:data-subjects";
pub const PROP_RECIPIENTS: &str = "ropa:recipients";
pub const PROP_RETENTION: &str = "ropa:retention";
pub const PROP_LEGAL_BASIS: &str = "ropa:legal-basis";

/// Separator between internal and external recipient groups.
pub const RECIPIENT_GROUP_SEPARATOR: &str = "; ";

/// One property written by [`merge_properties`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedProperty {
    pub name: &'static str,
    pub upsert: Upsert,
}

/// Upsert the `ropa:*` properties.
///
/// `None` means the source document was not loaded. A property whose
/// source value is empty is skipped and keeps any template value.
pub fn merge_properties(
    props: &mut PropertySet,
    records: Option<&RecordsSummary>,
    process: Option<&ProcessSummary>,
) -> Vec<MergedProperty> {
    let mut merged = Vec::new();
    let mut set = |name: &'static str, value: String| {
        let upsert = props.upsert(name, value);
        tracing::debug!(property = name, ?upsert, "merged property");
        merged.push(MergedProperty { name, upsert });
    };

    if let Some(records) = records {
        set(PROP_PURPOSE, records.purposes.join(LIST_SEPARATOR));
    }
    if let Some(process) = process {
        if !process.data_categories.is_empty() {
            set(PROP_DATA_CATEGORIES, process.data_categories.clone());
        }
        if !process.data_subjects.is_empty() {
            set(PROP_DATA_SUBJECTS, process.data_subjects.clone());
        }
    }

    let recipient_groups: Vec<&str> = [
        records.map(|records| records.recipients.as_str()),
        process.map(|process| process.recipients_ext.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|group| !group.is_empty())
    .collect();
    if !recipient_groups.is_empty() {
        set(
            PROP_RECIPIENTS,
            recipient_groups.join(RECIPIENT_GROUP_SEPARATOR),
        );
    }

    if let Some(records) = records {
        if !records.retention.is_empty() {
            set(PROP_RETENTION, records.retention.clone());
        }
        if !records.legal_basis.is_empty() {
            set(PROP_LEGAL_BASIS, records.legal_basis.clone());
        }
    }

    merged
}
