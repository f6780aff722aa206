//! String-set normalization shared by both extractors.

use std::collections::BTreeSet;

/// Separator for values inside one property.
pub const LIST_SEPARATOR: &str = ", ";

/// Distinct values in ascending code-point order.
pub fn sorted_distinct<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Trimmed, non-empty, distinct values in ascending order.
pub fn sorted_distinct_trimmed<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    sorted_distinct(
        values
            .into_iter()
            .map(str::trim)
            .filter(|value| !value.is_empty()),
    )
}

/// Join values with [`LIST_SEPARATOR`], falling back to `placeholder` when
/// there is nothing to join.
pub fn join_or(values: &[String], placeholder: &str) -> String {
    if values.is_empty() {
        placeholder.to_string()
    } else {
        values.join(LIST_SEPARATOR)
    }
}
