//! Access to the OSCAL system security plan template.
//!
//! The template stays an untyped JSON tree. Only two paths are touched:
//! `system-characteristics.props` and `metadata.last-modified`. Nothing
//! else is validated, and everything else is written back as it was read.

use crate::error::EtlError;
use crate::props::PropertySet;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

pub const SYSTEM_CHARACTERISTICS_PATH: &str = "system-security-plan.system-characteristics";
pub const PROPS_PATH: &str = "system-security-plan.system-characteristics.props";
pub const LAST_MODIFIED_PATH: &str = "system-security-plan.metadata.last-modified";

const SSP_KEY: &str = "system-security-plan";
const SYSTEM_CHARACTERISTICS_KEY: &str = "system-characteristics";
const PROPS_KEY: &str = "props";
const METADATA_KEY: &str = "metadata";
const LAST_MODIFIED_KEY: &str = "last-modified";

/// Whole-second UTC timestamp with a literal `Z`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SspTemplate {
    document: Value,
}

impl SspTemplate {
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EtlError> {
        crate::document::load_document(path).map(Self::from_value)
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn into_value(self) -> Value {
        self.document
    }

    fn system_characteristics(&mut self) -> Result<&mut Map<String, Value>, EtlError> {
        self.document
            .get_mut(SSP_KEY)
            .and_then(|ssp| ssp.get_mut(SYSTEM_CHARACTERISTICS_KEY))
            .and_then(Value::as_object_mut)
            .ok_or(EtlError::MissingPath(SYSTEM_CHARACTERISTICS_PATH))
    }

    /// Current `props`, empty when the key is absent or `null`.
    ///
    /// Entries are not decoded, so any entry shape is accepted.
    pub fn properties(&mut self) -> Result<PropertySet, EtlError> {
        let characteristics = self.system_characteristics()?;
        let entries = match characteristics.get(PROPS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => {
                Vec::<Value>::deserialize(raw).map_err(|source| EtlError::MalformedTemplate {
                    path: PROPS_PATH,
                    source,
                })?
            }
        };
        Ok(PropertySet::from_entries(entries))
    }

    /// Write `props` back. Without any upsert the template keeps whatever
    /// it had under `props`, including no key at all.
    pub fn set_properties(&mut self, properties: PropertySet) -> Result<(), EtlError> {
        let characteristics = self.system_characteristics()?;
        if !properties.is_modified() {
            return Ok(());
        }
        characteristics.insert(
            PROPS_KEY.to_string(),
            Value::Array(properties.into_entries()),
        );
        Ok(())
    }

    /// Overwrite `metadata.last-modified`, which must already exist.
    pub fn stamp_last_modified(&mut self, now: DateTime<Utc>) -> Result<String, EtlError> {
        let slot = self
            .document
            .get_mut(SSP_KEY)
            .and_then(|ssp| ssp.get_mut(METADATA_KEY))
            .and_then(|metadata| metadata.get_mut(LAST_MODIFIED_KEY))
            .ok_or(EtlError::MissingPath(LAST_MODIFIED_PATH))?;
        let stamp = format_timestamp(now);
        *slot = Value::String(stamp.clone());
        Ok(stamp)
    }
}
