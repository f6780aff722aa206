//! # ropa-oscal
//!
//! OSCAL helpers around the ROPA system security plan:
//! - profile resolution against a catalog
//! - implemented-requirement scaffolding from a resolved profile

use ropa_core::{EtlError, load_document, save_document};
use std::path::Path;

pub mod profile;
pub mod requirements;

pub use profile::{DEFAULT_OSCAL_VERSION, ResolvedProfile, included_control_ids, resolve_profile};
pub use requirements::{
    ImplementedRequirement, ImplementedRequirements, Statement, implemented_requirements,
};

/// Errors from OSCAL document helpers.
#[derive(Debug, thiserror::Error)]
pub enum OscalError {
    #[error(
        "No included control IDs found in profile. Check profile.imports/include-controls."
    )]
    NoIncludedControls,

    #[error(transparent)]
    Document(#[from] EtlError),
}

/// Resolve `profile_path` against `catalog_path` and write the result.
pub fn resolve_profile_file(
    profile_path: impl AsRef<Path>,
    catalog_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
) -> Result<ResolvedProfile, OscalError> {
    let profile = load_document(profile_path)?;
    let catalog = load_document(catalog_path)?;
    let resolved = resolve_profile(&profile, &catalog)?;
    save_document(out_path, &resolved.document)?;
    Ok(resolved)
}

/// Derive implemented requirements from `profile_path` and write them.
pub fn implemented_requirements_file(
    profile_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
) -> Result<ImplementedRequirements, OscalError> {
    let profile = load_document(profile_path)?;
    let requirements = implemented_requirements(&profile);
    let rendered = serde_json::to_value(&requirements).map_err(EtlError::from)?;
    save_document(out_path, &rendered)?;
    Ok(requirements)
}

pub(crate) fn fresh_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}
