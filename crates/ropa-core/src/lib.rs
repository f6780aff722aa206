//! # ropa-core
//!
//! Populates the `ropa:*` properties of an OSCAL system security plan from
//! two optional sources:
//! - a records export (purposes, retention, legal basis, recipients)
//! - a process model (data categories, data subjects, external recipients)
//!
//! ## Data flow
//!
//! ```text
//! records export ─┐
//!                 ├─ summaries ─ merge ─ PropertySet ─┐
//! process model ──┘                                   ├─ stamp ─ save
//! SSP template ───────────────────────────────────────┘
//! ```

pub mod document;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod process_model;
pub mod props;
pub mod records;
pub mod template;

pub use document::{load_document, load_optional_document, save_document};
pub use error::EtlError;
pub use merge::{
    MergedProperty, PROP_DATA_CATEGORIES, PROP_DATA_SUBJECTS, PROP_LEGAL_BASIS, PROP_PURPOSE,
    PROP_RECIPIENTS, PROP_RETENTION, merge_properties,
};
pub use pipeline::{
    DEFAULT_OUTPUT_PATH, DEFAULT_PROCESS_MODEL_PATH, DEFAULT_RECORDS_EXPORT_PATH,
    DEFAULT_TEMPLATE_PATH, PipelineConfig, RunReport, run, run_at,
};
pub use process_model::{ProcessModel, ProcessSummary};
pub use props::{PropertySet, Upsert};
pub use records::{RecordsExport, RecordsSummary};
pub use template::{SspTemplate, format_timestamp};
