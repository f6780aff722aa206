//! The end-to-end transform: load → extract → merge → stamp → save.

use crate::document::{load_optional_document, save_document};
use crate::error::EtlError;
use crate::merge::{MergedProperty, merge_properties};
use crate::process_model::{ProcessModel, ProcessSummary};
use crate::records::{RecordsExport, RecordsSummary};
use crate::template::SspTemplate;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE_PATH: &str = "oscal/ssp/ssp_template_ropa_full.json";
pub const DEFAULT_RECORDS_EXPORT_PATH: &str = "samples/xdomea.json";
pub const DEFAULT_PROCESS_MODEL_PATH: &str = "samples/bpmn.json";
pub const DEFAULT_OUTPUT_PATH: &str = "build/ssp_generated.json";

/// Locations of the three inputs and the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub template: PathBuf,
    pub records_export: PathBuf,
    pub process_model: PathBuf,
    pub output: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            records_export: PathBuf::from(DEFAULT_RECORDS_EXPORT_PATH),
            process_model: PathBuf::from(DEFAULT_PROCESS_MODEL_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl PipelineConfig {
    /// Resolve every relative path against `root`.
    pub fn rooted_at(&self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            template: root.join(&self.template),
            records_export: root.join(&self.records_export),
            process_model: root.join(&self.process_model),
            output: root.join(&self.output),
        }
    }
}

/// What one run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output: PathBuf,
    pub last_modified: String,
    pub records: Option<RecordsSummary>,
    pub process: Option<ProcessSummary>,
    pub merged: Vec<MergedProperty>,
}

/// Run the transform, stamping the current time.
pub fn run(config: &PipelineConfig) -> Result<RunReport, EtlError> {
    run_at(config, Utc::now())
}

/// Run the transform with an explicit timestamp.
pub fn run_at(config: &PipelineConfig, now: DateTime<Utc>) -> Result<RunReport, EtlError> {
    let mut template = SspTemplate::load(&config.template)?;
    let records = load_source::<RecordsExport>(&config.records_export, "records export")?
        .map(|export| export.summarize());
    let process = load_source::<ProcessModel>(&config.process_model, "process model")?
        .map(|model| model.summarize());

    let mut props = template.properties()?;
    let merged = merge_properties(&mut props, records.as_ref(), process.as_ref());
    template.set_properties(props)?;

    let last_modified = template.stamp_last_modified(now)?;
    save_document(&config.output, template.as_value())?;
    tracing::info!(
        output = %config.output.display(),
        merged = merged.len(),
        "generated system security plan"
    );

    Ok(RunReport {
        output: config.output.clone(),
        last_modified,
        records,
        process,
        merged,
    })
}

fn load_source<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<Option<T>, EtlError> {
    let Some(raw) = load_optional_document(path)? else {
        return Ok(None);
    };
    serde_json::from_value(raw)
        .map(Some)
        .map_err(|source| EtlError::Decode {
            what,
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::load_document;
    use chrono::TimeZone;
    use serde_json::json;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_root(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "ropa-pipeline-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should exist");
        path
    }

    fn write_json(path: &Path, value: serde_json::Value) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("fixture dir should exist");
        }
        fs::write(path, serde_json::to_vec_pretty(&value).expect("fixture should encode"))
            .expect("fixture should write");
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, 10, 22, 5)
            .single()
            .expect("valid timestamp")
    }

    fn minimal_template() -> serde_json::Value {
        json!({
            "system-security-plan": {
                "system-characteristics": {"props": []},
                "metadata": {"last-modified": "2020-01-01T00:00:00Z"}
            }
        })
    }

    #[test]
    fn default_config_uses_fixed_relative_paths() {
        let config = PipelineConfig::default();
        assert_eq!(config.template, PathBuf::from(DEFAULT_TEMPLATE_PATH));
        assert_eq!(config.output, PathBuf::from("build/ssp_generated.json"));

        let rooted = config.rooted_at("/work");
        assert_eq!(rooted.records_export, PathBuf::from("/work/samples/xdomea.json"));
    }

    #[test]
    fn absent_sources_only_touch_the_timestamp() {
        let root = temp_root("absent");
        let config = PipelineConfig::default().rooted_at(&root);
        write_json(&config.template, minimal_template());

        let report = run_at(&config, fixed_now()).expect("run should succeed");

        assert!(report.merged.is_empty());
        let output = load_document(&config.output).expect("output should exist");
        assert_eq!(
            output,
            json!({
                "system-security-plan": {
                    "system-characteristics": {"props": []},
                    "metadata": {"last-modified": "2024-03-11T10:22:05Z"}
                }
            })
        );
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn empty_records_export_counts_as_not_loaded() {
        let root = temp_root("empty-records");
        let config = PipelineConfig::default().rooted_at(&root);
        write_json(&config.template, minimal_template());
        write_json(&config.records_export, json!({}));

        let report = run_at(&config, fixed_now()).expect("run should succeed");
        assert!(report.records.is_none());
        assert!(report.merged.is_empty());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_template_fails_without_output() {
        let root = temp_root("no-template");
        let config = PipelineConfig::default().rooted_at(&root);

        let result = run_at(&config, fixed_now());
        assert!(matches!(result, Err(EtlError::NotFound { .. })));
        assert!(!config.output.exists());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn wrongly_shaped_source_is_a_decode_error() {
        let root = temp_root("decode");
        let config = PipelineConfig::default().rooted_at(&root);
        write_json(&config.template, minimal_template());
        write_json(&config.process_model, json!({"lanes": "not-a-list"}));

        match run_at(&config, fixed_now()) {
            Err(EtlError::Decode { what, path, .. }) => {
                assert_eq!(what, "process model");
                assert_eq!(path, config.process_model);
            }
            other => panic!("expected decode error, got {other:?}"),
        }
        assert!(!config.output.exists());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_last_modified_aborts_before_writing() {
        let root = temp_root("no-metadata");
        let config = PipelineConfig::default().rooted_at(&root);
        write_json(
            &config.template,
            json!({"system-security-plan": {"system-characteristics": {}}}),
        );

        let result = run_at(&config, fixed_now());
        assert!(matches!(result, Err(EtlError::MissingPath(_))));
        assert!(!config.output.exists());
        let _ = fs::remove_dir_all(root);
    }
}
