use crate::support::exit_with;
use ropa_core::{
    DEFAULT_OUTPUT_PATH, DEFAULT_PROCESS_MODEL_PATH, DEFAULT_RECORDS_EXPORT_PATH,
    DEFAULT_TEMPLATE_PATH, PipelineConfig,
};
use std::path::PathBuf;

pub struct Args {
    pub template: String,
    pub records_export: String,
    pub process_model: String,
    pub out: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE_PATH.to_string(),
            records_export: DEFAULT_RECORDS_EXPORT_PATH.to_string(),
            process_model: DEFAULT_PROCESS_MODEL_PATH.to_string(),
            out: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl From<Args> for PipelineConfig {
    fn from(args: Args) -> Self {
        Self {
            template: PathBuf::from(args.template),
            records_export: PathBuf::from(args.records_export),
            process_model: PathBuf::from(args.process_model),
            output: PathBuf::from(args.out),
        }
    }
}

pub fn run(args: Args) {
    let config = PipelineConfig::from(args);
    let report = ropa_core::run(&config).unwrap_or_else(|err| exit_with(err, 1));
    tracing::debug!(
        last_modified = %report.last_modified,
        records_loaded = report.records.is_some(),
        process_loaded = report.process.is_some(),
        merged = report.merged.len(),
        "generate finished"
    );
    println!("Wrote {}", report.output.display());
}
