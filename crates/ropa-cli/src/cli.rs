use clap::{Parser, Subcommand};
use ropa_core::{
    DEFAULT_OUTPUT_PATH, DEFAULT_PROCESS_MODEL_PATH, DEFAULT_RECORDS_EXPORT_PATH,
    DEFAULT_TEMPLATE_PATH,
};

#[derive(Parser)]
#[command(
    name = "ropa",
    about = "ROPA: fill OSCAL system security plan properties from records-export and process-model documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge records-export and process-model values into the SSP template
    Generate {
        /// SSP template (required input)
        #[arg(long, default_value = DEFAULT_TEMPLATE_PATH)]
        template: String,

        /// Records export (xdomea-style); skipped when missing
        #[arg(long, default_value = DEFAULT_RECORDS_EXPORT_PATH)]
        records_export: String,

        /// Process model (BPMN-style); skipped when missing
        #[arg(long, default_value = DEFAULT_PROCESS_MODEL_PATH)]
        process_model: String,

        /// Output path; parent directories are created
        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        out: String,
    },

    /// Filter a catalog down to the controls a profile includes
    ResolveProfile {
        /// Profile JSON
        profile: String,

        /// Catalog JSON
        catalog: String,

        /// Resolved catalog output
        out: String,
    },

    /// Scaffold implemented requirements from a resolved profile
    ProfileIr {
        /// Resolved profile JSON
        profile: String,

        /// Implemented-requirements output
        out: String,
    },
}
