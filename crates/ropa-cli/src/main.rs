//! ROPA CLI: the `ropa` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging();

    match cli.command {
        None => commands::generate::run(commands::generate::Args::default()),

        Some(Commands::Generate {
            template,
            records_export,
            process_model,
            out,
        }) => commands::generate::run(commands::generate::Args {
            template,
            records_export,
            process_model,
            out,
        }),

        Some(Commands::ResolveProfile {
            profile,
            catalog,
            out,
        }) => commands::resolve_profile::run(profile, catalog, out),

        Some(Commands::ProfileIr { profile, out }) => commands::profile_ir::run(profile, out),
    }
}
