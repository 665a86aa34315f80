#![deny(missing_docs)]

//! # Reroot CLI
//!
//! Regenerates Go sources from the protobuf schemas under a base directory,
//! then relocates the imports that point at the old contract root.
//!
//! Phases:
//! - `generate`: runs `protoc` on every schema file.
//! - `patch`: rewrites matching imports, keeping a backup of every patched file.

use clap::Parser;
use reroot_core::config::{
    DEFAULT_NEW_PREFIX, DEFAULT_OLD_PREFIX, DEFAULT_SCHEMA_EXTENSION, DEFAULT_SOURCE_EXTENSION,
};
use reroot_core::{FsStorage, GoSyntax, RelocationConfig, RelocationRule};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;
use crate::generator::{ProtocGenerator, ShellExecutor};
use crate::pipeline::PhaseSummary;

mod error;
mod generator;
mod pipeline;
mod walker;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Relocate generated Go imports under a new root")]
struct Cli {
    /// Directory holding the schemas and generated sources.
    #[clap(default_value = "./staging")]
    base_dir: PathBuf,

    /// Import root to relocate.
    #[clap(long, env = "REROOT_OLD_PREFIX", default_value = DEFAULT_OLD_PREFIX)]
    old_prefix: String,

    /// Root prepended to every matching import.
    #[clap(long, env = "REROOT_NEW_PREFIX", default_value = DEFAULT_NEW_PREFIX)]
    new_prefix: String,

    /// Extension of the sources to patch.
    #[clap(long, env = "REROOT_SOURCE_EXT", default_value = DEFAULT_SOURCE_EXTENSION)]
    source_ext: String,

    /// Extension of the schemas to generate from.
    #[clap(long, env = "REROOT_SCHEMA_EXT", default_value = DEFAULT_SCHEMA_EXTENSION)]
    schema_ext: String,

    /// Generator program.
    #[clap(long, env = "REROOT_PROTOC", default_value = "protoc")]
    protoc: String,

    /// Options passed to the Go plugin (`--go_out=<options>:<dir>`).
    #[clap(long, env = "REROOT_GO_OUT", default_value = "plugins=grpc")]
    go_out: String,

    /// Do not run the generator.
    #[clap(long)]
    skip_generate: bool,

    /// Do not patch imports.
    #[clap(long)]
    skip_patch: bool,
}

impl Cli {
    fn relocation_config(&self) -> RelocationConfig {
        RelocationConfig::default()
            .with_rule(RelocationRule::new(&self.old_prefix, &self.new_prefix))
            .with_source_extension(&self.source_ext)
            .with_schema_extension(&self.schema_ext)
    }
}

fn init_tracing() {
    // RUST_LOG takes precedence
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn log_summary(phase: &str, summary: &PhaseSummary) {
    tracing::debug!(
        phase,
        visited = summary.visited,
        succeeded = summary.succeeded,
        patched = summary.patched,
        failed = summary.failed,
        "Phase finished"
    );
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.relocation_config();

    if !cli.skip_generate {
        let generator = ProtocGenerator::new(&cli.protoc, &cli.go_out, ShellExecutor);
        match pipeline::generate_sources(&cli.base_dir, &config, &generator) {
            Ok(summary) => log_summary("generate", &summary),
            Err(e) => tracing::error!(error = %e, "Error during creation of generated sources"),
        }
    }

    if !cli.skip_patch {
        match pipeline::patch_sources(&cli.base_dir, &config, &GoSyntax, &FsStorage) {
            Ok(summary) => log_summary("patch", &summary),
            Err(e) => tracing::error!(error = %e, "Error while patching"),
        }
    }

    Ok(())
}
