//! Print the OpenAPI document as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use param_echo::doc::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the param-echo OpenAPI document",
    version
)]
struct CliArgs {
    /// Write to this file instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise OpenAPI document")?;
    match args.output {
        Some(path) => fs::write(&path, json)
            .wrap_err_with(|| format!("failed to write OpenAPI document to {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
