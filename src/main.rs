#![deny(missing_docs)]

//! # oas-tables CLI
//!
//! Normalizes an OpenAPI document into a sorted entity envelope for
//! downstream generators.

use clap::Parser;
use oas_tables::{run, AppResult, OutputTarget};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Normalizes an OpenAPI document into a sorted entity envelope")]
struct Cli {
    /// Path to the OpenAPI document (JSON or YAML).
    #[clap(short, long)]
    schema: PathBuf,

    /// Output path; "-" writes to stdout. Defaults to the input path with
    /// its extension replaced by "json".
    #[clap(short, long)]
    output: Option<String>,
}

fn execute(cli: &Cli) -> AppResult<()> {
    let target = match cli.output.as_deref() {
        Some("-") => OutputTarget::Stdout,
        Some(path) => OutputTarget::File(PathBuf::from(path)),
        None => OutputTarget::File(cli.schema.with_extension("json")),
    };
    run(&cli.schema, &target)
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = execute(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
