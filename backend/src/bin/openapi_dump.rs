//! Print the OpenAPI document as JSON for external tooling.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use galleta::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the recipe API's OpenAPI document as JSON",
    version
)]
struct CliArgs {
    /// Write to this file instead of standard output.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;

    match args.output {
        Some(path) => std::fs::write(path, document + "\n"),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{document}")
        }
    }
}
