//! Dump the OpenAPI document to stdout for external tooling.
//!
//! ```text
//! cargo run --bin openapi-dump            # JSON
//! cargo run --bin openapi-dump -- --yaml  # YAML
//! ```

use clap::Parser;
use utoipa::OpenApi;

use backend::ApiDoc;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the OpenAPI specification")]
struct Args {
    /// Emit YAML instead of JSON.
    #[arg(long)]
    yaml: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let doc = ApiDoc::openapi();

    let rendered = if args.yaml {
        doc.to_yaml()?
    } else {
        doc.to_pretty_json()?
    };
    println!("{rendered}");
    Ok(())
}
