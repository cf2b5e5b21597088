//! Sheetfix API Server binary
//!
//! Holds one uploaded spreadsheet in memory and serves find/replace and
//! Excel/PDF download endpoints.

use clap::Parser;
use royalbit_sheetfix::api::{run_api_server, ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "sheetfix-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Sheetfix API Server - spreadsheet find/replace over HTTP")]
#[command(long_about = r#"
Sheetfix API Server

Endpoints:
  - POST /upload          - Upload a spreadsheet (multipart field "file")
  - POST /replace         - {mode, find, replace, column?}
  - GET  /download/excel  - Current table as updated.xlsx
  - GET  /download/pdf    - Current table as updated.pdf

Additional endpoints:
  - GET  /health          - Health check
  - GET  /version         - Server version info
  - GET  /                - API documentation

Example usage:
  sheetfix-server                          # Start on localhost:10000
  sheetfix-server --host 0.0.0.0 --port 3000

  curl -F file=@people.xlsx http://localhost:10000/upload
  curl -X POST http://localhost:10000/replace \
    -H "Content-Type: application/json" \
    -d '{"mode": "single-column", "column": "city", "find": "nyc", "replace": "New York"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SHEETFIX_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "10000", env = "SHEETFIX_PORT")]
    port: u16,

    /// Largest accepted upload, in MiB
    #[arg(long, default_value = "16", env = "SHEETFIX_MAX_UPLOAD_MB")]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
    };

    run_api_server(config).await
}
