//! matrixcsv CLI - serve the matrix API or run an operation locally
//!
//! ```bash
//! matrixcsv serve                       # Start HTTP server (port 8080)
//! matrixcsv serve --port 9000           # or MATRIXCSV_PORT=9000
//! matrixcsv apply invert matrix.csv     # Run one operation on a local file
//! matrixcsv operations                  # List operations and endpoints
//! ```
//!
//! Send a request with:
//!
//! ```bash
//! curl -F 'file=@./matrix.csv' "localhost:8080/echo"
//! ```

use clap::{Parser, Subcommand};
use matrixcsv::{operations_description, read_upload, run, Operation, ServerError};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "matrixcsv")]
#[command(about = "Echo, transpose, flatten, sum or multiply square CSV matrices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "MATRIXCSV_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "MATRIXCSV_PORT", default_value = "8080")]
        port: u16,
    },

    /// Validate a local CSV file and apply one operation to it
    Apply {
        /// Operation to run
        #[arg(value_enum)]
        operation: Operation,

        /// Input CSV file
        input: PathBuf,
    },

    /// Show available operations
    Operations,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port } => cmd_serve(&host, port).await,
        Commands::Apply { operation, input } => cmd_apply(operation, &input),
        Commands::Operations => cmd_operations(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let ip: IpAddr = host
        .parse()
        .map_err(|_| ServerError::InvalidAddress(host.to_string()))?;
    matrixcsv::server::start_server(SocketAddr::new(ip, port)).await?;
    Ok(())
}

fn cmd_apply(operation: Operation, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let upload = read_upload(input).map_err(ServerError::from)?;
    let body = run(operation, &upload)?;
    print!("{}", body);
    Ok(())
}

fn cmd_operations() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", operations_description());
    Ok(())
}
