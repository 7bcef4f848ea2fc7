//! otelsign CLI
//!
//! Command-line interface for signing OTLP/JSON telemetry batches.
//!
//! # Usage
//!
//! ```bash
//! otelsign --help
//! otelsign algorithms
//! otelsign check --alg HS256 --private-key c2VjcmV0
//! otelsign sign --config signer.json --input logs.json --output signed.json
//! cat batches.ndjson | otelsign sign --lines --alg ES256 --private-key-file ec.pem --attribute signature
//! ```

#![deny(unsafe_code)]

mod commands;

use clap::{Parser, Subcommand};
use commands::{SignArgs, SigningArgs};

/// otelsign - Sign OpenTelemetry batches with JSON Web Tokens
#[derive(Parser)]
#[command(name = "otelsign")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "OTELSIGN_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign OTLP/JSON batches read from a file or stdin
    Sign(SignArgs),
    /// Validate the signing configuration and resolve the key
    Check(SigningArgs),
    /// List the supported signing algorithms
    Algorithms,
}

/// Initializes tracing. Logs go to stderr so stdout stays clean for signed output.
fn init_tracing(json: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Some(Commands::Sign(args)) => commands::sign(&args)?,
        Some(Commands::Check(args)) => println!("{}", commands::check(&args)?),
        Some(Commands::Algorithms) => {
            for line in commands::algorithms() {
                println!("{line}");
            }
        }
        None => {
            println!("otelsign CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
