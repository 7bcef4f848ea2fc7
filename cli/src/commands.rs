//! Subcommand implementations.

use anyhow::{bail, Context, Result};
use clap::Args;
use signer::config::ProcessorConfig;
use signer::otlp::{TelemetryBatch, TelemetryKind};
use signer::processor::SigningProcessor;
use signer::signing::{algorithm_name, KeyFamily, SUPPORTED_ALGORITHMS};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Path value meaning stdin or stdout.
const STDIO: &str = "-";

/// Signing options shared by `sign` and `check`.
///
/// Flags override values loaded from `--config`.
#[derive(Args, Debug, Default)]
pub struct SigningArgs {
    /// JSON configuration file with `alg`, `private_key` and attribute names
    #[arg(short, long, env = "OTELSIGN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Signing algorithm, e.g. RS256
    #[arg(long, env = "OTELSIGN_ALG")]
    pub alg: Option<String>,

    /// PEM private key, or base64 secret for HMAC algorithms
    #[arg(long, env = "OTELSIGN_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// File holding the private key; takes precedence over --private-key
    #[arg(long, env = "OTELSIGN_PRIVATE_KEY_FILE")]
    pub private_key_file: Option<PathBuf>,

    /// Attribute name for resource-level tokens
    #[arg(long, env = "OTELSIGN_RESOURCE_ATTRIBUTE")]
    pub resource_attribute: Option<String>,

    /// Attribute name for scope-level tokens
    #[arg(long, env = "OTELSIGN_SCOPE_ATTRIBUTE")]
    pub scope_attribute: Option<String>,

    /// Attribute name for record-level tokens
    #[arg(long, env = "OTELSIGN_ATTRIBUTE")]
    pub attribute: Option<String>,
}

impl SigningArgs {
    /// Assembles a processor configuration from the config file and flags.
    pub fn to_config(&self) -> Result<ProcessorConfig> {
        let mut config = match &self.config {
            Some(path) => ProcessorConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ProcessorConfig::default(),
        };

        if let Some(alg) = &self.alg {
            config.alg.clone_from(alg);
        }
        if let Some(key) = &self.private_key {
            config.private_key.clone_from(key);
        }
        if let Some(path) = &self.private_key_file {
            config.private_key = fs::read_to_string(path)
                .with_context(|| format!("Failed to read private key from {}", path.display()))?;
        }
        if let Some(name) = &self.resource_attribute {
            config.resource_attribute.clone_from(name);
        }
        if let Some(name) = &self.scope_attribute {
            config.scope_attribute.clone_from(name);
        }
        if let Some(name) = &self.attribute {
            config.attribute.clone_from(name);
        }

        Ok(config)
    }

    fn processor(&self) -> Result<SigningProcessor> {
        let config = self.to_config()?;
        SigningProcessor::new(&config).context("Invalid signing configuration")
    }
}

/// Arguments of the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Telemetry kind (logs, metrics, traces); detected from the document when omitted
    #[arg(short, long)]
    pub kind: Option<TelemetryKind>,

    /// Input file, or - for stdin
    #[arg(short, long, default_value = STDIO)]
    pub input: String,

    /// Output file, or - for stdout
    #[arg(short, long, default_value = STDIO)]
    pub output: String,

    /// Pretty-print the signed batch
    #[arg(long, conflicts_with = "lines")]
    pub pretty: bool,

    /// Treat the input as newline-delimited batches, one per line
    #[arg(long)]
    pub lines: bool,

    #[command(flatten)]
    pub signing: SigningArgs,
}

/// Runs `sign`: reads, signs and writes batches.
pub fn sign(args: &SignArgs) -> Result<()> {
    let processor = args.signing.processor()?;
    let input = read_input(&args.input)?;

    let output = if args.lines {
        sign_lines(&processor, args.kind, &input)?
    } else {
        let mut output = sign_batch(&processor, args.kind, &input, args.pretty)?;
        output.push(b'\n');
        output
    };

    write_output(&args.output, &output)
}

/// Runs `check`: validates the configuration and describes it.
pub fn check(args: &SigningArgs) -> Result<String> {
    let processor = args.processor()?;
    let names = processor.attribute_names();
    let level = |name: &str| {
        if name.is_empty() {
            "(disabled)".to_string()
        } else {
            name.to_string()
        }
    };

    tracing::info!("Signing configuration is valid");
    Ok(format!(
        "algorithm: {}\nresource attribute: {}\nscope attribute: {}\nrecord attribute: {}",
        algorithm_name(processor.algorithm()),
        level(&names.resource),
        level(&names.scope),
        level(&names.record),
    ))
}

/// Lists supported algorithms with their key family.
pub fn algorithms() -> Vec<String> {
    SUPPORTED_ALGORITHMS
        .iter()
        .map(|&alg| format!("{:<6} {}", algorithm_name(alg), KeyFamily::of(alg)))
        .collect()
}

fn sign_batch(
    processor: &SigningProcessor,
    kind: Option<TelemetryKind>,
    input: &[u8],
    pretty: bool,
) -> Result<Vec<u8>> {
    let mut batch = match kind {
        Some(kind) => TelemetryBatch::from_json(kind, input),
        None => TelemetryBatch::detect_json(input),
    }
    .context("Failed to decode telemetry batch")?;

    let summary = processor
        .process(&mut batch)
        .context("Failed to sign telemetry batch")?;
    tracing::info!(
        kind = %batch.kind(),
        tokens = summary.total(),
        "Signed telemetry batch"
    );

    let encoded = if pretty {
        batch.to_json_pretty()
    } else {
        batch.to_json()
    };
    encoded.context("Failed to encode telemetry batch")
}

/// Signs newline-delimited batches. Blank lines are skipped.
fn sign_lines(
    processor: &SigningProcessor,
    kind: Option<TelemetryKind>,
    input: &[u8],
) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len());
    for (number, line) in input.split(|&b| b == b'\n').enumerate() {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        let signed = sign_batch(processor, kind, line, false)
            .with_context(|| format!("Line {}", number + 1))?;
        output.extend_from_slice(&signed);
        output.push(b'\n');
    }
    Ok(output)
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == STDIO {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read(input).with_context(|| format!("Failed to read {input}"))
}

fn write_output(output: &str, bytes: &[u8]) -> Result<()> {
    if output == STDIO {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes).context("Failed to write stdout")?;
        return stdout.flush().context("Failed to write stdout");
    }
    if Path::new(output).is_dir() {
        bail!("Output {output} is a directory");
    }
    fs::write(output, bytes).with_context(|| format!("Failed to write {output}"))
}
