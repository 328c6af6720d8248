use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use launcher_obfuscator::binary::BinaryScrubber;
use launcher_obfuscator::config::load_config;
use launcher_obfuscator::deobfuscator::decode_accessors;
use launcher_obfuscator::errors::AppError;
use launcher_obfuscator::logger;
use launcher_obfuscator::metrics::Metrics;
use launcher_obfuscator::tool::SystemToolRunner;
use launcher_obfuscator::LauncherObfuscator;
use prometheus::{Encoder, TextEncoder};
use tracing::info;

#[derive(Parser)]
#[command(name = "launcher-obfuscator", version)]
struct Cli {
    /// Configuration file (JSON, YAML or TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print Prometheus counters to stdout when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite launcher source before compilation
    Obfuscate {
        #[arg(short, long)]
        source: PathBuf,
        /// Defaults to rewriting the source in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Strip sections and scrub residual strings from a compiled launcher
    Strip {
        #[arg(short, long)]
        binary: PathBuf,
        /// Launcher source as it was before obfuscation
        #[arg(short, long)]
        launcher: PathBuf,
    },
    /// Overwrite the compression signature in a packed binary
    Scrub {
        #[arg(short, long)]
        binary: PathBuf,
    },
    /// Decode the accessor functions of an obfuscated source
    Reveal {
        #[arg(short, long)]
        source: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logger::init_logging();
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    let registry = prometheus::Registry::new();
    let metrics = Metrics::new(&registry)?;

    let scrubber = || {
        let runner = SystemToolRunner::new(Duration::from_secs(cfg.tool_timeout_secs));
        BinaryScrubber::new(Box::new(runner), &cfg)
    };

    match cli.command {
        Command::Obfuscate { source, output } => {
            let output = output.unwrap_or_else(|| source.clone());
            info!(source = %source.display(), output = %output.display(), "obfuscating launcher");
            let mut obfuscator = LauncherObfuscator::new(&cfg)?;
            let stats = obfuscator.obfuscate_launcher(&source, &output).await?;
            metrics.record_pass(&stats);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Strip { binary, launcher } => {
            let report = scrubber().strip_binary(&binary, &launcher).await?;
            metrics.record_strip(&report);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Scrub { binary } => {
            let fragments = scrubber().scrub_signature(&binary).await?;
            metrics.record_scrub(fragments);
        }
        Command::Reveal { source } => {
            let text = tokio::fs::read_to_string(&source)
                .await
                .map_err(launcher_obfuscator::ObfuscationError::from)?;
            println!("{}", serde_json::to_string_pretty(&decode_accessors(&text))?);
        }
    }

    if cli.metrics {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&registry.gather(), &mut buf)?;
        println!("{}", String::from_utf8_lossy(&buf));
    }
    Ok(())
}
