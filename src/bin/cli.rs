use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use filedrift::{ChangeDecision, DriftDetector, DriftState, FileStorage};

#[derive(Parser)]
#[command(name = "filedrift")]
#[command(about = "Detect content changes in a file against a persisted SHA-256 checksum")]
#[command(version)]
struct Cli {
    /// File whose content is monitored
    #[arg(short, long, env = "FILEDRIFT_TARGET", default_value = "file.txt")]
    target: PathBuf,

    /// Checksum record location
    #[arg(short, long, env = "FILEDRIFT_CHECKSUM", default_value = "checksum.json")]
    checksum: PathBuf,

    /// Output format: text, json
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Exit with status 1 when a change is detected
    #[arg(long)]
    fail_on_change: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("filedrift=debug")
    } else {
        EnvFilter::new("filedrift=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let fail_on_change = cli.fail_on_change;

    match run(cli) {
        Ok(decision) if fail_on_change && decision.changed() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "✗ Error:".red(), e);
            if fail_on_change {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<ChangeDecision, Box<dyn std::error::Error>> {
    debug!(
        "Checking {} against {}",
        cli.target.display(),
        cli.checksum.display()
    );

    let mut detector = DriftDetector::new(FileStorage::new(&cli.checksum));
    let decision = detector.check_file(&cli.target)?;

    match cli.output {
        OutputFormat::Text => print_decision(&decision),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decision)?),
    }

    Ok(decision)
}

fn print_decision(decision: &ChangeDecision) {
    if decision.changed() {
        println!("{}", "==> File changes detected <==".yellow());
    } else {
        println!("{}", "==> No file changes detected <==".green());
    }

    if decision.state == DriftState::Baseline {
        println!("  Baseline recorded: {}", decision.digest.to_string().dimmed());
    }
}
