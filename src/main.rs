//! civitas CLI — city sustainability reports from the command line.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use civitas::analysis;
use civitas::llms::Groq;
use civitas::taskforce::TaskForce;

const SAMPLE_CSV: &str = "date,pm25,pm10,no2\n\
    2025-01-01,65,118,40\n\
    2025-03-01,58,100,38\n\
    2025-05-01,50,92,35\n\
    2025-07-01,44,85,32\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run all five agents and print the merged report.
    Full,
    /// Run only the News Analyst.
    News,
    /// Run only the Policy Reviewer.
    Policy,
    /// Run only the Innovations Scout.
    Innovations,
    /// Summarize the CSV locally, no model calls.
    Data,
}

/// Assemble a city sustainability report from news, policy, innovation,
/// and air quality research agents.
#[derive(Debug, Parser)]
#[command(name = "civitas", version, about)]
struct Cli {
    /// City to report on.
    #[arg(long, default_value = "Lahore, Pakistan")]
    city: String,

    /// Path to an air quality CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Use a built-in sample dataset instead of --csv.
    #[arg(long, conflicts_with = "csv")]
    sample: bool,

    /// Which part of the task force to run.
    #[arg(long, value_enum, default_value_t = Mode::Full)]
    mode: Mode,

    /// Model override, defaults to the provider's configured model.
    #[arg(long)]
    model: Option<String>,
}

/// Temp path for the sample dataset, unique per invocation so
/// concurrent runs do not clobber each other's file.
fn sample_path() -> PathBuf {
    static SEQ: AtomicU32 = AtomicU32::new(0);
    std::env::temp_dir().join(format!(
        "civitas_sample_{}_{}.csv",
        std::process::id(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ))
}

#[tokio::main]
async fn main() -> civitas::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let csv_path = if cli.sample {
        let path = sample_path();
        std::fs::write(&path, SAMPLE_CSV)?;
        Some(path)
    } else {
        cli.csv.clone()
    };

    // Local analysis needs no provider.
    if cli.mode == Mode::Data {
        let Some(path) = csv_path else {
            eprintln!("--mode data requires --csv or --sample");
            std::process::exit(2);
        };
        println!("{}", analysis::summarize(&path)?);
        return Ok(());
    }

    let provider = Arc::new(Groq::from_env()?);
    let mut force = TaskForce::new(provider);
    if let Some(model) = cli.model {
        force = force.with_model(model);
    }

    match cli.mode {
        Mode::News => println!("{}", force.run_news(&cli.city).await?),
        Mode::Policy => println!("{}", force.run_policy(&cli.city).await?),
        Mode::Innovations => println!("{}", force.run_innovations(&cli.city).await?),
        Mode::Full | Mode::Data => {
            let report = force.run(&cli.city, csv_path.as_deref()).await?;
            println!("{report}");
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sample_paths_are_unique_per_invocation() {
        assert_ne!(sample_path(), sample_path());
    }
}
