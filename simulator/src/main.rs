use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use wheelhouse_execution::TracingSink;
use wheelhouse_simulator::{Config, FileSink, Simulator};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a wheelhouse strategy against a seeded wheel.", long_about = None)]
struct Args {
    /// YAML file with the table and strategy.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset to run when no config file is given.
    #[arg(long)]
    strategy: Option<String>,

    #[arg(long)]
    spins: Option<u64>,

    #[arg(long)]
    bankroll: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    log_level: Option<String>,

    /// Append per-spin diagnostics (JSON lines) to this file.
    #[arg(long)]
    diagnostics: Option<PathBuf>,

    #[arg(long)]
    flush_every: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let mut config = match (&args.config, &args.strategy) {
        (Some(path), _) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path.display()))?;
            Config::from_yaml(&contents).context("could not parse config file")?
        }
        (None, Some(name)) => Config::from_preset(name),
        (None, None) => anyhow::bail!("either --config or --strategy must be provided"),
    };
    if let Some(spins) = args.spins {
        config.spins = spins;
    }
    if let Some(bankroll) = args.bankroll {
        config.bankroll = bankroll;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    if let Some(diagnostics) = args.diagnostics {
        config.diagnostics = Some(diagnostics.display().to_string());
    }
    if let Some(flush_every) = args.flush_every {
        config.flush_every = flush_every;
    }
    let config = config.validate().context("invalid configuration")?;

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();
    info!(
        strategy = config.runtime.name(),
        spins = config.spins,
        bankroll = config.bankroll,
        seed = config.seed,
        "starting session"
    );

    // Run the session off the async workers so the writer task keeps draining
    let simulator = Simulator::new(config.runtime, config.bankroll, config.seed);
    let spins = config.spins;
    let report = match config.diagnostics {
        Some(path) => {
            let (sink, writer) = FileSink::spawn(path, config.flush_every);
            let report = tokio::task::spawn_blocking(move || simulator.run(spins, &sink))
                .await
                .context("session task failed")?;
            let written = writer.finish().await;
            info!(written, "diagnostics flushed");
            report
        }
        None => tokio::task::spawn_blocking(move || simulator.run(spins, &TracingSink))
            .await
            .context("session task failed")?,
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("could not serialize report")?
    );
    Ok(())
}
