use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysmon::app::App;
use sysmon::config::{self, load_config, load_config_from_path};
use sysmon::event::InputHandler;
use sysmon::logging;
use sysmon::session::Session;
use sysmon::system::logical_cores;
use sysmon::system::process::ProcessSampler;
use sysmon::system::snapshot::Collector;
use sysmon::system::sources::source_from_config;
use sysmon::terminal::TerminalGuard;
use sysmon::ui::render::rank;

#[derive(Parser)]
#[command(
    name = "sysmon",
    about = "Terminal dashboard for CPU, memory and top processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Number of process rows to show
    #[arg(long)]
    top_n: Option<usize>,

    /// Initial sort order: cpu, mem
    #[arg(long)]
    sort: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print one sample as JSON and exit, without the interactive screen.
    #[arg(long, default_value_t = false)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli)?;
    logging::init(&config.logging)?;

    if cli.once {
        return run_once(&config).await;
    }

    let mut session = Session::from_config(&config);
    let mut guard = TerminalGuard::acquire()?;
    let mut input = InputHandler::new();

    let result = session.run(guard.terminal(), input.receiver()).await;
    drop(guard);

    if result.is_ok() {
        println!("Quitting...");
    }
    result
}

fn load_config_for_cli(cli: &Cli) -> Result<config::Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        if rate == 0 {
            return Err(eyre!("--refresh-rate must be greater than 0"));
        }
        config.general.refresh_rate_ms = rate;
    }
    if let Some(n) = cli.top_n {
        if n == 0 {
            return Err(eyre!("--top-n must be greater than 0"));
        }
        config.general.top_n = n;
    }
    if let Some(ref sort) = cli.sort {
        config.general.default_sort = sort.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = path.clone();
    }

    Ok(config)
}

/// Headless sample: waits one refresh interval so the CPU delta covers a
/// real interval, then prints the sample.
async fn run_once(config: &config::Config) -> Result<()> {
    let sampler = ProcessSampler::new(
        source_from_config(&config.sampler.provider),
        logical_cores(),
        config.sampler.min_candidates,
    );
    let mut collector = Collector::new(config.sources.counter_sources(), sampler);
    tokio::time::sleep(config.general.refresh_interval()).await;

    let mut sample = collector.sample(config.general.top_n);
    let app = App::new(config);
    let ranked: Vec<_> = rank(&sample.processes, app.sort_mode, app.top_n)
        .into_iter()
        .cloned()
        .collect();
    sample.processes = ranked;

    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(())
}
