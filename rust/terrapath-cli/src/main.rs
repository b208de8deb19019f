use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use terrapath_core::{BestFirst, PathStrategy, SearchPolicy, Strategy};
use terrapath_cli::{load_map, run, Config, LogFormat};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "terrapath", version, about = "Run grid search strategies over a terrain map")]
struct Args {
    /// Map file (JSON: start, goal, tiles, cost, blocked)
    #[arg(long = "map", value_name = "PATH")]
    map: PathBuf,

    /// Strategy to run; defaults to TERRAPATH_STRATEGY or uniform-cost
    #[arg(long = "strategy", value_name = "NAME", value_enum, ignore_case = true, conflicts_with = "all")]
    strategy: Option<Strategy>,

    /// Run all four strategies and compare them
    #[arg(long = "all", default_value_t = false)]
    all: bool,

    /// Extra custom policy (JSON SearchPolicy) run after the strategies
    #[arg(long = "policy", value_name = "PATH")]
    policy: Option<PathBuf>,

    /// Leave cell lists out of the report
    #[arg(long = "no-path", default_value_t = false)]
    no_path: bool,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn main() {
    let args = Args::parse();
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("configuration error: {e:#}");
            std::process::exit(2);
        }
    };
    init_tracing(cfg.log_format);
    info!(core_version = %terrapath_core::version(), map = %args.map.display(), "starting terrapath");

    if let Err(e) = execute(&args, &cfg) {
        error!(error = %format!("{e:#}"), "run failed");
        std::process::exit(1);
    }
}

fn execute(args: &Args, cfg: &Config) -> Result<()> {
    let map = load_map(&args.map)?;

    let strategies: Vec<Strategy> = if args.all {
        Strategy::ALL.to_vec()
    } else {
        vec![args.strategy.unwrap_or(cfg.strategy)]
    };
    let custom = match &args.policy {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading policy {}", path.display()))?;
            let policy: SearchPolicy = serde_json::from_str(&text).with_context(|| format!("parsing policy {}", path.display()))?;
            Some(BestFirst::new(policy).with_context(|| format!("policy {}", path.display()))?)
        }
        None => None,
    };

    let mut planners: Vec<&dyn PathStrategy> = strategies.iter().map(|s| s as &dyn PathStrategy).collect();
    if let Some(c) = &custom {
        planners.push(c);
    }

    let report = run(&map, &planners, !args.no_path)?;
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}
