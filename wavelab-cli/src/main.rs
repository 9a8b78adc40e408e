//! WaveLab CLI - Elliott Wave analysis of cryptocurrency prices.
//!
//! Commands:
//! - `analyze` - fetch one coin, detect waves, print a report (optionally chart and export)
//! - `scan` - analyze several coins in parallel, one summary line each
//! - `coins` - list popular coin ids

mod chart;
mod report;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wavelab_core::data::{CircuitBreaker, CoinGeckoSource, PriceSource, SyntheticSource};
use wavelab_core::export::{write_analysis_json, write_waves_csv};
use wavelab_core::{analyze, AnalysisConfig, SourceConfig};

const POPULAR_COINS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "cardano",
    "solana",
    "ripple",
    "dogecoin",
    "polkadot",
    "chainlink",
    "vechain",
    "stellar",
    "velodrome-finance",
];

#[derive(Parser)]
#[command(
    name = "wavelab",
    about = "WaveLab CLI - Elliott Wave pattern detection for crypto prices"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by `analyze` and `scan`. Flags override the config file.
#[derive(clap::Args)]
struct AnalysisArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Days of history to fetch.
    #[arg(long)]
    days: Option<u32>,

    /// Minimum reversal as a fraction of the prior swing (e.g. 0.3).
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Minimum reversal as a fraction of price (e.g. 0.03).
    #[arg(long)]
    min_reversal: Option<f64>,

    /// RSI lookback period.
    #[arg(long)]
    rsi_period: Option<usize>,

    /// Use deterministic synthetic prices instead of CoinGecko.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Maximum daily move of the synthetic walk (fraction of price, max 0.5).
    #[arg(long)]
    volatility: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one coin and print the wave report.
    Analyze {
        /// Coin id or alias (e.g. bitcoin, velo).
        coin: String,

        #[command(flatten)]
        args: AnalysisArgs,

        /// Draw the price/wave chart with RSI below the report.
        #[arg(long, default_value_t = false)]
        chart: bool,

        /// Chart height in terminal rows.
        #[arg(long, default_value_t = 30)]
        chart_height: u16,

        /// Write detected waves as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the full analysis as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Analyze several coins in parallel.
    Scan {
        /// Coin ids or aliases. Defaults to the popular list.
        coins: Vec<String>,

        #[command(flatten)]
        args: AnalysisArgs,

        /// Worker threads. Defaults to the number of CPUs.
        #[arg(long)]
        jobs: Option<usize>,
    },
    /// List popular coin ids.
    Coins,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            coin,
            args,
            chart,
            chart_height,
            csv,
            json,
        } => run_analyze(&coin, &args, chart, chart_height, csv.as_deref(), json.as_deref()),
        Commands::Scan { coins, args, jobs } => run_scan(coins, &args, jobs),
        Commands::Coins => {
            for coin in POPULAR_COINS {
                println!("{coin}");
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "wavelab_core=debug,wavelab=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn load_config(args: &AnalysisArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(days) = args.days {
        config.source.days = days;
    }
    if let Some(s) = args.sensitivity {
        config.detector.sensitivity = s;
    }
    if let Some(pct) = args.min_reversal {
        config.detector.min_reversal_pct = pct;
    }
    if let Some(period) = args.rsi_period {
        config.rsi.period = period;
    }
    config.validate()?;
    Ok(config)
}

fn build_source(args: &AnalysisArgs, config: &SourceConfig) -> Result<Box<dyn PriceSource>> {
    if args.volatility.is_some() && !args.synthetic {
        bail!("--volatility only applies with --synthetic");
    }
    if args.synthetic {
        let mut source = SyntheticSource::new(Utc::now());
        if let Some(vol) = args.volatility {
            if !(vol.is_finite() && (0.0..=0.5).contains(&vol)) {
                bail!("--volatility must be between 0 and 0.5, got {vol}");
            }
            source = source.with_volatility(vol);
        }
        return Ok(Box::new(source));
    }
    let circuit_breaker = Arc::new(CircuitBreaker::from_config(config));
    Ok(Box::new(CoinGeckoSource::new(config.clone(), circuit_breaker)?))
}

fn run_analyze(
    coin: &str,
    args: &AnalysisArgs,
    show_chart: bool,
    chart_height: u16,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> Result<()> {
    if show_chart && chart_height < 8 {
        bail!("--chart-height must be at least 8 rows");
    }

    let config = load_config(args)?;
    let source = build_source(args, &config.source)?;

    tracing::info!(coin, source = source.name(), days = config.source.days, "fetching");
    let series = source
        .fetch(coin, config.source.days)
        .with_context(|| format!("failed to fetch prices for '{coin}'"))?;
    let analysis = analyze(&series, &config)?;

    print!("{}", report::format_report(&analysis, args.synthetic));

    if show_chart {
        println!();
        let widget = chart::WaveChart::new(&series, &analysis, &config.rsi);
        chart::draw_inline(widget, chart_height)?;
    }

    if let Some(path) = csv {
        write_waves_csv(&analysis.waves, path)?;
        println!("Waves saved to: {}", path.display());
    }
    if let Some(path) = json {
        write_analysis_json(&analysis, path)?;
        println!("Analysis saved to: {}", path.display());
    }

    Ok(())
}

fn run_scan(coins: Vec<String>, args: &AnalysisArgs, jobs: Option<usize>) -> Result<()> {
    let config = load_config(args)?;
    let source = build_source(args, &config.source)?;

    let coins: Vec<String> = if coins.is_empty() {
        POPULAR_COINS.iter().map(|c| c.to_string()).collect()
    } else {
        coins
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = jobs {
        if n == 0 {
            bail!("--jobs must be at least 1");
        }
        builder = builder.num_threads(n);
    }
    let pool = builder.build()?;

    let results: Vec<(String, Result<_>)> = pool.install(|| {
        coins
            .par_iter()
            .map(|coin| {
                let result = source
                    .fetch(coin, config.source.days)
                    .map_err(anyhow::Error::from)
                    .and_then(|series| analyze(&series, &config).map_err(anyhow::Error::from));
                (coin.clone(), result)
            })
            .collect()
    });

    if args.synthetic {
        println!("WARNING: Results based on SYNTHETIC data");
    }
    println!("{}", report::scan_header());
    let mut failures = 0;
    for (coin, result) in &results {
        match result {
            Ok(analysis) => println!("{}", report::format_scan_line(analysis)),
            Err(e) => {
                failures += 1;
                eprintln!("Error for {coin}: {e:#}");
            }
        }
    }

    if failures == results.len() {
        bail!("all {failures} coins failed");
    }
    Ok(())
}
