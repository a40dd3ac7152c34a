//! BSM Greeks CLI
//!
//! Command-line interface for pricing, spot sweeps and market-driven quotes.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bsm_greeks::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "bsm", version, about = "Black-Scholes-Merton prices and Greeks")]
struct Cli {
    /// JSON configuration file (market defaults, sweep grid, cache)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price one option and print its Greeks
    Price(ContractArgs),
    /// Sweep spot around the given value and print or save the curves
    Sweep {
        #[command(flatten)]
        contract: ContractArgs,
        /// Override the number of grid points
        #[arg(long)]
        points: Option<usize>,
        /// Write the curve as JSON instead of printing a table
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fetch spot, volatility and rate for a ticker, then price at the money
    Market {
        #[arg(long)]
        ticker: String,
        /// Strike (defaults to the fetched spot)
        #[arg(long)]
        strike: Option<f64>,
        /// Days to expiry (30 when neither this nor --expiry is given)
        #[arg(long, conflicts_with = "expiry")]
        days: Option<f64>,
        /// Expiry date, YYYY-MM-DD
        #[arg(long)]
        expiry: Option<NaiveDate>,
        /// Option side: call or put
        #[arg(long, default_value = "call")]
        side: String,
        /// Skip the snapshot cache
        #[arg(long)]
        no_cache: bool,
    },
}

#[derive(Args, Debug)]
struct ContractArgs {
    #[arg(long)]
    spot: f64,
    #[arg(long)]
    strike: f64,
    /// Days to expiry (calendar)
    #[arg(long, conflicts_with_all = ["years", "expiry"])]
    days: Option<f64>,
    /// Years to expiry
    #[arg(long, conflicts_with = "expiry")]
    years: Option<f64>,
    /// Expiry date, YYYY-MM-DD
    #[arg(long)]
    expiry: Option<NaiveDate>,
    /// Decimal annual risk-free rate (defaults to the configured fallback)
    #[arg(long)]
    rate: Option<f64>,
    /// Annualised volatility, e.g. 0.2
    #[arg(long)]
    vol: f64,
    /// Option side: call or put
    #[arg(long, default_value = "call")]
    side: String,
}

/// Year fraction from whichever of days, years or an expiry date was given
fn time_to_expiry(
    days: Option<f64>,
    years: Option<f64>,
    expiry: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<f64> {
    days.map(|d| d / DAYS_PER_YEAR)
        .or(years)
        .or_else(|| expiry.map(|date| years_between(today, date)))
}

impl ContractArgs {
    fn to_params(
        &self,
        defaults: &MarketDefaults,
        today: NaiveDate,
    ) -> EngineResult<OptionParameters> {
        let side: OptionSide = self.side.parse()?;
        let time = time_to_expiry(self.days, self.years, self.expiry, today).ok_or_else(|| {
            EngineError::invalid_argument("one of --days, --years or --expiry is required")
        })?;
        OptionParameters::checked(
            self.spot,
            self.strike,
            time,
            self.rate.unwrap_or(defaults.rate),
            self.vol,
            side,
        )
    }
}

fn print_quote(params: &OptionParameters) {
    let quote = bs_price(params);
    let greeks = bs_greeks(params);

    println!("Inputs:");
    println!("  Spot:   {:.2}", params.spot);
    println!("  Strike: {:.2}", params.strike);
    println!(
        "  Time:   {:.4} years ({:.0} days)",
        params.time,
        params.time * DAYS_PER_YEAR
    );
    println!("  Rate:   {:.2}%", params.rate * 100.0);
    println!("  Vol:    {:.2}%", params.volatility * 100.0);
    println!("  Regime: {:?}\n", Regime::of(params));

    println!("Prices:");
    println!("  Call: {:.4}", quote.call);
    println!("  Put:  {:.4}", quote.put);

    println!("\n{} Greeks:", params.side);
    println!("  Delta: {:.4}", greeks.delta);
    println!("  Gamma: {:.6}", greeks.gamma);
    println!("  Vega:  {:.4} (per vol point)", greeks.vega);
    println!("  Theta: {:.4} (per day)", greeks.theta);
}

fn run(cli: Cli) -> EngineResult<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    let today = Utc::now().date_naive();

    match cli.command {
        Command::Price(contract) => {
            let params = contract.to_params(&config.market, today)?;
            print_quote(&params);
        }
        Command::Sweep {
            contract,
            points,
            out,
        } => {
            let params = contract.to_params(&config.market, today)?;
            let mut sweep_config = config.sweep.clone();
            if let Some(points) = points {
                sweep_config.points = points;
            }

            let curve = sweep(&params, &sweep_config)?;
            match out {
                Some(path) => curve.write_json(&path)?,
                None => print!("{}", curve.render_table()),
            }
        }
        Command::Market {
            ticker,
            strike,
            days,
            expiry,
            side,
            no_cache,
        } => {
            let side: OptionSide = side.parse()?;
            let time = time_to_expiry(days, None, expiry, today).unwrap_or(30.0 / DAYS_PER_YEAR);
            let client = YahooClient::new()?;

            let (snapshot, rate) = if no_cache {
                let feed = MarketFeed::new(client, config.market);
                (feed.snapshot(&ticker), feed.rate())
            } else {
                let cached = CachedSource::new(client, config.cache.clone())?;
                let feed = MarketFeed::new(cached, config.market);
                (feed.snapshot(&ticker), feed.rate())
            };

            println!(
                "{}: spot {:.2}, vol {:.2}%, rate {:.2}% ({:?})\n",
                snapshot.ticker,
                snapshot.spot,
                snapshot.volatility * 100.0,
                rate * 100.0,
                snapshot.origin
            );

            let params = OptionParameters::checked(
                snapshot.spot,
                strike.unwrap_or(snapshot.spot),
                time,
                rate,
                snapshot.volatility,
                side,
            )?;
            print_quote(&params);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
