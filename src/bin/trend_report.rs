//! Headless run of the dashboard pipeline: fetch, summarise, fit, print.

use anyhow::{Context, Result, bail};
use clap::Parser;

use coin_dashboard::config::DASHBOARD;
use coin_dashboard::ui::utils::{format_pct, format_price};
use coin_dashboard::utils::time_utils::format_datetime;
use coin_dashboard::{Cli, FetchOutcome, MarketDataSource, fit_linear_trend, init_logging};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print price history summary and linear trend for one coin")]
struct ReportArgs {
    #[command(flatten)]
    common: Cli,

    /// Also print this many days of straight-line extension past the last sample
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u16).range(0..=90))]
    extend: u16,

    /// Print the coin description card as well
    #[arg(long, default_value_t = false)]
    info: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = ReportArgs::parse();
    let query = args.common.query_or_default();
    let source = args
        .common
        .market_data()
        .context("Failed to build the CoinGecko client")?;
    log::info!("Fetching {} from {}", query, source.signature());

    let series = match source.price_history(&query).await {
        FetchOutcome::Ready(series) => series,
        FetchOutcome::Empty => bail!("No price data for {}", query),
        FetchOutcome::Failed(e) => {
            return Err(e).with_context(|| format!("Failed to load price history for {}", query));
        }
    };

    let currency = query.currency();
    println!("{} ({} days, {})", query.coin().display_name(), query.days(), currency);
    println!("  samples : {}", series.len());
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        println!(
            "  from    : {}  {}",
            format_datetime(&first.date),
            format_price(first.price, currency)
        );
        println!(
            "  to      : {}  {}",
            format_datetime(&last.date),
            format_price(last.price, currency)
        );
    }
    if let Some(pct) = series.change_pct() {
        println!("  change  : {}", format_pct(pct));
    }
    if let Some((lo, hi)) = series.price_range() {
        println!(
            "  range   : {} - {}",
            format_price(lo, currency),
            format_price(hi, currency)
        );
    }

    match fit_linear_trend(&series) {
        Ok(fit) => {
            println!();
            println!("Trend: price = {:.6} * day + {:.6}", fit.slope, fit.intercept);
            print_rows(
                "fitted",
                fit.points.iter().map(|p| (p.day_offset, p.predicted_price)),
                currency,
            );
            if args.extend > 0 {
                print_rows(
                    "extension",
                    fit.extend(args.extend)
                        .into_iter()
                        .map(|p| (p.day_offset, p.predicted_price)),
                    currency,
                );
            }
        }
        Err(e) => println!("\nTrend: {}", e),
    }

    if args.info {
        match source.coin_info(query.coin()).await {
            FetchOutcome::Ready(info) => {
                println!();
                println!("{} ({})", info.name, info.ticker());
                if info.has_homepage() {
                    println!("  {}", info.homepage_url);
                }
                println!("  {}...", info.description_excerpt);
            }
            FetchOutcome::Empty => println!("\nNo coin info for {}", query.coin()),
            FetchOutcome::Failed(e) => log::warn!("Coin info unavailable: {}", e),
        }
    }

    Ok(())
}

/// First and last few rows, with an ellipsis between when there are many.
fn print_rows(
    label: &str,
    rows: impl ExactSizeIterator<Item = (i64, f64)>,
    currency: coin_dashboard::VsCurrency,
) {
    let total = rows.len();
    let keep = DASHBOARD.report_max_rows;
    println!("  {} ({} values):", label, total);
    for (i, (day, price)) in rows.enumerate() {
        if total > keep && i == keep / 2 {
            println!("    ...");
        }
        if total <= keep || i < keep / 2 || i >= total - keep / 2 {
            println!("    day {:>3}  {}", day, format_price(price, currency));
        }
    }
}
