use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use travel_advisor::hotels::HotelQuery;
use travel_advisor::{AdvisorConfig, AdvisorError, TravelAdvisor, TripRequest, telemetry};

/// Options listed in the flight and hotel briefings
const BRIEFING_OPTIONS: usize = 5;

#[derive(Parser, Debug)]
#[command(
    name = "travel-advisor",
    about = "Recommend when to travel based on weather, airfare and hotels",
    version
)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known traveler identifiers
    Travelers,
    /// Show a traveler's preference profile
    Profile {
        /// Traveler identifier (defaults to the configured traveler)
        #[arg(long)]
        traveler: Option<String>,
    },
    /// Score trip windows over the forecast
    Weather(TripArgs),
    /// Analyze airfare against the traveler's budget
    Flights(TripArgs),
    /// Rank hotels for a stay
    Hotels(HotelArgs),
    /// Run the full pipeline and print a recommendation
    Recommend(TripArgs),
}

#[derive(Args, Debug)]
struct TripArgs {
    #[arg(long)]
    traveler: Option<String>,
    #[arg(long)]
    destination: Option<String>,
    /// Origin airport code
    #[arg(long)]
    origin: Option<String>,
    /// First forecast day (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,
    /// Days of forecast to analyze
    #[arg(long)]
    days: Option<usize>,
}

#[derive(Args, Debug)]
struct HotelArgs {
    #[arg(long)]
    traveler: Option<String>,
    #[arg(long)]
    destination: Option<String>,
    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    check_out: NaiveDate,
    /// Price the stay as overlapping a storm period
    #[arg(long)]
    storm_period: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn trip_request(config: &AdvisorConfig, args: TripArgs) -> TripRequest {
    let mut request = TripRequest::from_defaults(config, args.start.unwrap_or_else(|| Local::now().date_naive()));
    if let Some(traveler) = args.traveler {
        request.traveler_id = traveler;
    }
    if let Some(destination) = args.destination {
        request.destination = destination;
    }
    if let Some(origin) = args.origin {
        request.origin_airport = origin;
    }
    if let Some(days) = args.days {
        request.forecast_days = days;
    }
    request
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        match err.downcast_ref::<AdvisorError>() {
            Some(advisor_err) => eprintln!("error: {}", advisor_err.user_message()),
            None => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AdvisorConfig::load_from_path(cli.config).context("Failed to load configuration")?;
    telemetry::init(&config.logging, cli.verbose)?;
    info!(version = travel_advisor::VERSION, "Starting travel advisor");

    let advisor = TravelAdvisor::from_config(&config)?;

    match cli.command {
        Command::Travelers => print_json(&advisor.travelers()),
        Command::Profile { traveler } => {
            let traveler = traveler.unwrap_or_else(|| config.defaults.traveler_id.clone());
            print_json(&advisor.profile(&traveler)?)
        }
        Command::Weather(args) => {
            let report = advisor.weather_report(&trip_request(&config, args)).await?;
            print_json(&report)
        }
        Command::Flights(args) => {
            let report = advisor.flight_report(&trip_request(&config, args)).await?;
            print_json(&serde_json::json!({
                "search_window": report.search_window,
                "offered": report.offered,
                "cheapest_price": report.cheapest_price,
                "average_price": report.average_price,
                "within_soft_budget": report.within_soft_budget,
                "within_hard_budget": report.within_hard_budget,
                "summary": report.summary(),
                "cheapest_options": report.cheapest_options(BRIEFING_OPTIONS),
            }))
        }
        Command::Hotels(args) => {
            let traveler = args.traveler.unwrap_or_else(|| config.defaults.traveler_id.clone());
            let stay = HotelQuery {
                destination: args.destination.unwrap_or_else(|| config.defaults.destination.clone()),
                check_in: args.check_in,
                check_out: args.check_out,
                storm_period: args.storm_period,
            };
            let report = advisor.hotel_report(&traveler, &stay).await?;
            print_json(&serde_json::json!({
                "destination": report.destination,
                "check_in": report.check_in,
                "check_out": report.check_out,
                "summary": report.summary(),
                "top_options": report.top(BRIEFING_OPTIONS),
            }))
        }
        Command::Recommend(args) => {
            let recommendation = advisor.recommend(&trip_request(&config, args)).await?;
            print_json(&recommendation)
        }
    }
}
