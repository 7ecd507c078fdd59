//! volauction - Binary Entry Point
//!
//! Runs one simulated round of a configured session: every player picks an
//! activity at random, traders bid a random individually rational price into
//! a random eligible auction, then each group is cleared and paid.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use volauction::session::draw_evaluation;
use volauction::types::AuctionKind;
use volauction::{Group, Session, SessionConfig, Settings, SubmissionBarrier};

/// Command line options
#[derive(Parser, Debug, Clone)]
#[command(name = "volauction")]
#[command(version = "0.1.0")]
#[command(about = "Simulate one round of the endogenous market formation game", long_about = None)]
struct Cli {
    /// Settings file (JSON); the built-in session configs are used if omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Session config to run
    #[arg(short = 'c', long, default_value = "volauction")]
    session: String,

    /// Seed for evaluations, choices, bids and tie-breaks
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Probability that a simulated player runs an auction
    #[arg(short = 'a', long, default_value_t = 0.3)]
    auctioneer_share: f64,

    /// Write the round record as JSON to this path
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,

    /// List the available session configs and exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if cli.list {
        for name in settings.session_names() {
            println!("{name}");
        }
        return Ok(());
    }

    if !(0.0..=1.0).contains(&cli.auctioneer_share) {
        return Err(format!("auctioneer share {} is not a probability", cli.auctioneer_share).into());
    }

    let config = settings.session(&cli.session)?;
    tracing::info!("config: {:?}", config);

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let mut session = Session::create(config.clone(), &mut rng)?;

    for id in 1..=config.num_groups() {
        play_group(session.group_mut(id)?, &config, cli.auctioneer_share, &mut rng)?;
    }

    let receipt = session.resolve_all(&mut SubmissionBarrier, &mut rng)?;
    let record = session.record();

    println!("===========================================");
    println!("  {}", config.display_name);
    println!("===========================================");
    println!(
        "{:>6} {:>4} {:>7} {:>11} {:>10} {:>8} {:>8}",
        "group", "id", "role", "activity", "evaluation", "price", "payoff"
    );
    for p in &record.players {
        let activity = match p.activity {
            Some(a) if a.is_auctioneer() => "auctioneer",
            Some(_) => "trader",
            None => "-",
        };
        let price = p.auction_price.or(p.bid_price);
        println!(
            "{:>6} {:>4} {:>7} {:>11} {:>10} {:>8} {:>8}",
            p.group_id,
            p.id_in_group,
            p.role.label(),
            activity,
            p.evaluation.format(config.points_decimal_places),
            price.map_or("-".to_string(), |c| c.format(config.points_decimal_places)),
            p.payoff.map_or("-".to_string(), |c| c.format(config.points_decimal_places)),
        );
    }
    println!();
    println!("  Auctions opened:  {}", receipt.auctions_opened);
    println!("  Auctions cleared: {}", receipt.auctions_cleared);
    if let Some(rate) = receipt.clearing_rate() {
        println!("  Clearing rate:    {:.1}%", rate * 100.0);
    }
    println!("  Digest:           {}", receipt.digest_hex());

    if let Some(path) = &cli.export {
        fs::write(path, record.to_json()?)?;
        tracing::info!("round record written to {}", path.display());
    }

    Ok(())
}

/// Scripted play for one group: choose activities, then bid.
fn play_group(
    group: &mut Group,
    config: &SessionConfig,
    auctioneer_share: f64,
    rng: &mut ChaCha8Rng,
) -> Result<(), Box<dyn Error>> {
    let ids: Vec<u32> = group.players().iter().map(|p| p.id_in_group).collect();

    for &id in &ids {
        group.choose_activity(id, rng.gen_bool(auctioneer_share))?;
    }

    for &id in &ids {
        let Some(player) = group.player(id).filter(|p| p.is_trader()) else {
            continue;
        };
        let evaluation = player.evaluation;

        let choices: Vec<(usize, AuctionKind)> = group
            .available_auctions(id)?
            .iter()
            .map(|a| (a.id, a.kind))
            .collect();
        let Some(&(auction, kind)) = choices.choose(rng) else {
            continue;
        };

        // A price the trader cannot lose money on
        let (low, high) = match kind {
            AuctionKind::Selling => (config.lb, evaluation),
            AuctionKind::Buying => (evaluation, config.ub),
        };
        if let Some(price) = draw_evaluation(rng, low, high, config.points_decimal_places) {
            group.submit_bid(id, auction, price)?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `RUST_LOG` overrides `level`
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
