#![deny(warnings)]

//! Headless CLI for running a scripted company and checking the numbers.
//!
//! Plays a deliberately passive hand: hires a small team, starts one
//! product, then lets the weeks tick by without touching the approval
//! queue. Useful for smoke-testing determinism and for eyeballing the
//! KPI drift across a run.

use anyhow::Result;
use sim_core::config::Difficulty;
use sim_runtime::Game;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    seed: u64,
    turns: u32,
    difficulty: Difficulty,
    save: Option<String>,
    load: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: 42,
        turns: 48,
        difficulty: Difficulty::Normal,
        save: None,
        load: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    args.seed = v;
                }
            }
            "--turns" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    args.turns = v;
                }
            }
            "--difficulty" => {
                args.difficulty = match it.next().as_deref() {
                    Some("easy") => Difficulty::Easy,
                    Some("hard") => Difficulty::Hard,
                    _ => Difficulty::Normal,
                };
            }
            "--save" => args.save = it.next(),
            "--load" => args.load = it.next(),
            _ => {}
        }
    }
    args
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    info!(
        seed = args.seed,
        turns = args.turns,
        git = env!("GIT_SHA"),
        "starting CLI"
    );

    let mut game = match &args.load {
        Some(path) => {
            let data = std::fs::read_to_string(path)?;
            persistence::from_json(&data)?
        }
        None => {
            let mut game = Game::new(args.seed, args.difficulty)?;
            game.hire();
            game.hire();
            game.hire();
            game.develop_product();
            game
        }
    };

    let mut turns_run = 0;
    for _ in 0..args.turns {
        match game.next_turn() {
            Ok(report) => {
                turns_run += 1;
                if report.month_closed {
                    info!(
                        turn = game.turn,
                        net = report.monthly_net.unwrap_or(0),
                        money = game.money,
                        "month closed"
                    );
                }
                for name in &report.events_triggered {
                    info!(event = name.as_str(), "event triggered");
                }
            }
            Err(err) => {
                info!(%err, "run ended early");
                break;
            }
        }
    }

    if let Some(path) = &args.save {
        std::fs::write(path, persistence::to_json(&game)?)?;
        info!(path = path.as_str(), "saved game");
    }

    let snap = game.snapshot();
    println!(
        "Run OK | turns: {} | year {} month {} week {}",
        turns_run, snap.year, snap.month, snap.week
    );
    println!(
        "KPI | money: {} | debt: {} | share: {:.1}% | brand: {} | employees: {} | products: {} | docs decided: {} | traps missed: {}",
        snap.money,
        snap.debt,
        snap.market_share,
        snap.brand_power,
        snap.employees.len(),
        snap.products.len(),
        snap.document_stats.total_processed,
        snap.document_stats.traps_missed
    );
    if let Some(reason) = &snap.game_over {
        println!("Game over: {}", reason);
    }

    Ok(())
}
