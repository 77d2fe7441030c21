// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

mod display;
mod seat_map;
mod ticker;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use skyfocus_core::config::{ConfigManager, FocusConfig};
use skyfocus_core::route::RoutePath;
use skyfocus_core::{
    geo, AirportDirectory, FlightPhase, PomodoroPhase, SessionEvent, SessionStateMachine,
    TimerMode,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;
use ticker::{ShellMessage, Ticker};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Airport dataset in keyed JSON form (defaults to the built-in list)
    #[arg(long, env = "SKYFOCUS_AIRPORTS", global = true)]
    airports: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, env = "SKYFOCUS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search airports by city, code or name
    Search { query: String },
    /// Show distance and flight time between two airports
    Estimate { from: String, to: String },
    /// Show the cabin seat plan
    Seats {
        /// Highlight this seat
        #[arg(long)]
        selected: Option<String>,
    },
    /// Board and fly. Type `q` and Enter to abort.
    Fly {
        from: String,
        to: String,
        /// Seat to board, e.g. 12A
        #[arg(long)]
        seat: String,
        /// Cycle work and break periods while flying
        #[arg(long)]
        pomodoro: bool,
        #[arg(long)]
        work_secs: Option<u64>,
        #[arg(long)]
        break_secs: Option<u64>,
        /// Wall-clock milliseconds per simulated second
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        tick_ms: Option<u64>,
    },
    /// Show the active configuration
    Config {
        /// Write the default configuration if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = config_manager.load()?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::Info)
    };
    let logger = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    if logger.is_err() {
        eprintln!("Logger already initialised");
    }

    match &cli.command {
        Commands::Search { query } => {
            let directory = load_directory(&cli, &config)?;
            let matches = directory.search(query);
            if matches.is_empty() {
                println!("No airports match '{}'", query);
            }
            for airport in matches {
                println!(
                    "{}  {} ({}) - {}",
                    airport.code, airport.city, airport.country, airport.display_name
                );
            }
        }
        Commands::Estimate { from, to } => {
            let directory = load_directory(&cli, &config)?;
            let origin = resolve(&directory, from)?;
            let destination = resolve(&directory, to)?;
            let distance = geo::distance_km(origin.location, destination.location);
            let cruise = geo::cruise_seconds(origin.location, destination.location);
            let duration = geo::estimated_duration_seconds(origin.location, destination.location);

            println!("{} -> {}", origin.label(), destination.label());
            println!("Distance:     {:.1} km", distance);
            println!("Cruise time:  {}", display::format_hms(cruise));
            if duration > cruise {
                println!(
                    "Flight time:  {} (minimum flight)",
                    display::format_hms(duration)
                );
            } else {
                println!("Flight time:  {}", display::format_hms(duration));
            }
        }
        Commands::Seats { selected } => {
            print!("{}", seat_map::render(selected.as_deref()));
            println!(
                "[ ] free  [x] taken  [*] selected  ({} seats free)",
                seat_map::free_seats().count()
            );
        }
        Commands::Fly {
            from,
            to,
            seat,
            pomodoro,
            work_secs,
            break_secs,
            tick_ms,
        } => {
            let directory = load_directory(&cli, &config)?;
            let mut settings = config.clone();
            if let Some(secs) = *work_secs {
                settings.pomodoro.work_duration_seconds = secs;
            }
            if let Some(secs) = *break_secs {
                settings.pomodoro.break_duration_seconds = secs;
            }
            if let Some(ms) = *tick_ms {
                settings.tick_interval_ms = ms;
            }
            let mode = if *pomodoro {
                TimerMode::PomodoroCycle
            } else {
                TimerMode::Standard
            };
            fly(&directory, &settings, from, to, seat, mode)?;
        }
        Commands::Config { init } => {
            println!("Config file: {}", config_manager.path().display());
            if *init {
                if config_manager.path().exists() {
                    println!("Already exists, leaving it untouched.");
                } else {
                    config_manager.save(&FocusConfig::default())?;
                    println!("Wrote default configuration.");
                }
            }
            let current = config_manager.load()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&current).context("Failed to render config")?
            );
        }
    }

    Ok(())
}

fn load_directory(cli: &Cli, config: &FocusConfig) -> Result<AirportDirectory> {
    match cli.airports.as_ref().or(config.airports_file.as_ref()) {
        Some(path) => AirportDirectory::load_file(path),
        None => AirportDirectory::builtin(),
    }
}

fn resolve(directory: &AirportDirectory, query: &str) -> Result<skyfocus_core::Airport> {
    directory
        .resolve(query)
        .ok_or_else(|| anyhow!("No airport matches '{}'", query))
}

fn fly(
    directory: &AirportDirectory,
    settings: &FocusConfig,
    from: &str,
    to: &str,
    seat: &str,
    mode: TimerMode,
) -> Result<()> {
    let origin = resolve(directory, from)?;
    let destination = resolve(directory, to)?;
    let seat = seat_map::claim(seat).map_err(|e| anyhow!(e))?;

    let mut machine = SessionStateMachine::new(settings.pomodoro);
    machine.select_origin(origin)?;
    machine.select_destination(destination)?;
    machine.proceed_to_boarding()?;
    machine.select_seat(&seat)?;
    machine.confirm_flight(mode)?;

    let snapshot = machine.snapshot();
    let plan = snapshot
        .state
        .plan()
        .context("Flight confirmed without a route")?;
    let route = RoutePath::new(plan.origin.location, plan.destination.location);
    let arrival = display::arrival_time(chrono::Local::now(), snapshot.remaining_flight_seconds);

    println!(
        "Now boarding seat {}: {} -> {}",
        seat,
        plan.origin.label(),
        plan.destination.label()
    );
    println!(
        "{:.0} km, flight time {}, arriving {} local time",
        plan.distance_km(),
        display::format_hms(snapshot.total_flight_seconds),
        arrival.format("%H:%M")
    );
    if mode == TimerMode::PomodoroCycle {
        println!("\x07{}", display::seatbelt_sign(PomodoroPhase::Work));
    }
    println!("Type q and Enter to abort.");

    let (tx, rx) = mpsc::channel();
    spawn_abort_listener(tx.clone())?;
    let mut ticker = Ticker::start(Duration::from_millis(settings.tick_interval_ms), tx)?;
    let break_seconds = settings.pomodoro.break_duration_seconds;

    loop {
        match rx.recv() {
            Ok(ShellMessage::Tick) => {
                let snapshot = machine.tick()?;
                let plane = route.position_at(snapshot.progress);
                print!("\r{}", display::status_line(&snapshot, &plane));
                io::stdout().flush()?;

                for event in &snapshot.events {
                    match event {
                        SessionEvent::PomodoroFlipped { new_phase } => {
                            println!();
                            println!("\x07{}", display::flip_notice(*new_phase, break_seconds));
                        }
                        SessionEvent::Arrived => {
                            println!();
                        }
                    }
                }

                if snapshot.phase() == FlightPhase::Arrived {
                    ticker.stop();
                    println!("\x07{}", display::touchdown_banner(&plan.destination.city));
                    if let Some(done) = snapshot.completed_work_sessions {
                        println!("Work sessions completed: {}", done);
                    }
                    break;
                }
            }
            Ok(ShellMessage::Abort) => {
                ticker.stop();
                machine.abort();
                println!();
                println!("Flight aborted. Back at the departure board.");
                break;
            }
            Err(_) => {
                ticker.stop();
                machine.abort();
                break;
            }
        }
    }

    Ok(())
}

fn spawn_abort_listener(tx: Sender<ShellMessage>) -> Result<()> {
    thread::Builder::new()
        .name("abort-listener".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if matches!(line.trim().to_lowercase().as_str(), "q" | "quit" | "abort") {
                    let _ = tx.send(ShellMessage::Abort);
                    break;
                }
            }
        })
        .context("Failed to start the abort listener")?;
    Ok(())
}
