//! Kuhn poker solver binary.
//!
//! Usage:
//!   cargo run --release --bin solve_kuhn -- [OPTIONS]
//!
//! Options:
//!   --config <FILE>      Configuration JSON file (optional)
//!   --iterations <N>     Number of iterations (overrides the config)
//!   --exploitability     Measure exploitability at every checkpoint
//!   --output <FILE>      Write a JSON snapshot of every info set
//!
//! Log verbosity follows `RUST_LOG` (default `info`; `debug` shows checkpoints).

use std::env;
use std::fs;
use std::process;

use indicatif::{ProgressBar, ProgressStyle};
use kuhn_solver::cfr::{KuhnSolver, SolverConfig};
use kuhn_solver::games::kuhn::KuhnAction;

struct Args {
    config_file: Option<String>,
    iterations: Option<u64>,
    exploitability: bool,
    output_file: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args() else {
        return;
    };

    let mut config = match &args.config_file {
        Some(path) => {
            log::info!("loading configuration from {}", path);
            match SolverConfig::from_json_file(path) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("error loading config: {}", e);
                    process::exit(1);
                }
            }
        }
        None => SolverConfig::default(),
    };
    if let Some(iterations) = args.iterations {
        config = config.with_iterations(iterations);
    }
    if args.exploitability {
        config = config.with_exploitability(true);
    }

    let mut solver = match KuhnSolver::new(config) {
        Ok(solver) => solver,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let iterations = solver.config().iterations;
    let interval = solver.config().checkpoint_interval;
    let pb = ProgressBar::new(iterations);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let stats = solver.train_with_callback(iterations, interval, |stats| {
        pb.set_position(stats.iterations);
        match stats.exploitability {
            Some(e) => pb.set_message(format!("regret {:.3e} expl {:.3e}", stats.last_total_regret, e)),
            None => pb.set_message(format!("regret {:.3e}", stats.last_total_regret)),
        }
    });
    pb.finish_and_clear();

    log::info!(
        "{} iterations in {:.2}s ({:.0} it/s), final total regret {:.6e}",
        stats.iterations,
        stats.elapsed_seconds,
        stats.iterations_per_second,
        stats.last_total_regret
    );

    println!();
    println!("=== Strategies ===");
    println!();
    println!("{:<8}{:>10}{:>10}", "info set", KuhnAction::Bet.symbol(), KuhnAction::Pass.symbol());
    for info_set in solver.registry().iter() {
        let strategy = info_set.strategy();
        println!("{:<8}{:>10.4}{:>10.4}", info_set.key().to_string(), strategy[0], strategy[1]);
    }
    println!();
    println!("Game value (first player): {:.6} (equilibrium {:.6})", solver.game_value(), -1.0 / 18.0);
    println!("Exploitability:            {:.6}", solver.exploitability());

    if let Some(path) = &args.output_file {
        let written = solver
            .snapshot()
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => log::info!("snapshot saved to {}", path),
            Err(e) => {
                log::error!("error saving snapshot: {}", e);
                process::exit(1);
            }
        }
    }
}

fn parse_args() -> Option<Args> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        config_file: None,
        iterations: None,
        exploitability: false,
        output_file: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                parsed.config_file = args.get(i).cloned();
            }
            "--iterations" | "-i" => {
                i += 1;
                parsed.iterations = args.get(i).and_then(|s| s.parse().ok());
            }
            "--exploitability" | "-e" => {
                parsed.exploitability = true;
            }
            "--output" | "-o" => {
                i += 1;
                parsed.output_file = args.get(i).cloned();
            }
            "--help" | "-h" => {
                print_help();
                return None;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                return None;
            }
        }
        i += 1;
    }
    Some(parsed)
}

fn print_help() {
    println!("Kuhn Poker Solver");
    println!();
    println!("Usage: solve_kuhn [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>      Configuration JSON file");
    println!("  -i, --iterations <N>     Number of iterations (default: 50000)");
    println!("  -e, --exploitability     Measure exploitability at every checkpoint");
    println!("  -o, --output <FILE>      Write a JSON snapshot of every info set");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  solve_kuhn --iterations 100000");
    println!("  RUST_LOG=debug solve_kuhn --exploitability -o kuhn.json");
}
