use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use reversi_search::ai::{DEFAULT_DEPTH, SearchConfig, Searcher};
use reversi_search::game::{AlphaBetaSelector, GameInstance};
use reversi_search::types::Winner;

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Plays the alpha-beta engine against itself")]
struct Args {
    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Worker threads for root-move tasks (defaults to rayon's global pool)
    #[arg(long)]
    threads: Option<usize>,

    /// Stop after this many moves, even if the game is not over
    #[arg(long)]
    max_moves: Option<usize>,

    /// Log verbosity: -v for search summaries, -vv for per-root scores.
    /// `RUST_LOG` overrides this.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn log_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(log_filter(args.verbose))
        .parse_default_env()
        .init();

    let config = SearchConfig {
        depth: args.depth,
        threads: args.threads,
    };

    let searcher = match Searcher::new(config) {
        Ok(searcher) => searcher,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut game = GameInstance::new(Box::new(AlphaBetaSelector::new(searcher)));

    let mut total_ms = 0u64;
    let mut max_ms = 0u64;
    let mut count = 0u64;

    println!("{}", game.board_text());
    while !game.is_game_over {
        if args.max_moves.is_some_and(|limit| count as usize >= limit) {
            break;
        }

        let start = web_time::Instant::now();
        let mv = match game.ai_move() {
            Ok(mv) => mv,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        };
        let elapsed = start.elapsed().as_millis() as u64;

        total_ms += elapsed;
        max_ms = max_ms.max(elapsed);
        count += 1;

        println!("{mv} ({elapsed}ms)");
        println!("{}", game.board_text());
    }

    if count > 0 {
        println!("Average: {}ms", total_ms / count);
        println!("Max: {max_ms}ms");
    }

    let result = game.to_game_result();
    let diff = result.black_count as i32 - result.white_count as i32;
    match result.winner {
        Some(Winner::Black) => println!("Black wins! ({diff})"),
        Some(Winner::White) => println!("White wins! ({})", -diff),
        None => println!("Draw!"),
    }

    ExitCode::SUCCESS
}
