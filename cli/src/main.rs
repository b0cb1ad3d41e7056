mod config;

use clap::Parser;
use config::{Config, FileContentConfigProvider, load_config, save_config};
use link_engine::game_state::LinkGameState;
use link_engine::grid::Grid;
use link_engine::log;
use link_engine::logger;
use link_engine::rng::SessionRng;
use link_engine::types::{GameEvent, GameStatus, HintResult, PatternId, Position};

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Parser)]
#[command(name = "link_cli")]
struct Args {
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    write_default_config: Option<String>,

    // Consecutive games bump the seed by one.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1)]
    games: u32,

    #[arg(long)]
    show_boards: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("LinkCli".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    if let Some(path) = args.write_default_config.as_deref() {
        let provider = FileContentConfigProvider::new(path.to_string());
        save_config(&provider, &Config::default())?;
        log!("Default config written to {}", path);
        return Ok(());
    }

    let config = match args.config.as_deref() {
        Some(path) => load_config(&FileContentConfigProvider::new(path.to_string()))?,
        None => Config::default(),
    };

    let mut cleared = 0u32;
    let mut stuck = 0u32;

    for game_number in 0..args.games {
        let mut rng = match args.seed {
            Some(seed) => SessionRng::new(seed.wrapping_add(u64::from(game_number))),
            None => SessionRng::from_random(),
        };
        let seed = rng.seed();

        let mut state = LinkGameState::new(&config.level, &config.level.pattern_list(), &mut rng)?;

        if args.show_boards {
            print_board(state.grid());
        }

        while state.status() == GameStatus::InProgress {
            let hint = state.request_hint(&mut rng)?;
            if let HintResult::Pair(first, second) = hint {
                state.select_cell(first)?;
                state.select_cell(second)?;
            }

            for event in state.take_events() {
                match event {
                    GameEvent::PairMatched {
                        first,
                        second,
                        path,
                    } if args.show_boards => {
                        println!(
                            "Matched ({}, {}) with ({}, {}) through {} path points",
                            first.row,
                            first.col,
                            second.row,
                            second.col,
                            path.len()
                        );
                    }
                    GameEvent::BoardCleared => log!("Board cleared"),
                    GameEvent::NoMovesLeft => log!("No moves left"),
                    _ => {}
                }
            }

            if args.show_boards {
                print_board(state.grid());
            }
        }

        match state.status() {
            GameStatus::Cleared => cleared += 1,
            GameStatus::Stuck => stuck += 1,
            GameStatus::InProgress => {}
        }

        let generation = state.generation();
        log!(
            "Game {}: seed {}, {:?}, matched {}/{}, generated in {} attempts{}",
            game_number + 1,
            seed,
            state.status(),
            state.pairs_matched(),
            state.pairs_total(),
            generation.attempts,
            if generation.deep_reshuffled {
                " (deep reshuffle)"
            } else {
                ""
            }
        );
    }

    log!(
        "Played {} games: {} cleared, {} stuck",
        args.games,
        cleared,
        stuck
    );

    Ok(())
}

fn pattern_glyph(pattern: PatternId) -> char {
    let index = (pattern.0 as usize).saturating_sub(1);
    GLYPHS.get(index).map(|&b| b as char).unwrap_or('?')
}

fn print_board(grid: &Grid) {
    for row in 0..grid.rows() {
        let mut line = String::with_capacity(grid.cols() * 2);
        for col in 0..grid.cols() {
            let glyph = grid
                .get(Position::new(row, col))
                .filter(|cell| cell.is_active())
                .and_then(|cell| cell.pattern)
                .map(pattern_glyph)
                .unwrap_or('.');
            line.push(glyph);
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }
    println!();
}
