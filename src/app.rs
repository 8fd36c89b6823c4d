use crate::cli::{Cli, Command, PlayerKind};
use anyhow::{Context, Result};
use hoigi_core::engine::config::EngineConfig;
use hoigi_core::engine::random::RandomEngine;
use hoigi_core::engine::search::{AlphaBetaEngine, MinimaxEngine};
use hoigi_core::engine::Searcher;
use hoigi_core::logic::board::Team;
use hoigi_core::logic::game::{GameState, GameStatus};
use log::info;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            white,
            black,
            depth,
            max_plies,
            seed,
            output,
        } => {
            let config = match depth {
                Some(search_depth) => EngineConfig {
                    search_depth,
                    ..config
                },
                None => config,
            };
            let config = Arc::new(config);
            if let Some(seed) = seed {
                info!("seed {seed}");
            }

            let mut white = make_player(white, config.clone(), seed);
            let mut black = make_player(black, config, seed.map(|s| s.wrapping_add(1)));
            let game = play(white.as_mut(), black.as_mut(), max_plies)?;

            println!("{}", game.board);
            report(&game);

            if let Some(path) = output {
                fs::write(&path, game.transcript())
                    .with_context(|| format!("writing transcript to {}", path.display()))?;
                info!("transcript written to {}", path.display());
            }
        }
        Command::Replay { transcript, json } => {
            let text = fs::read_to_string(&transcript)
                .with_context(|| format!("reading transcript {}", transcript.display()))?;
            let game = GameState::replay(&text)
                .with_context(|| format!("replaying {}", transcript.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&game)?);
            } else {
                println!("{}", game.board);
                report(&game);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    EngineConfig::load_from_json(&json)
        .with_context(|| format!("parsing config {}", path.display()))
}

fn make_player(
    kind: PlayerKind,
    config: Arc<EngineConfig>,
    seed: Option<u64>,
) -> Box<dyn Searcher> {
    match kind {
        PlayerKind::Random => match seed {
            Some(seed) => Box::new(RandomEngine::new(seed)),
            None => Box::new(RandomEngine::from_entropy()),
        },
        PlayerKind::Minimax => Box::new(MinimaxEngine::new(config)),
        PlayerKind::AlphaBeta => Box::new(AlphaBetaEngine::new(config)),
    }
}

fn play(white: &mut dyn Searcher, black: &mut dyn Searcher, max_plies: usize) -> Result<GameState> {
    let mut game = GameState::new();

    for ply in 0..max_plies {
        if game.is_over() {
            break;
        }
        let turn = game.turn();
        let engine: &mut dyn Searcher = match turn {
            Team::White => &mut *white,
            Team::Black => &mut *black,
        };

        let Some((mv, stats)) = engine
            .search(&game.board)
            .with_context(|| format!("{turn:?} search failed at ply {ply}"))?
        else {
            info!("{turn:?} has no move");
            break;
        };

        info!(
            "{ply}: {turn:?} {:?} {} -> {}{} (score {:.1}, {} nodes, {}ms)",
            mv.kind,
            mv.from,
            mv.to,
            if mv.capture { " x" } else { "" },
            stats.score,
            stats.nodes,
            stats.time_ms
        );
        game.make_move(mv)?;
    }

    Ok(game)
}

fn report(game: &GameState) {
    let plies = game.board.history.len();
    match game.status {
        GameStatus::Won(winner) => println!("{winner:?} wins after {plies} plies"),
        GameStatus::Stalemate(stuck) => {
            println!("stalemate: {stuck:?} has no move after {plies} plies");
        }
        GameStatus::Playing => println!("no result after {plies} plies"),
    }
}
