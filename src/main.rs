//! # Burrow Main Entry Point
//!
//! Loads or creates a session for the named hero and runs a line-based
//! terminal loop over it. Every character of an input line is one key press.

use burrow::{
    game_over_summary, BurrowResult, Catalog, GameOverReason, GamePlay, GenerationConfig,
    InputHandler, PlayerInput, TextDisplay, HELP_TEXT,
};
use clap::Parser;
use log::{error, info, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Command line arguments for Burrow.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "A turn-based dungeon crawler")]
#[command(version)]
struct Args {
    /// Name of your hero; an existing save under this name is resumed
    name: String,

    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generation settings as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Monster template table
    #[arg(long, requires = "items")]
    monsters: Option<PathBuf>,

    /// Item template table
    #[arg(long, requires = "monsters")]
    items: Option<PathBuf>,

    /// Directory holding save files
    #[arg(long, default_value = ".")]
    save_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> BurrowResult<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .format_target(false)
        .init();

    info!("Starting Burrow v{}", burrow::VERSION);

    let save_path = args.save_dir.join(format!("{}.sav.json", args.name));
    let mut display = TextDisplay::new();
    let mut game = match load_saved(&save_path) {
        Some(game) => {
            display.add_message(format!("Welcome back, {}!", args.name));
            game
        }
        None => {
            let game = new_game(&args)?;
            display.add_message(format!("Welcome, {}!", args.name));
            game
        }
    };

    let reason = run(&mut game, &mut display, &save_path)?;
    println!("{}", display.render(&game));
    println!("{}", game_over_summary(&game, reason));
    Ok(())
}

fn load_saved(path: &Path) -> Option<GamePlay> {
    if !path.exists() {
        return None;
    }
    match GamePlay::load_from_file(path) {
        Ok(game) => Some(game),
        Err(err) => {
            warn!("Cannot read save file {}: {}; creating a new hero", path.display(), err);
            None
        }
    }
}

fn new_game(args: &Args) -> BurrowResult<GamePlay> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GenerationConfig::new(rand::random()),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let catalog = match (&args.monsters, &args.items) {
        (Some(monsters), Some(items)) => Catalog::from_files(monsters, items)?,
        _ => Catalog::builtin()?,
    };

    info!("Generating dungeon with seed {}", config.seed);
    GamePlay::new(args.name.as_str(), catalog, config)
}

/// Reads keys until the session ends, the player quits or saves.
fn run(game: &mut GamePlay, display: &mut TextDisplay, save_path: &Path) -> BurrowResult<GameOverReason> {
    let mut input = InputHandler::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}> ", display.render(&*game));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            info!("Input closed; leaving without saving");
            return Ok(GameOverReason::Quit);
        };

        for key in line?.chars().filter(|c| !c.is_whitespace()) {
            match input.handle_key(key) {
                PlayerInput::Act(command) => {
                    if let Err(err) = game.apply(command) {
                        error!("Command {:?} failed: {}", command, err);
                    }
                    display.add_events(game.drain_events());
                }
                PlayerInput::ShowInventory => {
                    for text in game.hero().inventory().listing().lines() {
                        display.add_message(text);
                    }
                }
                PlayerInput::Help => println!("{}\n", HELP_TEXT),
                PlayerInput::Notice(texts) => {
                    for text in texts {
                        display.add_message(text);
                    }
                }
                PlayerInput::Quit => return Ok(GameOverReason::Quit),
                PlayerInput::Save => {
                    game.save_to_file(save_path)?;
                    return Ok(GameOverReason::Saved);
                }
            }

            if let Some(reason) = GameOverReason::from_state(game.state()) {
                return Ok(reason);
            }
        }
    }
}
