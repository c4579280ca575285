//! Balda - CLI
//!
//! Play Balda in the terminal, ask for move suggestions on a saved game, or
//! watch computer players compete.

use anyhow::{Context, Result, bail};
use balda::{
    ai::StrategyType,
    commands::{run_play, run_selfplay, suggest_for_file},
    config::GameConfig,
    dictionary::{WordSet, loader::resolve},
    output::{print_selfplay_statistics, print_suggest_report},
    service::{GameService, NewGame},
    store::{GameStore, MemoryStore, read_game},
};
use clap::{Args, Parser, Subcommand};
use rand::prelude::{IndexedRandom, SliceRandom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "balda",
    about = "Balda word game: play, get move suggestions, or run AI self-play",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// AI strategy: greedy (default), longest, random
    #[arg(short, long, global = true, default_value = "greedy")]
    strategy: String,

    /// Wordlist: 'embedded' (default) or path to a file with one word per line
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// JSON file overriding engine settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive game in the terminal (default)
    Play(PlayArgs),

    /// Rank the moves available in a saved game
    Suggest {
        /// Game file written by 'save' in play mode
        file: PathBuf,

        /// Number of suggestions
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Play AI-vs-AI games and report statistics
    Selfplay {
        /// Number of games
        #[arg(short = 'n', long, default_value = "20")]
        games: usize,

        /// Board size
        #[arg(long, default_value = "5")]
        size: usize,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Board size
    #[arg(long, default_value = "5")]
    size: usize,

    /// Starting word (random word of the board size if omitted)
    #[arg(short, long)]
    base: Option<String>,

    /// Comma-separated player names
    #[arg(short, long, value_delimiter = ',', default_value = "Player 1,Player 2")]
    players: Vec<String>,

    /// Comma-separated names of players the computer controls
    #[arg(long, value_delimiter = ',')]
    ai: Vec<String>,

    /// Resume a saved game instead of starting a new one
    #[arg(long)]
    load: Option<PathBuf>,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            size: 5,
            base: None,
            players: vec!["Player 1".to_string(), "Player 2".to_string()],
            ai: Vec::new(),
            load: None,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path).context("loading engine config"),
        None => Ok(GameConfig::default()),
    }
}

/// Words that fit exactly across a board of `size`
fn base_words(words: &WordSet, size: usize) -> Vec<String> {
    words
        .iter()
        .filter(|w| w.chars().count() == size)
        .map(str::to_string)
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let words = resolve(&cli.wordlist)
        .with_context(|| format!("loading word list '{}'", cli.wordlist))?;
    let strategy = StrategyType::from_name(&cli.strategy);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play(PlayArgs::default()));

    match command {
        Commands::Play(args) => run_play_command(words, config, &strategy, args),
        Commands::Suggest { file, limit, json } => {
            run_suggest_command(&file, &words, &config, limit, json)
        }
        Commands::Selfplay { games, size } => {
            run_selfplay_command(&words, &config, &strategy, games, size)
        }
    }
}

fn run_play_command(
    words: WordSet,
    config: GameConfig,
    strategy: &StrategyType,
    args: PlayArgs,
) -> Result<()> {
    let starts = base_words(&words, args.size);
    let service = GameService::new(MemoryStore::new(), Arc::new(words), config);

    let game_id = if let Some(path) = &args.load {
        let game = read_game(path).context("loading saved game")?;
        service.store().upsert(&game)?;
        game.id().to_string()
    } else {
        let base_word = match args.base {
            Some(base) => base,
            None => starts
                .choose(&mut rand::rng())
                .cloned()
                .with_context(|| format!("no {}-letter word to start with", args.size))?,
        };
        let new = NewGame {
            id: "local".to_string(),
            size: args.size,
            base_word,
            players: args.players,
            ai_players: args.ai,
        };
        service.create_game(&new).context("starting game")?.id().to_string()
    };

    run_play(&service, &game_id, strategy)
}

fn run_suggest_command(
    file: &Path,
    words: &WordSet,
    config: &GameConfig,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let report = suggest_for_file(file, words, config, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_suggest_report(&report);
    }
    Ok(())
}

fn run_selfplay_command(
    words: &WordSet,
    config: &GameConfig,
    strategy: &StrategyType,
    games: usize,
    size: usize,
) -> Result<()> {
    let mut starts = base_words(words, size);
    if starts.is_empty() {
        bail!("no {size}-letter words in the word list");
    }
    starts.shuffle(&mut rand::rng());

    println!("\n{}", "═".repeat(70));
    println!(" Balda Self-Play ");
    println!("{}", "═".repeat(70));
    println!("\nStrategy: {}", strategy.name());
    println!("Board:    {size}x{size}, {} starting words\n", starts.len());

    let stats = run_selfplay(words, config, strategy, games, size, &starts)?;
    print_selfplay_statistics(&stats);
    Ok(())
}
