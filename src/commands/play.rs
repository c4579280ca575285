//! Interactive text-mode game
//!
//! Hot-seat play for any number of humans, with AI players moving on their own.

use crate::ai::Strategy;
use crate::core::Position;
use crate::game::MoveRequest;
use crate::output::{print_game, print_game_over, print_suggestions};
use crate::service::{GameService, ServiceError};
use crate::store::{GameStore, write_game};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    /// `ROW COL LETTER WORD`
    Move {
        position: Position,
        letter: String,
        word: String,
    },
    Hint,
    Rename(String),
    Save(PathBuf),
    Quit,
    Help,
}

impl PlayCommand {
    /// Parse a command line
    ///
    /// # Errors
    ///
    /// Returns a message for the player if the line is not a command.
    pub fn parse(input: &str) -> Result<Self, String> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((&head, rest)) = parts.split_first() else {
            return Err("Empty input".to_string());
        };

        match (head.to_lowercase().as_str(), rest) {
            ("quit" | "q" | "exit", []) => Ok(Self::Quit),
            ("hint" | "h", []) => Ok(Self::Hint),
            ("help" | "?", []) => Ok(Self::Help),
            ("rename", [name]) => Ok(Self::Rename((*name).to_string())),
            ("save", [path]) => Ok(Self::Save(PathBuf::from(*path))),
            (_, [col, letter, word]) => {
                let row = head
                    .parse()
                    .map_err(|_| format!("'{head}' is not a row number"))?;
                let col = col
                    .parse()
                    .map_err(|_| format!("'{col}' is not a column number"))?;
                Ok(Self::Move {
                    position: Position::new(row, col),
                    letter: (*letter).to_string(),
                    word: (*word).to_string(),
                })
            }
            _ => Err(format!("Unknown command '{input}', type 'help'")),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  ROW COL LETTER WORD   place LETTER at (ROW, COL) and claim WORD");
    println!("  hint                  show the best moves");
    println!("  rename NAME           rename the player to move");
    println!("  save FILE             save the game as JSON");
    println!("  quit                  leave the game\n");
}

/// Run the interactive game loop for a stored game
///
/// # Errors
///
/// Returns an error on terminal I/O failure or if the game disappears from
/// the store.
pub fn run_play<S: GameStore, T: Strategy>(
    service: &GameService<S>,
    game_id: &str,
    strategy: &T,
) -> anyhow::Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                         B A L D A                            ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    loop {
        let game = service.get_game(game_id)?;
        print_game(&game);

        if game.is_board_full() || service.suggest(game_id, Some(1))?.is_empty() {
            print_game_over(&game);
            return Ok(());
        }

        let player = game.current_player().to_string();

        if game.is_ai(&player) {
            let next = service.play_ai(game_id, strategy)?;
            if let Some(last) = next.moves().last() {
                println!(
                    "🤖 {} plays {} at {} for {}",
                    player.bright_magenta().bold(),
                    last.word.bright_yellow().bold(),
                    last.position,
                    next.score_of(&last.player_id) - game.score_of(&player)
                );
            }
            continue;
        }

        let input = get_user_input(&player)?;
        let command = match PlayCommand::parse(&input) {
            Ok(command) => command,
            Err(message) => {
                println!("{}\n", message.red());
                continue;
            }
        };

        match command {
            PlayCommand::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            PlayCommand::Help => print_help(),
            PlayCommand::Hint => print_suggestions(&service.suggest(game_id, Some(5))?),
            PlayCommand::Rename(name) => match service.rename_player(game_id, &player, &name) {
                Ok(_) => println!("✓ {player} is now {name}\n"),
                Err(e) => println!("{}\n", e.to_string().red()),
            },
            PlayCommand::Save(path) => match write_game(&path, &game) {
                Ok(()) => println!("✓ Saved to {}\n", path.display()),
                Err(e) => println!("{}\n", e.to_string().red()),
            },
            PlayCommand::Move {
                position,
                letter,
                word,
            } => {
                let request = MoveRequest::new(player.as_str(), position, letter, word);
                match service.submit_move(game_id, &request) {
                    Ok(next) => println!(
                        "✓ {} scores {}\n",
                        player.bright_cyan().bold(),
                        next.score_of(&player) - game.score_of(&player)
                    ),
                    Err(ServiceError::Move(e)) => println!("❌ {}\n", e.to_string().red()),
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> io::Result<String> {
    print!("{prompt}> ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        // EOF behaves like quit
        return Ok("quit".to_string());
    }

    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_move() {
        assert_eq!(
            PlayCommand::parse("1 0 s shell"),
            Ok(PlayCommand::Move {
                position: Position::new(1, 0),
                letter: "s".to_string(),
                word: "shell".to_string(),
            })
        );
    }

    #[test]
    fn parse_keywords() {
        assert_eq!(PlayCommand::parse("quit"), Ok(PlayCommand::Quit));
        assert_eq!(PlayCommand::parse("  HINT "), Ok(PlayCommand::Hint));
        assert_eq!(
            PlayCommand::parse("rename Alice"),
            Ok(PlayCommand::Rename("Alice".to_string()))
        );
        assert_eq!(
            PlayCommand::parse("save game.json"),
            Ok(PlayCommand::Save(PathBuf::from("game.json")))
        );
    }

    #[test]
    fn parse_errors() {
        assert!(PlayCommand::parse("").is_err());
        assert!(PlayCommand::parse("x 0 s shell").is_err());
        assert!(PlayCommand::parse("1 y s shell").is_err());
        assert!(PlayCommand::parse("1 0 s").is_err());
        assert!(PlayCommand::parse("rename").is_err());
    }
}
