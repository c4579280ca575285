//! Display functions for games and command results

use super::formatters::{column_header, create_progress_bar, format_board_row};
use crate::commands::{SelfPlayStatistics, SuggestReport};
use crate::game::GameState;
use crate::suggest::Suggestion;
use colored::Colorize;

/// Print the board, the scores and whose turn it is
pub fn print_game(game: &GameState) {
    let board = game.board();
    let last = game.moves().last().map(|m| m.position);

    println!("{}", "─".repeat(60).cyan());
    println!("{}", column_header(board.size()).bright_black());
    for row in 0..board.size() {
        let line = format_board_row(board, row);
        if last.is_some_and(|p| p.row == row) {
            println!("{}", line.bright_white().bold());
        } else {
            println!("{line}");
        }
    }
    println!("{}", "─".repeat(60).cyan());

    print_scores(game);
    println!(
        "Move {}: {} to play\n",
        game.move_count() + 1,
        game.current_player().bright_cyan().bold()
    );
}

fn print_scores(game: &GameState) {
    let leaders = game.leaders();
    for player in game.players() {
        let score = game.score_of(player);
        let tag = if game.is_ai(player) { " (AI)" } else { "" };
        let line = format!("  {player}{tag}: {score}");
        if score > 0 && leaders.contains(&player.as_str()) {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }
}

/// Print final scores and the winner
pub fn print_game_over(game: &GameState) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    println!(" {} ", "GAME OVER".bright_cyan().bold());
    println!("{}", "═".repeat(60).bright_cyan());

    print_scores(game);

    match game.leaders().as_slice() {
        [winner] => println!("\n🏆 {} wins!", winner.bright_yellow().bold()),
        leaders => println!("\n🤝 Draw between {}", leaders.join(", ").bright_yellow()),
    }

    println!("\n  Words played:");
    for (i, m) in game.moves().iter().enumerate() {
        println!(
            "    {}. {} {} at {}",
            (i + 1).to_string().bright_black(),
            m.player_id,
            m.word.bright_white().bold(),
            m.position
        );
    }
    println!();
}

/// Print ranked suggestions
pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("{}\n", "No moves available".yellow());
        return;
    }

    println!("\n💡 {}", "Suggestions:".bright_cyan().bold());
    for (i, s) in suggestions.iter().enumerate() {
        println!(
            "  {:>2}. {:<12} {} at {}  {}",
            i + 1,
            s.word.bright_yellow().bold(),
            s.letter,
            s.position,
            format!("{:.2}", s.score).bright_black()
        );
    }
    println!();
}

/// Print suggestions for a saved game
pub fn print_suggest_report(report: &SuggestReport) {
    println!(
        "Game {}: {} to play",
        report.game_id.bright_white().bold(),
        report.player.bright_cyan().bold()
    );
    print_suggestions(&report.suggestions);
}

/// Print self-play statistics
pub fn print_selfplay_statistics(stats: &SelfPlayStatistics) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SELF-PLAY RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Games:".bright_cyan().bold());
    println!("   Games played:     {}", stats.total_games);
    println!("   Total moves:      {}", stats.total_moves);
    println!(
        "   Average moves:    {}",
        format!("{:.2}", stats.average_moves).bright_yellow().bold()
    );
    println!(
        "   Winning score:    {:.2} on average",
        stats.average_winning_score
    );
    println!("   Boards filled:    {}", stats.full_boards);
    if let Some(word) = &stats.longest_word {
        println!("   Longest word:     {}", word.green());
    }
    println!("   Time taken:       {:.2}s", stats.total_time.as_secs_f64());

    println!("\n🏆 {}", "Results:".bright_cyan().bold());
    for (player, wins) in &stats.wins {
        println!("   {player:<10} {wins}");
    }
    println!("   {:<10} {}", "Draws", stats.draws);

    println!("\n📈 {}", "Game length:".bright_cyan().bold());
    let max_count = stats.move_distribution.values().copied().max().unwrap_or(1);
    for (moves, count) in &stats.move_distribution {
        let bar = create_progress_bar(*count as f64, max_count as f64, 40);
        println!("   {moves:>3} moves: {} {count:4}", bar.green());
    }

    let lookups = stats.cache.hits + stats.cache.misses;
    if lookups > 0 {
        println!(
            "\n🧮 Path cache: {} hits / {} lookups ({:.1}%)",
            stats.cache.hits,
            lookups,
            stats.cache.hits as f64 / lookups as f64 * 100.0
        );
    }
    println!();
}
