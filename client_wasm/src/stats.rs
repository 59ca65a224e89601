//! Text for the end-of-match statistics screen

use proto::ScoreEntry;

pub fn final_score_line(player1: &str, score1: u32, player2: &str, score2: u32) -> String {
    format!("Final Score: {player1}: {score1} - {player2}: {score2}")
}

/// The winner is whoever scored strictly more; a tie goes to player 2.
pub fn winner_message(player1: &str, score1: u32, player2: &str, score2: u32) -> String {
    let ((winner, winner_score), (loser, loser_score)) = if score1 > score2 {
        ((player1, score1), (player2, score2))
    } else {
        ((player2, score2), (player1, score1))
    };
    format!(
        "Congratulations, {winner}! You are the Winner with a score of {winner_score}.\n\
         Better luck next time, {loser}. Your score was {loser_score}."
    )
}

pub fn history_text(username: &str, entries: &[ScoreEntry]) -> String {
    let mut text = format!("{username} History:\n");
    for entry in entries {
        text.push_str(&format!(
            "Date: {} | Score: {} | Opponent Score: {}\n",
            entry.date_played, entry.score, entry.opponent_score
        ));
    }
    if entries.is_empty() {
        text.push_str("No history available.\n");
    }
    text
}
