use crate::status::{GameMode, GameStatus};

/// Lives a daily game is scored against.
const DAILY_LIVES: u8 = 6;

/// Clipboard text for a finished daily game, or `None` for random play.
pub fn daily_share_text(status: &GameStatus, play_url: &str) -> Option<String> {
    if status.mode != GameMode::Daily {
        return None;
    }

    let lost = status.lives_lost(DAILY_LIVES).min(DAILY_LIVES);
    let mut health = "💔".repeat(usize::from(lost));
    health.push_str(&"❤️".repeat(usize::from(DAILY_LIVES - lost)));
    health.push_str(if status.win { " 🎉" } else { " 💀" });

    Some(
        [
            format!("Hangman Daily {}", status.date.as_deref().unwrap_or_default()),
            format!("Category: {}", status.category),
            health,
            format!("Streak: {}", status.streak_current.unwrap_or(0)),
            format!("Play: {play_url}"),
        ]
        .join("\n"),
    )
}
