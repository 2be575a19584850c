pub mod matches;
pub mod player;
pub mod standings;
pub mod team;

const MAX_EMOJI_CHARS: usize = 16;

/// Emoji markers are short: a single glyph, possibly a joined sequence.
fn validate_emoji(emoji: &str) -> Result<(), validator::ValidationError> {
    let chars = emoji.chars().count();

    if (1..=MAX_EMOJI_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_emoji"))
    }
}
