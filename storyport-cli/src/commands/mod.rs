//! CLI command implementations

pub mod import;
pub mod list;

pub use import::ImportArgs;
pub use list::ListArgs;

/// Pick the emoji or its plain-text stand-in
fn emoji<'a>(no_emoji: bool, emoji_char: &'a str, ascii_alt: &'a str) -> &'a str {
    if no_emoji {
        ascii_alt
    } else {
        emoji_char
    }
}
