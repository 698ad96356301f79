//! Tier color mapping for CLI output.
//!
//! `console` drops styling on its own when stdout is not a terminal or
//! `NO_COLOR` is set.

use console::{style, StyledObject};

use crate::domain::models::Tier;

/// Tier name styled by severity.
///
/// Danger = red bold, Caution = yellow, Good = green.
pub fn colorize_tier(tier: Tier) -> StyledObject<&'static str> {
    let name = tier_label(tier);
    match tier {
        Tier::Danger => style(name).red().bold(),
        Tier::Caution => style(name).yellow(),
        Tier::Good => style(name).green(),
    }
}

/// Upper-case tier name used on cards.
pub const fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Good => "GOOD",
        Tier::Caution => "CAUTION",
        Tier::Danger => "DANGER",
    }
}

/// Styled label for detail views (bold + dimmed colon).
pub fn label(name: &str) -> String {
    format!("{}{}", style(name).bold(), style(":").dim())
}

/// Section header with underline.
pub fn section_header(title: &str) -> String {
    format!("\n{}", style(title).bold().underlined())
}

/// Render a success action result.
pub fn action_success(message: &str) -> String {
    format!("{} {}", style("\u{2713}").green().bold(), message)
}

/// Render a failure action result.
pub fn action_failure(message: &str) -> String {
    format!("{} {}", style("\u{2717}").red().bold(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_labels() {
        assert_eq!(tier_label(Tier::Good), "GOOD");
        assert_eq!(tier_label(Tier::Caution), "CAUTION");
        assert_eq!(tier_label(Tier::Danger), "DANGER");
    }

    #[test]
    fn test_colorize_keeps_text() {
        console::set_colors_enabled(false);
        assert_eq!(colorize_tier(Tier::Danger).to_string(), "DANGER");
        assert_eq!(action_failure("nope"), "\u{2717} nope");
    }
}
