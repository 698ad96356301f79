//! Keyword classification of diagnosis replies.

use crate::domain::models::Tier;

/// Grade word meaning danger / risk.
pub const DANGER_TOKEN: &str = "위험";

/// Grade word meaning caution / warning.
pub const CAUTION_TOKEN: &str = "주의";

/// Map reply text to a tier by plain substring containment.
///
/// Danger wins over caution; anything else, including the empty string, is
/// [`Tier::Good`].
pub fn classify(raw_text: &str) -> Tier {
    if raw_text.contains(DANGER_TOKEN) {
        Tier::Danger
    } else if raw_text.contains(CAUTION_TOKEN) {
        Tier::Caution
    } else {
        Tier::Good
    }
}
