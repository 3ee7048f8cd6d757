//! CSS class helpers shared by the pages.

use crate::domain::BestFor;

/// Tone for a yield or speed rating, where higher is better.
pub fn rating_tone(value: u8) -> &'static str {
    match value {
        3 => "tone-good",
        2 => "tone-mid",
        _ => "tone-bad",
    }
}

/// Tone for a cost rating, where lower is better.
pub fn cost_tone(value: u8) -> &'static str {
    match value {
        0 | 1 => "tone-good",
        2 => "tone-mid",
        _ => "tone-bad",
    }
}

pub fn best_for_badge(best_for: BestFor) -> &'static str {
    match best_for {
        BestFor::MaxProfit => "badge badge--green",
        BestFor::QuickRuns => "badge badge--blue",
        BestFor::Budget => "badge badge--amber",
        BestFor::Balanced => "badge badge--purple",
        BestFor::Niche => "badge badge--muted",
    }
}

pub fn bonus_class(value: Option<i32>) -> &'static str {
    match value {
        Some(v) if v > 0 => "bonus bonus--pos",
        Some(v) if v < 0 => "bonus bonus--neg",
        _ => "bonus bonus--none",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_tone_is_inverted() {
        assert_eq!(rating_tone(3), "tone-good");
        assert_eq!(cost_tone(3), "tone-bad");
        assert_eq!(cost_tone(1), "tone-good");
        assert_eq!(rating_tone(2), cost_tone(2));
    }
}
