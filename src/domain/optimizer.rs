//! Method ranking for the optimizer view.

use super::entities::{Ore, RefineryMethod};

/// Ordering applied to the method list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MethodSort {
    /// Yield descending, then cost ascending.
    #[default]
    Yield,
    /// Cost ascending, then yield descending.
    Cost,
    /// Speed descending, then yield descending.
    Speed,
}

impl MethodSort {
    pub const ALL: [MethodSort; 3] = [MethodSort::Yield, MethodSort::Cost, MethodSort::Speed];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Yield => "Yield",
            Self::Cost => "Cost",
            Self::Speed => "Speed",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Yield => "📈",
            Self::Cost => "💲",
            Self::Speed => "⏱",
        }
    }
}

/// Ores whose name or code contains `query`, in snapshot order.
pub fn filter_ores<'a>(ores: &'a [Ore], query: &str) -> Vec<&'a Ore> {
    ores.iter().filter(|ore| ore.matches(query)).collect()
}

/// Methods ranked by `sort`. Ties keep source order.
pub fn rank_methods(methods: &[RefineryMethod], sort: MethodSort) -> Vec<&RefineryMethod> {
    let mut ranked: Vec<&RefineryMethod> = methods.iter().collect();
    ranked.sort_by(|a, b| match sort {
        MethodSort::Yield => b
            .rating_yield
            .cmp(&a.rating_yield)
            .then(a.rating_cost.cmp(&b.rating_cost)),
        MethodSort::Cost => a
            .rating_cost
            .cmp(&b.rating_cost)
            .then(b.rating_yield.cmp(&a.rating_yield)),
        MethodSort::Speed => b
            .rating_speed
            .cmp(&a.rating_speed)
            .then(b.rating_yield.cmp(&a.rating_yield)),
    });
    ranked
}

/// Heading for the ranked list. Method ranking is global; the selected ore
/// only changes the title.
pub fn ranking_title(selected: Option<&Ore>) -> String {
    match selected {
        Some(ore) => format!("Best Methods for {}", ore.name),
        None => "All Methods Ranked".to_string(),
    }
}

/// Clicking the selected ore again clears the selection.
pub fn toggle_selection(current: Option<i64>, clicked: i64) -> Option<i64> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::{fallback_methods, fallback_ores};

    fn codes(methods: &[&RefineryMethod]) -> Vec<String> {
        methods.iter().map(|m| m.code.clone()).collect()
    }

    #[test]
    fn yield_ranking_breaks_ties_on_cheaper_cost() {
        let methods = fallback_methods();
        let ranked = rank_methods(&methods, MethodSort::Yield);
        assert_eq!(
            codes(&ranked),
            vec!["DIN", "FRX", "PYR", "EST", "TND", "GAS", "COR", "KZW", "XCR"]
        );
    }

    #[test]
    fn cost_ranking_breaks_ties_on_higher_yield() {
        let methods = fallback_methods();
        let ranked = rank_methods(&methods, MethodSort::Cost);
        assert_eq!(
            codes(&ranked),
            vec!["DIN", "FRX", "EST", "TND", "COR", "KZW", "PYR", "GAS", "XCR"]
        );
    }

    #[test]
    fn speed_ranking_breaks_ties_on_higher_yield() {
        let methods = fallback_methods();
        let ranked = rank_methods(&methods, MethodSort::Speed);
        assert_eq!(
            codes(&ranked),
            vec!["GAS", "COR", "XCR", "EST", "KZW", "DIN", "PYR", "FRX", "TND"]
        );
    }

    #[test]
    fn ranking_does_not_touch_source() {
        let methods = fallback_methods();
        let before = methods.clone();
        let _ = rank_methods(&methods, MethodSort::Speed);
        assert_eq!(methods, before);
    }

    #[test]
    fn filter_matches_name_or_code_ignoring_case() {
        let ores = fallback_ores();
        let names: Vec<_> = filter_ores(&ores, "ta")
            .into_iter()
            .map(|ore| ore.name.as_str())
            .collect();
        assert_eq!(names, vec!["Quantainium", "Taranite", "Hephaestanite", "Titanium"]);

        assert_eq!(filter_ores(&ores, "").len(), ores.len());
        assert_eq!(filter_ores(&ores, "LARA").len(), 1);
        assert!(filter_ores(&ores, "unobtainium").is_empty());
    }

    #[test]
    fn selection_toggles_and_titles_follow() {
        let ores = fallback_ores();
        let selected = toggle_selection(None, 34);
        assert_eq!(selected, Some(34));
        let gold = ores.iter().find(|ore| Some(ore.raw_id) == selected);
        assert_eq!(ranking_title(gold), "Best Methods for Gold");

        assert_eq!(toggle_selection(selected, 34), None);
        assert_eq!(toggle_selection(selected, 59), Some(59));
        assert_eq!(ranking_title(None), "All Methods Ranked");
    }
}
