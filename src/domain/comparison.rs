//! Method comparison: "Best For" classification and summary highlights.

use super::entities::RefineryMethod;

/// Categorical recommendation derived from a method's ratings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BestFor {
    MaxProfit,
    QuickRuns,
    Budget,
    Balanced,
    Niche,
}

impl BestFor {
    /// First matching rule wins.
    pub fn classify(method: &RefineryMethod) -> Self {
        let (yld, cost, speed) = (method.rating_yield, method.rating_cost, method.rating_speed);
        if yld == 3 && cost <= 2 {
            Self::MaxProfit
        } else if speed == 3 && yld >= 1 {
            Self::QuickRuns
        } else if cost == 1 {
            Self::Budget
        } else if yld >= 2 && speed >= 2 {
            Self::Balanced
        } else {
            Self::Niche
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MaxProfit => "Max Profit",
            Self::QuickRuns => "Quick Runs",
            Self::Budget => "Budget",
            Self::Balanced => "Balanced",
            Self::Niche => "Niche",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodHighlights {
    pub highest_yield: Vec<String>,
    pub cheapest: Vec<String>,
    pub fastest: Vec<String>,
}

pub fn method_highlights(methods: &[RefineryMethod]) -> MethodHighlights {
    let names = |pred: fn(&RefineryMethod) -> bool| {
        methods
            .iter()
            .filter(|method| pred(method))
            .map(|method| method.name.clone())
            .collect::<Vec<_>>()
    };

    MethodHighlights {
        highest_yield: names(|m| m.rating_yield == 3),
        cheapest: names(|m| m.rating_cost == 1),
        fastest: names(|m| m.rating_speed == 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::fallback_methods;

    fn method(rating_yield: u8, rating_cost: u8, rating_speed: u8) -> RefineryMethod {
        RefineryMethod {
            id: 0,
            name: "Test".to_string(),
            code: "TST".to_string(),
            rating_yield,
            rating_cost,
            rating_speed,
        }
    }

    #[test]
    fn high_yield_cheap_method_is_max_profit() {
        assert_eq!(BestFor::classify(&method(3, 1, 1)), BestFor::MaxProfit);
        assert_eq!(BestFor::classify(&method(3, 2, 3)), BestFor::MaxProfit);
    }

    #[test]
    fn speed_rule_precedes_budget_rule() {
        assert_eq!(BestFor::classify(&method(1, 3, 3)), BestFor::QuickRuns);
        assert_eq!(BestFor::classify(&method(1, 1, 3)), BestFor::QuickRuns);
    }

    #[test]
    fn remaining_rules_in_order() {
        assert_eq!(BestFor::classify(&method(1, 1, 1)), BestFor::Budget);
        assert_eq!(BestFor::classify(&method(2, 2, 2)), BestFor::Balanced);
        assert_eq!(BestFor::classify(&method(3, 3, 2)), BestFor::Balanced);
        assert_eq!(BestFor::classify(&method(3, 3, 1)), BestFor::Niche);
        assert_eq!(BestFor::classify(&method(1, 2, 2)), BestFor::Niche);
    }

    #[test]
    fn fallback_table_labels() {
        let labels: Vec<_> = fallback_methods()
            .iter()
            .map(|m| BestFor::classify(m).label())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Quick Runs",
                "Max Profit",
                "Balanced",
                "Quick Runs",
                "Niche",
                "Niche",
                "Niche",
                "Max Profit",
                "Quick Runs",
            ]
        );
    }

    #[test]
    fn highlights_collect_names_in_source_order() {
        let highlights = method_highlights(&fallback_methods());
        assert_eq!(
            highlights.highest_yield,
            vec!["Dinyx Solventation", "Pyrometric Chromalysis", "Ferron Exchange"]
        );
        assert_eq!(highlights.cheapest, vec!["Dinyx Solventation"]);
        assert_eq!(
            highlights.fastest,
            vec!["Cormack", "Gaskin Process", "XCR Reaction"]
        );
    }
}
