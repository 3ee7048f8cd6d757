//! Bundled reference tables used when the UEX API cannot be reached.

use super::entities::{CommodityId, Ore, RefineryMethod};

// (refined id, raw id, name, code, kind, refined sell price)
const ORES: &[(CommodityId, CommodityId, &str, &str, &str, f64)] = &[
    (124, 163, "Riccite", "RICC", "Metal", 84115.0),
    (122, 162, "Stileron", "STIL", "Mineral", 88198.0),
    (188, 187, "Savrilium", "SAVR", "Metal", 81530.0),
    (58, 59, "Quantainium", "QUAN", "Mineral", 84615.0),
    (184, 185, "Lindinium", "LIND", "Metal", 22525.0),
    (110, 165, "Cobalt", "COBA", "Mineral", 21550.0),
    (73, 74, "Taranite", "TARA", "Mineral", 20818.0),
    (13, 14, "Bexalite", "BEXA", "Mineral", 18567.0),
    (25, 26, "Diamond", "DIAM", "Metal", 7686.0),
    (33, 34, "Gold", "GOLD", "Metal", 7377.0),
    (15, 16, "Borase", "BORA", "Metal", 6430.0),
    (47, 48, "Laranite", "LARA", "Metal", 5133.0),
    (11, 12, "Beryl", "BERY", "Mineral", 4803.0),
    (1, 2, "Agricium", "AGRI", "Metal", 4073.0),
    (39, 40, "Hephaestanite", "HEPH", "Mineral", 4001.0),
    (77, 78, "Tungsten", "TUNG", "Metal", 2311.0),
    (190, 189, "Torite", "TORI", "Metal", 2158.0),
    (44, 45, "Iron", "IRON", "Metal", 2079.0),
    (75, 76, "Titanium", "TITA", "Metal", 2056.0),
    (60, 61, "Quartz", "QUAR", "Metal", 1756.0),
    (22, 23, "Corundum", "CORU", "Mineral", 1751.0),
    (20, 21, "Copper", "COPP", "Metal", 1698.0),
    (5, 6, "Aluminum", "ALUM", "Metal", 1671.0),
    (103, 176, "Tin", "TIN", "Metal", 1613.0),
    (100, 161, "Silicon", "SILI", "Raw Materials", 1171.0),
];

// (id, name, code, yield, cost, speed)
const METHODS: &[(i64, &str, &str, u8, u8, u8)] = &[
    (1, "Cormack", "COR", 1, 2, 3),
    (2, "Dinyx Solventation", "DIN", 3, 1, 1),
    (3, "Electrostarolysis", "EST", 2, 2, 2),
    (4, "Gaskin Process", "GAS", 2, 3, 3),
    (5, "Pyrometric Chromalysis", "PYR", 3, 3, 1),
    (6, "Kazen Winnowing", "KZW", 1, 2, 2),
    (7, "Thermonatic Deposition", "TND", 2, 2, 1),
    (8, "Ferron Exchange", "FRX", 3, 2, 1),
    (9, "XCR Reaction", "XCR", 1, 3, 3),
];

/// Ore table in its bundled order.
pub fn fallback_ores() -> Vec<Ore> {
    ORES.iter()
        .map(|&(id, raw_id, name, code, kind, price)| Ore {
            id,
            raw_id,
            name: name.to_string(),
            code: code.to_string(),
            kind: kind.to_string(),
            refined_price_sell: price,
        })
        .collect()
}

pub fn fallback_methods() -> Vec<RefineryMethod> {
    METHODS
        .iter()
        .map(|&(id, name, code, rating_yield, rating_cost, rating_speed)| RefineryMethod {
            id,
            name: name.to_string(),
            code: code.to_string(),
            rating_yield,
            rating_cost,
            rating_speed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::entities::{MAX_RATING, MIN_RATING};

    #[test]
    fn fallback_ores_have_unique_raw_ids() {
        let ores = fallback_ores();
        let raw_ids: HashSet<_> = ores.iter().map(|ore| ore.raw_id).collect();
        assert_eq!(raw_ids.len(), ores.len());
        assert!(ores.iter().all(|ore| ore.refined_price_sell >= 0.0));
    }

    #[test]
    fn fallback_method_ratings_are_in_range() {
        let methods = fallback_methods();
        assert_eq!(methods.len(), 9);
        for method in methods {
            for rating in [method.rating_yield, method.rating_cost, method.rating_speed] {
                assert!((MIN_RATING..=MAX_RATING).contains(&rating), "{}", method.name);
            }
        }
    }
}
