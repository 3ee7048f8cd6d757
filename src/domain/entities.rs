use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Identifier for commodities returned by the UEX API.
pub type CommodityId = i64;

/// Station id used by the API when a yield bonus is not tied to a station.
pub const NO_STATION_ID: &str = "0";

/// A refined commodity obtainable by refining a raw ore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ore {
    /// Id of the refined commodity.
    pub id: CommodityId,
    /// Id of the unrefined source commodity. Used as the selection key.
    pub raw_id: CommodityId,
    pub name: String,
    pub code: String,
    pub kind: String,
    pub refined_price_sell: f64,
}

impl Ore {
    /// Case-insensitive substring match on name or code.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.code.to_lowercase().contains(&needle)
    }
}

/// A refining process offered by stations.
///
/// Ratings are coarse values in `1..=3`. For cost, 1 is the cheapest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineryMethod {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub rating_yield: u8,
    pub rating_cost: u8,
    pub rating_speed: u8,
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 3;

/// Display label for a rating value.
pub fn rating_label(value: u8) -> &'static str {
    match value {
        1 => "Low",
        2 => "Moderate",
        3 => "High",
        _ => "Unknown",
    }
}

/// Per-ore, per-station modifier to refining yield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldBonus {
    /// Raw commodity id, stringified.
    pub ore_code: String,
    pub station_id: String,
    pub station_name: String,
    pub commodity_name: String,
    /// Signed percentage. Never zero.
    pub yield_bonus: i32,
}

impl YieldBonus {
    pub fn has_station(&self) -> bool {
        self.station_id != NO_STATION_ID
    }
}

/// Where one resource of a snapshot came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    #[default]
    Live,
    /// The request failed and the bundled table was used instead.
    Fallback,
    /// The request failed and no bundled table exists.
    Missing,
}

impl Provenance {
    pub fn is_live(&self) -> bool {
        matches!(self, Provenance::Live)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProvenance {
    pub ores: Provenance,
    pub methods: Provenance,
    pub yields: Provenance,
}

impl SourceProvenance {
    pub fn all_live(&self) -> bool {
        self.ores.is_live() && self.methods.is_live() && self.yields.is_live()
    }

    /// Names of the resources that did not come from the API.
    pub fn degraded(&self) -> Vec<&'static str> {
        [
            ("ores", self.ores),
            ("methods", self.methods),
            ("yield bonuses", self.yields),
        ]
        .into_iter()
        .filter(|(_, provenance)| !provenance.is_live())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Immutable bundle of normalized ores, methods and yields.
///
/// Built once per fetch cycle and replaced wholesale on refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct RefiningData {
    pub ores: Vec<Ore>,
    pub methods: Vec<RefineryMethod>,
    pub yields: Vec<YieldBonus>,
    pub provenance: SourceProvenance,
    pub from_cache: bool,
    pub fetched_at: SystemTime,
}

impl RefiningData {
    pub fn find_ore(&self, raw_id: CommodityId) -> Option<&Ore> {
        self.ores.iter().find(|ore| ore.raw_id == raw_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ore(name: &str, code: &str) -> Ore {
        Ore {
            id: 1,
            raw_id: 2,
            name: name.to_string(),
            code: code.to_string(),
            kind: "Metal".to_string(),
            refined_price_sell: 0.0,
        }
    }

    #[test]
    fn ore_search_is_case_insensitive_on_name_and_code() {
        let gold = ore("Gold", "GOLD");
        assert!(gold.matches("gol"));
        assert!(gold.matches("OLD"));
        assert!(gold.matches(""));
        assert!(!gold.matches("quan"));

        let quant = ore("Quantainium", "QUAN");
        assert!(quant.matches("quan"));
        assert!(quant.matches("tainium"));
    }

    #[test]
    fn degraded_lists_non_live_resources() {
        let provenance = SourceProvenance {
            ores: Provenance::Fallback,
            methods: Provenance::Live,
            yields: Provenance::Missing,
        };
        assert!(!provenance.all_live());
        assert_eq!(provenance.degraded(), vec!["ores", "yield bonuses"]);
        assert!(SourceProvenance::default().all_live());
    }

    #[test]
    fn rating_labels() {
        assert_eq!(rating_label(1), "Low");
        assert_eq!(rating_label(2), "Moderate");
        assert_eq!(rating_label(3), "High");
    }
}
