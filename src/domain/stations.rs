//! Ore × station yield bonus matrix.

use std::collections::{HashMap, HashSet};

use super::entities::{Ore, RefiningData, YieldBonus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct StationMatrix {
    pub stations: Vec<Station>,
    /// Ores with at least one yield record, in snapshot order.
    pub ores: Vec<Ore>,
    bonuses: HashMap<(String, String), i32>,
}

impl StationMatrix {
    pub fn build(data: &RefiningData) -> Self {
        let stations = station_list(&data.yields);

        let bonuses = data
            .yields
            .iter()
            .map(|y| ((y.ore_code.clone(), y.station_id.clone()), y.yield_bonus))
            .collect();

        let ore_codes: HashSet<&str> = data.yields.iter().map(|y| y.ore_code.as_str()).collect();
        let ores = data
            .ores
            .iter()
            .filter(|ore| ore_codes.contains(ore.raw_id.to_string().as_str()))
            .cloned()
            .collect();

        Self {
            stations,
            ores,
            bonuses,
        }
    }

    /// Nothing to draw without both bonus records and named stations.
    pub fn has_data(&self) -> bool {
        !self.bonuses.is_empty() && !self.stations.is_empty()
    }

    /// Bonus for an ore at a station. Zero is reported as no data.
    pub fn bonus(&self, ore: &Ore, station_id: &str) -> Option<i32> {
        self.bonuses
            .get(&(ore.raw_id.to_string(), station_id.to_string()))
            .copied()
            .filter(|value| *value != 0)
    }

    pub fn filtered_ores(&self, query: &str) -> Vec<&Ore> {
        self.ores.iter().filter(|ore| ore.matches(query)).collect()
    }
}

/// Distinct named stations, sorted by display name. The "no station"
/// sentinel never appears.
pub fn station_list(yields: &[YieldBonus]) -> Vec<Station> {
    let mut by_id: HashMap<&str, &str> = HashMap::new();
    for y in yields {
        if y.has_station() && !y.station_name.is_empty() {
            by_id.insert(y.station_id.as_str(), y.station_name.as_str());
        }
    }

    let mut stations: Vec<Station> = by_id
        .into_iter()
        .map(|(id, name)| Station {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();
    stations.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    stations
}

pub fn format_bonus(value: Option<i32>) -> String {
    match value {
        Some(v) if v > 0 => format!("+{v}%"),
        Some(v) if v < 0 => format!("{v}%"),
        _ => "—".to_string(),
    }
}
