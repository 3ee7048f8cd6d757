//! Maps raw UEX payloads onto the internal refining schema.

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fmt,
};

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{
    entities::{MAX_RATING, MIN_RATING},
    CommodityId, Ore, RefineryMethod, YieldBonus, NO_STATION_ID,
};

#[derive(Debug, Deserialize)]
struct CommodityDto {
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    id_parent: Option<i64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_from_json")]
    price_sell: Option<f64>,
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    is_refinable: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RefineryMethodDto {
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    id: Option<i64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    rating_yield: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    rating_cost: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    rating_speed: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RefineryYieldDto {
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    id_commodity: Option<i64>,
    #[serde(default, deserialize_with = "opt_f64_from_json")]
    value: Option<f64>,
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    id_space_station: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64_from_json")]
    id_terminal: Option<i64>,
    #[serde(default)]
    space_station_name: Option<String>,
    #[serde(default)]
    terminal_name: Option<String>,
    #[serde(default)]
    commodity_name: Option<String>,
}

/// Builds the ore list from the full commodity list.
///
/// Each refinable raw commodity is paired with its refined parent. Raw items
/// pointing at an already emitted parent are skipped, so source order decides
/// which raw id wins. The result is sorted by refined sell price, highest
/// first, keeping source order on ties.
pub fn parse_ores(raw: Vec<Value>) -> Vec<Ore> {
    let items: Vec<CommodityDto> = decode_items(raw, "commodity");
    let by_id: HashMap<CommodityId, &CommodityDto> = items
        .iter()
        .filter_map(|item| item.id.map(|id| (id, item)))
        .collect();

    let mut seen = HashSet::new();
    let mut ores = Vec::new();

    for raw_ore in items.iter().filter(|item| item.is_refinable == Some(1)) {
        let Some(raw_id) = raw_ore.id else {
            continue;
        };
        let Some(refined_id) = raw_ore.id_parent.filter(|id| *id != 0) else {
            continue;
        };
        if seen.contains(&refined_id) {
            continue;
        }
        let Some(refined) = by_id.get(&refined_id) else {
            continue;
        };

        seen.insert(refined_id);
        ores.push(Ore {
            id: refined_id,
            raw_id,
            name: refined.name.clone().unwrap_or_default(),
            code: refined.code.clone().unwrap_or_default(),
            kind: refined.kind.clone().unwrap_or_default(),
            refined_price_sell: refined
                .price_sell
                .filter(|price| price.is_finite() && *price >= 0.0)
                .unwrap_or(0.0),
        });
    }

    ores.sort_by(|a, b| {
        b.refined_price_sell
            .partial_cmp(&a.refined_price_sell)
            .unwrap_or(Ordering::Equal)
    });
    ores
}

/// Maps methods 1:1 in source order.
pub fn parse_methods(raw: Vec<Value>) -> Vec<RefineryMethod> {
    decode_items::<RefineryMethodDto>(raw, "refinery method")
        .into_iter()
        .map(|dto| {
            let name = dto.name.unwrap_or_default();
            RefineryMethod {
                id: dto.id.unwrap_or_default(),
                rating_yield: clamp_rating(&name, "yield", dto.rating_yield),
                rating_cost: clamp_rating(&name, "cost", dto.rating_cost),
                rating_speed: clamp_rating(&name, "speed", dto.rating_speed),
                code: dto.code.unwrap_or_default(),
                name,
            }
        })
        .collect()
}

/// Keeps yield records that reference a commodity and carry a non-zero value.
pub fn parse_yields(raw: Vec<Value>) -> Vec<YieldBonus> {
    decode_items::<RefineryYieldDto>(raw, "refinery yield")
        .into_iter()
        .filter_map(|dto| {
            let commodity = dto.id_commodity.filter(|id| *id != 0)?;
            let value = dto
                .value
                .filter(|v| v.is_finite())
                .map(|v| v.round() as i32)
                .filter(|v| *v != 0)?;

            let station_id = dto
                .id_space_station
                .filter(|id| *id != 0)
                .or(dto.id_terminal.filter(|id| *id != 0))
                .map(|id| id.to_string())
                .unwrap_or_else(|| NO_STATION_ID.to_string());

            Some(YieldBonus {
                ore_code: commodity.to_string(),
                station_id,
                station_name: dto
                    .space_station_name
                    .or(dto.terminal_name)
                    .unwrap_or_default(),
                commodity_name: dto.commodity_name.unwrap_or_default(),
                yield_bonus: value,
            })
        })
        .collect()
}

fn decode_items<T: DeserializeOwned>(raw: Vec<Value>, what: &str) -> Vec<T> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(dto) => Some(dto),
            Err(err) => {
                warn!(index, %err, "skipping undecodable {what}");
                None
            }
        })
        .collect()
}

fn clamp_rating(method: &str, field: &str, value: Option<i64>) -> u8 {
    let min = i64::from(MIN_RATING);
    let max = i64::from(MAX_RATING);
    match value {
        Some(v) if (min..=max).contains(&v) => v as u8,
        other => {
            let clamped = other.unwrap_or(min).clamp(min, max) as u8;
            warn!(method, field, value = ?other, clamped, "refinery rating out of range");
            clamped
        }
    }
}

fn opt_i64_from_json<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct LenientInt;

    impl<'de> serde::de::Visitor<'de> for LenientInt {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer, numeric string, boolean or null")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            i64::try_from(value)
                .map(Some)
                .map_err(|_| E::custom("integer out of range"))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.is_finite() && value.fract() == 0.0 {
                Ok(Some(value as i64))
            } else {
                Err(E::custom("expected a whole number"))
            }
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(i64::from(value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<i64>().map(Some).map_err(E::custom)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientInt)
}

fn opt_f64_from_json<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct LenientFloat;

    impl<'de> serde::de::Visitor<'de> for LenientFloat {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, numeric string or null")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().map(Some).map_err(E::custom)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientFloat)
}
