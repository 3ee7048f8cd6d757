use dioxus::prelude::*;

use crate::{
    domain::{format_bonus, AppState, Ore, StationMatrix},
    ui::{components::search_box::SearchBox, theme::bonus_class},
};

#[component]
pub fn StationsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let search = use_signal(String::new);

    let Some(data) = state.with(|st| st.data.clone()) else {
        return rsx! {};
    };

    let matrix = StationMatrix::build(&data);
    if !matrix.has_data() {
        return rsx! {
            div { class: "notice notice--empty",
                span { class: "notice__icon", "🏢" }
                p {
                    "Station yield bonus data is not currently available from the API. "
                    "Check back later or refresh to try again."
                }
            }
        };
    }

    let query = search();
    let rows: Vec<BonusRow> = matrix
        .filtered_ores(&query)
        .into_iter()
        .map(|ore| BonusRow::new(&matrix, ore))
        .collect();
    let stations = matrix.stations.clone();

    rsx! {
        div { class: "stations",
            header { class: "page-header",
                h2 { class: "page-header__title", "Station Yield Bonuses" }
                p { class: "muted",
                    "Yield modifiers per refinery station. Positive values mean more refined output."
                }
            }

            SearchBox { value: search, placeholder: "Filter ores..." }

            div { class: "panel table-wrap",
                table { class: "table table--matrix",
                    thead {
                        tr {
                            th { class: "sticky", "Ore" }
                            for station in stations {
                                th { key: "{station.id}", class: "station-head", "{station.name}" }
                            }
                        }
                    }
                    tbody {
                        for row in rows {
                            tr { key: "{row.ore_id}",
                                td { class: "sticky",
                                    span { class: "strong", "{row.ore_name}" }
                                    span { class: "muted code", "{row.ore_code}" }
                                }
                                for cell in row.cells {
                                    td { key: "{cell.station_id}", class: "{cell.class}", "{cell.label}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

struct BonusCell {
    station_id: String,
    label: String,
    class: &'static str,
}

struct BonusRow {
    ore_id: i64,
    ore_name: String,
    ore_code: String,
    cells: Vec<BonusCell>,
}

impl BonusRow {
    fn new(matrix: &StationMatrix, ore: &Ore) -> Self {
        let cells = matrix
            .stations
            .iter()
            .map(|station| {
                let value = matrix.bonus(ore, &station.id);
                BonusCell {
                    station_id: station.id.clone(),
                    label: format_bonus(value),
                    class: bonus_class(value),
                }
            })
            .collect();

        Self {
            ore_id: ore.raw_id,
            ore_name: ore.name.clone(),
            ore_code: ore.code.clone(),
            cells,
        }
    }
}
