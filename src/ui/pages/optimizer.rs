use dioxus::prelude::*;

use crate::{
    domain::{
        filter_ores, rank_methods, rating_label, ranking_title, toggle_selection, AppState,
        CommodityId, MethodSort, Ore, RefineryMethod,
    },
    ui::{
        components::search_box::SearchBox,
        theme::{cost_tone, rating_tone},
    },
    util::format::format_auec,
};

#[component]
pub fn OptimizerPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let search = use_signal(String::new);
    let mut selected = use_signal(|| None::<CommodityId>);
    let mut sort_by = use_signal(MethodSort::default);

    let Some(data) = state.with(|st| st.data.clone()) else {
        return rsx! {};
    };

    let query = search();
    let ores: Vec<Ore> = filter_ores(&data.ores, &query).into_iter().cloned().collect();
    let selected_id = selected();
    let title = ranking_title(selected_id.and_then(|id| data.find_ore(id)));
    let current_sort = sort_by();
    let ranked: Vec<RefineryMethod> = rank_methods(&data.methods, current_sort)
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        div { class: "optimizer",
            section { class: "panel",
                h2 { class: "panel__title", "Select Ore" }
                SearchBox { value: search, placeholder: "Search ores..." }
                div { class: "ore-grid",
                    for ore in ores {
                        OreChip {
                            key: "{ore.raw_id}",
                            active: selected_id == Some(ore.raw_id),
                            ore,
                            onselect: move |raw_id: CommodityId| selected.set(toggle_selection(selected(), raw_id)),
                        }
                    }
                }
            }

            section { class: "panel",
                div { class: "panel__header",
                    h2 { class: "panel__title", "{title}" }
                    div { class: "sort-buttons",
                        for sort in MethodSort::ALL {
                            button {
                                key: "{sort.label()}",
                                class: "{chip_class(sort == current_sort)}",
                                onclick: move |_| sort_by.set(sort),
                                "{sort.icon()} {sort.label()}"
                            }
                        }
                    }
                }
                div { class: "method-list",
                    for (idx, method) in ranked.into_iter().enumerate() {
                        RankedMethod { key: "{method.id}", rank: idx + 1, method }
                    }
                }
            }
        }
    }
}

fn chip_class(active: bool) -> &'static str {
    if active {
        "chip chip--active"
    } else {
        "chip"
    }
}

#[component]
fn OreChip(ore: Ore, active: bool, onselect: EventHandler<CommodityId>) -> Element {
    let class = if active { "ore-chip ore-chip--active" } else { "ore-chip" };
    let raw_id = ore.raw_id;
    let price = format_auec(ore.refined_price_sell);

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onselect.call(raw_id),
            span { class: "ore-chip__name", "{ore.name}" }
            span { class: "ore-chip__meta", "{ore.code} · {ore.kind}" }
            span { class: "ore-chip__price", "{price}" }
        }
    }
}

#[component]
fn RankedMethod(rank: usize, method: RefineryMethod) -> Element {
    let top = rank == 1;
    let row_class = if top { "method-row method-row--top" } else { "method-row" };
    let rank_class = if top { "rank rank--top" } else { "rank" };

    rsx! {
        div { class: "{row_class}",
            span { class: "{rank_class}", "{rank}" }
            div { class: "method-row__name",
                span { class: "strong", "{method.name}" }
                span { class: "muted", "{method.code}" }
            }
            div { class: "method-row__ratings",
                span { class: "{rating_tone(method.rating_yield)}",
                    "Yield: {rating_label(method.rating_yield)}"
                }
                span { class: "{cost_tone(method.rating_cost)}",
                    "Cost: {rating_label(method.rating_cost)}"
                }
                span { class: "{rating_tone(method.rating_speed)}",
                    "Speed: {rating_label(method.rating_speed)}"
                }
            }
        }
    }
}
