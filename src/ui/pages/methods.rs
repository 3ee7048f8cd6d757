use dioxus::prelude::*;

use crate::{
    domain::{method_highlights, rating_label, AppState, BestFor, RefineryMethod},
    ui::{
        components::{rating_dots::RatingDots, summary_card::SummaryCard},
        theme::{best_for_badge, cost_tone, rating_tone},
    },
};

#[component]
pub fn MethodsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let Some(data) = state.with(|st| st.data.clone()) else {
        return rsx! {};
    };

    let highlights = method_highlights(&data.methods);
    let methods = data.methods.clone();
    let count = methods.len();

    rsx! {
        div { class: "methods",
            header { class: "page-header",
                h2 { class: "page-header__title", "Method Comparison" }
                p { class: "muted",
                    "All {count} refining methods compared. Higher yield = more refined output. "
                    "Higher speed = faster processing. Lower cost = cheaper."
                }
            }

            div { class: "panel table-wrap",
                table { class: "table",
                    thead {
                        tr {
                            th { "Method" }
                            th { "Yield" }
                            th { "Cost" }
                            th { "Speed" }
                            th { "Best For" }
                        }
                    }
                    tbody {
                        for method in methods {
                            MethodRow { key: "{method.id}", method }
                        }
                    }
                }
            }

            div { class: "summary-grid",
                SummaryCard { title: "Highest Yield", names: highlights.highest_yield, tone: "tone-good" }
                SummaryCard { title: "Cheapest", names: highlights.cheapest, tone: "tone-amber" }
                SummaryCard { title: "Fastest", names: highlights.fastest, tone: "tone-blue" }
            }
        }
    }
}

#[component]
fn MethodRow(method: RefineryMethod) -> Element {
    let best_for = BestFor::classify(&method);

    rsx! {
        tr {
            td {
                span { class: "strong", "{method.name}" }
                span { class: "muted code", "{method.code}" }
            }
            td {
                RatingDots { value: method.rating_yield, tone: rating_tone(method.rating_yield) }
                span { class: "rating-label", "{rating_label(method.rating_yield)}" }
            }
            td {
                RatingDots { value: method.rating_cost, tone: cost_tone(method.rating_cost) }
                span { class: "rating-label", "{rating_label(method.rating_cost)}" }
            }
            td {
                RatingDots { value: method.rating_speed, tone: rating_tone(method.rating_speed) }
                span { class: "rating-label", "{rating_label(method.rating_speed)}" }
            }
            td {
                span { class: "{best_for_badge(best_for)}", "{best_for.label()}" }
            }
        }
    }
}
