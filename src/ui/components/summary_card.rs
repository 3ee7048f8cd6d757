use dioxus::prelude::*;

#[component]
pub fn SummaryCard(title: &'static str, names: Vec<String>, tone: &'static str) -> Element {
    let body = if names.is_empty() {
        "—".to_string()
    } else {
        names.join(", ")
    };

    rsx! {
        div { class: "panel summary-card",
            h3 { class: "summary-card__title {tone}", "{title}" }
            p { class: "summary-card__body", "{body}" }
        }
    }
}
