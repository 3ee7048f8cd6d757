use dioxus::prelude::*;

use crate::domain::entities::MAX_RATING;

/// Row of dots, `value` of them lit.
#[component]
pub fn RatingDots(value: u8, tone: &'static str) -> Element {
    let dots: Vec<String> = (0..MAX_RATING)
        .map(|i| {
            if i < value {
                format!("dot dot--on {tone}")
            } else {
                "dot".to_string()
            }
        })
        .collect();

    rsx! {
        span { class: "dots",
            for (i, class) in dots.into_iter().enumerate() {
                span { key: "{i}", class: "{class}" }
            }
        }
    }
}
