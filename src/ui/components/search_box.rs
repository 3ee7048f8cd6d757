use dioxus::prelude::*;

#[component]
pub fn SearchBox(value: Signal<String>, placeholder: &'static str) -> Element {
    let mut value = value;
    rsx! {
        div { class: "search",
            span { class: "search__icon", "🔍" }
            input {
                class: "search__input",
                r#type: "text",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}
