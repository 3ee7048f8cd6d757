use dioxus::prelude::*;

use crate::app::{load_data, Route, SourceHandle};
use crate::domain::AppState;
use crate::ui::components::toast::ToastMessage;
use crate::util::{
    format::format_timestamp,
    version::{version_label, APP_NAME},
};

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let source = use_context::<SourceHandle>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let refresh = use_callback(move |_: ()| {
        spawn(load_data(state, toasts, source.clone(), true));
    });

    let (loading, error, data) = state.with(|st| (st.loading, st.error.clone(), st.data.clone()));

    rsx! {
        div { class: "app",
            header { class: "header",
                div { class: "header__inner",
                    div { class: "brand",
                        span { class: "brand__icon", "🔥" }
                        div {
                            h1 { class: "brand__title", "{APP_NAME}" }
                            p { class: "brand__tagline", "rocks in, profit out" }
                        }
                    }
                    button {
                        class: "btn btn--ghost",
                        title: "Refresh data from UEX",
                        disabled: loading,
                        onclick: move |_| refresh.call(()),
                        if loading { "Refreshing…" } else { "↻ Refresh" }
                    }
                }
            }
            nav { class: "tabs",
                TabButton {
                    active: matches!(current_route, Route::Optimizer {}),
                    onclick: move |_| { nav.push(Route::Optimizer {}); },
                    label: "📈 Optimizer",
                }
                TabButton {
                    active: matches!(current_route, Route::Methods {}),
                    onclick: move |_| { nav.push(Route::Methods {}); },
                    label: "⇅ Methods",
                }
                TabButton {
                    active: matches!(current_route, Route::Stations {}),
                    onclick: move |_| { nav.push(Route::Stations {}); },
                    label: "🏢 Stations",
                }
            }
            main { class: "content",
                if loading {
                    div { class: "notice notice--loading",
                        span { class: "spinner" }
                        "Loading refining data…"
                    }
                } else if let Some(message) = error {
                    div { class: "notice notice--error",
                        p { "Something went wrong: {message}" }
                        button {
                            class: "btn",
                            onclick: move |_| refresh.call(()),
                            "Retry"
                        }
                    }
                } else if data.is_some() {
                    {children}
                }

                if let Some(data) = data.as_ref() {
                    p { class: "data-status",
                        if data.from_cache { "Data from cache" } else { "Data fetched live" }
                        " · Last updated {format_timestamp(data.fetched_at)}"
                    }
                }
            }
            footer { class: "footer",
                span { "{APP_NAME} {version_label()}" }
                span { class: "muted", "Economy data provided by UEX Corp" }
            }
        }
    }
}

#[component]
fn TabButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active { "tab tab--active" } else { "tab" };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
