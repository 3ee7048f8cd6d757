use dioxus::{prelude::*, signals::Signal};
use tracing::{error, info};

use crate::{
    domain::{AppState, RefiningData},
    infra::{config::SourceConfig, data_source::RefiningDataSource},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{MethodsPage, OptimizerPage, StationsPage},
        shell::Shell,
    },
    util::{
        assets,
        format::{age_since, humanize_age},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Optimizer {},
    #[route("/methods")]
    Methods {},
    #[route("/stations")]
    Stations {},
}

/// Shared handle to the data source; `None` when the HTTP client could not
/// be built.
pub type SourceHandle = Option<RefiningDataSource>;

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let source: SourceHandle = use_hook(|| {
        match RefiningDataSource::new(&SourceConfig::from_env()) {
            Ok(source) => Some(source),
            Err(err) => {
                error!(%err, "failed to initialise UEX client");
                None
            }
        }
    });
    use_context_provider(|| source.clone());

    let _initial_load = use_future(move || {
        let source = source.clone();
        async move { load_data(state, toasts, source, false).await }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Loads a snapshot into `state`. A refresh clears the cache first and
/// forces a network fetch.
pub async fn load_data(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    source: SourceHandle,
    refresh: bool,
) {
    let Some(source) = source else {
        state.with_mut(|st| st.finish_load(Err("Failed to initialise UEX client.".to_string())));
        return;
    };

    state.with_mut(|st| st.begin_load());
    if refresh {
        info!("manual refresh requested");
        source.clear_cache().await;
    }

    let result = source.get_data(refresh).await;
    match &result {
        Ok(data) => announce_snapshot(toasts, data, refresh),
        Err(err) => {
            error!(%err, "refining data unavailable");
            push_toast(toasts, ToastKind::Error, format!("Failed to load refining data: {err}"));
        }
    }
    state.with_mut(|st| st.finish_load(result.map_err(|err| err.to_string())));
}

fn announce_snapshot(toasts: Signal<Vec<ToastMessage>>, data: &RefiningData, refresh: bool) {
    if !data.provenance.all_live() {
        push_toast(
            toasts,
            ToastKind::Warning,
            format!(
                "UEX did not deliver {}; showing bundled data where available.",
                data.provenance.degraded().join(", ")
            ),
        );
    } else if data.from_cache {
        push_toast(
            toasts,
            ToastKind::Info,
            format!(
                "Loaded cached refining data from {} ago.",
                humanize_age(age_since(data.fetched_at))
            ),
        );
    } else if refresh {
        push_toast(toasts, ToastKind::Success, "Refining data refreshed from UEX.");
    }
}

#[component]
pub fn Optimizer() -> Element {
    rsx! { Shell { OptimizerPage {} } }
}

#[component]
pub fn Methods() -> Element {
    rsx! { Shell { MethodsPage {} } }
}

#[component]
pub fn Stations() -> Element {
    rsx! { Shell { StationsPage {} } }
}
