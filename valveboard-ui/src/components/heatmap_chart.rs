//! Heatmap Chart Component
//!
//! Fetches the hourly heatmap once on mount, transforms the payload into a
//! render spec, and hands it to Plotly. Network and payload failures both
//! surface as the same fixed message; the cause goes to the console.

use std::cell::Cell;
use std::rc::Rc;

use leptos::*;

use crate::api::ApiClient;
use crate::components::Loading;
use crate::heatmap::RenderSpec;
use crate::plot;

/// Message shown for any fetch or decode failure
const FETCH_FAILED_MESSAGE: &str = "Failed to load heatmap data";

/// Lifecycle of the chart data
#[derive(Clone)]
enum ChartState {
    Loading,
    Ready(RenderSpec),
    Failed(&'static str),
}

/// Hourly temperature heatmap
#[component]
pub fn HeatmapChart() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not found");
    let state = create_rw_signal(ChartState::Loading);

    // Dropped views must not write to disposed signals
    let alive = Rc::new(Cell::new(true));
    on_cleanup({
        let alive = alive.clone();
        move || alive.set(false)
    });

    // Fetch once on mount
    create_effect(move |_| {
        let client = client.clone();
        let alive = alive.clone();

        spawn_local(async move {
            let next = match client.fetch_hourly_heatmap().await {
                Ok(payload) => match RenderSpec::from_payload(&payload) {
                    Ok(spec) => ChartState::Ready(spec),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Malformed heatmap payload: {}", e).into(),
                        );
                        ChartState::Failed(FETCH_FAILED_MESSAGE)
                    }
                },
                Err(e) => {
                    web_sys::console::error_1(&format!("Heatmap fetch failed: {}", e).into());
                    ChartState::Failed(FETCH_FAILED_MESSAGE)
                }
            };

            if alive.get() {
                state.set(next);
            }
        });
    });

    view! {
        <div>
            {move || match state.get() {
                ChartState::Loading => view! { <Loading /> }.into_view(),
                ChartState::Ready(spec) => view! { <HeatmapPlot spec=spec /> }.into_view(),
                ChartState::Failed(message) => view! {
                    <p class="text-red-400 text-center py-12">"Error: " {message}</p>
                }
                .into_view(),
            }}
        </div>
    }
}

/// Plotly host element; draws when the node mounts
#[component]
fn HeatmapPlot(spec: RenderSpec) -> impl IntoView {
    let node_ref = create_node_ref::<html::Div>();

    create_effect(move |_| {
        if let Some(el) = node_ref.get() {
            if let Err(e) = plot::draw(&el, &spec) {
                web_sys::console::error_1(&e);
            }
        }
    });

    view! {
        <div node_ref=node_ref class="overflow-x-auto" />
    }
}
