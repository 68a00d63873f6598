//! App Root Component
//!
//! Single fixed page: a header and the heatmap panel. No routing.

use leptos::*;

use crate::api::{get_api_base, ApiClient};
use crate::components::HeatmapChart;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Every component under the root shares one client
    provide_context(ApiClient::new(get_api_base()));

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <header class="bg-gray-800 border-b border-gray-700">
                <div class="container mx-auto px-4 py-6">
                    <h1 class="text-3xl font-bold">"Valveboard"</h1>
                    <p class="text-gray-400 mt-1">"Heat-meter telemetry at a glance"</p>
                </div>
            </header>

            <main class="flex-1 container mx-auto px-4 py-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Hourly Temperature Heatmap"</h2>
                    <HeatmapChart />
                </section>
            </main>
        </div>
    }
}
