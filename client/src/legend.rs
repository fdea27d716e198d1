use leptos::prelude::*;

use income_map_shared::{LegendEntry, legend_entries};

use crate::app::LegendVisibility;

/// Static legend, one row per income bucket in classification order.
#[component]
pub fn Legend() -> impl IntoView {
    let LegendVisibility(display) = expect_context();

    view! {
        <div
            id="legend"
            style="margin-top: 10px; padding-top: 8px; border-top: 1px solid #282c3e;"
            style:display=move || display.get().css()
        >
            <div style="font-weight: 700; margin-bottom: 6px;">"Median household income ($)"</div>
            {legend_entries().into_iter().map(legend_row).collect_view()}
        </div>
    }
}

fn legend_row(entry: LegendEntry) -> impl IntoView {
    view! {
        <div style="display: flex; align-items: center; gap: 8px; margin: 3px 0;">
            <span
                class="legend-key"
                style="display: inline-block; width: 12px; height: 12px; border-radius: 50%; flex-shrink: 0;"
                style:background-color=entry.color
            ></span>
            <span inner_html=entry.label></span>
        </div>
    }
}
