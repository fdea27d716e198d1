use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::with_app_state;

fn checkbox_checked(event: &leptos::ev::Event) -> Option<bool> {
    let input = event
        .target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    Some(input.checked())
}

/// Reset-view button plus the legend and layer checkboxes.
#[component]
pub fn Controls() -> impl IntoView {
    let on_reset = move |_| with_app_state(|state| state.reset_view());

    let on_legend_click = move |e: leptos::ev::MouseEvent| {
        if let Some(checked) = checkbox_checked(&e) {
            with_app_state(|state| state.set_legend_visible(checked));
        }
    };

    let on_layer_change = move |e: leptos::ev::Event| {
        if let Some(checked) = checkbox_checked(&e) {
            with_app_state(|state| state.set_layer_visible(checked));
        }
    };

    view! {
        <div style="display: flex; flex-direction: column; gap: 6px;">
            <button
                id="returnbutton"
                style="padding: 6px 10px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 4px; color: #e2e0d8; cursor: pointer;"
                on:click=on_reset
            >
                "Return to Toronto"
            </button>
            <label style="display: flex; align-items: center; gap: 6px; cursor: pointer;">
                <input id="legendcheck" type="checkbox" checked=true on:click=on_legend_click />
                "Show legend"
            </label>
            <label style="display: flex; align-items: center; gap: 6px; cursor: pointer;">
                <input id="layercheck" type="checkbox" checked=true on:change=on_layer_change />
                "Show income layer"
            </label>
        </div>
    }
}
