use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use income_map_shared::feature::INDICATOR_PROMPT;

use crate::controls::Controls;
use crate::legend::Legend;
use crate::mapbox::{self, MapboxEngine};
use crate::remote_config;
use crate::state::{AppState, LegendDisplay, PageView};

pub(crate) const MAP_CONTAINER_ID: &str = "map";
pub(crate) const GEOCODER_CONTAINER_ID: &str = "geocoder";

pub(crate) type WebAppState = AppState<MapboxEngine, SignalPage>;

#[derive(Clone, Copy)]
pub(crate) struct IndicatorText(pub RwSignal<String>);
#[derive(Clone, Copy)]
pub(crate) struct LegendVisibility(pub RwSignal<LegendDisplay>);

/// `PageView` backed by the signals the panel renders from.
pub(crate) struct SignalPage {
    indicator: RwSignal<String>,
    legend_display: RwSignal<LegendDisplay>,
}

impl PageView for SignalPage {
    fn set_indicator(&self, text: String) {
        self.indicator.set(text);
    }

    fn set_legend_display(&self, display: LegendDisplay) {
        self.legend_display.set(display);
    }
}

thread_local! {
    static APP_STATE: RefCell<Option<Rc<WebAppState>>> = const { RefCell::new(None) };
}

pub(crate) fn app_state() -> Option<Rc<WebAppState>> {
    APP_STATE.with(|slot| slot.borrow().clone())
}

/// Runs `f` against the app state if the app has been mounted.
pub(crate) fn with_app_state(f: impl FnOnce(&WebAppState)) {
    if let Some(state) = app_state() {
        f(&state);
    }
}

/// Fetches the map settings, then builds the map into the mounted page.
pub(crate) fn start_map() {
    spawn_local(async move {
        let config = remote_config::load_map_config().await;
        let Some(state) = app_state() else {
            crate::console::warn("App state missing; map not started");
            return;
        };
        let geocoder_container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(GEOCODER_CONTAINER_ID));
        if geocoder_container.is_none() {
            crate::console::warn("#geocoder container missing; geocoder skipped");
        }
        if let Err(e) = mapbox::mount_map(MAP_CONTAINER_ID, geocoder_container, &config, state) {
            crate::console::warn(&format!("Map setup failed: {e}"));
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let indicator = RwSignal::new(INDICATOR_PROMPT.to_owned());
    let legend_display = RwSignal::new(LegendDisplay::Block);
    provide_context(IndicatorText(indicator));
    provide_context(LegendVisibility(legend_display));

    let state = Rc::new(AppState::new(SignalPage {
        indicator,
        legend_display,
    }));
    APP_STATE.with(|slot| {
        // A remount replaces the state; the old map binding is detached when
        // the new map is mounted.
        *slot.borrow_mut() = Some(state);
    });

    view! {
        <div id=MAP_CONTAINER_ID style="position: absolute; top: 0; bottom: 0; width: 100%;"></div>
        <aside style="position: absolute; top: 12px; left: 12px; z-index: 2; width: 300px; padding: 14px 16px; background: rgba(19,22,31,0.92); border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif; font-size: 0.85rem;">
            <h1 style="margin: 0 0 10px; font-size: 1.05rem; font-weight: 700;">
                "Toronto Median Household Income (2015)"
            </h1>
            <div id=GEOCODER_CONTAINER_ID style="margin-bottom: 10px;"></div>
            <Indicator />
            <Controls />
            <Legend />
        </aside>
    }
}

#[component]
fn Indicator() -> impl IntoView {
    let IndicatorText(indicator) = expect_context();

    view! {
        <div
            id="indicator"
            style="margin: 10px 0; padding: 8px 10px; background: #1a1d2a; border-radius: 4px; line-height: 1.35;"
            inner_html=move || indicator.get()
        ></div>
    }
}
