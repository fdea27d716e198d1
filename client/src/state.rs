use std::cell::{Cell, OnceCell};

use income_map_shared::{CameraOptions, Feature, LngLat, MapConfig, ScreenPoint};

use crate::choropleth::{ApplyOutcome, ChoroplethConfigurator};
use crate::console;
use crate::engine::MapEngine;
use crate::interaction::{self, CursorState};

/// CSS `display` of the legend container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendDisplay {
    Block,
    None,
}

impl LegendDisplay {
    pub fn from_checked(checked: bool) -> Self {
        if checked { Self::Block } else { Self::None }
    }

    pub fn css(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::None => "none",
        }
    }
}

/// Value of the income layer's `visibility` layout property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerVisibility {
    Visible,
    None,
}

impl LayerVisibility {
    pub fn from_checked(checked: bool) -> Self {
        if checked { Self::Visible } else { Self::None }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::None => "none",
        }
    }
}

/// Page-side outputs driven by the handlers.
pub trait PageView {
    fn set_indicator(&self, text: String);
    fn set_legend_display(&self, display: LegendDisplay);
}

/// Engine events the page subscribes to.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    StyleLoaded,
    Loaded,
    PointerMove { point: ScreenPoint },
    LayerClick { at: LngLat, features: Vec<Feature> },
    LayerEnter,
    LayerLeave,
}

struct MapHandle<E> {
    engine: E,
    choropleth: ChoroplethConfigurator,
}

/// Everything the handlers share: the engine (once built), the page outputs,
/// the hover cursor and the layer checkbox.
pub struct AppState<E, P> {
    map: OnceCell<MapHandle<E>>,
    page: P,
    cursor: Cell<CursorState>,
    layer_visible: Cell<bool>,
}

impl<E: MapEngine, P: PageView> AppState<E, P> {
    /// The layer checkbox starts checked.
    pub fn new(page: P) -> Self {
        Self {
            map: OnceCell::new(),
            page,
            cursor: Cell::new(CursorState::Default),
            layer_visible: Cell::new(true),
        }
    }

    /// Hands over the constructed engine. Returns false if one is already attached.
    pub fn attach_engine(&self, engine: E, config: &MapConfig) -> bool {
        self.map
            .set(MapHandle {
                engine,
                choropleth: ChoroplethConfigurator::new(config),
            })
            .is_ok()
    }

    pub fn engine(&self) -> Option<&E> {
        self.map.get().map(|handle| &handle.engine)
    }

    pub fn handle_event(&self, event: MapEvent) {
        let Some(handle) = self.map.get() else {
            return;
        };
        let engine = &handle.engine;
        let layer_id = handle.choropleth.layer_id();
        match event {
            MapEvent::StyleLoaded => engine.set_default_fog(),
            MapEvent::Loaded => self.configure_layer(handle),
            MapEvent::PointerMove { point } => {
                let text = interaction::pointer_moved(engine, layer_id, point);
                self.page.set_indicator(text);
            }
            MapEvent::LayerClick { at, features } => {
                if let Err(e) = interaction::layer_clicked(engine, at, &features) {
                    console::warn(&format!("Popup failed: {e}"));
                }
            }
            MapEvent::LayerEnter => {
                self.cursor
                    .set(interaction::hover_changed(engine, CursorState::Pointer));
            }
            MapEvent::LayerLeave => {
                self.cursor
                    .set(interaction::hover_changed(engine, CursorState::Default));
            }
        }
    }

    fn configure_layer(&self, handle: &MapHandle<E>) {
        match handle.choropleth.apply(&handle.engine) {
            Ok(ApplyOutcome::Added) => {
                console::info(&format!("{} layer added", handle.choropleth.layer_id()));
                // The checkbox may have been cleared before the tiles arrived.
                if !self.layer_visible.get() {
                    self.push_layer_visibility(handle);
                }
            }
            Ok(ApplyOutcome::AlreadyPresent) => {}
            Err(e) => console::warn(&format!("Choropleth setup failed: {e}")),
        }
    }

    /// Flies back to the Toronto preset regardless of the current camera.
    pub fn reset_view(&self) {
        if let Some(engine) = self.engine() {
            engine.fly_to(&CameraOptions::home());
        }
    }

    pub fn set_legend_visible(&self, checked: bool) {
        self.page
            .set_legend_display(LegendDisplay::from_checked(checked));
    }

    pub fn set_layer_visible(&self, checked: bool) {
        self.layer_visible.set(checked);
        if let Some(handle) = self.map.get() {
            self.push_layer_visibility(handle);
        }
    }

    fn push_layer_visibility(&self, handle: &MapHandle<E>) {
        let layer_id = handle.choropleth.layer_id();
        if !handle.engine.has_layer(layer_id) {
            return;
        }
        let visibility = LayerVisibility::from_checked(self.layer_visible.get());
        if let Err(e) = handle
            .engine
            .set_layout_property(layer_id, "visibility", visibility.as_str())
        {
            console::warn(&format!("Layer visibility update failed: {e}"));
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;

    use super::{LegendDisplay, PageView};

    #[derive(Default)]
    pub(crate) struct RecordingPage {
        pub indicator: RefCell<Option<String>>,
        pub legend_display: RefCell<Option<LegendDisplay>>,
    }

    impl PageView for RecordingPage {
        fn set_indicator(&self, text: String) {
            *self.indicator.borrow_mut() = Some(text);
        }

        fn set_legend_display(&self, display: LegendDisplay) {
            *self.legend_display.borrow_mut() = Some(display);
        }
    }
}
