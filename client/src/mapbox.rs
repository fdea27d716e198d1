use std::cell::RefCell;
use std::rc::Rc;

use income_map_shared::{CameraOptions, Feature, LngLat, MapConfig, MapOptions, ScreenPoint};
use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::app::WebAppState;
use crate::console;
use crate::engine::{FillLayer, MapEngine, VectorSource};
use crate::state::MapEvent;

#[wasm_bindgen(js_namespace = mapboxgl)]
extern "C" {
    #[wasm_bindgen(js_name = Map)]
    #[derive(Debug, Clone)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, js_class = "Map", catch)]
    fn new(options: &JsValue) -> Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &MapboxMap, control: &JsValue);

    #[wasm_bindgen(method, js_name = setFog)]
    fn set_fog(this: &MapboxMap, fog: &JsValue);

    #[wasm_bindgen(method, js_name = addSource, catch)]
    fn add_source(this: &MapboxMap, id: &str, source: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getSource)]
    fn get_source(this: &MapboxMap, id: &str) -> JsValue;

    #[wasm_bindgen(method, js_name = addLayer, catch)]
    fn add_layer(this: &MapboxMap, layer: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getLayer)]
    fn get_layer(this: &MapboxMap, id: &str) -> JsValue;

    #[wasm_bindgen(method, js_name = setPaintProperty, catch)]
    fn set_paint_property(
        this: &MapboxMap,
        layer: &str,
        name: &str,
        value: &JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = setLayoutProperty, catch)]
    fn set_layout_property(
        this: &MapboxMap,
        layer: &str,
        name: &str,
        value: &JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = queryRenderedFeatures)]
    fn query_rendered_features(this: &MapboxMap, point: &JsValue, options: &JsValue) -> Array;

    #[wasm_bindgen(method, js_name = getCanvas)]
    fn get_canvas(this: &MapboxMap) -> web_sys::HtmlCanvasElement;

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &MapboxMap, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = on)]
    fn on_layer(this: &MapboxMap, event: &str, layer: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = off)]
    fn off(this: &MapboxMap, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = off)]
    fn off_layer(this: &MapboxMap, event: &str, layer: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &MapboxMap, options: &JsValue);

    #[wasm_bindgen(js_name = NavigationControl)]
    type NavigationControl;

    #[wasm_bindgen(constructor, js_class = "NavigationControl")]
    fn new() -> NavigationControl;

    #[wasm_bindgen(js_name = FullscreenControl)]
    type FullscreenControl;

    #[wasm_bindgen(constructor, js_class = "FullscreenControl")]
    fn new() -> FullscreenControl;

    #[wasm_bindgen(js_name = Popup)]
    type Popup;

    #[wasm_bindgen(constructor, js_class = "Popup")]
    fn new() -> Popup;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &Popup, at: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = setHTML)]
    fn set_html(this: &Popup, html: &str) -> Popup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Popup, map: &MapboxMap) -> Popup;
}

#[wasm_bindgen]
extern "C" {
    type MapboxGeocoder;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<MapboxGeocoder, JsValue>;

    #[wasm_bindgen(method, js_name = onAdd)]
    fn on_add(this: &MapboxGeocoder, map: &MapboxMap) -> web_sys::Node;
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    // Plain objects, not ES `Map`s: the engine only reads object keys.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("serialize error: {e}"))
}

fn js_error_message(err: JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn is_present(value: &JsValue) -> bool {
    !(value.is_undefined() || value.is_null())
}

fn feature_from_js(value: &JsValue) -> Feature {
    let properties = Reflect::get(value, &JsValue::from_str("properties"))
        .ok()
        .filter(is_present)
        .and_then(|props| serde_wasm_bindgen::from_value::<Map<String, Value>>(props).ok())
        .unwrap_or_default();
    Feature { properties }
}

fn features_from_js(value: &JsValue) -> Vec<Feature> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value).iter().map(|f| feature_from_js(&f)).collect()
}

fn field<T: serde::de::DeserializeOwned>(event: &JsValue, key: &str) -> Option<T> {
    let value = Reflect::get(event, &JsValue::from_str(key)).ok()?;
    serde_wasm_bindgen::from_value(value).ok()
}

/// `MapEngine` over a live `mapboxgl.Map`.
#[derive(Debug, Clone)]
pub struct MapboxEngine {
    map: MapboxMap,
}

impl MapEngine for MapboxEngine {
    fn has_source(&self, id: &str) -> bool {
        is_present(&self.map.get_source(id))
    }

    fn add_source(&self, id: &str, source: &VectorSource) -> Result<(), String> {
        self.map
            .add_source(id, &to_js(source)?)
            .map_err(js_error_message)
    }

    fn has_layer(&self, id: &str) -> bool {
        is_present(&self.map.get_layer(id))
    }

    fn add_layer(&self, layer: &FillLayer) -> Result<(), String> {
        self.map.add_layer(&to_js(layer)?).map_err(js_error_message)
    }

    fn set_paint_property(
        &self,
        layer_id: &str,
        name: &str,
        value: &Value,
    ) -> Result<(), String> {
        self.map
            .set_paint_property(layer_id, name, &to_js(value)?)
            .map_err(js_error_message)
    }

    fn set_layout_property(
        &self,
        layer_id: &str,
        name: &str,
        value: &str,
    ) -> Result<(), String> {
        self.map
            .set_layout_property(layer_id, name, &JsValue::from_str(value))
            .map_err(js_error_message)
    }

    fn query_rendered_features(&self, point: ScreenPoint, layers: &[&str]) -> Vec<Feature> {
        let js_point = Array::of2(&JsValue::from_f64(point.x), &JsValue::from_f64(point.y));
        let options = match to_js(&serde_json::json!({ "layers": layers })) {
            Ok(options) => options,
            Err(e) => {
                console::warn(&e);
                return Vec::new();
            }
        };
        features_from_js(&self.map.query_rendered_features(&js_point, &options))
    }

    fn set_canvas_cursor(&self, cursor: &str) {
        self.map
            .get_canvas()
            .style()
            .set_property("cursor", cursor)
            .ok();
    }

    fn set_default_fog(&self) {
        self.map.set_fog(&Object::new());
    }

    fn fly_to(&self, camera: &CameraOptions) {
        match to_js(camera) {
            Ok(options) => self.map.fly_to(&options),
            Err(e) => console::warn(&e),
        }
    }

    fn open_popup(&self, at: LngLat, html: &str) -> Result<(), String> {
        Popup::new()
            .set_lng_lat(&to_js(&[at.lng, at.lat])?)
            .set_html(html)
            .add_to(&self.map);
        Ok(())
    }
}

struct Listener {
    event: &'static str,
    layer: Option<String>,
    callback: Closure<dyn FnMut(JsValue)>,
}

struct MapBinding {
    map: MapboxMap,
    listeners: Vec<Listener>,
}

impl MapBinding {
    fn detach(self) {
        for listener in &self.listeners {
            let callback = listener.callback.as_ref().unchecked_ref();
            match &listener.layer {
                Some(layer) => self.map.off_layer(listener.event, layer, callback),
                None => self.map.off(listener.event, callback),
            }
        }
    }
}

thread_local! {
    static MAP_BINDING: RefCell<Option<MapBinding>> = const { RefCell::new(None) };
}

fn listen(
    map: &MapboxMap,
    state: &Rc<WebAppState>,
    event: &'static str,
    layer: Option<&str>,
    translate: fn(&JsValue) -> Option<MapEvent>,
) -> Listener {
    let state = Rc::clone(state);
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |e: JsValue| {
        if let Some(event) = translate(&e) {
            state.handle_event(event);
        }
    });
    let function = callback.as_ref().unchecked_ref();
    match layer {
        Some(layer) => map.on_layer(event, layer, function),
        None => map.on(event, function),
    }
    Listener {
        event,
        layer: layer.map(str::to_owned),
        callback,
    }
}

fn mount_geocoder(map: &MapboxMap, container: &web_sys::Element, config: &MapConfig) {
    let namespace = match Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl")) {
        Ok(ns) if is_present(&ns) => ns,
        _ => {
            console::warn("mapboxgl namespace missing; geocoder skipped");
            return;
        }
    };
    let options = Object::new();
    let entries: [(&str, JsValue); 3] = [
        ("accessToken", JsValue::from_str(&config.access_token)),
        ("mapboxgl", namespace),
        ("countries", JsValue::from_str(&config.geocoder_country)),
    ];
    for (key, value) in entries {
        Reflect::set(&options, &JsValue::from_str(key), &value).ok();
    }
    match MapboxGeocoder::new(&options) {
        Ok(geocoder) => {
            if let Err(e) = container.append_child(&geocoder.on_add(map)) {
                console::warn(&format!("Geocoder mount failed: {}", js_error_message(e)));
            }
        }
        Err(e) => console::warn(&format!("Geocoder unavailable: {}", js_error_message(e))),
    }
}

/// Builds the map in `container`, hands it to `state`, and routes engine
/// events into `AppState::handle_event`.
pub fn mount_map(
    container: &str,
    geocoder_container: Option<web_sys::Element>,
    config: &MapConfig,
    state: Rc<WebAppState>,
) -> Result<(), String> {
    let options = to_js(&MapOptions::new(container, config))?;
    let map = MapboxMap::new(&options).map_err(js_error_message)?;

    map.add_control(&NavigationControl::new());
    map.add_control(&FullscreenControl::new());
    if let Some(geocoder_container) = geocoder_container.as_ref() {
        mount_geocoder(&map, geocoder_container, config);
    }

    if !state.attach_engine(MapboxEngine { map: map.clone() }, config) {
        return Err("map already mounted".into());
    }

    let layer_id = config.layer_id.as_str();
    let listeners = vec![
        listen(&map, &state, "style.load", None, |_| {
            Some(MapEvent::StyleLoaded)
        }),
        listen(&map, &state, "load", None, |_| Some(MapEvent::Loaded)),
        listen(&map, &state, "mousemove", None, |e| {
            field(e, "point").map(|point| MapEvent::PointerMove { point })
        }),
        listen(&map, &state, "click", Some(layer_id), |e| {
            let at = field(e, "lngLat")?;
            let features = Reflect::get(e, &JsValue::from_str("features"))
                .map(|f| features_from_js(&f))
                .unwrap_or_default();
            Some(MapEvent::LayerClick { at, features })
        }),
        listen(&map, &state, "mouseenter", Some(layer_id), |_| {
            Some(MapEvent::LayerEnter)
        }),
        listen(&map, &state, "mouseleave", Some(layer_id), |_| {
            Some(MapEvent::LayerLeave)
        }),
    ];

    MAP_BINDING.with(|slot| {
        let previous = slot.borrow_mut().replace(MapBinding { map, listeners });
        if let Some(previous) = previous {
            previous.detach();
        }
    });
    Ok(())
}
