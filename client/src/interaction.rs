use income_map_shared::feature::INDICATOR_PROMPT;
use income_map_shared::{Feature, LngLat, ScreenPoint, indicator_text, popup_html};

use crate::engine::MapEngine;

/// Canvas cursor while hovering the income layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    #[default]
    Default,
    Pointer,
}

impl CursorState {
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Pointer => "pointer",
        }
    }
}

/// Hit-tests the income layer under the cursor and returns the indicator text.
/// The first returned feature wins when tracts overlap. Until the layer has
/// been added there is nothing to hit-test and the prompt is shown.
pub fn pointer_moved<E: MapEngine>(engine: &E, layer_id: &str, point: ScreenPoint) -> String {
    if !engine.has_layer(layer_id) {
        return INDICATOR_PROMPT.to_owned();
    }
    let features = engine.query_rendered_features(point, &[layer_id]);
    indicator_text(features.first())
}

/// Opens the CTUID popup for the first feature under a click. No-op when the
/// click carried no features.
pub fn layer_clicked<E: MapEngine>(
    engine: &E,
    at: LngLat,
    features: &[Feature],
) -> Result<(), String> {
    let Some(feature) = features.first() else {
        return Ok(());
    };
    engine.open_popup(at, &popup_html(feature))
}

pub fn hover_changed<E: MapEngine>(engine: &E, next: CursorState) -> CursorState {
    engine.set_canvas_cursor(next.css());
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choropleth::ChoroplethConfigurator;
    use crate::engine::fake::RecordingEngine;
    use income_map_shared::MapConfig;
    use serde_json::json;

    fn tract(properties: serde_json::Value) -> Feature {
        serde_json::from_value(json!({ "properties": properties })).expect("feature")
    }

    fn engine_with_layer(features: Vec<Feature>) -> RecordingEngine {
        let engine = RecordingEngine::with_features(features);
        ChoroplethConfigurator::new(&MapConfig::default())
            .apply(&engine)
            .expect("layer added");
        engine
    }

    #[test]
    fn pointer_over_tract_reports_income() {
        let engine = engine_with_layer(vec![tract(json!({ "COL2": 72000 }))]);
        let text = pointer_moved(&engine, "Income-Layer", ScreenPoint { x: 10.0, y: 20.0 });
        assert_eq!(text, "It's median household income is $72000");

        let queries = engine.queries.borrow();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].0, ScreenPoint { x: 10.0, y: 20.0 });
        assert_eq!(queries[0].1, vec!["Income-Layer".to_owned()]);
    }

    #[test]
    fn pointer_over_nothing_shows_prompt() {
        let engine = engine_with_layer(Vec::new());
        let text = pointer_moved(&engine, "Income-Layer", ScreenPoint { x: 0.0, y: 0.0 });
        assert_eq!(text, INDICATOR_PROMPT);
    }

    #[test]
    fn pointer_before_layer_exists_skips_hit_test() {
        let engine = RecordingEngine::with_features(vec![tract(json!({ "COL2": 72000 }))]);
        let text = pointer_moved(&engine, "Income-Layer", ScreenPoint { x: 1.0, y: 1.0 });
        assert_eq!(text, INDICATOR_PROMPT);
        assert!(engine.queries.borrow().is_empty());
    }

    #[test]
    fn overlapping_tracts_use_first_feature() {
        let engine = engine_with_layer(vec![
            tract(json!({ "COL2": 50000 })),
            tract(json!({ "COL2": 90000 })),
        ]);
        let text = pointer_moved(&engine, "Income-Layer", ScreenPoint { x: 1.0, y: 1.0 });
        assert_eq!(text, "It's median household income is $50000");
    }

    #[test]
    fn click_opens_ctuid_popup_at_click() {
        let engine = RecordingEngine::default();
        let at = LngLat { lng: -79.4, lat: 43.7 };
        layer_clicked(&engine, at, &[tract(json!({ "CTUID": "0010" }))]).expect("click");

        let popups = engine.popups.borrow();
        assert_eq!(popups.as_slice(), &[(at, "CTUID: 0010".to_owned())]);
    }

    #[test]
    fn click_without_features_opens_nothing() {
        let engine = RecordingEngine::default();
        layer_clicked(&engine, LngLat { lng: 0.0, lat: 0.0 }, &[]).expect("click");
        assert!(engine.popups.borrow().is_empty());
    }

    #[test]
    fn hover_sets_and_clears_pointer_cursor() {
        let engine = RecordingEngine::default();
        assert_eq!(hover_changed(&engine, CursorState::Pointer), CursorState::Pointer);
        assert_eq!(*engine.cursor.borrow(), "pointer");
        assert_eq!(hover_changed(&engine, CursorState::Default), CursorState::Default);
        assert_eq!(*engine.cursor.borrow(), "");
    }
}
