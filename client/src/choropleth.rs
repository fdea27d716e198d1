use std::cell::Cell;

use income_map_shared::MapConfig;
use income_map_shared::style::{fill_opacity_expression, initial_fill_paint};

use crate::engine::{FillLayer, MapEngine, VectorSource};

/// What a configuration pass actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Added,
    AlreadyPresent,
}

/// Declares the income source and its fill layer on the engine.
#[derive(Debug, Clone)]
pub struct ChoroplethConfigurator {
    source_id: String,
    layer_id: String,
    source_layer: String,
    tileset_url: String,
    ramp_installed: Cell<bool>,
}

impl ChoroplethConfigurator {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            source_id: config.source_id.clone(),
            layer_id: config.layer_id.clone(),
            source_layer: config.source_layer.clone(),
            tileset_url: config.tileset_url.clone(),
            ramp_installed: Cell::new(false),
        }
    }

    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    fn fill_layer(&self) -> FillLayer {
        FillLayer {
            id: self.layer_id.clone(),
            kind: "fill",
            source: self.source_id.clone(),
            source_layer: self.source_layer.clone(),
            paint: initial_fill_paint(),
        }
    }

    /// Registers the source and layer, then installs the zoom opacity ramp.
    ///
    /// Safe to call on every style load: existing source and layer are left
    /// alone instead of tripping the engine's duplicate-id errors. A ramp that
    /// failed to install is retried on the next call.
    pub fn apply<E: MapEngine>(&self, engine: &E) -> Result<ApplyOutcome, String> {
        let mut added = false;
        if !engine.has_source(&self.source_id) {
            engine.add_source(&self.source_id, &VectorSource::new(&self.tileset_url))?;
            added = true;
        }
        if !engine.has_layer(&self.layer_id) {
            engine.add_layer(&self.fill_layer())?;
            self.ramp_installed.set(false);
            added = true;
        }
        if !self.ramp_installed.get() {
            engine.set_paint_property(&self.layer_id, "fill-opacity", &fill_opacity_expression())?;
            self.ramp_installed.set(true);
            added = true;
        }
        Ok(if added {
            ApplyOutcome::Added
        } else {
            ApplyOutcome::AlreadyPresent
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fake::RecordingEngine;
    use serde_json::json;

    #[test]
    fn apply_registers_source_and_layer() {
        let engine = RecordingEngine::default();
        let configurator = ChoroplethConfigurator::new(&MapConfig::default());

        assert_eq!(configurator.apply(&engine), Ok(ApplyOutcome::Added));

        let sources = engine.sources.borrow();
        let source = sources.get("2015-Toronto-Income").expect("source registered");
        assert_eq!(source.kind, "vector");
        assert_eq!(source.url, "mapbox://ryansiu.cg9kiflm");

        let layers = engine.layers.borrow();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].id, "Income-Layer");
        assert_eq!(layers[0].kind, "fill");
        assert_eq!(layers[0].source, "2015-Toronto-Income");
        assert_eq!(layers[0].source_layer, "2015-Toronto-Income-0ngmhw");
        assert_eq!(layers[0].paint["fill-color"][0], "step");
    }

    #[test]
    fn apply_installs_zoom_opacity_ramp() {
        let engine = RecordingEngine::default();
        ChoroplethConfigurator::new(&MapConfig::default())
            .apply(&engine)
            .expect("apply");

        let paint = engine.paint.borrow();
        assert_eq!(paint.len(), 1);
        assert_eq!(paint[0].0, "Income-Layer");
        assert_eq!(paint[0].1, "fill-opacity");
        assert_eq!(
            paint[0].2,
            json!(["interpolate", ["exponential", 1.25], ["zoom"], 10.0, 0.6, 11.0, 1.0])
        );
    }

    #[test]
    fn reapplying_after_style_reload_is_idempotent() {
        let engine = RecordingEngine::default();
        let configurator = ChoroplethConfigurator::new(&MapConfig::default());

        configurator.apply(&engine).expect("first apply");
        assert_eq!(configurator.apply(&engine), Ok(ApplyOutcome::AlreadyPresent));

        assert_eq!(engine.sources.borrow().len(), 1);
        assert_eq!(engine.layers.borrow().len(), 1);
        assert_eq!(engine.paint.borrow().len(), 1);
    }

    #[test]
    fn failed_ramp_is_installed_on_next_apply() {
        let engine = RecordingEngine::default();
        let configurator = ChoroplethConfigurator::new(&MapConfig::default());

        engine.paint_failures.set(1);
        assert!(configurator.apply(&engine).is_err());
        assert_eq!(engine.layers.borrow().len(), 1);
        assert!(engine.paint.borrow().is_empty());

        assert_eq!(configurator.apply(&engine), Ok(ApplyOutcome::Added));
        assert_eq!(engine.layers.borrow().len(), 1);
        let paint = engine.paint.borrow();
        assert_eq!(paint.len(), 1);
        assert_eq!(paint[0].1, "fill-opacity");
    }

    #[test]
    fn layer_serializes_with_engine_keys() {
        let layer = ChoroplethConfigurator::new(&MapConfig::default()).fill_layer();
        let value = serde_json::to_value(&layer).expect("serialize layer");
        assert_eq!(value["type"], "fill");
        assert_eq!(value["source-layer"], "2015-Toronto-Income-0ngmhw");
        assert_eq!(value["paint"]["fill-outline-color"], "white");
    }
}
