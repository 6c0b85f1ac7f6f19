//! Omitted output is logged. Needs `--features tracing`.

#![cfg(feature = "tracing")]

use std::io::Write;
use std::sync::{Arc, Mutex};

use milsketch::{
    GeoPoint, Icon, IconGenerator, IconOptions, Location, MultipointEngine, MultipointRequest,
    RenderError, ShapeKind, Symbol, SymbolRenderer, ViewBounds,
};
use serde_json::json;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a debug-level subscriber and returns what it logged.
fn logged(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.text()
}

struct NoIcons;

impl IconGenerator for NoIcons {
    fn generate(&self, _sidc: &str, _options: &IconOptions) -> Option<Icon> {
        None
    }
}

struct UnlabeledPoint;

impl MultipointEngine for UnlabeledPoint {
    fn render(&self, _request: &MultipointRequest<'_>) -> Result<String, RenderError> {
        Ok(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature",
                  "geometry": { "type": "Point", "coordinates": [0, 0] },
                  "properties": null }
            ]
        })
        .to_string())
    }
}

fn symbol(shape: ShapeKind) -> Symbol {
    Symbol {
        poid: "log-1".into(),
        location: Some(Location {
            coords: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)],
            centroid: Some(GeoPoint::new(0.0, 0.0)),
            shape,
        }),
        ..Default::default()
    }
}

#[test]
fn unlabeled_point_feature_is_logged() {
    let renderer = SymbolRenderer::new(NoIcons).with_engine(UnlabeledPoint);
    let out = logged(|| {
        let rendered = renderer
            .render(&symbol(ShapeKind::Line), &ViewBounds::from_edges(1.0, 0.0, 1.0, 0.0))
            .unwrap();
        assert!(rendered.presentation.is_empty());
    });
    assert!(out.contains("point feature without label text"), "{out}");
    assert!(out.contains("multipoint engine produced no geometry"), "{out}");
}

#[test]
fn missing_icon_and_fallback_are_logged() {
    let renderer = SymbolRenderer::new(NoIcons);
    let bounds = ViewBounds::from_edges(1.0, 0.0, 1.0, 0.0);
    let out = logged(|| {
        renderer.render(&symbol(ShapeKind::Point), &bounds).unwrap();
        renderer.render(&symbol(ShapeKind::Line), &bounds).unwrap();
    });
    assert!(out.contains("no icon for symbol"), "{out}");
    assert!(out.contains("using shallow renderer"), "{out}");
}
