//! Render a symbol record and print the geometry and presentation packs.
//!
//! ```text
//! RUST_LOG=milsketch=debug cargo run --example render_symbol --features tracing [symbol.json]
//! ```
//!
//! The stand-in engine below echoes the control points back as a line with
//! one label at the first point, which is enough to exercise label placement.

use miette::IntoDiagnostic;
use milsketch::{
    Icon, IconGenerator, IconOptions, MultipointEngine, MultipointRequest, RenderError, Symbol,
    SymbolRenderer, ViewBounds,
};
use serde_json::json;

struct CircleIcons;

impl IconGenerator for CircleIcons {
    fn generate(&self, sidc: &str, options: &IconOptions) -> Option<Icon> {
        let size = options.size.raw();
        let r = size / 2.0;
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}"><circle cx="{r}" cy="{r}" r="{r}" fill="skyblue"><title>{sidc}</title></circle></svg>"#
        );
        Some(Icon {
            svg,
            anchor: glam::dvec2(r, r),
            width: size,
            height: size,
        })
    }
}

struct EchoEngine;

impl MultipointEngine for EchoEngine {
    fn render(&self, request: &MultipointRequest<'_>) -> Result<String, RenderError> {
        let points: Vec<Vec<f64>> = request
            .coordinates
            .split_whitespace()
            .filter_map(|pair| {
                let (lon, lat) = pair.split_once(',')?;
                Some(vec![lon.parse().ok()?, lat.parse().ok()?])
            })
            .collect();
        let first = points.first().cloned().unwrap_or_default();
        let label = request.modifiers.get("T").map_or(request.sidc, String::as_str);
        let payload = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature",
                  "geometry": { "type": "LineString", "coordinates": points },
                  "properties": {} },
                { "type": "Feature",
                  "geometry": { "type": "Point", "coordinates": first },
                  "properties": { "label": label, "angle": -30, "labelAlign": "left",
                                  "fontWeight": "bold", "labelOutlineColor": "white",
                                  "labelOutlineWidth": 2 } }
            ]
        });
        Ok(payload.to_string())
    }
}

const DEFAULT_SYMBOL: &str = r#"{
    "poid": "demo-1",
    "sidc": { "legacy": "GFGPGLP----****" },
    "designator1": "BLUE",
    "description": "Phase line BLUE",
    "location": {
        "shape": "polyline",
        "coords": [{ "lat": 51.0, "lon": 4.0 }, { "lat": 51.1, "lon": 4.2 }, { "lat": 51.0, "lon": 4.4 }],
        "centroid": { "lat": 51.05, "lon": 4.2 }
    }
}"#;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).into_diagnostic()?,
        None => DEFAULT_SYMBOL.to_string(),
    };
    let symbol: Symbol = serde_json::from_str(&input).map_err(RenderError::from)?;

    let bounds = ViewBounds::from_edges(52.0, 50.0, 5.0, 3.0);
    let renderer = SymbolRenderer::new(CircleIcons).with_engine(EchoEngine);
    let rendered = renderer.render(&symbol, &bounds)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&rendered.geometry).into_diagnostic()?
    );
    for pack in &rendered.presentation {
        println!(
            "{:?} {}x{} anchor=({}, {}) title={:?}",
            pack.kind, pack.width, pack.height, pack.anchor.x, pack.anchor.y, pack.title
        );
    }
    Ok(())
}
