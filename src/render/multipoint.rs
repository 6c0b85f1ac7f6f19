//! Bridge to an external multipoint (tactical graphics) engine.
//!
//! The engine takes the symbol's control points as a coordinate string and
//! answers with a GeoJSON FeatureCollection: line and area parts of the
//! graphic, plus Point features that are really text labels with styling in
//! their properties. Labels go through the label engine; everything else is
//! merged into one geometry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bounds::MapBounds;
use crate::errors::RenderError;
use crate::geojson::{Feature, Geometry, RawFeatureCollection};
use crate::symbol::{GeoPoint, Symbol, ValidLocation};
use crate::types::{Degrees, Px};

use super::defaults;
use super::geometry::{close_rings, merge_parts};
use super::label::{HAlign, LabelStyle, LabelText, place_label};
use super::metrics::TextMetrics;
use super::types::{PresentationPack, Rendered};

/// Output encodings a multipoint engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderFormat {
    /// Vector markers (KML)
    Kml,
    /// Geometry exchange (GeoJSON); the only format this crate parses
    GeoJson,
    /// Canvas draw commands
    Canvas,
    /// Vector labels (GeoSVG)
    GeoSvg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbologyStandard {
    Mil2525B,
    Mil2525C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AltitudeMode {
    ClampToGround,
    RelativeToGround,
    Absolute,
}

impl AltitudeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AltitudeMode::ClampToGround => "clampToGround",
            AltitudeMode::RelativeToGround => "relativeToGround",
            AltitudeMode::Absolute => "absolute",
        }
    }
}

/// Everything the engine is called with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipointRequest<'a> {
    pub poid: &'a str,
    pub short_description: &'a str,
    pub full_description: &'a str,
    pub sidc: &'a str,
    /// `lon,lat lon,lat ...`
    pub coordinates: String,
    pub altitude_mode: AltitudeMode,
    pub scale: f64,
    /// `west,south,east,north`
    pub bbox: String,
    pub modifiers: BTreeMap<String, String>,
    pub format: RenderFormat,
    pub standard: SymbologyStandard,
}

/// An installed multipoint rendering engine.
pub trait MultipointEngine {
    /// Renders one symbol; returns the serialized payload in
    /// `request.format`.
    fn render(&self, request: &MultipointRequest<'_>) -> Result<String, RenderError>;
}

/// `lon,lat` tokens separated by spaces, in order, duplicates kept.
pub fn coords_token(coords: &[GeoPoint]) -> String {
    coords
        .iter()
        .map(|p| format!("{},{}", p.lon, p.lat))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `west,south,east,north` of the viewport.
pub fn bbox_token(bounds: &dyn MapBounds) -> String {
    let sw = bounds.south_west();
    let ne = bounds.north_east();
    format!("{},{},{},{}", sw.lon, sw.lat, ne.lon, ne.lat)
}

/// Engine modifiers for the designators the symbol actually has.
pub fn modifiers(symbol: &Symbol) -> BTreeMap<String, String> {
    [
        (defaults::MODIFIER_DESIGNATOR_1, &symbol.designator1),
        (defaults::MODIFIER_DESIGNATOR_2, &symbol.designator2),
    ]
    .into_iter()
    .filter_map(|(key, value)| {
        value
            .as_ref()
            .filter(|v| !v.is_empty())
            .map(|v| (key.to_string(), v.clone()))
    })
    .collect()
}

/// Reads a label feature's styling; `None` when it carries no text.
pub fn label_from_feature(feature: &Feature, base: &LabelStyle) -> Option<LabelText> {
    let text = feature.property_str("label").filter(|t| !t.trim().is_empty())?;
    let string_or = |key: &str, fallback: &str| {
        feature
            .property_str(key)
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };
    let style = LabelStyle {
        font_size: feature.property_f64("fontSize").map_or(base.font_size, Px),
        font_family: string_or("fontFamily", &base.font_family),
        font_weight: string_or("fontWeight", &base.font_weight),
        font_color: string_or("fontColor", &base.font_color),
        outline_color: feature
            .property_str("labelOutlineColor")
            .map(str::to_string)
            .or_else(|| base.outline_color.clone()),
        outline_width: feature
            .property_f64("labelOutlineWidth")
            .map_or(base.outline_width, Px),
    };
    let angle = Degrees(feature.property_f64("angle").unwrap_or(0.0));
    let align = feature
        .property_str("labelAlign")
        .map_or(HAlign::Center, HAlign::from_engine);
    Some(LabelText::new(text, style, angle, align))
}

pub struct MultipointRenderer<'a> {
    pub(crate) engine: Option<&'a dyn MultipointEngine>,
    pub(crate) metrics: &'a dyn TextMetrics,
    pub(crate) label_style: &'a LabelStyle,
}

impl MultipointRenderer<'_> {
    pub fn render(
        &self,
        symbol: &Symbol,
        location: &ValidLocation<'_>,
        bounds: &dyn MapBounds,
    ) -> Result<Rendered, RenderError> {
        let engine = self.engine.ok_or(RenderError::EngineUnavailable)?;

        let short_description = symbol.description.as_deref().unwrap_or_default();
        let request = MultipointRequest {
            poid: &symbol.poid,
            short_description,
            full_description: symbol.full_description.as_deref().unwrap_or(short_description),
            sidc: &symbol.sidc.legacy,
            coordinates: coords_token(location.coords),
            altitude_mode: AltitudeMode::ClampToGround,
            scale: 1.0,
            bbox: bbox_token(bounds),
            modifiers: modifiers(symbol),
            format: RenderFormat::GeoJson,
            standard: SymbologyStandard::Mil2525C,
        };
        crate::log::debug!(
            poid = request.poid,
            sidc = request.sidc,
            coordinates = %request.coordinates,
            bbox = %request.bbox,
            "calling multipoint engine"
        );

        let payload = engine.render(&request)?;
        let collection = RawFeatureCollection::parse(&payload)?;

        let mut parts = Vec::new();
        let mut presentation = Vec::new();
        for (index, raw) in collection.features.into_iter().enumerate() {
            let mut feature: Feature = match serde_json::from_value(raw) {
                Ok(feature) => feature,
                Err(err) => {
                    crate::log::warn!(poid = %symbol.poid, index, error = %err, "skipping undecodable feature");
                    continue;
                }
            };
            match feature.geometry.take() {
                Some(Geometry::Point { coordinates }) => {
                    if let Some(pack) = self.label_pack(&feature, &coordinates) {
                        presentation.push(pack);
                    }
                }
                Some(geometry) => parts.push(close_rings(geometry)),
                None => {
                    crate::log::debug!(poid = %symbol.poid, index, "feature without geometry");
                }
            }
        }

        let part_count = parts.len();
        let geometry = merge_parts(parts).map(|geometry| {
            Feature::new(geometry).with_property("poid", symbol.poid.clone().into())
        });
        if geometry.is_none() {
            crate::log::warn!(poid = %symbol.poid, "multipoint engine produced no geometry");
        }
        crate::log::debug!(
            poid = %symbol.poid,
            parts = part_count,
            labels = presentation.len(),
            "multipoint render done"
        );

        Ok(Rendered {
            geometry,
            presentation,
        })
    }

    fn label_pack(&self, feature: &Feature, coordinates: &[f64]) -> Option<PresentationPack> {
        let &[lon, lat, ..] = coordinates else {
            crate::log::warn!(len = coordinates.len(), "label point without lon/lat");
            return None;
        };
        let Some(label) = label_from_feature(feature, self.label_style) else {
            crate::log::debug!(lon, lat, "point feature without label text");
            return None;
        };
        match place_label(self.metrics, &label) {
            Ok(placement) => Some(PresentationPack::label(
                GeoPoint::new(lat, lon),
                placement,
                Some(label.text),
            )),
            Err(err) => {
                crate::log::warn!(
                    text = %label.text,
                    lon,
                    lat,
                    error = %err,
                    "dropping label"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::ViewBounds;
    use serde_json::json;

    #[test]
    fn coords_token_keeps_order_and_duplicates() {
        let coords = [
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(-3.5, 4.25),
        ];
        assert_eq!(coords_token(&coords), "2,1 2,1 4.25,-3.5");
    }

    #[test]
    fn bbox_token_from_either_form() {
        let edges = ViewBounds::from_edges(10.0, -10.0, 20.0, -20.0);
        assert_eq!(bbox_token(&edges), "-20,-10,20,10");
        let corners = ViewBounds::from_corners(GeoPoint::new(-10.0, -20.0), GeoPoint::new(10.0, 20.0));
        assert_eq!(bbox_token(&corners), "-20,-10,20,10");
    }

    #[test]
    fn modifiers_only_for_present_designators() {
        let mut symbol = Symbol::default();
        assert!(modifiers(&symbol).is_empty());
        symbol.designator2 = Some("OBJ 2".into());
        symbol.designator1 = Some(String::new());
        let m = modifiers(&symbol);
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("T1").map(String::as_str), Some("OBJ 2"));
    }

    #[test]
    fn label_style_from_properties() {
        let feature = Feature::default()
            .with_property("label", json!("PL BLUE"))
            .with_property("fontSize", json!("14pt"))
            .with_property("fontWeight", json!("bold"))
            .with_property("fontColor", json!("#0000ff"))
            .with_property("labelOutlineColor", json!("#ffffff"))
            .with_property("labelOutlineWidth", json!(2))
            .with_property("angle", json!(-45))
            .with_property("labelAlign", json!("right"));
        let label = label_from_feature(&feature, &LabelStyle::default()).unwrap();
        assert_eq!(label.text, "PL BLUE");
        assert_eq!(label.style.font_size, Px(14.0));
        assert_eq!(label.style.font_family, "Arial");
        assert_eq!(label.style.font_weight, "bold");
        assert_eq!(label.style.font_color, "#0000ff");
        assert_eq!(label.style.outline_color.as_deref(), Some("#ffffff"));
        assert_eq!(label.style.outline_width, Px(2.0));
        assert_eq!(label.angle, Degrees(-45.0));
        assert_eq!(label.align, HAlign::Right);
    }

    #[test]
    fn blank_label_is_not_a_label() {
        let feature = Feature::default().with_property("label", json!("  "));
        assert!(label_from_feature(&feature, &LabelStyle::default()).is_none());
        assert!(label_from_feature(&Feature::default(), &LabelStyle::default()).is_none());
    }
}
