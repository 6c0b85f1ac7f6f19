//! Render outputs handed to the map adapter.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geojson::Feature;
use crate::symbol::GeoPoint;

use super::label::LabelPlacement;
use super::svg::svg_data_uri;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackKind {
    Icon,
    Label,
}

/// One image to overlay on the map, with its anchor and clickable outline
/// in the image's pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationPack {
    pub kind: PackKind,
    pub position: GeoPoint,
    /// `data:image/svg+xml;base64,...`
    pub image: String,
    pub width: f64,
    pub height: f64,
    pub anchor: DVec2,
    pub shape: Vec<DVec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PresentationPack {
    pub fn label(position: GeoPoint, placement: LabelPlacement, title: Option<String>) -> Self {
        Self {
            kind: PackKind::Label,
            position,
            image: svg_data_uri(&placement.svg),
            width: placement.width,
            height: placement.height,
            anchor: placement.anchor,
            shape: placement.shape.to_vec(),
            title,
        }
    }
}

/// Everything one render call produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rendered {
    /// `None` when the engine produced no drawable geometry.
    pub geometry: Option<Feature>,
    pub presentation: Vec<PresentationPack>,
}

impl Rendered {
    pub fn geometry_only(geometry: Feature) -> Self {
        Self {
            geometry: Some(geometry),
            presentation: Vec::new(),
        }
    }
}
