//! GeoJSON geometry model.
//!
//! Just enough of RFC 7946 to read the multipoint engine's output and to hand
//! geometry to a map adapter. Positions are `[lon, lat]` with an optional
//! trailing altitude, so they stay `Vec<f64>`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::RenderError;

pub type Position = Vec<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Geometry::Point { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Option<Geometry>,
    /// `null` and a missing member both read as no properties.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Numeric property; engines emit numbers both bare and as strings
    /// with a unit suffix (`"12pt"`).
    pub fn property_f64(&self, key: &str) -> Option<f64> {
        match self.properties.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => leading_number(s),
            _ => None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}

/// A FeatureCollection whose features are still raw JSON, so one bad feature
/// can be skipped without losing the rest.
#[derive(Debug, Clone, Default)]
pub struct RawFeatureCollection {
    pub features: Vec<Value>,
}

impl RawFeatureCollection {
    /// Parses an engine payload. Engines report their own failures as
    /// `{"type": "error", "error": "..."}`.
    pub fn parse(payload: &str) -> Result<Self, RenderError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|err| RenderError::EngineRender {
                message: format!("malformed GeoJSON: {err}"),
            })?;
        let Value::Object(mut object) = value else {
            return Err(RenderError::EngineRender {
                message: "payload is not a JSON object".to_string(),
            });
        };
        match object.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => {}
            Some("error") => {
                let message = object
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unspecified engine error")
                    .to_string();
                return Err(RenderError::EngineRender { message });
            }
            other => {
                return Err(RenderError::EngineRender {
                    message: format!("expected a FeatureCollection, got {other:?}"),
                });
            }
        }
        let features = match object.remove("features") {
            Some(Value::Array(features)) => features,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => {
                return Err(RenderError::EngineRender {
                    message: "`features` is not an array".to_string(),
                });
            }
        };
        Ok(Self { features })
    }
}
