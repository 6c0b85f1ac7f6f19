//! Symbol records as produced by the recognition service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::RenderError;

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Shape kind of a symbol or of its location.
///
/// Unknown kinds are kept verbatim so a newer recognizer never breaks
/// deserialization; the renderers treat them as lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    #[default]
    Point,
    Line,
    Polyline,
    Polygon,
    Area,
    Rectangle,
    Ellipse,
    Equipment,
    MultipointComposite,
    Other(String),
}

impl ShapeKind {
    pub fn as_str(&self) -> &str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Line => "line",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Area => "area",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Equipment => "equipment",
            ShapeKind::MultipointComposite => "multipoint",
            ShapeKind::Other(s) => s,
        }
    }

    /// Kinds whose fallback geometry is a closed ring.
    pub fn is_areal(&self) -> bool {
        matches!(
            self,
            ShapeKind::Polygon | ShapeKind::Area | ShapeKind::Rectangle | ShapeKind::Ellipse
        )
    }
}

impl From<String> for ShapeKind {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "point" => ShapeKind::Point,
            "line" => ShapeKind::Line,
            "polyline" => ShapeKind::Polyline,
            "polygon" => ShapeKind::Polygon,
            "area" => ShapeKind::Area,
            "rectangle" => ShapeKind::Rectangle,
            "ellipse" => ShapeKind::Ellipse,
            "equipment" => ShapeKind::Equipment,
            "multipoint" | "multipoint-composite" => ShapeKind::MultipointComposite,
            _ => ShapeKind::Other(s),
        }
    }
}

impl From<ShapeKind> for String {
    fn from(kind: ShapeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affiliation {
    Pending,
    #[default]
    Unknown,
    AssumedFriend,
    Friend,
    Neutral,
    Suspected,
    Hostile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    #[default]
    None,
    Reinforced,
    Reduced,
    ReducedReinforced,
}

impl Strength {
    /// Text of the reinforced/reduced amplifier, if any.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Strength::None => None,
            Strength::Reinforced => Some("+"),
            Strength::Reduced => Some("-"),
            Strength::ReducedReinforced => Some("±"),
        }
    }
}

/// Symbol identification code in its several encodings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidc {
    /// 15-character 2525C code, the one both engines consume.
    pub legacy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_set: Option<String>,
}

impl Sidc {
    pub fn legacy(code: impl Into<String>) -> Self {
        Self {
            legacy: code.into(),
            ..Default::default()
        }
    }
}

/// Where a symbol sits on the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub coords: Vec<GeoPoint>,
    #[serde(default)]
    pub centroid: Option<GeoPoint>,
    #[serde(default)]
    pub shape: ShapeKind,
}

/// A recognized symbol.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub poid: String,
    #[serde(default)]
    pub shape: ShapeKind,
    pub sidc: Sidc,
    #[serde(default)]
    pub affiliation: Affiliation,
    #[serde(default)]
    pub designator1: Option<String>,
    #[serde(default)]
    pub designator2: Option<String>,
    #[serde(default)]
    pub strength: Strength,
    /// Higher formation
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub min_altitude: Option<f64>,
    #[serde(default)]
    pub max_altitude: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

/// A location that passed validation: at least one coordinate and a centroid.
#[derive(Debug, Clone, Copy)]
pub struct ValidLocation<'a> {
    pub coords: &'a [GeoPoint],
    pub centroid: GeoPoint,
    pub shape: &'a ShapeKind,
}

impl Symbol {
    /// Checks the location invariant every renderer relies on.
    pub fn valid_location(&self) -> Result<ValidLocation<'_>, RenderError> {
        let missing = || RenderError::MissingLocation {
            poid: self.poid.clone(),
        };
        let location = self.location.as_ref().ok_or_else(missing)?;
        if location.coords.is_empty() {
            return Err(missing());
        }
        let centroid = location.centroid.ok_or_else(missing)?;
        Ok(ValidLocation {
            coords: &location.coords,
            centroid,
            shape: &location.shape,
        })
    }

    /// Altitude amplifier text, e.g. `"100 - 500"` or `"100"`.
    pub fn altitude_text(&self) -> Option<String> {
        match (self.min_altitude, self.max_altitude) {
            (Some(min), Some(max)) if min != max => Some(format!("{min} - {max}")),
            (Some(alt), _) | (None, Some(alt)) => Some(format!("{alt}")),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_recognizer_json() {
        let json = r#"{
            "poid": "S-1",
            "shape": "equipment",
            "sidc": { "legacy": "SHGPE-----*****", "symbolSet": "15" },
            "affiliation": "hostile",
            "strength": "reduced_reinforced",
            "designator1": "A",
            "minAltitude": 100,
            "location": {
                "coords": [{ "lat": 1.5, "lng": 2.5 }],
                "centroid": { "lat": 1.5, "lon": 2.5 },
                "shape": "point"
            }
        }"#;
        let symbol: Symbol = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.shape, ShapeKind::Equipment);
        assert_eq!(symbol.affiliation, Affiliation::Hostile);
        assert_eq!(symbol.strength, Strength::ReducedReinforced);
        assert_eq!(symbol.sidc.symbol_set.as_deref(), Some("15"));
        let location = symbol.location.unwrap();
        assert_eq!(location.coords, vec![GeoPoint::new(1.5, 2.5)]);
        assert_eq!(location.shape, ShapeKind::Point);
    }

    #[test]
    fn unknown_shape_kind_is_kept() {
        let kind: ShapeKind = serde_json::from_str(r#""corridor""#).unwrap();
        assert_eq!(kind, ShapeKind::Other("corridor".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), r#""corridor""#);
    }

    #[test]
    fn areal_kinds() {
        for kind in ["polygon", "area", "rectangle", "ellipse"] {
            assert!(ShapeKind::from(kind.to_string()).is_areal(), "{kind}");
        }
        for kind in ["line", "polyline", "point", "arrow"] {
            assert!(!ShapeKind::from(kind.to_string()).is_areal(), "{kind}");
        }
    }

    #[test]
    fn location_without_centroid_is_invalid() {
        let symbol = Symbol {
            poid: "p".into(),
            location: Some(Location {
                coords: vec![GeoPoint::new(0.0, 0.0)],
                centroid: None,
                shape: ShapeKind::Line,
            }),
            ..Default::default()
        };
        assert!(matches!(
            symbol.valid_location(),
            Err(RenderError::MissingLocation { poid }) if poid == "p"
        ));
    }

    #[test]
    fn absent_location_is_invalid() {
        let symbol = Symbol::default();
        assert!(symbol.valid_location().is_err());
    }

    #[test]
    fn altitude_text_variants() {
        let mut symbol = Symbol::default();
        assert_eq!(symbol.altitude_text(), None);
        symbol.min_altitude = Some(100.0);
        assert_eq!(symbol.altitude_text().as_deref(), Some("100"));
        symbol.max_altitude = Some(500.0);
        assert_eq!(symbol.altitude_text().as_deref(), Some("100 - 500"));
        symbol.min_altitude = None;
        assert_eq!(symbol.altitude_text().as_deref(), Some("500"));
    }

    #[test]
    fn strength_markers() {
        assert_eq!(Strength::None.marker(), None);
        assert_eq!(Strength::Reinforced.marker(), Some("+"));
        assert_eq!(Strength::Reduced.marker(), Some("-"));
        assert_eq!(Strength::ReducedReinforced.marker(), Some("±"));
    }
}
