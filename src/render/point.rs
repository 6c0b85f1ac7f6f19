//! Single-point symbols: one icon from the icon generator.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geojson::{Feature, Geometry};
use crate::symbol::{Affiliation, ShapeKind, Symbol, ValidLocation};
use crate::types::{PixelBox, Px};

use super::defaults;
use super::geometry::position;
use super::svg::svg_data_uri;
use super::types::{PackKind, PresentationPack, Rendered};

/// Style options passed to the icon generator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconOptions {
    pub size: Px,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub higher_formation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reinforced_reduced: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_depth: Option<String>,
}

impl IconOptions {
    pub fn for_symbol(symbol: &Symbol, size: Px) -> Self {
        let hostile_equipment =
            symbol.shape == ShapeKind::Equipment && symbol.affiliation == Affiliation::Hostile;
        Self {
            size,
            higher_formation: symbol.parent.clone(),
            hostile: hostile_equipment.then(|| defaults::HOSTILE_TEXT.to_string()),
            reinforced_reduced: symbol.strength.marker().map(str::to_string),
            unique_designation: symbol.designator1.clone(),
            altitude_depth: symbol.altitude_text(),
        }
    }
}

/// A generated icon.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    /// Standalone SVG document.
    pub svg: String,
    /// Pixel in the icon that sits on the symbol's position.
    pub anchor: DVec2,
    pub width: f64,
    pub height: f64,
}

/// Single-symbol icon generator (a milsymbol-style library).
pub trait IconGenerator {
    /// `None` when the code has no icon; not an error.
    fn generate(&self, sidc: &str, options: &IconOptions) -> Option<Icon>;
}

pub struct PointRenderer<'a> {
    pub(crate) icons: &'a dyn IconGenerator,
    pub(crate) icon_size: Px,
}

impl PointRenderer<'_> {
    pub fn render(&self, symbol: &Symbol, location: &ValidLocation<'_>) -> Rendered {
        let options = IconOptions::for_symbol(symbol, self.icon_size);
        let pack = match self.icons.generate(&symbol.sidc.legacy, &options) {
            Some(icon) => Some(self.icon_pack(symbol, location, icon)),
            None => {
                crate::log::warn!(poid = %symbol.poid, sidc = %symbol.sidc.legacy, "no icon for symbol");
                None
            }
        };

        let mut feature = Feature::new(Geometry::Point {
            coordinates: position(location.centroid),
        })
        .with_property("poid", symbol.poid.clone().into());
        if let Some(pack) = &pack {
            match serde_json::to_value(pack) {
                Ok(value) => feature = feature.with_property("presentation", value),
                Err(err) => {
                    crate::log::warn!(poid = %symbol.poid, error = %err, "presentation not attached to feature");
                }
            }
        }

        Rendered {
            geometry: Some(feature),
            presentation: pack.into_iter().collect(),
        }
    }

    fn icon_pack(&self, symbol: &Symbol, location: &ValidLocation<'_>, icon: Icon) -> PresentationPack {
        let outline = PixelBox::centered_square(icon.anchor, self.icon_size.raw());
        PresentationPack {
            kind: PackKind::Icon,
            position: location.centroid,
            image: svg_data_uri(&icon.svg),
            width: icon.width,
            height: icon.height,
            anchor: icon.anchor,
            shape: outline.corners().to_vec(),
            title: symbol.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Location, Sidc, Strength};
    use crate::symbol::GeoPoint;
    use glam::dvec2;

    struct Recording;

    impl IconGenerator for Recording {
        fn generate(&self, sidc: &str, options: &IconOptions) -> Option<Icon> {
            (!sidc.is_empty()).then(|| Icon {
                svg: format!("<svg><!-- {} --></svg>", serde_json::to_string(options).unwrap()),
                anchor: dvec2(20.0, 25.0),
                width: 40.0,
                height: 50.0,
            })
        }
    }

    fn symbol(shape: ShapeKind, affiliation: Affiliation) -> Symbol {
        Symbol {
            poid: "p1".into(),
            shape,
            sidc: Sidc::legacy("SHGPEWM---*****"),
            affiliation,
            location: Some(Location {
                coords: vec![GeoPoint::new(1.0, 2.0)],
                centroid: Some(GeoPoint::new(1.0, 2.0)),
                shape: ShapeKind::Point,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn hostile_flag_only_for_hostile_equipment() {
        let size = defaults::ICON_SIZE;
        let eq = IconOptions::for_symbol(&symbol(ShapeKind::Equipment, Affiliation::Hostile), size);
        assert_eq!(eq.hostile.as_deref(), Some("ENY"));
        let unit = IconOptions::for_symbol(&symbol(ShapeKind::Point, Affiliation::Hostile), size);
        assert_eq!(unit.hostile, None);
        let friendly = IconOptions::for_symbol(&symbol(ShapeKind::Equipment, Affiliation::Friend), size);
        assert_eq!(friendly.hostile, None);
    }

    #[test]
    fn options_carry_amplifiers() {
        let mut s = symbol(ShapeKind::Point, Affiliation::Friend);
        s.parent = Some("1 BDE".into());
        s.strength = Strength::Reinforced;
        s.designator1 = Some("A".into());
        s.max_altitude = Some(3000.0);
        let options = IconOptions::for_symbol(&s, Px(40.0));
        assert_eq!(options.size, Px(40.0));
        assert_eq!(options.higher_formation.as_deref(), Some("1 BDE"));
        assert_eq!(options.reinforced_reduced.as_deref(), Some("+"));
        assert_eq!(options.unique_designation.as_deref(), Some("A"));
        assert_eq!(options.altitude_depth.as_deref(), Some("3000"));
    }

    #[test]
    fn icon_outline_is_square_on_anchor() {
        let s = symbol(ShapeKind::Point, Affiliation::Friend);
        let location = s.valid_location().unwrap();
        let renderer = PointRenderer {
            icons: &Recording,
            icon_size: Px(10.0),
        };
        let rendered = renderer.render(&s, &location);
        let pack = &rendered.presentation[0];
        assert_eq!(
            pack.shape,
            vec![dvec2(15.0, 20.0), dvec2(25.0, 20.0), dvec2(25.0, 30.0), dvec2(15.0, 30.0)]
        );
        assert!(rendered.geometry.unwrap().properties.contains_key("presentation"));
    }

    #[test]
    fn missing_icon_keeps_geometry() {
        let mut s = symbol(ShapeKind::Point, Affiliation::Friend);
        s.sidc = Sidc::legacy("");
        let location = s.valid_location().unwrap();
        let renderer = PointRenderer {
            icons: &Recording,
            icon_size: defaults::ICON_SIZE,
        };
        let rendered = renderer.render(&s, &location);
        assert!(rendered.presentation.is_empty());
        let feature = rendered.geometry.unwrap();
        assert_eq!(
            feature.geometry,
            Some(Geometry::Point {
                coordinates: vec![2.0, 1.0]
            })
        );
        assert!(!feature.properties.contains_key("presentation"));
    }
}
