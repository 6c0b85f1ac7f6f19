//! Shallow renderer used when no multipoint engine is available.
//!
//! Draws the raw sketch: no styling, no labels, no tactical graphic
//! decoration. Never fails on a validated location.

use crate::geojson::{Feature, Geometry};
use crate::symbol::{ShapeKind, ValidLocation};

use super::geometry::{close_ring, positions};
use super::types::Rendered;

pub fn shallow_geometry(coords: &[crate::symbol::GeoPoint], shape: &ShapeKind) -> Geometry {
    let coordinates = positions(coords);
    if shape.is_areal() {
        Geometry::Polygon {
            coordinates: vec![close_ring(coordinates)],
        }
    } else {
        // line, polyline and anything unrecognized
        Geometry::LineString { coordinates }
    }
}

pub fn render_shallow(poid: &str, location: &ValidLocation<'_>) -> Rendered {
    crate::log::debug!(poid, shape = %location.shape, "shallow render");
    let feature = Feature::new(shallow_geometry(location.coords, location.shape))
        .with_property("poid", poid.into());
    Rendered::geometry_only(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::GeoPoint;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ]
    }

    #[test]
    fn lines_stay_open() {
        for kind in [ShapeKind::Line, ShapeKind::Polyline] {
            let Geometry::LineString { coordinates } = shallow_geometry(&square(), &kind) else {
                panic!("expected a LineString for {kind}");
            };
            assert_eq!(coordinates.len(), 4);
        }
    }

    #[test]
    fn areas_are_closed() {
        for kind in [
            ShapeKind::Polygon,
            ShapeKind::Area,
            ShapeKind::Rectangle,
            ShapeKind::Ellipse,
        ] {
            let Geometry::Polygon { coordinates } = shallow_geometry(&square(), &kind) else {
                panic!("expected a Polygon for {kind}");
            };
            let ring = &coordinates[0];
            assert_eq!(ring.len(), 5);
            assert_eq!(ring.first(), ring.last());
        }
    }

    #[test]
    fn unknown_kinds_default_to_lines() {
        let kind = ShapeKind::Other("axis-of-advance".into());
        assert!(matches!(
            shallow_geometry(&square(), &kind),
            Geometry::LineString { .. }
        ));
    }
}
