//! Map viewport bounds.
//!
//! Map adapters hand over bounds either as a corner pair (Leaflet's
//! `getSouthWest()`/`getNorthEast()` shape) or as four edges. Both implement
//! [`MapBounds`]; [`ViewBounds`] deserializes either wire form.

use serde::{Deserialize, Serialize};

use crate::symbol::GeoPoint;

/// Anything that can report its south-west and north-east corners.
pub trait MapBounds {
    fn south_west(&self) -> GeoPoint;
    fn north_east(&self) -> GeoPoint;

    fn west(&self) -> f64 {
        self.south_west().lon
    }
    fn south(&self) -> f64 {
        self.south_west().lat
    }
    fn east(&self) -> f64 {
        self.north_east().lon
    }
    fn north(&self) -> f64 {
        self.north_east().lat
    }
}

/// Viewport bounds in either accepted representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ViewBounds {
    Corners {
        #[serde(alias = "_southWest", rename = "southWest")]
        south_west: GeoPoint,
        #[serde(alias = "_northEast", rename = "northEast")]
        north_east: GeoPoint,
    },
    Edges {
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    },
}

impl ViewBounds {
    pub fn from_corners(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        ViewBounds::Corners {
            south_west,
            north_east,
        }
    }

    pub fn from_edges(north: f64, south: f64, east: f64, west: f64) -> Self {
        ViewBounds::Edges {
            north,
            south,
            east,
            west,
        }
    }
}

impl MapBounds for ViewBounds {
    fn south_west(&self) -> GeoPoint {
        match *self {
            ViewBounds::Corners { south_west, .. } => south_west,
            ViewBounds::Edges { south, west, .. } => GeoPoint::new(south, west),
        }
    }

    fn north_east(&self) -> GeoPoint {
        match *self {
            ViewBounds::Corners { north_east, .. } => north_east,
            ViewBounds::Edges { north, east, .. } => GeoPoint::new(north, east),
        }
    }
}

impl<B: MapBounds + ?Sized> MapBounds for &B {
    fn south_west(&self) -> GeoPoint {
        (**self).south_west()
    }

    fn north_east(&self) -> GeoPoint {
        (**self).north_east()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaflet_corner_form() {
        let json = r#"{
            "_southWest": { "lat": -10.0, "lng": 20.0 },
            "_northEast": { "lat": 5.0, "lng": 30.0 }
        }"#;
        let bounds: ViewBounds = serde_json::from_str(json).unwrap();
        assert_eq!(bounds.south_west(), GeoPoint::new(-10.0, 20.0));
        assert_eq!(bounds.north_east(), GeoPoint::new(5.0, 30.0));
    }

    #[test]
    fn plain_edge_form() {
        let json = r#"{ "north": 5, "south": -10, "east": 30, "west": 20 }"#;
        let bounds: ViewBounds = serde_json::from_str(json).unwrap();
        assert_eq!(bounds.west(), 20.0);
        assert_eq!(bounds.south(), -10.0);
        assert_eq!(bounds.east(), 30.0);
        assert_eq!(bounds.north(), 5.0);
    }

    #[test]
    fn both_forms_agree() {
        let corners = ViewBounds::from_corners(GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0));
        let edges = ViewBounds::from_edges(3.0, 1.0, 4.0, 2.0);
        assert_eq!(corners.south_west(), edges.south_west());
        assert_eq!(corners.north_east(), edges.north_east());
    }
}
