//! Geometry helpers: geo points to GeoJSON positions, ring closing and
//! multi-part merging.

use crate::geojson::{Geometry, Position};
use crate::symbol::GeoPoint;

/// GeoJSON position `[lon, lat]`.
pub fn position(p: GeoPoint) -> Position {
    vec![p.lon, p.lat]
}

pub fn positions(points: &[GeoPoint]) -> Vec<Position> {
    points.iter().copied().map(position).collect()
}

/// Append the first position when the ring is not already closed.
pub fn close_ring(mut ring: Vec<Position>) -> Vec<Position> {
    if let Some(first) = ring.first().filter(|first| ring.last() != Some(*first)) {
        let first = first.clone();
        ring.push(first);
    }
    ring
}

/// Close every polygon ring in `geometry`, descending into collections.
pub fn close_rings(geometry: Geometry) -> Geometry {
    match geometry {
        Geometry::Polygon { coordinates } => Geometry::Polygon {
            coordinates: close_polygon(coordinates),
        },
        Geometry::MultiPolygon { coordinates } => Geometry::MultiPolygon {
            coordinates: coordinates.into_iter().map(close_polygon).collect(),
        },
        Geometry::GeometryCollection { geometries } => Geometry::GeometryCollection {
            geometries: geometries.into_iter().map(close_rings).collect(),
        },
        other => other,
    }
}

fn close_polygon(rings: Vec<Vec<Position>>) -> Vec<Vec<Position>> {
    rings.into_iter().map(close_ring).collect()
}

/// Merge geometry parts: none, the single part, or a collection in order.
pub fn merge_parts(mut parts: Vec<Geometry>) -> Option<Geometry> {
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(Geometry::GeometryCollection { geometries: parts }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_lon_lat() {
        assert_eq!(position(GeoPoint::new(10.0, 20.0)), vec![20.0, 10.0]);
    }

    #[test]
    fn close_open_ring() {
        let ring = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let closed = close_ring(ring);
        assert_eq!(closed.len(), 4);
        assert_eq!(closed.first(), closed.last());
    }

    #[test]
    fn closed_ring_untouched() {
        let ring = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(close_ring(ring.clone()), ring);
    }

    #[test]
    fn empty_ring_stays_empty() {
        assert!(close_ring(Vec::new()).is_empty());
    }

    #[test]
    fn close_rings_reaches_nested_polygons() {
        let open = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let mut closed = open.clone();
        closed.push(vec![0.0, 0.0]);
        let line = Geometry::LineString {
            coordinates: open.clone(),
        };
        let geometry = Geometry::GeometryCollection {
            geometries: vec![
                Geometry::Polygon {
                    coordinates: vec![open.clone()],
                },
                Geometry::MultiPolygon {
                    coordinates: vec![vec![open.clone(), open.clone()]],
                },
                line.clone(),
            ],
        };
        assert_eq!(
            close_rings(geometry),
            Geometry::GeometryCollection {
                geometries: vec![
                    Geometry::Polygon {
                        coordinates: vec![closed.clone()],
                    },
                    Geometry::MultiPolygon {
                        coordinates: vec![vec![closed.clone(), closed]],
                    },
                    line,
                ],
            }
        );
    }

    #[test]
    fn merge_counts() {
        let line = Geometry::LineString {
            coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
        };
        assert_eq!(merge_parts(Vec::new()), None);
        assert_eq!(merge_parts(vec![line.clone()]), Some(line.clone()));
        assert_eq!(
            merge_parts(vec![line.clone(), line.clone()]),
            Some(Geometry::GeometryCollection {
                geometries: vec![line.clone(), line],
            })
        );
    }
}
