//! Fixed-point integer backend.
//!
//! Coordinates are scaled onto an integer grid, clipped with Clipper, and
//! scaled back. Exact on the grid, so it serves as an independent
//! [`DifferenceEngine`] to cross-check the boundary walk against, or to plug
//! into a [`BatchSubtractor`](crate::BatchSubtractor) in its place.

use super::DifferenceEngine;
use crate::config::CLIPPER_SCALE;
use crate::error::FractureError;
use crate::polygon::Polygon;
use crate::primitives::Point2;
use crate::tolerance::remove_duplicate_vertices;
use geo_clipper::Clipper;
use geo_types::{Coord, LineString, Polygon as GeoPolygon};
use log::debug;

/// Largest scaled magnitude Clipper accepts.
const MAX_SCALED: f64 = 4.0e18;

/// Difference engine backed by `geo-clipper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipperEngine {
    scale: f64,
}

impl ClipperEngine {
    /// Creates an engine with the default grid of [`CLIPPER_SCALE`].
    pub fn new() -> Self {
        Self {
            scale: CLIPPER_SCALE,
        }
    }

    /// Creates an engine with a custom scale factor.
    pub fn with_scale(scale: f64) -> Self {
        Self { scale }
    }

    fn check_range(&self, polygon: &Polygon<f64>) -> Result<(), FractureError> {
        let out_of_range = polygon
            .contour
            .iter()
            .chain(polygon.holes.iter().flatten())
            .flat_map(|p| [p.x, p.y])
            .find(|v| !(v * self.scale).is_finite() || (v * self.scale).abs() > MAX_SCALED);

        match out_of_range {
            Some(value) => Err(FractureError::CoordinateOutOfRange { value }),
            None => Ok(()),
        }
    }
}

impl Default for ClipperEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn ring_to_geo(ring: &[Point2<f64>]) -> LineString<f64> {
    LineString::new(ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}

fn ring_from_geo(ring: &LineString<f64>) -> Vec<Point2<f64>> {
    let points: Vec<Point2<f64>> = ring.coords().map(|c| Point2::new(c.x, c.y)).collect();
    remove_duplicate_vertices(&points, 0.0)
}

fn polygon_from_geo(geo: &GeoPolygon<f64>) -> Option<Polygon<f64>> {
    let contour = ring_from_geo(geo.exterior());
    if contour.len() < 3 {
        return None;
    }

    let holes = geo
        .interiors()
        .iter()
        .map(ring_from_geo)
        .filter(|h| h.len() >= 3)
        .collect();

    Some(Polygon::with_holes(contour, holes))
}

impl DifferenceEngine<f64> for ClipperEngine {
    fn subtract(
        &self,
        subject: &Polygon<f64>,
        clip: &Polygon<f64>,
    ) -> Result<Vec<Polygon<f64>>, FractureError> {
        if subject.is_degenerate() {
            return Ok(Vec::new());
        }
        if clip.is_degenerate() {
            return Ok(vec![subject.clone()]);
        }

        self.check_range(subject)?;
        self.check_range(clip)?;

        let subject_geo = GeoPolygon::new(
            ring_to_geo(&subject.contour),
            subject.holes.iter().map(|h| ring_to_geo(h)).collect(),
        );
        let clip_geo = GeoPolygon::new(ring_to_geo(&clip.contour), Vec::new());

        let result = subject_geo.difference(&clip_geo, self.scale);
        debug!("integer backend returned {} polygons", result.0.len());

        Ok(result.0.iter().filter_map(polygon_from_geo).collect())
    }
}
