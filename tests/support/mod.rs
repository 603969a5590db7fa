//! Test support library
//! Provides various helper functions & utilities for tests.

use gearkit::float_types::Real;
use gearkit::{CurveSegment, GearProfile};
use nalgebra::Point2;

pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Flatten one segment into a point run (arcs sampled at `arc_steps`).
pub fn sample_segment(segment: &CurveSegment, arc_steps: usize) -> Vec<Point2<Real>> {
    match segment {
        CurveSegment::Line { start, end } => vec![*start, *end],
        CurveSegment::Arc { center, radius, start_angle, sweep } => (0..=arc_steps)
            .map(|i| {
                let angle = start_angle + sweep * (i as Real) / (arc_steps as Real);
                Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect(),
        CurveSegment::Involute { points } | CurveSegment::Trochoid { points } => points.clone(),
    }
}

/// Flatten a whole profile into one polyline, dropping duplicated joints.
pub fn sample_profile(profile: &GearProfile, arc_steps: usize) -> Vec<Point2<Real>> {
    let mut polyline: Vec<Point2<Real>> = Vec::new();
    for segment in &profile.segments {
        for point in sample_segment(segment, arc_steps) {
            let duplicate = polyline.last().is_some_and(|last| (last - point).norm() < 1e-9);
            if !duplicate {
                polyline.push(point);
            }
        }
    }
    polyline
}

fn orient(a: Point2<Real>, b: Point2<Real>, c: Point2<Real>) -> Real {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Strict proper-crossing test between non-adjacent polyline edges.
/// Touching endpoints do not count as an intersection.
pub fn polyline_self_intersects(points: &[Point2<Real>], closed: bool) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }
    let edge_count = if closed { n } else { n - 1 };
    let edge = |i: usize| (points[i], points[(i + 1) % n]);
    for i in 0..edge_count {
        for j in (i + 2)..edge_count {
            // Skip adjacent edges (they share a vertex), including the wrap
            if closed && i == 0 && j == edge_count - 1 {
                continue;
            }
            let (a, b) = edge(i);
            let (c, d) = edge(j);
            let abc = orient(a, b, c);
            let abd = orient(a, b, d);
            let cda = orient(c, d, a);
            let cdb = orient(c, d, b);
            if abc * abd < 0.0 && cda * cdb < 0.0 {
                return true;
            }
        }
    }
    false
}
