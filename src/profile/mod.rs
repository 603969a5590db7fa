//! Tooth and gear boundary curves.
//!
//! A boundary is an ordered, directed sequence of [`CurveSegment`]s. One
//! tooth ([`ToothProfile`]) runs from a root point, up the flank, across the
//! tip, down the mirrored flank and on to the next tooth's root point; the
//! arrayer replicates it into the full [`GearProfile`].

pub mod array;
pub mod involute;

use crate::float_types::{Real, tolerance};
use crate::variant::Orientation;
use nalgebra::{Point2, Rotation2, Vector2};

/// One directed piece of a tooth boundary.
///
/// Involute and trochoid flanks are carried as sampled point runs, the way a
/// CAD kernel consumes them for fitted splines; lines and circular arcs stay
/// parametric.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    Line {
        start: Point2<Real>,
        end: Point2<Real>,
    },
    /// Circular arc; positive `sweep` runs counter-clockwise from
    /// `start_angle` about `center`.
    Arc {
        center: Point2<Real>,
        radius: Real,
        start_angle: Real,
        sweep: Real,
    },
    /// Involute flank, sampled from root end to tip end.
    Involute { points: Vec<Point2<Real>> },
    /// Trochoidal undercut root curve, sampled from the root circle outward.
    Trochoid { points: Vec<Point2<Real>> },
}

impl CurveSegment {
    pub fn start_point(&self) -> Point2<Real> {
        match self {
            CurveSegment::Line { start, .. } => *start,
            CurveSegment::Arc { center, radius, start_angle, .. } => {
                point_on_circle(*center, *radius, *start_angle)
            },
            CurveSegment::Involute { points } | CurveSegment::Trochoid { points } => points[0],
        }
    }

    pub fn end_point(&self) -> Point2<Real> {
        match self {
            CurveSegment::Line { end, .. } => *end,
            CurveSegment::Arc { center, radius, start_angle, sweep } => {
                point_on_circle(*center, *radius, start_angle + sweep)
            },
            CurveSegment::Involute { points } | CurveSegment::Trochoid { points } => {
                points[points.len() - 1]
            },
        }
    }

    /// Same carrier curve, opposite direction of travel.
    pub fn reversed(&self) -> CurveSegment {
        match self {
            CurveSegment::Line { start, end } => CurveSegment::Line { start: *end, end: *start },
            CurveSegment::Arc { center, radius, start_angle, sweep } => CurveSegment::Arc {
                center: *center,
                radius: *radius,
                start_angle: start_angle + sweep,
                sweep: -sweep,
            },
            CurveSegment::Involute { points } => {
                CurveSegment::Involute { points: points.iter().rev().copied().collect() }
            },
            CurveSegment::Trochoid { points } => {
                CurveSegment::Trochoid { points: points.iter().rev().copied().collect() }
            },
        }
    }

    /// Reflect across the X axis. Reverses the winding sense.
    pub fn mirrored_x(&self) -> CurveSegment {
        let flip = |p: &Point2<Real>| Point2::new(p.x, -p.y);
        match self {
            CurveSegment::Line { start, end } => {
                CurveSegment::Line { start: flip(start), end: flip(end) }
            },
            CurveSegment::Arc { center, radius, start_angle, sweep } => CurveSegment::Arc {
                center: flip(center),
                radius: *radius,
                start_angle: -start_angle,
                sweep: -sweep,
            },
            CurveSegment::Involute { points } => {
                CurveSegment::Involute { points: points.iter().map(flip).collect() }
            },
            CurveSegment::Trochoid { points } => {
                CurveSegment::Trochoid { points: points.iter().map(flip).collect() }
            },
        }
    }

    /// Rotate about the origin.
    pub fn rotated(&self, angle: Real) -> CurveSegment {
        let rot = Rotation2::new(angle);
        match self {
            CurveSegment::Line { start, end } => {
                CurveSegment::Line { start: rot * start, end: rot * end }
            },
            CurveSegment::Arc { center, radius, start_angle, sweep } => CurveSegment::Arc {
                center: rot * center,
                radius: *radius,
                start_angle: start_angle + angle,
                sweep: *sweep,
            },
            CurveSegment::Involute { points } => {
                CurveSegment::Involute { points: points.iter().map(|p| rot * p).collect() }
            },
            CurveSegment::Trochoid { points } => {
                CurveSegment::Trochoid { points: points.iter().map(|p| rot * p).collect() }
            },
        }
    }

    /// Translate by `delta`.
    pub fn translated(&self, delta: Vector2<Real>) -> CurveSegment {
        let shift = |p: &Point2<Real>| p + delta;
        match self {
            CurveSegment::Line { start, end } => {
                CurveSegment::Line { start: shift(start), end: shift(end) }
            },
            CurveSegment::Arc { center, radius, start_angle, sweep } => CurveSegment::Arc {
                center: shift(center),
                radius: *radius,
                start_angle: *start_angle,
                sweep: *sweep,
            },
            CurveSegment::Involute { points } => {
                CurveSegment::Involute { points: points.iter().map(shift).collect() }
            },
            CurveSegment::Trochoid { points } => {
                CurveSegment::Trochoid { points: points.iter().map(shift).collect() }
            },
        }
    }
}

pub(crate) fn point_on_circle(center: Point2<Real>, radius: Real, angle: Real) -> Point2<Real> {
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// One tooth's boundary, C0-continuous end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct ToothProfile {
    pub segments: Vec<CurveSegment>,
}

impl ToothProfile {
    pub fn start_point(&self) -> Point2<Real> {
        self.segments[0].start_point()
    }

    pub fn end_point(&self) -> Point2<Real> {
        self.segments[self.segments.len() - 1].end_point()
    }

    /// Consecutive segments must meet within the crate tolerance.
    pub fn is_contiguous(&self) -> bool {
        chain_is_contiguous(&self.segments)
    }
}

/// The full gear boundary: a closed loop for circular kinds, an open
/// periodic run for racks.
#[derive(Debug, Clone, PartialEq)]
pub struct GearProfile {
    pub segments: Vec<CurveSegment>,
    pub closed: bool,
    pub orientation: Orientation,
}

impl GearProfile {
    /// Every segment endpoint chains to the next start, and closed loops
    /// return to their first point.
    pub fn is_well_formed(&self) -> bool {
        if !chain_is_contiguous(&self.segments) {
            return false;
        }
        if self.closed {
            let first = self.segments[0].start_point();
            let last = self.segments[self.segments.len() - 1].end_point();
            if (first - last).norm() > tolerance() {
                return false;
            }
        }
        true
    }
}

pub(crate) fn chain_is_contiguous(segments: &[CurveSegment]) -> bool {
    segments
        .windows(2)
        .all(|pair| (pair[0].end_point() - pair[1].start_point()).norm() <= tolerance())
}
