//! Single-tooth boundary generation.
//!
//! The working flank is the involute of the base circle,
//! `x(t) = r_b (cos t + t sin t)`, `y(t) = r_b (sin t − t cos t)`, unrolled
//! until it reaches the tip circle. Below the base circle no involute exists;
//! there the flank is the trochoid traced by the generating rack's tip corner
//! as it rolls along the pitch line, with the cutter's corner fillet folded in
//! as a parallel offset. Where the root circle sits at or above the base
//! circle, a plain fillet arc joins the root circle to the involute instead.
//!
//! The two flanks of a tooth are exact angular mirrors about its center ray;
//! the left flank is produced by reflection, never computed independently.

use crate::errors::{GearError, GeometryInfeasible};
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::params::{CircularDims, GearParameters, RackDims};
use crate::profile::{CurveSegment, ToothProfile};
use nalgebra::{Point2, Rotation2, Vector2};

/// Sample count per involute flank. Dense enough that chord error stays
/// negligible for typical modules once a kernel fits a spline through the
/// run.
pub const SEGMENTS_PER_FLANK: usize = 24;

/// Trochoid roll-angle step, as a fraction of the array step.
const TROCHOID_STEP_DIVISOR: Real = 64.0;
const MAX_TROCHOID_STEPS: usize = 512;

/// Classic parametric involute of a circle.
#[inline]
pub(crate) fn involute_xy(rb: Real, t: Real) -> (Real, Real) {
    (rb * (t.cos() + t * t.sin()), rb * (t.sin() - t * t.cos()))
}

/// Unroll angle at which the involute reaches radius `r`:
/// `t = sqrt((r/r_b)² − 1)`.
#[inline]
pub(crate) fn unroll_angle_at_radius(r: Real, rb: Real) -> Real {
    ((r / rb) * (r / rb) - 1.0).max(0.0).sqrt()
}

/// Polar angle of the involute point at unroll angle `t`, measured from the
/// involute's start ray: `t − atan(t)` (the involute function in `t` form).
#[inline]
pub(crate) fn involute_polar_angle(t: Real) -> Real {
    t - t.atan()
}

/// The involute function `inv α = tan α − α`.
#[inline]
pub(crate) fn involute_fn(alpha: Real) -> Real {
    alpha.tan() - alpha
}

/// Right-flank point at unroll angle `t`, in the frame where the tooth is
/// centered on the +X ray and `psi_b` is the half tooth-thickness angle at
/// the base circle.
#[inline]
fn flank_point(rb: Real, t: Real, psi_b: Real) -> Point2<Real> {
    let (x, y) = involute_xy(rb, t);
    Rotation2::new(-psi_b) * Point2::new(x, y)
}

fn wrap_angle(angle: Real) -> Real {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Build one tooth of a circular gear (external, internal-as-space, worm).
///
/// The returned profile runs from the tooth's leading root point, up the
/// right flank, across the tip arc, down the mirrored left flank and along
/// the root circle to where the next tooth begins (one array step away).
pub fn circular_tooth(
    params: &GearParameters,
    dims: &CircularDims,
) -> Result<ToothProfile, GearError> {
    let rb = dims.base_radius;
    let r_tip = dims.tip_radius;
    let r_root = dims.root_radius;
    let psi_b = dims.tooth_half_angle + involute_fn(params.pressure_angle());

    let t_tip = unroll_angle_at_radius(r_tip, rb);
    let psi_tip = psi_b - involute_polar_angle(t_tip);
    if psi_tip <= EPSILON {
        return Err(GeometryInfeasible::PointedTooth { tip_extent: psi_tip }.into());
    }

    let fillet_radius = params.root_fillet() * params.module();
    let undercut = r_root < rb - EPSILON;

    let (lead_in, t_start) = if undercut {
        trochoid_lead_in(params, dims, psi_b, fillet_radius)?
    } else {
        fillet_lead_in(dims, psi_b, fillet_radius)?
    };
    if t_tip - t_start < EPSILON {
        return Err(GeometryInfeasible::ZeroLengthFlank.into());
    }

    let mut flank = Vec::with_capacity(SEGMENTS_PER_FLANK + 1);
    for i in 0..=SEGMENTS_PER_FLANK {
        let t = t_start + (t_tip - t_start) * (i as Real) / (SEGMENTS_PER_FLANK as Real);
        flank.push(flank_point(rb, t, psi_b));
    }
    let right_flank = CurveSegment::Involute { points: flank };

    let first_point = lead_in
        .as_ref()
        .map_or_else(|| right_flank.start_point(), |segment| segment.start_point());
    let gamma = -first_point.y.atan2(first_point.x);
    let root_sweep = dims.array_step - 2.0 * gamma;
    if root_sweep <= EPSILON {
        return Err(GeometryInfeasible::ToothOverlapsPitch {
            tooth_angle: 2.0 * gamma,
            step: dims.array_step,
        }
        .into());
    }

    let tip_arc = CurveSegment::Arc {
        center: Point2::origin(),
        radius: r_tip,
        start_angle: -psi_tip,
        sweep: 2.0 * psi_tip,
    };
    let left_flank = right_flank.mirrored_x().reversed();
    let lead_out = lead_in.as_ref().map(|segment| segment.mirrored_x().reversed());
    let root_arc = CurveSegment::Arc {
        center: Point2::origin(),
        radius: r_root,
        start_angle: gamma,
        sweep: root_sweep,
    };

    let mut segments = Vec::with_capacity(6);
    if let Some(segment) = lead_in {
        segments.push(segment);
    }
    segments.push(right_flank);
    segments.push(tip_arc);
    segments.push(left_flank);
    if let Some(segment) = lead_out {
        segments.push(segment);
    }
    segments.push(root_arc);

    Ok(ToothProfile { segments })
}

/// Root handling when the root circle lies at or above the base circle: a
/// fillet arc tangent to both the involute flank and the root circle. The
/// fillet center sits one fillet radius off the flank along its normal and
/// one fillet radius outside the root circle; with the involute's center of
/// curvature on the base circle this closes to
/// `r_b t = sqrt((r_root + ρ)² − r_b²) − ρ` for the contact parameter, and
/// the flank starts exactly at the contact point.
fn fillet_lead_in(
    dims: &CircularDims,
    psi_b: Real,
    fillet_radius: Real,
) -> Result<(Option<CurveSegment>, Real), GearError> {
    let rb = dims.base_radius;
    let r_root = dims.root_radius;

    if fillet_radius <= EPSILON {
        return Ok((None, unroll_angle_at_radius(r_root, rb)));
    }

    let r_center = r_root + fillet_radius;
    let t_contact = ((r_center * r_center - rb * rb).max(0.0).sqrt() - fillet_radius) / rb;
    let r_start = rb * (1.0 + t_contact * t_contact).sqrt();
    if r_start >= dims.tip_radius - EPSILON {
        return Err(GeometryInfeasible::ZeroLengthFlank.into());
    }

    let contact = flank_point(rb, t_contact, psi_b);
    // The involute's unit normal at t, on the convex (tooth-space) side
    let normal = Rotation2::new(-psi_b) * Vector2::new(t_contact.sin(), -t_contact.cos());
    let center = contact + normal * fillet_radius;

    let tangency = Point2::from(center.coords * (r_root / r_center));
    let start_angle = (tangency.y - center.y).atan2(tangency.x - center.x);
    let end_angle = (contact.y - center.y).atan2(contact.x - center.x);
    let sweep = wrap_angle(end_angle - start_angle);

    let arc = CurveSegment::Arc { center, radius: fillet_radius, start_angle, sweep };
    Ok((Some(arc), t_contact))
}

/// Root handling when the root circle lies below the base circle: trace the
/// trochoid of the generating rack's tip corner (fillet folded in as a
/// parallel offset of the corner-center trochoid), clipped against the root
/// circle, until it hands off to the involute.
fn trochoid_lead_in(
    params: &GearParameters,
    dims: &CircularDims,
    psi_b: Real,
    fillet_radius: Real,
) -> Result<(Option<CurveSegment>, Real), GearError> {
    let rp = dims.pitch_radius;
    let rb = dims.base_radius;
    let alpha = params.pressure_angle();

    let root_depth = rp - dims.root_radius;
    let rho = fillet_radius.min(root_depth);
    let center_depth = root_depth - rho;

    // Rack coordinates of the cutter corner-fillet center, relative to the
    // tooth center: one flank half-thickness out, plus the flank's advance at
    // the center's depth, plus the fillet's own stand-off from the flank.
    let u0 = -(rp * dims.tooth_half_angle + center_depth * alpha.tan() + rho / alpha.cos());
    let t0 = u0 / rp;

    let center_curve = |t: Real| -> (Point2<Real>, Vector2<Real>) {
        let radial = rp - center_depth;
        let tangential = u0 - rp * t;
        let point = Point2::new(
            radial * t.cos() - tangential * t.sin(),
            radial * t.sin() + tangential * t.cos(),
        );
        let tangent = Vector2::new(
            center_depth * t.sin() - tangential * t.cos(),
            -center_depth * t.cos() - tangential * t.sin(),
        );
        (point, tangent)
    };
    let offset_point = |t: Real| -> Point2<Real> {
        let (point, tangent) = center_curve(t);
        let norm = tangent.norm();
        let normal = if norm > EPSILON {
            Vector2::new(-tangent.y, tangent.x) / norm
        } else {
            // Degenerate at the deepest point when the corner is all fillet
            point.coords.normalize()
        };
        point - normal * rho
    };

    let mut points = vec![offset_point(t0)];
    let dt = dims.array_step / TROCHOID_STEP_DIVISOR;
    for step in 1..=MAX_TROCHOID_STEPS {
        let t = t0 - dt * (step as Real);
        let q = offset_point(t);
        let angle = q.y.atan2(q.x);
        if angle >= 0.0 {
            return Err(GeometryInfeasible::UndercutCrossing.into());
        }
        let r = q.coords.norm();
        if r >= dims.tip_radius - EPSILON {
            // The trochoid consumed the whole flank before meeting it
            return Err(GeometryInfeasible::ZeroLengthFlank.into());
        }
        if r >= rb {
            let t_involute = unroll_angle_at_radius(r, rb);
            let involute_angle = -psi_b + involute_polar_angle(t_involute);
            if angle <= involute_angle {
                // Hand-off: close the trochoid on the involute's own start
                // point so the chain is exact and radius stays monotone
                points.push(flank_point(rb, t_involute, psi_b));
                return Ok((Some(CurveSegment::Trochoid { points }), t_involute));
            }
        }
        points.push(q);
    }

    Err(GeometryInfeasible::UndercutCrossing.into())
}

/// Build one rack tooth: a trapezoid of straight flanks at the pressure
/// angle, from the leading root point to where the next tooth begins (one
/// linear pitch away).
pub fn rack_tooth(params: &GearParameters, dims: &RackDims) -> Result<ToothProfile, GearError> {
    let pitch = dims.linear_pitch;
    let half_t = dims.half_thickness;
    let alpha = params.pressure_angle();
    let run_tip = dims.tip_height * alpha.tan();
    let run_root = dims.root_depth * alpha.tan();

    let tip_half_width = half_t - run_tip;
    if tip_half_width <= EPSILON {
        return Err(GeometryInfeasible::PointedTooth { tip_extent: tip_half_width }.into());
    }
    let tooth_span = 2.0 * (half_t + run_root);
    if pitch - tooth_span <= EPSILON {
        return Err(
            GeometryInfeasible::ToothOverlapsPitch { tooth_angle: tooth_span, step: pitch }.into()
        );
    }

    let root_y = -dims.root_depth;
    let tip_y = dims.tip_height;
    let waypoints = [
        Point2::new(-half_t - run_root, root_y),
        Point2::new(-half_t, 0.0),
        Point2::new(-half_t + run_tip, tip_y),
        Point2::new(half_t - run_tip, tip_y),
        Point2::new(half_t, 0.0),
        Point2::new(half_t + run_root, root_y),
        Point2::new(pitch - half_t - run_root, root_y),
    ];
    let segments = waypoints
        .windows(2)
        .map(|pair| CurveSegment::Line { start: pair[0], end: pair[1] })
        .collect();

    Ok(ToothProfile { segments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DerivedGeometry, GearSpec};

    fn circular_fixture(spec: GearSpec) -> (GearParameters, CircularDims) {
        let params = spec.validate().unwrap();
        let derived = DerivedGeometry::derive(&params).unwrap();
        let dims = derived.as_circular().unwrap().clone();
        (params, dims)
    }

    #[test]
    fn involute_starts_on_base_circle() {
        let (x, y) = involute_xy(3.0, 0.0);
        assert!((x - 3.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert_eq!(unroll_angle_at_radius(3.0, 3.0), 0.0);
    }

    #[test]
    fn unroll_angle_matches_closed_form() {
        // r_b √(1+t²) = r_tip  ⇒  t = √((r_tip/r_b)² − 1)
        let t = unroll_angle_at_radius(5.0, 3.0);
        assert!((3.0 * (1.0 + t * t).sqrt() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn large_gear_uses_fillet_arc_root() {
        // z=50 keeps the root circle above the base circle
        let (params, dims) = circular_fixture(GearSpec { teeth: 50, ..GearSpec::default() });
        assert!(dims.root_radius > dims.base_radius);
        let tooth = circular_tooth(&params, &dims).unwrap();
        assert!(tooth.is_contiguous());
        assert!(
            !tooth
                .segments
                .iter()
                .any(|s| matches!(s, CurveSegment::Trochoid { .. }))
        );
        assert!(tooth.segments.iter().any(|s| matches!(s, CurveSegment::Arc { .. })));
    }

    #[test]
    fn fillet_arc_is_tangent_to_flank_and_root_circle() {
        let (params, dims) = circular_fixture(GearSpec { teeth: 50, ..GearSpec::default() });
        let tooth = circular_tooth(&params, &dims).unwrap();
        let (arc_tangent, arc_start) = match &tooth.segments[0] {
            CurveSegment::Arc { start_angle, sweep, .. } => {
                // Direction of travel at the arc's end
                let theta = start_angle + sweep;
                let dir = Vector2::new(-theta.sin(), theta.cos()) * sweep.signum();
                (dir, tooth.segments[0].start_point())
            },
            other => panic!("expected a fillet arc lead-in, got {:?}", other),
        };

        // Root tangency: the arc starts on the root circle
        assert!((arc_start.coords.norm() - dims.root_radius).abs() < 1e-9);

        // Flank tangency: the arc's end tangent matches the involute's
        // start tangent, whose direction at unroll angle t is t − ψ_b
        let psi_b = dims.tooth_half_angle + involute_fn(params.pressure_angle());
        let flank_start = tooth.segments[1].start_point();
        let t = unroll_angle_at_radius(flank_start.coords.norm(), dims.base_radius);
        let flank_tangent = Vector2::new((t - psi_b).cos(), (t - psi_b).sin());
        let kink = arc_tangent.perp(&flank_tangent).atan2(arc_tangent.dot(&flank_tangent));
        assert!(kink.abs() < 1e-9, "tangent break of {} rad at the joint", kink);
    }

    #[test]
    fn small_gear_root_is_trochoidal() {
        // module 2, 8 teeth, 20°: dedendum circle below base circle
        let (params, dims) = circular_fixture(GearSpec {
            module: 2.0,
            teeth: 8,
            pressure_angle: 0.349,
            ..GearSpec::default()
        });
        assert!(dims.root_radius < dims.base_radius);
        let tooth = circular_tooth(&params, &dims).unwrap();
        assert!(tooth.is_contiguous());
        let trochoids = tooth
            .segments
            .iter()
            .filter(|s| matches!(s, CurveSegment::Trochoid { .. }))
            .count();
        assert_eq!(trochoids, 2);
    }

    #[test]
    fn trochoid_root_lands_on_root_circle() {
        let (params, dims) = circular_fixture(GearSpec {
            module: 2.0,
            teeth: 8,
            pressure_angle: 0.349,
            ..GearSpec::default()
        });
        let tooth = circular_tooth(&params, &dims).unwrap();
        let first = tooth.start_point();
        assert!((first.coords.norm() - dims.root_radius).abs() < 1e-9);
    }

    #[test]
    fn pointed_tooth_is_rejected() {
        // teeth=3, 30°, addendum 1.25: flanks cross before the tip circle
        let (params, dims) = circular_fixture(GearSpec {
            teeth: 3,
            pressure_angle: 0.524,
            addendum: 1.25,
            ..GearSpec::default()
        });
        match circular_tooth(&params, &dims) {
            Err(GearError::Infeasible(GeometryInfeasible::PointedTooth { .. })) => {},
            other => panic!("expected PointedTooth, got {:?}", other),
        }
    }

    #[test]
    fn tooth_spans_exactly_one_pitch() {
        let (params, dims) = circular_fixture(GearSpec::default());
        let tooth = circular_tooth(&params, &dims).unwrap();
        let start = tooth.start_point();
        let end = tooth.end_point();
        let start_angle = start.y.atan2(start.x);
        let end_angle = end.y.atan2(end.x);
        assert!((end_angle - start_angle - dims.angular_pitch).abs() < 1e-9);
        assert!((start.coords.norm() - end.coords.norm()).abs() < 1e-9);
    }

    #[test]
    fn flanks_mirror_exactly() {
        let (params, dims) = circular_fixture(GearSpec::default());
        let tooth = circular_tooth(&params, &dims).unwrap();
        let flanks: Vec<&CurveSegment> = tooth
            .segments
            .iter()
            .filter(|s| matches!(s, CurveSegment::Involute { .. }))
            .collect();
        assert_eq!(flanks.len(), 2);
        if let (CurveSegment::Involute { points: right }, CurveSegment::Involute { points: left }) =
            (flanks[0], flanks[1])
        {
            for (r, l) in right.iter().zip(left.iter().rev()) {
                assert!((r.x - l.x).abs() < 1e-12);
                assert!((r.y + l.y).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn rack_tooth_repeats_at_linear_pitch() {
        use crate::params::GearKind;
        let spec = GearSpec {
            module: 2.0,
            kind: GearKind::Rack { length: 50.0 },
            ..GearSpec::default()
        };
        let params = spec.validate().unwrap();
        let derived = DerivedGeometry::derive(&params).unwrap();
        let dims = derived.as_rack().unwrap().clone();
        let tooth = rack_tooth(&params, &dims).unwrap();
        assert!(tooth.is_contiguous());
        let span = tooth.end_point().x - tooth.start_point().x;
        assert!((span - PI * 2.0).abs() < 1e-12);
        assert_eq!(tooth.end_point().y, tooth.start_point().y);
    }

    #[test]
    fn oversized_rack_addendum_makes_a_pointed_tooth() {
        use crate::params::GearKind;
        // addendum 2.2 at 20°: the flanks meet below the tip line
        let spec = GearSpec {
            addendum: 2.2,
            kind: GearKind::Rack { length: 20.0 },
            ..GearSpec::default()
        };
        let params = spec.validate().unwrap();
        let derived = DerivedGeometry::derive(&params).unwrap();
        let dims = derived.as_rack().unwrap().clone();
        match rack_tooth(&params, &dims) {
            Err(GearError::Infeasible(GeometryInfeasible::PointedTooth { tip_extent })) => {
                assert!(tip_extent <= 0.0);
            },
            other => panic!("expected PointedTooth, got {:?}", other),
        }
    }
}
