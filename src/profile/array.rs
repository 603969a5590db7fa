//! Profile arrayer: replicate the canonical tooth into the full boundary.
//!
//! Replication is an index-parametrized transform of one canonical
//! [`ToothProfile`], never independently mutated copies. Circular kinds
//! rotate the tooth about the gear axis and close the loop; racks translate
//! it along the pitch line and stay open.

use crate::errors::GearError;
use crate::float_types::{Real, tolerance};
use crate::params::{DerivedGeometry, GearKind, GearParameters};
use crate::profile::{GearProfile, ToothProfile};
use crate::variant::{ArrayMode, VariantPolicy};
use nalgebra::Vector2;

/// Assemble the full gear boundary from one canonical tooth.
pub fn array(
    tooth: &ToothProfile,
    params: &GearParameters,
    derived: &DerivedGeometry,
) -> Result<GearProfile, GearError> {
    let policy = VariantPolicy::for_kind(params.kind());
    match policy.array_mode {
        ArrayMode::Angular => {
            let dims = derived
                .as_circular()
                .expect("angular array mode implies circular derived geometry");
            let copies = match params.kind() {
                GearKind::Worm { starts } => *starts,
                _ => params.teeth(),
            };
            angular(tooth, copies, dims.array_step, policy)
        },
        ArrayMode::Linear => {
            let dims = derived
                .as_rack()
                .expect("linear array mode implies rack derived geometry");
            let length = match params.kind() {
                GearKind::Rack { length } => *length,
                _ => unreachable!("linear array mode is rack-only"),
            };
            linear(tooth, length, dims.linear_pitch, policy)
        },
    }
}

fn angular(
    tooth: &ToothProfile,
    copies: u32,
    step: Real,
    policy: VariantPolicy,
) -> Result<GearProfile, GearError> {
    let mut segments = Vec::with_capacity(tooth.segments.len() * copies as usize);
    for index in 0..copies {
        let rotation = step * index as Real;
        let first = tooth.segments[0].rotated(rotation);
        if let Some(previous) = segments.last() {
            check_joint(previous, &first, index as usize)?;
        }
        segments.push(first);
        segments.extend(tooth.segments[1..].iter().map(|s| s.rotated(rotation)));
    }

    // Loop closure: the last root arc must land back on the first point
    let gap = (segments[segments.len() - 1].end_point() - segments[0].start_point()).norm();
    if gap > tolerance() {
        return Err(GearError::ArrayInconsistency {
            tooth: copies as usize,
            detail: "closing the loop left a gap at the first tooth",
        });
    }

    let mut profile = GearProfile { segments, closed: true, orientation: policy.orientation };
    if policy.orientation != crate::variant::Orientation::Ccw {
        // Internal gears: material lies outside the loop, so the boundary
        // winds the other way
        profile.segments = profile.segments.iter().rev().map(|s| s.reversed()).collect();
    }
    Ok(profile)
}

fn linear(
    tooth: &ToothProfile,
    length: Real,
    pitch: Real,
    policy: VariantPolicy,
) -> Result<GearProfile, GearError> {
    // Enough whole pitches to cover the requested face length
    let copies = (length / pitch).ceil().max(1.0) as u32;
    let mut segments = Vec::with_capacity(tooth.segments.len() * copies as usize);
    for index in 0..copies {
        let delta = Vector2::new(pitch * index as Real, 0.0);
        let first = tooth.segments[0].translated(delta);
        if let Some(previous) = segments.last() {
            check_joint(previous, &first, index as usize)?;
        }
        segments.push(first);
        segments.extend(tooth.segments[1..].iter().map(|s| s.translated(delta)));
    }
    Ok(GearProfile { segments, closed: false, orientation: policy.orientation })
}

fn check_joint(
    previous: &crate::profile::CurveSegment,
    next: &crate::profile::CurveSegment,
    tooth: usize,
) -> Result<(), GearError> {
    let gap = (previous.end_point() - next.start_point()).norm();
    if gap > tolerance() {
        return Err(GearError::ArrayInconsistency {
            tooth,
            detail: "adjacent tooth copies do not tile without gap or overlap",
        });
    }
    Ok(())
}
