//! Sweep path generation: the 3D space curve the gear profile travels along
//! to form a solid.
//!
//! The path kind is chosen deterministically from the gear kind and helix
//! angle. Herringbone paths are two opposite-hand helical halves joined at
//! the mid-plane; the tangent discontinuity at the join is the manufacturing
//! reality of two opposite-hand flanks meeting at a ridge and must not be
//! smoothed away.

use crate::errors::{GearError, PathInfeasible};
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::params::{DerivedGeometry, GearKind, GearParameters};
use nalgebra::Point3;

/// Hand of a helical thread, viewed along +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    pub const fn opposite(self) -> Self {
        match self {
            Hand::Right => Hand::Left,
            Hand::Left => Hand::Right,
        }
    }

    const fn from_angle(angle: Real) -> Self {
        if angle < 0.0 { Hand::Left } else { Hand::Right }
    }
}

/// One helical segment: radius of the carrier cylinder, axial advance per
/// full turn, axial length, and hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    pub radius: Real,
    pub lead: Real,
    pub length: Real,
    pub hand: Hand,
}

impl Helix {
    /// Point at normalized parameter `u ∈ [0, 1]`, measured from the
    /// segment's own start plane.
    pub fn point_at(&self, u: Real) -> Point3<Real> {
        let z = u * self.length;
        let turn = TAU * z / self.lead;
        let theta = match self.hand {
            Hand::Right => turn,
            Hand::Left => -turn,
        };
        Point3::new(self.radius * theta.cos(), self.radius * theta.sin(), z)
    }

    /// Signed twist of the profile over the segment's full length.
    pub fn twist_angle(&self) -> Real {
        let turn = TAU * self.length / self.lead;
        match self.hand {
            Hand::Right => turn,
            Hand::Left => -turn,
        }
    }
}

/// The sweep path variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepPath {
    /// Axis-aligned line segment; `skew` carries a rack's helix angle as a
    /// lateral shear of the extrusion, 0 for straight-cut gears.
    Straight { length: Real, skew: Real },
    /// One continuous helix over the face width.
    Helical(Helix),
    /// Two opposite-hand halves of half the face width each, joined at the
    /// mid-plane. The join is an intentional tangent discontinuity.
    Herringbone { lower: Helix, upper: Helix },
    /// Helix whose lead comes from the worm's start count, not a free helix
    /// angle.
    WormHelical(Helix),
}

impl SweepPath {
    /// Choose and construct the path for a validated parameter set.
    pub fn build(
        params: &GearParameters,
        derived: &DerivedGeometry,
    ) -> Result<SweepPath, GearError> {
        let width = params.face_width();
        if width <= 0.0 {
            // Validation rejects this first; kept as a defensive check
            return Err(PathInfeasible::FaceWidthNotPositive(width).into());
        }

        match params.kind() {
            GearKind::Rack { .. } => {
                // A rack has no rotational helix, only a skew of the
                // extrusion direction
                Ok(SweepPath::Straight { length: width, skew: params.helix_angle() })
            },
            GearKind::Worm { starts } => {
                let dims = derived
                    .as_circular()
                    .expect("worm gears carry circular derived geometry");
                let lead = PI * params.module() * (*starts as Real);
                if !lead.is_finite() || lead <= EPSILON {
                    return Err(PathInfeasible::DegenerateLead { lead }.into());
                }
                Ok(SweepPath::WormHelical(Helix {
                    radius: dims.pitch_radius,
                    lead,
                    length: width,
                    hand: Hand::from_angle(params.helix_angle()),
                }))
            },
            GearKind::External | GearKind::Internal { .. } => {
                let helix = params.helix_angle();
                if helix == 0.0 {
                    return Ok(SweepPath::Straight { length: width, skew: 0.0 });
                }
                let dims = derived
                    .as_circular()
                    .expect("circular gear kinds carry circular derived geometry");
                let lead = TAU * dims.pitch_radius / helix.abs().tan();
                if !lead.is_finite() || lead <= EPSILON {
                    return Err(PathInfeasible::DegenerateLead { lead }.into());
                }
                let hand = Hand::from_angle(helix);
                if params.herringbone() {
                    let half = |hand| Helix {
                        radius: dims.pitch_radius,
                        lead,
                        length: width / 2.0,
                        hand,
                    };
                    Ok(SweepPath::Herringbone {
                        lower: half(hand.opposite()),
                        upper: half(hand),
                    })
                } else {
                    Ok(SweepPath::Helical(Helix {
                        radius: dims.pitch_radius,
                        lead,
                        length: width,
                        hand,
                    }))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GearSpec;

    fn build(spec: GearSpec) -> Result<SweepPath, GearError> {
        let params = spec.validate().unwrap();
        let derived = DerivedGeometry::derive(&params).unwrap();
        SweepPath::build(&params, &derived)
    }

    #[test]
    fn zero_helix_gives_straight_path_of_face_width() {
        let path = build(GearSpec { face_width: 7.5, ..GearSpec::default() }).unwrap();
        assert_eq!(path, SweepPath::Straight { length: 7.5, skew: 0.0 });
    }

    #[test]
    fn helical_lead_matches_closed_form() {
        let helix_angle: Real = 0.3;
        let path = build(GearSpec {
            module: 2.0,
            teeth: 20,
            helix_angle,
            ..GearSpec::default()
        })
        .unwrap();
        match path {
            SweepPath::Helical(helix) => {
                // lead = 2π · r_pitch / tan(β), r_pitch = 20
                assert!((helix.lead - TAU * 20.0 / helix_angle.tan()).abs() < 1e-9);
                assert_eq!(helix.hand, Hand::Right);
            },
            other => panic!("expected helical path, got {:?}", other),
        }
    }

    #[test]
    fn negative_helix_is_left_handed() {
        let path = build(GearSpec { helix_angle: -0.3, ..GearSpec::default() }).unwrap();
        match path {
            SweepPath::Helical(helix) => assert_eq!(helix.hand, Hand::Left),
            other => panic!("expected helical path, got {:?}", other),
        }
    }

    #[test]
    fn herringbone_halves_mirror_about_mid_plane() {
        let path = build(GearSpec {
            helix_angle: 0.4,
            herringbone: true,
            face_width: 12.0,
            ..GearSpec::default()
        })
        .unwrap();
        match path {
            SweepPath::Herringbone { lower, upper } => {
                assert_eq!(lower.lead, upper.lead);
                assert_eq!(lower.length, 6.0);
                assert_eq!(upper.length, 6.0);
                assert_eq!(lower.hand, upper.hand.opposite());
                // Equal twist magnitude, opposite sign
                assert!((lower.twist_angle() + upper.twist_angle()).abs() < 1e-12);
            },
            other => panic!("expected herringbone path, got {:?}", other),
        }
    }

    #[test]
    fn worm_lead_is_starts_times_axial_pitch() {
        use crate::params::GearKind;
        let path = build(GearSpec {
            module: 2.0,
            teeth: 10,
            kind: GearKind::Worm { starts: 3 },
            ..GearSpec::default()
        })
        .unwrap();
        match path {
            SweepPath::WormHelical(helix) => {
                assert!((helix.lead - 3.0 * PI * 2.0).abs() < 1e-12);
                assert_eq!(helix.hand, Hand::Right);
            },
            other => panic!("expected worm path, got {:?}", other),
        }
    }

    #[test]
    fn near_degenerate_helix_fails_as_path_infeasible() {
        // Just inside the validation bound, but the lead collapses
        let helix_angle = crate::float_types::FRAC_PI_2 - 1e-13;
        match build(GearSpec { helix_angle, ..GearSpec::default() }) {
            Err(GearError::Path(PathInfeasible::DegenerateLead { .. })) => {},
            other => panic!("expected DegenerateLead, got {:?}", other),
        }
    }

    #[test]
    fn helix_point_advances_by_lead_per_turn() {
        let helix = Helix { radius: 10.0, lead: 30.0, length: 30.0, hand: Hand::Right };
        let start = helix.point_at(0.0);
        let end = helix.point_at(1.0);
        // One full turn: same x/y, z advanced by the lead
        assert!((start.x - end.x).abs() < 1e-9);
        assert!((start.y - end.y).abs() < 1e-9);
        assert!((end.z - 30.0).abs() < 1e-12);
    }
}
