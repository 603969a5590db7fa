//! Gear parameter model: raw input ([`GearSpec`]), validated parameters
//! ([`GearParameters`]) and derived quantities ([`DerivedGeometry`]).
//!
//! Validation enforces every invariant up front so the geometry stages never
//! see a malformed parameter set; derivation is a pure function of the
//! validated parameters with a single defensive failure mode (a tip radius
//! falling at or below the root radius).

use crate::errors::{GearError, GeometryInfeasible, ValidationError};
use crate::float_types::{EPSILON, FRAC_PI_2, PI, Real, TAU};
use crate::variant::VariantPolicy;
use nalgebra::Isometry3;

/// Minimum tooth count for a closed, non-self-intersecting circular profile.
pub const MIN_CIRCULAR_TEETH: u32 = 3;

/// Required surplus of an internal gear's tooth count over its notional
/// mating pinion. Smaller differences produce modeled tip interference.
pub const INTERNAL_TOOTH_DIFFERENCE: u32 = 8;

/// Conservative floor applied when no mating tooth count is supplied for an
/// internal gear.
pub const INTERNAL_TOOTH_FLOOR: u32 = 16;

/// Gear type variant plus its variant-specific quantities.
#[derive(Debug, Clone, PartialEq)]
pub enum GearKind {
    External,
    /// Ring gear; teeth point toward the axis. `mating_teeth` is the tooth
    /// count of the pinion it is modeled against, when known.
    Internal { mating_teeth: Option<u32> },
    /// Straight rack covering `length` along its travel axis.
    Rack { length: Real },
    /// Worm thread with the given number of starts.
    Worm { starts: u32 },
}

impl GearKind {
    pub const fn name(&self) -> &'static str {
        match self {
            GearKind::External => "external",
            GearKind::Internal { .. } => "internal",
            GearKind::Rack { .. } => "rack",
            GearKind::Worm { .. } => "worm",
        }
    }

    /// Racks are the only non-circular kind.
    pub const fn is_circular(&self) -> bool {
        !matches!(self, GearKind::Rack { .. })
    }
}

/// Raw, unvalidated gear parameters as supplied by the host command layer.
///
/// Angles are radians. Linear quantities share one unit (conventionally mm);
/// `addendum`, `dedendum`, `root_fillet` and `profile_shift` are coefficients
/// relative to the module. `backlash` is arc length at the pitch circle.
#[derive(Debug, Clone, PartialEq)]
pub struct GearSpec {
    pub module: Real,
    pub teeth: u32,
    pub pressure_angle: Real,
    /// 0 = straight-cut; the sign selects the hand.
    pub helix_angle: Real,
    pub face_width: Real,
    pub addendum: Real,
    pub dedendum: Real,
    pub root_fillet: Real,
    pub backlash: Real,
    pub profile_shift: Real,
    pub herringbone: bool,
    pub kind: GearKind,
    /// Consumed only by the output stage; never affects the 2D geometry.
    pub placement: Isometry3<Real>,
}

impl Default for GearSpec {
    fn default() -> Self {
        Self {
            module: 1.0,
            teeth: 20,
            pressure_angle: (20.0 as Real).to_radians(),
            helix_angle: 0.0,
            face_width: 10.0,
            addendum: 1.0,
            dedendum: 1.25,
            root_fillet: 0.38,
            backlash: 0.0,
            profile_shift: 0.0,
            herringbone: false,
            kind: GearKind::External,
            placement: Isometry3::identity(),
        }
    }
}

impl GearSpec {
    /// Check every invariant and promote to [`GearParameters`].
    ///
    /// Fails fast with the first violated invariant; no geometry is built
    /// before validation succeeds.
    pub fn validate(self) -> Result<GearParameters, ValidationError> {
        for (value, field) in [
            (self.module, "module"),
            (self.pressure_angle, "pressure_angle"),
            (self.helix_angle, "helix_angle"),
            (self.face_width, "face_width"),
            (self.addendum, "addendum"),
            (self.dedendum, "dedendum"),
            (self.root_fillet, "root_fillet"),
            (self.backlash, "backlash"),
            (self.profile_shift, "profile_shift"),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite(field));
            }
        }

        if self.module <= 0.0 {
            return Err(ValidationError::ModuleNotPositive(self.module));
        }

        let min_teeth = if self.kind.is_circular() { MIN_CIRCULAR_TEETH } else { 1 };
        if self.teeth < min_teeth {
            return Err(ValidationError::TooFewTeeth { teeth: self.teeth, min: min_teeth });
        }

        match self.kind {
            GearKind::Internal { mating_teeth } => {
                let required = match mating_teeth {
                    Some(pinion) => pinion.saturating_add(INTERNAL_TOOTH_DIFFERENCE),
                    None => INTERNAL_TOOTH_FLOOR,
                };
                if self.teeth < required {
                    return Err(ValidationError::InternalToothMargin {
                        teeth: self.teeth,
                        required,
                    });
                }
            },
            GearKind::Rack { length } => {
                if !length.is_finite() {
                    return Err(ValidationError::NonFinite("length"));
                }
                if length <= 0.0 {
                    return Err(ValidationError::RackLengthNotPositive(length));
                }
            },
            GearKind::Worm { starts } => {
                if starts < 1 || starts > self.teeth {
                    return Err(ValidationError::WormStartsOutOfRange {
                        starts,
                        teeth: self.teeth,
                    });
                }
            },
            GearKind::External => {},
        }

        if self.pressure_angle <= 0.0 || self.pressure_angle >= FRAC_PI_2 {
            return Err(ValidationError::PressureAngleOutOfRange(self.pressure_angle));
        }
        if self.helix_angle <= -FRAC_PI_2 || self.helix_angle >= FRAC_PI_2 {
            return Err(ValidationError::HelixAngleOutOfRange(self.helix_angle));
        }
        if self.face_width <= 0.0 {
            return Err(ValidationError::FaceWidthNotPositive(self.face_width));
        }
        if self.addendum <= 0.0 {
            return Err(ValidationError::AddendumNotPositive(self.addendum));
        }
        if self.dedendum <= 0.0 {
            return Err(ValidationError::DedendumNotPositive(self.dedendum));
        }
        if self.root_fillet < 0.0 {
            return Err(ValidationError::RootFilletNegative(self.root_fillet));
        }

        // The backlash is split between both flanks; past half the circular
        // pitch the tooth thins away entirely.
        let backlash_limit = PI * self.module / 2.0;
        if self.backlash < 0.0 || self.backlash >= backlash_limit {
            return Err(ValidationError::BacklashOutOfRange {
                backlash: self.backlash,
                limit: backlash_limit,
            });
        }

        if self.herringbone {
            let policy = VariantPolicy::for_kind(&self.kind);
            if !policy.allows_herringbone {
                return Err(ValidationError::IncompatibleSweep {
                    kind: self.kind.name(),
                    reason: "herringbone needs a rotational helix, which this kind lacks",
                });
            }
            if self.helix_angle == 0.0 {
                return Err(ValidationError::HerringboneNeedsHelix);
            }
        }

        Ok(GearParameters { spec: self })
    }
}

/// A validated, immutable parameter set. Obtainable only through
/// [`GearSpec::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GearParameters {
    spec: GearSpec,
}

impl GearParameters {
    pub fn module(&self) -> Real {
        self.spec.module
    }

    pub fn teeth(&self) -> u32 {
        self.spec.teeth
    }

    pub fn pressure_angle(&self) -> Real {
        self.spec.pressure_angle
    }

    pub fn helix_angle(&self) -> Real {
        self.spec.helix_angle
    }

    pub fn face_width(&self) -> Real {
        self.spec.face_width
    }

    pub fn addendum(&self) -> Real {
        self.spec.addendum
    }

    pub fn dedendum(&self) -> Real {
        self.spec.dedendum
    }

    pub fn root_fillet(&self) -> Real {
        self.spec.root_fillet
    }

    pub fn backlash(&self) -> Real {
        self.spec.backlash
    }

    pub fn profile_shift(&self) -> Real {
        self.spec.profile_shift
    }

    pub fn herringbone(&self) -> bool {
        self.spec.herringbone
    }

    pub fn kind(&self) -> &GearKind {
        &self.spec.kind
    }

    pub fn placement(&self) -> &Isometry3<Real> {
        &self.spec.placement
    }
}

/// Derived tooth dimensions for circular kinds (external, internal, worm).
#[derive(Debug, Clone, PartialEq)]
pub struct CircularDims {
    pub pitch_radius: Real,
    pub base_radius: Real,
    pub tip_radius: Real,
    pub root_radius: Real,
    /// 2π / teeth.
    pub angular_pitch: Real,
    /// Angular spacing of arrayed tooth copies: the angular pitch, except for
    /// worms where one copy per start is placed at 2π / starts.
    pub array_step: Real,
    /// Half the angular tooth thickness at the pitch circle, with profile
    /// shift and backlash applied.
    pub tooth_half_angle: Real,
    /// Equivalent spur tooth count `z / cos³β` of a helical gear.
    pub virtual_teeth: Real,
    /// Helix angle the sweep actually uses. Equal to the input helix angle
    /// except for worms, whose lead angle is recomputed from module, pitch
    /// diameter and start count.
    pub lead_angle: Real,
}

impl CircularDims {
    /// Classic undercut-severity diagnostic: true when the equivalent spur
    /// gear falls below the critical tooth count `2 / sin²α`. A helix angle
    /// raises the virtual tooth count and can clear a spur gear's risk.
    pub fn undercut_prone(&self, pressure_angle: Real) -> bool {
        self.virtual_teeth < 2.0 / pressure_angle.sin().powi(2)
    }
}

/// Derived tooth dimensions for racks. Heights are relative to the pitch
/// line; the tooth repeats every `linear_pitch` along the travel axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RackDims {
    /// π · module.
    pub linear_pitch: Real,
    pub tip_height: Real,
    pub root_depth: Real,
    /// Half the tooth thickness at the pitch line, backlash applied.
    pub half_thickness: Real,
}

/// Derived geometry: a pure function of [`GearParameters`], recomputed per
/// request and never hand-edited.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivedGeometry {
    Circular(CircularDims),
    Rack(RackDims),
}

impl DerivedGeometry {
    pub fn derive(params: &GearParameters) -> Result<Self, GearError> {
        let m = params.module();
        match params.kind() {
            GearKind::Rack { .. } => {
                let tip_height = (params.addendum() + params.profile_shift()) * m;
                let root_depth = (params.dedendum() - params.profile_shift()) * m;
                if tip_height <= EPSILON || root_depth <= EPSILON {
                    return Err(GeometryInfeasible::TipBelowRoot {
                        tip: tip_height,
                        root: -root_depth,
                    }
                    .into());
                }
                Ok(DerivedGeometry::Rack(RackDims {
                    linear_pitch: PI * m,
                    tip_height,
                    root_depth,
                    half_thickness: (PI * m / 2.0 - params.backlash()) / 2.0,
                }))
            },
            kind => {
                let policy = VariantPolicy::for_kind(kind);
                let z = params.teeth() as Real;
                // Internal gears generate the mating pinion's tooth space:
                // addendum/dedendum swap roles, the shift reverses sign and
                // backlash widens rather than narrows the generated tooth.
                let (tip_coeff, root_coeff, shift, backlash_sign) = if policy.invert_heights {
                    (params.dedendum(), params.addendum(), -params.profile_shift(), 1.0)
                } else {
                    (params.addendum(), params.dedendum(), params.profile_shift(), -1.0)
                };

                let pitch_radius = 0.5 * m * z;
                let base_radius = pitch_radius * params.pressure_angle().cos();
                let tip_radius = pitch_radius + (tip_coeff + shift) * m;
                let root_radius = pitch_radius - (root_coeff - shift) * m;
                if tip_radius <= root_radius + EPSILON || root_radius <= EPSILON {
                    return Err(GeometryInfeasible::TipBelowRoot {
                        tip: tip_radius,
                        root: root_radius,
                    }
                    .into());
                }

                let angular_pitch = TAU / z;
                let array_step = match kind {
                    GearKind::Worm { starts } => TAU / (*starts as Real),
                    _ => angular_pitch,
                };
                let tooth_half_angle = (FRAC_PI_2
                    + 2.0 * shift * params.pressure_angle().tan()
                    + backlash_sign * params.backlash() / m)
                    / z;

                let lead_angle = match kind {
                    GearKind::Worm { starts } => {
                        let magnitude = ((*starts as Real) / z).atan();
                        if params.helix_angle() < 0.0 { -magnitude } else { magnitude }
                    },
                    _ => params.helix_angle(),
                };

                Ok(DerivedGeometry::Circular(CircularDims {
                    pitch_radius,
                    base_radius,
                    tip_radius,
                    root_radius,
                    angular_pitch,
                    array_step,
                    tooth_half_angle,
                    virtual_teeth: z / params.helix_angle().cos().powi(3),
                    lead_angle,
                }))
            },
        }
    }

    pub fn as_circular(&self) -> Option<&CircularDims> {
        match self {
            DerivedGeometry::Circular(dims) => Some(dims),
            DerivedGeometry::Rack(_) => None,
        }
    }

    pub fn as_rack(&self) -> Option<&RackDims> {
        match self {
            DerivedGeometry::Rack(dims) => Some(dims),
            DerivedGeometry::Circular(_) => None,
        }
    }
}
