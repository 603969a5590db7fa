//! Validation and generation errors

use crate::float_types::Real;
use std::fmt::Display;

/// All the ways a raw parameter set can be rejected before any geometry is built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (ModuleNotPositive) Module must be > 0
    ModuleNotPositive(Real),
    /// (TooFewTeeth) Tooth count below the minimum for this gear kind
    TooFewTeeth { teeth: u32, min: u32 },
    /// (PressureAngleOutOfRange) Pressure angle must lie strictly between 0 and π/2
    PressureAngleOutOfRange(Real),
    /// (HelixAngleOutOfRange) Helix angle must lie strictly between −π/2 and π/2
    HelixAngleOutOfRange(Real),
    /// (FaceWidthNotPositive) Face width must be > 0
    FaceWidthNotPositive(Real),
    /// (AddendumNotPositive) Addendum coefficient must be > 0
    AddendumNotPositive(Real),
    /// (DedendumNotPositive) Dedendum coefficient must be > 0
    DedendumNotPositive(Real),
    /// (RootFilletNegative) Root fillet coefficient must be ≥ 0
    RootFilletNegative(Real),
    /// (BacklashOutOfRange) Backlash must be ≥ 0 and under half the circular pitch
    BacklashOutOfRange { backlash: Real, limit: Real },
    /// (InternalToothMargin) Internal gear needs more teeth than the mating pinion allows
    InternalToothMargin { teeth: u32, required: u32 },
    /// (RackLengthNotPositive) Rack face length must be > 0
    RackLengthNotPositive(Real),
    /// (WormStartsOutOfRange) Worm start count must satisfy 1 ≤ starts ≤ teeth
    WormStartsOutOfRange { starts: u32, teeth: u32 },
    /// (HerringboneNeedsHelix) Herringbone requires a nonzero helix angle
    HerringboneNeedsHelix,
    /// (IncompatibleSweep) The gear kind does not admit the requested sweep mode
    IncompatibleSweep { kind: &'static str, reason: &'static str },
    /// (NonFinite) A parameter holds a NaN or infinite value
    NonFinite(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ModuleNotPositive(m) => {
                write!(f, "(ModuleNotPositive) Module must be > 0, got: {}", m)
            },
            ValidationError::TooFewTeeth { teeth, min } => {
                write!(f, "(TooFewTeeth) Need at least {} teeth, got: {}", min, teeth)
            },
            ValidationError::PressureAngleOutOfRange(a) => write!(
                f,
                "(PressureAngleOutOfRange) Pressure angle must lie strictly between 0 and π/2 rad, got: {}",
                a
            ),
            ValidationError::HelixAngleOutOfRange(a) => write!(
                f,
                "(HelixAngleOutOfRange) Helix angle must lie strictly between -π/2 and π/2 rad, got: {}",
                a
            ),
            ValidationError::FaceWidthNotPositive(w) => {
                write!(f, "(FaceWidthNotPositive) Face width must be > 0, got: {}", w)
            },
            ValidationError::AddendumNotPositive(a) => {
                write!(f, "(AddendumNotPositive) Addendum coefficient must be > 0, got: {}", a)
            },
            ValidationError::DedendumNotPositive(d) => {
                write!(f, "(DedendumNotPositive) Dedendum coefficient must be > 0, got: {}", d)
            },
            ValidationError::RootFilletNegative(r) => {
                write!(f, "(RootFilletNegative) Root fillet coefficient must be ≥ 0, got: {}", r)
            },
            ValidationError::BacklashOutOfRange { backlash, limit } => write!(
                f,
                "(BacklashOutOfRange) Backlash must be ≥ 0 and below {}, got: {}",
                limit, backlash
            ),
            ValidationError::InternalToothMargin { teeth, required } => write!(
                f,
                "(InternalToothMargin) Internal gear needs at least {} teeth to clear its mating pinion, got: {}",
                required, teeth
            ),
            ValidationError::RackLengthNotPositive(l) => {
                write!(f, "(RackLengthNotPositive) Rack face length must be > 0, got: {}", l)
            },
            ValidationError::WormStartsOutOfRange { starts, teeth } => write!(
                f,
                "(WormStartsOutOfRange) Worm start count must satisfy 1 ≤ starts ≤ teeth ({}), got: {}",
                teeth, starts
            ),
            ValidationError::HerringboneNeedsHelix => {
                write!(f, "(HerringboneNeedsHelix) Herringbone requires a nonzero helix angle")
            },
            ValidationError::IncompatibleSweep { kind, reason } => {
                write!(f, "(IncompatibleSweep) {} gear: {}", kind, reason)
            },
            ValidationError::NonFinite(field) => {
                write!(f, "(NonFinite) The parameter `{}` holds a NaN or infinite value", field)
            },
        }
    }
}

/// A parameter set that passed validation but still yields a degenerate or
/// self-intersecting tooth
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryInfeasible {
    /// (TipBelowRoot) Derived tip radius fell at or below the derived root radius
    TipBelowRoot { tip: Real, root: Real },
    /// (PointedTooth) The two flanks cross before reaching the tip. Carries
    /// the signed half-extent remaining at the tip: an angle for circular
    /// gears, a width for racks
    PointedTooth { tip_extent: Real },
    /// (UndercutCrossing) The undercut trochoids of the two flanks cross before
    /// reaching the root circle
    UndercutCrossing,
    /// (ZeroLengthFlank) The involute flank has no radial extent
    ZeroLengthFlank,
    /// (ToothOverlapsPitch) A single tooth is wider than the angular pitch
    ToothOverlapsPitch { tooth_angle: Real, step: Real },
}

impl Display for GeometryInfeasible {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryInfeasible::TipBelowRoot { tip, root } => write!(
                f,
                "(TipBelowRoot) Tip radius {} fell at or below root radius {} — reduce dedendum or profile shift",
                tip, root
            ),
            GeometryInfeasible::PointedTooth { tip_extent } => write!(
                f,
                "(PointedTooth) Flanks cross before reaching the tip (half-extent left at the tip: {}) — reduce pressure angle or addendum, or add teeth",
                tip_extent
            ),
            GeometryInfeasible::UndercutCrossing => write!(
                f,
                "(UndercutCrossing) Undercut trochoids cross the tooth centreline — reduce pressure angle or increase tooth count"
            ),
            GeometryInfeasible::ZeroLengthFlank => {
                write!(f, "(ZeroLengthFlank) The involute flank has no radial extent")
            },
            GeometryInfeasible::ToothOverlapsPitch { tooth_angle, step } => write!(
                f,
                "(ToothOverlapsPitch) Tooth spans {} rad but the array step is only {} rad",
                tooth_angle, step
            ),
        }
    }
}

/// A sweep path that cannot be constructed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathInfeasible {
    /// (DegenerateLead) The computed lead is non-finite or vanishing
    DegenerateLead { lead: Real },
    /// (FaceWidthNotPositive) The face width is non-positive
    FaceWidthNotPositive(Real),
}

impl Display for PathInfeasible {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathInfeasible::DegenerateLead { lead } => write!(
                f,
                "(DegenerateLead) Computed lead {} is non-finite or vanishing — helix angle too close to ±π/2",
                lead
            ),
            PathInfeasible::FaceWidthNotPositive(w) => {
                write!(f, "(FaceWidthNotPositive) Face width must be > 0, got: {}", w)
            },
        }
    }
}

/// Any failure a generation request can end in. Components fail fast and the
/// first error propagates up the call chain; no partial assembly is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GearError {
    /// Malformed or out-of-range input parameters
    Validation(#[from] ValidationError),
    /// Degenerate or self-intersecting tooth geometry
    Infeasible(#[from] GeometryInfeasible),
    /// Internal tiling invariant violated — a defect, not a user-correctable condition
    ArrayInconsistency { tooth: usize, detail: &'static str },
    /// Sweep path cannot be constructed
    Path(#[from] PathInfeasible),
}

impl Display for GearError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GearError::Validation(e) => e.fmt(f),
            GearError::Infeasible(e) => e.fmt(f),
            GearError::ArrayInconsistency { tooth, detail } => write!(
                f,
                "(ArrayInconsistency) Profile array broke at tooth {}: {} — this is a gearkit defect, please report it",
                tooth, detail
            ),
            GearError::Path(e) => e.fmt(f),
        }
    }
}
