//! Per-gear-kind generation policies.
//!
//! A [`VariantPolicy`] is a small table that tells the rest of the pipeline
//! how a gear kind reparametrizes the shared machinery: whether addendum and
//! dedendum swap roles (internal gears grow their teeth toward the axis),
//! whether the arrayer runs in angular or linear mode, the winding of the
//! finished boundary, and which sweep modes are legal. Illegal combinations
//! are rejected at the validation boundary, never deeper in the pipeline.

use crate::params::GearKind;

/// How the single-tooth profile is replicated into a full boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayMode {
    /// Rotate copies about the gear axis (external, internal, worm).
    Angular,
    /// Translate copies along the pitch line (rack).
    Linear,
}

/// Winding direction of the finished boundary. Counter-clockwise loops
/// enclose material; clockwise loops (internal gears) enclose the bore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Ccw,
    Cw,
}

impl Orientation {
    pub const fn reversed(self) -> Self {
        match self {
            Orientation::Ccw => Orientation::Cw,
            Orientation::Cw => Orientation::Ccw,
        }
    }
}

/// Generation policy for one gear kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantPolicy {
    /// Swap addendum/dedendum roles and negate the profile shift. The tip of
    /// an internal tooth points toward the axis, so the tooth we actually
    /// generate is the mating pinion's tooth space.
    pub invert_heights: bool,
    pub array_mode: ArrayMode,
    pub orientation: Orientation,
    /// Herringbone sweeps only make sense where a rotational helix exists.
    pub allows_herringbone: bool,
    /// Worms derive their helix/lead angle from module, pitch diameter and
    /// start count; the input helix angle contributes only its sign.
    pub derives_helix: bool,
}

impl VariantPolicy {
    pub const fn for_kind(kind: &GearKind) -> Self {
        match kind {
            GearKind::External => Self {
                invert_heights: false,
                array_mode: ArrayMode::Angular,
                orientation: Orientation::Ccw,
                allows_herringbone: true,
                derives_helix: false,
            },
            GearKind::Internal { .. } => Self {
                invert_heights: true,
                array_mode: ArrayMode::Angular,
                orientation: Orientation::Cw,
                allows_herringbone: true,
                derives_helix: false,
            },
            GearKind::Rack { .. } => Self {
                invert_heights: false,
                array_mode: ArrayMode::Linear,
                orientation: Orientation::Ccw,
                allows_herringbone: false,
                derives_helix: false,
            },
            GearKind::Worm { .. } => Self {
                invert_heights: false,
                array_mode: ArrayMode::Angular,
                orientation: Orientation::Ccw,
                allows_herringbone: false,
                derives_helix: true,
            },
        }
    }
}
