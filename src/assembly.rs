//! Geometry assembly output: the neutral description handed to the host CAD
//! kernel, and the one-call generation pipeline.
//!
//! The assembly stage performs no geometry computation of its own; its only
//! contract is structural completeness of the curve chain before handoff.

use crate::errors::GearError;
use crate::float_types::Real;
use crate::params::{DerivedGeometry, GearParameters, GearSpec};
use crate::profile::{GearProfile, array, involute};
use crate::sweep::SweepPath;
use nalgebra::Isometry3;

/// The finished, neutral geometric description of one gear: the boundary
/// profile, the sweep path, and the placement transform. Everything here is
/// owned by a single generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GearAssembly {
    pub profile: GearProfile,
    pub path: SweepPath,
    pub placement: Isometry3<Real>,
}

impl GearAssembly {
    /// Package a profile and path, verifying structural completeness: every
    /// curve segment's endpoints must chain to the next, and closed loops
    /// must close.
    pub fn assemble(
        profile: GearProfile,
        path: SweepPath,
        placement: Isometry3<Real>,
    ) -> Result<GearAssembly, GearError> {
        if !profile.is_well_formed() {
            return Err(GearError::ArrayInconsistency {
                tooth: 0,
                detail: "assembled profile chain is broken",
            });
        }
        Ok(GearAssembly { profile, path, placement })
    }
}

/// Run the whole pipeline: validate, derive, generate one tooth, array it,
/// build the sweep path, and package the result.
///
/// Synchronous and self-contained; fails fast with the first error and never
/// returns a partial assembly. Identical inputs produce bit-identical
/// output.
pub fn generate(spec: &GearSpec) -> Result<GearAssembly, GearError> {
    let params: GearParameters = spec.clone().validate()?;
    let derived = DerivedGeometry::derive(&params)?;
    let tooth = match &derived {
        DerivedGeometry::Circular(dims) => involute::circular_tooth(&params, dims)?,
        DerivedGeometry::Rack(dims) => involute::rack_tooth(&params, dims)?,
    };
    let profile = array::array(&tooth, &params, &derived)?;
    let path = SweepPath::build(&params, &derived)?;
    GearAssembly::assemble(profile, path, *params.placement())
}
