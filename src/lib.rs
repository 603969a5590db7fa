//! Parametric **involute gear geometry** for CAD kernels: validated gear
//! parameters in, neutral curve-and-path descriptions out.
//!
//! The pipeline runs raw parameters through validation and derivation, builds
//! one tooth's boundary (involute flanks, tip arc, root fillet or trochoidal
//! undercut), arrays it into the full profile, attaches a sweep path
//! (straight, helical, herringbone or worm lead), and packages everything for
//! a host modeling kernel to turn into a solid. No solid modeling happens
//! here; the crate is a pure, synchronous geometry engine with no host CAD
//! API dependency.
//!
//! ```
//! use gearkit::{GearSpec, generate};
//!
//! let gear = generate(&GearSpec { module: 2.0, teeth: 24, ..GearSpec::default() }).unwrap();
//! assert!(gear.profile.closed);
//! ```
//!
//! # Features
//! - **f64** (default): use f64 as Real
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod assembly;
pub mod errors;
pub mod float_types;
pub mod params;
pub mod profile;
pub mod sweep;
pub mod variant;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use assembly::{GearAssembly, generate};
pub use errors::{GearError, GeometryInfeasible, PathInfeasible, ValidationError};
pub use params::{DerivedGeometry, GearKind, GearParameters, GearSpec};
pub use profile::{CurveSegment, GearProfile, ToothProfile};
pub use sweep::{Hand, Helix, SweepPath};
