//! Validity checking of geometries against the simple features model, built on the same
//! geometry graph machinery as the overlay.
mod connected_interior;
mod consistent_area;
mod is_valid_op;
mod nested_rings;

pub use connected_interior::ConnectedInteriorTester;
pub use consistent_area::{ConsistentAreaTester, EdgeEndBundle};
pub use is_valid_op::IsValidOp;
pub use nested_rings::NestedRingTester;

use crate::{
    core::{math::Coord, traits::Real},
    error::err_coord,
    geometry::Geometry,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for [IsValidOp].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsValidOptions {
    /// Accept a shell (or hole) touching itself at a point to form an inverted hole (or
    /// exverted shell), the ESRI model of such polygons.
    pub self_touching_ring_forming_hole_valid: bool,
}

impl IsValidOptions {
    pub fn new() -> Self {
        Self {
            self_touching_ring_forming_hole_valid: false,
        }
    }
}

impl Default for IsValidOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of validity failure.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Topology failure raised while checking (the input is too broken to analyze).
    Error,
    /// Consecutive repeated points. These are valid, the kind is never reported.
    RepeatedPoint,
    HoleOutsideShell,
    NestedHoles,
    DisconnectedInterior,
    SelfIntersection,
    RingSelfIntersection,
    NestedShells,
    DuplicateRings,
    TooFewPoints,
    InvalidCoordinate,
    RingNotClosed,
}

impl ValidationErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ValidationErrorKind::Error => "Topology Validation Error",
            ValidationErrorKind::RepeatedPoint => "Repeated Point",
            ValidationErrorKind::HoleOutsideShell => "Hole lies outside shell",
            ValidationErrorKind::NestedHoles => "Holes are nested",
            ValidationErrorKind::DisconnectedInterior => "Interior is disconnected",
            ValidationErrorKind::SelfIntersection => "Self-intersection",
            ValidationErrorKind::RingSelfIntersection => "Ring Self-intersection",
            ValidationErrorKind::NestedShells => "Nested shells",
            ValidationErrorKind::DuplicateRings => "Duplicate Rings",
            ValidationErrorKind::TooFewPoints => "Too few distinct points in geometry component",
            ValidationErrorKind::InvalidCoordinate => "Invalid Coordinate",
            ValidationErrorKind::RingNotClosed => "Ring is not closed",
        }
    }
}

/// The first validity failure found in a geometry and where it was found.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("{} at or near point ({}, {})", .kind.message(), .coord.x, .coord.y)]
pub struct TopologyValidationError {
    pub kind: ValidationErrorKind,
    pub coord: Coord<f64>,
}

impl TopologyValidationError {
    pub fn new<T>(kind: ValidationErrorKind, coord: Coord<T>) -> Self
    where
        T: Real,
    {
        Self {
            kind,
            coord: err_coord(coord),
        }
    }
}

impl<T> Geometry<T>
where
    T: Real,
{
    /// Geometry is valid with the default [IsValidOptions].
    pub fn is_valid(&self) -> bool {
        IsValidOp::new(self).is_valid()
    }

    /// First validity failure of the geometry, `None` if it is valid.
    pub fn validation_error(&self) -> Option<TopologyValidationError> {
        IsValidOp::new(self).validation_error()
    }
}
