//! Boolean overlay (intersection, union, difference, symmetric difference) of two geometries
//! computed on a labelled planar graph.
mod line_builder;
mod noding_validator;
mod overlay_op;
mod point_builder;
mod polygon_builder;
pub mod robust;

pub use line_builder::LineBuilder;
pub use noding_validator::check_noding;
pub use overlay_op::OverlayOp;
pub use point_builder::PointBuilder;
pub use polygon_builder::PolygonBuilder;

use crate::{
    core::traits::Real,
    error::TopologyError,
    geometry::{Dimension, Geometry, Location},
    graph::Label,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of an overlay operation.
pub type OverlayResult<T> = Result<Geometry<T>, TopologyError>;

/// Overlay operation to compute.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlayOpCode {
    /// Points in both geometries.
    Intersection,
    /// Points in either geometry.
    Union,
    /// Points in the first geometry but not in the second.
    Difference,
    /// Points in exactly one of the geometries.
    SymDifference,
}

impl OverlayOpCode {
    /// Dimension of the result when it is empty.
    pub fn result_dimension(self, dim0: Dimension, dim1: Dimension) -> Dimension {
        match self {
            OverlayOpCode::Intersection => dim0.min(dim1),
            OverlayOpCode::Union | OverlayOpCode::SymDifference => dim0.max(dim1),
            OverlayOpCode::Difference => dim0,
        }
    }
}

/// Options for overlay operations.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayOptions {
    /// Rule deciding which line endpoints are on the boundary.
    pub boundary_node_rule: crate::geometry::BoundaryNodeRule,
    /// Check the split edges are fully noded before building the graph, failing with
    /// [TopologyError::NonNodedIntersection] if not.
    pub validate_noding: bool,
    /// Retry a failed overlay once with the common coordinate bits of the inputs removed.
    pub retry_with_common_bits: bool,
}

impl OverlayOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            boundary_node_rule: crate::geometry::BoundaryNodeRule::Mod2,
            validate_noding: true,
            retry_with_common_bits: true,
        }
    }
}

impl Default for OverlayOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a point with locations `loc0` and `loc1` relative to the two inputs is in the
/// result of `op`. Boundary locations count as interior.
pub fn is_result_of_op(
    loc0: Option<Location>,
    loc1: Option<Location>,
    op: OverlayOpCode,
) -> bool {
    let in0 = matches!(loc0, Some(Location::Interior) | Some(Location::Boundary));
    let in1 = matches!(loc1, Some(Location::Interior) | Some(Location::Boundary));
    match op {
        OverlayOpCode::Intersection => in0 && in1,
        OverlayOpCode::Union => in0 || in1,
        OverlayOpCode::Difference => in0 && !in1,
        OverlayOpCode::SymDifference => in0 != in1,
    }
}

/// [is_result_of_op] for the on locations of `label`.
#[inline]
pub fn is_label_result_of_op(label: &Label, op: OverlayOpCode) -> bool {
    is_result_of_op(label.on(0), label.on(1), op)
}

/// Empty geometry with the dimension of the result of `op` applied to `a` and `b`.
pub fn empty_result<T>(op: OverlayOpCode, a: &Geometry<T>, b: &Geometry<T>) -> Geometry<T>
where
    T: Real,
{
    Geometry::empty(op.result_dimension(a.dimension(), b.dimension()))
}

/// Compute `op` applied to `a` and `b` with default options.
pub fn overlay_op<T>(a: &Geometry<T>, b: &Geometry<T>, op: OverlayOpCode) -> OverlayResult<T>
where
    T: Real,
{
    overlay_op_with_options(a, b, op, &OverlayOptions::new())
}

/// Compute `op` applied to `a` and `b`.
///
/// Empty inputs are handled without building a graph. If the overlay fails with a retryable
/// error and `options.retry_with_common_bits` is set, it is run again on the inputs with their
/// common coordinate bits removed. When the retry fails too the original error is returned.
pub fn overlay_op_with_options<T>(
    a: &Geometry<T>,
    b: &Geometry<T>,
    op: OverlayOpCode,
    options: &OverlayOptions,
) -> OverlayResult<T>
where
    T: Real,
{
    if let Some(result) = empty_input_result(a, b, op) {
        return Ok(result);
    }

    match OverlayOp::new(a, b, options).result_geometry(op) {
        Ok(result) => Ok(result),
        Err(err) if options.retry_with_common_bits && err.is_retryable() => {
            log::warn!("{:?} overlay failed: {}, retrying with common bits removed", op, err);
            match robust::overlay_with_common_bits_removed(a, b, op, options) {
                Ok(result) => {
                    log::debug!("{:?} overlay retry succeeded", op);
                    Ok(result)
                }
                Err(retry_err) => {
                    log::debug!("{:?} overlay retry failed: {}", op, retry_err);
                    Err(err)
                }
            }
        }
        Err(err) => Err(err),
    }
}

fn empty_input_result<T>(a: &Geometry<T>, b: &Geometry<T>, op: OverlayOpCode) -> Option<Geometry<T>>
where
    T: Real,
{
    if !a.is_empty() && !b.is_empty() {
        return None;
    }

    let result = match op {
        OverlayOpCode::Intersection => empty_result(op, a, b),
        OverlayOpCode::Union | OverlayOpCode::SymDifference => {
            if a.is_empty() {
                if b.is_empty() {
                    empty_result(op, a, b)
                } else {
                    b.clone()
                }
            } else {
                a.clone()
            }
        }
        OverlayOpCode::Difference => {
            if a.is_empty() {
                empty_result(op, a, b)
            } else {
                a.clone()
            }
        }
    };

    Some(result)
}

/// Overlay operations on geometries.
pub trait Overlay<T>
where
    T: Real,
{
    /// Compute `op` applied to `self` and `other`.
    fn overlay(&self, other: &Geometry<T>, op: OverlayOpCode) -> OverlayResult<T>;

    #[inline]
    fn intersection(&self, other: &Geometry<T>) -> OverlayResult<T> {
        self.overlay(other, OverlayOpCode::Intersection)
    }

    #[inline]
    fn union(&self, other: &Geometry<T>) -> OverlayResult<T> {
        self.overlay(other, OverlayOpCode::Union)
    }

    #[inline]
    fn difference(&self, other: &Geometry<T>) -> OverlayResult<T> {
        self.overlay(other, OverlayOpCode::Difference)
    }

    #[inline]
    fn sym_difference(&self, other: &Geometry<T>) -> OverlayResult<T> {
        self.overlay(other, OverlayOpCode::SymDifference)
    }
}

impl<T> Overlay<T> for Geometry<T>
where
    T: Real,
{
    #[inline]
    fn overlay(&self, other: &Geometry<T>, op: OverlayOpCode) -> OverlayResult<T> {
        overlay_op(self, other, op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::coord;

    #[test]
    fn result_of_op_table() {
        use Location::*;
        use OverlayOpCode::*;
        let i = Some(Interior);
        let b = Some(Boundary);
        let e = Some(Exterior);

        assert!(is_result_of_op(i, b, Intersection));
        assert!(!is_result_of_op(i, e, Intersection));
        assert!(is_result_of_op(e, b, Union));
        assert!(!is_result_of_op(e, e, Union));
        assert!(is_result_of_op(b, e, Difference));
        assert!(!is_result_of_op(i, i, Difference));
        assert!(!is_result_of_op(e, i, Difference));
        assert!(is_result_of_op(e, i, SymDifference));
        assert!(!is_result_of_op(b, i, SymDifference));
        assert!(!is_result_of_op(None, None, Union));
    }

    #[test]
    fn empty_inputs() {
        let a = Geometry::Polygon(polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let empty_line: Geometry<f64> = Geometry::empty(Dimension::Line);

        let r = a.intersection(&empty_line).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.dimension(), Dimension::Line);

        assert_eq!(a.union(&empty_line).unwrap(), a);
        assert_eq!(empty_line.sym_difference(&a).unwrap(), a);
        assert_eq!(a.difference(&empty_line).unwrap(), a);

        let r = empty_line.difference(&a).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.dimension(), Dimension::Line);
    }

    #[test]
    fn points_overlay() {
        let a = Geometry::MultiPoint(vec![coord(0.0, 0.0), coord(1.0, 1.0)]);
        let b = Geometry::Point(coord(1.0, 1.0));
        assert_eq!(a.intersection(&b).unwrap(), Geometry::Point(coord(1.0, 1.0)));
        assert_eq!(a.difference(&b).unwrap(), Geometry::Point(coord(0.0, 0.0)));
        assert_eq!(b.difference(&a).unwrap().dimension(), Dimension::Point);
        assert!(b.difference(&a).unwrap().is_empty());
    }

    #[test]
    fn failed_retry_returns_first_error() {
        // the crossing of the bow-tie ring at (1026, 1026) is never noded
        let bow_tie = Geometry::Polygon(polygon![
            (1024.0, 1024.0),
            (1028.0, 1028.0),
            (1028.0, 1024.0),
            (1024.0, 1028.0),
            (1024.0, 1024.0)
        ]);
        let square = Geometry::Polygon(polygon![
            (1025.0, 1025.0),
            (1027.0, 1025.0),
            (1027.0, 1027.0),
            (1025.0, 1027.0),
            (1025.0, 1025.0)
        ]);
        let op = OverlayOpCode::Intersection;

        let no_retry = OverlayOptions {
            retry_with_common_bits: false,
            ..OverlayOptions::new()
        };
        let first = overlay_op_with_options(&bow_tie, &square, op, &no_retry).unwrap_err();
        assert!(first.is_retryable());
        assert!(first.coord().x > 1000.0);

        // the retry runs translated near the origin and fails there too
        let retry_err =
            robust::overlay_with_common_bits_removed(&bow_tie, &square, op, &no_retry).unwrap_err();
        assert!(retry_err.coord().x < 1000.0);

        assert_eq!(overlay_op(&bow_tie, &square, op).unwrap_err(), first);
        assert_eq!(bow_tie.intersection(&square).unwrap_err(), first);
    }
}
