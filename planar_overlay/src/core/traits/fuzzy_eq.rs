/// Tolerance comparison of measures (areas, lengths) computed from overlay results.
///
/// Topology never goes through this trait: nodes are identified by exact coordinate equality.
/// A measure summed over rebuilt rings may differ from the exact value in its last bits, so
/// tests and callers comparing such measures use a tolerance.
///
/// # Examples
///
/// ```
/// # use planar_overlay::core::traits::*;
/// use planar_overlay::{overlay::Overlay, polygon, Geometry};
///
/// let a = Geometry::Polygon(polygon![(0.0, 0.0), (0.3, 0.0), (0.3, 0.1), (0.0, 0.1), (0.0, 0.0)]);
/// let b = Geometry::Polygon(polygon![(0.1, 0.0), (0.4, 0.0), (0.4, 0.1), (0.1, 0.1), (0.1, 0.0)]);
/// let union = a.union(&b).unwrap();
/// assert!(union.area().fuzzy_eq(0.04));
/// assert!((union.area() - a.area() - b.area()).fuzzy_eq_eps(-0.02, 1e-12));
/// ```
pub trait FuzzyEq: Sized + Copy {
    /// Tolerance used by [FuzzyEq::fuzzy_eq] and [FuzzyEq::fuzzy_eq_zero].
    fn fuzzy_epsilon() -> Self;

    fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    #[inline]
    fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, Self::fuzzy_epsilon())
    }

    fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool;

    /// Used for collapsed results, e.g. the area of two polygons meeting along an edge.
    #[inline]
    fn fuzzy_eq_zero(&self) -> bool {
        self.fuzzy_eq_zero_eps(Self::fuzzy_epsilon())
    }
}

impl FuzzyEq for f32 {
    #[inline]
    fn fuzzy_epsilon() -> Self {
        1.0e-5
    }

    #[inline]
    fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool {
        (*self - other).fuzzy_eq_zero_eps(fuzzy_epsilon)
    }

    #[inline]
    fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool {
        self.abs() < fuzzy_epsilon
    }
}

impl FuzzyEq for f64 {
    #[inline]
    fn fuzzy_epsilon() -> Self {
        1.0e-8
    }

    #[inline]
    fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool {
        (*self - other).fuzzy_eq_zero_eps(fuzzy_epsilon)
    }

    #[inline]
    fn fuzzy_eq_zero_eps(&self, fuzzy_epsilon: Self) -> bool {
        self.abs() < fuzzy_epsilon
    }
}
