use super::FuzzyEq;
use static_aabb2d_index::IndexableNum;

/// Trait representing a real number coordinate type (`f32` or `f64`).
///
/// Topology is computed with exact comparisons on this type. Robust predicates widen values to
/// `f64` through [Real::as_f64] before evaluating determinants.
pub trait Real:
    num_traits::real::Real
    + num_traits::Bounded
    + FuzzyEq
    + std::default::Default
    + std::fmt::Debug
    + IndexableNum
    + 'static
{
    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    #[inline]
    fn half() -> Self {
        Self::one() / Self::two()
    }

    #[inline]
    fn min_value() -> Self {
        num_traits::real::Real::min_value()
    }

    #[inline]
    fn max_value() -> Self {
        num_traits::real::Real::max_value()
    }

    /// Widen to `f64` for robust predicate evaluation.
    #[inline]
    fn as_f64(self) -> f64 {
        num_traits::ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    /// Narrow from `f64` (used when translating coordinates back after common bit removal).
    #[inline]
    fn from_f64(value: f64) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::zero)
    }
}

impl Real for f32 {
    #[inline]
    fn two() -> Self {
        2.0f32
    }

    #[inline]
    fn half() -> Self {
        0.5f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Real for f64 {
    #[inline]
    fn two() -> Self {
        2.0f64
    }

    #[inline]
    fn half() -> Self {
        0.5f64
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}
