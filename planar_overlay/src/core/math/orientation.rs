use super::Coord;
use crate::core::traits::Real;

/// Orientation of a point relative to a directed line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Point lies to the right of the line (clockwise turn).
    Clockwise,
    /// Point lies on the line.
    Collinear,
    /// Point lies to the left of the line (counter clockwise turn).
    CounterClockwise,
}

impl Orientation {
    /// Integer form: `-1` clockwise, `0` collinear, `1` counter clockwise.
    #[inline]
    pub fn index(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }

    #[inline]
    fn from_sign(sign: i32) -> Self {
        match sign {
            s if s > 0 => Orientation::CounterClockwise,
            s if s < 0 => Orientation::Clockwise,
            _ => Orientation::Collinear,
        }
    }
}

/// Relative error bound of the fast determinant filter.
const DP_SAFE_EPSILON: f64 = 1e-15;

/// Returns the orientation of `q` relative to the directed segment `p1 -> p2`.
///
/// The determinant is first evaluated in double precision with an error bound check. Only when
/// the result is too close to zero to trust is it recomputed in double-double arithmetic, which
/// is exact for the sign in all non pathological cases. Raw angle comparisons are never used.
///
/// # Examples
///
/// ```
/// # use planar_overlay::core::math::*;
/// let p1 = Coord::new(0.0, 0.0);
/// let p2 = Coord::new(10.0, 0.0);
/// assert_eq!(orientation_index(p1, p2, Coord::new(5.0, 1.0)), Orientation::CounterClockwise);
/// assert_eq!(orientation_index(p1, p2, Coord::new(5.0, -1.0)), Orientation::Clockwise);
/// assert_eq!(orientation_index(p1, p2, Coord::new(20.0, 0.0)), Orientation::Collinear);
/// ```
pub fn orientation_index<T>(p1: Coord<T>, p2: Coord<T>, q: Coord<T>) -> Orientation
where
    T: Real,
{
    let (p1x, p1y) = (p1.x.as_f64(), p1.y.as_f64());
    let (p2x, p2y) = (p2.x.as_f64(), p2.y.as_f64());
    let (qx, qy) = (q.x.as_f64(), q.y.as_f64());

    if let Some(sign) = orientation_filter(p1x, p1y, p2x, p2y, qx, qy) {
        return Orientation::from_sign(sign);
    }

    let dx1 = DoubleDouble::diff(p2x, p1x);
    let dy1 = DoubleDouble::diff(p2y, p1y);
    let dx2 = DoubleDouble::diff(qx, p2x);
    let dy2 = DoubleDouble::diff(qy, p2y);

    let det = dx1.mul(dy2).sub(dy1.mul(dx2));
    Orientation::from_sign(det.signum())
}

/// Fast determinant evaluation, `None` if the sign cannot be trusted.
#[inline]
fn orientation_filter(pax: f64, pay: f64, pbx: f64, pby: f64, pcx: f64, pcy: f64) -> Option<i32> {
    let det_left = (pax - pcx) * (pby - pcy);
    let det_right = (pay - pcy) * (pbx - pcx);
    let det = det_left - det_right;

    let det_sum = if det_left > 0.0 {
        if det_right <= 0.0 {
            return Some(signum(det));
        }
        det_left + det_right
    } else if det_left < 0.0 {
        if det_right >= 0.0 {
            return Some(signum(det));
        }
        -det_left - det_right
    } else {
        return Some(signum(det));
    };

    let err_bound = DP_SAFE_EPSILON * det_sum;
    if det >= err_bound || -det >= err_bound {
        return Some(signum(det));
    }

    None
}

#[inline]
fn signum(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Minimal double-double number (unevaluated sum `hi + lo`).
#[derive(Debug, Copy, Clone)]
struct DoubleDouble {
    hi: f64,
    lo: f64,
}

impl DoubleDouble {
    /// Exact difference `a - b`.
    #[inline]
    fn diff(a: f64, b: f64) -> Self {
        two_sum(a, -b)
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        let s = two_sum(self.hi, other.hi);
        let t = two_sum(self.lo, other.lo);
        let c = s.lo + t.hi;
        let v = quick_two_sum(s.hi, c);
        let w = t.lo + v.lo;
        quick_two_sum(v.hi, w)
    }

    #[inline]
    fn neg(self) -> Self {
        DoubleDouble {
            hi: -self.hi,
            lo: -self.lo,
        }
    }

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.add(other.neg())
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        let p = two_prod(self.hi, other.hi);
        let cross = self.hi * other.lo + self.lo * other.hi;
        quick_two_sum(p.hi, p.lo + cross)
    }

    #[inline]
    fn signum(self) -> i32 {
        if self.hi != 0.0 {
            signum(self.hi)
        } else {
            signum(self.lo)
        }
    }
}

#[inline]
fn two_sum(a: f64, b: f64) -> DoubleDouble {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    DoubleDouble { hi: s, lo: err }
}

#[inline]
fn quick_two_sum(a: f64, b: f64) -> DoubleDouble {
    let s = a + b;
    let err = b - (s - a);
    DoubleDouble { hi: s, lo: err }
}

#[inline]
fn two_prod(a: f64, b: f64) -> DoubleDouble {
    let p = a * b;
    let err = a.mul_add(b, -p);
    DoubleDouble { hi: p, lo: err }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    #[test]
    fn basic_orientation() {
        assert_eq!(
            orientation_index(c(0.0, 0.0), c(1.0, 1.0), c(0.0, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation_index(c(0.0, 0.0), c(1.0, 1.0), c(1.0, 0.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation_index(c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)),
            Orientation::Collinear
        );
    }

    #[test]
    fn far_from_origin() {
        let p1 = c(1.0e8, 1.0e8);
        let p2 = c(1.0e8 + 1.0, 1.0e8);
        let q = c(1.0e8 + 0.5, 1.0e8 + 1.0e-8);
        assert_eq!(orientation_index(p1, p2, q), Orientation::CounterClockwise);
        assert_eq!(orientation_index(p2, p1, q), Orientation::Clockwise);
    }

    #[test]
    fn double_double_recovers_small_determinant() {
        let p1 = c(1.0e15, 1.0e15);
        let p2 = c(1.0e15 + 2.0, 1.0e15 + 2.0);
        let q = c(1.0e15 + 1.0, 1.0e15 + 1.0);
        assert_eq!(orientation_index(p1, p2, q), Orientation::Collinear);
    }

    #[test]
    fn works_for_f32() {
        let o = orientation_index(
            Coord::new(0.0f32, 0.0),
            Coord::new(4.0, 0.0),
            Coord::new(2.0, 3.0),
        );
        assert_eq!(o, Orientation::CounterClockwise);
    }
}
