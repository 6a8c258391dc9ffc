#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rule deciding whether a point touched by some number of line endpoints lies on the boundary of
/// a linear geometry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum BoundaryNodeRule {
    /// OGC SFS rule, a point is on the boundary if it is the endpoint of an odd number of lines.
    #[default]
    Mod2,
    /// Every endpoint is on the boundary.
    EndPoint,
    /// Endpoints of more than one line are on the boundary.
    MultivalentEndPoint,
    /// Endpoints of exactly one line are on the boundary.
    MonovalentEndPoint,
}

impl BoundaryNodeRule {
    /// `true` if a point which is the endpoint of `boundary_count` lines is on the boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// # use planar_overlay::geometry::BoundaryNodeRule;
    /// assert!(BoundaryNodeRule::Mod2.is_in_boundary(1));
    /// assert!(!BoundaryNodeRule::Mod2.is_in_boundary(2));
    /// assert!(BoundaryNodeRule::EndPoint.is_in_boundary(2));
    /// ```
    #[inline]
    pub fn is_in_boundary(self, boundary_count: usize) -> bool {
        match self {
            BoundaryNodeRule::Mod2 => boundary_count % 2 == 1,
            BoundaryNodeRule::EndPoint => boundary_count > 0,
            BoundaryNodeRule::MultivalentEndPoint => boundary_count > 1,
            BoundaryNodeRule::MonovalentEndPoint => boundary_count == 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules() {
        let counts = [0, 1, 2, 3];
        let eval = |rule: BoundaryNodeRule| -> Vec<bool> {
            counts.iter().map(|&c| rule.is_in_boundary(c)).collect()
        };
        assert_eq!(eval(BoundaryNodeRule::Mod2), vec![false, true, false, true]);
        assert_eq!(eval(BoundaryNodeRule::EndPoint), vec![false, true, true, true]);
        assert_eq!(
            eval(BoundaryNodeRule::MultivalentEndPoint),
            vec![false, false, true, true]
        );
        assert_eq!(
            eval(BoundaryNodeRule::MonovalentEndPoint),
            vec![false, true, false, false]
        );
        assert_eq!(BoundaryNodeRule::default(), BoundaryNodeRule::Mod2);
    }
}
