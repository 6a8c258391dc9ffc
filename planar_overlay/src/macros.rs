/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Macro used for implementing geometry macros. Used for extracting macro repetition count for
/// reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a line string from a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use planar_overlay::line_string;
/// # use planar_overlay::core::math::coord;
/// let line = line_string![(0.0, 1.0), (2.0, 0.0)];
/// assert_eq!(line.len(), 2);
/// assert_eq!(line.0[1], coord(2.0, 0.0));
/// ```
#[macro_export]
macro_rules! line_string {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut coords = ::std::vec::Vec::with_capacity(size);
            $(
                coords.push($crate::core::math::Coord::new($x.0, $x.1));
            )*
            $crate::geometry::LineString(coords)
        }
    };
}

/// Construct a polygon, either from the shell vertexes given as (x, y) tuples or with the
/// `exterior: [...], interiors: [[...], ...]` form.
///
/// # Examples
///
/// ```
/// # use planar_overlay::polygon;
/// let square = polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)];
/// assert!(square.interiors.is_empty());
///
/// let with_hole = polygon![
///     exterior: [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)],
///     interiors: [[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0), (1.0, 1.0)]],
/// ];
/// assert_eq!(with_hole.interiors.len(), 1);
/// assert_eq!(with_hole.area(), 15.0);
/// ```
#[macro_export]
macro_rules! polygon {
    (exterior: [$( $ext:expr ),* $(,)?], interiors: [$( [$( $int:expr ),* $(,)?] ),* $(,)?] $(,)?) => {
        $crate::geometry::Polygon::new(
            $crate::line_string![$($ext),*],
            ::std::vec![$($crate::line_string![$($int),*]),*],
        )
    };
    (exterior: [$( $ext:expr ),* $(,)?] $(,)?) => {
        $crate::geometry::Polygon::new($crate::line_string![$($ext),*], ::std::vec::Vec::new())
    };
    ($( $x:expr ),* $(,)?) => {
        $crate::geometry::Polygon::new($crate::line_string![$($x),*], ::std::vec::Vec::new())
    };
}
