use planar_overlay::{Coord, Geometry, LineString, Polygon};

/// Closed star shaped ring around `center` alternating between two radii.
pub fn star_ring(vertex_count: usize, center: Coord, inner: f64, outer: f64) -> LineString {
    let mut coords = Vec::with_capacity(vertex_count + 1);
    for i in 0..vertex_count {
        let angle = i as f64 * std::f64::consts::TAU / vertex_count as f64;
        let radius = if i % 2 == 0 { outer } else { inner };
        coords.push(Coord::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
    coords.push(coords[0]);
    LineString(coords)
}

/// Pair of overlapping star polygons with every spike crossing the other star's spikes.
pub fn overlapping_stars(vertex_count: usize) -> (Geometry, Geometry) {
    let a = Polygon::new(
        star_ring(vertex_count, Coord::new(0.0, 0.0), 20.0, 40.0),
        Vec::new(),
    );
    let b = Polygon::new(
        star_ring(vertex_count, Coord::new(7.5, 3.25), 20.0, 40.0),
        Vec::new(),
    );
    (Geometry::Polygon(a), Geometry::Polygon(b))
}

/// Square grid of `n * n` small squares, a polygon with many holes is made when subtracted from
/// a bounding square.
pub fn square_grid(n: usize) -> Geometry {
    let size = 1.0;
    let spacing = 2.0;
    let mut polys = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let x = i as f64 * spacing + 0.5;
            let y = j as f64 * spacing + 0.5;
            let ring = LineString(vec![
                Coord::new(x, y),
                Coord::new(x + size, y),
                Coord::new(x + size, y + size),
                Coord::new(x, y + size),
                Coord::new(x, y),
            ]);
            polys.push(Polygon::new(ring, Vec::new()));
        }
    }
    Geometry::MultiPolygon(polys)
}

pub fn bounding_square(n: usize) -> Geometry {
    let max = n as f64 * 2.0;
    let ring = LineString(vec![
        Coord::new(0.0, 0.0),
        Coord::new(max, 0.0),
        Coord::new(max, max),
        Coord::new(0.0, max),
        Coord::new(0.0, 0.0),
    ]);
    Geometry::Polygon(Polygon::new(ring, Vec::new()))
}
