//! Conditioning of overlay inputs by removing the high order bits shared by all coordinates.
//!
//! Translating both inputs close to the origin leaves more precision for the intersection
//! computations, which fixes many robustness failures on inputs far from the origin.
use super::{OverlayOp, OverlayOpCode, OverlayOptions, OverlayResult};
use crate::{
    core::{math::Coord, traits::Real},
    geometry::Geometry,
};

const MANTISSA_BITS: u32 = 52;
const SIGN_EXP_BITS: u32 = 12;

/// Accumulates the high order bits shared by a set of `f64` values.
#[derive(Debug, Clone, Copy)]
pub struct CommonBits {
    is_first: bool,
    common_sign_exp: u64,
    common_bits: u64,
}

impl Default for CommonBits {
    fn default() -> Self {
        Self::new()
    }
}

impl CommonBits {
    pub fn new() -> Self {
        Self {
            is_first: true,
            common_sign_exp: 0,
            common_bits: 0,
        }
    }

    #[inline]
    fn sign_exp_bits(bits: u64) -> u64 {
        bits >> MANTISSA_BITS
    }

    /// Number of leading mantissa bits `a` and `b` agree on.
    fn num_common_most_sig_mantissa_bits(a: u64, b: u64) -> u32 {
        let mut count = 0;
        for i in (0..MANTISSA_BITS).rev() {
            if (a >> i) & 1 != (b >> i) & 1 {
                return count;
            }
            count += 1;
        }
        MANTISSA_BITS
    }

    #[inline]
    fn zero_lower_bits(bits: u64, n: u32) -> u64 {
        if n >= 64 {
            return 0;
        }
        bits & !((1u64 << n) - 1)
    }

    pub fn add(&mut self, value: f64) {
        let bits = value.to_bits();
        if self.is_first {
            self.common_bits = bits;
            self.common_sign_exp = Self::sign_exp_bits(bits);
            self.is_first = false;
            return;
        }

        if Self::sign_exp_bits(bits) != self.common_sign_exp {
            self.common_bits = 0;
            return;
        }

        let common_mantissa_bits = Self::num_common_most_sig_mantissa_bits(self.common_bits, bits);
        self.common_bits = Self::zero_lower_bits(
            self.common_bits,
            64 - (SIGN_EXP_BITS + common_mantissa_bits),
        );
    }

    /// Value made of the common bits (0 if there are none or nothing was added).
    pub fn common(&self) -> f64 {
        f64::from_bits(self.common_bits)
    }
}

/// Removes and restores the common coordinate bits of a set of geometries.
#[derive(Debug, Clone, Copy)]
pub struct CommonBitsRemover {
    common_x: CommonBits,
    common_y: CommonBits,
}

impl Default for CommonBitsRemover {
    fn default() -> Self {
        Self::new()
    }
}

impl CommonBitsRemover {
    pub fn new() -> Self {
        Self {
            common_x: CommonBits::new(),
            common_y: CommonBits::new(),
        }
    }

    /// Include the coordinates of `geom` in the common bits.
    pub fn add<T>(&mut self, geom: &Geometry<T>)
    where
        T: Real,
    {
        for c in geom.coords() {
            self.common_x.add(c.x.as_f64());
            self.common_y.add(c.y.as_f64());
        }
    }

    /// Coordinate made of the common bits of all x and all y values added.
    pub fn common_coord<T>(&self) -> Coord<T>
    where
        T: Real,
    {
        Coord::new(
            T::from_f64(self.common_x.common()),
            T::from_f64(self.common_y.common()),
        )
    }

    /// Copy of `geom` translated by the negated common coordinate.
    pub fn remove_common_bits<T>(&self, geom: &Geometry<T>) -> Geometry<T>
    where
        T: Real,
    {
        let c = self.common_coord::<T>();
        geom.translate(-c.x, -c.y)
    }

    /// Copy of `geom` translated back by the common coordinate.
    pub fn add_common_bits<T>(&self, geom: &Geometry<T>) -> Geometry<T>
    where
        T: Real,
    {
        let c = self.common_coord::<T>();
        geom.translate(c.x, c.y)
    }
}

/// Run the overlay on copies of the inputs with their common coordinate bits removed, then
/// translate the result back.
pub fn overlay_with_common_bits_removed<T>(
    a: &Geometry<T>,
    b: &Geometry<T>,
    op: OverlayOpCode,
    options: &OverlayOptions,
) -> OverlayResult<T>
where
    T: Real,
{
    let mut remover = CommonBitsRemover::new();
    remover.add(a);
    remover.add(b);
    log::debug!(
        "removing common bits {:?} from overlay inputs",
        remover.common_coord::<T>()
    );

    let a = remover.remove_common_bits(a);
    let b = remover.remove_common_bits(b);
    let result = OverlayOp::new(&a, &b, options).result_geometry(op)?;
    Ok(remover.add_common_bits(&result))
}
