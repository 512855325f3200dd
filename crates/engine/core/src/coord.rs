//! Fixed-point world coordinates.
//!
//! Positions and ranges are expressed in a fixed-point scalar with 16
//! fractional bits. Distances are computed with an integer square root so
//! every lockstep peer derives bit-identical results; floating point never
//! feeds back into simulation state.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Fixed-point scalar: `i64` with 16 fractional bits.
///
/// One tile of world space is `Phys::ONE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phys(pub i64);

impl Phys {
    pub const FRACTION_BITS: u32 = 16;
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << Self::FRACTION_BITS);

    /// Builds a scalar from a whole number of tiles.
    pub const fn from_int(value: i64) -> Self {
        Self(value << Self::FRACTION_BITS)
    }

    /// Builds a scalar from a tile count expressed in 1/65536 units.
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Converts to `f32` for presentation only. Never compare or branch on
    /// the result inside the simulation.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::ONE.0 as f32
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Fixed-point multiply.
    pub const fn mul_phys(self, rhs: Self) -> Self {
        Self(((self.0 as i128 * rhs.0 as i128) >> Self::FRACTION_BITS) as i64)
    }

    /// Fixed-point divide. Saturates to zero on a zero divisor.
    pub const fn div_phys(self, rhs: Self) -> Self {
        if rhs.0 == 0 {
            return Self::ZERO;
        }
        Self((((self.0 as i128) << Self::FRACTION_BITS) / rhs.0 as i128) as i64)
    }

    /// Deterministic integer square root of a non-negative scalar.
    pub fn sqrt(self) -> Self {
        debug_assert!(self.0 >= 0, "sqrt of negative fixed-point value");
        if self.0 <= 0 {
            return Self::ZERO;
        }
        // sqrt(v * 2^16) * 2^8 == sqrt(v) * 2^16, so widen first.
        let widened = (self.0 as u128) << Self::FRACTION_BITS;
        Self(isqrt_u128(widened) as i64)
    }
}

/// Newton iteration on u128, rounded down.
fn isqrt_u128(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    let mut x = 1u128 << (value.ilog2() / 2 + 1);
    loop {
        let next = (x + value / x) / 2;
        if next >= x {
            return x;
        }
        x = next;
    }
}

impl Add for Phys {
    type Output = Phys;
    fn add(self, rhs: Phys) -> Phys {
        Phys(self.0 + rhs.0)
    }
}

impl Sub for Phys {
    type Output = Phys;
    fn sub(self, rhs: Phys) -> Phys {
        Phys(self.0 - rhs.0)
    }
}

impl AddAssign for Phys {
    fn add_assign(&mut self, rhs: Phys) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Phys {
    fn sub_assign(&mut self, rhs: Phys) {
        self.0 -= rhs.0;
    }
}

impl Neg for Phys {
    type Output = Phys;
    fn neg(self) -> Phys {
        Phys(-self.0)
    }
}

impl Mul<i64> for Phys {
    type Output = Phys;
    fn mul(self, rhs: i64) -> Phys {
        Phys(self.0 * rhs)
    }
}

impl Div<i64> for Phys {
    type Output = Phys;
    fn div(self, rhs: i64) -> Phys {
        Phys(self.0 / rhs)
    }
}

impl fmt::Display for Phys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.to_f32())
    }
}

/// World position: north-east / south-east ground axes plus altitude.
///
/// `up` is zero for ground units and only participates in projectile flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phys3 {
    pub ne: Phys,
    pub se: Phys,
    pub up: Phys,
}

impl Phys3 {
    pub const ORIGIN: Self = Self {
        ne: Phys::ZERO,
        se: Phys::ZERO,
        up: Phys::ZERO,
    };

    pub const fn new(ne: Phys, se: Phys, up: Phys) -> Self {
        Self { ne, se, up }
    }

    /// Ground position from whole tile coordinates.
    pub const fn on_ground(ne: i64, se: i64) -> Self {
        Self {
            ne: Phys::from_int(ne),
            se: Phys::from_int(se),
            up: Phys::ZERO,
        }
    }

    /// Euclidean ground distance, ignoring altitude.
    pub fn ground_distance(self, other: Phys3) -> Phys {
        let dne = self.ne - other.ne;
        let dse = self.se - other.se;
        (dne.mul_phys(dne) + dse.mul_phys(dse)).sqrt()
    }

    /// Vector difference on the ground plane.
    pub fn ground_delta(self, other: Phys3) -> (Phys, Phys) {
        (other.ne - self.ne, other.se - self.se)
    }
}

impl fmt::Display for Phys3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.ne, self.se, self.up)
    }
}

/// Facing direction on the ground plane, kept as a unit-ish fixed vector.
///
/// Only meaningful for rendering; never read back by simulation logic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facing {
    pub ne: Phys,
    pub se: Phys,
}

impl Facing {
    /// Faces from `origin` towards `target`. Zero deltas keep the old facing.
    pub fn towards(origin: Phys3, target: Phys3) -> Option<Self> {
        let (dne, dse) = origin.ground_delta(target);
        if dne == Phys::ZERO && dse == Phys::ZERO {
            return None;
        }
        let len = (dne.mul_phys(dne) + dse.mul_phys(dse)).sqrt();
        Some(Self {
            ne: dne.div_phys(len),
            se: dse.div_phys(len),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_of_whole_squares() {
        assert_eq!(Phys::from_int(9).sqrt(), Phys::from_int(3));
        assert_eq!(Phys::from_int(144).sqrt(), Phys::from_int(12));
        assert_eq!(Phys::ZERO.sqrt(), Phys::ZERO);
    }

    #[test]
    fn ground_distance_is_euclidean() {
        let a = Phys3::on_ground(0, 0);
        let b = Phys3::on_ground(3, 4);
        assert_eq!(a.ground_distance(b), Phys::from_int(5));
    }

    #[test]
    fn mul_div_roundtrip() {
        let half = Phys::ONE / 2;
        assert_eq!(Phys::from_int(6).mul_phys(half), Phys::from_int(3));
        assert_eq!(Phys::from_int(3).div_phys(half), Phys::from_int(6));
    }

    #[test]
    fn facing_towards_is_normalised() {
        let f = Facing::towards(Phys3::on_ground(0, 0), Phys3::on_ground(10, 0)).unwrap();
        assert_eq!(f.ne, Phys::ONE);
        assert_eq!(f.se, Phys::ZERO);
        assert!(Facing::towards(Phys3::ORIGIN, Phys3::ORIGIN).is_none());
    }
}
