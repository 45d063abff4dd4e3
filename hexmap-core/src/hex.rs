//! Hex coordinates in cube form
//!
//! Only `q` and `r` are stored. `s` is always derived as `-q - r`, so the cube
//! invariant `q + r + s == 0` cannot be broken by any constructor or operation.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Axial unit vectors (dq, dr), indexed 0..5.
/// Ring walks and neighbor lookups depend on this exact order.
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// Integer cube coordinate of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube component, derived from `q` and `r`
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    pub fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r)
    }

    pub fn sub(self, other: Hex) -> Hex {
        Hex::new(self.q - other.q, self.r - other.r)
    }

    /// Componentwise product of `q` and `r`. This is not a scalar scale, see
    /// [`Hex::scale`] for that.
    pub fn multiply(self, other: Hex) -> Hex {
        Hex::new(self.q * other.q, self.r * other.r)
    }

    pub fn scale(self, k: i32) -> Hex {
        Hex::new(self.q * k, self.r * k)
    }

    /// Rotate 60 degrees counter-clockwise around the origin
    pub fn rotate_left(self) -> Hex {
        Hex::new(-self.s(), -self.q)
    }

    /// Rotate 60 degrees clockwise around the origin
    pub fn rotate_right(self) -> Hex {
        Hex::new(-self.r, -self.s())
    }

    /// Unit vector for direction `d`, which must be in `0..6`
    pub fn direction(d: i32) -> Result<Hex> {
        usize::try_from(d)
            .ok()
            .and_then(|i| DIRECTIONS.get(i))
            .map(|&(q, r)| Hex::new(q, r))
            .ok_or(GridError::InvalidDirection(d))
    }

    /// Adjacent cell in direction `d`
    pub fn neighbor(self, d: i32) -> Result<Hex> {
        Ok(self.add(Hex::direction(d)?))
    }

    /// All six adjacent cells, in direction order
    pub fn neighbors(self) -> impl Iterator<Item = Hex> {
        DIRECTIONS
            .iter()
            .map(move |&(q, r)| self.add(Hex::new(q, r)))
    }

    pub fn distance_to(self, other: Hex) -> i32 {
        distance(self, other)
    }
}

/// Length of a hex vector: the number of steps from the origin to `v`
pub fn length(v: Hex) -> i32 {
    (v.q.abs() + v.r.abs() + v.s().abs()) / 2
}

/// Number of steps between two cells
pub fn distance(a: Hex, b: Hex) -> i32 {
    length(a.sub(b))
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::add(self, rhs)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, rhs: Hex) -> Hex {
        Hex::sub(self, rhs)
    }
}

impl Mul for Hex {
    type Output = Hex;

    fn mul(self, rhs: Hex) -> Hex {
        self.multiply(rhs)
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, k: i32) -> Hex {
        self.scale(k)
    }
}

impl Neg for Hex {
    type Output = Hex;

    fn neg(self) -> Hex {
        Hex::new(-self.q, -self.r)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s())
    }
}

/// Largest |q| or |r| a rounded cell may have, so that `s` still fits
pub const MAX_COMPONENT: i32 = i32::MAX / 2;

/// Cube coordinate with real components, produced by pixel inversion.
/// It only becomes a grid cell after [`FractionalHex::round`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractionalHex {
    pub q: f64,
    pub r: f64,
}

impl FractionalHex {
    pub const fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }

    pub fn s(&self) -> f64 {
        -self.q - self.r
    }

    /// Nearest integer cell.
    ///
    /// Each component is rounded on its own, then the one that moved the most
    /// is recomputed from the other two. `q` wins only if it strictly exceeds
    /// both others; otherwise `r` is recomputed if its delta beats `s`, and `s`
    /// takes every remaining tie.
    ///
    /// Fails for non-finite input and for cells beyond [`MAX_COMPONENT`].
    pub fn round(self) -> Result<Hex> {
        let limit = MAX_COMPONENT as f64;
        let in_range = |v: f64| v.is_finite() && v.abs() <= limit;
        if !in_range(self.q) || !in_range(self.r) {
            return Err(GridError::OutOfRange { q: self.q, r: self.r });
        }

        let s = self.s();
        let mut q = self.q.round();
        let mut r = self.r.round();
        let rs = s.round();

        let q_diff = (q - self.q).abs();
        let r_diff = (r - self.r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            q = -r - rs;
        } else if r_diff > s_diff {
            r = -q - rs;
        }

        if !in_range(q) || !in_range(r) {
            return Err(GridError::OutOfRange { q: self.q, r: self.r });
        }
        Ok(Hex::new(q as i32, r as i32))
    }
}

impl From<Hex> for FractionalHex {
    fn from(h: Hex) -> Self {
        FractionalHex::new(h.q as f64, h.r as f64)
    }
}
