//! Projection between hex space and pixel space
//!
//! An [`Orientation`] holds the forward (hex -> pixel) matrix, its inverse,
//! and the angle of the first corner. A [`Layout`] pairs one of the two
//! orientations with a cell size and a pixel origin.

use std::f64::consts::PI;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::hex::{FractionalHex, Hex};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Position in pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Forward and backward projection coefficients
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub f0: f64,
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
    /// Angle of corner 0, in sixths of a full turn
    pub start_angle: f64,
}

/// Cells with a vertex at the top
pub static POINTY: Orientation = Orientation {
    f0: SQRT_3,
    f1: SQRT_3 / 2.0,
    f2: 0.0,
    f3: 3.0 / 2.0,
    b0: SQRT_3 / 3.0,
    b1: -1.0 / 3.0,
    b2: 0.0,
    b3: 2.0 / 3.0,
    start_angle: 0.5,
};

/// Cells with an edge at the top
pub static FLAT: Orientation = Orientation {
    f0: 3.0 / 2.0,
    f1: 0.0,
    f2: SQRT_3 / 2.0,
    f3: SQRT_3,
    b0: 2.0 / 3.0,
    b1: 0.0,
    b2: -1.0 / 3.0,
    b3: SQRT_3 / 3.0,
    start_angle: 0.0,
};

/// Named orientation, used where an orientation has to be configured
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationKind {
    Pointy,
    #[default]
    Flat,
}

impl OrientationKind {
    pub fn orientation(self) -> &'static Orientation {
        match self {
            OrientationKind::Pointy => &POINTY,
            OrientationKind::Flat => &FLAT,
        }
    }
}

/// Converts between cells and pixels. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    orientation: &'static Orientation,
    size: Point,
    origin: Point,
}

impl Layout {
    /// Both size components must be positive; anything else would divide by
    /// zero (or flip the grid) in [`Layout::to_coordinate`].
    pub fn new(orientation: &'static Orientation, size: Point, origin: Point) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(size.x) || !valid(size.y) {
            return Err(GridError::InvalidScale { x: size.x, y: size.y });
        }
        Ok(Self { orientation, size, origin })
    }

    pub fn orientation(&self) -> &'static Orientation {
        self.orientation
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Pixel position of a cell's center
    pub fn to_pixel(&self, h: Hex) -> Point {
        let m = self.orientation;
        let (q, r) = (h.q as f64, h.r as f64);
        let x = (m.f0 * q + m.f1 * r) * self.size.x;
        let y = (m.f2 * q + m.f3 * r) * self.size.y;
        Point::new(x + self.origin.x, y + self.origin.y)
    }

    /// Fractional cell under a pixel. Call [`FractionalHex::round`] to get the
    /// cell itself.
    pub fn to_coordinate(&self, p: Point) -> FractionalHex {
        let m = self.orientation;
        let x = (p.x - self.origin.x) / self.size.x;
        let y = (p.y - self.origin.y) / self.size.y;
        FractionalHex::new(m.b0 * x + m.b1 * y, m.b2 * x + m.b3 * y)
    }

    /// Cell containing a pixel. Fails when the pixel is NaN, infinite, or so
    /// far out that no cell can be represented.
    pub fn cell_at(&self, p: Point) -> Result<Hex> {
        self.to_coordinate(p).round()
    }

    /// Offset of corner `c` from a cell's center
    pub fn corner_offset(&self, c: usize) -> Point {
        let angle = 2.0 * PI * (self.orientation.start_angle + c as f64) / 6.0;
        Point::new(self.size.x * angle.cos(), self.size.y * angle.sin())
    }

    /// The six corners of a cell, in order, without repeating the first
    pub fn polygon_corners(&self, h: Hex) -> [Point; 6] {
        let center = self.to_pixel(h);
        std::array::from_fn(|c| center + self.corner_offset(c))
    }
}
