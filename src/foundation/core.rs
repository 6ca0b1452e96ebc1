use std::fmt;
use std::ops::Mul;

use crate::foundation::error::{GridmorphError, GridmorphResult};

pub use kurbo::{Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> GridmorphResult<Self> {
        if den == 0 {
            return Err(GridmorphError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GridmorphError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Re-check the constructor invariants on a deserialized value.
    pub fn validate(self) -> GridmorphResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }
}

/// Straight (non-premultiplied) RGBA8 color tag; compositing is the
/// renderer's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// World-to-screen mapping for frame production.
///
/// World coordinates are centered on the screen midpoint; screen Y grows
/// downward, so world Y is flipped.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Screen width in pixels.
    pub width: u32,
    /// Screen height in pixels.
    pub height: u32,
    /// Pixels per world unit.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            scale: 80.0,
        }
    }
}

impl Viewport {
    pub fn validate(self) -> GridmorphResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GridmorphError::validation(
                "Viewport width and height must be > 0",
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(GridmorphError::validation(
                "Viewport scale must be finite and > 0",
            ));
        }
        Ok(())
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn to_screen(self, world: Vec2) -> Point {
        let c = self.center();
        Point::new(c.x + world.x * self.scale, c.y - world.y * self.scale)
    }
}

/// A 2x2 real matrix, row-major, representing a linear map of the plane.
///
/// Any entries are allowed, singular matrices included.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Mat2(pub [[f64; 2]; 2]);

impl Mat2 {
    pub const IDENTITY: Self = Self([[1.0, 0.0], [0.0, 1.0]]);

    pub const fn from_rows(rows: [[f64; 2]; 2]) -> Self {
        Self(rows)
    }

    pub fn entry(self, row: usize, col: usize) -> f64 {
        self.0[row][col]
    }

    pub fn transpose(self) -> Self {
        Self([
            [self.0[0][0], self.0[1][0]],
            [self.0[0][1], self.0[1][1]],
        ])
    }

    pub fn determinant(self) -> f64 {
        self.0[0][0] * self.0[1][1] - self.0[0][1] * self.0[1][0]
    }
}

impl Mul for Mat2 {
    type Output = Self;

    /// Matrix composition: `(a * b)` applies `b` first, then `a`.
    fn mul(self, rhs: Self) -> Self {
        let a = self.0;
        let b = rhs.0;
        let mut out = [[0.0; 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j];
            }
        }
        Self(out)
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.0[0][0] * v.x + self.0[0][1] * v.y,
            self.0[1][0] * v.x + self.0[1][1] * v.y,
        )
    }
}

impl fmt::Display for Mat2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[a, b], [c, d]] = self.0;
        match f.precision() {
            Some(p) => write!(f, "[[{a:.p$}, {b:.p$}], [{c:.p$}, {d:.p$}]]"),
            None => write!(f, "[[{a}, {b}], [{c}, {d}]]"),
        }
    }
}
