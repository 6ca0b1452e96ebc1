use crate::foundation::core::{Mat2, Vec2};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Entrywise interpolation of the coefficients. Intermediate matrices are
/// not guaranteed to preserve orthogonality or determinant sign.
impl Lerp for Mat2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let mut out = [[0.0; 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = f64::lerp(&a.0[i][j], &b.0[i][j], t);
            }
        }
        Mat2(out)
    }
}
