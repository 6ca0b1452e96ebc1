use crate::animation::state::TransformationState;
use crate::foundation::core::{Rgba8, Vec2, Viewport};
use crate::render::geometry::{FrameGeometry, LineSegment, Triangle};

/// Half-extent of the square grid, in world units. Grid lines are drawn for
/// every integer coordinate in `[-GRID_EXTENT, GRID_EXTENT]`.
pub const GRID_EXTENT: i64 = 10;

/// Arrowhead dimensions in screen pixels.
const HEAD_LEN_PX: f64 = 15.0;
const HEAD_WIDTH_PX: f64 = 7.0;

const GRID_OPACITY: f32 = 100.0 / 255.0;
const BASIS_OPACITY: f32 = 100.0 / 255.0;
const ORIGINAL_OPACITY: f32 = 60.0 / 255.0;

/// Colors used by the frame producer.
pub mod palette {
    use crate::foundation::core::Rgba8;

    pub const BACKGROUND: Rgba8 = Rgba8::opaque(245, 245, 245);
    pub const GRID: Rgba8 = Rgba8::opaque(220, 220, 220);
    pub const AXIS: Rgba8 = Rgba8::opaque(80, 80, 80);
    /// Image of `(1, 0)`.
    pub const BASIS_I: Rgba8 = Rgba8::opaque(0, 153, 0);
    /// Image of `(0, 1)`.
    pub const BASIS_J: Rgba8 = Rgba8::opaque(255, 128, 0);
    /// The untransformed input vector.
    pub const ORIGINAL_VECTOR: Rgba8 = Rgba8::opaque(0, 102, 204);
    /// The input vector under the interpolated matrix.
    pub const CURRENT_VECTOR: Rgba8 = Rgba8::opaque(204, 0, 0);
}

/// Derive the renderable geometry for one frame.
///
/// Pure function of the state: the transformed coordinate grid and main
/// axes, the images of the basis vectors, the faded untransformed input
/// vector, and the fully opaque transformed vector, each arrow capped with a
/// filled arrowhead triangle.
pub fn render_frame(state: &TransformationState, viewport: &Viewport) -> FrameGeometry {
    let m = state.current_matrix();
    let lines = 2 * GRID_EXTENT as usize + 1;
    let mut geom = FrameGeometry {
        clear: palette::BACKGROUND,
        segments: Vec::with_capacity(2 * lines + 2 + 4),
        triangles: Vec::with_capacity(4),
        net: state.net_matrix(),
    };

    let ext = GRID_EXTENT as f64;
    {
        let segments = &mut geom.segments;
        let mut line = |a: Vec2, b: Vec2, color: Rgba8, opacity: f32, width: f32| {
            segments.push(LineSegment {
                from: viewport.to_screen(m * a),
                to: viewport.to_screen(m * b),
                color,
                opacity,
                width,
            });
        };

        for i in -GRID_EXTENT..=GRID_EXTENT {
            let i = i as f64;
            line(Vec2::new(-ext, i), Vec2::new(ext, i), palette::GRID, GRID_OPACITY, 1.0);
            line(Vec2::new(i, -ext), Vec2::new(i, ext), palette::GRID, GRID_OPACITY, 1.0);
        }

        line(Vec2::new(-ext, 0.0), Vec2::new(ext, 0.0), palette::AXIS, 1.0, 2.0);
        line(Vec2::new(0.0, -ext), Vec2::new(0.0, ext), palette::AXIS, 1.0, 2.0);
    }

    push_vector(&mut geom, viewport, m * Vec2::new(1.0, 0.0), palette::BASIS_I, BASIS_OPACITY, 3.0);
    push_vector(&mut geom, viewport, m * Vec2::new(0.0, 1.0), palette::BASIS_J, BASIS_OPACITY, 3.0);
    push_vector(
        &mut geom,
        viewport,
        state.vector(),
        palette::ORIGINAL_VECTOR,
        ORIGINAL_OPACITY,
        2.0,
    );
    push_vector(
        &mut geom,
        viewport,
        state.current_vector(),
        palette::CURRENT_VECTOR,
        1.0,
        5.0,
    );

    geom
}

/// Arrow from the origin to `v` with a filled arrowhead at the tip: the back
/// corners sit `HEAD_LEN_PX` behind the tip, `HEAD_WIDTH_PX` to either side
/// along the screen-space perpendicular. A zero-length vector produces no
/// geometry.
fn push_vector(
    geom: &mut FrameGeometry,
    viewport: &Viewport,
    v: Vec2,
    color: Rgba8,
    opacity: f32,
    width: f32,
) {
    let origin = viewport.to_screen(Vec2::ZERO);
    let tip = viewport.to_screen(v);
    let dir = tip - origin;
    let len = dir.hypot();
    if len == 0.0 {
        return;
    }
    let u = dir / len;
    let perp = Vec2::new(-u.y, u.x);

    geom.segments.push(LineSegment {
        from: origin,
        to: tip,
        color,
        opacity,
        width,
    });
    geom.triangles.push(Triangle {
        points: [
            tip,
            tip - u * HEAD_LEN_PX + perp * HEAD_WIDTH_PX,
            tip - u * HEAD_LEN_PX - perp * HEAD_WIDTH_PX,
        ],
        color,
        opacity,
    });
}
