use crate::foundation::core::{Mat2, Point, Rgba8};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A stroked line segment in screen coordinates.
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
    pub color: Rgba8,
    /// Opacity multiplier in `[0, 1]` applied on top of the color.
    pub opacity: f32,
    /// Stroke width in pixels.
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A filled triangle in screen coordinates (vector arrowheads).
pub struct Triangle {
    pub points: [Point; 3],
    pub color: Rgba8,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Declarative geometry for one frame.
///
/// A frame consists of a background clear color, stroked segments and filled
/// triangles in draw order, and the net-transformation readout. Any renderer
/// that can stroke segments and fill triangles can draw it; the producer has
/// no side effects and no backend knowledge.
pub struct FrameGeometry {
    /// Background fill.
    pub clear: Rgba8,
    /// Stroked segments in draw order.
    pub segments: Vec<LineSegment>,
    /// Filled triangles in draw order.
    pub triangles: Vec<Triangle>,
    /// Net transformation readout: the composition of all steps applied
    /// since the last reset, independent of the animated matrix.
    pub net: Mat2,
}
