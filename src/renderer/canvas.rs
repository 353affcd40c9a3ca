//! Immediate-mode 2D drawing surface
//!
//! Mirrors the small subset of a canvas context the scene needs. Coordinates
//! are screen pixels with y growing downward, shifted by the current offset.

use glam::Vec2;

/// A 2D surface the scene can be drawn onto
pub trait Canvas {
    /// Reset the surface to a solid color
    fn clear(&mut self, color: [f32; 4]);

    /// Translation applied to every subsequent shape
    fn set_offset(&mut self, offset: Vec2);

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);

    /// Circle outline centered on `radius` with the given line width
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: [f32; 4]);

    /// Closed polygon; must be star-shaped about its centroid
    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]);
}
