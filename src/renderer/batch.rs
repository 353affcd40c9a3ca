//! Tessellating canvas
//!
//! Collects one frame's shapes as a triangle list ready for upload.

use glam::Vec2;

use super::canvas::Canvas;
use super::shapes;
use super::vertex::{Vertex, colors};

/// One frame's worth of triangles
#[derive(Debug, Clone)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    clear_color: [f32; 4],
    offset: Vec2,
    circle_segments: u32,
}

impl VertexBatch {
    pub fn new(circle_segments: u32) -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            clear_color: colors::BACKGROUND,
            offset: Vec2::ZERO,
            circle_segments,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn set_circle_segments(&mut self, segments: u32) {
        self.circle_segments = segments;
    }

    fn extend(&mut self, vertices: impl IntoIterator<Item = Vertex>) {
        let offset = self.offset;
        self.vertices.extend(vertices.into_iter().map(|mut v| {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
            v
        }));
    }
}

impl Canvas for VertexBatch {
    fn clear(&mut self, color: [f32; 4]) {
        self.vertices.clear();
        self.clear_color = color;
        self.offset = Vec2::ZERO;
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        self.extend(shapes::rect(pos, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let vertices = shapes::circle(center, radius, color, self.circle_segments);
        self.extend(vertices);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: [f32; 4]) {
        let half = line_width / 2.0;
        let vertices = shapes::ring(
            center,
            (radius - half).max(0.0),
            radius + half,
            color,
            self.circle_segments,
        );
        self.extend(vertices);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]) {
        self.extend(shapes::polygon(points, color));
    }
}
